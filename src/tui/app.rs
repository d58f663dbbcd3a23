//! TUI Application State
//!
//! The shell around the wizard. `App` owns the [`Wizard`] and translates
//! terminal events into wizard operations; it keeps only transient UI
//! state of its own (highlighted option, focused code editor, drop-zone
//! flash, file picker).

use super::events::{AppMode, TuiEvent, keys};
use super::file_picker::{FilePicker, PickerAction};
use crate::config::UiConfig;
use crate::sink::SubmissionSink;
use crate::wizard::{
    CodeField, DeliveryOption, DetailField, FileHandle, Submission, SubmitOutcome, Wizard,
    WizardStep, parse_dropped_paths,
};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Ticks the drop zone stays highlighted after a drop
const DROP_FLASH_TICKS: u8 = 5;

pub struct App {
    pub mode: AppMode,
    wizard: Wizard,
    sink: Box<dyn SubmissionSink>,

    /// Highlighted row on the ChoosingOption step
    pub option_cursor: usize,
    /// Focused editor on the code details view
    pub code_focus: CodeField,
    pub file_picker: Option<FilePicker>,
    /// Remaining ticks of drop-zone highlight
    pub drop_flash: u8,

    /// One-line message shown on the landing view
    pub notice: Option<String>,
    /// Everything submitted during this session
    pub submissions: Vec<Submission>,
    pub should_quit: bool,

    picker_start_dir: PathBuf,
    show_hidden: bool,
}

impl App {
    pub fn new(ui: &UiConfig, sink: Box<dyn SubmissionSink>) -> Self {
        let picker_start_dir = ui
            .picker_start_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            mode: AppMode::Landing,
            wizard: Wizard::new(),
            sink,
            option_cursor: 0,
            code_focus: CodeField::Html,
            file_picker: None,
            drop_flash: 0,
            notice: None,
            submissions: Vec::new(),
            should_quit: false,
            picker_start_dir,
            show_hidden: ui.show_hidden_files,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Single dispatch point for every UI event
    pub fn handle_event(&mut self, event: TuiEvent) {
        let before = self.notice.is_some().then(|| self.wizard.state().clone());

        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Paste(text) => self.handle_paste(&text),
            TuiEvent::Tick => self.drop_flash = self.drop_flash.saturating_sub(1),
            TuiEvent::Resize(..) => {}
            TuiEvent::Quit => self.should_quit = true,
        }

        // A failure notice lasts until the user changes something
        if let Some(before) = before
            && self.wizard.is_visible()
            && self.wizard.state() != &before
        {
            self.notice = None;
        }
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if keys::is_quit(&event) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::Landing => self.handle_landing_key(event),
            AppMode::Wizard => self.handle_wizard_key(event),
            AppMode::FilePicker => self.handle_file_picker_key(event),
        }
    }

    fn handle_landing_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Enter | KeyCode::Char('c') => self.open_wizard(),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn open_wizard(&mut self) {
        self.wizard.open();
        self.option_cursor = 0;
        self.code_focus = CodeField::Html;
        self.file_picker = None;
        self.drop_flash = 0;
        self.notice = None;
        self.mode = AppMode::Wizard;
    }

    fn close_wizard(&mut self) {
        self.wizard.close();
        self.file_picker = None;
        self.mode = AppMode::Landing;
    }

    fn handle_wizard_key(&mut self, event: KeyEvent) {
        match self.wizard.step() {
            WizardStep::Naming => self.handle_naming_key(event),
            WizardStep::ChoosingOption => self.handle_choosing_key(event),
            WizardStep::EnteringDetails(option) => self.handle_details_key(option, event),
        }
    }

    fn handle_naming_key(&mut self, event: KeyEvent) {
        if keys::is_cancel(&event) {
            self.close_wizard();
        } else if keys::is_enter(&event) {
            if self.wizard.advance_from_naming() {
                self.option_cursor = 0;
            }
        } else if let Some(text) = edit_text(self.wizard.game_name(), &event, false) {
            self.wizard.set_game_name(text);
        }
    }

    fn handle_choosing_key(&mut self, event: KeyEvent) {
        let count = DeliveryOption::ALL.len();
        match event.code {
            KeyCode::Esc => self.close_wizard(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.option_cursor = (self.option_cursor + 1).min(count - 1);
            }
            KeyCode::Char(c @ '1'..='3') => {
                let index = (c as usize) - ('1' as usize);
                self.option_cursor = index;
                self.choose(DeliveryOption::ALL[index]);
            }
            KeyCode::Enter => {
                if let Some(&option) = DeliveryOption::ALL.get(self.option_cursor) {
                    self.choose(option);
                }
            }
            _ => {}
        }
    }

    fn choose(&mut self, option: DeliveryOption) {
        if self.wizard.select_delivery_option(option) {
            self.code_focus = CodeField::Html;
        }
    }

    fn handle_details_key(&mut self, option: DeliveryOption, event: KeyEvent) {
        if keys::is_cancel(&event) {
            self.wizard.go_back();
            return;
        }
        if keys::is_submit(&event) {
            self.submit();
            return;
        }

        match option {
            DeliveryOption::Url => {
                if keys::is_enter(&event) {
                    self.submit();
                } else {
                    self.edit_field(DetailField::Url, &event, false);
                }
            }
            DeliveryOption::Code => {
                if keys::is_next_field(&event) {
                    self.code_focus = self.code_focus.next();
                } else if keys::is_prev_field(&event) {
                    self.code_focus = self.code_focus.prev();
                } else {
                    self.edit_field(DetailField::Code(self.code_focus), &event, true);
                }
            }
            DeliveryOption::Upload => {
                if keys::is_enter(&event) || event.code == KeyCode::Char('o') {
                    self.open_file_picker();
                }
            }
        }
    }

    fn edit_field(&mut self, field: DetailField, event: &KeyEvent, multiline: bool) {
        if let Some(text) = edit_text(self.wizard.draft().field(field), event, multiline) {
            self.wizard.set_field(field, text);
        }
    }

    fn submit(&mut self) {
        match self.wizard.submit(&mut self.sink) {
            Ok(SubmitOutcome::Submitted(submission)) => {
                self.notice = Some(format!("Submitted {}", submission));
                self.submissions.push(submission);
                self.file_picker = None;
                self.mode = AppMode::Landing;
            }
            Ok(SubmitOutcome::Blocked) => {}
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                self.notice = Some(format!("Submission failed: {}", e));
            }
        }
    }

    fn open_file_picker(&mut self) {
        self.file_picker = Some(FilePicker::new(
            self.picker_start_dir.clone(),
            self.show_hidden,
        ));
        self.mode = AppMode::FilePicker;
    }

    fn handle_file_picker_key(&mut self, event: KeyEvent) {
        let Some(picker) = self.file_picker.as_mut() else {
            self.mode = AppMode::Wizard;
            return;
        };

        let action = if keys::is_cancel(&event) {
            PickerAction::Cancel
        } else if keys::is_up(&event) {
            picker.move_up();
            PickerAction::None
        } else if keys::is_down(&event) {
            picker.move_down();
            PickerAction::None
        } else if keys::is_toggle(&event) {
            picker.toggle_mark();
            PickerAction::None
        } else if keys::is_enter(&event) {
            picker.activate()
        } else {
            PickerAction::None
        };

        match action {
            PickerAction::None => {}
            PickerAction::Cancel => {
                self.remember_picker_dir();
                self.mode = AppMode::Wizard;
            }
            PickerAction::Confirm(paths) => {
                self.remember_picker_dir();
                self.wizard.set_uploaded_files(FileHandle::from_paths(paths));
                self.mode = AppMode::Wizard;
            }
        }
    }

    /// Reopen the picker where the user left it
    fn remember_picker_dir(&mut self) {
        if let Some(picker) = self.file_picker.take() {
            self.picker_start_dir = picker.current_dir;
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.mode != AppMode::Wizard {
            return;
        }

        match self.wizard.step() {
            WizardStep::Naming => {
                let line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                let name = format!("{}{}", self.wizard.game_name(), line);
                self.wizard.set_game_name(name);
            }
            WizardStep::ChoosingOption => {}
            WizardStep::EnteringDetails(DeliveryOption::Url) => {
                let url = format!("{}{}", self.wizard.draft().game_url, text);
                self.wizard.set_field(DetailField::Url, url);
            }
            WizardStep::EnteringDetails(DeliveryOption::Code) => {
                let field = DetailField::Code(self.code_focus);
                let code = format!("{}{}", self.wizard.draft().field(field), text);
                self.wizard.set_field(field, code);
            }
            WizardStep::EnteringDetails(DeliveryOption::Upload) => {
                let paths = parse_dropped_paths(text);
                if paths.is_empty() {
                    return;
                }
                self.wizard.set_uploaded_files(FileHandle::from_paths(paths));
                self.drop_flash = DROP_FLASH_TICKS;
            }
        }
    }
}

/// Apply an editing key to `current`, returning the new text if it changed
fn edit_text(current: &str, event: &KeyEvent, multiline: bool) -> Option<String> {
    if let Some(c) = keys::typed_char(event) {
        let mut text = current.to_string();
        text.push(c);
        return Some(text);
    }
    match event.code {
        KeyCode::Backspace if !current.is_empty() => {
            let mut text = current.to_string();
            text.pop();
            Some(text)
        }
        KeyCode::Enter if multiline => Some(format!("{}\n", current)),
        _ => None,
    }
}
