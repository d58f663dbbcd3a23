//! Game Creation Wizard
//!
//! Controller for the three-step "create a game" flow: name the game,
//! choose how its content is delivered, then fill in the details for that
//! delivery option and submit.
//!
//! All state lives in a single [`Wizard`] owned by the shell. Nothing
//! mutates it except the operations below, and precondition failures are
//! never errors: the matching control is simply disabled, so the
//! operation returns `false` or [`SubmitOutcome::Blocked`].

mod files;
mod payload;

pub use files::{FileHandle, parse_dropped_paths};
pub use payload::{CodeBundle, Submission, SubmissionContent};

use crate::error::Result;
use crate::sink::SubmissionSink;
use serde::{Deserialize, Serialize};

/// How the game content is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    Url,
    Code,
    Upload,
}

impl DeliveryOption {
    /// Options in the order they are offered
    pub const ALL: [Self; 3] = [Self::Url, Self::Code, Self::Upload];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Url => "Insert URL Link",
            Self::Code => "Code",
            Self::Upload => "Upload Files",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Url => "Point at a game that is already hosted",
            Self::Code => "Paste HTML, CSS and JavaScript",
            Self::Upload => "Drop or browse for the game's files",
        }
    }
}

/// Current step in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Naming,
    ChoosingOption,
    EnteringDetails(DeliveryOption),
}

impl WizardStep {
    /// Step index (0-based)
    pub fn index(&self) -> usize {
        match self {
            Self::Naming => 0,
            Self::ChoosingOption => 1,
            Self::EnteringDetails(_) => 2,
        }
    }

    pub fn total() -> usize {
        3
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Naming => "Name Your Game",
            Self::ChoosingOption => "Choose Your Option",
            Self::EnteringDetails(DeliveryOption::Url) => "Enter Game URL",
            Self::EnteringDetails(DeliveryOption::Code) => "Enter Game Code",
            Self::EnteringDetails(DeliveryOption::Upload) => "Upload Game Files",
        }
    }
}

/// One of the three inline code editors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeField {
    Html,
    Css,
    JavaScript,
}

impl CodeField {
    pub const ALL: [Self; 3] = [Self::Html, Self::Css, Self::JavaScript];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Html => Self::Css,
            Self::Css => Self::JavaScript,
            Self::JavaScript => Self::Html,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Html => Self::JavaScript,
            Self::Css => Self::Html,
            Self::JavaScript => Self::Css,
        }
    }
}

/// Text fields that belong to a delivery option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Url,
    Code(CodeField),
}

/// Raw field values. Kept when the user backs out of an option so
/// switching back restores what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDraft {
    pub game_name: String,
    pub game_url: String,
    pub code: CodeBundle,
    pub uploaded_files: Vec<FileHandle>,
}

impl GameDraft {
    pub fn field(&self, field: DetailField) -> &str {
        match field {
            DetailField::Url => &self.game_url,
            DetailField::Code(CodeField::Html) => &self.code.html,
            DetailField::Code(CodeField::Css) => &self.code.css,
            DetailField::Code(CodeField::JavaScript) => &self.code.javascript,
        }
    }

    fn field_mut(&mut self, field: DetailField) -> &mut String {
        match field {
            DetailField::Url => &mut self.game_url,
            DetailField::Code(CodeField::Html) => &mut self.code.html,
            DetailField::Code(CodeField::Css) => &mut self.code.css,
            DetailField::Code(CodeField::JavaScript) => &mut self.code.javascript,
        }
    }

    /// Whether the data required by `option` is present
    pub fn is_ready(&self, option: DeliveryOption) -> bool {
        match option {
            DeliveryOption::Url => !self.game_url.trim().is_empty(),
            DeliveryOption::Code => self.code.has_content(),
            DeliveryOption::Upload => !self.uploaded_files.is_empty(),
        }
    }
}

/// Everything the wizard knows. `Default` is the state of a fresh open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: GameDraft,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Naming,
            draft: GameDraft::default(),
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Payload delivered to the sink and the wizard closed
    Submitted(Submission),
    /// Required data missing (or not on the details step); nothing changed
    Blocked,
}

/// The wizard controller
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    visible: bool,
    state: WizardState,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn draft(&self) -> &GameDraft {
        &self.state.draft
    }

    pub fn game_name(&self) -> &str {
        &self.state.draft.game_name
    }

    /// Option chosen for the current details step, if any
    pub fn delivery_option(&self) -> Option<DeliveryOption> {
        match self.state.step {
            WizardStep::EnteringDetails(option) => Some(option),
            _ => None,
        }
    }

    /// Reset to a fresh state and show the wizard
    pub fn open(&mut self) {
        self.state = WizardState::default();
        self.visible = true;
        tracing::debug!("Wizard opened");
    }

    /// Hide the wizard. State is left as-is until the next `open`.
    pub fn close(&mut self) {
        if self.visible {
            tracing::debug!("Wizard closed at step {}", self.state.step.index());
        }
        self.visible = false;
    }

    /// Store the raw game name (no trimming)
    pub fn set_game_name(&mut self, text: impl Into<String>) {
        if !self.visible {
            return;
        }
        self.state.draft.game_name = text.into();
    }

    /// Whether Continue is enabled on the naming step
    pub fn can_advance(&self) -> bool {
        self.visible
            && self.state.step == WizardStep::Naming
            && !self.state.draft.game_name.trim().is_empty()
    }

    /// Naming -> ChoosingOption when the name is non-blank
    pub fn advance_from_naming(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.state.step = WizardStep::ChoosingOption;
        tracing::debug!("Game named {:?}", self.state.draft.game_name);
        true
    }

    /// ChoosingOption -> EnteringDetails(option)
    pub fn select_delivery_option(&mut self, option: DeliveryOption) -> bool {
        if !self.visible || self.state.step != WizardStep::ChoosingOption {
            return false;
        }
        self.state.step = WizardStep::EnteringDetails(option);
        tracing::debug!("Delivery option selected: {:?}", option);
        true
    }

    /// Store raw text for the URL or one of the code editors
    pub fn set_field(&mut self, field: DetailField, value: impl Into<String>) {
        if !self.visible {
            return;
        }
        *self.state.draft.field_mut(field) = value.into();
    }

    /// Replace the uploaded files wholesale
    pub fn set_uploaded_files(&mut self, files: Vec<FileHandle>) {
        if !self.visible {
            return;
        }
        tracing::debug!("Uploaded files replaced ({} file(s))", files.len());
        self.state.draft.uploaded_files = files;
    }

    /// EnteringDetails -> ChoosingOption, keeping every field value
    pub fn go_back(&mut self) -> bool {
        if !self.visible || !matches!(self.state.step, WizardStep::EnteringDetails(_)) {
            return false;
        }
        self.state.step = WizardStep::ChoosingOption;
        true
    }

    /// Whether Submit is enabled
    pub fn can_submit(&self) -> bool {
        self.visible
            && self
                .delivery_option()
                .is_some_and(|option| self.state.draft.is_ready(option))
    }

    /// Payload that Submit would send right now
    pub fn submission(&self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        let draft = &self.state.draft;
        let content = match self.delivery_option()? {
            DeliveryOption::Url => SubmissionContent::Url(draft.game_url.clone()),
            DeliveryOption::Code => SubmissionContent::Code(draft.code.clone()),
            DeliveryOption::Upload => SubmissionContent::Files(draft.uploaded_files.clone()),
        };
        Some(Submission {
            name: draft.game_name.clone(),
            content,
        })
    }

    /// Send the payload to `sink` and close.
    ///
    /// A sink failure is returned and leaves the wizard open and unchanged.
    pub fn submit<S>(&mut self, sink: &mut S) -> Result<SubmitOutcome>
    where
        S: SubmissionSink + ?Sized,
    {
        let Some(submission) = self.submission() else {
            return Ok(SubmitOutcome::Blocked);
        };

        sink.submit(&submission)?;
        tracing::info!("Game submitted: {}", submission);
        self.close();
        Ok(SubmitOutcome::Submitted(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RejectingSink;
    use proptest::prelude::*;
    use rstest::rstest;

    fn opened() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.open();
        wizard
    }

    fn at_details(option: DeliveryOption) -> Wizard {
        let mut wizard = opened();
        wizard.set_game_name("Pixel Quest");
        assert!(wizard.advance_from_naming());
        assert!(wizard.select_delivery_option(option));
        wizard
    }

    #[test]
    fn test_wizard_creation() {
        let wizard = Wizard::new();
        assert!(!wizard.is_visible());
        assert_eq!(wizard.step(), WizardStep::Naming);
        assert_eq!(wizard.delivery_option(), None);
    }

    #[test]
    fn test_open_shows_fresh_state() {
        let wizard = opened();
        assert!(wizard.is_visible());
        assert_eq!(wizard.state(), &WizardState::default());
    }

    #[test]
    fn test_set_game_name_stores_raw_text() {
        let mut wizard = opened();
        wizard.set_game_name("  Pixel Quest  ");
        assert_eq!(wizard.game_name(), "  Pixel Quest  ");
    }

    #[test]
    fn test_whitespace_name_blocks_continue() {
        let mut wizard = opened();
        wizard.set_game_name("  ");
        assert!(!wizard.can_advance());
        assert!(!wizard.advance_from_naming());
        assert_eq!(wizard.step(), WizardStep::Naming);
    }

    #[test]
    fn test_step_navigation() {
        let mut wizard = opened();
        wizard.set_game_name("Pixel Quest");
        assert!(wizard.advance_from_naming());
        assert_eq!(wizard.step(), WizardStep::ChoosingOption);

        assert!(wizard.select_delivery_option(DeliveryOption::Url));
        assert_eq!(wizard.step(), WizardStep::EnteringDetails(DeliveryOption::Url));
        assert_eq!(wizard.step().index(), 2);

        assert!(wizard.go_back());
        assert_eq!(wizard.step(), WizardStep::ChoosingOption);
    }

    #[test]
    fn test_cannot_skip_choosing_option() {
        let mut wizard = opened();
        wizard.set_game_name("Pixel Quest");
        assert!(!wizard.select_delivery_option(DeliveryOption::Code));
        assert_eq!(wizard.step(), WizardStep::Naming);
    }

    #[test]
    fn test_no_back_from_naming_or_choosing() {
        let mut wizard = opened();
        assert!(!wizard.go_back());
        wizard.set_game_name("x");
        wizard.advance_from_naming();
        assert!(!wizard.go_back());
        assert_eq!(wizard.step(), WizardStep::ChoosingOption);
    }

    #[test]
    fn test_advance_only_from_naming() {
        let mut wizard = at_details(DeliveryOption::Url);
        assert!(!wizard.advance_from_naming());
        assert_eq!(wizard.step(), WizardStep::EnteringDetails(DeliveryOption::Url));
    }

    #[test]
    fn test_reselect_overwrites_option() {
        let mut wizard = at_details(DeliveryOption::Url);
        wizard.go_back();
        wizard.select_delivery_option(DeliveryOption::Upload);
        assert_eq!(wizard.delivery_option(), Some(DeliveryOption::Upload));
    }

    #[test]
    fn test_go_back_keeps_abandoned_fields() {
        let mut wizard = at_details(DeliveryOption::Url);
        wizard.set_field(DetailField::Url, "https://example.com/game");
        wizard.go_back();
        wizard.select_delivery_option(DeliveryOption::Code);
        assert_eq!(wizard.draft().game_url, "https://example.com/game");

        wizard.go_back();
        wizard.select_delivery_option(DeliveryOption::Url);
        assert!(wizard.can_submit());
    }

    #[test]
    fn test_set_uploaded_files_replaces() {
        let mut wizard = at_details(DeliveryOption::Upload);
        wizard.set_uploaded_files(FileHandle::from_paths(["/tmp/a.html", "/tmp/b.js"]));
        wizard.set_uploaded_files(FileHandle::from_paths(["/tmp/c.css"]));
        let names: Vec<&str> = wizard
            .draft()
            .uploaded_files
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["c.css"]);
    }

    #[rstest]
    #[case(DeliveryOption::Url, DetailField::Url, "https://example.com")]
    #[case(DeliveryOption::Code, DetailField::Code(CodeField::Html), "<div/>")]
    #[case(DeliveryOption::Code, DetailField::Code(CodeField::Css), "body{}")]
    #[case(DeliveryOption::Code, DetailField::Code(CodeField::JavaScript), "go()")]
    fn test_submit_enabled_by_field(
        #[case] option: DeliveryOption,
        #[case] field: DetailField,
        #[case] value: &str,
    ) {
        let mut wizard = at_details(option);
        assert!(!wizard.can_submit());
        wizard.set_field(field, "   ");
        assert!(!wizard.can_submit());
        wizard.set_field(field, value);
        assert!(wizard.can_submit());
    }

    #[test]
    fn test_code_submission_payload() {
        let mut wizard = at_details(DeliveryOption::Code);
        wizard.set_field(DetailField::Code(CodeField::Html), "<div/>");

        let mut sink: Vec<Submission> = Vec::new();
        let outcome = wizard.submit(&mut sink).unwrap();

        let expected = Submission {
            name: "Pixel Quest".to_string(),
            content: SubmissionContent::Code(CodeBundle {
                html: "<div/>".to_string(),
                css: String::new(),
                javascript: String::new(),
            }),
        };
        assert_eq!(outcome, SubmitOutcome::Submitted(expected.clone()));
        assert_eq!(sink, vec![expected]);
        assert!(!wizard.is_visible());
    }

    #[test]
    fn test_submit_blocked_is_noop() {
        let mut wizard = at_details(DeliveryOption::Upload);
        let before = wizard.state().clone();

        let mut sink: Vec<Submission> = Vec::new();
        assert_eq!(wizard.submit(&mut sink).unwrap(), SubmitOutcome::Blocked);
        assert!(sink.is_empty());
        assert!(wizard.is_visible());
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn test_submit_sends_only_selected_option() {
        let mut wizard = at_details(DeliveryOption::Url);
        wizard.set_field(DetailField::Url, "https://example.com");
        wizard.go_back();
        wizard.select_delivery_option(DeliveryOption::Code);
        wizard.set_field(DetailField::Code(CodeField::Css), "p{}");

        let submission = wizard.submission().unwrap();
        assert!(matches!(submission.content, SubmissionContent::Code(_)));
    }

    #[test]
    fn test_sink_failure_keeps_wizard_open() {
        let mut wizard = at_details(DeliveryOption::Url);
        wizard.set_field(DetailField::Url, "https://example.com");
        let before = wizard.state().clone();

        let mut sink = RejectingSink {
            reason: "unavailable".to_string(),
        };
        assert!(wizard.submit(&mut sink).is_err());
        assert!(wizard.is_visible());
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn test_close_keeps_state_until_reopen() {
        let mut wizard = at_details(DeliveryOption::Url);
        wizard.set_field(DetailField::Url, "https://example.com");
        wizard.close();
        assert!(!wizard.is_visible());
        assert_eq!(wizard.draft().game_url, "https://example.com");

        wizard.open();
        assert_eq!(wizard.state(), &WizardState::default());
    }

    #[test]
    fn test_hidden_wizard_ignores_operations() {
        let mut wizard = Wizard::new();
        wizard.set_game_name("Pixel Quest");
        assert_eq!(wizard.game_name(), "");
        assert!(!wizard.advance_from_naming());

        let mut sink: Vec<Submission> = Vec::new();
        assert_eq!(wizard.submit(&mut sink).unwrap(), SubmitOutcome::Blocked);
    }

    fn delivery_option() -> impl Strategy<Value = DeliveryOption> {
        prop_oneof![
            Just(DeliveryOption::Url),
            Just(DeliveryOption::Code),
            Just(DeliveryOption::Upload),
        ]
    }

    proptest! {
        #[test]
        fn prop_non_blank_name_advances(name in "\\s*[a-zA-Z0-9][a-zA-Z0-9 ]*\\s*") {
            let mut wizard = opened();
            wizard.set_game_name(name);
            prop_assert!(wizard.advance_from_naming());
            prop_assert_eq!(wizard.step(), WizardStep::ChoosingOption);
        }

        #[test]
        fn prop_blank_name_blocks(name in "[ \t\n]*") {
            let mut wizard = opened();
            wizard.set_game_name(name);
            prop_assert!(!wizard.advance_from_naming());
            prop_assert_eq!(wizard.step(), WizardStep::Naming);
        }

        #[test]
        fn prop_submit_enabled_rule(
            option in delivery_option(),
            url in "[ a-z]{0,4}",
            html in "[ <>a-z]{0,4}",
            css in "[ {}a-z]{0,4}",
            js in "[ ();a-z]{0,4}",
            file_count in 0usize..3,
        ) {
            let mut wizard = at_details(option);
            wizard.set_field(DetailField::Url, url.clone());
            wizard.set_field(DetailField::Code(CodeField::Html), html.clone());
            wizard.set_field(DetailField::Code(CodeField::Css), css.clone());
            wizard.set_field(DetailField::Code(CodeField::JavaScript), js.clone());
            let files = (0..file_count).map(|i| FileHandle::from_path(format!("/tmp/f{i}.js"))).collect();
            wizard.set_uploaded_files(files);

            let expected = match option {
                DeliveryOption::Url => !url.trim().is_empty(),
                DeliveryOption::Code => [&html, &css, &js].iter().any(|s| !s.trim().is_empty()),
                DeliveryOption::Upload => file_count >= 1,
            };
            prop_assert_eq!(wizard.can_submit(), expected);
        }

        #[test]
        fn prop_reopen_resets(
            name in ".{0,8}",
            url in ".{0,8}",
            html in ".{0,8}",
            option in delivery_option(),
            go_back in any::<bool>(),
        ) {
            let mut wizard = opened();
            wizard.set_game_name(name);
            wizard.advance_from_naming();
            wizard.select_delivery_option(option);
            wizard.set_field(DetailField::Url, url);
            wizard.set_field(DetailField::Code(CodeField::Html), html);
            wizard.set_uploaded_files(FileHandle::from_paths(["/tmp/x.png"]));
            if go_back {
                wizard.go_back();
            }
            wizard.close();
            wizard.open();

            let fresh = opened();
            prop_assert_eq!(wizard.state(), fresh.state());
        }
    }
}
