//! File picker
//!
//! Directory browser for the upload step. Files are marked with Space and
//! the marked files become the wizard's uploaded files on confirm.

use std::path::{Path, PathBuf};

/// Rows shown at once before scrolling
pub const VISIBLE_ITEMS: usize = 12;

/// Result of a key press inside the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    None,
    /// Chosen files, in the order they were marked
    Confirm(Vec<PathBuf>),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    pub current_dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub selected: usize,
    pub scroll_offset: usize,
    /// Marked files across every visited directory, in mark order
    pub marked: Vec<PathBuf>,
    pub show_hidden: bool,
}

impl FilePicker {
    pub fn new(start_dir: PathBuf, show_hidden: bool) -> Self {
        // `..` navigation walks `parent()`, which dead-ends on relative paths
        let current_dir = std::path::absolute(&start_dir).unwrap_or(start_dir);
        let mut picker = Self {
            current_dir,
            entries: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            marked: Vec::new(),
            show_hidden,
        };
        picker.refresh();
        picker
    }

    /// Re-read the current directory
    pub fn refresh(&mut self) {
        let mut entries = Vec::new();

        if self.current_dir.parent().is_some() {
            entries.push(self.current_dir.join(".."));
        }

        match std::fs::read_dir(&self.current_dir) {
            Ok(read) => {
                for entry in read.flatten() {
                    let path = entry.path();
                    if !self.show_hidden && is_hidden(&path) {
                        continue;
                    }
                    entries.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("Cannot read directory {:?}: {}", self.current_dir, e);
            }
        }

        // Directories first, then files, alphabetically
        entries.sort_by(|a, b| {
            let a_up = a.ends_with("..");
            let b_up = b.ends_with("..");
            match (a_up, b_up, a.is_dir(), b.is_dir()) {
                (true, _, _, _) => std::cmp::Ordering::Less,
                (_, true, _, _) => std::cmp::Ordering::Greater,
                (_, _, true, false) => std::cmp::Ordering::Less,
                (_, _, false, true) => std::cmp::Ordering::Greater,
                _ => a.file_name().cmp(&b.file_name()),
            }
        });

        self.entries = entries;
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn selected_path(&self) -> Option<&PathBuf> {
        self.entries.get(self.selected)
    }

    pub fn is_marked(&self, path: &Path) -> bool {
        self.marked.iter().any(|marked| marked == path)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
            if self.selected >= self.scroll_offset + VISIBLE_ITEMS {
                self.scroll_offset = self.selected + 1 - VISIBLE_ITEMS;
            }
        }
    }

    /// Mark or unmark the highlighted file. Directories cannot be marked.
    pub fn toggle_mark(&mut self) {
        let Some(path) = self.selected_path().cloned() else {
            return;
        };
        if path.is_dir() {
            return;
        }
        match self.marked.iter().position(|marked| *marked == path) {
            Some(index) => {
                self.marked.remove(index);
            }
            None => self.marked.push(path),
        }
    }

    /// Enter: descend into a directory, or confirm the selection.
    ///
    /// With nothing marked, Enter on a file confirms that single file.
    pub fn activate(&mut self) -> PickerAction {
        let Some(path) = self.selected_path().cloned() else {
            return PickerAction::None;
        };

        if path.ends_with("..") {
            if let Some(parent) = self.current_dir.parent() {
                self.current_dir = parent.to_path_buf();
                self.refresh();
            }
            return PickerAction::None;
        }

        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
            return PickerAction::None;
        }

        if self.marked.is_empty() {
            PickerAction::Confirm(vec![path])
        } else {
            PickerAction::Confirm(self.marked.clone())
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
