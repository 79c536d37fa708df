use std::path::{Path, PathBuf};

pub const APP_TITLE: &str = "Diagram";
const UNTITLED: &str = "Untitled";

/// File association and dirty flag of the open diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    current_file: Option<PathBuf>,
    modified: bool,
}

impl DocumentState {
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Associates the document with `path` (or none) and marks it clean.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
        self.modified = false;
    }

    /// Returns `true` when the flag actually changed.
    pub fn set_modified(&mut self, modified: bool) -> bool {
        let changed = self.modified != modified;
        self.modified = modified;
        changed
    }

    /// Discarding this document would lose edits.
    pub fn needs_save_prompt(&self) -> bool {
        self.modified
    }

    pub fn display_name(&self) -> String {
        self.current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// `Diagram - <name>`, with a trailing `*` while there are unsaved edits.
    pub fn window_title(&self) -> String {
        let marker = if self.modified { "*" } else { "" };
        format!("{} - {}{}", APP_TITLE, self.display_name(), marker)
    }
}
