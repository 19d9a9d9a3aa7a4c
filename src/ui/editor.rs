//! Single-note editor: text buffer, dirty tracking and the delete confirmation.

use crate::domain::{Note, NoteDraft, NoteId};
use crate::infra::markdown_to_html;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hint shown in an empty editor.
pub const PLACEHOLDER: &str = "Start typing here...\n\nMarkdown supported :)";

/// Whether the editor shows the raw text or the rendered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EditorMode {
    #[default]
    Edit,
    Read,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorMode::Edit => f.write_str("EDIT"),
            EditorMode::Read => f.write_str("READ"),
        }
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EDIT" => Ok(EditorMode::Edit),
            "READ" => Ok(EditorMode::Read),
            _ => Err(format!("unknown editor mode '{}': expected EDIT or READ", s)),
        }
    }
}

/// Editor state for one note (or for a note that does not exist yet).
///
/// The buffer is independent of the note's saved text; the editor is dirty
/// whenever the two differ.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    note: Option<Note>,
    text: String,
    mode: EditorMode,
    delete_confirmation_open: bool,
}

impl EditorState {
    /// Creates an editor whose buffer starts with the note's saved text.
    pub fn new(note: Option<Note>, mode: EditorMode) -> Self {
        let text = note.as_ref().map(|n| n.text().to_string()).unwrap_or_default();
        Self {
            note,
            text,
            mode,
            delete_confirmation_open: false,
        }
    }

    /// Returns the note being edited, if it has been saved before.
    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// Returns the current buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// Replaces the buffer.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces the saved note while keeping the buffer.
    ///
    /// After a successful save the refreshed note carries the buffer's text,
    /// which makes the editor clean again.
    pub fn refresh_note(&mut self, note: Option<Note>) {
        self.note = note;
    }

    /// Returns true if the buffer differs from the saved text.
    pub fn has_text_changed(&self) -> bool {
        let saved = self.note.as_ref().map(Note::text).unwrap_or("");
        saved != self.text
    }

    pub fn is_text_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if the save action is available.
    pub fn can_save(&self) -> bool {
        !self.is_text_empty() && self.has_text_changed()
    }

    /// Produces the draft to save, or `None` while saving is disabled.
    pub fn save(&self) -> Option<NoteDraft> {
        if !self.can_save() {
            return None;
        }
        Some(NoteDraft {
            id: self.note.as_ref().map(|n| n.id().clone()),
            text: self.text.clone(),
        })
    }

    /// Returns true if the note exists and can therefore be deleted.
    pub fn can_delete(&self) -> bool {
        self.note.is_some()
    }

    pub fn is_delete_confirmation_open(&self) -> bool {
        self.delete_confirmation_open
    }

    /// Opens the delete confirmation. Ignored for unsaved notes.
    pub fn request_delete(&mut self) {
        if self.can_delete() {
            self.delete_confirmation_open = true;
        }
    }

    /// Closes the delete confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        self.delete_confirmation_open = false;
    }

    /// Confirms deletion, returning the id to delete.
    ///
    /// Returns `None` unless the confirmation was open.
    pub fn confirm_delete(&mut self) -> Option<NoteId> {
        if !self.delete_confirmation_open {
            return None;
        }
        self.delete_confirmation_open = false;
        self.note.as_ref().map(|n| n.id().clone())
    }

    /// Returns "Last saved at ..." for notes that have been saved.
    pub fn last_saved_label(&self) -> Option<String> {
        self.note.as_ref().map(|n| {
            let local = n.time_last_updated().with_timezone(&Local);
            format!("Last saved at {}", local.format("%Y-%m-%d %H:%M:%S"))
        })
    }

    /// Renders the buffer as HTML.
    pub fn preview(&self) -> String {
        markdown_to_html(&self.text)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(None, EditorMode::Edit)
    }
}
