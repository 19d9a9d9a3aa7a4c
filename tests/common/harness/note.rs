//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use notesmd::domain::{Note, NoteId};

/// Builder for creating test notes.
///
/// Generates an ID and uses the current time unless told otherwise.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    text: String,
    time_last_updated: DateTime<Utc>,
}

impl TestNote {
    /// Creates a note whose text starts with a `# title` heading.
    pub fn new(title: &str) -> Self {
        Self::with_text(format!("# {}\n", title))
    }

    /// Creates a note with raw Markdown text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            text: text.into(),
            time_last_updated: Utc::now(),
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: &str) -> Self {
        self.id = id.parse().expect("Invalid NoteId");
        self
    }

    /// Appends body lines after the heading.
    pub fn body(mut self, body: &str) -> Self {
        self.text.push_str(body);
        self
    }

    /// Backdates the note by the given number of minutes.
    pub fn minutes_ago(mut self, minutes: i64) -> Self {
        self.time_last_updated = Utc::now() - Duration::minutes(minutes);
        self
    }

    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the 10-character ID prefix.
    pub fn id_prefix(&self) -> String {
        self.id.prefix().to_string()
    }

    pub fn to_note(&self) -> Note {
        Note::new(self.id.clone(), self.text.clone(), self.time_last_updated)
    }
}
