//! Note records and the drafts the editor produces.

use crate::domain::{NoteId, extract_title};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A saved Markdown note.
///
/// Notes are immutable snapshots: saving produces a new `Note` that replaces
/// the previous one under the same id.
///
/// # Serialized Form
///
/// ```json
/// { "id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y", "text": "# Title\n...", "timeLastUpdated": "2024-01-15T10:30:00.000Z" }
/// ```
///
/// # Examples
///
/// ```
/// use notesmd::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let note = Note::new(NoteId::new(), "# API Design\nnotes", Utc::now());
/// assert_eq!(note.title(), "API Design");
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    id: NoteId,
    text: String,
    #[serde(with = "iso_timestamp")]
    time_last_updated: DateTime<Utc>,
}

impl Note {
    /// Creates a note snapshot.
    pub fn new(id: NoteId, text: impl Into<String>, time_last_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            time_last_updated,
        }
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's Markdown text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the note was last saved.
    pub fn time_last_updated(&self) -> DateTime<Utc> {
        self.time_last_updated
    }

    /// Returns the title derived from the first Markdown heading line.
    pub fn title(&self) -> &str {
        extract_title(&self.text)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title(), self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("time_last_updated", &self.time_last_updated)
            .finish()
    }
}

/// The unsaved form of a note, as emitted by the editor.
///
/// `id` is only present when the draft edits an existing note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    pub text: String,
}

impl NoteDraft {
    /// A draft for a note that has never been saved.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// A draft replacing the text of an existing note.
    pub fn existing(id: NoteId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
        }
    }
}

/// Serializes timestamps as JavaScript's `toISOString` does (UTC,
/// millisecond precision, `Z` suffix) and reads back any RFC 3339 value.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
