//! Note identifier with ULID generation, prefix extraction and serde support.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use ulid::Ulid;

/// A unique identifier for a note.
///
/// Identifiers generated by this crate are ULIDs: 26-character Crockford
/// Base32 strings that sort lexicographically in creation order. Stored notes
/// may carry any non-blank identifier, so parsing only rejects blank input.
///
/// # Examples
///
/// ```
/// use notesmd::domain::NoteId;
///
/// let id = NoteId::new();
/// assert_eq!(id.as_str().len(), 26);
///
/// let custom: NoteId = "123".parse().unwrap();
/// assert_eq!(custom.as_str(), "123");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a new ULID-based NoteId with the current timestamp.
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Generates a NoteId from a specific datetime (useful for testing).
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let system_time: SystemTime = datetime.into();
        Self(Ulid::from_datetime(system_time).to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first 10 characters of the identifier.
    ///
    /// For ULIDs this is the full 48-bit millisecond timestamp. Shorter
    /// identifiers are returned whole.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(10) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Returns true if this identifier starts with the given prefix,
    /// ignoring ASCII case.
    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        self.0.len() >= prefix.len()
            && self
                .0
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid note identifier.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': id cannot be blank", self.value)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseNoteIdError {
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
