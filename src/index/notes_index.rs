//! The in-memory notes index and its JSON form.

use crate::domain::{Note, NoteId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// All notes, keyed by id.
///
/// The index is persisted as a single JSON object mapping each id to its
/// note. Keys always equal the `id` of the note they hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotesIndex {
    notes: BTreeMap<NoteId, Note>,
}

impl NotesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted index.
    ///
    /// Never fails: anything that is not a JSON object yields an empty
    /// index, entries that are not valid notes are skipped, and entries
    /// stored under a key other than their own id are re-keyed.
    pub fn from_json(json: &str) -> Self {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "notes index is not valid JSON, starting empty");
                return Self::new();
            }
        };

        let Value::Object(entries) = value else {
            warn!("notes index is not a JSON object, starting empty");
            return Self::new();
        };

        let mut index = Self::new();
        for (key, entry) in entries {
            match serde_json::from_value::<Note>(entry) {
                Ok(note) => {
                    if note.id().as_str() != key {
                        warn!(
                            key = %key,
                            id = %note.id(),
                            "re-keying note stored under a foreign key"
                        );
                    }
                    index.insert(note);
                }
                Err(e) => warn!(key = %key, error = %e, "skipping malformed note"),
            }
        }
        index
    }

    /// Serializes the index as a JSON object of id to note.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if there are no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the note with the given id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Returns true if a note with the given id exists.
    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    /// Iterates over notes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Returns a snapshot of all notes in id order.
    pub fn to_vec(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }

    /// Inserts a note under its own id, returning the note it replaced.
    pub fn insert(&mut self, note: Note) -> Option<Note> {
        self.notes.insert(note.id().clone(), note)
    }

    /// Removes the note with the given id, if present.
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        self.notes.remove(id)
    }
}

impl Serialize for NotesIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.notes.len()))?;
        for (id, note) in &self.notes {
            map.serialize_entry(id, note)?;
        }
        map.end()
    }
}

impl FromIterator<Note> for NotesIndex {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        let mut index = Self::new();
        for note in iter {
            index.insert(note);
        }
        index
    }
}
