//! Note list: search filtering, ordering and selection.

use crate::domain::{Note, NoteId};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

/// Message shown when the list has nothing to display.
pub const EMPTY_MESSAGE: &str = "0 notes";

/// A row of the note list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: NoteId,
    pub title: String,
    pub time_last_updated: DateTime<Utc>,
    pub highlighted: bool,
}

/// Events emitted by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Select(NoteId),
}

/// A compiled search term.
///
/// Terms are treated as regular expressions; a term that does not compile
/// is matched literally.
#[derive(Debug, Clone)]
pub enum SearchPattern {
    Regex(Regex),
    Literal(String),
}

impl SearchPattern {
    pub fn new(term: &str) -> Self {
        match Regex::new(term) {
            Ok(re) => Self::Regex(re),
            Err(_) => Self::Literal(term.to_string()),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(text),
            Self::Literal(term) => text.contains(term.as_str()),
        }
    }
}

/// State of the note list.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    search_term: String,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Returns true while a search term is set.
    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Returns the notes to display: filtered by the search term, most
    /// recently updated first.
    pub fn visible_notes<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        let mut visible: Vec<&Note> = if self.is_searching() {
            let pattern = SearchPattern::new(&self.search_term);
            notes.iter().filter(|n| pattern.is_match(n.text())).collect()
        } else {
            notes.iter().collect()
        };

        visible.sort_by_key(|n| std::cmp::Reverse(n.time_last_updated()));
        visible
    }

    /// Returns the rows to display, highlighting the selected note.
    pub fn items(&self, notes: &[Note], selected: Option<&NoteId>) -> Vec<ListItem> {
        self.visible_notes(notes)
            .into_iter()
            .map(|n| ListItem {
                id: n.id().clone(),
                title: n.title().to_string(),
                time_last_updated: n.time_last_updated(),
                highlighted: selected == Some(n.id()),
            })
            .collect()
    }

    /// Returns true if the search input accepts input.
    ///
    /// Searching is pointless with a single visible note, unless a search is
    /// already active and needs to be edited.
    pub fn is_search_enabled(&self, notes: &[Note]) -> bool {
        self.is_searching() || self.visible_notes(notes).len() > 1
    }

    /// Handles a click on a row: clears the search and emits the selection.
    pub fn select(&mut self, id: NoteId) -> ListEvent {
        self.search_term.clear();
        ListEvent::Select(id)
    }
}
