//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::Note;
use crate::index::NotesIndex;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Formats the candidates of an ambiguous identifier.
pub(crate) fn describe_ambiguous_notes(identifier: &str, notes: &[Note]) -> String {
    let mut out = format!("Ambiguous: '{}' matches {} notes:\n", identifier, notes.len());
    for note in notes {
        out.push_str(&format!("  {} - {}\n", note.id(), note.title()));
    }
    out.push_str("Use a longer ID prefix to specify which note you mean.");
    out
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match (if input is 4+ alphanumeric characters)
/// 3. Exact title match
///
/// Returns `Unique` if exactly one note matches across all methods,
/// `Ambiguous` if multiple notes match, or `NotFound` if no match.
pub fn resolve_note(index: &NotesIndex, identifier: &str) -> ResolveResult {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return ResolveResult::NotFound;
    }

    // 1. Exact ID
    if let Some(note) = index.iter().find(|n| n.id().as_str() == identifier) {
        return ResolveResult::Unique(note.clone());
    }

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());

    let mut candidates: Vec<Note> = Vec::new();

    // 2. ID prefix; a single match is the most precise answer
    if looks_like_id {
        let id_matches: Vec<Note> = index
            .iter()
            .filter(|n| n.id().starts_with_ignore_case(identifier))
            .cloned()
            .collect();

        if let [only] = id_matches.as_slice() {
            return ResolveResult::Unique(only.clone());
        }

        candidates.extend(id_matches);
    }

    // 3. Exact title
    candidates.extend(index.iter().filter(|n| n.title() == identifier).cloned());

    candidates.sort_by(|a, b| a.id().cmp(b.id()));
    candidates.dedup_by(|a, b| a.id() == b.id());

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates.remove(0)),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves an identifier that must name exactly one note.
pub(crate) fn require_note(index: &NotesIndex, identifier: &str) -> Result<Note> {
    match resolve_note(index, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            bail!("{}", describe_ambiguous_notes(identifier, &notes))
        }
        ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
    }
}
