//! Core types: Note, NoteDraft, NoteId (ULID)

mod note;
mod note_id;
mod title;

pub use note::{Note, NoteDraft};
pub use note_id::{NoteId, ParseNoteIdError};
pub use title::{UNTITLED, extract_title};
