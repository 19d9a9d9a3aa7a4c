//! Notes index and its persistence through a key-value store

mod notes_index;
mod repository;

pub use notes_index::NotesIndex;
pub use repository::{
    NOTES_INDEX_KEY, NoteRepository, RepositoryError, RepositoryResult, load_notes_index,
};
