//! Note repository: the notes index persisted through a key-value store.

use crate::domain::{Note, NoteDraft, NoteId};
use crate::index::NotesIndex;
use crate::infra::{KeyValueStore, StoreError};
use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{debug, warn};

/// Store key holding the serialized notes index.
pub const NOTES_INDEX_KEY: &str = "notesIndex";

/// Errors that can occur while persisting the notes index.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store rejected the write.
    #[error("failed to persist notes index: {0}")]
    Store(#[from] StoreError),

    /// The index could not be serialized.
    #[error("failed to serialize notes index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Reads the notes index from a store.
///
/// Missing, unreadable or malformed data yields an empty index.
pub fn load_notes_index<S: KeyValueStore>(store: &S) -> NotesIndex {
    match store.get(NOTES_INDEX_KEY) {
        Ok(Some(json)) if !json.trim().is_empty() => NotesIndex::from_json(&json),
        Ok(_) => NotesIndex::new(),
        Err(e) => {
            warn!(error = %e, "failed to read notes index, starting empty");
            NotesIndex::new()
        }
    }
}

/// Owns the notes index and writes it back to the store on every change.
///
/// # Examples
///
/// ```
/// use notesmd::domain::NoteDraft;
/// use notesmd::index::NoteRepository;
/// use notesmd::infra::MemoryStore;
///
/// let mut repo = NoteRepository::open(MemoryStore::new());
/// let note = repo.save(NoteDraft::new("# Hello\nworld")).unwrap();
/// assert_eq!(repo.load().get(note.id()), Some(&note));
/// ```
#[derive(Debug)]
pub struct NoteRepository<S> {
    store: S,
    index: NotesIndex,
}

impl<S: KeyValueStore> NoteRepository<S> {
    /// Opens a repository, loading the current index from `store`.
    pub fn open(store: S) -> Self {
        let index = load_notes_index(&store);
        debug!(count = index.len(), "loaded notes index");
        Self { store, index }
    }

    /// Re-reads the index from the store.
    pub fn load(&self) -> NotesIndex {
        load_notes_index(&self.store)
    }

    /// Returns the in-memory index.
    pub fn index(&self) -> &NotesIndex {
        &self.index
    }

    /// Returns a snapshot of all notes.
    pub fn notes(&self) -> Vec<Note> {
        self.index.to_vec()
    }

    /// Returns the note with the given id.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.index.get(id)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the repository, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Saves a draft, stamping it with the current time.
    pub fn save(&mut self, draft: NoteDraft) -> RepositoryResult<Note> {
        self.save_at(draft, Utc::now())
    }

    /// Saves a draft with an explicit timestamp.
    ///
    /// Drafts without an id get a freshly generated one. The timestamp is
    /// truncated to milliseconds, the precision it is persisted with.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be written. The in-memory index
    /// is left untouched in that case.
    pub fn save_at(&mut self, draft: NoteDraft, now: DateTime<Utc>) -> RepositoryResult<Note> {
        let id = draft.id.unwrap_or_default();
        let note = Note::new(id, draft.text, now.trunc_subsecs(3));

        let mut index = self.index.clone();
        let replaced = index.insert(note.clone());
        self.persist(index)?;

        debug!(id = %note.id(), updated = replaced.is_some(), "saved note");
        Ok(note)
    }

    /// Deletes the note with the given id.
    ///
    /// Returns `Ok(false)` without writing anything if no such note exists.
    pub fn delete(&mut self, id: &NoteId) -> RepositoryResult<bool> {
        if !self.index.contains(id) {
            debug!(id = %id, "delete ignored, note not found");
            return Ok(false);
        }

        let mut index = self.index.clone();
        index.remove(id);
        self.persist(index)?;

        debug!(id = %id, "deleted note");
        Ok(true)
    }

    fn persist(&mut self, index: NotesIndex) -> RepositoryResult<()> {
        let json = index.to_json()?;
        self.store.set(NOTES_INDEX_KEY, &json)?;
        self.index = index;
        Ok(())
    }
}
