//! Isolated test environment with temp directory.

use super::{NotesCommand, TestNote};
use notesmd::domain::{Note, NoteDraft};
use notesmd::index::NoteRepository;
use notesmd::infra::FileStore;
use std::path::Path;
use tempfile::TempDir;

/// Isolated test environment with a temporary storage directory.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
    temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Returns the storage directory.
    pub fn storage_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Opens the repository backing this environment.
    pub fn repository(&self) -> NoteRepository<FileStore> {
        let store = FileStore::open(self.storage_dir()).expect("Failed to open store");
        NoteRepository::open(store)
    }

    /// Saves a test note directly through the repository.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        let note = test_note.to_note();
        self.repository()
            .save_at(
                NoteDraft::existing(note.id().clone(), note.text()),
                note.time_last_updated(),
            )
            .expect("Failed to save test note")
    }

    /// Returns all stored notes.
    pub fn notes(&self) -> Vec<Note> {
        self.repository().notes()
    }

    /// Creates a command configured for this environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new().dir(self.storage_dir())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.storage_dir().is_dir());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.storage_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.storage_dir().to_string_lossy());
    }

    #[test]
    fn test_env_add_note_persists() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("Stored").body("text\n"));

        let notes = env.notes();
        assert_eq!(notes, vec![note]);
        assert!(env.storage_dir().join("notesIndex.json").is_file());
    }
}
