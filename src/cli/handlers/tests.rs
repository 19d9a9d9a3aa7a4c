use super::*;
use crate::cli::{DeleteArgs, EditArgs, NewArgs};
use crate::domain::{NoteDraft, NoteId};
use crate::index::{NOTES_INDEX_KEY, NoteRepository};
use crate::infra::KeyValueStore;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Test helpers
fn test_note_id(suffix: &str) -> NoteId {
    format!("01HQ3K5M7NXJK4QZPW8V2R6T{}", suffix)
        .parse()
        .unwrap()
}

fn test_datetime() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn seed(dir: &Path, notes: &[(&str, &str)]) {
    let mut repository = open_repository(dir).unwrap();
    for (suffix, text) in notes {
        repository
            .save_at(
                NoteDraft::existing(test_note_id(suffix), *text),
                test_datetime(),
            )
            .unwrap();
    }
}

fn setup_notes_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    seed(
        dir.path(),
        &[
            ("9A", "# API Design\nBody content.\n"),
            ("9B", "# Groceries\nmilk\n"),
        ],
    );
    dir
}

fn setup_notes_dir_with_ambiguous() -> TempDir {
    let dir = TempDir::new().unwrap();
    seed(
        dir.path(),
        &[("9A", "# API Design\nNote 1\n"), ("9B", "# API Design\nNote 2\n")],
    );
    dir
}

fn stored_text(dir: &Path, suffix: &str) -> Option<String> {
    let repository = open_repository(dir).unwrap();
    repository
        .get(&test_note_id(suffix))
        .map(|n| n.text().to_string())
}

// ===========================================
// resolve_note tests
// ===========================================

mod resolve_note_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::domain::Note;
    use crate::index::NotesIndex;

    fn index() -> NotesIndex {
        [
            Note::new(test_note_id("9A"), "# API Design\n", test_datetime()),
            Note::new(test_note_id("9B"), "# Groceries\n", test_datetime()),
            Note::new("XYZW0001".parse().unwrap(), "# Other\n", test_datetime()),
        ]
        .into_iter()
        .collect()
    }

    fn unique_id(result: ResolveResult) -> NoteId {
        match result {
            ResolveResult::Unique(note) => note.id().clone(),
            other => panic!("expected unique match, got {:?}", other),
        }
    }

    #[test]
    fn exact_id() {
        let id = unique_id(resolve_note(&index(), "01HQ3K5M7NXJK4QZPW8V2R6T9B"));
        assert_eq!(id, test_note_id("9B"));
    }

    #[test]
    fn unique_prefix() {
        let id = unique_id(resolve_note(&index(), "xyzw"));
        assert_eq!(id.as_str(), "XYZW0001");
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        match resolve_note(&index(), "01HQ3K5M") {
            ResolveResult::Ambiguous(notes) => assert_eq!(notes.len(), 2),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn short_prefix_is_not_an_id() {
        assert!(matches!(
            resolve_note(&index(), "01H"),
            ResolveResult::NotFound
        ));
    }

    #[test]
    fn exact_title() {
        let id = unique_id(resolve_note(&index(), "Groceries"));
        assert_eq!(id, test_note_id("9B"));
    }

    #[test]
    fn title_is_case_sensitive() {
        assert!(matches!(
            resolve_note(&index(), "groceries"),
            ResolveResult::NotFound
        ));
    }

    #[test]
    fn blank_identifier_not_found() {
        assert!(matches!(resolve_note(&index(), "  "), ResolveResult::NotFound));
    }

    #[test]
    fn ambiguity_message_lists_candidates() {
        let notes = index().to_vec();
        let message = resolve::describe_ambiguous_notes("x", &notes[..2]);
        assert!(message.contains("matches 2 notes"));
        assert!(message.contains("API Design"));
        assert!(message.contains("Groceries"));
    }
}

// ===========================================
// handle_new tests
// ===========================================

mod handle_new_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct NoEditor;

    impl EditorLauncher for NoEditor {
        fn open(&self, _path: &Path) -> Result<()> {
            bail!("editor should not be launched")
        }
    }

    struct WritingEditor(&'static str);

    impl EditorLauncher for WritingEditor {
        fn open(&self, path: &Path) -> Result<()> {
            std::fs::write(path, self.0)?;
            Ok(())
        }
    }

    fn args(text: Option<&str>, stdin: bool, edit: bool) -> NewArgs {
        NewArgs {
            text: text.map(str::to_string),
            stdin,
            edit,
        }
    }

    #[test]
    fn creates_note_from_argument() {
        let dir = TempDir::new().unwrap();
        let note = handle_new_impl(
            &args(Some("# Hello\nworld"), false, false),
            dir.path(),
            &NoEditor,
            std::io::empty(),
        )
        .unwrap();

        assert_eq!(note.title(), "Hello");
        let repository = open_repository(dir.path()).unwrap();
        assert_eq!(repository.get(note.id()), Some(&note));
    }

    #[test]
    fn creates_note_from_stdin() {
        let dir = TempDir::new().unwrap();
        let note = handle_new_impl(
            &args(None, true, false),
            dir.path(),
            &NoEditor,
            Cursor::new("# Piped\n"),
        )
        .unwrap();

        assert_eq!(note.text(), "# Piped\n");
    }

    #[test]
    fn creates_note_from_editor() {
        let dir = TempDir::new().unwrap();
        let note = handle_new_impl(
            &args(None, false, true),
            dir.path(),
            &WritingEditor("# Drafted\n"),
            std::io::empty(),
        )
        .unwrap();

        assert_eq!(note.title(), "Drafted");
    }

    #[test]
    fn empty_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = handle_new_impl(
            &args(Some(""), false, false),
            dir.path(),
            &NoEditor,
            std::io::empty(),
        );

        assert!(result.unwrap_err().to_string().contains("empty"));
        let repository = open_repository(dir.path()).unwrap();
        assert!(repository.notes().is_empty());
    }

    #[test]
    fn missing_source_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = handle_new_impl(
            &args(None, false, false),
            dir.path(),
            &NoEditor,
            std::io::empty(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_notes_get_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let first = handle_new_impl(
            &args(Some("one"), false, false),
            dir.path(),
            &NoEditor,
            std::io::empty(),
        )
        .unwrap();
        let second = handle_new_impl(
            &args(Some("two"), false, false),
            dir.path(),
            &NoEditor,
            std::io::empty(),
        )
        .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(open_repository(dir.path()).unwrap().notes().len(), 2);
    }
}

// ===========================================
// handle_edit tests
// ===========================================

mod handle_edit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Mock editor for testing.
    struct MockEditor {
        opened: RefCell<Option<PathBuf>>,
        replacement: Option<&'static str>,
        should_fail: bool,
    }

    impl MockEditor {
        fn new() -> Self {
            Self {
                opened: RefCell::new(None),
                replacement: None,
                should_fail: false,
            }
        }

        fn writing(text: &'static str) -> Self {
            Self {
                replacement: Some(text),
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new()
            }
        }

        fn opened_path(&self) -> Option<PathBuf> {
            self.opened.borrow().clone()
        }
    }

    impl EditorLauncher for MockEditor {
        fn open(&self, path: &Path) -> Result<()> {
            *self.opened.borrow_mut() = Some(path.to_path_buf());
            if self.should_fail {
                bail!("editor failed to open");
            }
            if let Some(text) = self.replacement {
                std::fs::write(path, text)?;
            }
            Ok(())
        }
    }

    fn edit_args(note: &str) -> EditArgs {
        EditArgs {
            note: note.to_string(),
        }
    }

    #[test]
    fn not_found_returns_error() {
        let dir = setup_notes_dir();
        let result = handle_edit_impl(&edit_args("nonexistent"), dir.path(), &MockEditor::new());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn ambiguous_returns_error() {
        let dir = setup_notes_dir_with_ambiguous();
        let result = handle_edit_impl(&edit_args("API Design"), dir.path(), &MockEditor::new());
        assert!(result.unwrap_err().to_string().contains("Ambiguous"));
    }

    #[test]
    fn opens_markdown_temp_file() {
        let dir = setup_notes_dir();
        let editor = MockEditor::new();
        handle_edit_impl(&edit_args("Groceries"), dir.path(), &editor).unwrap();

        let opened = editor.opened_path().unwrap();
        assert_eq!(opened.extension().and_then(|e| e.to_str()), Some("md"));
    }

    #[test]
    fn unchanged_text_is_not_saved() {
        let dir = setup_notes_dir();
        let outcome =
            handle_edit_impl(&edit_args("Groceries"), dir.path(), &MockEditor::new()).unwrap();
        assert_eq!(outcome, EditOutcome::Unchanged);

        let repository = open_repository(dir.path()).unwrap();
        let note = repository.get(&test_note_id("9B")).unwrap();
        assert_eq!(note.time_last_updated(), test_datetime());
    }

    #[test]
    fn changed_text_is_saved_under_same_id() {
        let dir = setup_notes_dir();
        let editor = MockEditor::writing("# Groceries\nmilk\neggs\n");
        let args = edit_args("01HQ3K5M7NXJK4QZPW8V2R6T9B");
        let outcome = handle_edit_impl(&args, dir.path(), &editor).unwrap();

        let EditOutcome::Saved(note) = outcome else {
            panic!("expected the note to be saved");
        };
        assert_eq!(note.id(), &test_note_id("9B"));
        assert!(note.time_last_updated() > test_datetime());
        assert_eq!(
            stored_text(dir.path(), "9B").as_deref(),
            Some("# Groceries\nmilk\neggs\n")
        );
    }

    #[test]
    fn emptied_text_is_not_saved() {
        let dir = setup_notes_dir();
        let outcome =
            handle_edit_impl(&edit_args("Groceries"), dir.path(), &MockEditor::writing(""))
                .unwrap();

        assert_eq!(outcome, EditOutcome::Emptied);
        assert_eq!(
            stored_text(dir.path(), "9B").as_deref(),
            Some("# Groceries\nmilk\n")
        );
    }

    #[test]
    fn editor_failure_returns_error() {
        let dir = setup_notes_dir();
        let result = handle_edit_impl(&edit_args("Groceries"), dir.path(), &MockEditor::failing());
        assert!(result.is_err());
        assert_eq!(
            stored_text(dir.path(), "9B").as_deref(),
            Some("# Groceries\nmilk\n")
        );
    }
}

// ===========================================
// handle_delete tests
// ===========================================

mod handle_delete_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn delete_args(note: &str, yes: bool) -> DeleteArgs {
        DeleteArgs {
            note: note.to_string(),
            yes,
        }
    }

    fn run(args: &DeleteArgs, dir: &Path, answer: &str) -> (Result<Option<NoteId>>, String) {
        let mut output = Vec::new();
        let result = handle_delete_impl(args, dir, Cursor::new(answer.to_string()), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn confirmed_delete_removes_note() {
        let dir = setup_notes_dir();
        let (result, prompt) = run(&delete_args("Groceries", false), dir.path(), "y\n");

        assert_eq!(result.unwrap(), Some(test_note_id("9B")));
        assert!(prompt.contains("permanently deleted"));
        assert_eq!(stored_text(dir.path(), "9B"), None);
        assert!(stored_text(dir.path(), "9A").is_some());
    }

    #[test]
    fn declined_delete_keeps_note() {
        let dir = setup_notes_dir();
        let (result, _) = run(&delete_args("Groceries", false), dir.path(), "n\n");

        assert_eq!(result.unwrap(), None);
        assert!(stored_text(dir.path(), "9B").is_some());
    }

    #[test]
    fn empty_answer_declines() {
        let dir = setup_notes_dir();
        let (result, _) = run(&delete_args("Groceries", false), dir.path(), "");
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn yes_flag_skips_prompt() {
        let dir = setup_notes_dir();
        let (result, prompt) = run(&delete_args("API Design", true), dir.path(), "");

        assert_eq!(result.unwrap(), Some(test_note_id("9A")));
        assert!(prompt.is_empty());
    }

    #[test]
    fn missing_note_returns_error() {
        let dir = setup_notes_dir();
        let (result, _) = run(&delete_args("nope", true), dir.path(), "");
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn deleted_note_leaves_index_key_in_store() {
        let dir = setup_notes_dir();
        run(&delete_args("API Design", true), dir.path(), "").0.unwrap();
        run(&delete_args("Groceries", true), dir.path(), "").0.unwrap();

        let repository: NoteRepository<_> = open_repository(dir.path()).unwrap();
        assert!(repository.notes().is_empty());
        assert_eq!(
            repository.store().get(NOTES_INDEX_KEY).unwrap().as_deref(),
            Some("{}")
        );
    }
}
