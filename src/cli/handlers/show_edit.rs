//! Show and Edit command handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::open_repository;
use super::resolve::require_note;
use crate::cli::config::Config;
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::Note;
use crate::ui::{EditorMode, EditorState};

pub fn handle_show(args: &ShowArgs, storage_dir: &Path) -> Result<()> {
    let repository = open_repository(storage_dir)?;
    let note = require_note(repository.index(), &args.note)?;
    let editor = EditorState::new(Some(note), EditorMode::Read);

    if args.html {
        print!("{}", editor.preview());
        return Ok(());
    }

    if let Some(note) = editor.note() {
        println!("ID: {}", note.id());
    }
    if let Some(label) = editor.last_saved_label() {
        println!("{}", label);
    }
    println!();
    println!("{}", editor.text());

    Ok(())
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Launches the editor configured for the user.
pub(crate) struct RealEditor<'a>(pub(crate) &'a Config);

impl EditorLauncher for RealEditor<'_> {
    fn open(&self, path: &Path) -> Result<()> {
        open_in_editor(path, self.0)
    }
}

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Lets the user edit `initial` in a temporary Markdown file and returns
/// the result.
pub(crate) fn edit_in_editor<E: EditorLauncher>(initial: &str, editor: &E) -> Result<String> {
    let temp = tempfile::Builder::new()
        .prefix("note-")
        .suffix(".md")
        .tempfile()
        .with_context(|| "failed to create temporary file")?;

    std::fs::write(temp.path(), initial)
        .with_context(|| format!("failed to write {}", temp.path().display()))?;

    editor.open(temp.path())?;

    std::fs::read_to_string(temp.path())
        .with_context(|| format!("failed to read {}", temp.path().display()))
}

/// Outcome of an edit session.
#[derive(Debug, PartialEq)]
pub(crate) enum EditOutcome {
    Saved(Note),
    Unchanged,
    Emptied,
}

/// Internal implementation that accepts a generic editor launcher.
pub(crate) fn handle_edit_impl<E: EditorLauncher>(
    args: &EditArgs,
    storage_dir: &Path,
    editor: &E,
) -> Result<EditOutcome> {
    let mut repository = open_repository(storage_dir)?;
    let note = require_note(repository.index(), &args.note)?;

    let mut state = EditorState::new(Some(note), EditorMode::Edit);
    let edited = edit_in_editor(state.text(), editor)?;
    state.set_text(edited);

    if state.is_text_empty() {
        return Ok(EditOutcome::Emptied);
    }

    match state.save() {
        Some(draft) => {
            let saved = repository.save(draft).with_context(|| "failed to save note")?;
            Ok(EditOutcome::Saved(saved))
        }
        None => Ok(EditOutcome::Unchanged),
    }
}

pub fn handle_edit(args: &EditArgs, storage_dir: &Path, config: &Config) -> Result<()> {
    match handle_edit_impl(args, storage_dir, &RealEditor(config))? {
        EditOutcome::Saved(note) => println!("Saved: {}", note),
        EditOutcome::Unchanged => println!("No changes."),
        EditOutcome::Emptied => eprintln!("Note text is empty, nothing saved."),
    }
    Ok(())
}
