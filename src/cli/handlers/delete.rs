//! Delete command handler.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use super::open_repository;
use super::resolve::require_note;
use crate::cli::DeleteArgs;
use crate::domain::NoteId;
use crate::ui::{EditorMode, EditorState};

pub fn handle_delete(args: &DeleteArgs, storage_dir: &Path) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    match handle_delete_impl(args, storage_dir, stdin.lock(), &mut stdout)? {
        Some(id) => println!("Deleted: {}", id),
        None => println!("Cancelled."),
    }
    Ok(())
}

/// Internal implementation reading the confirmation from `input`.
///
/// Returns the deleted id, or `None` if the user declined.
pub(crate) fn handle_delete_impl<R: BufRead, W: Write>(
    args: &DeleteArgs,
    storage_dir: &Path,
    mut input: R,
    output: &mut W,
) -> Result<Option<NoteId>> {
    let mut repository = open_repository(storage_dir)?;
    let note = require_note(repository.index(), &args.note)?;
    let title = note.to_string();

    let mut editor = EditorState::new(Some(note), EditorMode::Read);
    editor.request_delete();

    if !args.yes {
        write!(
            output,
            "Delete {}? If you proceed, this note will be permanently deleted. [y/N] ",
            title
        )?;
        output.flush()?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .with_context(|| "failed to read confirmation")?;

        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            editor.cancel_delete();
        }
    }

    let Some(id) = editor.confirm_delete() else {
        return Ok(None);
    };

    repository
        .delete(&id)
        .with_context(|| format!("failed to delete note {}", id))?;
    Ok(Some(id))
}
