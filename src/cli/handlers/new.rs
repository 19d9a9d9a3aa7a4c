//! New note command handler.

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::Path;

use super::open_repository;
use super::show_edit::{EditorLauncher, RealEditor, edit_in_editor};
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::domain::Note;
use crate::ui::{EditorMode, EditorState};

pub fn handle_new(args: &NewArgs, storage_dir: &Path, config: &Config) -> Result<()> {
    let note = handle_new_impl(args, storage_dir, &RealEditor(config), std::io::stdin())?;
    println!("Created: {}", note);
    Ok(())
}

/// Internal implementation with injectable editor and input.
pub(crate) fn handle_new_impl<E: EditorLauncher, R: Read>(
    args: &NewArgs,
    storage_dir: &Path,
    editor: &E,
    mut input: R,
) -> Result<Note> {
    let text = if let Some(text) = &args.text {
        text.clone()
    } else if args.stdin {
        let mut text = String::new();
        input
            .read_to_string(&mut text)
            .with_context(|| "failed to read note text from stdin")?;
        text
    } else if args.edit {
        edit_in_editor("", editor)?
    } else {
        bail!("provide the note text, --stdin or --edit");
    };

    let mut state = EditorState::new(None, EditorMode::Edit);
    state.set_text(text);
    let Some(draft) = state.save() else {
        bail!("note text cannot be empty");
    };

    let mut repository = open_repository(storage_dir)?;
    repository
        .save(draft)
        .with_context(|| format!("failed to save note in {}", storage_dir.display()))
}
