//! Command handlers for the CLI.

mod delete;
mod list;
mod new;
mod resolve;
mod search;
mod shell;
mod show_edit;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use std::path::Path;

use crate::index::NoteRepository;
use crate::infra::FileStore;

// Re-export public items
pub use delete::handle_delete;
pub use list::handle_list;
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use search::handle_search;
pub use shell::{handle_shell, run_shell};
pub use show_edit::{handle_edit, handle_show};

// Re-export for tests
#[cfg(test)]
pub(crate) use delete::handle_delete_impl;
#[cfg(test)]
pub(crate) use new::handle_new_impl;
#[cfg(test)]
pub(crate) use show_edit::{EditOutcome, EditorLauncher, handle_edit_impl};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note repository stored in `storage_dir`.
pub(crate) fn open_repository(storage_dir: &Path) -> Result<NoteRepository<FileStore>> {
    let store = FileStore::open(storage_dir)
        .with_context(|| format!("failed to open store at {}", storage_dir.display()))?;
    Ok(NoteRepository::open(store))
}

/// Formats a timestamp in local time for display.
pub(crate) fn format_local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
