//! List command handler.

use anyhow::Result;
use std::path::Path;

use super::open_repository;
use crate::cli::ListArgs;
use crate::cli::output::write_notes;
use crate::ui::ListView;

pub fn handle_list(args: &ListArgs, storage_dir: &Path) -> Result<()> {
    let repository = open_repository(storage_dir)?;
    let notes = repository.notes();

    let mut list = ListView::new();
    if let Some(term) = &args.search {
        list.set_search_term(term.as_str());
    }

    write_notes(&mut std::io::stdout().lock(), &list.visible_notes(&notes), args.output.format)
}
