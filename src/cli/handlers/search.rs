//! Search command handler.

use anyhow::{Result, bail};
use std::path::Path;

use super::open_repository;
use crate::cli::SearchArgs;
use crate::cli::output::write_notes;
use crate::ui::ListView;

pub fn handle_search(args: &SearchArgs, storage_dir: &Path) -> Result<()> {
    if args.query.is_empty() {
        bail!("search query cannot be empty");
    }

    let repository = open_repository(storage_dir)?;
    let notes = repository.notes();

    let mut list = ListView::new();
    list.set_search_term(args.query.as_str());

    write_notes(&mut std::io::stdout().lock(), &list.visible_notes(&notes), args.output.format)
}
