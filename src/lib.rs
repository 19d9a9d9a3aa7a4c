//! notesmd - markdown notes kept in a local key-value store

pub mod cli;
pub mod domain;
pub mod index;
pub mod infra;
pub mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_delete, handle_edit, handle_list, handle_new, handle_search, handle_shell,
        handle_show,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let config = Config::load()?;
    let storage_dir = config.storage_dir(cli.dir.as_ref());
    tracing::debug!(dir = %storage_dir.display(), "using storage directory");

    match &cli.command {
        Command::List(args) => handle_list(args, &storage_dir),
        Command::Search(args) => handle_search(args, &storage_dir),
        Command::New(args) => handle_new(args, &storage_dir, &config),
        Command::Show(args) => handle_show(args, &storage_dir),
        Command::Edit(args) => handle_edit(args, &storage_dir, &config),
        Command::Delete(args) => handle_delete(args, &storage_dir),
        Command::Shell => handle_shell(&storage_dir),
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "notes",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
