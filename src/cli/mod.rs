//! Command-line interface of the `notes` binary.
//!
//! Every command opens the store in the storage directory (see
//! [`config::Config::storage_dir`]) and works through the same list, editor
//! and repository types as the interactive `shell`.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// notes - markdown notes kept in a local key-value store
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Storage directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes, most recently saved first
    #[command(name = "ls")]
    List(ListArgs),

    /// List notes whose text matches a pattern
    Search(SearchArgs),

    /// Create a new note
    New(NewArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Edit a note in your editor
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Delete(DeleteArgs),

    /// Interactive session with list, editor and selection
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// `--format` option shared by the listing commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FormatArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list notes whose text matches this pattern
    #[arg(short, long)]
    pub search: Option<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Regular expression (or literal text) to match against note text
    pub query: String,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note text (Markdown)
    #[arg(conflicts_with = "stdin")]
    pub text: Option<String>,

    /// Read the note text from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Write the note in your editor
    #[arg(short, long, conflicts_with_all = ["text", "stdin"])]
    pub edit: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Render the note as HTML
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix or title
    pub note: String,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
