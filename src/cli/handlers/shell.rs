//! Interactive shell driving the full page coordinator.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use super::format_local_time;
use super::resolve::{ResolveResult, describe_ambiguous_notes, resolve_note};
use crate::infra::{FileStore, KeyValueStore};
use crate::ui::{App, EMPTY_MESSAGE, EditorMode, PLACEHOLDER};

const WARNING_MESSAGE: &str = "There are unsaved changes in the editor. If you proceed, those \
changes will be discarded. Alternatively, you can cancel and save your changes. (proceed/cancel)";

const DELETE_MESSAGE: &str =
    "Are you sure? If you proceed, this note will be permanently deleted. (proceed/cancel)";

const HELP: &str = "\
Commands:
  ls                 show the note list
  search [TERM]      filter the list (no term clears the search)
  select NOTE        open a note by ID, ID prefix or title
  new                start a new note
  toggle             show or hide the list
  text TEXT          replace the editor text (\\n starts a new line)
  append TEXT        append a line to the editor text
  mode edit|read     switch editor mode
  view               show the editor contents
  save               save the editor contents
  delete             delete the open note
  proceed | cancel   answer the open confirmation
  status             show page state
  quit               leave the shell";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Help,
    List,
    Search(String),
    Select(String),
    New,
    Toggle,
    Text(String),
    Append(String),
    Mode(EditorMode),
    View,
    Save,
    Delete,
    Proceed,
    Cancel,
    Status,
    Quit,
}

/// Parses one line of shell input.
pub(crate) fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, rest) = match line.trim_start().split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (line.trim(), ""),
    };

    let command = match name {
        "help" | "?" => ShellCommand::Help,
        "ls" | "list" => ShellCommand::List,
        "search" => ShellCommand::Search(rest.to_string()),
        "select" | "open" => {
            if rest.trim().is_empty() {
                return Err("select needs a note ID or title".to_string());
            }
            ShellCommand::Select(rest.trim().to_string())
        }
        "new" => ShellCommand::New,
        "toggle" => ShellCommand::Toggle,
        "text" => ShellCommand::Text(rest.replace("\\n", "\n")),
        "append" => ShellCommand::Append(rest.replace("\\n", "\n")),
        "mode" => ShellCommand::Mode(rest.trim().parse()?),
        "view" => ShellCommand::View,
        "save" => ShellCommand::Save,
        "delete" | "rm" => ShellCommand::Delete,
        "proceed" | "yes" => ShellCommand::Proceed,
        "cancel" | "no" => ShellCommand::Cancel,
        "status" => ShellCommand::Status,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(command)
}

pub fn handle_shell(storage_dir: &Path) -> Result<()> {
    let store = FileStore::open(storage_dir)
        .with_context(|| format!("failed to open store at {}", storage_dir.display()))?;
    let mut app = App::open(store);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_shell(&mut app, stdin.lock(), &mut stdout)
}

/// Runs the shell until `quit` or end of input.
pub fn run_shell<S, R, W>(app: &mut App<S>, input: R, output: &mut W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "notes shell, 'help' lists commands")?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.with_context(|| "failed to read input")?;
        if !line.trim().is_empty() {
            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => execute(app, command, output)?,
                Err(message) => writeln!(output, "error: {}", message)?,
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

fn execute<S: KeyValueStore, W: Write>(
    app: &mut App<S>,
    command: ShellCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::List => print_list(app, out)?,
        ShellCommand::Search(term) => {
            let term = term.trim().to_string();
            let list = app.page().list();
            if !term.is_empty() && !list.is_search_enabled(app.notes()) {
                writeln!(out, "Search needs at least two notes.")?;
            } else {
                app.set_search_term(term);
                print_list(app, out)?;
            }
        }
        ShellCommand::Select(identifier) => {
            let resolved = resolve_note(app.repository().index(), &identifier);
            match resolved {
                ResolveResult::Unique(note) => {
                    app.select_note(note.id().clone());
                    report_navigation(app, out)?;
                }
                ResolveResult::Ambiguous(notes) => {
                    writeln!(out, "{}", describe_ambiguous_notes(&identifier, &notes))?
                }
                ResolveResult::NotFound => writeln!(out, "note not found: '{}'", identifier)?,
            }
        }
        ShellCommand::New => {
            app.new_note();
            report_navigation(app, out)?;
        }
        ShellCommand::Toggle => {
            app.toggle_list();
            if app.page().is_list_visible() {
                print_list(app, out)?;
            } else {
                writeln!(out, "List hidden.")?;
            }
        }
        ShellCommand::Text(text) => {
            if require_edit_mode(app, out)? {
                app.edit_text(text);
            }
        }
        ShellCommand::Append(line) => {
            if require_edit_mode(app, out)? {
                let mut text = app.page().editor().text().to_string();
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&line);
                app.edit_text(text);
            }
        }
        ShellCommand::Mode(mode) => {
            app.set_mode(mode);
            writeln!(out, "Mode: {}", mode)?;
        }
        ShellCommand::View => print_editor(app, out)?,
        ShellCommand::Save | ShellCommand::Delete if app.page().state().show_warning() => {
            writeln!(out, "Answer the unsaved-changes warning first (proceed/cancel).")?;
        }
        ShellCommand::Save => match app.save() {
            Ok(Some(note)) => writeln!(out, "Saved: {}", note)?,
            Ok(None) => writeln!(out, "Nothing to save.")?,
            Err(e) => writeln!(out, "error: {}", e)?,
        },
        ShellCommand::Delete => {
            if app.page().editor().can_delete() {
                app.request_delete();
                writeln!(out, "{}", DELETE_MESSAGE)?;
            } else {
                writeln!(out, "Only saved notes can be deleted.")?;
            }
        }
        ShellCommand::Proceed => {
            if app.page().state().show_warning() {
                app.proceed_warning();
                writeln!(out, "Unsaved changes discarded.")?;
                report_navigation(app, out)?;
            } else if app.page().editor().is_delete_confirmation_open() {
                match app.confirm_delete() {
                    Ok(Some(id)) => writeln!(out, "Deleted: {}", id)?,
                    Ok(None) => writeln!(out, "Nothing to delete.")?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            } else {
                writeln!(out, "Nothing to proceed with.")?;
            }
        }
        ShellCommand::Cancel => {
            if app.page().state().show_warning() {
                app.cancel_warning();
                writeln!(out, "Kept your changes.")?;
            } else if app.page().editor().is_delete_confirmation_open() {
                app.cancel_delete();
                writeln!(out, "Delete cancelled.")?;
            } else {
                writeln!(out, "Nothing to cancel.")?;
            }
        }
        ShellCommand::Status => print_status(app, out)?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn require_edit_mode<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<bool> {
    if app.page().editor().mode() == EditorMode::Edit {
        Ok(true)
    } else {
        writeln!(out, "Editor is in read mode (use 'mode edit').")?;
        Ok(false)
    }
}

fn report_navigation<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    if app.page().state().show_warning() {
        writeln!(out, "{}", WARNING_MESSAGE)?;
    } else {
        match app.selected_note() {
            Some(note) => writeln!(out, "Opened: {}", note)?,
            None => writeln!(out, "New note.")?,
        }
    }
    Ok(())
}

fn print_list<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    if !app.page().is_list_visible() {
        writeln!(out, "List hidden (use 'toggle').")?;
        return Ok(());
    }

    let search = app.page().list().search_term();
    if !search.is_empty() {
        writeln!(out, "Search: {}", search)?;
    }

    let items = app.list_items();
    if items.is_empty() {
        writeln!(out, "{}", EMPTY_MESSAGE)?;
    }
    for item in items {
        let marker = if item.highlighted { '*' } else { ' ' };
        writeln!(
            out,
            "{} {}  {}  ({})",
            marker,
            item.id.prefix(),
            item.title,
            format_local_time(item.time_last_updated)
        )?;
    }
    Ok(())
}

fn print_editor<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    let editor = app.page().editor();
    if let Some(label) = editor.last_saved_label() {
        writeln!(out, "{}", label)?;
    }
    match editor.mode() {
        EditorMode::Edit if editor.is_text_empty() => writeln!(out, "{}", PLACEHOLDER)?,
        EditorMode::Edit => writeln!(out, "{}", editor.text())?,
        EditorMode::Read => write!(out, "{}", editor.preview())?,
    }
    Ok(())
}

fn print_status<S: KeyValueStore, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    let page = app.page();
    let editor = page.editor();

    let open = match app.selected_note() {
        Some(note) => note.to_string(),
        None => "new note".to_string(),
    };
    writeln!(out, "Notes: {}", app.notes().len())?;
    writeln!(
        out,
        "List: {}",
        if page.is_list_visible() { "shown" } else { "hidden" }
    )?;
    writeln!(out, "Editor: {} [{}]", open, editor.mode())?;
    if editor.has_text_changed() {
        writeln!(out, "Unsaved changes")?;
    }
    if page.state().show_warning() {
        writeln!(out, "Waiting: unsaved changes warning")?;
    }
    if editor.is_delete_confirmation_open() {
        writeln!(out, "Waiting: delete confirmation")?;
    }
    Ok(())
}
