//! Rendering of note listings for `ls` and `search`.

use anyhow::Result;
use chrono::{Local, SecondsFormat};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::domain::Note;
use crate::ui::EMPTY_MESSAGE;

const TITLE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table for people
    #[default]
    Human,
    /// JSON object with a `data` array
    Json,
}

/// JSON envelope: `{"data": ..., "count": n}`.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub time_last_updated: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            time_last_updated: note
                .time_last_updated()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Writes `notes` in `format`, in the order given.
pub fn write_notes<W: Write>(out: &mut W, notes: &[&Note], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => write_table(out, notes)?,
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            serde_json::to_writer_pretty(&mut *out, &Output::new(listings))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, notes: &[&Note]) -> std::io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "{}", EMPTY_MESSAGE);
    }

    writeln!(
        out,
        "{:<10}  {:<width$}  {:>16}",
        "ID",
        "Title",
        "Last saved",
        width = TITLE_WIDTH
    )?;
    writeln!(out, "{}  {}  {}", "-".repeat(10), "-".repeat(TITLE_WIDTH), "-".repeat(16))?;
    for note in notes {
        writeln!(
            out,
            "{:<10}  {:<width$}  {:>16}",
            note.id().prefix(),
            truncate(note.title(), TITLE_WIDTH),
            note.time_last_updated()
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M"),
            width = TITLE_WIDTH
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} note(s)", notes.len())
}

/// Shortens `s` to `max_width` characters, ending in an ellipsis when cut.
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
