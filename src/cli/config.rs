//! Configuration file support.
//!
//! The file is TOML with two optional keys:
//!
//! ```toml
//! dir = "/home/me/notes-store"
//! editor = "code --wait"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "NOTESMD_CONFIG";

const FALLBACK_EDITOR: &str = "vi";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the notes store
    pub dir: Option<PathBuf>,

    /// Command used by `new --edit` and `edit`
    pub editor: Option<String>,
}

impl Config {
    /// Loads the config file named by `NOTESMD_CONFIG`, or the default one.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read config file: {}", path.display()));
            }
        };

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// `$NOTESMD_CONFIG` if set, else `<config_dir>/notesmd/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notesmd")
            .join("config.toml")
    }

    /// Picks the storage directory: `--dir`, then the config file, then
    /// `notesmd` under the platform data directory.
    pub fn storage_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        if let Some(dir) = cli_dir.or(self.dir.as_ref()) {
            return dir.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notesmd")
    }

    /// Editor command: config file, then `$EDITOR`, then `$VISUAL`, then `vi`.
    pub fn editor(&self) -> String {
        self.editor_with(|name| std::env::var(name).ok())
    }

    fn editor_with(&self, env: impl Fn(&str) -> Option<String>) -> String {
        self.editor
            .iter()
            .cloned()
            .chain(["EDITOR", "VISUAL"].into_iter().filter_map(&env))
            .find(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
    }
}
