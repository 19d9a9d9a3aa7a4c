//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `notes` binary.
pub struct NotesCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl NotesCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--dir` option to specify the storage directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the command's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notes").expect("Failed to find notes binary");
        cmd.args(&self.args)
            .env_remove("RUST_LOG")
            .env("NOTESMD_CONFIG", "/nonexistent/notesmd/config.toml");
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    pub fn new_note(self, text: &str) -> Self {
        self.args(["new", text])
    }

    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    pub fn shell(self) -> Self {
        self.args(["shell"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NotesCommand {
    fn default() -> Self {
        Self::new()
    }
}
