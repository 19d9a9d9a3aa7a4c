//! Test harness for CLI integration tests.
//!
//! Provides isolated storage directories, programmatic note creation,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod note;

#[allow(unused_imports)]
pub use command::NotesCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use note::TestNote;
