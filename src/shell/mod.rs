//! Shell command execution for `exec`-class directives.

pub mod command;
pub mod executor;

pub use command::{execute, CommandOptions, CommandResult};
pub use executor::{Executor, RecordingExecutor, ShellExecutor};
