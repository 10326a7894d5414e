//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`conkytext render`, `conkytext check`)
//! - Shared config loading
//! - Consistent global flag handling

pub mod check;
pub mod completions;
pub mod directives;
pub mod dispatcher;
pub mod input;
pub mod render;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
