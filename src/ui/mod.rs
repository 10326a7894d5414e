//! Terminal output for the CLI.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing to the real terminal
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use conkytext::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.output("CPU: 12%");
//! assert_eq!(ui.outputs(), ["CPU: 12%"]);
//! assert_eq!(ui.output_mode(), OutputMode::Quiet);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ConkyTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write a command's payload (rendered text, JSON) unstyled.
    ///
    /// Shown in every output mode.
    fn output(&mut self, text: &str);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a `key: value` line.
    fn show_detail(&mut self, key: &str, value: &str);

    /// Clear the screen before redrawing, when attached to a terminal.
    fn clear(&mut self);

    /// Check if output goes to a terminal.
    fn is_interactive(&self) -> bool;
}
