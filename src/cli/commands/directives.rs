//! Directives command implementation.
//!
//! The `conkytext directives` command lists every registered directive and
//! conditional predicate.

use crate::cli::args::DirectivesArgs;
use crate::engine::Engine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The directives command implementation.
pub struct DirectivesCommand {
    args: DirectivesArgs,
}

impl DirectivesCommand {
    /// Create a new directives command.
    pub fn new(args: DirectivesArgs) -> Self {
        Self { args }
    }
}

impl Command for DirectivesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let engine = Engine::builder().janitor(false).build()?;
        let directives = engine.directive_names();
        let predicates = engine.predicate_names();

        if self.args.json {
            let json = serde_json::json!({
                "directives": directives,
                "predicates": predicates,
            });
            let text = serde_json::to_string_pretty(&json)
                .map_err(|e| anyhow::anyhow!("failed to serialize directives: {}", e))?;
            ui.output(&text);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Directives ({})", directives.len()));
        for name in &directives {
            ui.output(name);
        }
        ui.show_header(&format!("Predicates ({})", predicates.len()));
        for name in &predicates {
            ui.output(name);
        }

        Ok(CommandResult::success())
    }
}
