//! Check command implementation.
//!
//! The `conkytext check` command reports structural problems in a template
//! without rendering it.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::ConkyConfig;
use crate::engine::{Diagnostic, Engine, Severity};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::input::read_template;

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config: ConkyConfig,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config: ConkyConfig, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn report(&self, diagnostics: &[Diagnostic], ui: &mut dyn UserInterface) -> Result<()> {
        if self.args.json {
            let json = serde_json::to_string_pretty(diagnostics)
                .map_err(|e| anyhow::anyhow!("failed to serialize diagnostics: {}", e))?;
            ui.output(&json);
            return Ok(());
        }

        for diagnostic in diagnostics {
            let line = match &diagnostic.suggestion {
                Some(suggestion) => format!("{} ({})", diagnostic, suggestion),
                None => diagnostic.to_string(),
            };
            match diagnostic.severity {
                Severity::Error => ui.error(&line),
                Severity::Warning => ui.warning(&line),
            }
        }

        let errors = count(diagnostics, Severity::Error);
        let warnings = count(diagnostics, Severity::Warning);
        if errors == 0 && warnings == 0 {
            ui.success("Template is valid");
        } else if errors == 0 {
            ui.success(&format!("Template is valid ({} warning(s))", warnings));
        } else {
            ui.message(&format!("{} error(s), {} warning(s)", errors, warnings));
        }
        Ok(())
    }
}

fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let text = read_template(&self.args.input, &self.project_root, &self.config)?;
        let engine = self.config.apply(Engine::builder()).janitor(false).build()?;

        let diagnostics = engine.check(&text);
        tracing::debug!("check found {} diagnostic(s)", diagnostics.len());
        self.report(&diagnostics, ui)?;

        if count(&diagnostics, Severity::Error) > 0 {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
