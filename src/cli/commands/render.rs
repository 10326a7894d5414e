//! Render command implementation.
//!
//! The `conkytext render` command expands a template against a metric
//! snapshot and prints the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::RenderArgs;
use crate::config::ConkyConfig;
use crate::engine::widget::strip_markers;
use crate::engine::Engine;
use crate::error::{ConkyError, Result};
use crate::metrics::StaticSource;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::input::read_template;

/// The render command implementation.
pub struct RenderCommand {
    project_root: PathBuf,
    config: ConkyConfig,
    args: RenderArgs,
}

impl RenderCommand {
    /// Create a new render command.
    pub fn new(project_root: &Path, config: ConkyConfig, args: RenderArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RenderArgs {
        &self.args
    }

    /// Snapshot path from `--snapshot`, else from the config.
    fn snapshot_path(&self) -> Option<PathBuf> {
        self.args
            .snapshot
            .as_ref()
            .map(|p| self.project_root.join(p))
            .or_else(|| self.config.snapshot.clone())
    }

    fn frames(&self) -> u32 {
        self.args.repeat.unwrap_or(1).max(1)
    }

    fn build_engine(&self, ui: &mut dyn UserInterface) -> Result<Engine> {
        let mut builder = self
            .config
            .apply(Engine::builder())
            .janitor(self.frames() > 1);

        match self.snapshot_path() {
            Some(path) => {
                ui.show_detail("snapshot", &path.display().to_string());
                let source = StaticSource::from_path(&path).map_err(|e| match e {
                    ConkyError::Io(io) => ConkyError::Other(anyhow::anyhow!(
                        "failed to read metric snapshot {}: {}",
                        path.display(),
                        io
                    )),
                    other => other,
                })?;
                builder = builder.source(Arc::new(source));
            }
            None => ui.show_detail("snapshot", "none"),
        }

        builder.build()
    }

    fn show_stats(&self, engine: &Engine, ui: &mut dyn UserInterface) {
        let stats = engine.cache_stats();
        ui.show_header("Cache");
        ui.message(&format!("exec entries: {}", stats.exec_entries));
        ui.message(&format!("scroll entries: {}", stats.scroll_entries));
        ui.message(&format!("sweeps: {}", stats.sweeps));
    }
}

impl Command for RenderCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let text = read_template(&self.args.input, &self.project_root, &self.config)?;
        let engine = self.build_engine(ui)?;

        for frame in 0..self.frames() {
            if frame > 0 {
                std::thread::sleep(self.config.update_interval);
                ui.clear();
            }

            let rendered = engine.parse(&text);
            let rendered = if self.args.raw {
                rendered
            } else {
                strip_markers(&rendered)
            };
            ui.output(rendered.strip_suffix('\n').unwrap_or(&rendered));
        }

        if self.args.stats {
            self.show_stats(&engine, ui);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::TemplateInput;
    use crate::ui::MockUI;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"
cpu:
  usage_percent: 45.5
memory:
  used: 8589934592
  total: 17179869184
"#;

    fn args(template: &str) -> RenderArgs {
        RenderArgs {
            input: TemplateInput {
                template: Some(template.to_string()),
                file: None,
            },
            ..Default::default()
        }
    }

    fn fast_config() -> ConkyConfig {
        ConkyConfig {
            update_interval: Duration::from_millis(1),
            ..Default::default()
        }
    }

    #[test]
    fn renders_against_snapshot() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("m.yml"), SNAPSHOT).unwrap();
        let mut args = args("CPU: ${cpu}% | RAM: ${mem}/${memmax} (${memperc}%)");
        args.snapshot = Some("m.yml".into());
        let mut ui = MockUI::new();

        let result = RenderCommand::new(temp.path(), fast_config(), args)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.outputs(), ["CPU: 46% | RAM: 8.0GiB/16.0GiB (50%)"]);
    }

    #[test]
    fn without_snapshot_variables_pass_through() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), fast_config(), args("CPU ${cpu}"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.outputs(), ["CPU ${cpu}"]);
        assert!(ui
            .details()
            .contains(&("snapshot".to_string(), "none".to_string())));
    }

    #[test]
    fn widget_markers_are_stripped_unless_raw() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("m.yml"), SNAPSHOT).unwrap();

        let mut plain = args("[${cpubar}]");
        plain.snapshot = Some("m.yml".into());
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), fast_config(), plain.clone())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.outputs(), ["[]"]);

        plain.raw = true;
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), fast_config(), plain)
            .execute(&mut ui)
            .unwrap();
        assert!(ui.outputs()[0].contains("WIDGET:"));
    }

    #[test]
    fn repeat_renders_each_frame_and_clears_between() {
        let temp = TempDir::new().unwrap();
        let mut args = args("frame");
        args.repeat = Some(3);
        let mut ui = MockUI::new();
        ui.set_interactive(true);

        RenderCommand::new(temp.path(), fast_config(), args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.outputs().len(), 3);
        assert_eq!(ui.clears(), 2);
    }

    #[test]
    fn repeat_zero_still_renders_one_frame() {
        let temp = TempDir::new().unwrap();
        let mut args = args("frame");
        args.repeat = Some(0);
        let mut ui = MockUI::new();

        RenderCommand::new(temp.path(), fast_config(), args)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(ui.outputs(), ["frame"]);
    }

    #[test]
    fn trailing_newline_is_trimmed_once() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), fast_config(), args("a\n\n"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.outputs(), ["a\n"]);
    }

    #[test]
    fn stats_are_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("m.yml"), SNAPSHOT).unwrap();
        let mut args = args("${scroll 4 1 hello world}");
        args.snapshot = Some("m.yml".into());
        args.stats = true;
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), fast_config(), args)
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.headers(), ["Cache"]);
        assert!(ui.has_message("exec entries: 0"));
        assert!(ui.has_message("scroll entries: 1"));
        assert!(ui.has_message("sweeps: 0"));
    }

    #[test]
    fn missing_snapshot_names_path() {
        let temp = TempDir::new().unwrap();
        let mut args = args("${cpu}");
        args.snapshot = Some("gone.yml".into());
        let mut ui = MockUI::new();
        let err = match RenderCommand::new(temp.path(), fast_config(), args).execute(&mut ui) {
            Err(e) => e,
            Ok(_) => panic!("expected error"),
        };
        assert!(err.to_string().contains("gone.yml"));
    }

    #[test]
    fn config_templates_are_available() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("m.yml"), SNAPSHOT).unwrap();
        let mut config = fast_config();
        config.templates.insert(1, "<\\1>".to_string());
        config.snapshot = Some(temp.path().join("m.yml"));
        let mut ui = MockUI::new();
        RenderCommand::new(temp.path(), config, args("${template1 x}"))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(ui.outputs(), ["<x>"]);
    }
}
