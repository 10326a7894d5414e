//! Template text selection shared by `render` and `check`.

use std::fs;
use std::path::Path;

use crate::cli::args::TemplateInput;
use crate::config::ConkyConfig;
use crate::error::{ConkyError, Result};

/// Pick the template text: `--template`, then `--file`, then the config's
/// `text:`.
///
/// A relative `--file` is resolved against `project_root`.
pub fn read_template(
    input: &TemplateInput,
    project_root: &Path,
    config: &ConkyConfig,
) -> Result<String> {
    if let Some(text) = &input.template {
        return Ok(text.clone());
    }

    if let Some(file) = &input.file {
        let path = project_root.join(file);
        tracing::debug!("reading template from {}", path.display());
        return fs::read_to_string(&path).map_err(|e| {
            ConkyError::Other(anyhow::anyhow!(
                "failed to read template {}: {}",
                path.display(),
                e
            ))
        });
    }

    config.text.clone().ok_or_else(|| {
        ConkyError::Other(anyhow::anyhow!(
            "no template given; pass --template, --file, or set `text:` in the config"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_text(text: Option<&str>) -> ConkyConfig {
        ConkyConfig {
            text: text.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn inline_template_wins() {
        let input = TemplateInput {
            template: Some("inline".into()),
            file: None,
        };
        let text = read_template(&input, Path::new("/"), &config_with_text(Some("cfg"))).unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn file_is_read_relative_to_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tpl.txt"), "from file\n").unwrap();
        let input = TemplateInput {
            template: None,
            file: Some("tpl.txt".into()),
        };
        let text = read_template(&input, temp.path(), &config_with_text(None)).unwrap();
        assert_eq!(text, "from file\n");
    }

    #[test]
    fn missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let input = TemplateInput {
            template: None,
            file: Some("absent.txt".into()),
        };
        let err = read_template(&input, temp.path(), &config_with_text(None)).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn falls_back_to_config_text() {
        let text = read_template(
            &TemplateInput::default(),
            Path::new("/"),
            &config_with_text(Some("cfg")),
        )
        .unwrap();
        assert_eq!(text, "cfg");
    }

    #[test]
    fn nothing_given_is_an_error() {
        let err = read_template(&TemplateInput::default(), Path::new("/"), &config_with_text(None))
            .unwrap_err();
        assert!(err.to_string().contains("no template given"));
    }
}
