//! Configuration file discovery and loading.

use crate::config::schema::ConkyConfig;
use crate::error::{ConkyError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".conkytext.yml", ".conkytext.yaml"];

/// Find the config file in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// A relative `snapshot` path is resolved against the file's directory.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConkyConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConkyError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConkyError::Io(e)
        }
    })?;

    let mut config = parse_config(&content, path)?;
    if let (Some(snapshot), Some(dir)) = (&config.snapshot, path.parent()) {
        if snapshot.is_relative() {
            config.snapshot = Some(dir.join(snapshot));
        }
    }
    Ok(config)
}

/// Parse YAML content into a config.
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConkyConfig> {
    if content.trim().is_empty() {
        return Ok(ConkyConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConkyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// With an override, that file must exist. Otherwise the config file in
/// `dir` is used if there is one, and defaults if not.
pub fn load_config(dir: &Path, config_override: Option<&Path>) -> Result<ConkyConfig> {
    let path = match config_override {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(dir),
    };

    match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("no config file in {}, using defaults", dir.display());
            Ok(ConkyConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn find_config_prefers_yml() {
        let temp = TempDir::new().unwrap();
        assert!(find_config(temp.path()).is_none());

        fs::write(temp.path().join(".conkytext.yaml"), "").unwrap();
        assert!(find_config(temp.path()).unwrap().ends_with(".conkytext.yaml"));

        fs::write(temp.path().join(".conkytext.yml"), "").unwrap();
        assert!(find_config(temp.path()).unwrap().ends_with(".conkytext.yml"));
    }

    #[test]
    fn load_config_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, ConkyConfig::default());
    }

    #[test]
    fn load_config_reads_discovered_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".conkytext.yml"), "update_interval: 5s").unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.update_interval, Duration::from_secs(5));
    }

    #[test]
    fn missing_override_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConkyError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "cache: [unclosed").unwrap();
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConkyError::ConfigParseError { .. }));
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn relative_snapshot_resolves_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf.yml");
        fs::write(&path, "snapshot: metrics.yml").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.snapshot, Some(temp.path().join("metrics.yml")));
    }

    #[test]
    fn absolute_snapshot_is_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf.yml");
        fs::write(&path, "snapshot: /var/lib/metrics.json").unwrap();
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("/var/lib/metrics.json")));
    }
}
