//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use conkytext::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".conkytext.yml"), "text: 'CPU ${cpu}%'").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.text.as_deref(), Some("CPU ${cpu}%"));
//! ```
//!
//! # Configuration File Locations
//!
//! `--config <path>` wins; otherwise `.conkytext.yml` (or `.yaml`) in the
//! working directory; otherwise built-in defaults.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAMES};
pub use schema::{CacheSettings, ConkyConfig};
pub use validator::{validate, validate_config, ValidationError};
