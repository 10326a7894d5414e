//! conkytext - Conky-compatible text templates for system metrics.
//!
//! conkytext expands Conky `TEXT`-section templates (`${cpu}`, `${mem}`,
//! `${if_up eth0}...${endif}`, `${execi 30 cmd}`) against a snapshot of
//! system metrics and returns plain text.
//!
//! # Modules
//!
//! - [`cache`] - Exec output cache, scroll animator and the cache janitor
//! - [`cli`] - Command-line interface and argument parsing
//! - [`clock`] - Injectable wall clock
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`engine`] - Lexer, conditional blocks and directive resolution
//! - [`error`] - Error types and result aliases
//! - [`format`] - Byte, duration and time-left formatting
//! - [`metrics`] - Metric source trait and file-backed snapshots
//! - [`shell`] - Shell command execution for `exec` directives
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use conkytext::engine::Engine;
//! use conkytext::metrics::{MetricSnapshot, StaticSource};
//! use std::sync::Arc;
//!
//! let yaml = "network:\n  interfaces:\n    eth0:\n      addresses: [10.0.0.2]\n";
//! let snapshot = MetricSnapshot::from_yaml(yaml).unwrap();
//! let engine = Engine::builder()
//!     .source(Arc::new(StaticSource::new(snapshot)))
//!     .janitor(false)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(engine.parse("${if_up eth0}UP${else}DOWN${endif}"), "UP");
//! assert_eq!(engine.parse("${if_up wlan0}UP${else}DOWN${endif}"), "DOWN");
//! ```

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod metrics;
pub mod shell;
pub mod ui;

pub use engine::Engine;
pub use error::{ConkyError, Result};
