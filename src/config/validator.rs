//! Configuration validation rules.
//!
//! - Intervals must be greater than zero
//! - Template slots must be 0-9

use crate::config::schema::ConkyConfig;
use crate::engine::TEMPLATE_SLOTS;
use crate::error::{ConkyError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &ConkyConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let intervals = [
        ("update_interval", config.update_interval),
        ("scroll_interval", config.scroll_interval),
        ("cache.cleanup_interval", config.cache.cleanup_interval),
    ];
    for (key, value) in intervals {
        if value.is_zero() {
            errors.push(ValidationError::new(
                "zero-interval",
                format!("'{}' must be greater than zero", key),
            ));
        }
    }

    for slot in config.templates.keys().filter(|s| **s >= TEMPLATE_SLOTS) {
        errors.push(ValidationError::new(
            "template-slot",
            format!("template slot {} is out of range; expected 0-9", slot),
        ));
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &ConkyConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(ConkyError::ConfigValidationError { message })
}
