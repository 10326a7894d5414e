//! Cache cleanup configuration.

use crate::error::{ConkyError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default age after which an untouched cache entry is evicted.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5 * 60);

/// Default pause between janitor sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Governs the cache janitor.
///
/// Entries whose last access is older than `max_age` are evicted on each
/// sweep; sweeps run every `cleanup_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCleanupConfig {
    pub max_age: Duration,
    pub cleanup_interval: Duration,
}

impl Default for CacheCleanupConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl CacheCleanupConfig {
    /// Create a config with explicit values.
    pub fn new(max_age: Duration, cleanup_interval: Duration) -> Self {
        Self {
            max_age,
            cleanup_interval,
        }
    }

    /// Reject a zero cleanup interval, which would spin the janitor.
    pub fn validate(&self) -> Result<()> {
        if self.cleanup_interval.is_zero() {
            return Err(ConkyError::ConfigValidationError {
                message: "cache cleanup interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// `max_age` as a signed chrono duration, saturating on overflow.
    pub fn max_age_signed(&self) -> chrono::Duration {
        to_signed(self.max_age)
    }
}

/// Convert a std duration to chrono, saturating on overflow.
pub(crate) fn to_signed(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}
