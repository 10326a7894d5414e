//! In-memory caches used during template evaluation.
//!
//! - [`ExecCache`] - time-to-live cache for `execi` command output
//! - [`ScrollAnimator`] - per-directive scroll positions
//! - [`CacheJanitor`] - background sweep evicting entries nobody touched
//!   within [`CacheCleanupConfig::max_age`]

pub mod config;
pub mod exec;
pub mod janitor;
pub mod scroll;

pub use config::{CacheCleanupConfig, DEFAULT_CLEANUP_INTERVAL, DEFAULT_MAX_AGE};
pub use exec::{ExecCache, ExecCacheEntry};
pub use janitor::{CacheJanitor, SweepReport, SweepTarget};
pub use scroll::{ScrollAnimator, ScrollState, DEFAULT_SCROLL_TICK, MAX_SCROLL_WIDTH};

/// Entry counts across the engine caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Stored `execi` outputs, expired ones included.
    pub exec_entries: usize,
    /// Tracked scroll directives.
    pub scroll_entries: usize,
    /// Sweeps completed since the engine was built.
    pub sweeps: u64,
}
