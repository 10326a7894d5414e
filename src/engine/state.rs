//! Engine state shared between callers and the janitor thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{
    CacheCleanupConfig, CacheStats, ExecCache, ScrollAnimator, SweepReport, SweepTarget,
};
use crate::clock::Clock;
use crate::metrics::MetricSource;
use crate::shell::Executor;

use super::resolver::Registry;

/// Number of template slots (`template0` to `template9`).
pub const TEMPLATE_SLOTS: usize = 10;

/// Everything guarded by the engine lock.
pub(crate) struct State {
    pub(crate) source: Option<Arc<dyn MetricSource>>,
    pub(crate) exec: ExecCache,
    pub(crate) scroll: ScrollAnimator,
    pub(crate) cleanup: CacheCleanupConfig,
    pub(crate) templates: [Option<String>; TEMPLATE_SLOTS],
}

/// Lock plus the immutable collaborators fixed at build time.
pub(crate) struct Shared {
    state: RwLock<State>,
    pub(crate) clock: Arc<dyn Clock>,
    executor: Arc<dyn Executor>,
    pub(crate) registry: Registry,
    sweeps: AtomicU64,
}

impl Shared {
    pub(crate) fn new(
        state: State,
        clock: Arc<dyn Clock>,
        executor: Arc<dyn Executor>,
        registry: Registry,
    ) -> Self {
        Self {
            state: RwLock::new(state),
            clock,
            executor,
            registry,
            sweeps: AtomicU64::new(0),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a command, returning trimmed stdout or `""` on failure.
    pub(crate) fn run(&self, command: &str) -> String {
        match self.executor.run(command) {
            Ok(output) => output.trim().to_string(),
            Err(e) => {
                tracing::debug!("exec `{}` failed: {}", command, e);
                String::new()
            }
        }
    }

    /// Cached command output, running the command on a miss or expiry.
    ///
    /// The command runs with no lock held. A zero `ttl` bypasses the cache.
    pub(crate) fn get_or_compute(&self, command: &str, ttl: Duration) -> String {
        if ttl.is_zero() {
            return self.run(command);
        }

        let hit = self.read().exec.lookup(command, self.clock.now());
        if let Some(output) = hit {
            return output;
        }

        let output = self.run(command);
        let now = self.clock.now();
        self.write().exec.insert(command, &output, ttl, now);
        output
    }

    /// Scroll window for `key`, advancing its animation state.
    pub(crate) fn scroll_window(&self, key: &str, text: &str, width: usize, step: usize) -> String {
        let now = self.clock.now();
        self.write().scroll.window(key, text, width, step, now)
    }

    /// Evict entries not accessed since `now - max_age`.
    pub(crate) fn sweep_at(&self, now: DateTime<Utc>) -> SweepReport {
        let report = {
            let mut state = self.write();
            let cutoff = now
                .checked_sub_signed(state.cleanup.max_age_signed())
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            SweepReport {
                exec_evicted: state.exec.evict_stale(cutoff),
                scroll_evicted: state.scroll.evict_stale(cutoff),
            }
        };
        self.sweeps.fetch_add(1, Ordering::Relaxed);

        if report.total() > 0 {
            tracing::debug!(
                "cache sweep evicted {} exec and {} scroll entries",
                report.exec_evicted,
                report.scroll_evicted
            );
        }
        report
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let state = self.read();
        CacheStats {
            exec_entries: state.exec.len(),
            scroll_entries: state.scroll.len(),
            sweeps: self.sweeps.load(Ordering::Relaxed),
        }
    }
}

impl SweepTarget for Shared {
    fn sweep(&self) -> SweepReport {
        self.sweep_at(self.clock.now())
    }

    fn cleanup_interval(&self) -> Duration {
        self.read().cleanup.cleanup_interval
    }
}
