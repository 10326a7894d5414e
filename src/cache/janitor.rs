//! Background eviction of stale cache entries.
//!
//! The janitor owns one worker thread that sleeps for the configured
//! cleanup interval, sweeps, and repeats. It holds only a weak reference
//! to what it sweeps, so dropping the owner ends the loop even if `stop`
//! is never called.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Entries removed by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub exec_evicted: usize,
    pub scroll_evicted: usize,
}

impl SweepReport {
    /// Total entries removed.
    pub fn total(&self) -> usize {
        self.exec_evicted + self.scroll_evicted
    }
}

impl From<SweepReport> for (usize, usize) {
    fn from(report: SweepReport) -> Self {
        (report.exec_evicted, report.scroll_evicted)
    }
}

/// Something the janitor can sweep.
pub trait SweepTarget: Send + Sync + 'static {
    /// Evict stale entries.
    fn sweep(&self) -> SweepReport;

    /// Interval until the next sweep, read under the owner's lock.
    fn cleanup_interval(&self) -> Duration;
}

enum Signal {
    /// Re-read the interval and restart the wait.
    Reschedule,
    Stop,
}

struct Worker {
    signal: Sender<Signal>,
    thread: JoinHandle<()>,
}

/// Start/stop handle for the sweep thread.
///
/// `start` and `stop` are idempotent and may be called from any thread.
#[derive(Default)]
pub struct CacheJanitor {
    worker: Mutex<Option<Worker>>,
}

impl std::fmt::Debug for CacheJanitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheJanitor")
            .field("running", &self.is_running())
            .finish()
    }
}

impl CacheJanitor {
    /// Create a stopped janitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the sweep thread. Returns `false` if it was already running.
    pub fn start<T: SweepTarget>(&self, target: Weak<T>) -> bool {
        let mut worker = self.lock();
        if worker.is_some() {
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("conkytext-janitor".to_string())
            .spawn(move || {
                tracing::debug!("cache janitor started");
                loop {
                    let interval = match target.upgrade() {
                        Some(t) => t.cleanup_interval(),
                        None => break,
                    };
                    match rx.recv_timeout(interval) {
                        Ok(Signal::Reschedule) => continue,
                        Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            let Some(t) = target.upgrade() else { break };
                            let report = t.sweep();
                            if report.total() > 0 {
                                tracing::debug!(
                                    exec = report.exec_evicted,
                                    scroll = report.scroll_evicted,
                                    "evicted stale cache entries"
                                );
                            }
                        }
                    }
                }
                tracing::debug!("cache janitor stopped");
            });

        match spawned {
            Ok(thread) => {
                *worker = Some(Worker { signal: tx, thread });
                true
            }
            Err(e) => {
                tracing::warn!("failed to spawn cache janitor: {}", e);
                false
            }
        }
    }

    /// Stop the sweep thread and wait for it. Returns `false` if it was
    /// not running.
    pub fn stop(&self) -> bool {
        let mut worker = self.lock();
        let Some(Worker { signal, thread }) = worker.take() else {
            return false;
        };
        let _ = signal.send(Signal::Stop);
        if thread.join().is_err() {
            tracing::warn!("cache janitor panicked");
        }
        true
    }

    /// Wake the thread so a changed interval applies to the pending wait.
    pub fn reschedule(&self) {
        if let Some(worker) = self.lock().as_ref() {
            let _ = worker.signal.send(Signal::Reschedule);
        }
    }

    /// Check if the sweep thread is running.
    pub fn is_running(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for CacheJanitor {
    fn drop(&mut self) {
        self.stop();
    }
}
