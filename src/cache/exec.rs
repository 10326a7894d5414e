//! Time-to-live cache for `execi`-style command output.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use super::config::to_signed;

/// Cached output of one command line.
#[derive(Debug)]
pub struct ExecCacheEntry {
    output: String,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    /// Milliseconds since the Unix epoch; bumped on hits under a shared lock.
    last_accessed: AtomicI64,
}

impl ExecCacheEntry {
    /// Create an entry that expires `ttl` after `now`.
    pub fn new(output: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        let expires_at = now
            .checked_add_signed(to_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            output: output.into(),
            cached_at: now,
            expires_at,
            last_accessed: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// The cached output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// When the entry was stored.
    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    /// When the entry stops being served.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check if the entry has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Remaining time to live, zero once expired.
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.expires_at
            .signed_duration_since(now)
            .max(chrono::Duration::zero())
    }

    /// Last time the entry was stored or served.
    pub fn last_accessed(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_accessed.load(Ordering::Relaxed))
            .unwrap_or(self.cached_at)
    }

    /// Record an access. Never moves the timestamp backwards.
    pub fn touch(&self, now: DateTime<Utc>) {
        self.last_accessed
            .fetch_max(now.timestamp_millis(), Ordering::Relaxed);
    }
}

/// Command output keyed by the exact command text.
#[derive(Debug, Default)]
pub struct ExecCache {
    entries: HashMap<String, ExecCacheEntry>,
}

impl ExecCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the fresh output for `command`, recording the access.
    ///
    /// Expired entries are treated as misses; they are replaced by the
    /// next [`insert`](Self::insert).
    pub fn lookup(&self, command: &str, now: DateTime<Utc>) -> Option<String> {
        let entry = self.entries.get(command)?;
        if entry.is_expired(now) {
            return None;
        }
        entry.touch(now);
        Some(entry.output.clone())
    }

    /// Store `output` for `command`, replacing any previous entry.
    pub fn insert(&mut self, command: &str, output: &str, ttl: Duration, now: DateTime<Utc>) {
        self.entries
            .insert(command.to_string(), ExecCacheEntry::new(output, ttl, now));
    }

    /// Borrow the entry for `command` without touching it.
    pub fn get(&self, command: &str) -> Option<&ExecCacheEntry> {
        self.entries.get(command)
    }

    /// Remove entries last accessed before `cutoff`; returns how many.
    pub fn evict_stale(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.last_accessed() >= cutoff);
        before - self.entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
