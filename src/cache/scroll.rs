//! Time-driven scrolling windows for the `scroll` directive.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

use super::config::to_signed;

/// Default time between scroll steps.
pub const DEFAULT_SCROLL_TICK: Duration = Duration::from_secs(1);

/// Widest window `window` will produce; larger widths are clamped.
pub const MAX_SCROLL_WIDTH: usize = 4096;

/// Animation state for one scroll directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// Character offset of the window start.
    pub position: usize,
    /// Last time the position advanced.
    pub last_update: DateTime<Utc>,
    /// Last time the window was requested.
    pub last_accessed: DateTime<Utc>,
}

/// Per-directive scroll positions.
///
/// Keys are the directive's literal payload, so identical directives
/// share a phase. Positions advance by `step` characters for every whole
/// tick elapsed since the last advance; calls within one tick return the
/// same window.
#[derive(Debug)]
pub struct ScrollAnimator {
    states: HashMap<String, ScrollState>,
    tick: Duration,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_TICK)
    }
}

impl ScrollAnimator {
    /// Create an animator advancing once per `tick`.
    pub fn new(tick: Duration) -> Self {
        Self {
            states: HashMap::new(),
            tick,
        }
    }

    /// The interval between steps.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Change the interval between steps.
    pub fn set_tick(&mut self, tick: Duration) {
        self.tick = tick;
    }

    /// Return exactly `width` characters of `text` for the directive `key`.
    ///
    /// Text that fits is padded on the right with spaces and keeps no
    /// state. Longer text yields a cyclic window starting at the current
    /// position. `width` is clamped to [`MAX_SCROLL_WIDTH`].
    pub fn window(
        &mut self,
        key: &str,
        text: &str,
        width: usize,
        step: usize,
        now: DateTime<Utc>,
    ) -> String {
        let width = width.min(MAX_SCROLL_WIDTH);
        let chars: Vec<char> = text.chars().collect();
        if width == 0 {
            return String::new();
        }
        if chars.len() <= width {
            let mut padded: String = chars.iter().collect();
            padded.extend(std::iter::repeat_n(' ', width - chars.len()));
            return padded;
        }

        let tick = self.tick;
        let state = self
            .states
            .entry(key.to_string())
            .or_insert_with(|| ScrollState {
                position: 0,
                last_update: now,
                last_accessed: now,
            });

        let ticks = elapsed_ticks(state.last_update, now, tick);
        if ticks > 0 {
            let advance = (ticks % chars.len() as u64) as usize * (step % chars.len());
            state.position = (state.position + advance) % chars.len();
            let tick_ms = tick.as_millis().min(i64::MAX as u128) as i64;
            let moved = chrono::Duration::milliseconds(tick_ms.saturating_mul(ticks as i64));
            state.last_update = state.last_update.checked_add_signed(moved).unwrap_or(now);
        }
        if now > state.last_accessed {
            state.last_accessed = now;
        }

        let start = state.position % chars.len();
        (0..width).map(|i| chars[(start + i) % chars.len()]).collect()
    }

    /// Borrow the state for `key`.
    pub fn state(&self, key: &str) -> Option<&ScrollState> {
        self.states.get(key)
    }

    /// Remove states last accessed before `cutoff`; returns how many.
    pub fn evict_stale(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.states.len();
        self.states.retain(|_, s| s.last_accessed >= cutoff);
        before - self.states.len()
    }

    /// Number of tracked directives.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no directive is tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Forget every state.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

/// Whole ticks between `since` and `now`; zero if the clock went backwards.
fn elapsed_ticks(since: DateTime<Utc>, now: DateTime<Utc>, tick: Duration) -> u64 {
    let tick = to_signed(tick);
    let tick_ms = tick.num_milliseconds();
    if tick_ms <= 0 {
        return 0;
    }
    let elapsed_ms = now.signed_duration_since(since).num_milliseconds();
    if elapsed_ms <= 0 {
        return 0;
    }
    (elapsed_ms / tick_ms) as u64
}
