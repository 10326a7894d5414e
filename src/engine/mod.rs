//! Template engine.
//!
//! [`Engine::parse`] expands a template in one pass:
//!
//! 1. [`lexer`] splits the text into literals and directive references
//! 2. [`conditional`] matches `${if_*}`/`${else}`/`${endif}` into blocks
//! 3. each variable is dispatched through the [`resolver::Registry`]; each
//!    block's predicate is evaluated only when the block is reached
//!
//! Handlers that produce template text (`templateN`, `execp`, `execpi`)
//! expand it again, up to [`context::MAX_DEPTH`] levels.
//!
//! # Example
//!
//! ```
//! use conkytext::engine::Engine;
//! use conkytext::metrics::{MetricSnapshot, StaticSource};
//! use std::sync::Arc;
//!
//! let mut snapshot = MetricSnapshot::default();
//! snapshot.cpu.usage_percent = 45.5;
//! let engine = Engine::new(Some(Arc::new(StaticSource::new(snapshot))));
//!
//! assert_eq!(engine.parse("CPU: ${cpu}%"), "CPU: 46%");
//! ```

pub mod check;
pub mod conditional;
pub mod context;
pub mod directives;
pub mod lexer;
pub mod predicates;
pub mod resolver;
pub mod state;
pub mod widget;

pub use check::{Diagnostic, Severity};
pub use context::Context;
pub use lexer::Directive;
pub use resolver::{Args, Handler, Index, Predicate, Registry};
pub use state::TEMPLATE_SLOTS;
pub use widget::{WidgetKind, WidgetMarker};

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{
    CacheCleanupConfig, CacheJanitor, CacheStats, ExecCache, ScrollAnimator, SweepReport,
    SweepTarget, DEFAULT_SCROLL_TICK,
};
use crate::clock::{Clock, SystemClock};
use crate::error::{ConkyError, Result};
use crate::metrics::MetricSource;
use crate::shell::{Executor, ShellExecutor};

use state::{Shared, State};

/// Engine version, reported by `${conky_version}`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expands templates against a metric source.
///
/// Cheap to share behind an `Arc`; every method takes `&self`. A background
/// janitor evicts stale cache entries until [`stop_janitor`](Self::stop_janitor)
/// is called or the engine is dropped.
pub struct Engine {
    shared: Arc<Shared>,
    janitor: CacheJanitor,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("stats", &self.cache_stats())
            .field("janitor", &self.janitor)
            .finish()
    }
}

impl Engine {
    /// Create an engine with default collaborators and start its janitor.
    ///
    /// `None` makes every directive render verbatim until a source is set.
    pub fn new(source: Option<Arc<dyn MetricSource>>) -> Self {
        let mut builder = Self::builder();
        builder.source = source;
        builder.assemble()
    }

    /// Start configuring an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Expand a template. Never fails.
    pub fn parse(&self, text: &str) -> String {
        if !lexer::has_directives(text) {
            return text.to_string();
        }
        let nodes = conditional::build(lexer::tokenize(text));
        let source = self.shared.read().source.clone();

        match source {
            Some(source) => Context::new(&self.shared, source.as_ref()).render(&nodes),
            None => {
                let mut out = String::with_capacity(text.len());
                context::passthrough(&nodes, &mut out);
                out
            }
        }
    }

    /// Resolve a single variable directive.
    ///
    /// Unknown names, and every name while no source is set, come back as
    /// `${name args}`.
    pub fn resolve(&self, name: &str, args: &[&str]) -> String {
        let directive = Directive::synthesize(name, args);
        let source = self.shared.read().source.clone();
        match source {
            Some(source) => Context::new(&self.shared, source.as_ref()).resolve(&directive),
            None => directive.raw,
        }
    }

    /// Evaluate a predicate such as `if_up`. False without a source.
    pub fn evaluate(&self, predicate: &str, args: &[&str]) -> bool {
        let directive = Directive::synthesize(predicate, args);
        let source = self.shared.read().source.clone();
        source.is_some_and(|source| {
            Context::new(&self.shared, source.as_ref()).evaluate(&directive)
        })
    }

    /// Replace the metric source.
    pub fn set_source(&self, source: Option<Arc<dyn MetricSource>>) {
        self.shared.write().source = source;
    }

    /// Check whether a metric source is set.
    pub fn has_source(&self) -> bool {
        self.shared.read().source.is_some()
    }

    /// Store the body for `template<slot>`.
    pub fn set_template(&self, slot: usize, body: impl Into<String>) -> Result<()> {
        check_slot(slot)?;
        self.shared.write().templates[slot] = Some(body.into());
        Ok(())
    }

    /// The body stored for `template<slot>`.
    pub fn template(&self, slot: usize) -> Result<Option<String>> {
        check_slot(slot)?;
        Ok(self.shared.read().templates[slot].clone())
    }

    /// Current cleanup configuration.
    pub fn cleanup_config(&self) -> CacheCleanupConfig {
        self.shared.read().cleanup
    }

    /// Replace the cleanup configuration.
    ///
    /// A running janitor re-reads the interval immediately instead of
    /// finishing its current wait.
    pub fn set_cleanup_config(&self, config: CacheCleanupConfig) -> Result<()> {
        config.validate()?;
        self.shared.write().cleanup = config;
        self.janitor.reschedule();
        Ok(())
    }

    /// Change the scroll animation tick.
    pub fn set_scroll_tick(&self, tick: Duration) -> Result<()> {
        check_tick(tick)?;
        self.shared.write().scroll.set_tick(tick);
        Ok(())
    }

    /// Cached output of `command`, re-running it once `ttl` has passed.
    pub fn get_or_compute(&self, command: &str, ttl: Duration) -> String {
        self.shared.get_or_compute(command, ttl)
    }

    /// Scroll window for `key`, as `${scroll}` computes it.
    pub fn scroll_window(&self, key: &str, text: &str, width: usize, step: usize) -> String {
        self.shared.scroll_window(key, text, width, step)
    }

    /// Evict stale cache entries now.
    pub fn sweep(&self) -> SweepReport {
        self.shared.sweep()
    }

    /// Start the background janitor. Returns `false` if already running.
    pub fn start_janitor(&self) -> bool {
        self.janitor.start(Arc::downgrade(&self.shared))
    }

    /// Stop the background janitor and join its thread. Returns `false` if
    /// it was not running.
    pub fn stop_janitor(&self) -> bool {
        self.janitor.stop()
    }

    /// Check whether the background janitor is running.
    pub fn janitor_running(&self) -> bool {
        self.janitor.is_running()
    }

    /// Cache entry counts and sweep total.
    pub fn cache_stats(&self) -> CacheStats {
        self.shared.stats()
    }

    /// Registered directive names, sorted.
    pub fn directive_names(&self) -> Vec<String> {
        self.shared
            .registry
            .directive_names()
            .map(String::from)
            .collect()
    }

    /// Registered predicate names, sorted.
    pub fn predicate_names(&self) -> Vec<String> {
        self.shared
            .registry
            .predicate_names()
            .map(String::from)
            .collect()
    }

    /// Report structural problems and unknown names in a template.
    pub fn check(&self, text: &str) -> Vec<Diagnostic> {
        check::check(text, &self.shared.registry)
    }
}

fn check_slot(slot: usize) -> Result<()> {
    if slot >= TEMPLATE_SLOTS {
        return Err(ConkyError::InvalidTemplateSlot { slot });
    }
    Ok(())
}

fn check_tick(tick: Duration) -> Result<()> {
    if tick.is_zero() {
        return Err(ConkyError::ConfigValidationError {
            message: "scroll interval must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Configures and builds an [`Engine`].
///
/// # Example
///
/// ```
/// use conkytext::clock::ManualClock;
/// use conkytext::engine::Engine;
/// use conkytext::shell::RecordingExecutor;
/// use std::sync::Arc;
///
/// let engine = Engine::builder()
///     .clock(Arc::new(ManualClock::new()))
///     .executor(Arc::new(RecordingExecutor::new()))
///     .template(0, "[\\1]")
///     .janitor(false)
///     .build()
///     .unwrap();
///
/// assert!(!engine.janitor_running());
/// ```
pub struct EngineBuilder {
    source: Option<Arc<dyn MetricSource>>,
    clock: Arc<dyn Clock>,
    executor: Arc<dyn Executor>,
    cleanup: CacheCleanupConfig,
    scroll_tick: Duration,
    templates: Vec<(usize, String)>,
    registry: Registry,
    janitor: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            source: None,
            clock: Arc::new(SystemClock),
            executor: Arc::new(ShellExecutor::new()),
            cleanup: CacheCleanupConfig::default(),
            scroll_tick: DEFAULT_SCROLL_TICK,
            templates: Vec::new(),
            registry: Registry::with_builtins(),
            janitor: true,
        }
    }
}

impl EngineBuilder {
    /// Set the metric source.
    pub fn source(mut self, source: Arc<dyn MetricSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the clock used for cache expiry, scrolling and `time`.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the executor behind `exec`-class directives.
    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Set the cache cleanup configuration.
    pub fn cleanup(mut self, cleanup: CacheCleanupConfig) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set the scroll animation tick.
    pub fn scroll_tick(mut self, tick: Duration) -> Self {
        self.scroll_tick = tick;
        self
    }

    /// Store a template body.
    pub fn template(mut self, slot: usize, body: impl Into<String>) -> Self {
        self.templates.push((slot, body.into()));
        self
    }

    /// Register an extra directive, replacing a built-in of the same name.
    pub fn directive(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.registry.directive(name, handler);
        self
    }

    /// Register an extra predicate (name includes `if_`).
    pub fn predicate(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.registry.predicate(name, predicate);
        self
    }

    /// Whether to start the janitor on build. Defaults to `true`.
    pub fn janitor(mut self, start: bool) -> Self {
        self.janitor = start;
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<Engine> {
        self.cleanup.validate()?;
        check_tick(self.scroll_tick)?;
        for (slot, _) in &self.templates {
            check_slot(*slot)?;
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Engine {
        let mut templates: [Option<String>; TEMPLATE_SLOTS] = Default::default();
        for (slot, body) in self.templates {
            if let Some(entry) = templates.get_mut(slot) {
                *entry = Some(body);
            }
        }

        let state = State {
            source: self.source,
            exec: ExecCache::new(),
            scroll: ScrollAnimator::new(self.scroll_tick),
            cleanup: self.cleanup,
            templates,
        };
        let engine = Engine {
            shared: Arc::new(Shared::new(
                state,
                self.clock,
                self.executor,
                self.registry,
            )),
            janitor: CacheJanitor::new(),
        };
        if self.janitor {
            engine.start_janitor();
        }
        tracing::debug!(
            "engine built with {} directives and {} predicates",
            engine.shared.registry.directive_names().count(),
            engine.shared.registry.predicate_names().count()
        );
        engine
    }
}
