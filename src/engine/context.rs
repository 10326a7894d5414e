//! Template rendering.
//!
//! A [`Context`] is the view handlers get of one evaluation: the metric
//! source snapshot taken at the start of `parse`, the engine caches, and the
//! current re-expansion depth.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::metrics::MetricSource;

use super::conditional::{build, Node};
use super::lexer::{has_directives, tokenize, Directive};
use super::resolver::Args;
use super::state::{Shared, TEMPLATE_SLOTS};

/// Deepest re-expansion (templates, `execp`, nested arguments) followed
/// before text is returned unexpanded.
pub const MAX_DEPTH: usize = 16;

/// Evaluation context passed to every handler.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    shared: &'a Shared,
    source: &'a dyn MetricSource,
    depth: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(shared: &'a Shared, source: &'a dyn MetricSource) -> Self {
        Self {
            shared,
            source,
            depth: 0,
        }
    }

    /// The metric source for this evaluation.
    pub fn source(&self) -> &'a dyn MetricSource {
        self.source
    }

    /// Current time from the engine clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.shared.clock.now()
    }

    /// How many re-expansions deep this context is.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render matched nodes.
    pub fn render(&self, nodes: &[Node]) -> String {
        let mut out = String::new();
        self.render_into(nodes, &mut out);
        out
    }

    fn render_into(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Var(directive) => out.push_str(&self.resolve(directive)),
                Node::Block(block) => {
                    if self.evaluate(&block.condition) {
                        self.render_into(&block.then_branch, out);
                    } else if let Some(else_branch) = &block.else_branch {
                        self.render_into(else_branch, out);
                    }
                }
            }
        }
    }

    /// Parse and render `text` one level deeper.
    pub fn expand(&self, text: &str) -> String {
        if !has_directives(text) {
            return text.to_string();
        }
        if self.depth >= MAX_DEPTH {
            tracing::warn!("expansion deeper than {} levels, leaving text as is", MAX_DEPTH);
            return text.to_string();
        }
        let child = Context {
            depth: self.depth + 1,
            ..*self
        };
        child.render(&build(tokenize(text)))
    }

    /// Resolve a variable directive; unknown names come back verbatim.
    pub fn resolve(&self, directive: &Directive) -> String {
        match self.shared.registry.handler(&directive.name) {
            Some(handler) => handler(self, &Args::new(&directive.arg_text)),
            None => directive.raw.clone(),
        }
    }

    /// Evaluate an `if_*` predicate; unknown predicates are false.
    ///
    /// Arguments are expanded first so predicates may test other
    /// directives.
    pub fn evaluate(&self, condition: &Directive) -> bool {
        let Some(predicate) = self.shared.registry.condition(&condition.name) else {
            tracing::debug!("unknown predicate `{}`", condition.name);
            return false;
        };
        let expanded = self.expand(&condition.arg_text);
        predicate(self, &Args::new(&expanded))
    }

    /// Run a command uncached; trimmed output or `""` on failure.
    pub fn run(&self, command: &str) -> String {
        self.shared.run(command)
    }

    /// Run a command through the exec cache.
    pub fn run_cached(&self, command: &str, ttl: Duration) -> String {
        self.shared.get_or_compute(command, ttl)
    }

    /// Scroll window for `key`.
    pub fn scroll(&self, key: &str, text: &str, width: usize, step: usize) -> String {
        self.shared.scroll_window(key, text, width, step)
    }

    /// Body stored in a template slot.
    pub fn template(&self, slot: usize) -> Option<String> {
        if slot >= TEMPLATE_SLOTS {
            return None;
        }
        self.shared.read().templates[slot].clone()
    }
}

/// Render without a metric source: variables stay verbatim and every
/// predicate is false.
pub(crate) fn passthrough(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(directive) => out.push_str(&directive.raw),
            Node::Block(block) => {
                if let Some(else_branch) = &block.else_branch {
                    passthrough(else_branch, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(text: &str) -> String {
        let mut out = String::new();
        passthrough(&build(tokenize(text)), &mut out);
        out
    }

    #[test]
    fn passthrough_keeps_variables_verbatim() {
        assert_eq!(flat("CPU ${cpu 1}% $mem"), "CPU ${cpu 1}% $mem");
    }

    #[test]
    fn passthrough_takes_else_branches() {
        assert_eq!(flat("${if_up eth0}UP${else}DOWN${endif}"), "DOWN");
        assert_eq!(flat("a${if_up eth0}UP${endif}b"), "ab");
    }

    #[test]
    fn passthrough_unescapes_dollars() {
        assert_eq!(flat("cost $$5"), "cost $5");
    }
}
