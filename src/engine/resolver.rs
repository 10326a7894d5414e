//! Directive and predicate registry.
//!
//! Every directive name maps to a plain handler function. Handlers are
//! total: whatever the arguments, they return display text, falling back to
//! the sentinels `""`, `"0"` or `"0B"` when a lookup key is missing.

use std::collections::BTreeMap;

use super::context::Context;

/// Resolves one variable directive.
pub type Handler = fn(&Context<'_>, &Args<'_>) -> String;

/// Evaluates one `if_*` predicate.
pub type Predicate = fn(&Context<'_>, &Args<'_>) -> bool;

/// Whitespace-separated directive arguments.
///
/// Keeps the original argument text so handlers that take free text
/// (`exec`, `scroll`, `if_empty`) see the user's spacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args<'a> {
    text: &'a str,
    list: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Split `text` into arguments.
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.trim(),
            list: text.split_whitespace().collect(),
        }
    }

    /// The `index`-th argument (0-based).
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.list.get(index).copied()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The full argument text, trimmed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// All arguments as a slice.
    pub fn as_slice(&self) -> &[&'a str] {
        &self.list
    }

    /// Arguments from `index` onwards.
    pub fn tail(&self, index: usize) -> &[&'a str] {
        self.list.get(index..).unwrap_or(&[])
    }

    /// Raw text after the first `skip` arguments, inner spacing preserved.
    pub fn rest(&self, skip: usize) -> &'a str {
        let mut rest = self.text;
        for _ in 0..skip {
            match rest.find(char::is_whitespace) {
                Some(pos) => rest = rest[pos..].trim_start(),
                None => return "",
            }
        }
        rest
    }
}

/// How an optional 1-based index argument selects among `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// No argument, or one that is not an integer: use the aggregate.
    Aggregate,
    /// A valid 0-based position.
    At(usize),
    /// An integer outside `1..=len`.
    OutOfRange,
}

impl Index {
    /// Interpret `arg` against a collection of `len` items.
    pub fn parse(arg: Option<&str>, len: usize) -> Self {
        let Some(value) = arg.and_then(|a| a.parse::<i64>().ok()) else {
            return Index::Aggregate;
        };
        match usize::try_from(value) {
            Ok(n) if n >= 1 && n <= len => Index::At(n - 1),
            _ => Index::OutOfRange,
        }
    }
}

/// Name-to-function tables for directives and predicates.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    directives: BTreeMap<String, Handler>,
    predicates: BTreeMap<String, Predicate>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in directive and predicate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::directives::register_all(&mut registry);
        super::predicates::register_all(&mut registry);
        registry
    }

    /// Register (or replace) a directive handler.
    pub fn directive(&mut self, name: impl Into<String>, handler: Handler) -> &mut Self {
        self.directives.insert(name.into(), handler);
        self
    }

    /// Register (or replace) a predicate. The name includes the `if_` prefix.
    pub fn predicate(&mut self, name: impl Into<String>, predicate: Predicate) -> &mut Self {
        self.predicates.insert(name.into(), predicate);
        self
    }

    /// Look up a directive handler.
    pub fn handler(&self, name: &str) -> Option<Handler> {
        self.directives.get(name).copied()
    }

    /// Look up a predicate.
    pub fn condition(&self, name: &str) -> Option<Predicate> {
        self.predicates.get(name).copied()
    }

    /// Registered directive names, sorted.
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }

    /// Registered predicate names, sorted.
    pub fn predicate_names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }
}
