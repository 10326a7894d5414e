//! Template diagnostics.
//!
//! Rendering never fails, so mistakes in a template show up only as odd
//! output. [`check`] reports them instead: unbalanced conditional markers
//! and names the engine does not know.

use serde::Serialize;

use super::conditional::{build, Node};
use super::lexer::{tokenize, Directive};
use super::resolver::Registry;

/// Severity level for template diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Output is probably not what was intended.
    Warning,
    /// Template structure is broken.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One problem found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Short kebab-case identifier, e.g. `unclosed-if`.
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Line of the offending directive (1-indexed).
    pub line: usize,
    /// Column of the offending directive in characters (1-indexed).
    pub column: usize,
    /// The directive as written.
    pub directive: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn new(
        code: &'static str,
        severity: Severity,
        message: impl Into<String>,
        source: &str,
        directive: &Directive,
    ) -> Self {
        let (line, column) = line_col(source, directive.offset);
        Self {
            code,
            severity,
            message: message.into(),
            line,
            column,
            directive: directive.raw.clone(),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}[{}]: {}",
            self.line, self.column, self.severity, self.code, self.message
        )
    }
}

/// Check a template against the names known to `registry`.
///
/// Diagnostics come back in source order.
pub fn check(source: &str, registry: &Registry) -> Vec<Diagnostic> {
    let nodes = build(tokenize(source));
    let mut diagnostics = Vec::new();
    walk(&nodes, false, source, registry, &mut diagnostics);
    diagnostics.sort_by_key(|d| (d.line, d.column));
    diagnostics
}

fn walk(
    nodes: &[Node],
    in_else: bool,
    source: &str,
    registry: &Registry,
    out: &mut Vec<Diagnostic>,
) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Var(d) if d.is_conditional() => out.push(
                Diagnostic::new(
                    "unclosed-if",
                    Severity::Error,
                    format!("`{}` has no matching ${{endif}}; it renders as a plain variable", d.raw),
                    source,
                    d,
                )
                .with_suggestion("add ${endif} where the block should end"),
            ),
            Node::Var(d) if d.is_else() && in_else => out.push(Diagnostic::new(
                "duplicate-else",
                Severity::Error,
                "second ${else} in the same block renders verbatim",
                source,
                d,
            )),
            Node::Var(d) if d.is_else() => out.push(Diagnostic::new(
                "orphan-else",
                Severity::Error,
                "${else} outside any conditional block renders verbatim",
                source,
                d,
            )),
            Node::Var(d) if d.is_endif() => out.push(Diagnostic::new(
                "orphan-endif",
                Severity::Error,
                "${endif} without an open conditional block renders verbatim",
                source,
                d,
            )),
            Node::Var(d) => {
                if registry.handler(&d.name).is_none() {
                    out.push(Diagnostic::new(
                        "unknown-directive",
                        Severity::Warning,
                        format!("unknown directive `{}` renders verbatim", d.name),
                        source,
                        d,
                    ));
                }
            }
            Node::Block(block) => {
                let condition = &block.condition;
                if registry.condition(&condition.name).is_none() {
                    out.push(Diagnostic::new(
                        "unknown-predicate",
                        Severity::Warning,
                        format!("unknown predicate `{}` is always false", condition.name),
                        source,
                        condition,
                    ));
                }
                walk(&block.then_branch, false, source, registry, out);
                if let Some(else_branch) = &block.else_branch {
                    walk(else_branch, true, source, registry, out);
                }
            }
        }
    }
}

/// 1-indexed line and character column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
