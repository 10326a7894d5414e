//! Built-in `if_*` predicates.
//!
//! Predicates receive arguments that have already been expanded, so
//! `${if_match ${cpu} > 50}` compares the current CPU figure.

use std::cmp::Ordering;
use std::path::Path;

use super::context::Context;
use super::resolver::{Args, Registry};

/// Register every built-in predicate.
pub fn register_all(registry: &mut Registry) {
    registry
        .predicate("if_up", if_up)
        .predicate("if_existing", if_existing)
        .predicate("if_running", if_running)
        .predicate("if_match", if_match)
        .predicate("if_empty", if_empty)
        .predicate("if_mounted", if_mounted)
        .predicate("if_mixer_mute", if_mixer_mute)
        // No MPD, gateway or XMMS2 collectors exist; these never hold.
        .predicate("if_mpd_playing", never)
        .predicate("if_gw", never)
        .predicate("if_xmms2_connected", never);
}

fn if_up(ctx: &Context<'_>, args: &Args<'_>) -> bool {
    let Some(iface) = args.get(0) else {
        return false;
    };
    ctx.source()
        .network()
        .interfaces
        .get(iface)
        .is_some_and(|stats| stats.primary_address().is_some())
}

/// `if_existing <path> [text]`: the path exists and, with text, the file
/// contains it.
fn if_existing(_: &Context<'_>, args: &Args<'_>) -> bool {
    let Some(path) = args.get(0) else {
        return false;
    };
    let path = Path::new(path);
    let needle = args.rest(1);
    if needle.is_empty() {
        return path.exists();
    }
    std::fs::read_to_string(path)
        .map(|contents| contents.contains(needle))
        .unwrap_or(false)
}

fn if_running(ctx: &Context<'_>, args: &Args<'_>) -> bool {
    let name = args.text();
    if name.is_empty() {
        return false;
    }
    let processes = ctx.source().processes();
    processes
        .top_cpu
        .iter()
        .chain(processes.top_mem.iter())
        .any(|p| p.name.contains(name))
}

fn if_mounted(ctx: &Context<'_>, args: &Args<'_>) -> bool {
    args.get(0)
        .is_some_and(|mount| ctx.source().filesystems().mounts.contains_key(mount))
}

fn if_mixer_mute(ctx: &Context<'_>, _: &Args<'_>) -> bool {
    ctx.source().audio().muted
}

fn if_empty(_: &Context<'_>, args: &Args<'_>) -> bool {
    args.text().trim().is_empty()
}

fn never(_: &Context<'_>, _: &Args<'_>) -> bool {
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Op {
    // Two-character operators first so `>=` is not read as `>`.
    const ALL: [(&'static str, Op); 6] = [
        ("==", Op::Eq),
        ("!=", Op::Ne),
        (">=", Op::Ge),
        ("<=", Op::Le),
        (">", Op::Gt),
        ("<", Op::Lt),
    ];

    fn prefix(text: &str) -> Option<(Op, &str)> {
        Self::ALL
            .iter()
            .find_map(|(symbol, op)| text.strip_prefix(symbol).map(|rest| (*op, rest)))
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Ge => ordering != Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            Op::Gt => ordering == Ordering::Greater,
            Op::Lt => ordering == Ordering::Less,
        }
    }
}

/// `if_match <lhs> [op] <rhs>`.
///
/// Accepts `a == b`, `a ==b` and plain `a b` (equality). Operands may be
/// double-quoted. A single operand holds when it is non-empty and not zero.
///
/// This is looser than plain string equality:
///
/// - `!=`, `<`, `<=`, `>` and `>=` are understood as well as `==`.
/// - When both operands parse as numbers they compare numerically, so
///   `5.0 == 5` holds and `10 > 9` is not a string comparison.
/// - If either side is not a number both compare as strings, so
///   `10 > 9x` is false because `"10" < "9x"`.
/// - A lone `0` or `0.0` is false even though it is non-empty.
fn if_match(_: &Context<'_>, args: &Args<'_>) -> bool {
    let text = args.text();
    if text.is_empty() {
        return false;
    }

    let (lhs, rest) = split_operand(text);
    if rest.is_empty() {
        return truthy(lhs);
    }
    let (op, rhs) = match Op::prefix(rest) {
        Some((op, rhs)) => (op, rhs.trim()),
        None => (Op::Eq, rest),
    };

    op.holds(compare(lhs, unquote(rhs)))
}

/// Split off the first operand, honoring double quotes.
fn split_operand(text: &str) -> (&str, &str) {
    if let Some(inner) = text.strip_prefix('"') {
        if let Some(end) = inner.find('"') {
            return (&inner[..end], inner[end + 1..].trim_start());
        }
    }
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn truthy(value: &str) -> bool {
    match value.parse::<f64>() {
        Ok(n) => n != 0.0,
        Err(_) => !value.is_empty(),
    }
}

fn compare(lhs: &str, rhs: &str) -> Ordering {
    match (lhs.parse::<f64>(), rhs.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => lhs.cmp(rhs),
    }
}
