//! Command output, scrolling text and user templates.

use std::time::Duration;

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("exec", exec)
        .directive("execi", execi)
        .directive("execp", |ctx, args| ctx.expand(&exec(ctx, args)))
        .directive("execpi", |ctx, args| ctx.expand(&execi(ctx, args)))
        .directive("scroll", scroll)
        .directive("template0", template::<0>)
        .directive("template1", template::<1>)
        .directive("template2", template::<2>)
        .directive("template3", template::<3>)
        .directive("template4", template::<4>)
        .directive("template5", template::<5>)
        .directive("template6", template::<6>)
        .directive("template7", template::<7>)
        .directive("template8", template::<8>)
        .directive("template9", template::<9>);
}

/// `exec <command>`: run on every evaluation.
fn exec(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let command = args.text();
    if command.is_empty() {
        return String::new();
    }
    ctx.run(command)
}

/// `execi <interval> <command>`: run at most once per interval seconds.
fn execi(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let Some(interval) = args.get(0).and_then(parse_interval) else {
        return String::new();
    };
    let command = args.rest(1);
    if command.is_empty() {
        return String::new();
    }
    ctx.run_cached(command, interval)
}

/// A finite, non-negative number of seconds.
fn parse_interval(arg: &str) -> Option<Duration> {
    let secs = arg.parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

/// `scroll <width> <step> <text>`
///
/// The animation state is keyed by the literal arguments; the text is
/// expanded before windowing.
fn scroll(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let width = args.get(0).and_then(|w| w.parse::<usize>().ok());
    let step = args.get(1).and_then(|s| s.parse::<usize>().ok());
    let text = args.rest(2);
    let (Some(width), Some(step)) = (width, step) else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }
    ctx.scroll(args.text(), &ctx.expand(text), width, step)
}

/// `templateN [arg...]`: substitute `\1`..`\9`, then expand.
fn template<const N: usize>(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let Some(body) = ctx.template(N) else {
        return String::new();
    };
    ctx.expand(&substitute(&body, args.as_slice()))
}

/// Replace `\1`..`\9` with positional arguments. Placeholders without an
/// argument stay literal.
fn substitute(body: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let arg = chars
                .peek()
                .and_then(|d| d.to_digit(10))
                .filter(|d| (1..=9).contains(d))
                .and_then(|d| args.get(d as usize - 1));
            if let Some(arg) = arg {
                out.push_str(arg);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}
