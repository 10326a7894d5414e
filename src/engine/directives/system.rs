//! Host identity, uptime, load and clock.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Index, Registry};
use crate::engine::VERSION;
use crate::format::{format_uptime, format_uptime_short};

use super::ZERO;

/// Format used by `time` and `utime` without an argument.
const DEFAULT_TIME_FORMAT: &str = "%F %T";

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("nodename", |ctx, _| ctx.source().system().hostname)
        .directive("nodename_short", nodename_short)
        .directive("kernel", |ctx, _| ctx.source().system().kernel)
        .directive("sysname", |ctx, _| ctx.source().system().sysname)
        .directive("machine", |ctx, _| ctx.source().system().machine)
        .directive("conky_version", |_, _| VERSION.to_string())
        .directive("uptime", |ctx, _| format_uptime(ctx.source().uptime().seconds))
        .directive("uptime_short", |ctx, _| {
            format_uptime_short(ctx.source().uptime().seconds)
        })
        .directive("loadavg", loadavg)
        .directive("time", time)
        .directive("utime", utime);
}

fn nodename_short(ctx: &Context<'_>, _: &Args<'_>) -> String {
    let hostname = ctx.source().system().hostname;
    hostname.split('.').next().unwrap_or_default().to_string()
}

/// `loadavg [1|2|3]`: one average, or all three without an argument.
fn loadavg(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let load = ctx.source().uptime().load;
    match Index::parse(args.get(0), load.len()) {
        Index::Aggregate => load
            .iter()
            .map(|l| format!("{:.2}", l))
            .collect::<Vec<_>>()
            .join(" "),
        Index::At(i) => format!("{:.2}", load[i]),
        Index::OutOfRange => ZERO.to_string(),
    }
}

/// `time [format]` in local time.
fn time(ctx: &Context<'_>, args: &Args<'_>) -> String {
    strftime(ctx.now().with_timezone(&Local), args.text())
}

/// `utime [format]` in UTC.
fn utime(ctx: &Context<'_>, args: &Args<'_>) -> String {
    strftime::<Utc>(ctx.now(), args.text())
}

fn strftime<Tz: TimeZone>(at: DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let format = if format.is_empty() {
        DEFAULT_TIME_FORMAT
    } else {
        format
    };
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::warn!("invalid time format `{}`", format);
        return String::new();
    }
    at.format_with_items(items.into_iter()).to_string()
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::{engine_parts, engine_with};
    use chrono::DateTime;

    const SNAPSHOT: &str = "
system:
  hostname: box.example.org
  kernel: 6.8.0-45-generic
  sysname: Linux
  machine: x86_64
uptime:
  seconds: 93784
  load: [0.5, 1.25, 2.126]
";

    #[test]
    fn identity() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(
            engine.parse("${nodename} ${nodename_short} ${sysname} ${kernel} ${machine}"),
            "box.example.org box Linux 6.8.0-45-generic x86_64"
        );
        assert_eq!(engine.parse("${conky_version}"), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn uptime_forms() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${uptime}"), "1d 2h 3m 4s");
        assert_eq!(engine.parse("${uptime_short}"), "1d 2h 3m");
    }

    #[test]
    fn load_averages() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${loadavg}"), "0.50 1.25 2.13");
        assert_eq!(engine.parse("${loadavg 2}"), "1.25");
        assert_eq!(engine.parse("${loadavg 4}"), "0");
    }

    #[test]
    fn utime_uses_engine_clock() {
        let (engine, clock, _) = engine_parts(SNAPSHOT);
        clock.set(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        assert_eq!(engine.parse("${utime}"), "2023-11-14 22:13:20");
        assert_eq!(engine.parse("${utime %H:%M}"), "22:13");
    }

    #[test]
    fn invalid_time_format_is_empty() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${utime %Q}"), "");
        assert!(!engine.parse("${time}").is_empty());
    }
}
