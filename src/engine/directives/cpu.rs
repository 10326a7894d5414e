//! CPU usage and frequency.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Index, Registry};
use crate::engine::widget::WidgetKind;
use crate::format::{format_percent, format_tenths};
use crate::metrics::CpuInfo;

use super::{selector_and_rest, widget, ZERO};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("cpu", cpu)
        .directive("freq", freq)
        .directive("freq_g", freq_g)
        .directive("cpubar", cpubar)
        .directive("cpugauge", cpugauge)
        .directive("cpugraph", cpugraph)
        .directive("loadgraph", loadgraph);
}

/// Usage for `cpuN`, `N` or the aggregate. `None` when out of range.
fn usage(info: &CpuInfo, arg: Option<&str>) -> Option<f64> {
    match Index::parse(core_number(arg), info.cores.len()) {
        Index::Aggregate => Some(info.usage_percent),
        Index::At(i) => Some(info.cores[i].usage_percent),
        Index::OutOfRange => None,
    }
}

/// Frequency in MHz for core `N` or the average.
fn frequency(info: &CpuInfo, arg: Option<&str>) -> Option<f64> {
    match Index::parse(arg, info.cores.len()) {
        Index::Aggregate => Some(info.average_frequency_mhz()),
        Index::At(i) => Some(info.cores[i].frequency_mhz),
        Index::OutOfRange => None,
    }
}

/// Accept the `cpu0` spelling for the aggregate, `cpuN` for core `N`.
fn core_number(arg: Option<&str>) -> Option<&str> {
    arg.map(|a| match a.strip_prefix("cpu") {
        Some("0") => "",
        Some(n) => n,
        None => a,
    })
}

fn cpu(ctx: &Context<'_>, args: &Args<'_>) -> String {
    usage(&ctx.source().cpu(), args.get(0))
        .map(format_percent)
        .unwrap_or_else(|| ZERO.to_string())
}

fn freq(ctx: &Context<'_>, args: &Args<'_>) -> String {
    frequency(&ctx.source().cpu(), args.get(0))
        .map(|mhz| format!("{:.0}", mhz))
        .unwrap_or_else(|| ZERO.to_string())
}

fn freq_g(ctx: &Context<'_>, args: &Args<'_>) -> String {
    frequency(&ctx.source().cpu(), args.get(0))
        .map(|mhz| format_tenths(mhz / 1000.0))
        .unwrap_or_else(|| ZERO.to_string())
}

fn cpu_widget(ctx: &Context<'_>, args: &Args<'_>, kind: WidgetKind) -> String {
    let (core, rest) = selector_and_rest(args);
    let value = usage(&ctx.source().cpu(), core).unwrap_or(0.0);
    widget(kind, value, rest)
}

fn cpubar(ctx: &Context<'_>, args: &Args<'_>) -> String {
    cpu_widget(ctx, args, WidgetKind::Bar)
}

fn cpugauge(ctx: &Context<'_>, args: &Args<'_>) -> String {
    cpu_widget(ctx, args, WidgetKind::Gauge)
}

fn cpugraph(ctx: &Context<'_>, args: &Args<'_>) -> String {
    cpu_widget(ctx, args, WidgetKind::Graph)
}

fn loadgraph(ctx: &Context<'_>, args: &Args<'_>) -> String {
    widget(WidgetKind::Graph, ctx.source().uptime().load[0], args.as_slice())
}
