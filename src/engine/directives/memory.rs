//! Memory and swap.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};
use crate::engine::widget::WidgetKind;
use crate::format::{format_bytes, ratio_percent};

use super::{percent_of, widget};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("mem", |ctx, _| format_bytes(ctx.source().memory().used))
        .directive("memmax", |ctx, _| format_bytes(ctx.source().memory().total))
        .directive("memfree", |ctx, _| format_bytes(ctx.source().memory().free))
        .directive("memeasyfree", |ctx, _| {
            format_bytes(ctx.source().memory().available)
        })
        .directive("buffers", |ctx, _| format_bytes(ctx.source().memory().buffers))
        .directive("cached", |ctx, _| format_bytes(ctx.source().memory().cached))
        .directive("memperc", memperc)
        .directive("swap", |ctx, _| format_bytes(ctx.source().memory().swap_used))
        .directive("swapmax", |ctx, _| format_bytes(ctx.source().memory().swap_total))
        .directive("swapfree", |ctx, _| format_bytes(ctx.source().memory().swap_free))
        .directive("swapperc", swapperc)
        .directive("membar", |ctx, args| mem_widget(ctx, args, WidgetKind::Bar))
        .directive("memgauge", |ctx, args| mem_widget(ctx, args, WidgetKind::Gauge))
        .directive("memgraph", |ctx, args| mem_widget(ctx, args, WidgetKind::Graph))
        .directive("swapbar", swapbar);
}

fn memperc(ctx: &Context<'_>, _: &Args<'_>) -> String {
    let mem = ctx.source().memory();
    ratio_percent(mem.used, mem.total)
}

fn swapperc(ctx: &Context<'_>, _: &Args<'_>) -> String {
    let mem = ctx.source().memory();
    ratio_percent(mem.swap_used, mem.swap_total)
}

fn mem_widget(ctx: &Context<'_>, args: &Args<'_>, kind: WidgetKind) -> String {
    let mem = ctx.source().memory();
    widget(kind, percent_of(mem.used, mem.total), args.as_slice())
}

fn swapbar(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let mem = ctx.source().memory();
    widget(
        WidgetKind::Bar,
        percent_of(mem.swap_used, mem.swap_total),
        args.as_slice(),
    )
}
