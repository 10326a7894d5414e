//! Network interfaces.
//!
//! Every directive takes the interface name as its first argument. An
//! unknown interface yields the sentinel for the directive's unit.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};
use crate::engine::widget::WidgetKind;
use crate::format::{format_bytes, format_kib};
use crate::metrics::InterfaceStats;

use super::{widget, ZERO, ZERO_BYTES};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("downspeed", |ctx, args| bytes(ctx, args, |s| s.rx_rate))
        .directive("upspeed", |ctx, args| bytes(ctx, args, |s| s.tx_rate))
        .directive("totaldown", |ctx, args| bytes(ctx, args, |s| s.rx_bytes))
        .directive("totalup", |ctx, args| bytes(ctx, args, |s| s.tx_bytes))
        .directive("downspeedf", |ctx, args| kib(ctx, args, |s| s.rx_rate))
        .directive("upspeedf", |ctx, args| kib(ctx, args, |s| s.tx_rate))
        .directive("addr", addr)
        .directive("addrs", addrs)
        .directive("wireless_essid", wireless_essid)
        .directive("downspeedgraph", |ctx, args| graph(ctx, args, |s| s.rx_rate))
        .directive("upspeedgraph", |ctx, args| graph(ctx, args, |s| s.tx_rate));
}

fn interface(ctx: &Context<'_>, args: &Args<'_>) -> Option<InterfaceStats> {
    let name = args.get(0)?;
    ctx.source().network().interfaces.remove(name)
}

fn bytes(ctx: &Context<'_>, args: &Args<'_>, field: fn(&InterfaceStats) -> u64) -> String {
    interface(ctx, args)
        .map(|stats| format_bytes(field(&stats)))
        .unwrap_or_else(|| ZERO_BYTES.to_string())
}

fn kib(ctx: &Context<'_>, args: &Args<'_>, field: fn(&InterfaceStats) -> u64) -> String {
    interface(ctx, args)
        .map(|stats| format_kib(field(&stats)))
        .unwrap_or_else(|| ZERO.to_string())
}

fn graph(ctx: &Context<'_>, args: &Args<'_>, field: fn(&InterfaceStats) -> u64) -> String {
    let value = interface(ctx, args).map(|s| field(&s) as f64).unwrap_or(0.0);
    widget(WidgetKind::Graph, value, args.tail(1))
}

fn addr(ctx: &Context<'_>, args: &Args<'_>) -> String {
    interface(ctx, args)
        .and_then(|stats| stats.primary_address().map(ToString::to_string))
        .unwrap_or_default()
}

/// All IPv4 addresses, comma separated.
fn addrs(ctx: &Context<'_>, args: &Args<'_>) -> String {
    interface(ctx, args)
        .map(|stats| {
            stats
                .addresses
                .iter()
                .filter(|a| a.is_ipv4())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn wireless_essid(ctx: &Context<'_>, args: &Args<'_>) -> String {
    interface(ctx, args)
        .and_then(|stats| stats.essid)
        .unwrap_or_default()
}
