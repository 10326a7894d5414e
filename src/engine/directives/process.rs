//! Process counts and top lists.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Index, Registry};
use crate::format::format_bytes;
use crate::metrics::ProcessStat;

use super::{ZERO, ZERO_BYTES};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("processes", |ctx, _| ctx.source().processes().total.to_string())
        .directive("running_processes", |ctx, _| {
            ctx.source().processes().running.to_string()
        })
        .directive("threads", |ctx, _| ctx.source().processes().threads.to_string())
        .directive("running_threads", |ctx, _| {
            ctx.source().processes().running_threads.to_string()
        })
        .directive("top", top)
        .directive("top_mem", top_mem);
}

/// `top <field> <n>`: field of the n-th process by CPU usage.
fn top(ctx: &Context<'_>, args: &Args<'_>) -> String {
    ranked(&ctx.source().processes().top_cpu, args)
}

/// `top_mem <field> <n>`: field of the n-th process by memory usage.
fn top_mem(ctx: &Context<'_>, args: &Args<'_>) -> String {
    ranked(&ctx.source().processes().top_mem, args)
}

fn ranked(list: &[ProcessStat], args: &Args<'_>) -> String {
    let field = args.get(0).unwrap_or("name");
    let process = match Index::parse(args.get(1), list.len()) {
        Index::At(i) => list.get(i),
        // A top list has no aggregate.
        Index::Aggregate | Index::OutOfRange => None,
    };

    match (field, process) {
        ("name", Some(p)) => p.name.clone(),
        ("pid", Some(p)) => p.pid.to_string(),
        ("cpu", Some(p)) => format!("{:.2}", p.cpu_percent),
        ("mem", Some(p)) => format!("{:.2}", p.mem_percent),
        ("mem_res", Some(p)) => format_bytes(p.mem_bytes),
        ("pid" | "cpu" | "mem", None) => ZERO.to_string(),
        ("mem_res", None) => ZERO_BYTES.to_string(),
        _ => String::new(),
    }
}
