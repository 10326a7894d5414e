//! Filesystems and disk I/O.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};
use crate::engine::widget::{size_and_rest, WidgetKind, WidgetMarker};
use crate::format::{format_bytes, ratio_percent};
use crate::metrics::{DiskStats, MountStats};

use super::{percent_of, selector_and_rest, widget, ZERO, ZERO_BYTES};

/// Mount point used when none is given.
const ROOT: &str = "/";

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("fs_used", |ctx, args| fs_bytes(ctx, args, |m| m.used))
        .directive("fs_size", |ctx, args| fs_bytes(ctx, args, |m| m.total))
        .directive("fs_free", |ctx, args| fs_bytes(ctx, args, |m| m.free))
        .directive("fs_used_perc", |ctx, args| fs_perc(ctx, args, |m| m.used))
        .directive("fs_free_perc", |ctx, args| fs_perc(ctx, args, |m| m.free))
        .directive("fs_type", fs_type)
        .directive("fs_bar", |ctx, args| fs_bar(ctx, args, |m| m.used))
        .directive("fs_bar_free", |ctx, args| fs_bar(ctx, args, |m| m.free))
        .directive("diskio", |ctx, args| diskio(ctx, args, |d| d.read_rate.saturating_add(d.write_rate)))
        .directive("diskio_read", |ctx, args| diskio(ctx, args, |d| d.read_rate))
        .directive("diskio_write", |ctx, args| diskio(ctx, args, |d| d.write_rate))
        .directive("diskiograph", |ctx, args| {
            diskio_graph(ctx, args, |d| d.read_rate.saturating_add(d.write_rate))
        })
        .directive("diskiograph_read", |ctx, args| diskio_graph(ctx, args, |d| d.read_rate))
        .directive("diskiograph_write", |ctx, args| diskio_graph(ctx, args, |d| d.write_rate));
}

fn mount(ctx: &Context<'_>, path: Option<&str>) -> Option<MountStats> {
    ctx.source()
        .filesystems()
        .mounts
        .remove(path.unwrap_or(ROOT))
}

fn fs_bytes(ctx: &Context<'_>, args: &Args<'_>, field: fn(&MountStats) -> u64) -> String {
    mount(ctx, args.get(0))
        .map(|m| format_bytes(field(&m)))
        .unwrap_or_else(|| ZERO_BYTES.to_string())
}

fn fs_perc(ctx: &Context<'_>, args: &Args<'_>, field: fn(&MountStats) -> u64) -> String {
    mount(ctx, args.get(0))
        .map(|m| ratio_percent(field(&m), m.total))
        .unwrap_or_else(|| ZERO.to_string())
}

fn fs_type(ctx: &Context<'_>, args: &Args<'_>) -> String {
    mount(ctx, args.get(0))
        .map(|m| m.fs_type)
        .unwrap_or_default()
}

/// `fs_bar [height,width] [mount]`
fn fs_bar(ctx: &Context<'_>, args: &Args<'_>, field: fn(&MountStats) -> u64) -> String {
    let (size, rest) = size_and_rest(args.as_slice());
    let value = mount(ctx, rest.first().copied())
        .map(|m| percent_of(field(&m), m.total))
        .unwrap_or(0.0);
    let (height, width) = size.unwrap_or((0, 0));
    WidgetMarker::new(WidgetKind::Bar, value)
        .with_size(width, height)
        .with_flags(rest.iter().skip(1).map(|s| s.to_string()).collect())
        .encode()
}

/// Throughput of one device, or of all devices without an argument.
fn device(ctx: &Context<'_>, name: Option<&str>) -> Option<DiskStats> {
    let io = ctx.source().disk_io();
    match name {
        None => Some(io.totals()),
        Some(name) => {
            let name = name.strip_prefix("/dev/").unwrap_or(name);
            io.devices.get(name).cloned()
        }
    }
}

fn diskio(ctx: &Context<'_>, args: &Args<'_>, field: fn(&DiskStats) -> u64) -> String {
    device(ctx, args.get(0))
        .map(|d| format_bytes(field(&d)))
        .unwrap_or_else(|| ZERO_BYTES.to_string())
}

fn diskio_graph(ctx: &Context<'_>, args: &Args<'_>, field: fn(&DiskStats) -> u64) -> String {
    let (name, rest) = selector_and_rest(args);
    let value = device(ctx, name).map(|d| field(&d) as f64).unwrap_or(0.0);
    widget(WidgetKind::Graph, value, rest)
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::engine_with;
    use crate::engine::widget::WidgetMarker;

    const SNAPSHOT: &str = "
filesystems:
  mounts:
    /:
      fs_type: ext4
      total: 107374182400
      used: 26843545600
      free: 80530636800
    /home:
      fs_type: btrfs
      total: 1000
      used: 999
      free: 1
disk_io:
  devices:
    sda: { read_rate: 1024, write_rate: 3072 }
    sdb: { read_rate: 1024, write_rate: 0 }
";

    #[test]
    fn filesystem_defaults_to_root() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${fs_used}/${fs_size}"), "25.0GiB/100.0GiB");
        assert_eq!(engine.parse("${fs_free /}"), "75.0GiB");
        assert_eq!(engine.parse("${fs_used_perc} ${fs_free_perc}"), "25 75");
        assert_eq!(engine.parse("${fs_type}"), "ext4");
    }

    #[test]
    fn filesystem_by_mount_point() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${fs_used_perc /home}"), "100");
        assert_eq!(engine.parse("${fs_type /home}"), "btrfs");
    }

    #[test]
    fn missing_mount_sentinels() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${fs_used /mnt}"), "0B");
        assert_eq!(engine.parse("${fs_used_perc /mnt}"), "0");
        assert_eq!(engine.parse("${fs_type /mnt}"), "");
    }

    #[test]
    fn fs_bar_takes_size_then_mount() {
        let engine = engine_with(SNAPSHOT);
        let bar = WidgetMarker::decode(&engine.parse("${fs_bar 6,80 /}")).unwrap();
        assert_eq!(bar.value, 25.0);
        assert_eq!((bar.width, bar.height), (80, 6));
        assert!(bar.flags.is_empty());

        let free = WidgetMarker::decode(&engine.parse("${fs_bar_free}")).unwrap();
        assert_eq!(free.value, 75.0);
    }

    #[test]
    fn disk_io_rates() {
        let engine = engine_with(SNAPSHOT);
        assert_eq!(engine.parse("${diskio}"), "5.0KiB");
        assert_eq!(engine.parse("${diskio sda}"), "4.0KiB");
        assert_eq!(engine.parse("${diskio_read /dev/sda}"), "1.0KiB");
        assert_eq!(engine.parse("${diskio_write sdb}"), "0B");
        assert_eq!(engine.parse("${diskio sdz}"), "0B");
    }

    #[test]
    fn disk_io_graph() {
        let engine = engine_with(SNAPSHOT);
        let graph = WidgetMarker::decode(&engine.parse("${diskiograph_read sda 20,100}")).unwrap();
        assert_eq!(graph.value, 1024.0);
        assert_eq!(graph.width, 100);
    }
}
