//! Hardware monitors, battery and mixer.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};
use crate::engine::widget::{size_and_rest, WidgetKind, WidgetMarker};
use crate::format::{format_percent, format_tenths, format_time_left};
use crate::metrics::{Battery, BatteryStatus};

use super::{widget, ZERO};

pub(super) fn register(registry: &mut Registry) {
    registry
        .directive("hwmon", hwmon)
        .directive("acpitemp", acpitemp)
        .directive("battery", battery)
        .directive("battery_short", battery_short)
        .directive("battery_percent", battery_percent)
        .directive("battery_time", battery_time)
        .directive("battery_status", battery_status)
        .directive("battery_bar", battery_bar)
        .directive("mixer", |ctx, _| format_percent(ctx.source().audio().volume_percent))
        .directive("mixerbar", |ctx, args| {
            widget(WidgetKind::Bar, ctx.source().audio().volume_percent, args.as_slice())
        });
}

/// `hwmon <dev> <type> <n> [factor offset]`
///
/// Reads sensor `<type><n>` of device `<dev>`, scaled as
/// `value * factor + offset`. Temperatures and fan speeds print as whole
/// numbers, other readings with one decimal.
fn hwmon(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let (Some(dev), Some(kind), Some(n)) = (args.get(0), args.get(1), args.get(2)) else {
        return ZERO.to_string();
    };
    let factor = args.get(3).and_then(|f| f.parse::<f64>().ok()).unwrap_or(1.0);
    let offset = args.get(4).and_then(|o| o.parse::<f64>().ok()).unwrap_or(0.0);

    let key = format!("{kind}{n}");
    let Some(raw) = ctx
        .source()
        .hwmon()
        .sensors
        .get(dev)
        .and_then(|readings| readings.get(&key).copied())
    else {
        return ZERO.to_string();
    };

    let value = raw * factor + offset;
    match kind {
        "temp" | "fan" => format_percent(value),
        _ => format_tenths(value),
    }
}

fn acpitemp(ctx: &Context<'_>, _: &Args<'_>) -> String {
    ctx.source()
        .hwmon()
        .acpi_temp
        .map(format_percent)
        .unwrap_or_else(|| ZERO.to_string())
}

fn find_battery(ctx: &Context<'_>, name: Option<&str>) -> Option<Battery> {
    ctx.source().battery().find(name).cloned()
}

/// `charging 80%`, `discharging 45%`, `full` or `unknown`.
fn battery(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let Some(battery) = find_battery(ctx, args.get(0)) else {
        return String::new();
    };
    match battery.status {
        BatteryStatus::Charging | BatteryStatus::Discharging => {
            format!("{} {}%", battery.status.as_str(), format_percent(battery.percent))
        }
        BatteryStatus::Full | BatteryStatus::Unknown => battery.status.as_str().to_string(),
    }
}

/// `C 80%`, `D 45%`, `F` or `U`.
fn battery_short(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let Some(battery) = find_battery(ctx, args.get(0)) else {
        return String::new();
    };
    match battery.status {
        BatteryStatus::Charging => format!("C {}%", format_percent(battery.percent)),
        BatteryStatus::Discharging => format!("D {}%", format_percent(battery.percent)),
        BatteryStatus::Full => "F".to_string(),
        BatteryStatus::Unknown => "U".to_string(),
    }
}

fn battery_percent(ctx: &Context<'_>, args: &Args<'_>) -> String {
    find_battery(ctx, args.get(0))
        .map(|b| format_percent(b.percent))
        .unwrap_or_else(|| ZERO.to_string())
}

fn battery_time(ctx: &Context<'_>, args: &Args<'_>) -> String {
    find_battery(ctx, args.get(0))
        .and_then(|b| b.seconds_remaining)
        .map(format_time_left)
        .unwrap_or_default()
}

fn battery_status(ctx: &Context<'_>, args: &Args<'_>) -> String {
    find_battery(ctx, args.get(0))
        .map(|b| b.status.as_str().to_string())
        .unwrap_or_default()
}

/// `battery_bar [height,width] [name]`
fn battery_bar(ctx: &Context<'_>, args: &Args<'_>) -> String {
    let (size, rest) = size_and_rest(args.as_slice());
    let value = find_battery(ctx, rest.first().copied())
        .map(|b| b.percent)
        .unwrap_or(0.0);
    let (height, width) = size.unwrap_or((0, 0));
    WidgetMarker::new(WidgetKind::Bar, value)
        .with_size(width, height)
        .encode()
}
