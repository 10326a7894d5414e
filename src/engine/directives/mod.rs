//! Built-in variable directives, grouped by metric family.
//!
//! Each module exposes `register`, adding its handlers to a [`Registry`].

mod cpu;
mod external;
mod layout;
mod memory;
mod network;
mod process;
mod sensors;
mod storage;
mod system;

use super::resolver::{Args, Registry};
use super::widget::{size_and_rest, WidgetKind, WidgetMarker};

/// Register every built-in directive.
pub fn register_all(registry: &mut Registry) {
    cpu::register(registry);
    external::register(registry);
    layout::register(registry);
    memory::register(registry);
    network::register(registry);
    process::register(registry);
    sensors::register(registry);
    storage::register(registry);
    system::register(registry);
}

/// Sentinel for a missing byte quantity.
pub(crate) const ZERO_BYTES: &str = "0B";

/// Sentinel for a missing number or percentage.
pub(crate) const ZERO: &str = "0";

/// `part` as a percentage of `total`, zero when `total` is zero.
pub(crate) fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}

/// Encode a widget whose arguments are an optional `height,width` size
/// followed by pass-through flags.
pub(crate) fn widget(kind: WidgetKind, value: f64, args: &[&str]) -> String {
    let (size, flags) = size_and_rest(args);
    let (height, width) = size.unwrap_or((0, 0));
    WidgetMarker::new(kind, value)
        .with_size(width, height)
        .with_flags(flags.into_iter().map(String::from).collect())
        .encode()
}

/// Split a leading selector (interface, device, mount, core) from widget
/// arguments. The first argument is the selector unless it is a size.
pub(crate) fn selector_and_rest<'a>(args: &'a Args<'a>) -> (Option<&'a str>, &'a [&'a str]) {
    match args.get(0) {
        Some(first) if super::widget::parse_size(first).is_none() => (Some(first), args.tail(1)),
        _ => (None, args.as_slice()),
    }
}
