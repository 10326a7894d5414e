//! Layout directives.
//!
//! Colors, fonts and positioning only matter to a graphical renderer and
//! vanish from text output. Rules and images become widget markers.

use crate::engine::context::Context;
use crate::engine::resolver::{Args, Registry};
use crate::engine::widget::{parse_size, WidgetKind, WidgetMarker};

const BLANK: [&str; 19] = [
    "color", "color0", "color1", "color2", "color3", "color4", "color5", "color6", "color7",
    "color8", "color9", "font", "alignr", "alignc", "voffset", "offset", "goto", "tab",
    "outlinecolor",
];

pub(super) fn register(registry: &mut Registry) {
    for name in BLANK {
        registry.directive(name, blank);
    }
    registry
        .directive("hr", hr)
        .directive("stippled_hr", stippled_hr)
        .directive("image", image);
}

fn blank(_: &Context<'_>, _: &Args<'_>) -> String {
    String::new()
}

/// `hr [height]`
fn hr(_: &Context<'_>, args: &Args<'_>) -> String {
    let height = args.get(0).and_then(|h| h.parse().ok()).unwrap_or(0);
    WidgetMarker::new(WidgetKind::Hr, 0.0)
        .with_size(0, height)
        .encode()
}

/// `stippled_hr [space] [height]`
fn stippled_hr(_: &Context<'_>, args: &Args<'_>) -> String {
    let space = args.get(0).and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0);
    let height = args.get(1).and_then(|h| h.parse().ok()).unwrap_or(0);
    WidgetMarker::new(WidgetKind::StippledHr, space)
        .with_size(0, height)
        .encode()
}

/// `image <path> [-p x,y] [-s WxH] [-n]`
fn image(_: &Context<'_>, args: &Args<'_>) -> String {
    let Some(path) = args.get(0) else {
        return String::new();
    };

    let mut marker = WidgetMarker::new(WidgetKind::Image, 0.0).with_path(path);
    let mut flags = Vec::new();
    let mut rest = args.tail(1).iter();
    while let Some(&arg) = rest.next() {
        match arg {
            "-s" => {
                if let Some((width, Some(height))) = rest.next().and_then(|s| parse_size(s)) {
                    marker = marker.with_size(width, height);
                }
            }
            "-p" => {
                if let Some(position) = rest.next() {
                    flags.push(format!("-p {position}"));
                }
            }
            other => flags.push(other.to_string()),
        }
    }
    marker.with_flags(flags).encode()
}
