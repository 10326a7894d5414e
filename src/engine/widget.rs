//! Widget marker protocol.
//!
//! Bars, graphs, gauges, rules and images have no textual form. Their
//! directives resolve to a marker the rendering side decodes:
//!
//! ```text
//! \0WIDGET:{"kind":"bar","value":45.5,"width":100,"height":6}\0
//! ```
//!
//! The payload is JSON, which escapes control characters, so a NUL byte
//! never appears inside it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Opens a marker.
pub const MARKER_PREFIX: &str = "\u{0}WIDGET:";

/// Closes a marker.
pub const MARKER_END: char = '\u{0}';

static SIZE_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:[,x](\d+))?$").unwrap_or_else(|e| panic!("invalid size pattern: {e}"))
});

/// What the marker asks the renderer to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Bar,
    Graph,
    Gauge,
    Image,
    Hr,
    StippledHr,
}

/// A structured rendering instruction embedded in text output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetMarker {
    pub kind: WidgetKind,
    /// Current value; percentages for bars and gauges, raw rates for graphs.
    pub value: f64,
    /// Requested width in pixels, zero for the renderer default.
    #[serde(default)]
    pub width: u32,
    /// Requested height in pixels, zero for the renderer default.
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Remaining directive arguments (colors, scale, `-t`, `-l`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl WidgetMarker {
    /// Create a marker with default size.
    pub fn new(kind: WidgetKind, value: f64) -> Self {
        Self {
            kind,
            value: if value.is_finite() { value } else { 0.0 },
            width: 0,
            height: 0,
            path: None,
            flags: Vec::new(),
        }
    }

    /// Set the requested size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the image path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set pass-through flags.
    pub fn with_flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    /// Encode as a marker string.
    pub fn encode(&self) -> String {
        let payload = serde_json::to_string(self).unwrap_or_default();
        format!("{}{}{}", MARKER_PREFIX, payload, MARKER_END)
    }

    /// Decode a complete marker string.
    pub fn decode(marker: &str) -> Option<Self> {
        let payload = marker
            .strip_prefix(MARKER_PREFIX)?
            .strip_suffix(MARKER_END)?;
        serde_json::from_str(payload).ok()
    }
}

/// A piece of rendered output.
#[derive(Debug, Clone, PartialEq)]
pub enum Span<'a> {
    Text(&'a str),
    Widget(WidgetMarker),
}

/// Split rendered output into text and decoded widgets.
///
/// Malformed markers are returned as text.
pub fn split_markers(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(MARKER_PREFIX) {
        let after = &rest[start + MARKER_PREFIX.len()..];
        let Some(len) = after.find(MARKER_END) else {
            break;
        };
        let end = start + MARKER_PREFIX.len() + len + MARKER_END.len_utf8();

        match WidgetMarker::decode(&rest[start..end]) {
            Some(widget) => {
                if start > 0 {
                    spans.push(Span::Text(&rest[..start]));
                }
                spans.push(Span::Widget(widget));
            }
            None => spans.push(Span::Text(&rest[..end])),
        }
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        spans.push(Span::Text(rest));
    }
    spans
}

/// Remove every marker, keeping only text.
pub fn strip_markers(text: &str) -> String {
    split_markers(text)
        .into_iter()
        .filter_map(|span| match span {
            Span::Text(t) => Some(t),
            Span::Widget(_) => None,
        })
        .collect()
}

/// Parse a `height,width` (or `WxH` for images) size argument.
///
/// Returns the two numbers in the order written.
pub fn parse_size(arg: &str) -> Option<(u32, Option<u32>)> {
    let caps = SIZE_ARG.captures(arg)?;
    let first = caps.get(1)?.as_str().parse().ok()?;
    let second = caps.get(2).and_then(|m| m.as_str().parse().ok());
    Some((first, second))
}

/// Split widget arguments into an optional `height,width` size and the
/// remaining arguments.
///
/// The first argument that looks like a size wins.
pub fn size_and_rest<'a>(args: &[&'a str]) -> (Option<(u32, u32)>, Vec<&'a str>) {
    let mut size = None;
    let mut rest = Vec::new();
    for arg in args {
        match (size.is_none(), parse_size(arg)) {
            (true, Some((height, width))) if arg.contains(',') || width.is_none() => {
                size = Some((height, width.unwrap_or(0)));
            }
            _ => rest.push(*arg),
        }
    }
    (size, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_has_reserved_prefix_and_terminator() {
        let marker = WidgetMarker::new(WidgetKind::Bar, 45.5).encode();
        assert!(marker.starts_with(MARKER_PREFIX));
        assert!(marker.ends_with(MARKER_END));
        assert_eq!(marker.matches('\u{0}').count(), 2);
    }

    #[test]
    fn encode_decode_preserves_fields() {
        let marker = WidgetMarker::new(WidgetKind::Image, 0.0)
            .with_size(64, 32)
            .with_path("/tmp/a:b.png")
            .with_flags(vec!["-n".into()]);
        assert_eq!(WidgetMarker::decode(&marker.encode()), Some(marker));
    }

    #[test]
    fn non_finite_value_is_zeroed() {
        let marker = WidgetMarker::new(WidgetKind::Graph, f64::NAN);
        assert_eq!(marker.value, 0.0);
        assert!(WidgetMarker::decode(&marker.encode()).is_some());
    }

    #[test]
    fn decode_rejects_plain_text() {
        assert!(WidgetMarker::decode("hello").is_none());
        assert!(WidgetMarker::decode("\u{0}WIDGET:{nope}\u{0}").is_none());
    }

    #[test]
    fn split_interleaves_text_and_widgets() {
        let bar = WidgetMarker::new(WidgetKind::Bar, 10.0);
        let text = format!("CPU {} done", bar.encode());
        let spans = split_markers(&text);
        assert_eq!(
            spans,
            vec![Span::Text("CPU "), Span::Widget(bar), Span::Text(" done")]
        );
    }

    #[test]
    fn strip_removes_markers() {
        let text = format!(
            "a{}b{}c",
            WidgetMarker::new(WidgetKind::Hr, 0.0).encode(),
            WidgetMarker::new(WidgetKind::Gauge, 3.0).encode()
        );
        assert_eq!(strip_markers(&text), "abc");
    }

    #[test]
    fn parse_size_forms() {
        assert_eq!(parse_size("6,100"), Some((6, Some(100))));
        assert_eq!(parse_size("64x32"), Some((64, Some(32))));
        assert_eq!(parse_size("8"), Some((8, None)));
        assert_eq!(parse_size("cpu1"), None);
    }

    #[test]
    fn size_and_rest_splits_args() {
        let (size, rest) = size_and_rest(&["cpu1", "6,100", "ff0000", "-t"]);
        assert_eq!(size, Some((6, 100)));
        assert_eq!(rest, vec!["cpu1", "ff0000", "-t"]);
    }
}
