//! Directive tokenizer.
//!
//! Splits template text into literal runs and directive references.
//!
//! # Syntax
//!
//! - `${name}` / `${name arg1 arg2}` - directive with whitespace-delimited args
//! - `$name` - argument-less directive (`[A-Za-z0-9_]+`)
//! - `$$` - literal `$`
//!
//! Braces inside a `${...}` body are balanced, so directives may nest in
//! arguments (`${if_match ${cpu} > 50}`) and commands may contain braces
//! (`${exec awk '{print $1}' /proc/loadavg}`). An unterminated `${` is
//! literal text.

/// A directive reference extracted from template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name, e.g. `cpu` or `if_up`.
    pub name: String,
    /// Everything after the name, trimmed, with inner spacing preserved.
    pub arg_text: String,
    /// The exact source text, used for verbatim passthrough.
    pub raw: String,
    /// Byte offset of `raw` in the tokenized text.
    pub offset: usize,
}

impl Directive {
    /// Build a directive from a name and arguments, synthesising the raw form.
    pub fn synthesize(name: &str, args: &[&str]) -> Self {
        let arg_text = args.join(" ");
        let raw = if arg_text.is_empty() {
            format!("${{{}}}", name)
        } else {
            format!("${{{} {}}}", name, arg_text)
        };
        Self {
            name: name.to_string(),
            arg_text,
            raw,
            offset: 0,
        }
    }

    /// Whitespace-separated arguments.
    pub fn args(&self) -> Vec<&str> {
        self.arg_text.split_whitespace().collect()
    }

    /// Check if this opens a conditional block (`if_*`).
    pub fn is_conditional(&self) -> bool {
        self.name.starts_with("if_")
    }

    /// Check if this is the `else` marker.
    pub fn is_else(&self) -> bool {
        self.name == "else"
    }

    /// Check if this is the `endif` marker.
    pub fn is_endif(&self) -> bool {
        self.name == "endif"
    }
}

/// A segment of tokenized template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Directive reference
    Directive(Directive),
}

/// Tokenize template text into literal and directive segments.
///
/// Adjacent literal text (including `$$` escapes) is merged into a single
/// segment.
///
/// `$$` always collapses to one `$`, so parsing is not the identity on
/// text that contains `$$` even when it holds no directive: `a$$b`
/// renders as `a$b`. Write `$$$$` to get `$$` in the output.
pub fn tokenize(input: &str) -> Vec<Segment> {
    let bytes = input.as_bytes();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        match bytes.get(i + 1) {
            Some(b'$') => {
                // $$ -> $
                literal.push_str(&input[run_start..=i]);
                i += 2;
                run_start = i;
            }
            Some(b'{') => match matching_brace(bytes, i + 2) {
                Some(close) => {
                    literal.push_str(&input[run_start..i]);
                    flush(&mut literal, &mut segments);

                    let body = &input[i + 2..close];
                    segments.push(Segment::Directive(braced(body, &input[i..=close], i)));
                    i = close + 1;
                    run_start = i;
                }
                None => {
                    // Unterminated: the rest is literal.
                    i = bytes.len();
                }
            },
            Some(&c) if is_name_byte(c) => {
                let mut end = i + 1;
                while end < bytes.len() && is_name_byte(bytes[end]) {
                    end += 1;
                }
                literal.push_str(&input[run_start..i]);
                flush(&mut literal, &mut segments);

                segments.push(Segment::Directive(Directive {
                    name: input[i + 1..end].to_string(),
                    arg_text: String::new(),
                    raw: input[i..end].to_string(),
                    offset: i,
                }));
                i = end;
                run_start = i;
            }
            _ => i += 1,
        }
    }

    literal.push_str(&input[run_start..]);
    flush(&mut literal, &mut segments);

    segments
}

/// Check if a string contains anything the tokenizer would treat specially.
pub fn has_directives(input: &str) -> bool {
    input.contains('$')
}

/// Index of the `}` closing a body that starts at `from`, honoring nesting.
fn matching_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, &b) in bytes[from.min(bytes.len())..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn braced(body: &str, raw: &str, offset: usize) -> Directive {
    let body = body.trim_start();
    let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
    Directive {
        name: body[..name_end].to_string(),
        arg_text: body[name_end..].trim().to_string(),
        raw: raw.to_string(),
        offset,
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}
