//! Conditional block structure.
//!
//! Turns a flat segment stream into nodes where every `${if_*}` with a
//! matching `${endif}` becomes a [`Block`]. Matching uses an explicit stack
//! of open blocks:
//!
//! - `${if_*}` pushes a block
//! - `${else}` splits the innermost open block, once
//! - `${endif}` closes the innermost open block
//!
//! Markers that do not fit (an `${if_*}` never closed, an `${else}` or
//! `${endif}` with no open block, a second `${else}`) stay in place as
//! plain variable references. An unclosed block's body is kept inline.

use super::lexer::{Directive, Segment};

/// Deepest block nesting honored; anything beyond is kept as raw text.
pub const MAX_NESTING: usize = 256;

/// A node of a template after block matching.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text
    Text(String),
    /// Variable reference
    Var(Directive),
    /// Matched conditional block
    Block(Block),
}

/// A matched `${if_*}...${else}...${endif}` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The opening `if_*` directive.
    pub condition: Directive,
    pub then_branch: Vec<Node>,
    /// `None` when the block has no `${else}`.
    pub else_branch: Option<Vec<Node>>,
}

struct Open {
    condition: Directive,
    then_branch: Vec<Node>,
    else_marker: Option<Directive>,
    else_branch: Vec<Node>,
}

impl Open {
    fn active(&mut self) -> &mut Vec<Node> {
        if self.else_marker.is_some() {
            &mut self.else_branch
        } else {
            &mut self.then_branch
        }
    }

    fn close(self) -> Block {
        Block {
            condition: self.condition,
            then_branch: self.then_branch,
            else_branch: self.else_marker.map(|_| self.else_branch),
        }
    }

    /// Inline an unclosed block: its markers become variable references.
    fn unwind(self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.then_branch.len() + self.else_branch.len() + 2);
        nodes.push(Node::Var(self.condition));
        nodes.extend(self.then_branch);
        if let Some(marker) = self.else_marker {
            nodes.push(Node::Var(marker));
        }
        nodes.extend(self.else_branch);
        nodes
    }
}

/// Match conditional blocks in a segment stream.
pub fn build(segments: Vec<Segment>) -> Vec<Node> {
    let mut root = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut segments = segments.into_iter();

    while let Some(segment) = segments.next() {
        let directive = match segment {
            Segment::Literal(text) => {
                sink(&mut stack, &mut root).push(Node::Text(text));
                continue;
            }
            Segment::Directive(d) => d,
        };

        if directive.is_conditional() {
            if stack.len() >= MAX_NESTING {
                tracing::warn!(
                    "conditional nesting deeper than {}, remaining text left unparsed",
                    MAX_NESTING
                );
                let rest = std::iter::once(directive.raw)
                    .chain(segments.by_ref().map(|s| match s {
                        Segment::Literal(text) => text,
                        Segment::Directive(d) => d.raw,
                    }))
                    .collect::<String>();
                sink(&mut stack, &mut root).push(Node::Text(rest));
                break;
            }
            stack.push(Open {
                condition: directive,
                then_branch: Vec::new(),
                else_marker: None,
                else_branch: Vec::new(),
            });
        } else if directive.is_else() {
            match stack.last_mut() {
                Some(open) if open.else_marker.is_none() => open.else_marker = Some(directive),
                Some(open) => open.else_branch.push(Node::Var(directive)),
                None => root.push(Node::Var(directive)),
            }
        } else if directive.is_endif() {
            match stack.pop() {
                Some(open) => {
                    let block = open.close();
                    sink(&mut stack, &mut root).push(Node::Block(block));
                }
                None => root.push(Node::Var(directive)),
            }
        } else {
            sink(&mut stack, &mut root).push(Node::Var(directive));
        }
    }

    while let Some(open) = stack.pop() {
        let nodes = open.unwind();
        sink(&mut stack, &mut root).extend(nodes);
    }

    root
}

/// Check if any node is a matched block.
pub fn has_blocks(nodes: &[Node]) -> bool {
    nodes.iter().any(|n| matches!(n, Node::Block(_)))
}

fn sink<'a>(stack: &'a mut [Open], root: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) => open.active(),
        None => root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lexer::tokenize;

    fn parse(text: &str) -> Vec<Node> {
        build(tokenize(text))
    }

    fn block(node: &Node) -> &Block {
        match node {
            Node::Block(b) => b,
            other => panic!("expected block, got {other:?}"),
        }
    }

    fn var_raw(node: &Node) -> &str {
        match node {
            Node::Var(d) => &d.raw,
            other => panic!("expected var, got {other:?}"),
        }
    }

    #[test]
    fn no_conditionals_is_flat() {
        let nodes = parse("a ${cpu} b");
        assert_eq!(nodes.len(), 3);
        assert!(!has_blocks(&nodes));
    }

    #[test]
    fn simple_block_with_else() {
        let nodes = parse("${if_up eth0}UP${else}DOWN${endif}");
        assert_eq!(nodes.len(), 1);
        let b = block(&nodes[0]);
        assert_eq!(b.condition.name, "if_up");
        assert_eq!(b.then_branch, vec![Node::Text("UP".into())]);
        assert_eq!(b.else_branch, Some(vec![Node::Text("DOWN".into())]));
    }

    #[test]
    fn block_without_else() {
        let nodes = parse("${if_empty }x${endif}");
        assert!(block(&nodes[0]).else_branch.is_none());
    }

    #[test]
    fn nested_else_belongs_to_inner_block() {
        let nodes = parse("${if_a}${if_b}X${else}Y${endif}${endif}");
        let outer = block(&nodes[0]);
        assert!(outer.else_branch.is_none());
        let inner = block(&outer.then_branch[0]);
        assert_eq!(inner.then_branch, vec![Node::Text("X".into())]);
        assert_eq!(inner.else_branch, Some(vec![Node::Text("Y".into())]));
    }

    #[test]
    fn outer_else_after_nested_block() {
        let nodes = parse("${if_a}${if_b}X${endif}${else}Z${endif}");
        let outer = block(&nodes[0]);
        assert_eq!(outer.then_branch.len(), 1);
        assert_eq!(outer.else_branch, Some(vec![Node::Text("Z".into())]));
    }

    #[test]
    fn triple_nesting() {
        let nodes = parse("${if_a}L1${if_b}L2${if_c}L3${endif}${endif}${endif}");
        let l1 = block(&nodes[0]);
        let l2 = block(&l1.then_branch[1]);
        let l3 = block(&l2.then_branch[1]);
        assert_eq!(l3.then_branch, vec![Node::Text("L3".into())]);
    }

    #[test]
    fn unclosed_if_becomes_variable() {
        let nodes = parse("${if_up eth0}A${else}B");
        assert_eq!(nodes.len(), 4);
        assert_eq!(var_raw(&nodes[0]), "${if_up eth0}");
        assert_eq!(nodes[1], Node::Text("A".into()));
        assert_eq!(var_raw(&nodes[2]), "${else}");
        assert_eq!(nodes[3], Node::Text("B".into()));
    }

    #[test]
    fn unclosed_outer_keeps_closed_inner() {
        let nodes = parse("${if_a}${if_b}X${endif}");
        assert_eq!(nodes.len(), 2);
        assert_eq!(var_raw(&nodes[0]), "${if_a}");
        assert_eq!(block(&nodes[1]).condition.name, "if_b");
    }

    #[test]
    fn orphan_markers_are_variables() {
        let nodes = parse("a${else}b${endif}");
        assert_eq!(var_raw(&nodes[1]), "${else}");
        assert_eq!(var_raw(&nodes[3]), "${endif}");
    }

    #[test]
    fn second_else_is_variable_in_else_branch() {
        let nodes = parse("${if_a}1${else}2${else}3${endif}");
        let b = block(&nodes[0]);
        let else_branch = b.else_branch.as_ref().unwrap();
        assert_eq!(else_branch.len(), 3);
        assert_eq!(var_raw(&else_branch[1]), "${else}");
    }

    #[test]
    fn pathological_nesting_is_cut_off() {
        let text = "${if_a}".repeat(MAX_NESTING + 10);
        let nodes = parse(&text);
        // Nothing closes, so everything unwinds back into flat nodes.
        assert!(!has_blocks(&nodes));
        let rendered: String = nodes
            .iter()
            .map(|n| match n {
                Node::Text(t) => t.clone(),
                Node::Var(d) => d.raw.clone(),
                Node::Block(_) => unreachable!(),
            })
            .collect();
        assert_eq!(rendered, text);
    }
}
