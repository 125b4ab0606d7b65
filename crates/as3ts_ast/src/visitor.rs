//! Tree traversal.
//!
//! [`NodeVisitor`] is a pre/post-order visitor over the uniform tree and
//! [`walk`] drives it. [`check_spans`] is built on top of it and validates
//! the span invariants of a finished tree.

use as3ts_core::text::TextRange;
use thiserror::Error;

use crate::node::Node;
use crate::node_kind::NodeKind;

/// A visitor over the syntax tree. Default implementations visit everything.
pub trait NodeVisitor<'a> {
    /// Called before a node's children. Return `false` to skip them.
    fn enter(&mut self, _node: &'a Node<'a>, _depth: usize) -> bool {
        true
    }

    /// Called after a node's children.
    fn leave(&mut self, _node: &'a Node<'a>, _depth: usize) {}

    /// Called for an absent slot of `parent`.
    fn absent(&mut self, _parent: &'a Node<'a>, _index: usize, _depth: usize) {}
}

/// Walk the tree rooted at `root` in source order.
pub fn walk<'a, V: NodeVisitor<'a> + ?Sized>(visitor: &mut V, root: &'a Node<'a>) {
    walk_at(visitor, root, 0);
}

fn walk_at<'a, V: NodeVisitor<'a> + ?Sized>(visitor: &mut V, node: &'a Node<'a>, depth: usize) {
    if visitor.enter(node, depth) {
        for (index, slot) in node.children.iter().enumerate() {
            match slot {
                Some(child) => walk_at(visitor, child, depth + 1),
                None => visitor.absent(node, index, depth + 1),
            }
        }
    }
    visitor.leave(node, depth);
}

// ============================================================================
// Span checking
// ============================================================================

/// A node whose range does not contain one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanViolation {
    #[error("{kind} {range:?} ends before it starts")]
    Inverted { kind: NodeKind, range: TextRange },
    #[error("{kind} {range:?} does not cover child {child_kind} {child_range:?}")]
    ChildOutside {
        kind: NodeKind,
        range: TextRange,
        child_kind: NodeKind,
        child_range: TextRange,
    },
    #[error("{kind} {range:?} starts after its child {child_kind} {child_range:?}")]
    ChildBefore {
        kind: NodeKind,
        range: TextRange,
        child_kind: NodeKind,
        child_range: TextRange,
    },
    #[error("leaf {kind} {range:?} has children")]
    LeafWithChildren { kind: NodeKind, range: TextRange },
}

#[derive(Default)]
struct SpanChecker {
    violation: Option<SpanViolation>,
}

impl<'a> NodeVisitor<'a> for SpanChecker {
    fn enter(&mut self, node: &'a Node<'a>, _depth: usize) -> bool {
        if self.violation.is_some() {
            return false;
        }
        let range = node.range;
        if range.pos > range.end {
            self.violation = Some(SpanViolation::Inverted { kind: node.kind, range });
            return false;
        }
        if node.kind.is_leaf() && !node.children.is_empty() {
            self.violation = Some(SpanViolation::LeafWithChildren { kind: node.kind, range });
            return false;
        }
        if let Some(child) = node.present_children().find(|child| child.pos() < range.pos) {
            self.violation = Some(SpanViolation::ChildBefore {
                kind: node.kind,
                range,
                child_kind: child.kind,
                child_range: child.range,
            });
            return false;
        }
        if let Some(child) = node.present_children().find(|child| child.end() > range.end) {
            self.violation = Some(SpanViolation::ChildOutside {
                kind: node.kind,
                range,
                child_kind: child.kind,
                child_range: child.range,
            });
            return false;
        }
        true
    }
}

/// Validate span containment for every node under `root`.
///
/// Returns the first violation found in source order.
pub fn check_spans(root: &Node<'_>) -> Result<(), SpanViolation> {
    let mut checker = SpanChecker::default();
    walk(&mut checker, root);
    match checker.violation {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}
