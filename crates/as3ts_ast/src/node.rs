//! Syntax node definitions.
//!
//! A [`Node`] is immutable once built. All construction goes through
//! [`NodeBuilder`], which keeps the node's range covering every child it
//! receives, so a finished node always satisfies span containment:
//! `pos <= end` and `end >= child.end` for every present child.

use as3ts_core::text::{TextPos, TextRange};
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use serde::Serialize;

use crate::node_kind::NodeKind;

/// A child slot. `None` marks an optional child that is absent, so
/// fixed-shape nodes such as NAME_TYPE_INIT always have the same arity.
pub type Child<'a> = Option<&'a Node<'a>>;

// ============================================================================
// Node
// ============================================================================

/// The universal syntax tree element.
#[derive(Debug, Serialize)]
pub struct Node<'a> {
    pub kind: NodeKind,
    /// Byte range in the source file, covering every descendant.
    pub range: TextRange,
    /// Literal payload for leaves (names, comments, literals) and for nodes
    /// that carry a reconstructed name (types, packages, imports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    /// Child slots in source order.
    pub children: &'a [Child<'a>],
}

impl<'a> Node<'a> {
    /// Allocate a childless node in the arena.
    pub fn leaf(
        arena: &'a Bump,
        kind: NodeKind,
        pos: TextPos,
        end: TextPos,
        text: Option<&'a str>,
    ) -> &'a Node<'a> {
        arena.alloc(Node {
            kind,
            range: TextRange::new(pos, end.max(pos)),
            text,
            children: &[],
        })
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    /// The node's text payload, or `""` when it has none.
    #[inline]
    pub fn text_or_empty(&self) -> &'a str {
        self.text.unwrap_or("")
    }

    /// The slot at `index`, or `None` when the slot is absent or out of range.
    pub fn child(&self, index: usize) -> Option<&'a Node<'a>> {
        self.children.get(index).copied().flatten()
    }

    /// Whether the slot at `index` exists and holds the absent marker.
    pub fn is_absent(&self, index: usize) -> bool {
        matches!(self.children.get(index), Some(None))
    }

    /// Iterate over present children, skipping absent slots.
    pub fn present_children(&self) -> impl Iterator<Item = &'a Node<'a>> + 'a {
        let children: &'a [Child<'a>] = self.children;
        children.iter().flatten().copied()
    }

    /// Iterate over present children of the given kind.
    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &'a Node<'a>> + 'a {
        self.present_children().filter(move |child| child.kind == kind)
    }

    /// The first present child of the given kind.
    pub fn first_of_kind(&self, kind: NodeKind) -> Option<&'a Node<'a>> {
        self.children_of_kind(kind).next()
    }

    /// The source text this node covers.
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range.to_range()).unwrap_or("")
    }
}

// ============================================================================
// NodeBuilder
// ============================================================================

/// Mutable construction state for a node that is still being parsed.
///
/// Parsers create a builder at the node's first token, push children as they
/// are parsed and call [`NodeBuilder::finish`] once the closing token is
/// known. Builders can be handed to another rule to be filled in, which is
/// how a function parser lets the block parser populate its body.
pub struct NodeBuilder<'a> {
    arena: &'a Bump,
    kind: NodeKind,
    range: TextRange,
    text: Option<&'a str>,
    children: BumpVec<'a, Child<'a>>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new_in(arena: &'a Bump, kind: NodeKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            arena,
            kind,
            range: TextRange::new(pos, end.max(pos)),
            text: None,
            children: BumpVec::new_in(arena),
        }
    }

    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn set_text(&mut self, text: &'a str) {
        self.text = Some(text);
    }

    /// Overwrite the start offset. The end is raised if needed so the range
    /// never inverts.
    pub fn set_pos(&mut self, pos: TextPos) {
        self.range.pos = pos;
        self.range.cover(pos);
    }

    /// Extend the end offset to `end`. Never moves the end backwards.
    pub fn cover(&mut self, end: TextPos) {
        self.range.cover(end);
    }

    /// Append a present child.
    pub fn push(&mut self, child: &'a Node<'a>) {
        self.range.cover(child.end());
        self.children.push(Some(child));
    }

    /// Append a slot that may hold the absent marker.
    pub fn push_slot(&mut self, slot: Child<'a>) {
        if let Some(child) = slot {
            self.range.cover(child.end());
        }
        self.children.push(slot);
    }

    /// Number of slots pushed so far, absent ones included.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Freeze the node into the arena.
    pub fn finish(self) -> &'a Node<'a> {
        let arena = self.arena;
        arena.alloc(Node {
            kind: self.kind,
            range: self.range,
            text: self.text,
            children: self.children.into_bump_slice(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_covers_children() {
        let arena = Bump::new();
        let name = Node::leaf(&arena, NodeKind::Name, 10, 13, Some("foo"));
        let mut builder = NodeBuilder::new_in(&arena, NodeKind::NameTypeInit, 10, 10);
        builder.push(name);
        builder.push_slot(None);
        builder.push_slot(None);
        let node = builder.finish();

        assert_eq!(node.range, TextRange::new(10, 13));
        assert_eq!(node.children.len(), 3);
        assert!(node.is_absent(1));
        assert!(node.is_absent(2));
        assert!(!node.is_absent(0));
        assert_eq!(node.child(0).map(|n| n.text_or_empty()), Some("foo"));
        assert_eq!(node.present_children().count(), 1);
    }

    #[test]
    fn test_cover_never_shrinks() {
        let arena = Bump::new();
        let mut builder = NodeBuilder::new_in(&arena, NodeKind::Block, 0, 20);
        builder.cover(5);
        assert_eq!(builder.range().end, 20);
        builder.set_pos(3);
        assert_eq!(builder.range(), TextRange::new(3, 20));
    }

    #[test]
    fn test_set_pos_past_end_keeps_range_ordered() {
        let arena = Bump::new();
        let mut builder = NodeBuilder::new_in(&arena, NodeKind::Block, 0, 0);
        builder.set_pos(8);
        let node = builder.finish();
        assert!(node.pos() <= node.end());
    }

    #[test]
    fn test_source_text() {
        let arena = Bump::new();
        let source = "var answer:int = 42;";
        let name = Node::leaf(&arena, NodeKind::Name, 4, 10, Some("answer"));
        assert_eq!(name.source_text(source), "answer");
    }

    #[test]
    fn test_serialize_kind_names() {
        let arena = Bump::new();
        let comment = Node::leaf(&arena, NodeKind::MultiLineComment, 0, 7, Some("/* x */"));
        let json = serde_json::to_value(comment).unwrap();
        assert_eq!(json["kind"], "MULTI_LINE_COMMENT");
        assert_eq!(json["range"]["end"], 7);
        assert_eq!(json["text"], "/* x */");
    }
}
