//! as3ts_ast: Syntax tree definitions for the ActionScript translator.
//!
//! The tree is uniform: every element is a [`Node`] with a [`NodeKind`] tag,
//! a byte range, an optional literal payload and an ordered list of child
//! slots. Nodes are assembled with a [`NodeBuilder`] and frozen into a bump
//! arena once their span is final.

pub mod dump;
pub mod node;
pub mod node_kind;
pub mod visitor;

// Re-export key types
pub use node::{Child, Node, NodeBuilder};
pub use node_kind::NodeKind;
pub use visitor::{check_spans, walk, NodeVisitor, SpanViolation};
