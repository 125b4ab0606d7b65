//! Indented text dump of a tree, one node per line.
//!
//! ```text
//! PARAMETER_LIST 0..11
//!   PARAMETER 1..6
//!     NAME_TYPE_INIT 1..6
//!       NAME "a" 1..2
//!       TYPE "int" 3..6
//!       -
//! ```
//!
//! Absent slots print as `-`.

use std::fmt::{self, Write};

use crate::node::Node;
use crate::visitor::{walk, NodeVisitor};

struct Dumper<'w, W: Write> {
    out: &'w mut W,
    result: fmt::Result,
}

impl<W: Write> Dumper<'_, W> {
    fn line(&mut self, depth: usize, args: fmt::Arguments<'_>) {
        if self.result.is_ok() {
            self.result = write_line(self.out, depth, args);
        }
    }
}

fn write_line<W: Write>(out: &mut W, depth: usize, args: fmt::Arguments<'_>) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    out.write_fmt(args)?;
    out.write_char('\n')
}

impl<'a, W: Write> NodeVisitor<'a> for Dumper<'_, W> {
    fn enter(&mut self, node: &'a Node<'a>, depth: usize) -> bool {
        match node.text {
            Some(text) => self.line(depth, format_args!("{} {:?} {:?}", node.kind, text, node.range)),
            None => self.line(depth, format_args!("{} {:?}", node.kind, node.range)),
        }
        self.result.is_ok()
    }

    fn absent(&mut self, _parent: &'a Node<'a>, _index: usize, depth: usize) {
        self.line(depth, format_args!("-"));
    }
}

/// Write the dump of `root` into `out`.
pub fn dump_into<W: Write>(root: &Node<'_>, out: &mut W) -> fmt::Result {
    let mut dumper = Dumper { out, result: Ok(()) };
    walk(&mut dumper, root);
    dumper.result
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dump_into(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeBuilder;
    use crate::node_kind::NodeKind;
    use bumpalo::Bump;

    #[test]
    fn test_dump_marks_absent_slots() {
        let arena = Bump::new();
        let mut nti = NodeBuilder::new_in(&arena, NodeKind::NameTypeInit, 1, 1);
        nti.push(Node::leaf(&arena, NodeKind::Name, 1, 2, Some("a")));
        nti.push(Node::leaf(&arena, NodeKind::Type, 3, 6, Some("int")));
        nti.push_slot(None);
        let root = nti.finish();

        let text = root.to_string();
        assert_eq!(
            text,
            "NAME_TYPE_INIT 1..6\n  NAME \"a\" 1..2\n  TYPE \"int\" 3..6\n  -\n"
        );
    }
}
