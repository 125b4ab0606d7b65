//! Type annotations.

use as3ts_ast::{Child, Node, NodeKind};

use crate::error::PResult;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse `: Type` if the current token is `:`, else return the absent
    /// marker.
    pub fn parse_optional_type(&mut self) -> PResult<Child<'a>> {
        if !self.tok_is(":") {
            return Ok(None);
        }
        self.advance(true);
        self.parse_type().map(Some)
    }

    /// Parse a type: `*`, `void`, a possibly qualified name, or
    /// `Vector.<T>`. Package prefixes are dropped from the name.
    pub fn parse_type(&mut self) -> PResult<&'a Node<'a>> {
        self.rescan_asterisk();
        let start = self.current();
        if start.is("*") || start.is("void") {
            self.advance(true);
            return Ok(self.leaf(NodeKind::Type, start));
        }
        if !start.is_identifier() {
            return Err(self.unexpected("type"));
        }

        let name = self.parse_qualified_name(true);
        let name_end = self.prev_end();
        if !self.tok_is(".<") {
            return Ok(Node::leaf(self.arena, NodeKind::Type, start.pos, name_end, Some(name)));
        }

        self.advance(true);
        let mut vector = self.builder(NodeKind::Vector, start.pos).with_text(name);
        vector.push(self.parse_type()?);
        let close = self.expect(">")?;
        vector.cover(close.end);
        Ok(vector.finish())
    }
}
