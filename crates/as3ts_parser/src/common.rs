//! Grammar shared by every other rule: qualified names, blocks, parameter
//! lists and `name:Type = init` triples.

use as3ts_ast::{Child, Node, NodeBuilder, NodeKind};
use tracing::trace;

use crate::error::{PResult, SyntaxError};
use crate::parser::{CommentTarget, Parser};

impl<'a> Parser<'a> {
    /// Parse a `.`- or `::`-separated name starting at the current token and
    /// return its text.
    ///
    /// With `skip_package`, a name containing a `.` separator is reduced to
    /// its last segment: `com.example::Widget` becomes `Widget`, while
    /// `ns::Widget` is returned unchanged.
    ///
    /// No token is checked: a trailing separator at the end of the input
    /// (`a.`) takes the empty end-of-file text as its last segment, so the
    /// reduced name is `""`.
    pub fn parse_qualified_name(&mut self, skip_package: bool) -> &'a str {
        let first = self.current();
        self.advance(true);

        let mut segments: Vec<&'a str> = vec![first.text];
        let mut has_dot = false;
        while self.tok_is(".") || self.tok_is("::") {
            let separator = self.current().text;
            has_dot |= separator == ".";
            segments.push(separator);
            self.advance(true);
            segments.push(self.current().text);
            self.advance(true);
        }

        if segments.len() == 1 {
            return first.text;
        }
        if skip_package && has_dot {
            return segments.last().copied().unwrap_or(first.text);
        }
        self.arena.alloc_str(&segments.concat())
    }

    /// Parse `{ statements }` into a BLOCK.
    ///
    /// When `into` is given, the statements are appended to that builder and
    /// only its start offset is moved to the opening brace. Comments in a
    /// block nested inside a function body are moved up to the body.
    pub fn parse_block(&mut self, into: Option<NodeBuilder<'a>>) -> PResult<&'a Node<'a>> {
        trace!(pos = self.current().pos, "parse_block");
        let open = self.expect_preserving("{")?;
        let mut block = match into {
            Some(mut builder) => {
                builder.set_pos(open.pos);
                builder
            }
            None => self.builder(NodeKind::Block, open.pos),
        };
        block.cover(open.end);

        let is_function_body = self.enter_block();
        let result = self.parse_block_statements(&mut block, is_function_body);
        self.leave_block();
        result?;

        let close = self.expect_preserving("}")?;
        block.cover(close.end);
        Ok(block.finish())
    }

    fn parse_block_statements(
        &mut self,
        block: &mut NodeBuilder<'a>,
        is_function_body: bool,
    ) -> PResult<()> {
        while !self.tok_is("}") {
            if self.at_end() {
                return Err(SyntaxError::UnterminatedConstruct {
                    expected: "}",
                    offset: self.current().pos,
                });
            }
            if is_function_body {
                self.flush_hoisted(block);
            }
            let token = self.current();
            if token.is_comment() {
                let comment = self.leaf(NodeKind::MultiLineComment, token);
                match self.comment_target() {
                    CommentTarget::Here => block.push(comment),
                    CommentTarget::Hoist => self.hoist_comment(comment),
                }
                self.advance(false);
                continue;
            }
            let mark = self.stray_mark();
            let statement = self.parse_statement()?;
            if is_function_body {
                self.flush_hoisted(block);
            }
            block.push(statement);
            self.flush_stray(block, mark);
        }
        if is_function_body {
            self.flush_hoisted(block);
        }
        Ok(())
    }

    /// Parse `( param, ... )` into a PARAMETER_LIST spanning both parens.
    pub fn parse_parameter_list(&mut self) -> PResult<&'a Node<'a>> {
        trace!(pos = self.current().pos, "parse_parameter_list");
        let open = self.expect("(")?;
        let mut list = self.builder(NodeKind::ParameterList, open.pos);
        while !self.tok_is(")") {
            let parameter = self.parse_parameter()?;
            list.push(parameter);
            if self.tok_is(",") {
                self.advance(true);
            } else {
                break;
            }
        }
        let close = self.expect(")")?;
        list.cover(close.end);
        Ok(list.finish())
    }

    /// Parse one parameter. The PARAMETER always has exactly one child: a
    /// REST for `...name` or a NAME_TYPE_INIT otherwise.
    fn parse_parameter(&mut self) -> PResult<&'a Node<'a>> {
        let start = self.current();
        let mut parameter = self.builder(NodeKind::Parameter, start.pos);
        if start.is("...") {
            self.advance(true);
            let name = self.expect_identifier()?;
            let mut rest = self.builder(NodeKind::Rest, start.pos).with_text(name.text);
            rest.cover(name.end);
            if let Some(annotation) = self.parse_optional_type()? {
                rest.push(annotation);
            }
            parameter.push(rest.finish());
        } else {
            parameter.push(self.parse_name_type_init()?);
        }
        Ok(parameter.finish())
    }

    /// Parse `name[:Type][= init]` into a NAME_TYPE_INIT with three slots:
    /// NAME, the type (or absent) and the INIT (or absent).
    pub fn parse_name_type_init(&mut self) -> PResult<&'a Node<'a>> {
        let name = self.current();
        let mut result = self.builder(NodeKind::NameTypeInit, name.pos);
        self.expect_identifier()?;
        result.push(self.leaf(NodeKind::Name, name));
        let annotation = self.parse_optional_type()?;
        result.push_slot(annotation);
        let init = self.parse_optional_init()?;
        result.push_slot(init);
        Ok(result.finish())
    }

    /// Parse `= expression` into an INIT starting at the expression, or
    /// return the absent marker without consuming anything.
    fn parse_optional_init(&mut self) -> PResult<Child<'a>> {
        if !self.tok_is("=") {
            return Ok(None);
        }
        self.advance(true);
        let mut init = self.builder(NodeKind::Init, self.current().pos);
        let expression = self.parse_expression()?;
        init.push(expression);
        Ok(Some(init.finish()))
    }
}
