//! Statements.

use as3ts_ast::{Child, Node, NodeBuilder, NodeKind};
use as3ts_core::text::TextPos;
use tracing::trace;

use crate::error::PResult;
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse one statement.
    ///
    /// A trailing `;` is consumed when present and included in the
    /// statement's span; it is never required.
    pub fn parse_statement(&mut self) -> PResult<&'a Node<'a>> {
        self.skip_comments();
        let token = self.current();
        trace!(text = token.text, pos = token.pos, "parse_statement");

        // String literal texts keep their quotes, so only identifiers and
        // punctuators can match a keyword arm.
        match token.text {
            "{" => self.parse_block(None),
            ";" => {
                self.advance(false);
                Ok(self.leaf(NodeKind::EmptyStatement, token))
            }
            "var" | "const" => {
                let modifiers = self.empty_modifier_list(token.pos);
                self.parse_variable_list(modifiers, token.pos, true)
            }
            "function" => {
                let modifiers = self.empty_modifier_list(token.pos);
                self.parse_function(modifiers, token.pos)
            }
            "if" => self.parse_if_statement(),
            "while" => self.parse_while_statement(),
            "for" => self.parse_for_statement(),
            "return" => self.parse_return_statement(),
            "throw" => self.parse_throw_statement(),
            "break" => self.parse_jump_statement(NodeKind::Break),
            "continue" => self.parse_jump_statement(NodeKind::Continue),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `var`/`const` followed by comma-separated NAME_TYPE_INITs.
    ///
    /// `with_semicolon` consumes an optional trailing `;`; the `for` header
    /// parses its initializer list without it.
    pub(crate) fn parse_variable_list(
        &mut self,
        modifiers: &'a Node<'a>,
        start: TextPos,
        with_semicolon: bool,
    ) -> PResult<&'a Node<'a>> {
        let kind = if self.tok_is("const") {
            NodeKind::ConstList
        } else {
            NodeKind::VarList
        };
        self.advance(true);
        let mut list = self.builder(kind, start);
        list.push(modifiers);
        loop {
            list.push(self.parse_name_type_init()?);
            if self.optional(",", true).is_none() {
                break;
            }
        }
        if with_semicolon {
            self.finish_statement(&mut list);
        }
        Ok(list.finish())
    }

    /// Consume an optional `;` into the statement's span.
    fn finish_statement(&mut self, statement: &mut NodeBuilder<'a>) {
        if let Some(semicolon) = self.optional_semicolon() {
            statement.cover(semicolon.end);
        }
    }

    /// Parse `( expression )` and return the inner expression.
    fn parse_condition(&mut self) -> PResult<&'a Node<'a>> {
        self.expect("(")?;
        let condition = self.parse_expression()?;
        self.expect(")")?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(NodeKind::If, keyword.pos);
        statement.push(self.parse_condition()?);
        statement.push(self.parse_statement()?);

        // A comment between the branch and `else` is stepped over only
        // when an `else` really follows.
        if self.peek_past_comments().is("else") {
            self.skip_comments();
            self.advance(true);
            statement.push(self.parse_statement()?);
        } else {
            statement.push_slot(None);
        }
        Ok(statement.finish())
    }

    fn parse_while_statement(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(NodeKind::While, keyword.pos);
        statement.push(self.parse_condition()?);
        statement.push(self.parse_statement()?);
        Ok(statement.finish())
    }

    /// `for (init; condition; update) body` with every header part optional.
    fn parse_for_statement(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(NodeKind::For, keyword.pos);
        self.expect("(")?;

        let init = if self.tok_is(";") {
            None
        } else if self.tok_is("var") || self.tok_is("const") {
            let pos = self.current().pos;
            let modifiers = self.empty_modifier_list(pos);
            Some(self.parse_variable_list(modifiers, pos, false)?)
        } else {
            Some(self.parse_expression()?)
        };
        statement.push_slot(init);
        self.expect(";")?;

        let condition = self.parse_optional_expression(";")?;
        statement.push_slot(condition);
        self.expect(";")?;

        let update = self.parse_optional_expression(")")?;
        statement.push_slot(update);
        self.expect(")")?;

        statement.push(self.parse_statement()?);
        Ok(statement.finish())
    }

    /// Parse an expression unless the current token is `terminator`.
    fn parse_optional_expression(&mut self, terminator: &str) -> PResult<Child<'a>> {
        if self.tok_is(terminator) {
            Ok(None)
        } else {
            self.parse_expression().map(Some)
        }
    }

    /// `return [expression]`. The expression is absent when the next token
    /// is on a new line, `;`, `}` or the end of the input.
    fn parse_return_statement(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(NodeKind::Return, keyword.pos);
        statement.cover(keyword.end);

        let next = self.current();
        let value = if next.preceding_line_break || next.is(";") || next.is("}") || next.is_eof() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        statement.push_slot(value);
        self.finish_statement(&mut statement);
        Ok(statement.finish())
    }

    fn parse_throw_statement(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(NodeKind::Throw, keyword.pos);
        statement.push(self.parse_expression()?);
        self.finish_statement(&mut statement);
        Ok(statement.finish())
    }

    /// `break` or `continue` with an optional label on the same line. The
    /// label is kept as the node's text.
    fn parse_jump_statement(&mut self, kind: NodeKind) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut statement = self.builder(kind, keyword.pos);
        statement.cover(keyword.end);

        let label = self.current();
        if label.is_identifier() && !label.preceding_line_break {
            statement.set_text(label.text);
            statement.cover(label.end);
            self.advance(true);
        }
        self.finish_statement(&mut statement);
        Ok(statement.finish())
    }

    fn parse_expression_statement(&mut self) -> PResult<&'a Node<'a>> {
        let mut statement = self.builder(NodeKind::ExpressionStatement, self.current().pos);
        statement.push(self.parse_expression()?);
        self.finish_statement(&mut statement);
        Ok(statement.finish())
    }
}
