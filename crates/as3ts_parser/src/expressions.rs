//! Expressions, by precedence climbing.

use as3ts_ast::{Node, NodeKind};
use as3ts_scanner::TokenKind;
use tracing::trace;

use crate::error::PResult;
use crate::parser::Parser;
use crate::precedence::{
    binary_operator_precedence, is_assignment_operator, is_prefix_operator, OperatorPrecedence,
};

impl<'a> Parser<'a> {
    /// Parse an assignment expression.
    pub fn parse_expression(&mut self) -> PResult<&'a Node<'a>> {
        trace!(pos = self.current().pos, "parse_expression");
        self.parse_assignment_expression()
    }

    /// Assignment is right associative: `a = b = c` is `a = (b = c)`.
    fn parse_assignment_expression(&mut self) -> PResult<&'a Node<'a>> {
        let target = self.parse_conditional_expression()?;

        self.rescan_greater_than();
        let operator = self.current();
        if !is_assignment_operator(&operator) {
            return Ok(target);
        }
        self.advance(true);
        let value = self.parse_assignment_expression()?;

        let mut node = self.builder(NodeKind::Assignment, target.pos()).with_text(operator.text);
        node.push(target);
        node.push(value);
        Ok(node.finish())
    }

    fn parse_conditional_expression(&mut self) -> PResult<&'a Node<'a>> {
        let condition = self.parse_binary_expression(OperatorPrecedence::Lowest)?;
        if !self.tok_is("?") {
            return Ok(condition);
        }
        self.advance(true);
        let when_true = self.parse_assignment_expression()?;
        self.expect(":")?;
        let when_false = self.parse_assignment_expression()?;

        let mut node = self.builder(NodeKind::Conditional, condition.pos());
        node.push(condition);
        node.push(when_true);
        node.push(when_false);
        Ok(node.finish())
    }

    fn parse_binary_expression(
        &mut self,
        min_precedence: OperatorPrecedence,
    ) -> PResult<&'a Node<'a>> {
        let mut left = self.parse_unary_expression()?;

        loop {
            self.rescan_greater_than();
            let operator = self.current();
            let Some(precedence) = binary_operator_precedence(&operator) else {
                break;
            };
            if precedence <= min_precedence {
                break;
            }
            self.advance(true);
            let right = self.parse_binary_expression(precedence)?;

            let mut node = self.builder(NodeKind::Binary, left.pos()).with_text(operator.text);
            node.push(left);
            node.push(right);
            left = node.finish();
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> PResult<&'a Node<'a>> {
        let operator = self.current();
        if !is_prefix_operator(&operator) {
            return self.parse_postfix_expression();
        }
        self.advance(true);
        let operand = self.parse_unary_expression()?;

        let mut node = self.builder(NodeKind::Unary, operator.pos).with_text(operator.text);
        node.push(operand);
        Ok(node.finish())
    }

    /// `++`/`--` after an operand, on the same line.
    fn parse_postfix_expression(&mut self) -> PResult<&'a Node<'a>> {
        let operand = self.parse_left_hand_side_expression()?;
        let operator = self.current();
        if !(operator.is("++") || operator.is("--")) || operator.preceding_line_break {
            return Ok(operand);
        }
        self.advance(true);

        let mut node = self.builder(NodeKind::Postfix, operand.pos()).with_text(operator.text);
        node.push(operand);
        node.cover(operator.end);
        Ok(node.finish())
    }

    fn parse_left_hand_side_expression(&mut self) -> PResult<&'a Node<'a>> {
        let primary = self.parse_primary_expression()?;
        self.parse_member_chain(primary, true)
    }

    /// Apply `.name`, `[index]`, `.<Type>` and, when `allow_calls`, `(args)`
    /// suffixes to `expression`.
    fn parse_member_chain(
        &mut self,
        mut expression: &'a Node<'a>,
        allow_calls: bool,
    ) -> PResult<&'a Node<'a>> {
        loop {
            let token = self.current();
            expression = if token.is(".") {
                self.advance(true);
                let name = self.expect_identifier()?;
                let mut node = self.builder(NodeKind::Dot, expression.pos());
                node.push(expression);
                node.push(self.leaf(NodeKind::Name, name));
                node.finish()
            } else if token.is("[") {
                self.advance(true);
                let index = self.parse_expression()?;
                let close = self.expect("]")?;
                let mut node = self.builder(NodeKind::ArrayAccessor, expression.pos());
                node.push(expression);
                node.push(index);
                node.cover(close.end);
                node.finish()
            } else if token.is(".<") {
                // `Vector.<T>` in expression position, e.g. `new Vector.<int>()`.
                self.advance(true);
                let base = self.slice(expression.pos(), expression.end());
                let mut node = self.builder(NodeKind::Vector, expression.pos()).with_text(base);
                node.cover(expression.end());
                node.push(self.parse_type()?);
                let close = self.expect(">")?;
                node.cover(close.end);
                node.finish()
            } else if token.is("(") && allow_calls {
                let arguments = self.parse_arguments()?;
                let mut node = self.builder(NodeKind::Call, expression.pos());
                node.push(expression);
                node.push(arguments);
                node.finish()
            } else {
                return Ok(expression);
            };
        }
    }

    /// `( expression, ... )` into ARGUMENTS spanning both parens.
    fn parse_arguments(&mut self) -> PResult<&'a Node<'a>> {
        let open = self.expect("(")?;
        let mut arguments = self.builder(NodeKind::Arguments, open.pos);
        while !self.tok_is(")") {
            arguments.push(self.parse_expression()?);
            if self.optional(",", true).is_none() {
                break;
            }
        }
        let close = self.expect(")")?;
        arguments.cover(close.end);
        Ok(arguments.finish())
    }

    fn parse_primary_expression(&mut self) -> PResult<&'a Node<'a>> {
        let token = self.current();
        match token.kind {
            TokenKind::NumericLiteral | TokenKind::StringLiteral => {
                self.advance(true);
                Ok(self.leaf(NodeKind::Literal, token))
            }
            TokenKind::Identifier if token.text == "function" => self.parse_lambda(),
            TokenKind::Identifier if token.text == "new" => self.parse_new_expression(),
            TokenKind::Identifier => {
                self.advance(true);
                Ok(self.leaf(NodeKind::Primary, token))
            }
            TokenKind::Punctuator if token.text == "(" => self.parse_encapsulated(),
            TokenKind::Punctuator if token.text == "[" => self.parse_array_literal(),
            TokenKind::Punctuator if token.text == "{" => self.parse_object_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_encapsulated(&mut self) -> PResult<&'a Node<'a>> {
        let open = self.expect("(")?;
        let mut node = self.builder(NodeKind::Encapsulated, open.pos);
        node.push(self.parse_expression()?);
        let close = self.expect(")")?;
        node.cover(close.end);
        Ok(node.finish())
    }

    /// `[a, b, c]`. A trailing comma is allowed.
    fn parse_array_literal(&mut self) -> PResult<&'a Node<'a>> {
        let open = self.expect("[")?;
        let mut node = self.builder(NodeKind::ArrayLiteral, open.pos);
        while !self.tok_is("]") {
            node.push(self.parse_expression()?);
            if self.optional(",", true).is_none() {
                break;
            }
        }
        let close = self.expect("]")?;
        node.cover(close.end);
        Ok(node.finish())
    }

    /// `{ key: value, ... }`. Keys are names, strings or numbers.
    fn parse_object_literal(&mut self) -> PResult<&'a Node<'a>> {
        let open = self.expect("{")?;
        let mut node = self.builder(NodeKind::ObjectLiteral, open.pos);
        while !self.tok_is("}") {
            node.push(self.parse_object_entry()?);
            if self.optional(",", true).is_none() {
                break;
            }
        }
        let close = self.expect("}")?;
        node.cover(close.end);
        Ok(node.finish())
    }

    fn parse_object_entry(&mut self) -> PResult<&'a Node<'a>> {
        let key = self.current();
        let key_node = match key.kind {
            TokenKind::Identifier => self.leaf(NodeKind::Name, key),
            TokenKind::StringLiteral | TokenKind::NumericLiteral => {
                self.leaf(NodeKind::Literal, key)
            }
            _ => return Err(self.unexpected("property name")),
        };
        self.advance(true);
        self.expect(":")?;

        let mut entry = self.builder(NodeKind::ObjectEntry, key.pos);
        entry.push(key_node);
        entry.push(self.parse_expression()?);
        Ok(entry.finish())
    }

    /// `new Callee[(args)]`. The argument list slot is absent for `new Foo`.
    fn parse_new_expression(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut node = self.builder(NodeKind::New, keyword.pos);

        let primary = self.parse_primary_expression()?;
        let callee = self.parse_member_chain(primary, false)?;
        node.push(callee);
        if self.tok_is("(") {
            node.push(self.parse_arguments()?);
        } else {
            node.push_slot(None);
        }
        Ok(node.finish())
    }

    /// `function [name](params)[:Type] { body }` in expression position.
    ///
    /// LAMBDA slots: PARAMETER_LIST, return type (or absent), BLOCK. A name,
    /// if any, is the node's text. The body gets its own function scope.
    fn parse_lambda(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        let mut lambda = self.builder(NodeKind::Lambda, keyword.pos);
        if self.current().is_identifier() {
            lambda.set_text(self.current().text);
            self.advance(true);
        }

        self.enter_function();
        let tail = self.parse_function_tail(true);
        self.leave_function();
        let tail = tail?;
        lambda.push(tail.parameters);
        lambda.push_slot(tail.return_type);
        lambda.push_slot(tail.body);

        // The body's closing brace keeps a following comment; inside an
        // expression it cannot stay the current token.
        self.skip_comments();
        Ok(lambda.finish())
    }
}
