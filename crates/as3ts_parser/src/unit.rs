//! Compilation units: packages, imports, classes, interfaces and members.

use as3ts_ast::{Child, Node, NodeBuilder, NodeKind};
use as3ts_core::text::TextPos;
use tracing::{debug, trace};

use crate::error::{PResult, SyntaxError};
use crate::parser::Parser;

/// Words that may precede a declaration.
const MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "internal",
    "static",
    "override",
    "final",
    "dynamic",
    "native",
    "virtual",
];

/// Parameters, return type and body shared by functions, accessors and
/// function expressions.
pub(crate) struct FunctionTail<'a> {
    pub parameters: &'a Node<'a>,
    pub return_type: Child<'a>,
    pub body: Child<'a>,
}

impl<'a> Parser<'a> {
    /// Parse a whole file into a COMPILATION_UNIT.
    ///
    /// Children are, in source order, file-level comments, an optional
    /// PACKAGE, IMPORTs and any declarations or statements outside the
    /// package.
    pub fn parse_compilation_unit(&mut self) -> PResult<&'a Node<'a>> {
        debug!(file = self.file_name(), len = self.source().len(), "parsing compilation unit");
        let mut unit = self.builder(NodeKind::CompilationUnit, 0);
        self.parse_unit_items(&mut unit, None)?;
        unit.cover(self.current().pos);
        Ok(unit.finish())
    }

    /// Parse items into `container` until `closer` (or the end of input
    /// when `closer` is `None`).
    fn parse_unit_items(
        &mut self,
        container: &mut NodeBuilder<'a>,
        closer: Option<&'static str>,
    ) -> PResult<()> {
        loop {
            let token = self.current();
            match closer {
                Some(closer) if token.is(closer) => return Ok(()),
                Some(closer) if token.is_eof() => {
                    return Err(SyntaxError::UnterminatedConstruct {
                        expected: closer,
                        offset: token.pos,
                    })
                }
                None if token.is_eof() => return Ok(()),
                _ => {}
            }

            if token.is_comment() {
                container.push(self.leaf(NodeKind::MultiLineComment, token));
                self.advance(false);
                continue;
            }
            let mark = self.stray_mark();
            let item = if token.is("package") && closer.is_none() {
                self.parse_package()?
            } else if token.is("import") {
                self.parse_import()?
            } else {
                self.parse_unit_item()?
            };
            container.push(item);
            self.flush_stray(container, mark);
        }
    }

    /// `package [qualified.name] { ... }`. The name is the node's text.
    fn parse_package(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        trace!(pos = keyword.pos, "parse_package");
        self.advance(true);
        let mut package = self.builder(NodeKind::Package, keyword.pos);
        if !self.tok_is("{") {
            if !self.current().is_identifier() {
                return Err(self.unexpected("{"));
            }
            let name = self.parse_qualified_name(false);
            package.set_text(name);
        }
        self.expect_preserving("{")?;
        self.parse_unit_items(&mut package, Some("}"))?;
        let close = self.expect_preserving("}")?;
        package.cover(close.end);
        Ok(package.finish())
    }

    /// `import a.b.C;` or `import a.b.*;` into an IMPORT leaf.
    fn parse_import(&mut self) -> PResult<&'a Node<'a>> {
        let keyword = self.current();
        self.advance(true);
        if !self.current().is_identifier() {
            return Err(self.unexpected("identifier"));
        }
        let name = self.parse_qualified_name(false);
        let mut end = self.prev_end();
        if let Some(semicolon) = self.optional_semicolon() {
            end = semicolon.end;
        }
        Ok(Node::leaf(self.arena, NodeKind::Import, keyword.pos, end, Some(name)))
    }

    /// A declaration after optional modifiers, or a plain statement.
    fn parse_unit_item(&mut self) -> PResult<&'a Node<'a>> {
        let start = self.current().pos;
        let modifiers = self.parse_modifier_list();
        let token = self.current();
        if token.is("class") {
            self.parse_class(modifiers, start)
        } else if token.is("interface") {
            self.parse_interface(modifiers, start)
        } else if token.is("function") {
            self.parse_function(modifiers, start)
        } else if token.is("var") || token.is("const") {
            self.parse_variable_list(modifiers, start, true)
        } else if modifiers.children.is_empty() {
            self.parse_statement()
        } else {
            Err(self.unexpected("declaration"))
        }
    }

    /// Collect leading modifiers into a MODIFIER_LIST. With no modifier the
    /// list is empty and sits at the current token.
    fn parse_modifier_list(&mut self) -> &'a Node<'a> {
        let mut list = self.builder(NodeKind::ModifierList, self.current().pos);
        while MODIFIERS.iter().any(|modifier| self.tok_is(modifier)) {
            let modifier = self.current();
            list.push(self.leaf(NodeKind::Modifier, modifier));
            self.advance(true);
        }
        list.finish()
    }

    pub(crate) fn empty_modifier_list(&self, pos: TextPos) -> &'a Node<'a> {
        self.builder(NodeKind::ModifierList, pos).finish()
    }

    /// CLASS: MODIFIER_LIST, NAME, EXTENDS (or absent), IMPLEMENTS (or
    /// absent), CONTENT.
    fn parse_class(&mut self, modifiers: &'a Node<'a>, start: TextPos) -> PResult<&'a Node<'a>> {
        trace!(pos = start, "parse_class");
        self.advance(true);
        let mut class = self.builder(NodeKind::Class, start);
        class.push(modifiers);
        let name = self.expect_identifier()?;
        class.push(self.leaf(NodeKind::Name, name));
        let extends = self.parse_type_clause("extends", NodeKind::Extends)?;
        class.push_slot(extends);
        let implements = self.parse_type_clause("implements", NodeKind::Implements)?;
        class.push_slot(implements);
        class.push(self.parse_content(false)?);
        Ok(class.finish())
    }

    /// INTERFACE: MODIFIER_LIST, NAME, EXTENDS (or absent), CONTENT.
    fn parse_interface(
        &mut self,
        modifiers: &'a Node<'a>,
        start: TextPos,
    ) -> PResult<&'a Node<'a>> {
        trace!(pos = start, "parse_interface");
        self.advance(true);
        let mut interface = self.builder(NodeKind::Interface, start);
        interface.push(modifiers);
        let name = self.expect_identifier()?;
        interface.push(self.leaf(NodeKind::Name, name));
        let extends = self.parse_type_clause("extends", NodeKind::Extends)?;
        interface.push_slot(extends);
        interface.push(self.parse_content(true)?);
        Ok(interface.finish())
    }

    /// `keyword Type, Type...` into a node of `kind` holding the types.
    fn parse_type_clause(&mut self, keyword: &str, kind: NodeKind) -> PResult<Child<'a>> {
        let Some(token) = self.optional(keyword, true) else {
            return Ok(None);
        };
        let mut clause = self.builder(kind, token.pos);
        clause.cover(token.end);
        loop {
            clause.push(self.parse_type()?);
            if self.optional(",", true).is_none() {
                break;
            }
        }
        Ok(Some(clause.finish()))
    }

    /// `{ members }` into CONTENT. Interface members have no bodies.
    fn parse_content(&mut self, is_interface: bool) -> PResult<&'a Node<'a>> {
        let open = self.expect_preserving("{")?;
        let mut content = self.builder(NodeKind::Content, open.pos);
        while !self.tok_is("}") {
            let token = self.current();
            if token.is_eof() {
                return Err(SyntaxError::UnterminatedConstruct {
                    expected: "}",
                    offset: token.pos,
                });
            }
            if token.is_comment() {
                content.push(self.leaf(NodeKind::MultiLineComment, token));
                self.advance(false);
                continue;
            }
            if token.is(";") {
                self.advance(false);
                continue;
            }
            let mark = self.stray_mark();
            content.push(self.parse_member(is_interface)?);
            self.flush_stray(&mut content, mark);
        }
        let close = self.expect_preserving("}")?;
        content.cover(close.end);
        Ok(content.finish())
    }

    fn parse_member(&mut self, is_interface: bool) -> PResult<&'a Node<'a>> {
        let start = self.current().pos;
        let modifiers = self.parse_modifier_list();
        let token = self.current();
        if token.is("function") {
            self.parse_function(modifiers, start)
        } else if (token.is("var") || token.is("const")) && !is_interface {
            self.parse_variable_list(modifiers, start, true)
        } else {
            Err(self.unexpected("class member"))
        }
    }

    /// `function [get|set] name(params)[:Type] [{ body }]` into FUNCTION,
    /// GET or SET with slots MODIFIER_LIST, NAME, PARAMETER_LIST, return
    /// type (or absent), BLOCK (or absent).
    pub(crate) fn parse_function(
        &mut self,
        modifiers: &'a Node<'a>,
        start: TextPos,
    ) -> PResult<&'a Node<'a>> {
        trace!(pos = start, "parse_function");
        self.advance(true);

        // `get`/`set` name an accessor only when another name follows them;
        // `function get()` is a plain function called `get`.
        let first = self.expect_identifier()?;
        let (kind, name) = if (first.is("get") || first.is("set")) && self.current().is_identifier()
        {
            let kind = if first.is("get") { NodeKind::Get } else { NodeKind::Set };
            (kind, self.expect_identifier()?)
        } else {
            (NodeKind::Function, first)
        };

        let mut function = self.builder(kind, start);
        function.push(modifiers);
        function.push(self.leaf(NodeKind::Name, name));

        self.enter_function();
        let tail = self.parse_function_tail(false);
        self.leave_function();
        let tail = tail?;

        function.push(tail.parameters);
        function.push_slot(tail.return_type);
        function.push_slot(tail.body);
        if tail.body.is_none() {
            if let Some(semicolon) = self.optional_semicolon() {
                function.cover(semicolon.end);
            }
        }
        Ok(function.finish())
    }

    /// Parameters, optional return type and body. Must be called inside the
    /// function's scope. Without `body_required` a missing body is absent.
    pub(crate) fn parse_function_tail(&mut self, body_required: bool) -> PResult<FunctionTail<'a>> {
        let parameters = self.parse_parameter_list()?;
        let return_type = self.parse_optional_type()?;
        let body = if body_required || self.tok_is("{") {
            let body = self.builder(NodeKind::Block, self.current().pos);
            Some(self.parse_block(Some(body))?)
        } else {
            None
        };
        Ok(FunctionTail { parameters, return_type, body })
    }
}
