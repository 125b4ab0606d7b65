//! The parser context: token cursor, node helpers and function scopes.
//!
//! The grammar itself is spread over `impl Parser` blocks in the sibling
//! modules. Every rule leaves the cursor on the first token after the
//! construct it parsed.

use as3ts_ast::{Node, NodeBuilder, NodeKind};
use as3ts_core::text::TextPos;
use as3ts_diagnostics::DiagnosticCollection;
use as3ts_scanner::{Scanner, Token};
use bumpalo::Bump;
use tracing::{debug, trace};

use crate::error::{PResult, SyntaxError};

/// Comment bookkeeping for one function body being parsed.
///
/// `depth` counts the blocks currently open inside the function; the body
/// block itself is depth 1. Comments met deeper than the body are queued in
/// `pending` and flushed into the body before the statement that contains
/// them.
#[derive(Debug)]
struct FunctionScope<'a> {
    depth: usize,
    pending: Vec<&'a Node<'a>>,
}

/// Where a comment found in a block belongs.
pub(crate) enum CommentTarget {
    /// Append to the block being parsed.
    Here,
    /// Queue on the innermost function scope.
    Hoist,
}

/// The parser produces a syntax tree from ActionScript source text.
pub struct Parser<'a> {
    pub(crate) arena: &'a Bump,
    scanner: Scanner<'a>,
    file_name: String,
    source: &'a str,
    /// The current token.
    token: Token<'a>,
    /// End of the previously consumed token.
    prev_end: TextPos,
    scopes: Vec<FunctionScope<'a>>,
    /// Comments stepped over outside any function, waiting for the
    /// enclosing container to take them.
    stray: Vec<&'a Node<'a>>,
}

impl<'a> Parser<'a> {
    /// Create a parser positioned on the first token of `source`.
    ///
    /// The first token is read without skipping comments so a leading file
    /// comment is kept.
    pub fn new(arena: &'a Bump, file_name: &str, source: &'a str) -> Self {
        let mut scanner = Scanner::new(source);
        let token = scanner.scan();
        Self {
            arena,
            scanner,
            file_name: file_name.to_string(),
            source,
            token,
            prev_end: 0,
            scopes: Vec::new(),
            stray: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Take the scanner diagnostics collected so far, located in this file.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut located = DiagnosticCollection::new();
        for diagnostic in self.scanner.take_diagnostics().into_diagnostics() {
            located.add(diagnostic.in_file(self.file_name.as_str()));
        }
        located
    }

    // ========================================================================
    // Token management
    // ========================================================================

    /// The current token.
    #[inline]
    pub fn current(&self) -> Token<'a> {
        self.token
    }

    /// Whether the current token is the identifier or punctuator `text`.
    #[inline]
    pub fn tok_is(&self, text: &str) -> bool {
        self.token.is(text)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.token.is_eof()
    }

    /// End offset of the last consumed token.
    #[inline]
    pub(crate) fn prev_end(&self) -> TextPos {
        self.prev_end
    }

    /// Move to the next token. With `skip_trivia`, block comments are
    /// stepped over and never become the current token.
    pub fn advance(&mut self, skip_trivia: bool) {
        self.prev_end = self.token.end;
        loop {
            self.token = self.scanner.scan();
            if !(skip_trivia && self.token.is_comment()) {
                break;
            }
            trace!(pos = self.token.pos, "skipped comment");
        }
        trace!(text = self.token.text, pos = self.token.pos, "advance");
    }

    /// The first token at or after the current one that is not a comment.
    /// The cursor does not move.
    pub(crate) fn peek_past_comments(&self) -> Token<'a> {
        if !self.token.is_comment() {
            return self.token;
        }
        let mut lookahead = self.scanner.clone();
        loop {
            let token = lookahead.scan();
            if !token.is_comment() {
                return token;
            }
        }
    }

    /// Consume `text` or fail. Comments after it are skipped.
    pub(crate) fn expect(&mut self, text: &'static str) -> PResult<Token<'a>> {
        self.expect_with(text, true)
    }

    /// Consume `text` or fail, keeping a following comment as the current
    /// token. Used for `{`, `}` and `;`, the tokens after which a comment can
    /// start a block-level construct.
    pub(crate) fn expect_preserving(&mut self, text: &'static str) -> PResult<Token<'a>> {
        self.expect_with(text, false)
    }

    fn expect_with(&mut self, text: &'static str, skip_trivia: bool) -> PResult<Token<'a>> {
        let token = self.token;
        if !token.is(text) {
            return Err(self.unexpected(text));
        }
        self.advance(skip_trivia);
        Ok(token)
    }

    /// Consume the current token if it is `text`.
    pub(crate) fn optional(&mut self, text: &str, skip_trivia: bool) -> Option<Token<'a>> {
        if self.tok_is(text) {
            let token = self.token;
            self.advance(skip_trivia);
            Some(token)
        } else {
            None
        }
    }

    /// Consume an identifier or fail.
    pub(crate) fn expect_identifier(&mut self) -> PResult<Token<'a>> {
        let token = self.token;
        if !token.is_identifier() {
            return Err(self.unexpected("identifier"));
        }
        self.advance(true);
        Ok(token)
    }

    /// Consume an optional `;`, keeping a following comment.
    pub(crate) fn optional_semicolon(&mut self) -> Option<Token<'a>> {
        self.optional(";", false)
    }

    /// Build the error for a missing `expected` at the current token.
    pub(crate) fn unexpected(&self, expected: &'static str) -> SyntaxError {
        if self.token.is_eof() {
            SyntaxError::UnterminatedConstruct {
                expected,
                offset: self.token.pos,
            }
        } else {
            SyntaxError::UnexpectedToken {
                expected,
                found: self.token.text.to_string(),
                offset: self.token.pos,
            }
        }
    }

    /// Re-scan a current `>` as the longest greater-than operator.
    pub(crate) fn rescan_greater_than(&mut self) {
        if self.token.is(">") {
            self.token = self.scanner.rescan_greater_than(self.token);
        }
    }

    /// Split a current `*=` into `*` and `=` where a type is expected.
    pub(crate) fn rescan_asterisk(&mut self) {
        if self.token.is("*=") {
            self.token = self.scanner.rescan_asterisk(self.token);
        }
    }

    // ========================================================================
    // Node helpers
    // ========================================================================

    /// A leaf node spanning `token` with the token text as payload.
    pub(crate) fn leaf(&self, kind: NodeKind, token: Token<'a>) -> &'a Node<'a> {
        Node::leaf(self.arena, kind, token.pos, token.end, Some(token.text))
    }

    /// Start a node at `pos`.
    pub(crate) fn builder(&self, kind: NodeKind, pos: TextPos) -> NodeBuilder<'a> {
        NodeBuilder::new_in(self.arena, kind, pos, pos)
    }

    /// The source text between two offsets.
    pub(crate) fn slice(&self, pos: TextPos, end: TextPos) -> &'a str {
        self.source.get(pos as usize..end as usize).unwrap_or("")
    }

    // ========================================================================
    // Function scopes and comments
    // ========================================================================

    /// Open a function scope. Comments in the function's nested blocks are
    /// collected for its body until [`Parser::leave_function`].
    pub fn enter_function(&mut self) {
        self.scopes.push(FunctionScope { depth: 0, pending: Vec::new() });
    }

    /// Close the innermost function scope. Comments still queued (a function
    /// without a body) move to the enclosing function or container.
    pub fn leave_function(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        if scope.pending.is_empty() {
            return;
        }
        debug!(count = scope.pending.len(), "re-homing comments of a closed function");
        match self.scopes.last_mut() {
            Some(outer) => outer.pending.extend(scope.pending),
            None => self.stray.extend(scope.pending),
        }
    }

    /// Record that a block was opened. Returns whether it is a function body.
    pub(crate) fn enter_block(&mut self) -> bool {
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.depth += 1;
                scope.depth == 1
            }
            None => false,
        }
    }

    pub(crate) fn leave_block(&mut self) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.depth = scope.depth.saturating_sub(1);
        }
    }

    /// Decide where a comment met directly in the current block goes.
    pub(crate) fn comment_target(&self) -> CommentTarget {
        match self.scopes.last() {
            Some(scope) if scope.depth > 1 => CommentTarget::Hoist,
            _ => CommentTarget::Here,
        }
    }

    /// Queue a comment on the innermost function scope.
    pub(crate) fn hoist_comment(&mut self, comment: &'a Node<'a>) {
        if let Some(scope) = self.scopes.last_mut() {
            debug!(pos = comment.pos(), depth = scope.depth, "hoisting comment to function body");
            scope.pending.push(comment);
        }
    }

    /// Move the queued comments of the innermost function into `body`.
    pub(crate) fn flush_hoisted(&mut self, body: &mut NodeBuilder<'a>) {
        if let Some(scope) = self.scopes.last_mut() {
            for comment in scope.pending.drain(..) {
                body.push(comment);
            }
        }
    }

    /// Position in the deferred-comment queue. Taken before parsing an item
    /// so the container only collects comments stepped over inside it.
    pub(crate) fn stray_mark(&self) -> usize {
        self.stray.len()
    }

    /// Move the comments deferred since `mark` into `container`, after the
    /// item that held them.
    pub(crate) fn flush_stray(&mut self, container: &mut NodeBuilder<'a>, mark: usize) {
        if mark >= self.stray.len() {
            return;
        }
        for comment in self.stray.drain(mark..) {
            container.push(comment);
        }
    }

    /// Step over comment tokens where the grammar cannot hold them. Inside a
    /// function body they are hoisted to the innermost open body; elsewhere,
    /// including a signature whose body has not started, they wait for the
    /// enclosing container.
    pub(crate) fn skip_comments(&mut self) {
        while self.token.is_comment() {
            let comment = self.leaf(NodeKind::MultiLineComment, self.token);
            match self.scopes.iter_mut().rev().find(|scope| scope.depth > 0) {
                Some(scope) => {
                    debug!(pos = comment.pos(), depth = scope.depth, "hoisting comment to function body");
                    scope.pending.push(comment);
                }
                None => {
                    trace!(pos = comment.pos(), "deferring comment to container");
                    self.stray.push(comment);
                }
            }
            self.advance(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token_keeps_comment() {
        let arena = Bump::new();
        let parser = Parser::new(&arena, "test.as", "/* header */ package {}");
        assert!(parser.current().is_comment());
    }

    #[test]
    fn test_advance_skipping_trivia() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "test.as", "a /* c */ b");
        parser.advance(true);
        assert!(parser.tok_is("b"));
        assert_eq!(parser.prev_end(), 1);
    }

    #[test]
    fn test_advance_preserving_comment() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "test.as", "a /* c */ b");
        parser.advance(false);
        assert!(parser.current().is_comment());
    }

    #[test]
    fn test_expect_at_end_is_unterminated() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "test.as", "");
        let err = parser.expect(")").unwrap_err();
        assert_eq!(err, SyntaxError::UnterminatedConstruct { expected: ")", offset: 0 });
    }

    #[test]
    fn test_expect_reports_found_token() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "test.as", "  ]");
        let err = parser.expect(")").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken { expected: ")", found: "]".to_string(), offset: 2 }
        );
    }

    #[test]
    fn test_scanner_diagnostics_carry_file() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "Broken.as", "#");
        let diagnostics = parser.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.diagnostics()[0].file.as_deref(), Some("Broken.as"));
    }
}
