//! Tokens produced by the scanner.

use as3ts_core::text::{TextPos, TextRange};

/// The coarse category of a token. Keywords and punctuators are further
/// distinguished by their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    NumericLiteral,
    /// A string literal, quotes included.
    StringLiteral,
    Punctuator,
    /// A `/* ... */` comment, delimiters included.
    MultiLineComment,
    /// A character that cannot start any token.
    Unknown,
    EndOfFile,
}

/// A scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The token's literal text, a slice of the source.
    pub text: &'src str,
    /// Start position in the source text.
    pub pos: TextPos,
    /// End position in the source text (exclusive).
    pub end: TextPos,
    /// Whether a line break appeared between the previous token and this one.
    pub preceding_line_break: bool,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, pos: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            text,
            pos,
            end,
            preceding_line_break: false,
        }
    }

    /// Whether this token is the identifier or punctuator spelled `text`.
    ///
    /// String literals never match, so `"{"` is not an opening brace.
    #[inline]
    pub fn is(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Punctuator) && self.text == text
    }

    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Whether this token is a block comment.
    #[inline]
    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::MultiLineComment && self.text.starts_with("/*")
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }
}
