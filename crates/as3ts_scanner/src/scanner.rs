//! The ActionScript scanner.
//!
//! Works directly on the UTF-8 bytes of the source so every position is a
//! byte offset. ASCII is handled byte-wise; non-ASCII characters are decoded
//! only where they can appear (identifiers, strings, comments, whitespace).

use as3ts_core::text::{TextPos, TextSpan};
use as3ts_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use tracing::debug;

use crate::char_codes::*;
use crate::token::{Token, TokenKind};

/// Punctuators of two or more characters, longest first.
///
/// `>` never combines here; [`Scanner::rescan_greater_than`] builds the
/// shift and comparison operators on demand, so that `Vector.<Vector.<int>>`
/// closes two type arguments.
const COMPOUND_PUNCTUATORS: &[&str] = &[
    "...", "===", "!==", "<<=", "&&=", "||=", "::", "..", ".<", "==", "!=", "<=", "<<", "++",
    "+=", "--", "-=", "*=", "/=", "%=", "&&", "&=", "||", "|=", "^=",
];

/// Greater-than operators, longest first.
const GREATER_THAN_OPERATORS: &[&str] = &[">>>=", ">>>", ">>=", ">>", ">="];

/// The scanner converts ActionScript source text into tokens.
///
/// Cloning a scanner is how the parser looks ahead: the clone is advanced
/// and thrown away.
#[derive(Clone)]
pub struct Scanner<'src> {
    /// The source text being scanned.
    text: &'src str,
    /// Current byte position in the text.
    pos: usize,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'src> Scanner<'src> {
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            pos: 0,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// The full source text.
    pub fn source(&self) -> &'src str {
        self.text
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Character access
    // ========================================================================

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    /// The character at the current position.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn rest(&self) -> &'src str {
        &self.text[self.pos..]
    }

    fn error(&mut self, start: usize, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(start as TextPos, self.pos as TextPos);
        debug!(code = message.code, start, end = self.pos, "scanner diagnostic");
        self.diagnostics.add(Diagnostic::at(span, message, args));
    }

    fn token(&self, kind: TokenKind, start: usize, preceding_line_break: bool) -> Token<'src> {
        Token {
            kind,
            text: &self.text[start..self.pos],
            pos: start as TextPos,
            end: self.pos as TextPos,
            preceding_line_break,
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Skip whitespace and line comments. Returns whether a line break was seen.
    fn skip_trivia(&mut self) -> bool {
        let mut line_break = false;
        while let Some(ch) = self.current_char() {
            if is_line_break(ch) {
                line_break = true;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(1) == Some(b'/') {
                let rest = &self.text.as_bytes()[self.pos..];
                self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
            } else {
                break;
            }
        }
        line_break
    }

    /// Scan the next token. Returns an `EndOfFile` token at the end of input,
    /// and keeps returning it on further calls.
    pub fn scan(&mut self) -> Token<'src> {
        let line_break = self.skip_trivia();
        let start = self.pos;

        let Some(ch) = self.current_char() else {
            return self.token(TokenKind::EndOfFile, start, line_break);
        };

        let kind = match ch {
            '/' if self.byte_at(1) == Some(b'*') => self.scan_block_comment(start),
            '\'' | '"' => self.scan_string_literal(start, ch),
            '0'..='9' => self.scan_number(),
            '.' if self.byte_at(1).map_or(false, |b| b.is_ascii_digit()) => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ => self.scan_punctuator(start, ch),
        };

        self.token(kind, start, line_break)
    }

    /// Re-scan a `>` token as the longest greater-than operator starting at
    /// it (`>>`, `>>>`, `>=`, `>>=`, `>>>=`). Returns the token unchanged if
    /// nothing longer matches.
    ///
    /// Only valid directly after `token` was scanned.
    pub fn rescan_greater_than(&mut self, token: Token<'src>) -> Token<'src> {
        debug_assert!(token.text == ">" && token.end as usize == self.pos);
        let start = token.pos as usize;
        let rest = &self.text[start..];
        match GREATER_THAN_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            Some(op) => {
                self.pos = start + op.len();
                self.token(TokenKind::Punctuator, start, token.preceding_line_break)
            }
            None => token,
        }
    }

    /// Re-scan a `*=` token as a lone `*`, so the `=` is scanned next. In
    /// `a:*=null` the `*` is the parameter type and `=` starts its default.
    ///
    /// Only valid directly after `token` was scanned.
    pub fn rescan_asterisk(&mut self, token: Token<'src>) -> Token<'src> {
        if token.text != "*=" || token.end as usize != self.pos {
            return token;
        }
        let start = token.pos as usize;
        self.pos = start + 1;
        self.token(TokenKind::Punctuator, start, token.preceding_line_break)
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_block_comment(&mut self, start: usize) -> TokenKind {
        let body = &self.text.as_bytes()[start + 2..];
        match memchr::memmem::find(body, b"*/") {
            Some(offset) => self.pos = start + 2 + offset + 2,
            None => {
                self.pos = self.text.len();
                self.error(start, &messages::ASTERISK_SLASH_EXPECTED, &[]);
            }
        }
        TokenKind::MultiLineComment
    }

    fn scan_string_literal(&mut self, start: usize, quote: char) -> TokenKind {
        self.pos += 1; // opening quote
        loop {
            let Some(ch) = self.current_char() else {
                self.error(start, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.error(start, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                break;
            }
            self.pos += ch.len_utf8();
            if ch == '\\' {
                if let Some(escaped) = self.current_char() {
                    self.pos += escaped.len_utf8();
                }
            }
        }
        TokenKind::StringLiteral
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.byte_at(0) == Some(b'0') && matches!(self.byte_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            while self.current_char().map_or(false, is_hex_digit) {
                self.pos += 1;
            }
            return TokenKind::NumericLiteral;
        }

        self.scan_digits();
        if self.byte_at(0) == Some(b'.') && self.byte_at(1).map_or(false, |b| b.is_ascii_digit()) {
            self.pos += 1;
            self.scan_digits();
        }

        // Exponent
        if matches!(self.byte_at(0), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(self.byte_at(1), Some(b'+' | b'-')));
            if self.byte_at(1 + sign).map_or(false, |b| b.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.scan_digits();
            }
        }
        TokenKind::NumericLiteral
    }

    fn scan_digits(&mut self) {
        while self.current_char().map_or(false, is_digit) {
            self.pos += 1;
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        let mut chars = self.rest().char_indices();
        // The first character was already checked by the caller.
        chars.next();
        let len = chars
            .find(|&(_, ch)| !is_identifier_part(ch))
            .map_or(self.rest().len(), |(offset, _)| offset);
        self.pos += len;
        TokenKind::Identifier
    }

    fn scan_punctuator(&mut self, start: usize, ch: char) -> TokenKind {
        let rest = self.rest();
        if let Some(op) = COMPOUND_PUNCTUATORS.iter().find(|op| rest.starts_with(**op)) {
            self.pos += op.len();
            return TokenKind::Punctuator;
        }
        self.pos += ch.len_utf8();
        match ch {
            '{' | '}' | '(' | ')' | '[' | ']' | ';' | ',' | '?' | '~' | '@' | ':' | '.' | '='
            | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' => {
                TokenKind::Punctuator
            }
            _ => {
                let text = ch.to_string();
                self.error(start, &messages::INVALID_CHARACTER, &[&text]);
                TokenKind::Unknown
            }
        }
    }
}
