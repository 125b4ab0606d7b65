//! Fatal parse errors.

use as3ts_core::text::{TextPos, TextSpan};
use as3ts_diagnostics::{messages, Diagnostic};
use thiserror::Error;

/// Result type for grammar rules.
pub type PResult<T> = Result<T, SyntaxError>;

/// A syntax error that aborts the parse of a file.
///
/// There is no recovery: the first error is returned and no partial tree is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A required token or identifier is missing.
    #[error("'{expected}' expected but found '{found}' at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: TextPos,
    },
    /// The end of the input was reached while a closing token was required.
    #[error("unexpected end of file at offset {offset}, '{expected}' expected")]
    UnterminatedConstruct {
        expected: &'static str,
        offset: TextPos,
    },
}

impl SyntaxError {
    /// Byte offset of the offending token.
    pub fn offset(&self) -> TextPos {
        match self {
            SyntaxError::UnexpectedToken { offset, .. }
            | SyntaxError::UnterminatedConstruct { offset, .. } => *offset,
        }
    }

    /// What the grammar required at [`SyntaxError::offset`].
    pub fn expected(&self) -> &'static str {
        match self {
            SyntaxError::UnexpectedToken { expected, .. }
            | SyntaxError::UnterminatedConstruct { expected, .. } => expected,
        }
    }

    /// The source span of the offending token. Empty at end of file.
    pub fn span(&self) -> TextSpan {
        match self {
            SyntaxError::UnexpectedToken { found, offset, .. } => {
                TextSpan::new(*offset, found.len() as TextPos)
            }
            SyntaxError::UnterminatedConstruct { offset, .. } => TextSpan::empty(*offset),
        }
    }

    /// Convert into a diagnostic located in `file`.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let span = self.span();
        match self {
            SyntaxError::UnexpectedToken { expected, found, .. } => Diagnostic::with_location(
                file.to_string(),
                span,
                &messages::_0_EXPECTED_BUT_FOUND_1,
                &[*expected, found.as_str()],
            ),
            SyntaxError::UnterminatedConstruct { expected, .. } => Diagnostic::with_location(
                file.to_string(),
                span,
                &messages::UNEXPECTED_END_OF_FILE_0_EXPECTED,
                &[*expected],
            ),
        }
    }
}
