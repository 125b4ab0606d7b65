//! as3ts_parser: Recursive descent parser for ActionScript.
//!
//! Parses the scanner's token stream into an arena-allocated tree of
//! uniform [`as3ts_ast::Node`]s. The [`Parser`] value is the whole parsing
//! context; grammar rules live in `impl Parser` blocks grouped by topic:
//!
//! - `common`: qualified names, blocks, parameter lists, name/type/init
//! - `statements`, `expressions`, `types`
//! - `unit`: packages, imports, classes, interfaces and members
//!
//! Block comments are kept in the tree. A comment inside a nested block of
//! a function body is attached to the body itself.

mod common;
mod error;
mod expressions;
mod parser;
mod precedence;
mod statements;
mod types;
mod unit;

pub use error::{PResult, SyntaxError};
pub use parser::Parser;

use as3ts_ast::Node;
use as3ts_diagnostics::DiagnosticCollection;
use bumpalo::Bump;

/// The outcome of parsing one file.
pub struct ParsedFile<'a> {
    /// The COMPILATION_UNIT, or the error that stopped the parse.
    pub unit: PResult<&'a Node<'a>>,
    /// Non-fatal scanner diagnostics.
    pub diagnostics: DiagnosticCollection,
}

/// Parse a whole file.
pub fn parse_file<'a>(arena: &'a Bump, file_name: &str, source: &'a str) -> ParsedFile<'a> {
    let mut parser = Parser::new(arena, file_name, source);
    let unit = parser.parse_compilation_unit();
    ParsedFile {
        unit,
        diagnostics: parser.take_diagnostics(),
    }
}
