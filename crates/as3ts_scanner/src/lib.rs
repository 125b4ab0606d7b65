//! as3ts_scanner: Tokenizer for ActionScript source code.
//!
//! Produces one [`Token`] at a time from source text. Every token carries
//! its literal text (a slice of the source) and its byte range:
//! - Identifiers and keywords (keywords are identifiers; the grammar
//!   matches them by text)
//! - Numeric and string literals, kept verbatim
//! - Punctuators, longest match first
//! - Block comments, surfaced as tokens so the parser can keep them
//!
//! Whitespace and `//` comments are trivia and never become tokens.

mod char_codes;
mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
