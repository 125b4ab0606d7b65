//! as3ts_core: Core utilities for the as3ts ActionScript translator.
//!
//! Provides source positions, text ranges, line maps and the bump arena
//! that owns every syntax tree produced by the parser.

pub mod arena;
pub mod text;

// Re-export commonly used types
pub use arena::CompilerArena;
pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
