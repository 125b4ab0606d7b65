//! Arena allocation for syntax trees.
//!
//! A parsed file's nodes, child lists and joined names all live in one bump
//! arena. The tree is dropped in one step when the arena goes away.

use bumpalo::Bump;

/// The compiler arena wraps a bump allocator for all per-file allocations.
pub struct CompilerArena {
    bump: Bump,
}

impl CompilerArena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena sized for a source file of `source_len` bytes.
    ///
    /// Trees are a small multiple of their source size, so this avoids most
    /// chunk growth while parsing.
    pub fn for_source(source_len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(source_len.saturating_mul(4)),
        }
    }

    /// Get a reference to the underlying bump allocator.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}

impl Default for CompilerArena {
    fn default() -> Self {
        Self::new()
    }
}
