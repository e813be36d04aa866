//! Word tokenizer for normalized language names.
//!
//! Splits the basic form of a name into the words that become index entries.
//!
//! ```ignore
//! "chinese simplified" -> ("chinese", 0), ("simplified", 1)
//! ```
//!
//! Tokens are slices of the input, never copies. Splitting happens on runs of
//! Unicode whitespace (so `U+3000 IDEOGRAPHIC SPACE` separates words just like
//! an ASCII space), and empty fragments are discarded.
//!
//! Position matters to the caller: the word at position 0 is a prefix match,
//! later words of a multi-word name are infix matches.

use smallvec::SmallVec;

/// Tokens of one name. Most language names have at most four words.
pub type Tokens<'n> = SmallVec<[&'n str; 4]>;

/// Streaming tokenizer - splits normalized names into words.
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer {
    _private: (),
}

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Tokenizes `normalized` and emits `(text, position)` left to right.
    #[inline]
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, usize),
    {
        for (pos, text) in normalized.split_whitespace().enumerate() {
            emit(text, pos);
        }
    }

    /// Collects all tokens of `normalized`.
    #[inline]
    pub fn tokens<'n>(&self, normalized: &'n str) -> Tokens<'n> {
        let mut out = Tokens::new();
        self.tokenize(normalized, |text, _| out.push(text));
        out
    }
}
