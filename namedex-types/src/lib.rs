//! Core types for the namedex language-name index.
//!
//! This crate holds the value types shared by the index builder and anything
//! that consumes a built index. Keeping them separate ensures:
//!
//! - **Stable addressing**: [`IndexKey`] is a pure function of token text
//! - **Cross-crate compatibility**: builder, CLI and consumers share one model
//! - **Clean boundaries**: no dependency on the analyzer or the loaders

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque language or variant identifier, such as `"en"` or `"zh-hans"`.
///
/// Only equality and ordering are meaningful; the string is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a code from any string-like value.
    #[inline]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageCode {
    #[inline]
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for LanguageCode {
    #[inline]
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for LanguageCode {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bucket address derived from the first character of a search token.
///
/// Characters below [`IndexConfig::latin_threshold`] get a bucket of their
/// own; everything above is grouped in blocks of
/// [`IndexConfig::script_group`] codepoints so that names written in the
/// same script share a bucket.
///
/// Ordering is numeric, which is also the order buckets are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct IndexKey(pub u32);

impl IndexKey {
    /// Computes the key for a single character.
    #[inline]
    pub fn from_char(c: char, config: &IndexConfig) -> Self {
        let codepoint = c as u32;
        if codepoint < config.latin_threshold || config.script_group == 0 {
            Self(codepoint)
        } else {
            Self(codepoint - codepoint % config.script_group)
        }
    }

    /// Computes the key for a token from its first character.
    ///
    /// Returns `None` for an empty token.
    #[inline]
    pub fn for_text(text: &str, config: &IndexConfig) -> Option<Self> {
        text.chars().next().map(|c| Self::from_char(c, config))
    }

    /// Returns the underlying u32 value.
    #[inline(always)]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for IndexKey {
    #[inline(always)]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a token relates to the name it came from.
///
/// `Prefix` sorts before `Infix`, matching the order the groups are
/// enumerated and serialized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MatchKind {
    /// The token is the first word of the name, or the name has one word.
    Prefix = 0,
    /// The token is a later word of a multi-word name.
    Infix = 1,
}

impl MatchKind {
    /// Both kinds, in enumeration order.
    pub const ALL: [MatchKind; 2] = [MatchKind::Prefix, MatchKind::Infix];

    /// Classifies the token at `position` of a name with `count` tokens.
    #[inline(always)]
    pub const fn classify(position: usize, count: usize) -> Self {
        if position > 0 && count > 1 {
            MatchKind::Infix
        } else {
            MatchKind::Prefix
        }
    }

    /// Field name used in serialized output.
    #[inline(always)]
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchKind::Prefix => "prefix",
            MatchKind::Infix => "infix",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One searchable string pointing at a language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchEntry {
    /// String shown to (and matched against) the user.
    pub display: String,
    /// Language the entry resolves to.
    pub code: LanguageCode,
    /// Whether the entry matched on the first word or a later one.
    pub kind: MatchKind,
}

impl MatchEntry {
    /// Creates a new entry.
    #[inline]
    pub fn new(display: impl Into<String>, code: impl Into<LanguageCode>, kind: MatchKind) -> Self {
        Self {
            display: display.into(),
            code: code.into(),
            kind,
        }
    }
}

impl fmt::Display for MatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.display, self.code, self.kind)
    }
}

/// Separator placed between the matched word and the full name of an
/// infix entry.
pub const DEFAULT_INFIX_SEPARATOR: &str = " — ";

/// Index construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Joins the matched word and the full name in infix display strings.
    /// Default: `" — "`.
    pub infix_separator: String,
    /// Codepoints below this value get a bucket of their own.
    /// Default: 4000.
    pub latin_threshold: u32,
    /// Width of the codepoint blocks above the threshold. Zero disables
    /// grouping. Default: 1000.
    pub script_group: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            infix_separator: DEFAULT_INFIX_SEPARATOR.to_owned(),
            latin_threshold: 4000,
            script_group: 1000,
        }
    }
}

impl IndexConfig {
    /// Default configuration with a custom infix separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            infix_separator: separator.into(),
            ..Self::default()
        }
    }

    /// One bucket per first codepoint, no script grouping.
    pub fn per_codepoint() -> Self {
        Self {
            latin_threshold: u32::MAX,
            ..Self::default()
        }
    }

    /// Display string for an infix match of `token` inside `name`.
    #[inline]
    pub fn infix_display(&self, token: &str, name: &str) -> String {
        let mut out = String::with_capacity(token.len() + self.infix_separator.len() + name.len());
        out.push_str(token);
        out.push_str(&self.infix_separator);
        out.push_str(name);
        out
    }
}
