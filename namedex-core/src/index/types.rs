//! Index types.

use core::fmt;

use namedex_types::{IndexConfig, IndexKey, LanguageCode, MatchEntry, MatchKind};
use rustc_hash::FxHashMap;

use crate::analyzer::{NameNormalizer, Tokenizer};
use crate::catalog::{LanguageData, NameCatalog, SpecialCases};

/// Overlay stages, in the order they must be applied.
///
/// A later stage overwrites entries an earlier stage wrote at the same
/// `(key, kind, display)` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Autonyms from the language metadata table.
    Autonyms,
    /// Names of languages in other languages.
    Names,
    /// Hand-curated alternate strings.
    SpecialCases,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Autonyms => "autonyms",
            Stage::Names => "names",
            Stage::SpecialCases => "special-cases",
        })
    }
}

/// One input to the builder, tagged with its stage.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    /// Seed pass over autonyms.
    Autonyms(&'a LanguageData),
    /// Main pass over the name table.
    Names(&'a NameCatalog),
    /// Special-case alternates.
    SpecialCases(&'a SpecialCases),
}

impl Overlay<'_> {
    /// Stage this overlay belongs to.
    #[inline]
    pub const fn stage(&self) -> Stage {
        match self {
            Overlay::Autonyms(_) => Stage::Autonyms,
            Overlay::Names(_) => Stage::Names,
            Overlay::SpecialCases(_) => Stage::SpecialCases,
        }
    }
}

/// Mutable bucket contents, keyed by display string.
#[derive(Debug, Default)]
pub(crate) struct BucketDraft {
    pub(crate) prefix: FxHashMap<String, LanguageCode>,
    pub(crate) infix: FxHashMap<String, LanguageCode>,
}

impl BucketDraft {
    #[inline(always)]
    pub(crate) fn group_mut(&mut self, kind: MatchKind) -> &mut FxHashMap<String, LanguageCode> {
        match kind {
            MatchKind::Prefix => &mut self.prefix,
            MatchKind::Infix => &mut self.infix,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.prefix.len() + self.infix.len()
    }
}

/// Accumulates overlay stages into buckets.
///
/// Not shared across threads; each build owns one builder.
pub struct IndexBuilder {
    pub(crate) config: IndexConfig,
    pub(crate) normalizer: NameNormalizer,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) drafts: FxHashMap<IndexKey, BucketDraft>,
    pub(crate) stage: Option<Stage>,
    /// Reusable buffer for name normalization.
    pub(crate) norm_buf: String,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Creates a builder with a custom configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            normalizer: NameNormalizer::new(),
            tokenizer: Tokenizer::new(),
            drafts: FxHashMap::default(),
            stage: None,
            norm_buf: String::with_capacity(128),
        }
    }

    /// Latest stage applied so far.
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Number of buckets written so far.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.drafts.len()
    }

    /// Number of entries written so far.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.drafts.values().map(BucketDraft::len).sum()
    }
}

/// Entries addressed by one [`IndexKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Bucket address.
    pub key: IndexKey,
    /// Prefix entries, sorted by display string.
    pub prefix: Vec<MatchEntry>,
    /// Infix entries, sorted by display string.
    pub infix: Vec<MatchEntry>,
}

impl Bucket {
    /// Entries of one kind.
    #[inline]
    pub fn group(&self, kind: MatchKind) -> &[MatchEntry] {
        match kind {
            MatchKind::Prefix => &self.prefix,
            MatchKind::Infix => &self.infix,
        }
    }

    /// Prefix entries, then infix entries.
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = &MatchEntry> {
        self.prefix.iter().chain(self.infix.iter())
    }

    /// Total number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.prefix.len() + self.infix.len()
    }

    /// Returns `true` if the bucket has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the language of a display string in one group.
    pub fn lookup(&self, kind: MatchKind, display: &str) -> Option<&LanguageCode> {
        let group = self.group(kind);
        group
            .binary_search_by(|entry| entry.display.as_str().cmp(display))
            .ok()
            .map(|i| &group[i].code)
    }
}

/// Finished, immutable language-name index.
///
/// Buckets are sorted by key; within a bucket both groups are sorted by
/// display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub(crate) buckets: Vec<Bucket>,
    pub(crate) config: IndexConfig,
}

impl Index {
    /// Number of buckets.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if the index has no buckets.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// All buckets in key order.
    #[inline]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Configuration the index was built with.
    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Every entry: bucket by bucket, prefix group before infix group.
    pub fn entries(&self) -> impl Iterator<Item = &MatchEntry> {
        self.buckets.iter().flat_map(Bucket::entries)
    }
}
