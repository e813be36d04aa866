//! Lookup over a finished index.

use namedex_types::{IndexKey, LanguageCode};
use rustc_hash::FxHashSet;

use crate::analyzer::NameNormalizer;
use crate::index::types::{Bucket, Index};

/// Longest query considered, in bytes. Longer input cannot match a name.
pub const MAX_QUERY_LENGTH: usize = 1_000;

impl Index {
    /// Finds the bucket for `key`.
    #[inline]
    pub fn get(&self, key: IndexKey) -> Option<&Bucket> {
        self.buckets
            .binary_search_by_key(&key, |bucket| bucket.key)
            .ok()
            .map(|i| &self.buckets[i])
    }

    /// Finds the bucket a piece of user input is addressed to.
    pub fn bucket_for(&self, query: &str) -> Option<&Bucket> {
        IndexKey::for_text(query, &self.config).and_then(|key| self.get(key))
    }

    /// Resolves partial user input to language codes.
    ///
    /// The query is cleaned like a name. Entries of its bucket whose display
    /// string starts with the query are collected, prefix entries first, and
    /// each code is reported once. At most `limit` codes are returned.
    pub fn search(&self, query: &str, limit: usize) -> Vec<LanguageCode> {
        if limit == 0 || query.len() > MAX_QUERY_LENGTH {
            return Vec::new();
        }

        let query = NameNormalizer::new().clean(query);
        let Some(bucket) = self.bucket_for(&query) else {
            return Vec::new();
        };

        let mut seen: FxHashSet<&LanguageCode> = FxHashSet::default();
        let mut results = Vec::new();
        for entry in bucket.entries() {
            if entry.display.starts_with(query.as_str()) && seen.insert(&entry.code) {
                results.push(entry.code.clone());
                if results.len() == limit {
                    break;
                }
            }
        }
        results
    }
}
