//! Index building logic.

use namedex_types::{IndexConfig, IndexKey, LanguageCode, MatchEntry, MatchKind};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::catalog::{LanguageData, LanguageRecord, NameCatalog, SpecialCases};
use crate::error::BuildError;
use crate::index::types::{Bucket, BucketDraft, Index, IndexBuilder, Overlay};

/// Builds a complete index from the three input catalogs.
///
/// Stages are applied in order: autonyms, then the name table, then special
/// cases. Each stage may overwrite what an earlier one wrote.
pub fn build(
    language_data: &LanguageData,
    names: &NameCatalog,
    special_cases: &SpecialCases,
    config: IndexConfig,
) -> Index {
    let mut builder = IndexBuilder::with_config(config);
    for overlay in [
        Overlay::Autonyms(language_data),
        Overlay::Names(names),
        Overlay::SpecialCases(special_cases),
    ] {
        let applied = builder.apply(overlay);
        debug_assert!(applied.is_ok(), "stages are listed in order");
    }
    builder.finish()
}

impl IndexBuilder {
    /// Applies one overlay stage.
    ///
    /// Returns the number of entries written (overwrites included).
    ///
    /// # Errors
    ///
    /// Returns `BuildError::StageOrder` if a later stage was already applied.
    /// The same stage may be applied more than once.
    pub fn apply(&mut self, overlay: Overlay<'_>) -> Result<usize, BuildError> {
        let attempted = overlay.stage();
        if let Some(current) = self.stage {
            if current > attempted {
                return Err(BuildError::StageOrder { current, attempted });
            }
        }
        self.stage = Some(attempted);
        Ok(self.write_overlay(overlay))
    }

    fn write_overlay(&mut self, overlay: Overlay<'_>) -> usize {
        let stage = overlay.stage();
        let (names, written) = match overlay {
            Overlay::Autonyms(data) => self.write_autonyms(data),
            Overlay::Names(catalog) => self.write_names(catalog),
            Overlay::SpecialCases(cases) => self.write_special_cases(cases),
        };

        info!(
            %stage,
            names,
            entries = written,
            buckets = self.drafts.len(),
            "overlay stage applied"
        );
        written
    }

    fn write_autonyms(&mut self, data: &LanguageData) -> (usize, usize) {
        let mut names = 0usize;
        let mut written = 0usize;

        for (code, record) in data.records() {
            match record {
                LanguageRecord::Full { autonym, .. } => {
                    names += 1;
                    written += self.insert_name(code, autonym);
                }
                LanguageRecord::Redirect { target } => {
                    debug!(%code, %target, "redirect has no autonym, skipped");
                }
                LanguageRecord::Malformed => {
                    debug!(%code, "malformed language record, skipped");
                }
            }
        }

        (names, written)
    }

    fn write_names(&mut self, catalog: &NameCatalog) -> (usize, usize) {
        let mut names = 0usize;
        let mut written = 0usize;

        for (code, name) in catalog.pairs() {
            names += 1;
            written += self.insert_name(code, name);
        }

        (names, written)
    }

    fn write_special_cases(&mut self, cases: &SpecialCases) -> (usize, usize) {
        let mut names = 0usize;
        let mut written = 0usize;

        for (code, alternate) in cases.pairs() {
            names += 1;
            written += self.insert_alternate(code, alternate);
        }

        (names, written)
    }

    /// Tokenizes one display name and writes an entry per token.
    ///
    /// The first word (or the only word) becomes a prefix entry whose display
    /// string is the whole cleaned name. Later words become infix entries
    /// displayed as `word + separator + name`. Returns the number of entries
    /// written; names without words write nothing.
    pub fn insert_name(&mut self, code: &LanguageCode, raw: &str) -> usize {
        let Self {
            config,
            normalizer,
            tokenizer,
            drafts,
            norm_buf,
            ..
        } = self;

        let basic_end = normalizer.normalize_into(raw, norm_buf);
        let full = norm_buf.as_str();
        let tokens = tokenizer.tokens(&full[..basic_end]);

        if tokens.is_empty() {
            debug!(%code, name = raw, "name has no searchable words, skipped");
            return 0;
        }

        let count = tokens.len();
        let mut written = 0usize;
        for (position, token) in tokens.iter().enumerate() {
            let Some(key) = IndexKey::for_text(token, config) else {
                continue;
            };
            let kind = MatchKind::classify(position, count);
            let display = match kind {
                MatchKind::Prefix => full.to_owned(),
                MatchKind::Infix => config.infix_display(token, full),
            };
            write_entry(drafts, key, kind, display, code);
            written += 1;
        }
        written
    }

    /// Writes an alternate search string as a single prefix entry.
    ///
    /// The string is cleaned but not split, so `"punjabi western"` is one
    /// entry under the key of `p`. Returns the number of entries written.
    pub fn insert_alternate(&mut self, code: &LanguageCode, raw: &str) -> usize {
        let Self {
            config,
            normalizer,
            drafts,
            norm_buf,
            ..
        } = self;

        normalizer.clean_into(raw, norm_buf);
        let Some(key) = IndexKey::for_text(norm_buf, config) else {
            debug!(%code, "empty alternate string, skipped");
            return 0;
        };
        write_entry(drafts, key, MatchKind::Prefix, norm_buf.clone(), code);
        1
    }

    /// Sorts every bucket and freezes the index.
    pub fn finish(self) -> Index {
        let mut buckets: Vec<Bucket> = self
            .drafts
            .into_iter()
            .map(|(key, draft)| Bucket {
                key,
                prefix: sorted_group(draft.prefix, MatchKind::Prefix),
                infix: sorted_group(draft.infix, MatchKind::Infix),
            })
            .collect();
        buckets.sort_unstable_by_key(|bucket| bucket.key);

        let index = Index {
            buckets,
            config: self.config,
        };
        let stats = index.stats();
        info!(
            buckets = stats.buckets,
            entries = index.entries().count(),
            mean = stats.mean,
            "index finalized"
        );
        index
    }
}

#[inline]
fn write_entry(
    drafts: &mut FxHashMap<IndexKey, BucketDraft>,
    key: IndexKey,
    kind: MatchKind,
    display: String,
    code: &LanguageCode,
) {
    drafts
        .entry(key)
        .or_default()
        .group_mut(kind)
        .insert(display, code.clone());
}

fn sorted_group(group: FxHashMap<String, LanguageCode>, kind: MatchKind) -> Vec<MatchEntry> {
    let mut entries: Vec<MatchEntry> = group
        .into_iter()
        .map(|(display, code)| MatchEntry {
            display,
            code,
            kind,
        })
        .collect();
    // Display strings are unique within a group.
    entries.sort_unstable_by(|a, b| a.display.cmp(&b.display));
    entries
}
