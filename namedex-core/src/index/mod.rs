//! Language-name search index.
//!
//! Building is a batch job over fully loaded catalogs:
//!
//! 1. Autonyms from the language metadata table are written first
//! 2. Every `(target, name)` pair of the name table is tokenized; the first
//!    word of a name becomes a prefix entry, later words infix entries
//! 3. Hand-curated alternate strings are written as prefix entries
//! 4. Buckets are sorted by key and their groups by display string
//!
//! Each stage overwrites what earlier stages wrote at the same
//! `(key, kind, display)` slot.
//!
//! Memory Layout:
//! - While building, buckets are hash maps keyed by display string
//! - [`IndexBuilder::finish`] turns them into sorted vectors; lookups use
//!   binary search over buckets and entries
//!
//! Threading:
//! - [`IndexBuilder`] owns a reusable normalization buffer and is meant to be
//!   driven by one thread. A finished [`Index`] is plain data.

mod builder;
mod search;
mod serialize;
mod stats;
mod types;

pub use builder::build;
pub use search::MAX_QUERY_LENGTH;
pub use stats::BucketStats;
pub use types::{Bucket, Index, IndexBuilder, Overlay, Stage};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LanguageData, NameCatalog, NameTable, SpecialCases};
    use namedex_types::{IndexConfig, IndexKey, LanguageCode, MatchKind};
    use proptest::prelude::*;

    const LANGUAGE_DATA: &str = r#"{
        "languages": {
            "als": ["gsw"],
            "gsw": ["Latn", ["CH"], "Alemannisch"],
            "ca": ["Latn", ["EU"], "català"],
            "hy": ["Armn", ["AM"], "հայերեն"],
            "ja": ["Jpan", ["AS"], "日本語"],
            "zh-hans": ["Hans", ["AS"], "中文（简体）"],
            "en": ["Latn", ["EU", "AM"], "English"]
        }
    }"#;

    const NAMES: &str = r#"{
        "en": {
            "ca": "Catalan",
            "als": "Alemannisch",
            "gsw": "Swiss German",
            "zh-hans": "Chinese Simplified",
            "sq": "\u200eAlbanian",
            "xx": "(only parenthetical)",
            "es": "Spanish"
        },
        "es": {
            "valencia-test": "Valencia",
            "es": "español"
        }
    }"#;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::from(s)
    }

    fn key(text: &str) -> IndexKey {
        IndexKey::for_text(text, &IndexConfig::default()).unwrap()
    }

    fn full_index() -> Index {
        let data = LanguageData::from_json_str(LANGUAGE_DATA).unwrap();
        let names = NameCatalog::from_json_str(NAMES).unwrap();
        build(&data, &names, &SpecialCases::builtin(), IndexConfig::default())
    }

    #[test]
    fn prefix_and_infix_from_catalog() {
        let index = full_index();

        let swiss = index.get(key("swiss")).unwrap();
        assert_eq!(swiss.lookup(MatchKind::Prefix, "swiss german"), Some(&code("gsw")));

        let german = index.get(key("german")).unwrap();
        assert_eq!(
            german.lookup(MatchKind::Infix, "german — swiss german"),
            Some(&code("gsw"))
        );
    }

    #[test]
    fn mid_string_token_resolves() {
        let index = full_index();
        assert!(index.search("sim", 10).contains(&code("zh-hans")));
    }

    #[test]
    fn names_overwrite_autonyms() {
        // The autonym stage maps "alemannisch" to gsw; the name table later
        // maps the same display string to als.
        let index = full_index();
        let bucket = index.get(key("alemannisch")).unwrap();
        assert_eq!(bucket.lookup(MatchKind::Prefix, "alemannisch"), Some(&code("als")));
    }

    #[test]
    fn autonyms_seeded() {
        let index = full_index();
        assert_eq!(
            index.get(key("հ")).unwrap().lookup(MatchKind::Prefix, "հայերեն"),
            Some(&code("hy"))
        );
        assert_eq!(
            index.get(key("日")).unwrap().lookup(MatchKind::Prefix, "日本語"),
            Some(&code("ja"))
        );
    }

    #[test]
    fn special_case_overrides_catalog() {
        let index = full_index();
        let bucket = index.get(key("valencia")).unwrap();
        assert_eq!(bucket.lookup(MatchKind::Prefix, "valencia"), Some(&code("ca")));
    }

    #[test]
    fn direction_marks_never_reach_the_index() {
        let index = full_index();
        assert!(index.entries().all(|e| !e.display.contains('\u{200E}')));
        let bucket = index.get(key("albanian")).unwrap();
        assert_eq!(bucket.lookup(MatchKind::Prefix, "albanian"), Some(&code("sq")));
    }

    #[test]
    fn parenthetical_only_names_produce_nothing() {
        let index = full_index();
        assert!(index.entries().all(|e| e.code != "xx"));
    }

    #[test]
    fn groups_sorted_and_prefix_first() {
        let index = full_index();
        for bucket in index.buckets() {
            for w in bucket.prefix.windows(2) {
                assert!(w[0].display < w[1].display);
            }
            for w in bucket.infix.windows(2) {
                assert!(w[0].display < w[1].display);
            }
            let kinds: Vec<_> = bucket.entries().map(|e| e.kind).collect();
            let mut sorted = kinds.clone();
            sorted.sort();
            assert_eq!(kinds, sorted);
        }
    }

    #[test]
    fn display_kind_slot_is_unique() {
        let index = full_index();
        let mut seen = std::collections::HashSet::new();
        for bucket in index.buckets() {
            for entry in bucket.entries() {
                assert!(seen.insert((bucket.key, entry.kind, entry.display.clone())));
            }
        }
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let first = full_index();
        let second = full_index();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
        assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn manual_stages_match_build() {
        let data = LanguageData::from_json_str(LANGUAGE_DATA).unwrap();
        let names = NameCatalog::from_json_str(NAMES).unwrap();
        let cases = SpecialCases::builtin();

        let mut builder = IndexBuilder::new();
        builder.apply(Overlay::Autonyms(&data)).unwrap();
        builder.apply(Overlay::Names(&names)).unwrap();
        builder.apply(Overlay::SpecialCases(&cases)).unwrap();

        assert_eq!(builder.finish(), full_index());
    }

    #[test]
    fn loads_catalogs_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("language-data.json");
        let names_path = dir.path().join("names.json");
        let extra_path = dir.path().join("special-cases.json");
        std::fs::write(&data_path, LANGUAGE_DATA).unwrap();
        std::fs::write(&names_path, NAMES).unwrap();
        std::fs::write(&extra_path, r#"{"gsw": ["schwiizertüütsch"]}"#).unwrap();

        let data = LanguageData::from_path(&data_path).unwrap();
        let names = NameCatalog::from_path(&names_path).unwrap();
        let mut cases = SpecialCases::builtin();
        cases.extend_from_path(&extra_path).unwrap();
        let index = build(&data, &names, &cases, IndexConfig::default());

        assert_eq!(index.search("schwiiz", 10), [code("gsw")]);
        assert_eq!(index.search("valencia", 10), [code("ca")]);
    }

    #[test]
    fn stats_follow_bucket_order() {
        let index = full_index();
        let sizes = index.bucket_sizes();
        let stats = index.stats();

        assert_eq!(stats.buckets, index.len());
        assert_eq!(stats.median, sizes.get(sizes.len().div_ceil(2)).copied());
        assert_eq!(stats.smallest, sizes.iter().copied().min());
        assert_eq!(stats.largest, sizes.iter().copied().max());
        assert_eq!(sizes.iter().sum::<usize>(), index.entries().count());
    }

    #[test]
    fn empty_catalogs_give_empty_index() {
        let index = build(
            &LanguageData::new(),
            &NameCatalog::new(),
            &SpecialCases::empty(),
            IndexConfig::default(),
        );
        assert!(index.is_empty());
        assert_eq!(index.stats().buckets, 0);
    }

    #[test]
    fn custom_separator_flows_into_infix_display() {
        let mut table = NameTable::new("en");
        table.insert("x", "alpha beta");
        let names: NameCatalog = [table].into_iter().collect();

        let index = build(
            &LanguageData::new(),
            &names,
            &SpecialCases::empty(),
            IndexConfig::with_separator(" | "),
        );
        let bucket = index.get(key("beta")).unwrap();
        assert_eq!(bucket.lookup(MatchKind::Infix, "beta | alpha beta"), Some(&code("x")));
    }

    proptest! {
        #[test]
        fn every_entry_lives_under_its_token_key(name in "[a-zA-Zé ]{0,24}") {
            let mut table = NameTable::new("en");
            table.insert("x", name.as_str());
            let names: NameCatalog = [table].into_iter().collect();
            let config = IndexConfig::default();
            let index = build(&LanguageData::new(), &names, &SpecialCases::empty(), config.clone());

            for bucket in index.buckets() {
                for entry in bucket.entries() {
                    let token = entry.display.split(config.infix_separator.as_str()).next().unwrap();
                    let token = match entry.kind {
                        MatchKind::Prefix => token.split_whitespace().next().unwrap(),
                        MatchKind::Infix => token,
                    };
                    prop_assert_eq!(IndexKey::for_text(token, &config), Some(bucket.key));
                }
            }
        }

        #[test]
        fn build_is_deterministic(names in proptest::collection::vec("[a-c ]{1,8}", 0..12)) {
            let mut table = NameTable::new("en");
            for (i, name) in names.iter().enumerate() {
                table.insert(format!("c{i}"), name.as_str());
            }
            let catalog: NameCatalog = [table].into_iter().collect();

            let a = build(&LanguageData::new(), &catalog, &SpecialCases::builtin(), IndexConfig::default());
            let b = build(&LanguageData::new(), &catalog, &SpecialCases::builtin(), IndexConfig::default());
            prop_assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
        }
    }
}
