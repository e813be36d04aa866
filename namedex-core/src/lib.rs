//! Builds a search index over multilingual language names.
//!
//! Given a language metadata table (with autonyms), a table of language names
//! written in many languages, and a few hand-curated alternates, produce a
//! deterministic bucketed index that a typeahead can scan with lowercase,
//! partial input in any script.
//!
//! ```
//! use namedex_core::catalog::{LanguageData, NameCatalog, NameTable, SpecialCases};
//! use namedex_types::IndexConfig;
//!
//! let mut en = NameTable::new("en");
//! en.insert("zh-hans", "Chinese Simplified");
//! let names: NameCatalog = [en].into_iter().collect();
//!
//! let index = namedex_core::build(
//!     &LanguageData::new(),
//!     &names,
//!     &SpecialCases::builtin(),
//!     IndexConfig::default(),
//! );
//! assert_eq!(index.search("simp", 10)[0].as_str(), "zh-hans");
//! ```

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod index;

pub use error::{BuildError, CatalogError};
pub use index::{build, BucketStats, Index, IndexBuilder, Overlay, Stage};
