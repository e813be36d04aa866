//! Input catalogs.
//!
//! Three sources feed the index builder, in overlay order:
//! - [`LanguageData`]: language metadata records; full records carry an autonym
//! - [`NameCatalog`]: names of languages written in other languages
//! - [`SpecialCases`]: hand-curated alternate search strings
//!
//! JSON objects are read with their key order intact, because later entries
//! overwrite earlier ones when they produce the same display string.

mod language_data;
mod names;
mod special_cases;

pub use language_data::{LanguageData, LanguageRecord};
pub use names::{NameCatalog, NameTable};
pub use special_cases::{SpecialCases, BUILTIN_SPECIAL_CASES};

use core::fmt;
use core::marker::PhantomData;
use std::fs;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::CatalogError;

/// JSON object read as a list of pairs in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ordered<K, V>(pub(crate) Vec<(K, V)>);

impl<'de, K, V> Deserialize<'de> for Ordered<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for OrderedVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Ordered<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    pairs.push(pair);
                }
                Ok(Ordered(pairs))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

pub(crate) fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_json<'de, T: Deserialize<'de>>(
    what: &'static str,
    json: &'de str,
) -> Result<T, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Json { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_keeps_document_order() {
        let parsed: Ordered<String, u32> =
            serde_json::from_str(r#"{"zz": 1, "aa": 2, "mm": 3}"#).unwrap();
        let keys: Vec<_> = parsed.0.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zz", "aa", "mm"]);
    }

    #[test]
    fn ordered_keeps_duplicate_keys() {
        let parsed: Ordered<String, u32> =
            serde_json::from_str(r#"{"a": 1, "a": 2}"#).unwrap();
        assert_eq!(parsed.0, vec![("a".to_owned(), 1), ("a".to_owned(), 2)]);
    }

    #[test]
    fn ordered_rejects_arrays() {
        let parsed: Result<Ordered<String, u32>, _> = serde_json::from_str("[1, 2]");
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_catalog(Path::new("/nonexistent/namedex/names.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("names.json"));
    }
}
