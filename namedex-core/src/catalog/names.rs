use std::path::Path;

use namedex_types::LanguageCode;

use super::{parse_json, read_catalog, Ordered};
use crate::error::CatalogError;

/// Names of many languages, all written in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    /// Language the names are written in.
    pub language: LanguageCode,
    /// `(target, display name)` pairs in document order.
    pub names: Vec<(LanguageCode, String)>,
}

impl NameTable {
    /// Creates an empty table for names written in `language`.
    pub fn new(language: impl Into<LanguageCode>) -> Self {
        Self {
            language: language.into(),
            names: Vec::new(),
        }
    }

    /// Appends the name of `target`.
    pub fn insert(&mut self, target: impl Into<LanguageCode>, name: impl Into<String>) -> &mut Self {
        self.names.push((target.into(), name.into()));
        self
    }
}

/// The full name table: `{writtenIn: {target: displayName}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCatalog {
    tables: Vec<NameTable>,
}

impl NameCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table. Its names are applied after those already present.
    pub fn push(&mut self, table: NameTable) {
        self.tables.push(table);
    }

    /// Parses `{writtenIn: {target: displayName, ...}, ...}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the text is not JSON, or if any
    /// display name is not a string.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let parsed: Ordered<LanguageCode, Ordered<LanguageCode, String>> =
            parse_json("name catalog", json)?;
        let tables = parsed
            .0
            .into_iter()
            .map(|(language, names)| NameTable {
                language,
                names: names.0,
            })
            .collect();
        Ok(Self { tables })
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Any read or parse failure.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json_str(&read_catalog(path)?)
    }

    /// Tables in document order.
    #[inline]
    pub fn tables(&self) -> &[NameTable] {
        &self.tables
    }

    /// Every `(target, display name)` pair, table by table.
    pub fn pairs(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.tables
            .iter()
            .flat_map(|table| table.names.iter().map(|(code, name)| (code, name.as_str())))
    }

    /// Total number of names across all tables.
    pub fn len(&self) -> usize {
        self.tables.iter().map(|table| table.names.len()).sum()
    }

    /// Returns `true` if there are no names.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<NameTable> for NameCatalog {
    fn from_iter<I: IntoIterator<Item = NameTable>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
