use std::path::Path;
use std::sync::LazyLock;

use namedex_types::LanguageCode;
use regex::Regex;
use serde::de::{Deserialize, Deserializer};
use serde_json::Value;

use super::{parse_json, read_catalog, Ordered};
use crate::error::CatalogError;

/// `$.uls.data = {...}` inside the language-data script wrapper.
static ULS_DATA_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\$\.uls\.data\s*=\s*(.*?)\s*\}\s*\(\s*jQuery\s*\)")
        .expect("data block pattern is valid")
});

/// One entry of the language metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRecord {
    /// `[script, [regions...], autonym]`
    Full {
        /// Script code, e.g. `"Latn"`.
        script: String,
        /// Region codes the language is spoken in.
        regions: Vec<String>,
        /// Name of the language in itself.
        autonym: String,
    },
    /// `[target]`: an alias for another code.
    Redirect {
        /// Code the alias points at.
        target: LanguageCode,
    },
    /// Any other shape. Skipped when seeding autonyms.
    Malformed,
}

impl LanguageRecord {
    /// Returns the autonym of a full record.
    #[inline]
    pub fn autonym(&self) -> Option<&str> {
        match self {
            LanguageRecord::Full { autonym, .. } => Some(autonym),
            _ => None,
        }
    }

    /// Returns `true` for redirect records.
    #[inline]
    pub fn is_redirect(&self) -> bool {
        matches!(self, LanguageRecord::Redirect { .. })
    }
}

impl<'de> Deserialize<'de> for LanguageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Some(items) = value.as_array() else {
            return Ok(LanguageRecord::Malformed);
        };

        Ok(match items.as_slice() {
            [Value::String(target)] => LanguageRecord::Redirect {
                target: LanguageCode::new(target.as_str()),
            },
            [Value::String(script), regions, Value::String(autonym), ..] => LanguageRecord::Full {
                script: script.clone(),
                regions: regions
                    .as_array()
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default(),
                autonym: autonym.clone(),
            },
            _ => LanguageRecord::Malformed,
        })
    }
}

#[derive(serde::Deserialize)]
struct LanguageDataFile {
    languages: Ordered<LanguageCode, LanguageRecord>,
}

/// Language metadata table, keyed by code in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageData {
    records: Vec<(LanguageCode, LanguageRecord)>,
}

impl LanguageData {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, code: impl Into<LanguageCode>, record: LanguageRecord) {
        self.records.push((code.into(), record));
    }

    /// Appends a full record with the given autonym and no script metadata.
    pub fn push_autonym(&mut self, code: impl Into<LanguageCode>, autonym: impl Into<String>) {
        self.push(
            code,
            LanguageRecord::Full {
                script: String::new(),
                regions: Vec::new(),
                autonym: autonym.into(),
            },
        );
    }

    /// Parses `{"languages": {code: record, ...}, ...}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the text is not JSON or has no
    /// `languages` object.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: LanguageDataFile = parse_json("language data", json)?;
        Ok(Self {
            records: file.languages.0,
        })
    }

    /// Parses the script form, `... $.uls.data = {...} }( jQuery ) );`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingDataBlock` if no assignment is found,
    /// or `CatalogError::Json` if the assigned object does not parse.
    pub fn from_uls_script(script: &str) -> Result<Self, CatalogError> {
        let block = ULS_DATA_BLOCK
            .captures(script)
            .and_then(|caps| caps.get(1))
            .ok_or(CatalogError::MissingDataBlock)?;
        let json = block.as_str().trim_end().trim_end_matches(';');
        Self::from_json_str(json)
    }

    /// Loads a table from disk. Files ending in `.js` are read as scripts,
    /// anything else as JSON.
    ///
    /// # Errors
    ///
    /// Any read or parse failure.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = read_catalog(path)?;
        if path.extension().is_some_and(|ext| ext == "js") {
            Self::from_uls_script(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    /// All records in document order.
    #[inline]
    pub fn records(&self) -> impl Iterator<Item = (&LanguageCode, &LanguageRecord)> {
        self.records.iter().map(|(code, record)| (code, record))
    }

    /// Codes paired with their autonyms; redirects and malformed records are
    /// left out.
    pub fn autonyms(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.records
            .iter()
            .filter_map(|(code, record)| record.autonym().map(|autonym| (code, autonym)))
    }

    /// Number of records, redirects included.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
