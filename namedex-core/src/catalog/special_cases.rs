use std::path::Path;

use namedex_types::LanguageCode;

use super::{parse_json, read_catalog, Ordered};
use crate::error::CatalogError;

/// Alternate search strings for languages whose names don't share a stem
/// with what people type.
pub const BUILTIN_SPECIAL_CASES: &[(&str, &[&str])] = &[
    // Catalan, sometimes searched as "Valencià"
    ("ca", &["valencia"]),
    // Spanish, transliterated autonym
    ("es", &["castellano"]),
    // Armenian, transliterated autonym
    ("hy", &["hayeren"]),
    // Georgian, transliterated autonym
    ("ka", &["kartuli", "qartuli"]),
    // Japanese, transliterated autonym
    ("ja", &["nihongo", "にほんご"]),
    // Western Punjabi doesn't start with "punjabi" in any language
    ("pnb", &["punjabi western"]),
    // No English name maps to zh-hans or zh-hant
    ("zh-hans", &["chinese simplified"]),
    ("zh-hant", &["chinese traditional"]),
];

/// Ordered table of alternate search strings per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialCases {
    entries: Vec<(LanguageCode, Vec<String>)>,
}

impl SpecialCases {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_SPECIAL_CASES
            .iter()
            .map(|(code, alternates)| {
                (
                    LanguageCode::from(*code),
                    alternates.iter().map(|s| (*s).to_owned()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Appends alternates for `code`. Appended entries apply after (and so
    /// override) existing ones.
    pub fn push<I, S>(&mut self, code: impl Into<LanguageCode>, alternates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .push((code.into(), alternates.into_iter().map(Into::into).collect()));
    }

    /// Appends entries parsed from `{code: [alternate, ...], ...}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the text does not have that shape.
    pub fn extend_from_json_str(&mut self, json: &str) -> Result<(), CatalogError> {
        let parsed: Ordered<LanguageCode, Vec<String>> = parse_json("special cases", json)?;
        self.entries.extend(parsed.0);
        Ok(())
    }

    /// Appends entries from a JSON file.
    ///
    /// # Errors
    ///
    /// Any read or parse failure.
    pub fn extend_from_path(&mut self, path: &Path) -> Result<(), CatalogError> {
        self.extend_from_json_str(&read_catalog(path)?)
    }

    /// Every `(code, alternate)` pair in application order.
    pub fn pairs(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.entries
            .iter()
            .flat_map(|(code, alternates)| alternates.iter().map(move |alt| (code, alt.as_str())))
    }

    /// Number of alternate strings.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, alternates)| alternates.len()).sum()
    }

    /// Returns `true` if there are no alternates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
