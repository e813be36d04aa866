//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::Stage;

/// Failure to load one of the input catalogs.
///
/// Always fatal: an index is never built from a partially loaded catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The catalog is not valid JSON or does not have the expected shape.
    #[error("invalid {what}: {source}")]
    Json {
        /// Which catalog failed to parse.
        what: &'static str,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A language-data script did not contain a `$.uls.data = {...}` block.
    #[error("no `$.uls.data = {{...}}` assignment found in language data script")]
    MissingDataBlock,
}

/// Failure while composing overlay stages by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A stage was applied after a stage that must follow it.
    #[error("cannot apply {attempted} overlay after {current} overlay")]
    StageOrder {
        /// Latest stage already applied.
        current: Stage,
        /// Stage that was rejected.
        attempted: Stage,
    },
}
