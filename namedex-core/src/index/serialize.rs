//! Serialized form of the index.
//!
//! ```text
//! { "<key>": { "prefix": { display: code, ... }, "infix": { display: code, ... } }, ... }
//! ```
//!
//! Keys and entries are written in the index's own order, so identical
//! inputs always serialize to identical bytes.

use std::io;

use namedex_types::{MatchEntry, MatchKind};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::index::types::{Bucket, Index};

struct Group<'a>(&'a [MatchEntry]);

impl Serialize for Group<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|entry| (&entry.display, &entry.code)))
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bucket", 2)?;
        state.serialize_field(MatchKind::Prefix.as_str(), &Group(&self.prefix))?;
        state.serialize_field(MatchKind::Infix.as_str(), &Group(&self.infix))?;
        state.end()
    }
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.key.as_u32().to_string(), bucket)?;
        }
        map.end()
    }
}

impl Index {
    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails, which a well-formed index never does.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Streams JSON into `writer`.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O errors wrapped by `serde_json`.
    pub fn write_json<W: io::Write>(&self, writer: W, pretty: bool) -> Result<(), serde_json::Error> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }
}
