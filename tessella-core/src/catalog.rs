//! Read-only id catalogs maintained by the store.
//!
//! The catalog maps small ids to IRI prefixes, datatype IRIs, and BCP47
//! language tags. It is immutable during query execution; per-query
//! additions (datatypes or languages minted by expressions) live in the
//! temp manager instead and are selected by the `MASK_TAG_MANAGER` bit of
//! the 16-bit id.

use crate::error::{EngineError, Result};

/// Prefix / datatype / language tables.
///
/// Ids are dense indexes assigned at load time. An out-of-range lookup is a
/// codec/catalog desync and surfaces as an engine error, not a query error.
#[derive(Debug, Default)]
pub struct Catalog {
    prefixes: Vec<String>,
    datatypes: Vec<String>,
    languages: Vec<String>,
}

impl Catalog {
    pub fn new(prefixes: Vec<String>, datatypes: Vec<String>, languages: Vec<String>) -> Self {
        Self { prefixes, datatypes, languages }
    }

    /// Resolve a prefix id to its IRI prefix string.
    pub fn prefix(&self, id: u8) -> Result<&str> {
        self.prefixes
            .get(id as usize)
            .map(String::as_str)
            .ok_or(EngineError::CatalogId { kind: "prefix", id: id as u64 })
    }

    /// Resolve a datatype id (low 15 bits) to its IRI.
    pub fn datatype(&self, id: u16) -> Result<&str> {
        self.datatypes
            .get(id as usize)
            .map(String::as_str)
            .ok_or(EngineError::CatalogId { kind: "datatype", id: id as u64 })
    }

    /// Resolve a language id (low 15 bits) to its BCP47 tag.
    pub fn language(&self, id: u16) -> Result<&str> {
        self.languages
            .get(id as usize)
            .map(String::as_str)
            .ok_or(EngineError::CatalogId { kind: "language", id: id as u64 })
    }

    /// Find the longest catalog prefix of `iri`, for IRI packing.
    ///
    /// Returns the prefix id and the matched prefix. Prefix 0 is
    /// conventionally the empty string, so every IRI has a match when the
    /// catalog is seeded that way.
    pub fn find_prefix(&self, iri: &str) -> Option<(u8, &str)> {
        let mut best: Option<(u8, &str)> = None;
        for (id, prefix) in self.prefixes.iter().enumerate() {
            if iri.starts_with(prefix.as_str()) {
                match best {
                    Some((_, current)) if current.len() >= prefix.len() => {}
                    _ => best = Some((id as u8, prefix.as_str())),
                }
            }
        }
        best
    }
}
