//! Per-query temp store for values minted during execution.
//!
//! Expression evaluation produces new strings, datatypes, and languages
//! that are not in the persistent dictionary. They intern here, in three
//! separate namespaces. Interning deduplicates: packing the same string
//! twice must yield bit-equal `ObjectId`s, because bit equality is term
//! equality.
//!
//! The store is owned by one query and dropped with it. Interning takes
//! `&self` (iterators and expressions share the context immutably), so the
//! tables sit behind a mutex; there is no cross-query contention.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Datatype/language ids are 15-bit (the 16th bit is the manager flag).
const TAG_ID_LIMIT: usize = 1 << 15;

#[derive(Default)]
struct InternTable {
    entries: Vec<Vec<u8>>,
    index: HashMap<Vec<u8>, u64>,
}

impl InternTable {
    fn intern(&mut self, bytes: &[u8]) -> u64 {
        if let Some(&id) = self.index.get(bytes) {
            return id;
        }
        let id = self.entries.len() as u64;
        self.entries.push(bytes.to_vec());
        self.index.insert(bytes.to_vec(), id);
        id
    }

    fn get(&self, id: u64) -> Option<Vec<u8>> {
        self.entries.get(id as usize).cloned()
    }
}

/// Per-query writable store with string / datatype / language namespaces.
#[derive(Default)]
pub struct TmpManager {
    strings: Mutex<InternTable>,
    datatypes: Mutex<InternTable>,
    languages: Mutex<InternTable>,
}

impl TmpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern bytes into the string namespace, returning their id.
    pub fn intern_str(&self, bytes: &[u8]) -> u64 {
        self.strings.lock().intern(bytes)
    }

    /// Resolve a string-namespace id.
    pub fn get_str(&self, id: u64) -> Result<Vec<u8>> {
        self.strings
            .lock()
            .get(id)
            .ok_or(EngineError::UnknownId { kind: "tmp string", id })
    }

    /// Intern a datatype IRI, returning its 15-bit id (without the manager
    /// flag).
    pub fn intern_datatype(&self, iri: &str) -> Result<u16> {
        let mut table = self.datatypes.lock();
        if table.entries.len() >= TAG_ID_LIMIT {
            return Err(EngineError::OutOfRange("tmp datatype table full".to_string()));
        }
        Ok(table.intern(iri.as_bytes()) as u16)
    }

    /// Resolve a datatype id to its IRI.
    pub fn datatype(&self, id: u16) -> Result<String> {
        let bytes = self
            .datatypes
            .lock()
            .get(id as u64)
            .ok_or(EngineError::UnknownId { kind: "tmp datatype", id: id as u64 })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Intern a language tag, returning its 15-bit id.
    pub fn intern_language(&self, tag: &str) -> Result<u16> {
        let mut table = self.languages.lock();
        if table.entries.len() >= TAG_ID_LIMIT {
            return Err(EngineError::OutOfRange("tmp language table full".to_string()));
        }
        Ok(table.intern(tag.as_bytes()) as u16)
    }

    /// Resolve a language id to its tag.
    pub fn language(&self, id: u16) -> Result<String> {
        let bytes = self
            .languages
            .lock()
            .get(id as u64)
            .ok_or(EngineError::UnknownId { kind: "tmp language", id: id as u64 })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
