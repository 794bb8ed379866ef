//! # Tessella Core
//!
//! Value encoding and store interfaces for the Tessella query engine.
//!
//! This crate provides:
//! - `ObjectId`: the 64-bit tagged encoding of every RDF term the engine
//!   handles, with pack/unpack per category
//! - Packed temporal and decimal datatypes
//! - The read-only catalog (prefixes, datatypes, languages), the persistent
//!   string dictionary interface, the per-query temp store, and the path
//!   manager interface, with in-memory implementations
//!
//! Query execution sits on top in `tessella-query`; result serialization in
//! `tessella-api`.

pub mod catalog;
pub mod conversions;
pub mod decimal;
pub mod dictionary;
pub mod error;
pub mod object_id;
pub mod paths;
pub mod temporal;
pub mod tmp;

// Re-exports
pub use catalog::Catalog;
pub use decimal::DecimalInlined;
pub use dictionary::{MemoryDictionary, StringDictionary};
pub use error::{EngineError, Result};
pub use object_id::ObjectId;
pub use paths::{MemoryPathManager, PathManager, PathSpec, PathStep};
pub use temporal::{DateTime, TemporalKind};
pub use tmp::TmpManager;
