//! Error types for the encoding and store layers

use thiserror::Error;

/// Engine-level errors.
///
/// These represent bugs or corrupted state (a tag the codec does not know,
/// a dangling store id), never SPARQL evaluation errors. SPARQL type errors
/// are the `NULL` `ObjectId`, not a Rust error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Catalog lookup with an id outside the table
    #[error("{kind} id {id} out of catalog range")]
    CatalogId { kind: &'static str, id: u64 },

    /// Dictionary or temp-store lookup with a dangling id
    #[error("unknown {kind} id {id}")]
    UnknownId { kind: &'static str, id: u64 },

    /// An ObjectId carried a tag the caller cannot handle
    #[error("unexpected type tag {tag:#04x} in {context}")]
    TypeTag { tag: u8, context: &'static str },

    /// A value does not fit its encoding
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// Stored bytes failed to parse back into their domain value
    #[error("malformed stored value: {0}")]
    Malformed(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, EngineError>;
