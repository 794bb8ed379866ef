//! Error types for result serialization

use thiserror::Error;

/// Serialization / driver errors
#[derive(Error, Debug)]
pub enum FormatError {
    /// Error from the encoding layer
    #[error("Engine error: {0}")]
    Engine(#[from] tessella_core::EngineError),

    /// Error from query execution
    #[error("Query error: {0}")]
    Query(#[from] tessella_query::QueryError),

    /// The codec produced a tag the printer does not know - a
    /// codec/printer desync, not a query-time error
    #[error("unmanaged type tag {tag:#04x} in term printer")]
    UnknownTag { tag: u8 },

    /// Output stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for serialization operations
pub type Result<T> = std::result::Result<T, FormatError>;
