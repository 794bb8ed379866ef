//! Error types for query execution

use thiserror::Error;

/// Query execution errors
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error from tessella-core
    #[error("Engine error: {0}")]
    Engine(#[from] tessella_core::EngineError),

    /// Query cancelled via the interrupt flag
    #[error("Query interrupted")]
    Interrupted,

    /// Expression tree is malformed (wrong arity, bad constant)
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
