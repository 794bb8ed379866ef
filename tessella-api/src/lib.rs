//! # Tessella API
//!
//! Result serialization and query drivers for the Tessella engine.
//!
//! This crate provides:
//! - The SPARQL-TSV term printer with its escaping write layer
//! - `TsvSelectExecutor`: drives a plan's root iterator and streams the
//!   result rows as SPARQL 1.1 Query Results TSV

pub mod error;
pub mod format;
pub mod select;

// Re-exports
pub use error::{FormatError, Result};
pub use format::{print_term, TsvEscape};
pub use select::TsvSelectExecutor;
