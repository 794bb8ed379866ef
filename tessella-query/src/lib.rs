//! # Tessella Query
//!
//! Query execution core for the Tessella engine.
//!
//! This crate provides:
//! - `Binding`: the per-query variable-to-value tuple
//! - The `BindingIter` operator tree with the `begin/next/reset/assign_nulls`
//!   pull protocol (`NestedLoopJoin`, `ValuesIter`, `FilterIter`, `BindIter`)
//! - The expression tree evaluating SPARQL built-ins over encoded terms
//! - `QueryContext`: per-query access to catalogs, dictionary, temp store,
//!   path manager, and the cancellation flag

pub mod bind;
pub mod binding;
pub mod context;
pub mod error;
pub mod expr;
pub mod filter;
pub mod iter;
pub mod join;
pub mod op;
pub mod values;
pub mod var_registry;

#[cfg(test)]
mod test_support;

// Re-exports
pub use bind::BindIter;
pub use binding::Binding;
pub use context::QueryContext;
pub use error::{QueryError, Result};
pub use expr::{BuiltinFn, Expr};
pub use filter::{effective_boolean_value, FilterIter};
pub use iter::{BindingIter, BoxedIter, EmptyIter};
pub use join::NestedLoopJoin;
pub use op::Op;
pub use values::ValuesIter;
pub use var_registry::{VarId, VarRegistry};
