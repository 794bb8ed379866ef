//! Execution context for query operators and expressions
//!
//! One `QueryContext` exists per query. It bundles the read-only stores
//! (catalog, dictionary, path manager), the per-query writable temp store,
//! the variable registry, and the cancellation flag, threaded explicitly
//! into every `begin/next/reset` and `eval` call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tessella_core::{Catalog, PathManager, StringDictionary, TmpManager};

use crate::error::{QueryError, Result};
use crate::var_registry::{VarId, VarRegistry};

/// Per-query execution context.
///
/// The catalog, dictionary, and path manager are read-only during
/// execution; the temp store is per-query writable. No locking is required
/// within a single query beyond the temp store's own intern tables.
pub struct QueryContext<'a> {
    /// Prefix / datatype / language catalogs
    pub catalog: &'a Catalog,
    /// Persistent string dictionary
    pub dict: &'a dyn StringDictionary,
    /// Per-query temp store for expression-minted values
    pub tmp: &'a TmpManager,
    /// Path manager for property-path results
    pub paths: &'a dyn PathManager,
    /// Variable registry for this query
    pub vars: &'a VarRegistry,
    /// Cancellation flag polled between rows
    interrupted: Arc<AtomicBool>,
}

impl<'a> QueryContext<'a> {
    /// Create a new query context.
    pub fn new(
        catalog: &'a Catalog,
        dict: &'a dyn StringDictionary,
        tmp: &'a TmpManager,
        paths: &'a dyn PathManager,
        vars: &'a VarRegistry,
    ) -> Self {
        Self {
            catalog,
            dict,
            tmp,
            paths,
            vars,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of variable slots a `Binding` for this query needs.
    pub fn var_size(&self) -> usize {
        self.vars.len()
    }

    /// Variable name for display (`analyze`, headers).
    pub fn var_name(&self, var: VarId) -> &str {
        self.vars.name(var)
    }

    /// Handle callers use to cancel the query from another thread.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Fail if the query has been cancelled. Iterators that loop internally
    /// call this between rows.
    pub fn check_interrupt(&self) -> Result<()> {
        if self.interrupted.load(Ordering::Relaxed) {
            Err(QueryError::Interrupted)
        } else {
            Ok(())
        }
    }
}
