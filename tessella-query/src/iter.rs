//! Iterator protocol for physical operators
//!
//! Operators form a tree that enumerates variable bindings through the
//! `begin / next / reset / assign_nulls` pull protocol. The executor owns
//! the single `Binding` and passes it down every call; children own their
//! private buffers where the protocol needs them (joins).
//!
//! `begin` may be called more than once: a parent join re-begins its rhs
//! against updated bindings for every outer row.

use std::io::{self, Write};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

/// Physical binding iterator.
///
/// Enumeration order for a given plan is deterministic: whatever the leaf
/// iterators dictate, preserved through every join. Implementations whose
/// `next` loops internally must poll `ctx.check_interrupt()` between rows.
pub trait BindingIter: Send {
    /// Prepare to enumerate against `binding`. Parent-provided values
    /// already present in the binding are fixed; the iterator writes only
    /// the variables it owns.
    fn begin(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()>;

    /// Produce the next row into `binding`. Returns `false` on exhaustion.
    fn next(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<bool>;

    /// Restart enumeration against possibly-updated fixed values in
    /// `binding`.
    fn reset(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()>;

    /// Write NULL to every variable this subtree would bind. Used by
    /// OPTIONAL parents when the subtree contributes no row.
    fn assign_nulls(&mut self, binding: &mut Binding);

    /// Render this subtree with execution counters for `analyze`.
    fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()>;
}

/// Boxed iterator for dynamic dispatch
pub type BoxedIter = Box<dyn BindingIter>;

/// Iterator that never produces a row.
///
/// Stands in for the rhs of an OPTIONAL join after its fallback row has
/// been emitted.
#[derive(Debug, Default)]
pub struct EmptyIter;

impl BindingIter for EmptyIter {
    fn begin(&mut self, _ctx: &QueryContext<'_>, _binding: &mut Binding) -> Result<()> {
        Ok(())
    }

    fn next(&mut self, _ctx: &QueryContext<'_>, _binding: &mut Binding) -> Result<bool> {
        Ok(false)
    }

    fn reset(&mut self, _ctx: &QueryContext<'_>, _binding: &mut Binding) -> Result<()> {
        Ok(())
    }

    fn assign_nulls(&mut self, _binding: &mut Binding) {}

    fn analyze(
        &self,
        _ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        writeln!(out, "{:indent$}EmptyIter", "", indent = indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStores;

    #[test]
    fn test_empty_iter_never_yields() {
        let stores = TestStores::with_vars(&["x"]);
        let ctx = stores.ctx();
        let mut binding = Binding::new(ctx.var_size());

        let mut iter = EmptyIter;
        iter.begin(&ctx, &mut binding).unwrap();
        assert!(!iter.next(&ctx, &mut binding).unwrap());
        iter.reset(&ctx, &mut binding).unwrap();
        assert!(!iter.next(&ctx, &mut binding).unwrap());
    }
}
