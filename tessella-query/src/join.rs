//! Nested-loop join with OPTIONAL-aware NULL propagation
//!
//! For each lhs row, the rhs is re-begun against the lhs values and probed
//! for join-compatible rows. Variable sets are precomputed by the planner:
//!
//! - `safe_join_vars`: bound on both sides and must equate; a NULL on
//!   either side still matches (OPTIONAL semantics). A non-empty set puts
//!   the join in left-outer mode: an lhs row with no rhs match is emitted
//!   once with the rhs-only variables NULL.
//! - `unsafe_join_vars`: may or may not be bound; equate only when both
//!   sides are bound.
//! - `parent_safe_vars`: fixed by the enclosing scope; copied into the
//!   child buffers and never overwritten.
//! - `lhs_only_vars` / `rhs_only_vars`: written by exactly one side.
//!
//! The lhs and rhs run against private buffers; the parent binding receives
//! a row only when the join predicate holds. After an OPTIONAL fallback row
//! the active rhs is swapped to the empty sentinel so re-entry advances the
//! lhs.

use std::io::{self, Write};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;
use crate::iter::{BindingIter, BoxedIter, EmptyIter};
use crate::var_registry::VarId;

/// Which iterator the probe loop is currently pulling from.
enum ActiveRhs {
    Real,
    Empty,
}

/// Nested-loop join operator.
pub struct NestedLoopJoin {
    lhs: BoxedIter,
    original_rhs: BoxedIter,
    active_rhs: ActiveRhs,
    empty_iter: EmptyIter,

    lhs_binding: Binding,
    rhs_binding: Binding,

    safe_join_vars: Vec<VarId>,
    unsafe_join_vars: Vec<VarId>,
    parent_safe_vars: Vec<VarId>,
    lhs_only_vars: Vec<VarId>,
    rhs_only_vars: Vec<VarId>,

    /// An lhs row is loaded and its rhs probe is in progress.
    lhs_active: bool,
    /// The current lhs row has produced at least one output row.
    lhs_matched: bool,

    result_count: u64,
    executions: u64,
}

impl NestedLoopJoin {
    pub fn new(
        lhs: BoxedIter,
        rhs: BoxedIter,
        safe_join_vars: Vec<VarId>,
        unsafe_join_vars: Vec<VarId>,
        parent_safe_vars: Vec<VarId>,
        lhs_only_vars: Vec<VarId>,
        rhs_only_vars: Vec<VarId>,
    ) -> Self {
        Self {
            lhs,
            original_rhs: rhs,
            active_rhs: ActiveRhs::Real,
            empty_iter: EmptyIter,
            lhs_binding: Binding::new(0),
            rhs_binding: Binding::new(0),
            safe_join_vars,
            unsafe_join_vars,
            parent_safe_vars,
            lhs_only_vars,
            rhs_only_vars,
            lhs_active: false,
            lhs_matched: false,
            result_count: 0,
            executions: 0,
        }
    }

    /// Left-outer bias is active exactly when safe join vars exist.
    fn optional_mode(&self) -> bool {
        !self.safe_join_vars.is_empty()
    }

    /// Check the join predicate over the two private buffers.
    fn join_predicate(&self) -> bool {
        for &var in &self.safe_join_vars {
            let l = self.lhs_binding.get(var);
            let r = self.rhs_binding.get(var);
            if !l.is_null() && !r.is_null() && l != r {
                return false;
            }
        }
        for &var in &self.unsafe_join_vars {
            let l = self.lhs_binding.get(var);
            let r = self.rhs_binding.get(var);
            if !l.is_null() && !r.is_null() && l != r {
                return false;
            }
        }
        true
    }

    /// Write the matched pair into the parent binding.
    fn emit_match(&self, parent: &mut Binding) {
        for &var in &self.lhs_only_vars {
            parent.set(var, self.lhs_binding.get(var));
        }
        for &var in self.safe_join_vars.iter().chain(self.unsafe_join_vars.iter()) {
            let l = self.lhs_binding.get(var);
            parent.set(var, if l.is_null() { self.rhs_binding.get(var) } else { l });
        }
        for &var in &self.rhs_only_vars {
            parent.set(var, self.rhs_binding.get(var));
        }
    }

    /// Write the OPTIONAL fallback row (lhs values, rhs side NULL).
    fn emit_unmatched(&self, parent: &mut Binding) {
        for &var in self
            .lhs_only_vars
            .iter()
            .chain(self.safe_join_vars.iter())
            .chain(self.unsafe_join_vars.iter())
        {
            parent.set(var, self.lhs_binding.get(var));
        }
        for &var in &self.rhs_only_vars {
            parent.set_null(var);
        }
    }

    /// Seed the rhs buffer for the freshly loaded lhs row and re-begin the
    /// rhs against it.
    fn rebegin_rhs(&mut self, ctx: &QueryContext<'_>, parent: &Binding) -> Result<()> {
        self.rhs_binding.clear();
        for &var in &self.parent_safe_vars {
            self.rhs_binding.set(var, parent.get(var));
        }
        for &var in self
            .lhs_only_vars
            .iter()
            .chain(self.safe_join_vars.iter())
            .chain(self.unsafe_join_vars.iter())
        {
            self.rhs_binding.set(var, self.lhs_binding.get(var));
        }
        self.active_rhs = ActiveRhs::Real;
        self.original_rhs.begin(ctx, &mut self.rhs_binding)
    }
}

impl BindingIter for NestedLoopJoin {
    fn begin(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.executions += 1;
        tracing::trace!(
            executions = self.executions,
            optional = self.optional_mode(),
            "nested loop join begin"
        );
        self.lhs_binding = Binding::new(ctx.var_size());
        self.rhs_binding = Binding::new(ctx.var_size());
        for &var in &self.parent_safe_vars {
            self.lhs_binding.set(var, binding.get(var));
        }
        self.lhs_active = false;
        self.lhs_matched = false;
        self.active_rhs = ActiveRhs::Real;
        self.lhs.begin(ctx, &mut self.lhs_binding)
    }

    fn next(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<bool> {
        loop {
            ctx.check_interrupt()?;

            if !self.lhs_active {
                if !self.lhs.next(ctx, &mut self.lhs_binding)? {
                    return Ok(false);
                }
                self.lhs_active = true;
                self.lhs_matched = false;
                self.rebegin_rhs(ctx, binding)?;
            }

            let has_rhs_row = match self.active_rhs {
                ActiveRhs::Real => self.original_rhs.next(ctx, &mut self.rhs_binding)?,
                ActiveRhs::Empty => self.empty_iter.next(ctx, &mut self.rhs_binding)?,
            };

            if has_rhs_row {
                if self.join_predicate() {
                    self.emit_match(binding);
                    self.lhs_matched = true;
                    self.result_count += 1;
                    return Ok(true);
                }
            } else {
                if self.optional_mode() && !self.lhs_matched {
                    self.emit_unmatched(binding);
                    self.lhs_matched = true;
                    self.active_rhs = ActiveRhs::Empty;
                    self.result_count += 1;
                    return Ok(true);
                }
                // rhs exhausted for this lhs row
                for &var in &self.rhs_only_vars {
                    binding.set_null(var);
                }
                self.lhs_active = false;
            }
        }
    }

    fn reset(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.executions += 1;
        self.lhs_binding.clear();
        for &var in &self.parent_safe_vars {
            self.lhs_binding.set(var, binding.get(var));
        }
        self.lhs_active = false;
        self.lhs_matched = false;
        self.active_rhs = ActiveRhs::Real;
        self.lhs.reset(ctx, &mut self.lhs_binding)
    }

    fn assign_nulls(&mut self, binding: &mut Binding) {
        self.lhs.assign_nulls(binding);
        self.original_rhs.assign_nulls(binding);
    }

    fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        let names = |vars: &[VarId]| {
            vars.iter()
                .map(|&v| format!("?{}", ctx.var_name(v)))
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            out,
            "{:indent$}NestedLoopJoin(safe_join: [{}], unsafe_join: [{}], result_count: {}, executions: {})",
            "",
            names(&self.safe_join_vars),
            names(&self.unsafe_join_vars),
            self.result_count,
            self.executions,
            indent = indent
        )?;
        self.lhs.analyze(ctx, out, indent + 2)?;
        self.original_rhs.analyze(ctx, out, indent + 2)
    }
}
