//! BIND operator - evaluates an expression and binds the result
//!
//! Over each row from its child, assigns the target variable to the value
//! of the expression on that row. A SPARQL evaluation error leaves the
//! variable NULL; the row still flows.

use std::io::{self, Write};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;
use crate::expr::Expr;
use crate::iter::{BindingIter, BoxedIter};
use crate::var_registry::VarId;

/// Physical BIND iterator.
pub struct BindIter {
    child: BoxedIter,
    var: VarId,
    expr: Expr,
    result_count: u64,
}

impl BindIter {
    pub fn new(child: BoxedIter, var: VarId, expr: Expr) -> Self {
        Self { child, var, expr, result_count: 0 }
    }
}

impl BindingIter for BindIter {
    fn begin(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.child.begin(ctx, binding)
    }

    fn next(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<bool> {
        if !self.child.next(ctx, binding)? {
            return Ok(false);
        }
        let value = self.expr.eval(ctx, binding)?;
        binding.set(self.var, value);
        self.result_count += 1;
        Ok(true)
    }

    fn reset(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.child.reset(ctx, binding)
    }

    fn assign_nulls(&mut self, binding: &mut Binding) {
        self.child.assign_nulls(binding);
        binding.set_null(self.var);
    }

    fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{:indent$}BindIter(?{} = {}; result_count: {})",
            "",
            ctx.var_name(self.var),
            self.expr.describe(ctx.vars),
            self.result_count,
            indent = indent
        )?;
        self.child.analyze(ctx, out, indent + 2)
    }
}
