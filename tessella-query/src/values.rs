//! VALUES leaf - enumerates constant rows
//!
//! Injects pre-encoded rows into the binding stream: SPARQL's VALUES
//! clause, and the seed leaf for plans whose scans have already been
//! resolved. Rows may carry NULL entries (VALUES' UNDEF).

use std::io::{self, Write};

use tessella_core::ObjectId;

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::{QueryError, Result};
use crate::iter::BindingIter;
use crate::var_registry::VarId;

/// Constant-rows leaf iterator.
pub struct ValuesIter {
    vars: Vec<VarId>,
    rows: Vec<Vec<ObjectId>>,
    cursor: usize,
    result_count: u64,
    executions: u64,
}

impl ValuesIter {
    /// Create a VALUES leaf. Every row must be as wide as `vars`.
    pub fn new(vars: Vec<VarId>, rows: Vec<Vec<ObjectId>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|r| r.len() != vars.len()) {
            return Err(QueryError::Internal(format!(
                "VALUES row width {} does not match {} variables",
                row.len(),
                vars.len()
            )));
        }
        Ok(Self { vars, rows, cursor: 0, result_count: 0, executions: 0 })
    }
}

impl BindingIter for ValuesIter {
    fn begin(&mut self, _ctx: &QueryContext<'_>, _binding: &mut Binding) -> Result<()> {
        self.executions += 1;
        self.cursor = 0;
        Ok(())
    }

    fn next(&mut self, _ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<bool> {
        let Some(row) = self.rows.get(self.cursor) else {
            return Ok(false);
        };
        for (&var, &value) in self.vars.iter().zip(row) {
            binding.set(var, value);
        }
        self.cursor += 1;
        self.result_count += 1;
        Ok(true)
    }

    fn reset(&mut self, _ctx: &QueryContext<'_>, _binding: &mut Binding) -> Result<()> {
        self.executions += 1;
        self.cursor = 0;
        Ok(())
    }

    fn assign_nulls(&mut self, binding: &mut Binding) {
        for &var in &self.vars {
            binding.set_null(var);
        }
    }

    fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        write!(out, "{:indent$}ValuesIter(", "", indent = indent)?;
        for (i, &var) in self.vars.iter().enumerate() {
            if i != 0 {
                write!(out, ", ")?;
            }
            write!(out, "?{}", ctx.var_name(var))?;
        }
        writeln!(
            out,
            "; rows: {}, result_count: {}, executions: {}",
            self.rows.len(),
            self.result_count,
            self.executions
        )
    }
}
