//! FILTER operator - drops rows whose condition is not true
//!
//! The condition is evaluated to its SPARQL effective boolean value. NULL
//! (unbound or evaluation error) is false, so the row is dropped.

use std::io::{self, Write};

use bigdecimal::BigDecimal;
use tessella_core::{conversions, object_id, ObjectId};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;
use crate::expr::Expr;
use crate::iter::{BindingIter, BoxedIter};

/// Filtering iterator: forwards child rows that pass the condition.
pub struct FilterIter {
    child: BoxedIter,
    condition: Expr,
    passed: u64,
    dropped: u64,
}

impl FilterIter {
    pub fn new(child: BoxedIter, condition: Expr) -> Self {
        Self { child, condition, passed: 0, dropped: 0 }
    }
}

/// SPARQL effective boolean value of an encoded term.
///
/// `None` means no EBV exists (NULL input or a non-EBV category); FILTER
/// treats that as false.
pub fn effective_boolean_value(
    ctx: &QueryContext<'_>,
    value: ObjectId,
) -> Result<Option<bool>> {
    match value.get_generic_type() {
        object_id::MASK_BOOL_SUB => Ok(Some(value.unpack_bool())),
        object_id::MASK_NUMERIC => match value.get_sub_type() {
            object_id::MASK_INT_POS | object_id::MASK_INT_NEG => {
                Ok(Some(value.unpack_int() != 0))
            }
            object_id::MASK_FLOAT_SUB => {
                let f = value.unpack_float();
                Ok(Some(f != 0.0 && !f.is_nan()))
            }
            object_id::MASK_DOUBLE => {
                let d = conversions::unpack_double(value, ctx.dict, ctx.tmp)?;
                Ok(Some(d != 0.0 && !d.is_nan()))
            }
            _ => {
                let d = conversions::unpack_decimal(value, ctx.dict, ctx.tmp)?;
                Ok(Some(d != BigDecimal::from(0)))
            }
        },
        object_id::MASK_STRING => {
            let s = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            Ok(Some(!s.is_empty()))
        }
        _ => Ok(None),
    }
}

impl BindingIter for FilterIter {
    fn begin(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.child.begin(ctx, binding)
    }

    fn next(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<bool> {
        loop {
            ctx.check_interrupt()?;
            if !self.child.next(ctx, binding)? {
                return Ok(false);
            }
            let value = self.condition.eval(ctx, binding)?;
            if effective_boolean_value(ctx, value)?.unwrap_or(false) {
                self.passed += 1;
                return Ok(true);
            }
            self.dropped += 1;
        }
    }

    fn reset(&mut self, ctx: &QueryContext<'_>, binding: &mut Binding) -> Result<()> {
        self.child.reset(ctx, binding)
    }

    fn assign_nulls(&mut self, binding: &mut Binding) {
        self.child.assign_nulls(binding);
    }

    fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{:indent$}FilterIter({}; passed: {}, dropped: {})",
            "",
            self.condition.describe(ctx.vars),
            self.passed,
            self.dropped,
            indent = indent
        )?;
        self.child.analyze(ctx, out, indent + 2)
    }
}
