//! Temporal accessor built-ins: YEAR, MONTH, DAY, HOURS, MINUTES, SECONDS, TZ
//!
//! Guarded on the temporal generic type; any other input is NULL. TZ
//! returns the timezone designator as a simple string (empty when the value
//! carries no timezone).

use tessella_core::object_id::MASK_DT;
use tessella_core::{conversions, DateTime, ObjectId};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{check_arity, BuiltinFn, Expr};

pub(super) fn eval_component(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
    func: BuiltinFn,
) -> Result<ObjectId> {
    check_arity(args, 1, func.name())?;
    let value = args[0].eval(ctx, binding)?;
    if value.get_generic_type() != MASK_DT {
        return Ok(ObjectId::NULL);
    }

    let dt = DateTime::from_id(value)?;
    let component: i64 = match func {
        BuiltinFn::Year => dt.year().into(),
        BuiltinFn::Month => dt.month().into(),
        BuiltinFn::Day => dt.day().into(),
        BuiltinFn::Hours => dt.hour().into(),
        BuiltinFn::Minutes => dt.minute().into(),
        _ => dt.second().into(),
    };
    Ok(ObjectId::int(component).unwrap_or(ObjectId::NULL))
}

pub(super) fn eval_tz(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "TZ")?;
    let value = args[0].eval(ctx, binding)?;
    if value.get_generic_type() != MASK_DT {
        return Ok(ObjectId::NULL);
    }

    let designator = DateTime::from_id(value)?.tz_designator();
    Ok(conversions::pack_string_simple(&designator, ctx.tmp))
}
