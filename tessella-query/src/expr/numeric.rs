//! Numeric built-ins: ABS, CEIL, FLOOR, ROUND
//!
//! Dispatch on the exact tag, operate in that numeric domain, repack in the
//! same domain. Non-numeric input is a type error (NULL).

use bigdecimal::{BigDecimal, RoundingMode};
use tessella_core::object_id::{
    MASK_DECIMAL, MASK_DECIMAL_INLINED, MASK_DOUBLE, MASK_FLOAT_SUB, MASK_INT_NEG, MASK_INT_POS,
};
use tessella_core::{conversions, DecimalInlined, ObjectId};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{check_arity, Expr};

pub(super) fn eval_abs(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "ABS")?;
    let value = args[0].eval(ctx, binding)?;

    match value.get_sub_type() {
        MASK_INT_POS => Ok(value),
        MASK_INT_NEG => {
            let magnitude = -value.unpack_int();
            Ok(ObjectId::int(magnitude).unwrap_or(ObjectId::NULL))
        }
        MASK_FLOAT_SUB => Ok(ObjectId::float(value.unpack_float().abs())),
        MASK_DOUBLE => {
            let d = conversions::unpack_double(value, ctx.dict, ctx.tmp)?;
            Ok(conversions::pack_double(d.abs(), ctx.tmp))
        }
        MASK_DECIMAL => {
            if value.get_type() == MASK_DECIMAL_INLINED {
                // The inline form carries an explicit sign bit.
                let abs = DecimalInlined::new(value.get_value()).abs_payload();
                return Ok(ObjectId(MASK_DECIMAL_INLINED | abs));
            }
            let d = conversions::unpack_decimal(value, ctx.dict, ctx.tmp)?;
            Ok(conversions::pack_decimal(&d.abs(), ctx.tmp))
        }
        _ => Ok(ObjectId::NULL),
    }
}

pub(super) fn eval_ceil(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "CEIL")?;
    let value = args[0].eval(ctx, binding)?;
    round_dispatch(ctx, value, f32::ceil, f64::ceil, RoundingMode::Ceiling)
}

pub(super) fn eval_floor(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "FLOOR")?;
    let value = args[0].eval(ctx, binding)?;
    round_dispatch(ctx, value, f32::floor, f64::floor, RoundingMode::Floor)
}

pub(super) fn eval_round(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "ROUND")?;
    let value = args[0].eval(ctx, binding)?;
    round_dispatch(ctx, value, f32::round, f64::round, RoundingMode::HalfUp)
}

fn round_dispatch(
    ctx: &QueryContext<'_>,
    value: ObjectId,
    float_op: fn(f32) -> f32,
    double_op: fn(f64) -> f64,
    decimal_mode: RoundingMode,
) -> Result<ObjectId> {
    match value.get_sub_type() {
        // Integers are already integral.
        MASK_INT_POS | MASK_INT_NEG => Ok(value),
        MASK_FLOAT_SUB => Ok(ObjectId::float(float_op(value.unpack_float()))),
        MASK_DOUBLE => {
            let d = conversions::unpack_double(value, ctx.dict, ctx.tmp)?;
            Ok(conversions::pack_double(double_op(d), ctx.tmp))
        }
        MASK_DECIMAL => {
            let d = conversions::unpack_decimal(value, ctx.dict, ctx.tmp)?;
            let rounded: BigDecimal = d.with_scale_round(0, decimal_mode);
            Ok(conversions::pack_decimal(&rounded, ctx.tmp))
        }
        _ => Ok(ObjectId::NULL),
    }
}
