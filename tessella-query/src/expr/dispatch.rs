//! Built-in dispatch - routes each `BuiltinFn` to its family implementation

use tessella_core::ObjectId;

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{datetime, hash, numeric, string, types, BuiltinFn, Expr};

impl BuiltinFn {
    /// Evaluate this built-in. THE entry point for call evaluation.
    pub(super) fn eval(
        self,
        ctx: &QueryContext<'_>,
        binding: &Binding,
        args: &[Expr],
    ) -> Result<ObjectId> {
        match self {
            // Hash functions
            BuiltinFn::Md5
            | BuiltinFn::Sha1
            | BuiltinFn::Sha256
            | BuiltinFn::Sha384
            | BuiltinFn::Sha512 => hash::eval_hash(ctx, binding, args, self),

            // Temporal accessors
            BuiltinFn::Year
            | BuiltinFn::Month
            | BuiltinFn::Day
            | BuiltinFn::Hours
            | BuiltinFn::Minutes
            | BuiltinFn::Seconds => datetime::eval_component(ctx, binding, args, self),
            BuiltinFn::Tz => datetime::eval_tz(ctx, binding, args),

            // Numeric functions
            BuiltinFn::Abs => numeric::eval_abs(ctx, binding, args),
            BuiltinFn::Ceil => numeric::eval_ceil(ctx, binding, args),
            BuiltinFn::Floor => numeric::eval_floor(ctx, binding, args),
            BuiltinFn::Round => numeric::eval_round(ctx, binding, args),

            // Type tests
            BuiltinFn::IsBlank
            | BuiltinFn::IsIri
            | BuiltinFn::IsLiteral
            | BuiltinFn::IsNumeric => types::eval_type_test(ctx, binding, args, self),

            // Term functions
            BuiltinFn::Str => string::eval_str(ctx, binding, args),
        }
    }
}
