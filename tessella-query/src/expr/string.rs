//! STR - the lexical form of strings and IRIs as a simple string
//!
//! Strings of any flavor reduce to their body; IRIs to their full text.
//! Other categories are out of scope for this evaluator and yield NULL.

use tessella_core::object_id::{MASK_IRI, MASK_STRING};
use tessella_core::{conversions, ObjectId};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{check_arity, Expr};

pub(super) fn eval_str(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
) -> Result<ObjectId> {
    check_arity(args, 1, "STR")?;
    let value = args[0].eval(ctx, binding)?;

    match value.get_generic_type() {
        MASK_STRING => {
            let body = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            Ok(conversions::pack_string_simple(&body, ctx.tmp))
        }
        MASK_IRI => {
            let iri = conversions::unpack_iri(value, ctx.catalog, ctx.dict, ctx.tmp)?;
            Ok(conversions::pack_string_simple(&iri, ctx.tmp))
        }
        _ => Ok(ObjectId::NULL),
    }
}
