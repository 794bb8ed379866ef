//! Hash built-ins: MD5, SHA1, SHA256, SHA384, SHA512
//!
//! Guarded on the simple-string sub-type: any other input is a type error
//! (NULL). The digest is lowercase hex over the UTF-8 bytes, packed back as
//! a simple string.

use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tessella_core::{conversions, ObjectId};

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{check_arity, BuiltinFn, Expr};

pub(super) fn eval_hash(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
    func: BuiltinFn,
) -> Result<ObjectId> {
    check_arity(args, 1, func.name())?;
    let value = args[0].eval(ctx, binding)?;

    let Some(s) = conversions::unpack_string_simple(value, ctx.dict, ctx.tmp)? else {
        return Ok(ObjectId::NULL);
    };

    let digest = match func {
        BuiltinFn::Md5 => hex_digest::<Md5>(&s),
        BuiltinFn::Sha1 => hex_digest::<Sha1>(&s),
        BuiltinFn::Sha256 => hex_digest::<Sha256>(&s),
        BuiltinFn::Sha384 => hex_digest::<Sha384>(&s),
        _ => hex_digest::<Sha512>(&s),
    };
    Ok(conversions::pack_string_simple(&digest, ctx.tmp))
}

fn hex_digest<D: Digest>(s: &str) -> String {
    let mut hasher = D::new();
    hasher.update(s.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
