//! Expression tree over encoded terms
//!
//! Expressions evaluate against a `Binding` to an `ObjectId`, with SPARQL's
//! tri-state semantics: a value, NULL for unbound input or a type error
//! (null-in, null-out), and a Rust error only for engine bugs. They are
//! pure (no effect on the binding) and clonable for plan transformations.
//!
//! Dispatch is an exhaustive match over [`BuiltinFn`]: adding a built-in
//! forces every matcher to handle it.

mod datetime;
mod dispatch;
mod hash;
mod numeric;
mod string;
mod types;

use std::collections::BTreeSet;

use tessella_core::ObjectId;

use crate::context::QueryContext;
use crate::error::{QueryError, Result};
use crate::var_registry::{VarId, VarRegistry};

/// SPARQL built-in functions the evaluator implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinFn {
    // Hash functions (simple-string guarded)
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,

    // Temporal accessors (any temporal category)
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Tz,

    // Numeric functions (exact-tag dispatch)
    Abs,
    Ceil,
    Floor,
    Round,

    // Type tests (boolean on any bound term)
    IsBlank,
    IsIri,
    IsLiteral,
    IsNumeric,

    // Term functions
    Str,
}

impl BuiltinFn {
    /// Display name, as it appears in a query.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinFn::Md5 => "MD5",
            BuiltinFn::Sha1 => "SHA1",
            BuiltinFn::Sha256 => "SHA256",
            BuiltinFn::Sha384 => "SHA384",
            BuiltinFn::Sha512 => "SHA512",
            BuiltinFn::Year => "YEAR",
            BuiltinFn::Month => "MONTH",
            BuiltinFn::Day => "DAY",
            BuiltinFn::Hours => "HOURS",
            BuiltinFn::Minutes => "MINUTES",
            BuiltinFn::Seconds => "SECONDS",
            BuiltinFn::Tz => "TZ",
            BuiltinFn::Abs => "ABS",
            BuiltinFn::Ceil => "CEIL",
            BuiltinFn::Floor => "FLOOR",
            BuiltinFn::Round => "ROUND",
            BuiltinFn::IsBlank => "ISBLANK",
            BuiltinFn::IsIri => "ISIRI",
            BuiltinFn::IsLiteral => "ISLITERAL",
            BuiltinFn::IsNumeric => "ISNUMERIC",
            BuiltinFn::Str => "STR",
        }
    }
}

/// Expression tree node.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A variable read from the binding (NULL when unbound).
    Var(VarId),
    /// A pre-encoded constant.
    Const(ObjectId),
    /// A built-in call over sub-expressions.
    Call { func: BuiltinFn, args: Vec<Expr> },
}

impl Expr {
    /// Evaluate against a binding.
    pub fn eval(&self, ctx: &QueryContext<'_>, binding: &crate::binding::Binding) -> Result<ObjectId> {
        match self {
            Expr::Var(var) => Ok(binding.get(*var)),
            Expr::Const(value) => Ok(*value),
            Expr::Call { func, args } => func.eval(ctx, binding, args),
        }
    }

    /// Collect the free variables of this expression.
    pub fn vars(&self, out: &mut BTreeSet<VarId>) {
        self.walk(&mut |node| {
            if let Expr::Var(var) = node {
                out.insert(*var);
            }
        });
    }

    /// Visit every node of the tree, parents before children.
    pub fn walk(&self, visit: &mut dyn FnMut(&Expr)) {
        visit(self);
        if let Expr::Call { args, .. } = self {
            for arg in args {
                arg.walk(visit);
            }
        }
    }

    /// Render the expression for `analyze` output.
    pub fn describe(&self, vars: &VarRegistry) -> String {
        match self {
            Expr::Var(var) => format!("?{}", vars.name(*var)),
            Expr::Const(value) => format!("{:?}", value),
            Expr::Call { func, args } => {
                let inner: Vec<String> = args.iter().map(|a| a.describe(vars)).collect();
                format!("{}({})", func.name(), inner.join(", "))
            }
        }
    }
}

/// Reject calls with the wrong number of arguments.
pub(crate) fn check_arity(args: &[Expr], expected: usize, name: &str) -> Result<()> {
    if args.len() != expected {
        return Err(QueryError::InvalidExpression(format!(
            "{} takes {} argument(s), got {}",
            name,
            expected,
            args.len()
        )));
    }
    Ok(())
}
