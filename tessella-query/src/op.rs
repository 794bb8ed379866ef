//! Logical operators consumed by the planner
//!
//! The full algebra (graph patterns, joins, paths) lives upstream with the
//! parser; this module carries the nodes the execution layer is planned
//! from, with the variable-set queries the planner relies on:
//!
//! - `scope_vars`: variables visible in the operator's scope
//! - `safe_vars`: variables guaranteed bound on every enumeration path
//! - `fixable_vars`: variables a parent may fix to a constant

use std::collections::BTreeSet;

use crate::expr::Expr;
use crate::var_registry::VarId;

/// Logical operator tree node.
#[derive(Clone, Debug)]
pub enum Op {
    /// A resolved graph pattern binding `vars` (stand-in for the pattern
    /// algebra planned upstream).
    Pattern { vars: Vec<VarId> },
    /// BIND: over each child row, assign `var` to `expr` evaluated on that
    /// row.
    Bind {
        child: Box<Op>,
        var: VarId,
        expr: Expr,
    },
}

impl Op {
    /// Every variable this subtree mentions, expressions included.
    pub fn all_vars(&self) -> BTreeSet<VarId> {
        match self {
            Op::Pattern { vars } => vars.iter().copied().collect(),
            Op::Bind { child, var, expr } => {
                let mut out = child.all_vars();
                out.insert(*var);
                expr.vars(&mut out);
                out
            }
        }
    }

    /// Variables visible in this operator's scope.
    pub fn scope_vars(&self) -> BTreeSet<VarId> {
        match self {
            Op::Pattern { vars } => vars.iter().copied().collect(),
            Op::Bind { child, var, .. } => {
                let mut out = child.scope_vars();
                out.insert(*var);
                out
            }
        }
    }

    /// Variables guaranteed bound on every enumeration path.
    ///
    /// BIND does not add its variable: the expression may evaluate to NULL.
    pub fn safe_vars(&self) -> BTreeSet<VarId> {
        match self {
            Op::Pattern { vars } => vars.iter().copied().collect(),
            Op::Bind { child, .. } => child.safe_vars(),
        }
    }

    /// Variables a parent operator may fix to a constant.
    pub fn fixable_vars(&self) -> BTreeSet<VarId> {
        match self {
            Op::Pattern { vars } => vars.iter().copied().collect(),
            Op::Bind { child, .. } => child.fixable_vars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::BuiltinFn;

    fn set(vars: &[VarId]) -> BTreeSet<VarId> {
        vars.iter().copied().collect()
    }

    #[test]
    fn test_pattern_var_sets() {
        let op = Op::Pattern { vars: vec![VarId(0), VarId(1)] };
        assert_eq!(op.scope_vars(), set(&[VarId(0), VarId(1)]));
        assert_eq!(op.safe_vars(), set(&[VarId(0), VarId(1)]));
        assert_eq!(op.fixable_vars(), set(&[VarId(0), VarId(1)]));
    }

    #[test]
    fn test_bind_adds_scope_but_not_safe() {
        let child = Op::Pattern { vars: vec![VarId(0)] };
        let op = Op::Bind {
            child: Box::new(child),
            var: VarId(1),
            expr: Expr::Call { func: BuiltinFn::Abs, args: vec![Expr::Var(VarId(0))] },
        };

        assert_eq!(op.scope_vars(), set(&[VarId(0), VarId(1)]));
        // The bound variable may come out NULL, so it is not safe.
        assert_eq!(op.safe_vars(), set(&[VarId(0)]));
        assert_eq!(op.fixable_vars(), set(&[VarId(0)]));
    }

    #[test]
    fn test_bind_all_vars_includes_expression() {
        let child = Op::Pattern { vars: vec![VarId(0)] };
        let op = Op::Bind {
            child: Box::new(child),
            var: VarId(1),
            expr: Expr::Var(VarId(2)),
        };
        assert_eq!(op.all_vars(), set(&[VarId(0), VarId(1), VarId(2)]));
    }

    #[test]
    fn test_clone_for_plan_transformations() {
        let op = Op::Bind {
            child: Box::new(Op::Pattern { vars: vec![VarId(0)] }),
            var: VarId(1),
            expr: Expr::Var(VarId(0)),
        };
        let copy = op.clone();
        assert_eq!(copy.scope_vars(), op.scope_vars());
    }
}
