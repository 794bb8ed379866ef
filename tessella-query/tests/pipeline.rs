//! End-to-end operator pipelines: join, bind, and filter composed.

use tessella_core::{conversions, Catalog, MemoryDictionary, MemoryPathManager, ObjectId, TmpManager};
use tessella_query::{
    BindIter, Binding, BindingIter, BuiltinFn, Expr, FilterIter, NestedLoopJoin, QueryContext,
    ValuesIter, VarId, VarRegistry,
};

struct Harness {
    catalog: Catalog,
    dict: MemoryDictionary,
    tmp: TmpManager,
    paths: MemoryPathManager,
    vars: VarRegistry,
}

impl Harness {
    fn with_vars(names: &[&str]) -> Self {
        let mut vars = VarRegistry::new();
        for name in names {
            vars.get_or_insert(name);
        }
        Self {
            catalog: Catalog::default(),
            dict: MemoryDictionary::new(),
            tmp: TmpManager::new(),
            paths: MemoryPathManager::new(),
            vars,
        }
    }

    fn ctx(&self) -> QueryContext<'_> {
        QueryContext::new(&self.catalog, &self.dict, &self.tmp, &self.paths, &self.vars)
    }

    fn var(&self, name: &str) -> VarId {
        self.vars.get(name).unwrap()
    }
}

fn int(v: i64) -> ObjectId {
    ObjectId::int(v).unwrap()
}

fn drain(
    iter: &mut dyn BindingIter,
    ctx: &QueryContext<'_>,
    vars: &[VarId],
) -> Vec<Vec<ObjectId>> {
    let mut binding = Binding::new(ctx.var_size());
    iter.begin(ctx, &mut binding).unwrap();
    let mut rows = Vec::new();
    while iter.next(ctx, &mut binding).unwrap() {
        rows.push(vars.iter().map(|&v| binding.get(v)).collect());
    }
    rows
}

#[test]
fn filter_over_optional_join_keeps_matched_rows() {
    let h = Harness::with_vars(&["a", "b", "c"]);
    let ctx = h.ctx();
    let (a, b, c) = (h.var("a"), h.var("b"), h.var("c"));

    let lhs =
        ValuesIter::new(vec![a, b], vec![vec![int(1), int(2)], vec![int(3), int(4)]]).unwrap();
    let rhs =
        ValuesIter::new(vec![b, c], vec![vec![int(2), int(5)], vec![int(9), int(6)]]).unwrap();
    let join = NestedLoopJoin::new(
        Box::new(lhs),
        Box::new(rhs),
        vec![b],
        vec![],
        vec![],
        vec![a],
        vec![c],
    );

    // FILTER(ISNUMERIC(?c)): the padded row has ?c NULL, so it drops.
    let mut filter = FilterIter::new(
        Box::new(join),
        Expr::Call { func: BuiltinFn::IsNumeric, args: vec![Expr::Var(c)] },
    );

    let rows = drain(&mut filter, &ctx, &[a, b, c]);
    assert_eq!(rows, vec![vec![int(1), int(2), int(5)]]);
}

#[test]
fn bind_feeds_downstream_filter() {
    let h = Harness::with_vars(&["x", "y"]);
    let ctx = h.ctx();
    let (x, y) = (h.var("x"), h.var("y"));

    let child =
        ValuesIter::new(vec![x], vec![vec![int(-5)], vec![int(0)], vec![int(3)]]).unwrap();
    let bind = BindIter::new(
        Box::new(child),
        y,
        Expr::Call { func: BuiltinFn::Abs, args: vec![Expr::Var(x)] },
    );
    // FILTER(?y): zero has a false effective boolean value.
    let mut filter = FilterIter::new(Box::new(bind), Expr::Var(y));

    let rows = drain(&mut filter, &ctx, &[x, y]);
    assert_eq!(rows, vec![vec![int(-5), int(5)], vec![int(3), int(3)]]);
}

#[test]
fn hash_of_joined_string_matches_direct_evaluation() {
    let h = Harness::with_vars(&["s", "d"]);
    let ctx = h.ctx();
    let (s, d) = (h.var("s"), h.var("d"));

    let value = conversions::pack_string_simple("abc", &h.tmp);
    let child = ValuesIter::new(vec![s], vec![vec![value]]).unwrap();
    let mut bind = BindIter::new(
        Box::new(child),
        d,
        Expr::Call { func: BuiltinFn::Sha512, args: vec![Expr::Var(s)] },
    );

    let rows = drain(&mut bind, &ctx, &[d]);
    assert_eq!(rows.len(), 1);
    let digest = conversions::unpack_string(rows[0][0], ctx.dict, ctx.tmp).unwrap();
    assert!(digest.starts_with("ddaf35a1"));
    assert_eq!(digest.len(), 128);
}
