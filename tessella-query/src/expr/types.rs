//! Type-test built-ins: ISBLANK, ISIRI, ISLITERAL, ISNUMERIC
//!
//! On any bound term the answer is a canonical boolean - the test is total.
//! Only a NULL input propagates as NULL.

use tessella_core::object_id::{
    MASK_ANON, MASK_BOOL_SUB, MASK_DT, MASK_IRI, MASK_NUMERIC, MASK_STRING,
};
use tessella_core::ObjectId;

use crate::binding::Binding;
use crate::context::QueryContext;
use crate::error::Result;

use super::{check_arity, BuiltinFn, Expr};

pub(super) fn eval_type_test(
    ctx: &QueryContext<'_>,
    binding: &Binding,
    args: &[Expr],
    func: BuiltinFn,
) -> Result<ObjectId> {
    check_arity(args, 1, func.name())?;
    let value = args[0].eval(ctx, binding)?;
    if value.is_null() {
        return Ok(ObjectId::NULL);
    }

    let generic = value.get_generic_type();
    let answer = match func {
        BuiltinFn::IsBlank => generic == MASK_ANON,
        BuiltinFn::IsIri => generic == MASK_IRI,
        BuiltinFn::IsNumeric => generic == MASK_NUMERIC,
        // Literals: strings, numerics, booleans, temporals.
        _ => matches!(generic, MASK_STRING | MASK_NUMERIC | MASK_BOOL_SUB | MASK_DT),
    };
    Ok(ObjectId::bool(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStores;
    use tessella_core::{conversions, DateTime};

    fn eval(stores: &TestStores, func: BuiltinFn, input: ObjectId) -> ObjectId {
        let ctx = stores.ctx();
        let binding = Binding::new(ctx.var_size());
        Expr::Call { func, args: vec![Expr::Const(input)] }
            .eval(&ctx, &binding)
            .unwrap()
    }

    fn sample_terms(stores: &TestStores) -> Vec<ObjectId> {
        let ctx = stores.ctx();
        vec![
            ObjectId::anon(3),
            ObjectId::anon_tmp(4),
            conversions::pack_string_simple("s", ctx.tmp),
            conversions::pack_string_lang("hola", 1, ctx.tmp),
            conversions::pack_iri("http://example.org/a", ctx.catalog, ctx.tmp).unwrap(),
            ObjectId::int(-2).unwrap(),
            ObjectId::float(1.5),
            ObjectId::BOOL_FALSE,
            DateTime::pack_date(2024, 1, 1, None).unwrap(),
        ]
    }

    #[test]
    fn test_isblank() {
        let stores = TestStores::with_vars(&[]);
        assert_eq!(eval(&stores, BuiltinFn::IsBlank, ObjectId::anon(7)), ObjectId::BOOL_TRUE);
        assert_eq!(eval(&stores, BuiltinFn::IsBlank, ObjectId::anon_tmp(7)), ObjectId::BOOL_TRUE);
        assert_eq!(
            eval(&stores, BuiltinFn::IsBlank, ObjectId::int(7).unwrap()),
            ObjectId::BOOL_FALSE
        );
    }

    #[test]
    fn test_type_tests_total_on_bound_terms() {
        let stores = TestStores::with_vars(&[]);
        for term in sample_terms(&stores) {
            for func in [
                BuiltinFn::IsBlank,
                BuiltinFn::IsIri,
                BuiltinFn::IsLiteral,
                BuiltinFn::IsNumeric,
            ] {
                let result = eval(&stores, func, term);
                assert!(
                    result == ObjectId::BOOL_TRUE || result == ObjectId::BOOL_FALSE,
                    "{:?} on {:?} must be a boolean",
                    func,
                    term
                );
            }
        }
    }

    #[test]
    fn test_null_in_null_out() {
        let stores = TestStores::with_vars(&[]);
        for func in [
            BuiltinFn::IsBlank,
            BuiltinFn::IsIri,
            BuiltinFn::IsLiteral,
            BuiltinFn::IsNumeric,
        ] {
            assert!(eval(&stores, func, ObjectId::NULL).is_null());
        }
    }

    #[test]
    fn test_isliteral_classification() {
        let stores = TestStores::with_vars(&[]);
        let ctx = stores.ctx();

        let literal = conversions::pack_string_simple("lit", ctx.tmp);
        assert_eq!(eval(&stores, BuiltinFn::IsLiteral, literal), ObjectId::BOOL_TRUE);
        assert_eq!(
            eval(&stores, BuiltinFn::IsLiteral, ObjectId::int(1).unwrap()),
            ObjectId::BOOL_TRUE
        );

        let iri = conversions::pack_iri("http://example.org/a", ctx.catalog, ctx.tmp).unwrap();
        assert_eq!(eval(&stores, BuiltinFn::IsLiteral, iri), ObjectId::BOOL_FALSE);
        assert_eq!(eval(&stores, BuiltinFn::IsLiteral, ObjectId::anon(1)), ObjectId::BOOL_FALSE);
    }

    #[test]
    fn test_isnumeric_classification() {
        let stores = TestStores::with_vars(&[]);
        let ctx = stores.ctx();

        assert_eq!(
            eval(&stores, BuiltinFn::IsNumeric, ObjectId::float(0.5)),
            ObjectId::BOOL_TRUE
        );
        let s = conversions::pack_string_simple("5", ctx.tmp);
        assert_eq!(eval(&stores, BuiltinFn::IsNumeric, s), ObjectId::BOOL_FALSE);
    }
}
