//! TSV select driver
//!
//! Drives the root iterator and streams one SPARQL-TSV row per produced
//! binding:
//!
//! - Header: tab-separated bare variable names; a query with an empty
//!   projection emits a single blank header line instead.
//! - Row: terms in projection order. Null columns emit nothing, neither
//!   tab nor value: the separator starts empty and becomes a tab only
//!   after the first printed column, so `NULL, NULL, "x"` prints as just
//!   `"x"` and `"x", NULL, "y"` as `"x"`, one tab, `"y"`.

use std::io::{self, Write};

use tracing::debug;

use tessella_query::{Binding, BoxedIter, QueryContext, VarId};

use crate::error::Result;
use crate::format::tsv::print_term;

/// Executes a plan and serializes the result stream as SPARQL TSV.
pub struct TsvSelectExecutor {
    root: BoxedIter,
    projection_vars: Vec<VarId>,
}

impl TsvSelectExecutor {
    pub fn new(root: BoxedIter, projection_vars: Vec<VarId>) -> Self {
        Self { root, projection_vars }
    }

    /// Run the query, writing header and rows to `out`. Returns the row
    /// count.
    pub fn execute(&mut self, ctx: &QueryContext<'_>, out: &mut dyn Write) -> Result<u64> {
        let mut binding = Binding::new(ctx.var_size());
        self.root.begin(ctx, &mut binding)?;

        if self.projection_vars.is_empty() {
            return self.execute_empty_projection(ctx, &mut binding, out);
        }

        for (i, &var) in self.projection_vars.iter().enumerate() {
            if i > 0 {
                out.write_all(b"\t")?;
            }
            out.write_all(ctx.var_name(var).as_bytes())?;
        }
        out.write_all(b"\n")?;

        let mut result_count = 0u64;
        while self.root.next(ctx, &mut binding)? {
            result_count += 1;
            // Empty before the first printed column, a tab afterwards.
            let mut sep: &[u8] = b"";
            for &var in &self.projection_vars {
                let value = binding.get(var);
                if !value.is_null() {
                    out.write_all(sep)?;
                    print_term(out, ctx, value)?;
                    sep = b"\t";
                }
            }
            out.write_all(b"\n")?;
        }

        debug!(rows = result_count, "tsv select complete");
        Ok(result_count)
    }

    /// Empty projection: one blank header line, one blank line per row.
    fn execute_empty_projection(
        &mut self,
        ctx: &QueryContext<'_>,
        binding: &mut Binding,
        out: &mut dyn Write,
    ) -> Result<u64> {
        out.write_all(b"\n")?;

        let mut result_count = 0u64;
        while self.root.next(ctx, binding)? {
            result_count += 1;
            out.write_all(b"\n")?;
        }
        Ok(result_count)
    }

    /// Render the driver and its plan tree with execution counters.
    pub fn analyze(
        &self,
        ctx: &QueryContext<'_>,
        out: &mut dyn Write,
        indent: usize,
    ) -> io::Result<()> {
        write!(out, "{:indent$}TsvSelectExecutor(", "", indent = indent)?;
        for (i, &var) in self.projection_vars.iter().enumerate() {
            if i != 0 {
                write!(out, ", ")?;
            }
            write!(out, "?{}", ctx.var_name(var))?;
        }
        writeln!(out, ")")?;
        self.root.analyze(ctx, out, indent + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessella_core::{conversions, Catalog, MemoryDictionary, MemoryPathManager, ObjectId, TmpManager};
    use tessella_query::{ValuesIter, VarRegistry};

    struct Fixture {
        catalog: Catalog,
        dict: MemoryDictionary,
        tmp: TmpManager,
        paths: MemoryPathManager,
        vars: VarRegistry,
    }

    impl Fixture {
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

    fn run(fixture: &Fixture, root: BoxedIter, projection: Vec<VarId>) -> (String, u64) {
        let ctx = fixture.ctx();
        let mut executor = TsvSelectExecutor::new(root, projection);
        let mut out = Vec::new();
        let count = executor.execute(&ctx, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), count)
    }

    #[test]
    fn test_empty_projection_three_rows() {
        let fixture = Fixture::with_vars(&["x"]);
        let x = fixture.var("x");
        let one = ObjectId::int(1).unwrap();
        let values =
            ValuesIter::new(vec![x], vec![vec![one], vec![one], vec![one]]).unwrap();

        let (output, count) = run(&fixture, Box::new(values), vec![]);
        assert_eq!(count, 3);
        assert_eq!(output, "\n\n\n\n");
    }

    #[test]
    fn test_simple_literal_projection() {
        let fixture = Fixture::with_vars(&["x"]);
        let x = fixture.var("x");
        let hi = conversions::pack_string_simple("hi", &fixture.tmp);
        let values = ValuesIter::new(vec![x], vec![vec![hi]]).unwrap();

        let (output, count) = run(&fixture, Box::new(values), vec![x]);
        assert_eq!(count, 1);
        assert_eq!(output, "x\n\"hi\"\n");
    }

    #[test]
    fn test_numeric_projection() {
        let fixture = Fixture::with_vars(&["n"]);
        let n = fixture.var("n");
        let values = ValuesIter::new(vec![n], vec![vec![ObjectId::int(42).unwrap()]]).unwrap();

        let (output, _) = run(&fixture, Box::new(values), vec![n]);
        assert_eq!(output, "n\n42\n");
    }

    #[test]
    fn test_header_order_matches_projection() {
        let fixture = Fixture::with_vars(&["a", "b"]);
        let (a, b) = (fixture.var("a"), fixture.var("b"));
        let values = ValuesIter::new(
            vec![a, b],
            vec![vec![ObjectId::int(1).unwrap(), ObjectId::int(2).unwrap()]],
        )
        .unwrap();

        // Projection reverses the pattern order.
        let (output, _) = run(&fixture, Box::new(values), vec![b, a]);
        assert_eq!(output, "b\ta\n2\t1\n");
    }

    #[test]
    fn test_null_columns_collapse() {
        let fixture = Fixture::with_vars(&["a", "b", "c"]);
        let (a, b, c) = (fixture.var("a"), fixture.var("b"), fixture.var("c"));
        let x = conversions::pack_string_simple("x", &fixture.tmp);
        let y = conversions::pack_string_simple("y", &fixture.tmp);

        let values = ValuesIter::new(
            vec![a, b, c],
            vec![
                vec![ObjectId::NULL, ObjectId::NULL, x],
                vec![x, ObjectId::NULL, y],
            ],
        )
        .unwrap();

        // Null columns emit neither tab nor value.
        let (output, _) = run(&fixture, Box::new(values), vec![a, b, c]);
        assert_eq!(output, "a\tb\tc\n\"x\"\n\"x\"\t\"y\"\n");
    }

    #[test]
    fn test_zero_rows_still_prints_header() {
        let fixture = Fixture::with_vars(&["x"]);
        let x = fixture.var("x");
        let values = ValuesIter::new(vec![x], vec![]).unwrap();

        let (output, count) = run(&fixture, Box::new(values), vec![x]);
        assert_eq!(count, 0);
        assert_eq!(output, "x\n");
    }

    #[test]
    fn test_analyze_renders_tree() {
        let fixture = Fixture::with_vars(&["x"]);
        let x = fixture.var("x");
        let values = ValuesIter::new(vec![x], vec![]).unwrap();
        let executor = TsvSelectExecutor::new(Box::new(values), vec![x]);

        let mut out = Vec::new();
        executor.analyze(&fixture.ctx(), &mut out, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("TsvSelectExecutor(?x)\n"));
        assert!(text.contains("  ValuesIter(?x;"));
    }
}
