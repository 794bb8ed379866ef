//! Shared fixtures for unit tests.

use tessella_core::{Catalog, MemoryDictionary, MemoryPathManager, TmpManager};

use crate::context::QueryContext;
use crate::var_registry::{VarId, VarRegistry};

/// Owns one query's worth of stores and hands out contexts over them.
pub struct TestStores {
    pub catalog: Catalog,
    pub dict: MemoryDictionary,
    pub tmp: TmpManager,
    pub paths: MemoryPathManager,
    pub vars: VarRegistry,
}

impl TestStores {
    pub fn with_vars(names: &[&str]) -> Self {
        let mut vars = VarRegistry::new();
        for name in names {
            vars.get_or_insert(name);
        }
        Self {
            catalog: Catalog::new(
                vec![String::new(), "http://example.org/".to_string()],
                vec![
                    "http://www.w3.org/2001/XMLSchema#integer".to_string(),
                    "http://example.org/dt#custom".to_string(),
                ],
                vec!["en".to_string(), "es".to_string()],
            ),
            dict: MemoryDictionary::new(),
            tmp: TmpManager::new(),
            paths: MemoryPathManager::new(),
            vars,
        }
    }

    pub fn ctx(&self) -> QueryContext<'_> {
        QueryContext::new(&self.catalog, &self.dict, &self.tmp, &self.paths, &self.vars)
    }

    pub fn var(&self, name: &str) -> VarId {
        self.vars.get(name).expect("test var not registered")
    }
}
