//! Property-path result rendering.
//!
//! Path enumeration itself belongs to the path engine; the executor only
//! needs to render a stored path by id. The manager walks the stored
//! node/edge sequence and calls back into caller-supplied printers so the
//! serializer controls term formatting and escaping.

use parking_lot::Mutex;
use std::io::{self, Write};

use crate::error::{EngineError, Result};
use crate::object_id::ObjectId;

/// Prints a path node term.
pub type NodePrinter<'a> = dyn FnMut(&mut dyn Write, ObjectId) -> io::Result<()> + 'a;

/// Prints a path edge term; `inverse` marks a traversal against edge
/// direction.
pub type EdgePrinter<'a> = dyn FnMut(&mut dyn Write, ObjectId, bool) -> io::Result<()> + 'a;

/// Resolves path ids to stored paths and renders them.
pub trait PathManager: Send + Sync {
    /// Render the path `id` by alternating node and edge callbacks.
    fn print(
        &self,
        w: &mut dyn Write,
        id: u64,
        print_node: &mut NodePrinter<'_>,
        print_edge: &mut EdgePrinter<'_>,
    ) -> Result<()>;
}

/// One traversal step: the edge taken and the node reached.
#[derive(Clone, Debug)]
pub struct PathStep {
    pub edge: ObjectId,
    pub inverse: bool,
    pub node: ObjectId,
}

/// A stored path: a start node and its steps.
#[derive(Clone, Debug)]
pub struct PathSpec {
    pub start: ObjectId,
    pub steps: Vec<PathStep>,
}

/// In-memory path manager for tests and embedded use.
///
/// Paths register during enumeration (shared context, so `&self`), and the
/// store drops with the query.
#[derive(Default)]
pub struct MemoryPathManager {
    paths: Mutex<Vec<PathSpec>>,
}

impl MemoryPathManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a path, returning its id.
    pub fn register(&self, spec: PathSpec) -> u64 {
        let mut paths = self.paths.lock();
        paths.push(spec);
        (paths.len() - 1) as u64
    }
}

impl PathManager for MemoryPathManager {
    fn print(
        &self,
        w: &mut dyn Write,
        id: u64,
        print_node: &mut NodePrinter<'_>,
        print_edge: &mut EdgePrinter<'_>,
    ) -> Result<()> {
        let spec = self
            .paths
            .lock()
            .get(id as usize)
            .cloned()
            .ok_or(EngineError::UnknownId { kind: "path", id })?;

        let io_err = |e: io::Error| EngineError::Malformed(format!("path write: {}", e));
        print_node(w, spec.start).map_err(io_err)?;
        for step in &spec.steps {
            print_edge(w, step.edge, step.inverse).map_err(io_err)?;
            print_node(w, step.node).map_err(io_err)?;
        }
        Ok(())
    }
}
