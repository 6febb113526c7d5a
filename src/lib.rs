//! Races an exact CNF-SAT vertex cover solver against two greedy
//! approximations under a shared wall-clock deadline.
//!
//! ```no_run
//! use vertex_race::{graph::Graph, runner::{self, RunnerConfig}};
//!
//! let mut graph = Graph::new(3).unwrap();
//! graph.set_edges([(0, 1), (1, 2), (0, 2)]);
//! let outcome = runner::run(&graph, &RunnerConfig::default());
//! for result in outcome.results() {
//!     println!("{:?}", result.cover());
//! }
//! ```

pub mod approx;
pub mod cancel;
pub mod cputime;
pub mod exact;
pub mod graph;
pub mod protocol;
pub mod report;
pub mod runner;
pub mod sat;

pub use graph::{Edge, Graph, Vertex};
pub use protocol::parse_input;

/// Vertices picked by a solver, in the order the solver picked them.
///
/// This is a sequence rather than a set: nothing here deduplicates, so
/// callers that want set semantics use [`Cover::vertex_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    vertices: Vec<Vertex>,
}

impl Cover {
    pub fn full(n: u32) -> Cover {
        Cover {
            vertices: (0..n).collect(),
        }
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Sorted, deduplicated copy of the picked vertices.
    pub fn vertex_set(&self) -> Vec<Vertex> {
        let mut set = self.vertices.clone();
        set.sort_unstable();
        set.dedup();
        set
    }

    pub fn has_duplicates(&self) -> bool {
        self.vertex_set().len() != self.vertices.len()
    }

    /// Sorted copy that keeps repeated picks.
    pub fn sorted(&self) -> Vec<Vertex> {
        let mut sorted = self.vertices.clone();
        sorted.sort_unstable();
        sorted
    }
}

impl From<Vec<Vertex>> for Cover {
    fn from(vertices: Vec<Vertex>) -> Self {
        Cover { vertices }
    }
}
