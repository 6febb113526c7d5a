//! Minimum vertex cover by reduction to CNF-SAT.
//!
//! For k = 1, 2, ... a fresh engine is asked whether some assignment of k
//! distinct vertices to positions `1..=k` covers every edge. Variable
//! `x[i][j]` means "vertex i sits at position j". The first satisfiable k is
//! the optimum; k = n always is.

use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    cancel::CancelToken,
    sat::{Cadical, Lit, SatEngine, SatOutcome, Var},
    Cover, Edge, Graph, Vertex,
};

type Clause = SmallVec<[Lit; 16]>;

/// Result of asking for a cover of one fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Found(Cover),
    NoCover,
    Cancelled,
}

/// The `n * k` occupancy variables, vertex-major.
struct Occupancy {
    vars: Vec<Var>,
    k: usize,
}

impl Occupancy {
    fn new(engine: &mut impl SatEngine, n: usize, k: usize) -> Self {
        Occupancy {
            vars: (0..n * k).map(|_| engine.new_var()).collect(),
            k,
        }
    }

    fn at(&self, vertex: usize, position: usize) -> Var {
        self.vars[vertex * self.k + position]
    }
}

pub fn exact_cover(graph: &Graph, cancel: &CancelToken) -> Option<Cover> {
    let edges = graph.edges();
    if edges.is_empty() {
        return Some(Cover::default());
    }
    let n = graph.vertices() as usize;
    for k in 1..=n {
        if cancel.is_cancelled() {
            return None;
        }
        let mut engine = Cadical::interruptible(cancel);
        match cover_of_size(&mut engine, graph, &edges, k, cancel) {
            Attempt::Found(cover) => {
                debug!("cnf-sat: minimum cover has {k} vertices");
                return Some(cover);
            }
            Attempt::NoCover => trace!("cnf-sat: no cover with {k} vertices"),
            Attempt::Cancelled => {
                debug!("cnf-sat: cancelled while trying k = {k}");
                return None;
            }
        }
    }
    unreachable!("every vertex together always covers the graph, yet k = {n} was unsatisfiable")
}

/// Encodes "a cover of exactly `k` vertices exists" into `engine` and solves.
pub fn cover_of_size<E: SatEngine>(
    engine: &mut E,
    graph: &Graph,
    edges: &[Edge],
    k: usize,
    cancel: &CancelToken,
) -> Attempt {
    let n = graph.vertices() as usize;
    assert!(k >= 1 && k <= n, "cover size {k} outside 1..={n}");
    let x = Occupancy::new(engine, n, k);
    let mut clause = Clause::new();

    // every position holds some vertex
    for j in 0..k {
        clause.clear();
        clause.extend((0..n).map(|i| x.at(i, j).positive()));
        engine.add_clause(&clause);
    }
    if cancel.is_cancelled() {
        return Attempt::Cancelled;
    }

    // a vertex holds at most one position
    for i in 0..n {
        for p in 0..k {
            for q in p + 1..k {
                engine.add_clause(&[x.at(i, p).negative(), x.at(i, q).negative()]);
            }
        }
    }
    if cancel.is_cancelled() {
        return Attempt::Cancelled;
    }

    // a position holds at most one vertex
    for j in 0..k {
        for p in 0..n {
            for q in p + 1..n {
                engine.add_clause(&[x.at(p, j).negative(), x.at(q, j).negative()]);
            }
        }
        if cancel.is_cancelled() {
            return Attempt::Cancelled;
        }
    }

    // some endpoint of every edge holds some position
    for &(u, v) in edges {
        clause.clear();
        for j in 0..k {
            clause.push(x.at(u as usize, j).positive());
            clause.push(x.at(v as usize, j).positive());
        }
        engine.add_clause(&clause);
    }

    match engine.solve() {
        SatOutcome::Satisfiable => {
            let mut cover = Cover::default();
            for i in 0..n {
                if (0..k).any(|j| engine.model_value(x.at(i, j).positive())) {
                    cover.push(i as Vertex);
                }
            }
            debug_assert_eq!(cover.len(), k);
            debug_assert!(graph.validate_cover(&cover));
            Attempt::Found(cover)
        }
        SatOutcome::Unsatisfiable => Attempt::NoCover,
        SatOutcome::Interrupted => Attempt::Cancelled,
    }
}
