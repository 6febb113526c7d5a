use bitvec::prelude::*;
use std::{cmp::Reverse, collections::VecDeque};
use thiserror::Error;

use crate::Cover;

pub type Vertex = u32;
pub type Edge = (Vertex, Vertex);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid graph size {0}, must be non-negative and fit in memory")]
    InvalidSize(i64),
    #[error("invalid edge ({0}, {1}), vertex does not exist")]
    VertexOutOfRange(i64, i64),
    #[error("invalid edge ({0}, {0}), self-loops are not allowed")]
    SelfLoop(i64),
}

/// A vertex paired with its degree at the time of ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedVertex {
    pub vertex: Vertex,
    pub degree: usize,
}

/// Undirected simple graph over `0..vertices`.
///
/// The adjacency relation is one row-major bit buffer of `n * n` bits,
/// kept symmetric with an empty diagonal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    vertices: u32,
    adjacency: BitVec,
}

impl Graph {
    /// Fails with [`GraphError::InvalidSize`] for negative sizes and for
    /// sizes whose adjacency buffer cannot be addressed or allocated.
    pub fn new(vertices: i64) -> Result<Graph, GraphError> {
        let invalid = || GraphError::InvalidSize(vertices);
        let n = u32::try_from(vertices).map_err(|_| invalid())?;
        let bits = (n as usize)
            .checked_mul(n as usize)
            .filter(|&bits| bits <= BitSlice::<usize, Lsb0>::MAX_BITS)
            .ok_or_else(invalid)?;
        let words = bits.div_ceil(usize::BITS as usize);
        let mut storage = Vec::<usize>::new();
        storage.try_reserve_exact(words).map_err(|_| invalid())?;
        storage.resize(words, 0);
        let mut adjacency = BitVec::from_vec(storage);
        adjacency.truncate(bits);
        Ok(Graph {
            vertices: n,
            adjacency,
        })
    }

    pub fn vertices(&self) -> u32 {
        self.vertices
    }

    /// Inserts every edge symmetrically. Endpoints must be distinct and in
    /// range; re-inserting an existing edge changes nothing.
    pub fn set_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for (u, v) in edges {
            debug_assert!(u < self.vertices && v < self.vertices && u != v);
            self.set(u, v, true);
        }
    }

    /// Checks every edge before inserting any of them, so a rejected list
    /// leaves the graph untouched.
    pub fn try_set_edges(&mut self, edges: &[(i64, i64)]) -> Result<(), GraphError> {
        let n = i64::from(self.vertices);
        for &(u, v) in edges {
            if !(0..n).contains(&u) || !(0..n).contains(&v) {
                return Err(GraphError::VertexOutOfRange(u, v));
            }
            if u == v {
                return Err(GraphError::SelfLoop(u));
            }
        }
        self.set_edges(edges.iter().map(|&(u, v)| (u as Vertex, v as Vertex)));
        Ok(())
    }

    fn index(&self, u: Vertex, v: Vertex) -> usize {
        u as usize * self.vertices as usize + v as usize
    }

    fn set(&mut self, u: Vertex, v: Vertex, value: bool) {
        let (uv, vu) = (self.index(u, v), self.index(v, u));
        self.adjacency.set(uv, value);
        self.adjacency.set(vu, value);
    }

    fn row(&self, vertex: Vertex) -> &BitSlice {
        let start = self.index(vertex, 0);
        &self.adjacency[start..start + self.vertices as usize]
    }

    pub fn connected(&self, a: Vertex, b: Vertex) -> bool {
        self.adjacency[self.index(a, b)]
    }

    pub fn deg(&self, vertex: Vertex) -> usize {
        self.row(vertex).count_ones()
    }

    pub fn neighbours(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.row(vertex).iter_ones().map(|v| v as Vertex)
    }

    pub fn has_edges(&self) -> bool {
        self.adjacency.any()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.count_ones() / 2
    }

    /// Every edge once as `(u, v)` with `u < v`, in ascending `(u, v)` order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for u in 0..self.vertices {
            let upper = &self.row(u)[u as usize + 1..];
            edges.extend(upper.iter_ones().map(|offset| (u, u + 1 + offset as Vertex)));
        }
        edges
    }

    /// All vertices by descending degree, lower vertex id first among equals.
    pub fn ranked_vertices(&self) -> Vec<RankedVertex> {
        let mut ranked: Vec<RankedVertex> = (0..self.vertices)
            .map(|vertex| RankedVertex {
                vertex,
                degree: self.deg(vertex),
            })
            .collect();
        ranked.sort_by_key(|r| Reverse(r.degree));
        ranked
    }

    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        assert!(u < self.vertices, "vertex {u} out of range");
        assert!(v < self.vertices, "vertex {v} out of range");
        assert_ne!(u, v, "self-loop ({u}, {v}) cannot be an edge");
        self.set(u, v, false);
    }

    /// Shortest path from `from` to `to`, both included. `[from]` when the
    /// two are equal, empty when `to` is unreachable.
    pub fn path(&self, from: Vertex, to: Vertex) -> Vec<Vertex> {
        assert!(from < self.vertices && to < self.vertices);
        if from == to {
            return vec![from];
        }
        let mut parent: Vec<Option<Vertex>> = vec![None; self.vertices as usize];
        parent[from as usize] = Some(from);
        let mut queue = VecDeque::from([from]);
        while let Some(u) = queue.pop_front() {
            if u == to {
                break;
            }
            for v in self.neighbours(u) {
                if parent[v as usize].is_none() {
                    parent[v as usize] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        if parent[to as usize].is_none() {
            return Vec::new();
        }
        let mut path = vec![to];
        let mut current = to;
        while let Some(previous) = parent[current as usize].filter(|&p| p != current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }

    pub fn validate_cover(&self, cover: &Cover) -> bool {
        for (start, end) in self.edges() {
            if !(cover.contains(start) || cover.contains(end)) {
                log::debug!("edge ({start}, {end}) not covered");
                return false;
            }
        }
        true
    }
}
