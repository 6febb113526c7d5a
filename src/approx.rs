//! Greedy vertex cover heuristics.
//!
//! Both return the vertices in pick order. Neither can pick a vertex twice:
//! a picked vertex loses (or marks) every incident edge on the spot.

use bitvec::prelude::*;
use smallvec::SmallVec;

use crate::{cancel::CancelToken, Cover, Graph, Vertex};

/// Repeatedly takes a vertex of highest remaining degree (lowest id among
/// ties) and deletes its edges. Works on a private copy of the graph.
pub fn max_degree_cover(graph: &Graph, cancel: &CancelToken) -> Option<Cover> {
    let mut remaining = graph.clone();
    let mut cover = Cover::default();
    while remaining.has_edges() {
        if cancel.is_cancelled() {
            return None;
        }
        let Some(top) = remaining.ranked_vertices().first().copied() else {
            break;
        };
        let neighbours: SmallVec<[Vertex; 16]> = remaining.neighbours(top.vertex).collect();
        for neighbour in neighbours {
            remaining.remove_edge(top.vertex, neighbour);
        }
        cover.push(top.vertex);
    }
    debug_assert!(!cover.has_duplicates());
    Some(cover)
}

/// Sweeps edges in ascending `(u, v)` order; the first uncovered edge puts
/// both endpoints in the cover and marks every edge touching either one.
pub fn edge_sweep_cover(graph: &Graph, cancel: &CancelToken) -> Option<Cover> {
    let edges = graph.edges();
    let mut covered = bitvec![0; edges.len()];
    let mut cover = Cover::default();
    for i in 0..edges.len() {
        if covered[i] {
            continue;
        }
        if cancel.is_cancelled() {
            return None;
        }
        let (a, b) = edges[i];
        cover.push(a);
        cover.push(b);
        for (j, &(u, v)) in edges.iter().enumerate().skip(i) {
            if u == a || u == b || v == a || v == b {
                covered.set(j, true);
            }
        }
    }
    debug_assert!(!cover.has_duplicates());
    Some(cover)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Edge;

    fn graph(n: i64, edges: &[Edge]) -> Graph {
        let mut graph = Graph::new(n).unwrap();
        graph.set_edges(edges.iter().copied());
        graph
    }

    fn max_degree(graph: &Graph) -> Cover {
        let cover = max_degree_cover(graph, &CancelToken::new()).unwrap();
        assert!(graph.validate_cover(&cover));
        cover
    }

    fn edge_sweep(graph: &Graph) -> Cover {
        let cover = edge_sweep_cover(graph, &CancelToken::new()).unwrap();
        assert!(graph.validate_cover(&cover));
        cover
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(4).unwrap();
        assert!(max_degree(&g).is_empty());
        assert!(edge_sweep(&g).is_empty());
    }

    #[test]
    fn test_single_edge() {
        let g = graph(2, &[(0, 1)]);
        assert_eq!(max_degree(&g).vertices(), &[0]);
        assert_eq!(edge_sweep(&g).vertices(), &[0, 1]);
    }

    #[test]
    fn test_triangle() {
        let g = graph(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(max_degree(&g).vertices(), &[0, 1]);
        assert_eq!(edge_sweep(&g).vertices(), &[0, 1]);
    }

    #[test]
    fn test_max_degree_picks_hub_first() {
        // hub 3 with leaves, plus a separate edge 5-6
        let g = graph(7, &[(3, 0), (3, 1), (3, 2), (3, 4), (5, 6)]);
        assert_eq!(max_degree(&g).vertices(), &[3, 5]);
    }

    #[test]
    fn test_input_graph_untouched() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        let before = g.clone();
        max_degree(&g);
        edge_sweep(&g);
        assert_eq!(g, before);
    }

    #[test]
    fn test_edge_sweep_path() {
        // (0,1) takes 0 and 1, (1,2) is then covered, (2,3) takes 2 and 3
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(edge_sweep(&g).vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_no_repeats_on_dense_graph() {
        let mut edges = Vec::new();
        for u in 0..8 {
            for v in u + 1..8 {
                if (u * 7 + v * 3) % 4 != 0 {
                    edges.push((u, v));
                }
            }
        }
        let g = graph(8, &edges);
        assert!(!max_degree(&g).has_duplicates());
        assert!(!edge_sweep(&g).has_duplicates());
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let g = graph(2, &[(0, 1)]);
        assert_eq!(max_degree_cover(&g, &cancel), None);
        assert_eq!(edge_sweep_cover(&g, &cancel), None);
    }
}
