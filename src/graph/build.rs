//! Augmenting a [`Graph`] with back-indices, giving O(1) edge traversal.

use super::{AugNb, Graph, GraphAug};

/// Compute the augmented graph: same adjacency skeleton, but every neighbor
/// entry also carries the position of the matching reverse half-edge.
///
/// Runs in `O(|V| + |E|)`: one work list per vertex is filled with the
/// `(source, back_index)` pair for every incoming half-edge, then vertices
/// are scanned in decreasing order, popping the tail of each neighbor's work
/// list so that every edge is cross-wired exactly once. Undefined behavior
/// (a panicking index, in safe Rust) if `graph` is not a valid adjacency
/// list — this function does not validate its input, see [`super::io::validate`].
pub fn augment(graph: &Graph) -> GraphAug {
    let n = graph.adj.len();

    let mut aug = GraphAug {
        adj: graph.adj.clone(),
        nb: graph
            .nb
            .iter()
            .map(|&vertex| AugNb {
                vertex,
                back_index: 0,
            })
            .collect(),
    };

    let mut work_lists: Vec<Vec<AugNb>> = graph.adj.iter().map(|a| Vec::with_capacity(a.len as usize)).collect();

    for v in 0..n as u32 {
        let v_adj = graph.adj[v as usize];
        for i in 0..v_adj.len {
            let u = graph.nb(v, i);
            work_lists[u as usize].push(AugNb {
                vertex: v,
                back_index: i,
            });
        }
    }

    for v in (0..n as u32).rev() {
        // Drain v's work list, each time popping the tail of the neighbor's
        // own list so every edge is finalized from exactly one side.
        while let Some(v_work) = work_lists[v as usize].pop() {
            let u = v_work.vertex;
            let u_work = work_lists[u as usize]
                .pop()
                .expect("augment: unmatched half-edge, graph is not symmetric");

            let v_adj = aug.adj[v as usize];
            let u_adj = aug.adj[u as usize];

            aug.nb[(v_adj.index + u_work.back_index) as usize].back_index = v_work.back_index;
            aug.nb[(u_adj.index + v_work.back_index) as usize].back_index = u_work.back_index;
        }
    }

    aug
}

/// Back-index correctness invariant: is every reverse pointer consistent?
pub fn aug_validate(graph: &GraphAug) -> bool {
    for v in 0..graph.n() {
        let v_adj = graph.adj[v as usize];
        for i in 0..v_adj.len {
            let vu = graph.nb(v, i);
            if vu.vertex >= graph.n() {
                return false;
            }
            let u_adj = graph.adj[vu.vertex as usize];
            if vu.back_index >= u_adj.len {
                return false;
            }
            let uv = graph.nb(vu.vertex, vu.back_index);
            if uv.vertex != v {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::Adj;

    fn k3() -> Graph {
        Graph {
            adj: vec![
                Adj { index: 0, len: 2 },
                Adj { index: 2, len: 2 },
                Adj { index: 4, len: 2 },
            ],
            nb: vec![1, 2, 0, 2, 0, 1],
        }
    }

    #[test]
    fn augment_preserves_adjacency() {
        let g = k3();
        let aug = augment(&g);
        for v in 0..g.n() {
            for i in 0..g.deg(v) {
                assert_eq!(aug.nb(v, i).vertex, g.nb(v, i));
            }
        }
    }

    #[test]
    fn augment_back_index_invariant() {
        let g = k3();
        let aug = augment(&g);
        assert!(aug_validate(&aug));
    }

    #[test]
    fn augment_is_idempotent_on_an_already_augmented_skeleton() {
        let g = k3();
        let aug = augment(&g);
        let aug_again = augment(&aug.strip());
        assert_eq!(aug.adj, aug_again.adj);
        assert_eq!(
            aug.nb.iter().map(|n| n.vertex).collect::<Vec<_>>(),
            aug_again.nb.iter().map(|n| n.vertex).collect::<Vec<_>>()
        );
        assert!(aug_validate(&aug_again));
    }

    #[test]
    fn single_vertex_graph() {
        let g = Graph {
            adj: vec![Adj { index: 0, len: 0 }],
            nb: vec![],
        };
        let aug = augment(&g);
        assert!(aug_validate(&aug));
    }
}
