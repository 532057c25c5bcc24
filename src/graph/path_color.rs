//! Verifying that a coloring's color classes each induce a disjoint union of
//! simple paths.

use super::Graph;
use std::collections::VecDeque;

/// Incremental path-coloring verifier.
///
/// Picks any unvisited vertex whose color-degree (number of unvisited
/// same-colored neighbors) is at most one, then walks monochrome neighbors
/// one step at a time. If a vertex is ever found with two unvisited
/// same-colored neighbors, its color class has a vertex of degree >= 3 or a
/// cycle, and verification fails. This also rejects a color class containing
/// a cycle, since every vertex on a cycle has color-degree >= 2.
pub struct VerifyCtx<'g> {
    graph: &'g Graph,
    coloring: &'g [u8],
    visited: Vec<bool>,
    next: u32,
    checked: u32,
    pending: Option<u32>,
}

impl<'g> VerifyCtx<'g> {
    pub fn init(graph: &'g Graph, coloring: &'g [u8]) -> Self {
        VerifyCtx {
            graph,
            coloring,
            visited: vec![false; graph.adj.len()],
            next: 0,
            checked: 0,
            pending: None,
        }
    }

    /// Advance by one vertex visit. Returns `true` once the walk is done
    /// (either all vertices are accounted for, or a violation was found).
    pub fn step(&mut self) -> bool {
        while self.pending.is_none() && self.next < self.graph.n() {
            let v = self.next;
            self.next += 1;
            if self.visited[v as usize] {
                continue;
            }

            let color = self.coloring[v as usize];
            let mut color_degree = 0u32;
            for i in 0..self.graph.deg(v) {
                let u = self.graph.nb(v, i);
                if self.coloring[u as usize] == color {
                    color_degree += 1;
                    if color_degree > 1 {
                        break;
                    }
                }
            }

            if color_degree < 2 {
                self.pending = Some(v);
            }
        }

        let v = match self.pending {
            Some(v) => v,
            None => return true,
        };
        let color = self.coloring[v as usize];

        self.visited[v as usize] = true;
        self.checked += 1;
        self.pending = None;

        for i in 0..self.graph.deg(v) {
            let u = self.graph.nb(v, i);
            if self.coloring[u as usize] == color && !self.visited[u as usize] {
                if self.pending.is_some() {
                    // A second unvisited same-color neighbor: degree >= 3 or
                    // a cycle. Either way the color class is not a path
                    // union.
                    return true;
                }
                self.pending = Some(u);
            }
        }

        false
    }

    pub fn result(&self) -> bool {
        self.checked == self.graph.n()
    }
}

/// Does every color class of `coloring` induce a disjoint union of simple
/// paths?
pub fn verify(graph: &Graph, coloring: &[u8]) -> bool {
    let mut ctx = VerifyCtx::init(graph, coloring);
    while !ctx.step() {}
    ctx.result()
}

/// A BFS-based sanity check used by tests: walk every monochrome component
/// and confirm it is a simple path (every vertex has color-degree <= 2, and
/// the component has no cycle, checked via a vertex count vs edge count
/// comparison during the walk).
#[cfg(test)]
pub(crate) fn verify_by_bfs(graph: &Graph, coloring: &[u8]) -> bool {
    let n = graph.n();
    let mut visited = vec![false; n as usize];

    for start in 0..n {
        if visited[start as usize] {
            continue;
        }
        let color = coloring[start as usize];
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start as usize] = true;
        let mut component = vec![start];

        while let Some(v) = queue.pop_front() {
            let mut same_color_neighbors = 0;
            for i in 0..graph.deg(v) {
                let u = graph.nb(v, i);
                if coloring[u as usize] != color {
                    continue;
                }
                same_color_neighbors += 1;
                if !visited[u as usize] {
                    visited[u as usize] = true;
                    component.push(u);
                    queue.push_back(u);
                }
            }
            if same_color_neighbors > 2 {
                return false;
            }
        }

        // A path on k vertices has k - 1 edges; a cycle has k. Count edges
        // within the component directly.
        let mut internal_edges = 0u32;
        for &v in &component {
            for i in 0..graph.deg(v) {
                let u = graph.nb(v, i);
                if coloring[u as usize] == color {
                    internal_edges += 1;
                }
            }
        }
        internal_edges /= 2;
        if internal_edges + 1 != component.len() as u32 {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::Adj;

    fn path3() -> Graph {
        // 0 - 1 - 2
        Graph {
            adj: vec![
                Adj { index: 0, len: 1 },
                Adj { index: 1, len: 2 },
                Adj { index: 3, len: 1 },
            ],
            nb: vec![1, 0, 2, 1],
        }
    }

    #[test]
    fn single_color_path_is_valid() {
        let g = path3();
        let coloring = vec![1u8, 1, 1];
        assert!(verify(&g, &coloring));
        assert!(verify_by_bfs(&g, &coloring));
    }

    #[test]
    fn triangle_monochrome_is_a_cycle_and_invalid() {
        let g = Graph {
            adj: vec![
                Adj { index: 0, len: 2 },
                Adj { index: 2, len: 2 },
                Adj { index: 4, len: 2 },
            ],
            nb: vec![1, 2, 0, 2, 0, 1],
        };
        let coloring = vec![1u8, 1, 1];
        assert!(!verify(&g, &coloring));
    }

    #[test]
    fn star_is_invalid_degree_three() {
        // center 0 adjacent to 1, 2, 3, all colored 1: degree 3 in the class.
        let g = Graph {
            adj: vec![
                Adj { index: 0, len: 3 },
                Adj { index: 3, len: 1 },
                Adj { index: 4, len: 1 },
                Adj { index: 5, len: 1 },
            ],
            nb: vec![1, 2, 3, 0, 0, 0],
        };
        let coloring = vec![1u8, 1, 1, 1];
        assert!(!verify(&g, &coloring));
    }

    #[test]
    fn distinct_colors_on_a_triangle_are_trivially_valid() {
        let g = Graph {
            adj: vec![
                Adj { index: 0, len: 2 },
                Adj { index: 2, len: 2 },
                Adj { index: 4, len: 2 },
            ],
            nb: vec![1, 2, 0, 2, 0, 1],
        };
        let coloring = vec![1u8, 2, 2];
        assert!(verify(&g, &coloring));
    }
}
