//! Breadth-first search, exposing the resulting tree plus a path-to-root
//! reconstruction.

use crate::graph::Graph;
use std::collections::VecDeque;

/// `parent == 0` means unvisited; a root's own parent is stored as `v + 1`
/// to keep `0` free as the sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeNode {
    parent: u32,
    pub dist: u32,
}

#[derive(Debug, Clone)]
pub struct Tree(Vec<TreeNode>);

impl Tree {
    pub fn contains(&self, v: u32) -> bool {
        self.0[v as usize].parent != 0
    }

    pub fn parent(&self, v: u32) -> u32 {
        assert!(self.contains(v));
        self.0[v as usize].parent - 1
    }

    pub fn dist(&self, v: u32) -> u32 {
        assert!(self.contains(v));
        self.0[v as usize].dist
    }

    /// Reconstruct the path from `v` up to its tree's root, root first.
    pub fn path_to_root(&self, mut v: u32) -> Vec<u32> {
        let mut path = Vec::new();
        if !self.contains(v) {
            return path;
        }
        loop {
            path.push(v);
            let last_v = v;
            v = self.parent(last_v);
            if last_v == v {
                break;
            }
        }
        path.reverse();
        path
    }
}

pub struct Ctx<'g> {
    graph: &'g Graph,
    nodes: Vec<TreeNode>,
    queue: VecDeque<u32>,
    vertex: u32,
    edge_index: u32,
}

impl<'g> Ctx<'g> {
    pub fn init(graph: &'g Graph, root: u32) -> Self {
        assert!(root < graph.n());
        let mut nodes = vec![TreeNode::default(); graph.adj.len()];
        nodes[root as usize].parent = root + 1;
        Ctx {
            graph,
            nodes,
            queue: VecDeque::new(),
            vertex: root,
            edge_index: 0,
        }
    }

    /// Advance by one edge, or dequeue the next frontier vertex. Returns
    /// `true` once the queue and current vertex are both exhausted.
    pub fn step(&mut self) -> bool {
        let deg = self.graph.deg(self.vertex);
        if self.edge_index == deg {
            match self.queue.pop_front() {
                Some(v) => {
                    self.vertex = v;
                    self.edge_index = 0;
                    false
                }
                None => true,
            }
        } else {
            let u = self.graph.nb(self.vertex, self.edge_index);
            if self.nodes[u as usize].parent == 0 {
                self.nodes[u as usize].parent = self.vertex + 1;
                self.nodes[u as usize].dist = self.nodes[self.vertex as usize].dist + 1;
                self.queue.push_back(u);
            }
            self.edge_index += 1;
            false
        }
    }

    pub fn into_tree(self) -> Tree {
        Tree(self.nodes)
    }
}

/// Run a breadth-first search from `root`, returning the resulting tree.
pub fn bfs(graph: &Graph, root: u32) -> Tree {
    let mut ctx = Ctx::init(graph, root);
    while !ctx.step() {}
    ctx.into_tree()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::plane::gen;

    #[test]
    fn grid_shortest_path_property() {
        // S4: 4x4 grid, s = (1,1) = 5, t = (2,2) = 10.
        let g = gen::grid(4, 4);
        let tree = bfs(&g, 5);
        assert!(tree.contains(10));
        let path = tree.path_to_root(10);
        assert_eq!(path.first().copied(), Some(5));
        assert_eq!(path.last().copied(), Some(10));
        assert_eq!(path.len(), 3);
        assert_eq!(tree.dist(10), 2);
    }

    #[test]
    fn grid_general_widths_and_heights() {
        for (width, height) in [(1u32, 5u32), (5, 1), (3, 3), (6, 4)] {
            let g = gen::grid(width, height);
            for sy in 0..height {
                for sx in 0..width {
                    let s = sx + sy * width;
                    let tree = bfs(&g, s);
                    for ty in 0..height {
                        for tx in 0..width {
                            let t = tx + ty * width;
                            let expected = (tx as i64 - sx as i64).unsigned_abs() as u32
                                + (ty as i64 - sy as i64).unsigned_abs() as u32;
                            assert_eq!(tree.dist(t), expected, "s={s} t={t}");
                            let path = tree.path_to_root(t);
                            assert_eq!(path.len() as u32, expected + 1);
                            assert_eq!(*path.first().unwrap(), s);
                            assert_eq!(*path.last().unwrap(), t);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn unreachable_vertex_is_not_in_tree() {
        // Two disjoint edges: 0-1, 2-3.
        use crate::graph::Adj;
        let g = Graph {
            adj: vec![
                Adj { index: 0, len: 1 },
                Adj { index: 1, len: 1 },
                Adj { index: 2, len: 1 },
                Adj { index: 3, len: 1 },
            ],
            nb: vec![1, 0, 3, 2],
        };
        let tree = bfs(&g, 0);
        assert!(tree.contains(1));
        assert!(!tree.contains(2));
        assert!(!tree.contains(3));
    }
}
