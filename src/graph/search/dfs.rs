//! Stack-driven depth-first search, tracking discovery order and the
//! lowpoint/least-ancestor bookkeeping needed for biconnectivity analyses.

use crate::graph::Graph;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeNode {
    parent: u32,
    pub number: u32,
    pub least_ancestor: u32,
    pub lowpoint: u32,
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

    pub fn node(&self, v: u32) -> TreeNode {
        self.0[v as usize]
    }

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

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: u32,
    edge_index: u32,
}

pub struct Ctx<'g> {
    graph: &'g Graph,
    nodes: Vec<TreeNode>,
    numbering: Vec<u32>,
    stack: Vec<Frame>,
}

impl<'g> Ctx<'g> {
    pub fn init(graph: &'g Graph, root: u32) -> Self {
        assert!(root < graph.n());
        let mut nodes = vec![TreeNode::default(); graph.adj.len()];
        nodes[root as usize].parent = root + 1;
        Ctx {
            graph,
            nodes,
            numbering: vec![root],
            stack: vec![Frame {
                vertex: root,
                edge_index: 0,
            }],
        }
    }

    /// Advance by one edge or one backtrack. Returns `true` once the stack
    /// empties.
    pub fn step(&mut self) -> bool {
        let frame = match self.stack.last().copied() {
            Some(f) => f,
            None => return true,
        };
        let v_deg = self.graph.deg(frame.vertex);

        if frame.edge_index == v_deg {
            let p = self.nodes[frame.vertex as usize].parent - 1;
            if p != frame.vertex {
                let v_lowpoint = self.nodes[frame.vertex as usize].lowpoint;
                let p_node = &mut self.nodes[p as usize];
                p_node.lowpoint = p_node.lowpoint.min(v_lowpoint);
            }
            self.stack.pop();
            return false;
        }

        let u = self.graph.nb(frame.vertex, frame.edge_index);
        if self.nodes[u as usize].parent == 0 {
            let number = self.numbering.len() as u32;
            self.nodes[u as usize] = TreeNode {
                parent: frame.vertex + 1,
                number,
                least_ancestor: number,
                lowpoint: number,
            };
            self.stack.push(Frame {
                vertex: u,
                edge_index: 0,
            });
            self.numbering.push(u);
        } else if u != frame.vertex {
            let parent_of_v = self.nodes[frame.vertex as usize].parent - 1;
            if u != parent_of_v {
                let u_number = self.nodes[u as usize].number;
                let u_lowpoint = self.nodes[u as usize].lowpoint;
                let v_node = &mut self.nodes[frame.vertex as usize];
                v_node.least_ancestor = v_node.least_ancestor.min(u_number);
                v_node.lowpoint = v_node.lowpoint.min(u_lowpoint);
            }
        }
        self.stack.last_mut().unwrap().edge_index += 1;

        false
    }

    pub fn into_parts(self) -> (Vec<u32>, Tree) {
        (self.numbering, Tree(self.nodes))
    }
}

pub struct Data {
    pub numbering: Vec<u32>,
    pub tree: Tree,
}

pub fn dfs(graph: &Graph, root: u32) -> Data {
    let mut ctx = Ctx::init(graph, root);
    while !ctx.step() {}
    let (numbering, tree) = ctx.into_parts();
    Data { numbering, tree }
}
