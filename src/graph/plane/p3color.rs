//! Poh's algorithm: properly 3-path-color any plane graph whose outer face
//! has two marked paths `p` and `q` meeting at a single vertex.
//!
//! The walk is expressed as a stack of frames rather than recursion, each
//! frame tracking the boundary of the region still to be colored (`x`/`y`
//! bound the region's two ends, `z` the vertex currently being extended
//! from). `step` advances exactly one edge of the current frame's fan;
//! whenever the walk needs to recurse into a sub-region it pushes a child
//! frame instead and keeps going.

use crate::graph::Graph;

#[derive(Debug, Clone, Copy)]
pub struct Frame {
    u: u32,
    u_nb_first: u32,
    x: u32,
    x_nb_first: u32,
    y: u32,
    z: u32,
    edge_index: u32,
    face_mark: i32,
    q_color: u8,
    p_color: u8,
    above_path: bool,
    last_colored: bool,
}

pub struct Ctx<'g> {
    graph: &'g Graph,
    marks: Vec<i32>,
    frames: Vec<Frame>,
}

fn next_neighbor_index(graph: &Graph, v: u32, u: u32) -> u32 {
    graph.adj_next(v, graph.nb_index(v, u))
}

impl<'g> Ctx<'g> {
    /// `p` and `q` are the two marked boundary paths partitioning the outer
    /// face; `p[0]` and `q[0]` are the two vertices where the paths meet,
    /// and must be adjacent on the outer cycle.
    pub fn init(graph: &'g Graph, p: &[u32], q: &[u32]) -> Self {
        assert!(!p.is_empty());
        assert!(!q.is_empty());

        let p1 = p[0];
        let q1 = q[0];

        let mut marks = vec![0i32; graph.n() as usize];
        for &v in p {
            marks[v as usize] = -1;
        }
        marks[p1 as usize] = 1;
        for &v in q {
            marks[v as usize] = 2;
        }

        let frames = vec![Frame {
            p_color: 3,
            q_color: 2,
            u: p1,
            u_nb_first: graph.nb_index(p1, q1),
            x: p1,
            x_nb_first: 0,
            y: p1,
            z: p1,
            edge_index: 0,
            face_mark: -1,
            above_path: false,
            last_colored: false,
        }];

        Ctx {
            graph,
            marks,
            frames,
        }
    }

    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Exposed so the parallel driver can pop/push frames against the same
    /// stack the sequential driver uses, rather than keeping a second one.
    pub(crate) fn frames_mut(&mut self) -> &mut Vec<Frame> {
        &mut self.frames
    }

    pub(crate) fn mark(&self, v: u32) -> i32 {
        self.marks[v as usize]
    }

    /// Advance `frame` by one edge. Returns `true` once the frame's region
    /// is fully colored.
    pub fn step(&mut self, frame: &mut Frame) -> bool {
        let path_color = frame.p_color ^ frame.q_color;
        let u_deg = self.graph.deg(frame.u);

        if frame.edge_index == u_deg {
            debug_assert_eq!(frame.z, frame.u);

            if frame.y == frame.u {
                debug_assert_eq!(frame.x, frame.u);
                return true;
            }

            if frame.x == frame.u {
                frame.x = frame.y;
            }

            frame.u_nb_first = next_neighbor_index(self.graph, frame.y, frame.u);
            frame.u = frame.y;
            frame.z = frame.y;
            frame.edge_index = 0;
            frame.above_path = false;
            frame.last_colored = false;
            return false;
        }

        let mut n_index = frame.u_nb_first + frame.edge_index;
        if n_index >= u_deg {
            n_index -= u_deg;
        }
        let n = self.graph.nb(frame.u, n_index);
        frame.edge_index += 1;

        if frame.above_path {
            if self.marks[n as usize] <= 0 {
                if frame.last_colored {
                    frame.z = n;
                    self.marks[n as usize] = frame.q_color as i32;
                } else {
                    self.marks[n as usize] = frame.face_mark - 1;
                }
                frame.last_colored = false;
            } else {
                frame.last_colored = true;
                if frame.z != frame.u {
                    self.frames.push(Frame {
                        p_color: path_color,
                        q_color: frame.p_color,
                        u: frame.z,
                        u_nb_first: next_neighbor_index(self.graph, frame.z, frame.u),
                        x: frame.z,
                        x_nb_first: 0,
                        y: frame.z,
                        z: frame.z,
                        edge_index: 0,
                        face_mark: frame.face_mark - 1,
                        above_path: false,
                        last_colored: false,
                    });
                    frame.z = frame.u;
                }
            }
        } else if n != frame.x {
            if self.marks[n as usize] > 0 {
                if self.marks[n as usize] == frame.p_color as i32 {
                    frame.above_path = true;
                    frame.last_colored = true;
                }
                if frame.x != frame.u {
                    self.frames.push(Frame {
                        p_color: path_color,
                        q_color: frame.q_color,
                        u: frame.x,
                        u_nb_first: frame.x_nb_first,
                        x: frame.x,
                        x_nb_first: 0,
                        y: frame.x,
                        z: frame.x,
                        edge_index: 0,
                        face_mark: frame.face_mark - 1,
                        above_path: false,
                        last_colored: false,
                    });
                    frame.x = frame.u;
                }
            } else if self.marks[n as usize] == frame.face_mark {
                self.marks[n as usize] = path_color as i32;
                frame.y = n;
                frame.above_path = true;
            } else {
                if self.marks[n as usize] <= 0 {
                    self.marks[n as usize] = frame.face_mark - 1;
                }
                if frame.x == frame.u {
                    frame.x = n;
                    frame.x_nb_first = next_neighbor_index(self.graph, n, frame.u);
                    self.marks[n as usize] = frame.p_color as i32;
                }
            }
        }

        false
    }
}

/// Properly 3-path-color `graph`, given the two boundary paths `p` and `q`
/// of its outer face. Colors are returned as `1..=3`.
pub fn color(graph: &Graph, p: &[u32], q: &[u32]) -> Vec<u8> {
    let mut ctx = Ctx::init(graph, p, q);
    let mut frame = ctx.next_frame().expect("p3color: p must start a frame");

    loop {
        while !ctx.step(&mut frame) {}
        match ctx.next_frame() {
            Some(next) => frame = next,
            None => break,
        }
    }

    let mut coloring = vec![0u8; graph.n() as usize];
    for v in 0..graph.n() {
        let mark = ctx.marks[v as usize];
        debug_assert!(mark > 0 && mark <= 3);
        coloring[v as usize] = mark as u8;
    }
    coloring
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Case1A,
    Case1B,
    Case2A,
    Case2B,
    Case2C,
    Case2D,
    Case2E,
    Case2F,
    Case3A,
    Case3B,
    Case3C,
}

/// Classify which branch [`Ctx::step`] would take next, without mutating
/// anything. Exposed for tests that want to exercise every named case.
pub fn frame_case(ctx: &Ctx, frame: &Frame) -> Case {
    let u_deg = ctx.graph.deg(frame.u);

    if frame.edge_index == u_deg {
        debug_assert_eq!(frame.z, frame.u);
        if frame.y == frame.u {
            debug_assert_eq!(frame.x, frame.u);
            return Case::Case1A;
        }
        return Case::Case1B;
    }

    let mut n_index = frame.u_nb_first + frame.edge_index;
    if n_index >= u_deg {
        n_index -= u_deg;
    }
    let n = ctx.graph.nb(frame.u, n_index);

    if frame.above_path {
        if ctx.marks[n as usize] <= 0 {
            if frame.last_colored {
                return Case::Case3A;
            }
            return Case::Case3B;
        } else if frame.z != frame.u {
            return Case::Case3C;
        }
    } else if n != frame.x {
        if ctx.marks[n as usize] > 0 {
            if ctx.marks[n as usize] == frame.p_color as i32 {
                return Case::Case2A;
            }
            if frame.x != frame.u {
                return Case::Case2B;
            }
        } else if ctx.marks[n as usize] == frame.face_mark {
            return Case::Case2C;
        } else if frame.x == frame.u {
            return Case::Case2D;
        } else {
            return Case::Case2E;
        }
    }

    Case::Case2F
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::path_color;
    use crate::graph::plane::gen;

    #[test]
    fn triangle_is_3_path_colorable() {
        let g = gen::complete(3);
        let coloring = color(&g, &[0], &[1]);
        assert!(path_color::verify(&g, &coloring));
        assert!(path_color::verify_by_bfs(&g, &coloring));
    }

    #[test]
    fn grid_is_3_path_colorable() {
        let g = gen::grid(4, 4);
        // Outer face: the four corners of the grid, split into two paths
        // sharing vertex 0.
        let p = [0u32, 1, 2, 3];
        let q = [0u32, 4, 8, 12];
        let coloring = color(&g, &p, &q);
        assert!(path_color::verify(&g, &coloring));
        assert!(path_color::verify_by_bfs(&g, &coloring));
    }

    #[test]
    fn random_triangulation_is_3_path_colorable() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for &size in &[10u32, 50, 200] {
            let g = gen::triangulation(size, &mut rng, [0.5, 1.0]);
            let coloring = color(&g, &[0], &[1]);
            assert!(path_color::verify(&g, &coloring), "size={size}");
        }
    }
}
