//! Hartman's algorithm: properly color a plane graph from per-vertex lists
//! of size >= 3, so that each color class induces a disjoint union of
//! simple paths, given the graph's outer face as a clockwise cycle.
//!
//! Each vertex carries a shrinking candidate [`ColorList`]; `x`, `y`, `z`
//! name the frame's active boundary the way they do in [`super::p3color`].
//! Unlike `p3color`, closing off part of the boundary can merge two
//! previously distinct regions, which is why vertices also carry a `mark`
//! resolved through a one-level indirection table (`ctx.marks`) instead of
//! compared directly — two regions can share an identity without every
//! vertex in them being updated individually.

use crate::graph::GraphAug;

/// A vertex's remaining candidate colors, capped at 3 (the choosability
/// number this algorithm targets).
#[derive(Debug, Clone, Copy)]
pub struct ColorList {
    len: u8,
    data: [u8; 3],
}

impl ColorList {
    pub fn from_slice(colors: &[u8]) -> Self {
        assert!(!colors.is_empty() && colors.len() <= 3);
        let mut data = [0u8; 3];
        data[..colors.len()].copy_from_slice(colors);
        ColorList {
            len: colors.len() as u8,
            data,
        }
    }

    pub fn color(&self) -> u8 {
        debug_assert_eq!(self.len, 1);
        self.data[0]
    }

    fn has_color(&self, color: u8) -> bool {
        debug_assert!(self.len > 0);
        self.data[..self.len as usize].contains(&color)
    }

    fn remove_color(&mut self, color: u8) {
        for i in 0..self.len as usize {
            if self.data[i] == color {
                self.data[i] = self.data[self.len as usize - 1];
                self.len -= 1;
                break;
            }
        }
    }

    fn color_differently(&mut self, color: u8) {
        for i in 0..self.len as usize {
            if self.data[i] != color {
                self.data[0] = self.data[i];
                self.len = 1;
                break;
            }
        }
        debug_assert_ne!(self.data[0], color);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct VertexLoc {
    nb_first: u32,
    nb_last: u32,
    mark: u32,
}

#[derive(Debug, Clone, Copy)]
struct VertexInfo {
    colors: ColorList,
    loc: VertexLoc,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    x: u32,
    y: u32,
    z: u32,
    x_loc: VertexLoc,
    y_loc: VertexLoc,
    z_loc: VertexLoc,
}

fn get_vloc(vertex_info: &[VertexInfo], frame: &Frame, v: u32) -> VertexLoc {
    if v == frame.x {
        frame.x_loc
    } else if v == frame.y {
        frame.y_loc
    } else if v == frame.z {
        frame.z_loc
    } else {
        vertex_info[v as usize].loc
    }
}

fn set_vloc(vertex_info: &mut [VertexInfo], frame: &mut Frame, v: u32, loc: VertexLoc) {
    if v == frame.x {
        frame.x_loc = loc;
    } else if v == frame.y {
        frame.y_loc = loc;
    } else if v == frame.z {
        frame.z_loc = loc;
    } else {
        vertex_info[v as usize].loc = loc;
    }
}

pub struct Ctx<'g> {
    graph: &'g GraphAug,
    vertex_info: Vec<VertexInfo>,
    marks: Vec<u32>,
    frames: Vec<Frame>,
    next_mark: u32,
}

impl<'g> Ctx<'g> {
    /// `color_lists[v]` is `v`'s candidate list; `cwise_outer_face` lists the
    /// outer face's vertices in clockwise order.
    pub fn init(graph: &'g GraphAug, color_lists: &[ColorList], cwise_outer_face: &[u32]) -> Self {
        let n = graph.n();
        assert!(n >= 3);
        assert_eq!(color_lists.len(), n as usize);

        let marks_len = (3 * n - 6 + 1) as usize;
        let mut vertex_info: Vec<VertexInfo> = color_lists
            .iter()
            .map(|&colors| VertexInfo {
                colors,
                loc: VertexLoc::default(),
            })
            .collect();
        let mut marks: Vec<u32> = (0..marks_len as u32).collect();

        let mut next_mark = 1u32;
        let face_mark = next_mark;
        next_mark += 1;

        let mut u = *cwise_outer_face.last().expect("outer face must be nonempty");
        for &v in cwise_outer_face {
            let vu_index = graph.nb_index(v, u);
            let uv_index = graph.nb(v, vu_index).back_index;

            vertex_info[v as usize].loc.nb_first = vu_index;
            vertex_info[u as usize].loc.nb_last = uv_index;
            vertex_info[v as usize].loc.mark = face_mark;

            u = v;
        }

        let xyv = cwise_outer_face[0];
        vertex_info[xyv as usize].loc.mark = next_mark;
        next_mark += 1;

        assert!(vertex_info[xyv as usize].colors.len > 0);
        vertex_info[xyv as usize].colors.len = 1;

        let xyv_loc = vertex_info[xyv as usize].loc;
        let frames = vec![Frame {
            x: xyv,
            y: xyv,
            z: xyv,
            x_loc: xyv_loc,
            y_loc: VertexLoc::default(),
            z_loc: VertexLoc::default(),
        }];

        Ctx {
            graph,
            vertex_info,
            marks,
            frames,
            next_mark,
        }
    }

    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    pub(crate) fn frames_mut(&mut self) -> &mut Vec<Frame> {
        &mut self.frames
    }

    pub(crate) fn color(&self, v: u32) -> u8 {
        self.vertex_info[v as usize].colors.color()
    }

    fn take_mark(&mut self) -> u32 {
        let m = self.next_mark;
        self.next_mark += 1;
        m
    }

    /// Advance `frame` by one boundary edge. Returns `true` once the
    /// frame's region is fully colored.
    pub fn step(&mut self, frame: &mut Frame) -> bool {
        let z = frame.z;
        let mut z_loc = get_vloc(&self.vertex_info, frame, z);
        let z_color = self.vertex_info[z as usize].colors.data[0];

        let zu_index = z_loc.nb_first;
        let zu = self.graph.nb(z, zu_index);
        let u = zu.vertex;

        if zu_index == z_loc.nb_last {
            if frame.x == frame.y {
                debug_assert_eq!(frame.z, frame.x);
                self.vertex_info[u as usize].colors.color_differently(z_color);
            }
            return true;
        }

        if u == frame.y {
            debug_assert_eq!(frame.z, frame.x);
            std::mem::swap(&mut frame.x_loc, &mut frame.y_loc);
            frame.y = frame.x;
            frame.x = u;
            frame.z = u;
            frame.x_loc.mark = self.take_mark();
            frame.y_loc.mark = frame.x_loc.mark;
            return false;
        }

        let mut u_loc = get_vloc(&self.vertex_info, frame, u);
        u_loc.nb_last = self.graph.adj_prev(u, u_loc.nb_last);
        z_loc.nb_first = self.graph.adj_next(z, z_loc.nb_first);
        set_vloc(&mut self.vertex_info, frame, u, u_loc);
        set_vloc(&mut self.vertex_info, frame, z, z_loc);

        if frame.z == frame.x {
            self.vertex_info[u as usize].colors.color_differently(z_color);

            if frame.z == frame.y {
                frame.y_loc = frame.x_loc;
            } else {
                frame.z_loc = frame.x_loc;
            }

            frame.x = u;
            frame.x_loc = u_loc;
            frame.x_loc.mark = self.take_mark();

            z_loc = get_vloc(&self.vertex_info, frame, frame.z);
        }

        let zv_index = self.graph.adj_next(z, zu_index);
        let zv = self.graph.nb(z, zv_index);
        let v = zv.vertex;
        let mut v_loc = get_vloc(&self.vertex_info, frame, v);

        if v_loc.mark == 0 {
            v_loc = VertexLoc {
                mark: frame.x_loc.mark,
                nb_first: self.graph.adj_next(v, zv.back_index),
                nb_last: zv.back_index,
            };
            self.vertex_info[v as usize].colors.remove_color(z_color);
        } else if v_loc.mark == frame.x_loc.mark {
            if zv_index == z_loc.nb_last {
                debug_assert_eq!(frame.z, frame.y);
                debug_assert_eq!(v, frame.x);
                v_loc.nb_first = self.graph.adj_next(v, zv.back_index);
                v_loc.mark = self.take_mark();
                frame.y = frame.x;
                frame.z = frame.x;
            } else {
                let new_mark = self.take_mark();
                self.frames.push(Frame {
                    x: v,
                    y: v,
                    z: v,
                    x_loc: VertexLoc {
                        mark: new_mark,
                        nb_first: self.graph.adj_next(v, zv.back_index),
                        nb_last: v_loc.nb_last,
                    },
                    y_loc: VertexLoc::default(),
                    z_loc: VertexLoc::default(),
                });
                v_loc.nb_last = zv.back_index;
            }
        } else if self.marks[v_loc.mark as usize] == frame.y_loc.mark {
            if v_loc.nb_first != zv.back_index {
                let new_mark = self.take_mark();
                self.frames.push(Frame {
                    x: v,
                    y: frame.z,
                    z: v,
                    x_loc: VertexLoc {
                        mark: new_mark,
                        nb_first: v_loc.nb_first,
                        nb_last: zv.back_index,
                    },
                    y_loc: VertexLoc {
                        mark: new_mark,
                        nb_first: zv_index,
                        nb_last: z_loc.nb_last,
                    },
                    z_loc: VertexLoc::default(),
                });
            }

            v_loc.nb_first = self.graph.adj_next(v, zv.back_index);

            if self.vertex_info[v as usize].colors.has_color(z_color) {
                let colors = &mut self.vertex_info[v as usize].colors;
                colors.data[0] = z_color;
                colors.len = 1;
                frame.z = v;
                frame.z_loc = v_loc;
            } else {
                self.marks[frame.x_loc.mark as usize] = frame.y_loc.mark;
                frame.z = frame.x;
            }
        } else {
            self.vertex_info[v as usize].colors.color_differently(z_color);

            if v_loc.nb_first != zv.back_index {
                let new_mark = self.take_mark();
                self.frames.push(Frame {
                    x: v,
                    y: frame.y,
                    z: frame.z,
                    x_loc: VertexLoc {
                        mark: new_mark,
                        nb_first: v_loc.nb_first,
                        nb_last: zv.back_index,
                    },
                    y_loc: frame.y_loc,
                    z_loc: frame.z_loc,
                });

                v_loc.mark = frame.x_loc.mark;
                v_loc.nb_first = self.graph.adj_next(v, zv.back_index);

                frame.z = frame.x;
                frame.y = v;
                frame.y_loc = v_loc;
            } else {
                debug_assert_eq!(frame.z, frame.y);
                v_loc.nb_first = self.graph.adj_next(v, zv.back_index);
                v_loc.mark = frame.x_loc.mark;
                frame.y = v;
                frame.y_loc = v_loc;
                frame.z = frame.x;
            }
        }

        set_vloc(&mut self.vertex_info, frame, v, v_loc);

        false
    }
}

/// List-color `graph` from `color_lists` (each of size >= 3), given the
/// outer face as a clockwise vertex cycle. Every returned color is drawn
/// from that vertex's own list.
pub fn choose(graph: &GraphAug, color_lists: &[ColorList], outer_face: &[u32]) -> Vec<u8> {
    let mut ctx = Ctx::init(graph, color_lists, outer_face);
    let mut frame = ctx.next_frame().expect("p3choose: outer face must start a frame");

    loop {
        while !ctx.step(&mut frame) {}
        match ctx.next_frame() {
            Some(next) => frame = next,
            None => break,
        }
    }

    let mut coloring = vec![0u8; graph.n() as usize];
    for v in 0..graph.n() {
        debug_assert_eq!(ctx.vertex_info[v as usize].colors.len, 1);
        coloring[v as usize] = ctx.vertex_info[v as usize].colors.data[0];
    }
    coloring
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Base,
    Case1,
    Case2,
    Case31,
    Case3211A,
    Case3211B,
    Case3221A,
    Case3221B,
    Case32311A,
    Case32311B,
    Case32321A,
    Case32321B,
}

/// Classify which branch [`Ctx::step`] would take next, without mutating
/// anything.
pub fn frame_case(ctx: &Ctx, frame: &Frame) -> Case {
    let z = frame.z;
    let z_loc = get_vloc(&ctx.vertex_info, frame, z);
    let z_color = ctx.vertex_info[z as usize].colors.data[0];

    let zu_index = z_loc.nb_first;
    let zu = ctx.graph.nb(z, zu_index);
    let u = zu.vertex;

    if zu_index == z_loc.nb_last {
        return Case::Base;
    }

    if u == frame.y {
        return Case::Case1;
    }

    if frame.z == frame.x {
        return Case::Case2;
    }

    let zv_index = ctx.graph.adj_next(z, zu_index);
    let zv = ctx.graph.nb(z, zv_index);
    let v = zv.vertex;
    let v_loc = get_vloc(&ctx.vertex_info, frame, v);
    let v_colors = ctx.vertex_info[v as usize].colors;

    if v_loc.mark == 0 {
        Case::Case31
    } else if v_loc.mark == frame.x_loc.mark {
        if zv.back_index == v_loc.nb_first || zv.back_index == v_loc.nb_last {
            Case::Case3211A
        } else {
            Case::Case3211B
        }
    } else if ctx.marks[v_loc.mark as usize] == frame.y_loc.mark {
        if v_colors.has_color(z_color) {
            if zv.back_index == v_loc.nb_first || zv.back_index == v_loc.nb_last {
                Case::Case32311A
            } else {
                Case::Case32311B
            }
        } else if zv.back_index == v_loc.nb_first || zv.back_index == v_loc.nb_last {
            Case::Case32321A
        } else {
            Case::Case32321B
        }
    } else if zv.back_index == v_loc.nb_first || zv.back_index == v_loc.nb_last {
        Case::Case3221A
    } else {
        Case::Case3221B
    }
}
