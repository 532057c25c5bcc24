//! Plane graphs: a [`Graph`](super::Graph) whose rotation system (the
//! neighbor order stored at each vertex) encodes a combinatorial embedding.

pub mod embedded_gen;
pub mod gen;
pub mod p3choose;
pub mod p3choose_parallel;
pub mod p3color;
pub mod p3color_parallel;

use super::{Graph, GraphAug};

/// A point in the plane, used by [`embedded_gen`] to carry geometric
/// coordinates alongside a combinatorial embedding.
pub type Point = (f32, f32);
pub type Embedding = Vec<Point>;

/// Walk every face of the embedding exactly once and confirm the rotation
/// system is consistent (no half-edge belongs to two different faces) and
/// that Euler's formula holds for the resulting face count.
pub fn aug_validate(graph: &GraphAug) -> bool {
    let n = graph.n();
    if n <= 1 {
        return true;
    }

    let edges = graph.nb.len() as u32 / 2;
    if edges > 3 * n - 6 {
        return false;
    }

    let mut visited = vec![false; graph.nb.len()];
    let mut faces = 0u32;

    for v in 0..n {
        let v_adj = graph.adj[v as usize];
        for i in 0..v_adj.len {
            let mut count = 0u32;
            let mut u = v;
            let mut u_adj = v_adj;
            let mut uw_index = i;
            let mut uw = graph.nb(u, uw_index);

            while count < n && !visited[(u_adj.index + uw_index) as usize] {
                count += 1;
                visited[(u_adj.index + uw_index) as usize] = true;

                if uw.vertex == v {
                    break;
                }

                u = uw.vertex;
                u_adj = graph.adj[u as usize];
                uw_index = super::adj_next(u_adj, uw.back_index);
                uw = graph.nb(u, uw_index);
            }

            if count > 0 {
                if uw.vertex != v {
                    return false;
                }
                if super::adj_next(v_adj, uw.back_index) != i {
                    return false;
                }
                faces += 1;
            }
        }
    }

    if visited.iter().any(|&seen| !seen) {
        return false;
    }

    faces == 2 + edges - n
}

pub fn validate(graph: &Graph) -> bool {
    aug_validate(&super::build::augment(graph))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_is_planar() {
        let g = gen::complete(3);
        assert!(validate(&g));
    }

    #[test]
    fn grid_is_planar() {
        let g = gen::grid(4, 4);
        assert!(validate(&g));
    }

    #[test]
    fn k5_is_not_planar() {
        let g = gen::complete(5);
        assert!(!validate(&g));
    }
}
