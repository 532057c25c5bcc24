//! A geometric companion to [`super::gen::triangulation`]: generates a
//! triangulation together with an [`Embedding`](super::Embedding), placing
//! new vertices at random points inside a chosen face and flipping edges
//! that would otherwise leave a poorly shaped triangle.
//!
//! This does not track combinatorial neighbor-face bookkeeping as tightly as
//! [`super::gen::triangulation`] — embedding is a display/testing concern
//! here, not something downstream coloring logic depends on, so faces are
//! rediscovered by a linear scan each time a point is placed.

use super::{Embedding, Point};
use crate::graph::{Adj, Graph};
use crate::rng::{rand_bounded, randf};
use rand::Rng;

/// Rejects candidate triangles that are too small or too sliver-shaped.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTriGenConfig {
    /// Minimum triangle area (in the same units as the embedding) a split is
    /// allowed to produce.
    pub min_area: f32,
    /// Minimum of (shortest edge / longest edge) a triangle may have.
    pub min_coeff: f32,
}

impl Default for EmbeddedTriGenConfig {
    fn default() -> Self {
        EmbeddedTriGenConfig {
            min_area: 1e-4,
            min_coeff: 0.15,
        }
    }
}

pub struct Embedded {
    pub graph: Graph,
    pub embedding: Embedding,
}

#[derive(Debug, Clone, Copy)]
struct Face {
    vertices: [u32; 3],
    neighbors: [u32; 3],
}

fn sub(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1)
}

fn cross(a: Point, b: Point) -> f32 {
    a.0 * b.1 - a.1 * b.0
}

fn dist(a: Point, b: Point) -> f32 {
    let d = sub(a, b);
    (d.0 * d.0 + d.1 * d.1).sqrt()
}

fn triangle_area(a: Point, b: Point, c: Point) -> f32 {
    cross(sub(b, a), sub(c, a)).abs() / 2.0
}

/// Shortest edge over longest edge: 1.0 for equilateral, near 0 for slivers.
fn aspect_coeff(a: Point, b: Point, c: Point) -> f32 {
    let ab = dist(a, b);
    let bc = dist(b, c);
    let ca = dist(c, a);
    let shortest = ab.min(bc).min(ca);
    let longest = ab.max(bc).max(ca);
    if longest == 0.0 {
        0.0
    } else {
        shortest / longest
    }
}

fn barycentric_point<R: Rng + ?Sized>(a: Point, b: Point, c: Point, rng: &mut R) -> Point {
    let mut r1 = randf(rng).sqrt();
    let mut r2 = randf(rng);
    if r1 > 1.0 {
        r1 = 1.0;
    }
    if r2 > 1.0 {
        r2 = 1.0;
    }
    let u = 1.0 - r1;
    let v = r1 * (1.0 - r2);
    let w = r1 * r2;
    (
        u * a.0 + v * b.0 + w * c.0,
        u * a.1 + v * b.1 + w * c.1,
    )
}

/// Build a triangulation on `size` vertices (`size >= 3`) by repeatedly
/// choosing a valid face at random, placing a new vertex at a random
/// barycentric point inside it, and splitting the face in three. An edge of
/// the split is flipped when doing so improves the minimum aspect ratio
/// among the two triangles sharing it, as long as the flip would not violate
/// `config`'s area/aspect floor.
pub fn triangulation<R: Rng + ?Sized>(
    size: u32,
    rng: &mut R,
    config: EmbeddedTriGenConfig,
) -> Embedded {
    assert!(size >= 3);

    let outer = [(0.0f32, 1.0), (1.0, -1.0), (-1.0, -1.0)];
    let mut embedding: Embedding = outer.to_vec();

    let mut faces: Vec<Face> = vec![
        Face {
            vertices: [0, 2, 1],
            neighbors: [1, 1, 1],
        },
        Face {
            vertices: [0, 1, 2],
            neighbors: [0, 0, 0],
        },
    ];
    let mut valid_faces: Vec<u32> = vec![1];

    for v in 3..size {
        let pick = rand_bounded(rng, valid_faces.len() as u32) as usize;
        let face_index = valid_faces[pick];
        let og_face = faces[face_index as usize];

        let a = embedding[og_face.vertices[0] as usize];
        let b = embedding[og_face.vertices[1] as usize];
        let c = embedding[og_face.vertices[2] as usize];
        let p = barycentric_point(a, b, c, rng);
        embedding.push(p);

        let face_indices = [face_index, faces.len() as u32, faces.len() as u32 + 1];
        faces.push(Face {
            vertices: [0; 3],
            neighbors: [0; 3],
        });
        faces.push(Face {
            vertices: [0; 3],
            neighbors: [0; 3],
        });

        for i in 0..3usize {
            faces[face_indices[i] as usize] = Face {
                vertices: [v, og_face.vertices[i], og_face.vertices[(i + 1) % 3]],
                neighbors: [
                    face_indices[(i + 2) % 3],
                    og_face.neighbors[i],
                    face_indices[(i + 1) % 3],
                ],
            };
        }
        for i in 0..3usize {
            let neighbor_face_index = og_face.neighbors[i];
            if neighbor_face_index == face_index {
                continue;
            }
            let u = og_face.vertices[(i + 1) % 3];
            let neighbor = faces[neighbor_face_index as usize];
            if let Some(j) = (0..3).find(|&j| neighbor.vertices[j] == u) {
                faces[neighbor_face_index as usize].neighbors[j] = face_indices[i];
            }
        }

        valid_faces.retain(|&f| f != face_index);
        for &fi in &face_indices {
            let f = faces[fi as usize];
            let va = embedding[f.vertices[0] as usize];
            let vb = embedding[f.vertices[1] as usize];
            let vc = embedding[f.vertices[2] as usize];
            if triangle_area(va, vb, vc) >= config.min_area
                && aspect_coeff(va, vb, vc) >= config.min_coeff
            {
                valid_faces.push(fi);
            }
        }

        // Try flipping each new edge opposite v if it improves the worst
        // aspect ratio of the two triangles sharing it.
        for i in 0..3usize {
            let fi = face_indices[i];
            let face = faces[fi as usize];
            let neighbor_fi = face.neighbors[1];
            if neighbor_fi == fi {
                continue;
            }
            let neighbor = faces[neighbor_fi as usize];

            let shared_u = face.vertices[1];
            let shared_v = face.vertices[2];
            let nj = match (0..3).find(|&j| {
                neighbor.vertices[j] == shared_u && neighbor.vertices[(j + 2) % 3] == shared_v
            }) {
                Some(j) => j,
                None => continue,
            };
            let opposite = neighbor.vertices[(nj + 1) % 3];

            let p_v = embedding[v as usize];
            let p_opp = embedding[opposite as usize];
            let p_u = embedding[shared_u as usize];
            let p_w = embedding[shared_v as usize];

            let before = aspect_coeff(p_v, p_u, p_w).min(aspect_coeff(p_opp, p_w, p_u));
            let after = aspect_coeff(p_v, p_u, p_opp).min(aspect_coeff(p_v, p_opp, p_w));

            if after > before
                && triangle_area(p_v, p_u, p_opp) >= config.min_area
                && triangle_area(p_v, p_opp, p_w) >= config.min_area
            {
                faces[fi as usize].vertices = [v, shared_u, opposite];
                faces[neighbor_fi as usize].vertices = [v, opposite, shared_v];
            }
        }
    }

    let graph = faces_to_graph(size, &faces);
    Embedded { graph, embedding }
}

fn faces_to_graph(size: u32, faces: &[Face]) -> Graph {
    let mut adj = vec![Adj::default(); size as usize];
    let mut nb = Vec::new();

    for v in 0..size {
        let (start_face, start_slot) = match faces
            .iter()
            .enumerate()
            .find_map(|(fi, f)| f.vertices.iter().position(|&u| u == v).map(|j| (fi as u32, j)))
        {
            Some(found) => found,
            None => continue,
        };

        let index = nb.len() as u32;
        let mut face_index = start_face;
        let mut slot = start_slot;
        loop {
            let face = faces[face_index as usize];
            nb.push(face.vertices[(slot + 1) % 3]);
            let next_face = face.neighbors[slot];
            if next_face == start_face {
                break;
            }
            let next_slot = faces[next_face as usize]
                .vertices
                .iter()
                .position(|&u| u == v)
                .expect("rotation vertex not found");
            face_index = next_face;
            slot = next_slot;
        }
        adj[v as usize] = Adj {
            index,
            len: nb.len() as u32 - index,
        };
    }

    Graph { adj, nb }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::plane;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn embedded_triangulation_is_planar() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = EmbeddedTriGenConfig::default();
        for &size in &[3u32, 5, 20] {
            let embedded = triangulation(size, &mut rng, config);
            assert_eq!(embedded.graph.n(), size);
            assert_eq!(embedded.embedding.len(), size as usize);
            assert!(plane::validate(&embedded.graph), "size={size}");
        }
    }
}
