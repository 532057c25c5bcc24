//! Generators for plane graphs: a handful of deterministic families, plus a
//! randomized triangulation generator built by repeated face splitting and
//! probabilistic edge flips.

use crate::graph::{Adj, Graph};
use crate::rng::{rand_bounded, randf};
use rand::Rng;

/// The complete graph on `size` vertices. Not planar for `size >= 5` — useful
/// as a small, exhaustively-checkable non-example.
pub fn complete(size: u32) -> Graph {
    let mut adj = vec![Adj::default(); size as usize];
    let mut nb = Vec::with_capacity((size * (size - 1)) as usize);

    for v in 0..size {
        adj[v as usize] = Adj {
            index: nb.len() as u32,
            len: size - 1,
        };
        for j in 0..size {
            let u = if v % 2 == 0 { size - (j + 1) } else { j };
            if u == v {
                continue;
            }
            nb.push(u);
        }
    }

    Graph { adj, nb }
}

/// A `width` by `height` grid graph, vertex `(x, y)` numbered `x + y * width`.
pub fn grid(width: u32, height: u32) -> Graph {
    let size = (width * height) as usize;
    let mut adj = vec![Adj::default(); size];
    let mut nb = Vec::new();

    for v in 0..size as u32 {
        let x = v % width;
        let y = v / width;
        let index = nb.len() as u32;

        if x > 0 {
            nb.push((x - 1) + y * width);
        }
        if y > 0 {
            nb.push(x + (y - 1) * width);
        }
        if x < width - 1 {
            nb.push((x + 1) + y * width);
        }
        if y < height - 1 {
            nb.push(x + (y + 1) * width);
        }

        adj[v as usize] = Adj {
            index,
            len: nb.len() as u32 - index,
        };
    }

    Graph { adj, nb }
}

fn pyramid_coord(k: u32, x: u32, y: u32) -> u32 {
    debug_assert!(x < k - y);
    debug_assert!(y < k);
    k * y - (y * (y.wrapping_sub(1))) / 2 + x + 3
}

/// A triangulated pyramid: an outer triangle (vertices 0, 1, 2) enclosing a
/// `k`-row triangular grid, each row fanned out to the apex below it.
pub fn pyramid(k: u32) -> Graph {
    assert!(k > 0);

    let size = (k * (k + 1) / 2 + 3) as usize;
    let mut adj = vec![Adj::default(); size];
    let mut nb = Vec::with_capacity(6 * size - 12);

    {
        adj[0].index = 0;
        nb.push(2);
        for y in 0..k {
            nb.push(pyramid_coord(k, 0, y));
        }
        for x in 1..k {
            let y = k - x - 1;
            nb.push(pyramid_coord(k, x, y));
        }
        nb.push(1);
        adj[0].len = nb.len() as u32 - adj[0].index;
        debug_assert_eq!(adj[0].len, 2 + 2 * k - 1);
    }

    {
        adj[1].index = nb.len() as u32;
        nb.push(0);
        nb.push(pyramid_coord(k, k - 1, 0));
        nb.push(2);
        adj[1].len = nb.len() as u32 - adj[1].index;
        debug_assert_eq!(adj[1].len, 3);
    }

    {
        adj[2].index = nb.len() as u32;
        nb.push(1);
        for x in (1..=k).rev() {
            nb.push(pyramid_coord(k, x - 1, 0));
        }
        nb.push(0);
        adj[2].len = nb.len() as u32 - adj[2].index;
        debug_assert_eq!(adj[2].len, 2 + k);
    }

    for y in 0..k {
        let width = k - y;
        for x in 0..width {
            let v = pyramid_coord(k, x, y) as usize;
            adj[v].index = nb.len() as u32;

            if x > 0 {
                nb.push(pyramid_coord(k, x - 1, y));
            }
            if y > 0 {
                nb.push(pyramid_coord(k, x, y - 1));
                nb.push(pyramid_coord(k, x + 1, y - 1));
            } else {
                nb.push(2);
                if x == width - 1 {
                    nb.push(1);
                }
            }
            if x < width - 1 {
                nb.push(pyramid_coord(k, x + 1, y));
            } else if width - 1 != 0 {
                nb.push(0);
            }
            if y < k - 1 && x < width - 1 {
                nb.push(pyramid_coord(k, x, y + 1));
            }
            if x == 0 {
                nb.push(0);
            } else if y < k - 1 {
                nb.push(pyramid_coord(k, x - 1, y + 1));
            }

            adj[v].len = nb.len() as u32 - adj[v].index;
        }
    }

    Graph { adj, nb }
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    vertices: [u32; 3],
    neighbors: [u32; 3],
}

/// Build a random plane triangulation on `size` vertices (`size >= 3`), by
/// repeatedly splitting a random face and then probabilistically flipping 0,
/// 1 or 2 of its boundary edges. `flip_prob` gives the thresholds for one and
/// two flips respectively (so `flip_prob = [0.5, 1.0]` always flips exactly
/// one edge).
pub fn triangulation<R: Rng + ?Sized>(size: u32, rng: &mut R, flip_prob: [f32; 2]) -> Graph {
    assert!(size >= 3);

    let mut adj = vec![Adj::default(); size as usize];

    let mut faces: Vec<Triangle> = Vec::with_capacity((2 * size - 4) as usize);
    faces.push(Triangle {
        vertices: [0, 2, 1],
        neighbors: [1, 1, 1],
    });
    faces.push(Triangle {
        vertices: [0, 1, 2],
        neighbors: [0, 0, 0],
    });

    for v in 3..size {
        let face_index = 1 + rand_bounded(rng, faces.len() as u32 - 1);

        let r = randf(rng);
        let mut edge_flips = 0u32;
        if r >= flip_prob[0] {
            edge_flips += 1;
        }
        if r >= flip_prob[1] {
            edge_flips += 1;
        }
        let mut flip_start = rand_bounded(rng, 3);

        let og_face = faces[face_index as usize];

        let face_indices = [face_index, faces.len() as u32, faces.len() as u32 + 1];
        faces.push(Triangle {
            vertices: [0; 3],
            neighbors: [0; 3],
        });
        faces.push(Triangle {
            vertices: [0; 3],
            neighbors: [0; 3],
        });

        for i in 0..3usize {
            faces[face_indices[i] as usize] = Triangle {
                vertices: [v, og_face.vertices[i], og_face.vertices[(i + 1) % 3]],
                neighbors: [
                    face_indices[(i + 2) % 3],
                    og_face.neighbors[i],
                    face_indices[(i + 1) % 3],
                ],
            };
        }

        let mut neighbor_edge_indices = [0u32; 3];
        let mut neighbor_opposite_vertices = [0u32; 3];
        for i in 0..3usize {
            let u = og_face.vertices[(i + 1) % 3];
            let neighbor_face_index = og_face.neighbors[i];
            let neighbor = faces[neighbor_face_index as usize];
            let j = (0..3).find(|&j| neighbor.vertices[j] == u).expect("face edge not found");
            neighbor_edge_indices[i] = j as u32;
            neighbor_opposite_vertices[i] = neighbor.vertices[(j + 2) % 3];
            faces[neighbor_face_index as usize].neighbors[j] = face_indices[i];
        }

        // Avoid creating a double edge when two flips would land on the same
        // opposite vertex.
        if edge_flips == 2
            && neighbor_opposite_vertices[flip_start as usize]
                == neighbor_opposite_vertices[((flip_start + 1) % 3) as usize]
        {
            if neighbor_opposite_vertices[flip_start as usize]
                == neighbor_opposite_vertices[((flip_start + 2) % 3) as usize]
            {
                edge_flips -= 1;
            } else {
                flip_start += 1 + rand_bounded(rng, 1);
            }
        }

        for i in 0..edge_flips {
            let flip_index = ((flip_start + i) % 3) as usize;
            if og_face.neighbors[flip_index] == 0 {
                continue;
            }

            let nflip_index = neighbor_edge_indices[flip_index] as usize;
            let neighbor_face_index = og_face.neighbors[flip_index];

            {
                let next_face_index = face_indices[(flip_index + 1) % 3];
                let j = (0..3)
                    .find(|&j| faces[next_face_index as usize].vertices[j] == v)
                    .expect("flip vertex not found");
                faces[next_face_index as usize].neighbors[j] = og_face.neighbors[flip_index];
            }
            {
                let prev_face_index =
                    faces[neighbor_face_index as usize].neighbors[(nflip_index + 1) % 3];
                let j = (0..3)
                    .find(|&j| {
                        faces[prev_face_index as usize].vertices[j]
                            == neighbor_opposite_vertices[flip_index]
                    })
                    .expect("flip predecessor not found");
                faces[prev_face_index as usize].neighbors[j] = face_indices[flip_index];
            }

            let neighbor = faces[neighbor_face_index as usize];
            let face = &mut faces[face_indices[flip_index] as usize];
            face.vertices[2] = neighbor.vertices[(nflip_index + 2) % 3];
            let face_neighbor_1 = neighbor.neighbors[(nflip_index + 1) % 3];
            let face_neighbor_2 = og_face.neighbors[flip_index];
            face.neighbors[1] = face_neighbor_1;
            face.neighbors[2] = face_neighbor_2;

            let neighbor = &mut faces[neighbor_face_index as usize];
            neighbor.vertices[(nflip_index + 1) % 3] = v;
            neighbor.neighbors[nflip_index] = face_indices[(flip_index + 1) % 3];
            neighbor.neighbors[(nflip_index + 1) % 3] = face_indices[flip_index];
        }
    }

    let mut labels: Vec<u32> = (0..size).collect();
    for i in (5..=size).rev() {
        let j = 3 + rand_bounded(rng, i - 4);
        labels.swap((i - 1) as usize, j as usize);
    }

    let mut nb = vec![0u32; 6 * size as usize - 12];
    let mut nb_index = 0u32;
    for i in 0..faces.len() {
        let face = faces[i];
        for j in 0..3usize {
            let v = face.vertices[j];
            let vl = labels[v as usize] as usize;
            if adj[vl].len != 0 {
                continue;
            }

            adj[vl].index = nb_index;
            nb[nb_index as usize] = labels[face.vertices[(j + 1) % 3] as usize];
            nb_index += 1;

            let mut face_index = face.neighbors[j];
            while face_index != i as u32 {
                let cur_face = faces[face_index as usize];
                let k = (0..3)
                    .find(|&k| cur_face.vertices[k] == v)
                    .expect("rotation vertex not found");

                nb[nb_index as usize] = labels[cur_face.vertices[(k + 1) % 3] as usize];
                nb_index += 1;
                face_index = cur_face.neighbors[k];
            }

            adj[vl].len = nb_index - adj[vl].index;
        }
    }

    debug_assert_eq!(nb_index as usize, nb.len());

    Graph { adj, nb }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::plane;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn complete_graph_has_expected_degree() {
        let g = complete(6);
        assert_eq!(g.n(), 6);
        for v in 0..6 {
            assert_eq!(g.deg(v), 5);
        }
    }

    #[test]
    fn grid_corners_have_degree_two() {
        let g = grid(3, 3);
        assert_eq!(g.deg(0), 2);
        assert_eq!(g.deg(2), 2);
        assert_eq!(g.deg(6), 2);
        assert_eq!(g.deg(8), 2);
        assert_eq!(g.deg(4), 4);
    }

    #[test]
    fn pyramid_is_planar() {
        for k in [1u32, 2, 5] {
            let g = pyramid(k);
            assert!(plane::validate(&g), "k={k}");
        }
    }

    #[test]
    fn triangulation_is_planar_and_has_the_right_edge_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for &size in &[3u32, 4, 10, 50] {
            let g = triangulation(size, &mut rng, [0.5, 1.0]);
            assert_eq!(g.n(), size);
            assert_eq!(g.nb.len(), (6 * size - 12) as usize);
            assert!(plane::validate(&g), "size={size}");
        }
    }
}
