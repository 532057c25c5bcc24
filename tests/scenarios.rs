//! End-to-end scenarios exercising a full build -> augment -> algorithm ->
//! verify pipeline, one test per named scenario.

use plane_graph::graph::plane::{gen, p3choose, p3choose_parallel, p3color, p3color_parallel};
use plane_graph::graph::{build, io, path_color, search::bfs};

/// S1: K3 3-path-color with p = {0}, q = {1, 2}.
#[test]
fn s1_k3_3_path_color() {
    let g = gen::complete(3);
    let coloring = p3color::color(&g, &[0], &[1, 2]);

    assert_eq!(coloring[0], 1);
    assert_eq!(coloring[1], coloring[2]);
    assert_ne!(coloring[1], 1);
    assert!(path_color::verify(&g, &coloring));
}

/// S2: K3 list-choose, every list {1, 2, 3}.
#[test]
fn s2_k3_list_choose() {
    let g = build::augment(&gen::complete(3));
    let lists = vec![
        p3choose::ColorList::from_slice(&[1, 2, 3]),
        p3choose::ColorList::from_slice(&[1, 2, 3]),
        p3choose::ColorList::from_slice(&[1, 2, 3]),
    ];
    let coloring = p3choose::choose(&g, &lists, &[0, 1, 2]);

    assert_ne!(coloring[0], coloring[1]);
    assert_ne!(coloring[1], coloring[2]);
    assert_ne!(coloring[0], coloring[2]);
    assert!(path_color::verify(&g.strip(), &coloring));
}

/// S3: K4 planar list-choose, three boundary vertices with 2-color lists
/// around one interior vertex with a full 3-color list (gen::complete(4)'s
/// embedding puts vertex 3 in the middle of the 0-1-2 outer triangle, the
/// same arrangement spec.md names with different vertex labels).
#[test]
fn s3_k4_planar_list_choose() {
    let g = build::augment(&gen::complete(4));

    let lists = vec![
        p3choose::ColorList::from_slice(&[1, 2]),
        p3choose::ColorList::from_slice(&[1, 2]),
        p3choose::ColorList::from_slice(&[1, 2]),
        p3choose::ColorList::from_slice(&[1, 2, 3]),
    ];
    let coloring = p3choose::choose(&g, &lists, &[0, 1, 2]);

    assert_ne!(coloring[0], coloring[1]);
    assert_ne!(coloring[1], coloring[2]);
    assert_ne!(coloring[0], coloring[2]);
    assert!(path_color::verify(&g.strip(), &coloring));
}

/// S4: 4x4 grid BFS from 5 = (1,1) to 10 = (2,2).
#[test]
fn s4_grid_bfs() {
    let g = gen::grid(4, 4);
    let tree = bfs::bfs(&g, 5);

    assert!(tree.contains(10));
    let path = tree.path_to_root(10);
    assert_eq!(path.first().copied(), Some(5));
    assert_eq!(path.last().copied(), Some(10));
    assert_eq!(path.len(), 3);
}

/// S5: random triangulation at n = 1119, Poh parallel with 4 workers.
#[test]
fn s5_large_random_triangulation_parallel_poh() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(1119);
    let g = gen::triangulation(1119, &mut rng, [0.5, 1.0]);

    let p1 = 0u32;
    let coloring = p3color_parallel::color_parallel(&g, &[p1], &[1, 2], 4);

    assert!(path_color::verify(&g, &coloring));
    assert_eq!(coloring[p1 as usize], 1);
    for &c in &coloring {
        assert!((1..=3).contains(&c));
    }
}

/// Parallel Hartman list-choosing gets the same end-to-end treatment as S5.
#[test]
fn large_random_triangulation_parallel_hartman() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(1120);
    let plain = gen::triangulation(300, &mut rng, [0.5, 1.0]);
    let g = build::augment(&plain);
    let lists: Vec<_> = (0..300).map(|_| p3choose::ColorList::from_slice(&[1, 2, 3])).collect();

    let coloring = p3choose_parallel::choose_parallel(&g, &lists, &[0, 2, 1], 4);
    assert!(path_color::verify(&plain, &coloring));
}

/// S6: serialize/round-trip K19.
#[test]
fn s6_round_trip_k19() {
    let g = gen::complete(19);
    let mut buf = Vec::new();
    io::push(&mut buf, &g).unwrap();

    let mut cursor = &buf[..];
    let g2 = io::pop(&mut cursor).unwrap();

    assert!(io::validate(&g2));
    assert_eq!(g.adj, g2.adj);
    assert_eq!(g.nb, g2.nb);
}
