//! Plane graph algorithms: a compact half-edge-free adjacency representation,
//! augmentation, search, a randomized triangulation generator, and two
//! boundary-driven coloring algorithms (Poh's 3-path-coloring and Hartman's
//! 3-list-choosability) with thread-parallel drivers for both.

pub mod graph;
pub mod macros;
pub mod rng;
pub mod threadpool;
