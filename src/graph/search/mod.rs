//! Incremental breadth-first and depth-first trees over a [`Graph`].
//!
//! Both walks follow the same shape as the rest of this crate's state
//! machines: an `init` builds a `Ctx`, `step` advances by exactly one edge
//! (or dequeues/backtracks), and a driver loops until the context reports
//! done.

pub mod bfs;
pub mod dfs;
