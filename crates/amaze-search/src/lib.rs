//! Graph-search engine for grid mazes.
//!
//! This crate explores a [`Maze`](amaze_core::Maze) from its start cell to
//! its goal cell under one of four exploration strategies:
//!
//! - **Depth-first** — LIFO frontier removal, deep before wide
//! - **Breadth-first** — FIFO removal, shortest path by edge count
//! - **Greedy best-first** — priority removal by Manhattan distance to goal
//! - **A\*** — priority removal by cost plus Manhattan distance, optimal on
//!   a unit-cost grid
//!
//! All strategies share one engine: a [`Frontier`] with a pluggable removal
//! [`Policy`], a [`NodeArena`] holding the search-node genealogy, and the
//! [`Solver`] loop tying neighbor generation, deduplication, and
//! termination together. [`Solver`] owns and reuses its working buffers so
//! repeated solves incur no allocations after warm-up.

mod distance;
mod frontier;
mod node;
mod solver;

pub use distance::manhattan;
pub use frontier::{EmptyFrontierError, Frontier, Policy, PriorityKey};
pub use node::{NodeArena, NodeId, SearchNode};
pub use solver::{SearchMode, Solution, SolveReport, Solver};
