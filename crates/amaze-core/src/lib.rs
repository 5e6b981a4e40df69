//! **amaze-core** — Grid maze solving (core types).
//!
//! This crate provides the foundational types used across the *amaze*
//! workspace: grid coordinates, cardinal moves, and the maze itself (a
//! rectangular wall matrix with a start and a goal cell).

pub mod coord;
pub mod maze;

pub use coord::{Coord, Move};
pub use maze::{Maze, MazeError};
