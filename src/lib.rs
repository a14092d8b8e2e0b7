//! Sliding Block Puzzle Solver Library
//!
//! Provides shortest-path solving for Klotski-style sliding block puzzles:
//! polyomino pieces slide one cell at a time on a rectangular board until the
//! king piece can leave through the door. The search is an exhaustive
//! breadth-first expansion over canonicalized board occupancies, so the first
//! solution found uses the minimum number of moves.

pub mod board;
pub mod layouts;
pub mod pieces;
pub mod solver;

pub use pieces::{Door, DoorSide, Piece, Pos, Puzzle, PuzzleError, Shape};
pub use solver::{is_winning, solve, Outcome, Step};
