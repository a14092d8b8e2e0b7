//! Board occupancy and canonical state keys.
//!
//! The board is derived, never stored authoritatively: a flat array where
//! each cell holds a 1-based piece number (0 = empty), recomputed from a
//! positions vector whenever it is needed. Canonical keys stamp piece
//! *kinds* instead of piece numbers, so two states that merely swap
//! interchangeable same-shaped pieces deduplicate to one visited entry.

use crate::pieces::{Pos, Puzzle};

/// Sentinel for an empty cell in occupancy grids and canonical keys.
pub const EMPTY: u8 = 0;

/// Converts (row, col) to a flat board cell index.
#[inline(always)]
pub const fn cell_index(cols: usize, row: usize, col: usize) -> usize {
    row * cols + col
}

/// Converts a flat board cell index to (row, col).
#[inline(always)]
pub const fn cell_pos(cols: usize, cell: usize) -> Pos {
    (cell / cols, cell % cols)
}

/// Rebuilds the occupancy grid for a positions vector.
///
/// Each cell holds the occupying piece's 1-based number, or `EMPTY`.
pub fn occupancy(puzzle: &Puzzle, positions: &[usize]) -> Vec<u8> {
    let cols = puzzle.cols();
    let mut board = vec![EMPTY; puzzle.rows() * cols];
    for piece in 0..positions.len() {
        let (row, col) = cell_pos(cols, positions[piece]);
        for (r, c) in puzzle.shape(piece).occupied_cells() {
            board[cell_index(cols, row + r, col + c)] = piece as u8 + 1;
        }
    }
    board
}

/// Computes the canonical visited-set key for a positions vector.
///
/// Occupied cells are stamped with the piece's kind plus one, keeping kind
/// bytes disjoint from the `EMPTY` sentinel; the key is the row-major cell
/// sequence. Keys are recomputed from scratch for every state, never
/// patched incrementally. The king's forced kind 0 keeps its cells from
/// ever matching a same-shaped ordinary piece.
pub fn canonical_key(puzzle: &Puzzle, positions: &[usize]) -> Box<[u8]> {
    let cols = puzzle.cols();
    let mut key = vec![EMPTY; puzzle.rows() * cols];
    for piece in 0..positions.len() {
        let (row, col) = cell_pos(cols, positions[piece]);
        let stamp = puzzle.kind(piece) + 1;
        for (r, c) in puzzle.shape(piece).occupied_cells() {
            key[cell_index(cols, row + r, col + c)] = stamp;
        }
    }
    key.into_boxed_slice()
}

/// Formats a board as one text line per row.
///
/// Pieces display as 1-based numbers, hex letters from 10 up; empty cells
/// show as '.'.
pub fn format_board(puzzle: &Puzzle, positions: &[usize]) -> String {
    let board = occupancy(puzzle, positions);
    let mut output = String::new();
    for row in 0..puzzle.rows() {
        for col in 0..puzzle.cols() {
            let piece_number = board[cell_index(puzzle.cols(), row, col)];
            let display_char = if piece_number == EMPTY {
                '.'
            } else if piece_number < 10 {
                char::from(b'0' + piece_number)
            } else {
                char::from(b'A' + piece_number - 10)
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}
