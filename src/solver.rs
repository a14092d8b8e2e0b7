//! Breadth-first sliding-block solver.
//!
//! Key points:
//! - FIFO frontier over arena-allocated states with parent links
//! - FxHashSet over fixed-width canonical keys for deduplication
//! - Chained same-piece slides explored eagerly, so a multi-cell slide is
//!   discovered at the same search depth as a single step
//! - Win tested after every unit shift, short-circuiting the whole search

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashSet;

use crate::board::{canonical_key, cell_index, cell_pos, occupancy, EMPTY};
use crate::pieces::{DoorSide, Puzzle, Shape};

/// Unit move directions in expansion order: down, right, up, left.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Index of each direction's inverse in `DIRECTIONS`.
const INVERSE: [usize; 4] = [2, 3, 0, 1];

/// One logical move: a piece sliding one or more cells in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub piece_index: usize,
    /// (row delta, col delta); exactly one component is nonzero and its
    /// magnitude may exceed one cell.
    pub direction: (i32, i32),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row_delta, col_delta) = self.direction;
        let (word, cells) = if row_delta != 0 {
            (
                if row_delta > 0 { "down" } else { "up" },
                row_delta.unsigned_abs(),
            )
        } else {
            (
                if col_delta > 0 { "right" } else { "left" },
                col_delta.unsigned_abs(),
            )
        };
        write!(f, "piece {} {} {}", self.piece_index, word, cells)
    }
}

/// Result of a solve: a shortest move list, exhaustion, or budget cutoff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Vec<Step>),
    NoSolution,
    Cancelled,
}

/// A search state: piece positions plus the predecessor that produced it.
///
/// The occupancy grid is cached alongside the positions so legality scans
/// for every piece of the state reuse it.
struct Node {
    positions: Vec<usize>,
    board: Vec<u8>,
    parent: Option<usize>,
}

/// All search storage for one solve, discarded when the call returns.
struct Search<'a> {
    puzzle: &'a Puzzle,
    /// All discovered states; parent fields index into this arena.
    arena: Vec<Node>,
    frontier: VecDeque<usize>,
    visited: FxHashSet<Box<[u8]>>,
}

/// Solves a puzzle by breadth-first search.
///
/// Returns the shortest move list, `NoSolution` once the reachable state
/// space is exhausted, or `Cancelled` when `max_states` expansions were
/// spent first. The budget is checked between frontier dequeues, so a
/// bounded call still returns promptly on large boards.
pub fn solve(puzzle: &Puzzle, max_states: Option<usize>) -> Outcome {
    let start: Vec<usize> = puzzle.start_cells().to_vec();
    if is_winning(puzzle, &start) {
        // already at the door, zero moves
        return Outcome::Solved(Vec::new());
    }

    let mut search = Search {
        puzzle,
        arena: Vec::new(),
        frontier: VecDeque::new(),
        visited: FxHashSet::default(),
    };
    search.visited.insert(canonical_key(puzzle, &start));
    search.arena.push(Node {
        board: occupancy(puzzle, &start),
        positions: start,
        parent: None,
    });
    search.frontier.push_back(0);

    let mut expanded = 0usize;
    while let Some(state) = search.frontier.pop_front() {
        if max_states.is_some_and(|limit| expanded >= limit) {
            return Outcome::Cancelled;
        }
        expanded += 1;
        for piece in 0..puzzle.piece_count() {
            if let Some(win) = search.try_move(state, piece, 0) {
                return Outcome::Solved(search.reconstruct(win));
            }
        }
    }
    Outcome::NoSolution
}

/// Whether a positions vector is a winning state.
///
/// The king must sit exactly at the win position with no other piece caught
/// in its bounding box between a king cell and the door edge.
pub fn is_winning(puzzle: &Puzzle, positions: &[usize]) -> bool {
    positions[puzzle.king_index()] == puzzle.win_cell()
        && door_clear(puzzle, positions, &occupancy(puzzle, positions))
}

fn is_winning_on(puzzle: &Puzzle, positions: &[usize], board: &[u8]) -> bool {
    positions[puzzle.king_index()] == puzzle.win_cell() && door_clear(puzzle, positions, board)
}

/// Checks that no other piece blocks the king's passage through the door.
///
/// A multi-cell king may leave holes in its bounding box. A hole occupied
/// by another piece blocks the exit when some king cell lies beyond it,
/// away from the door edge, because that occupant sits in the doorway the
/// king must clear.
fn door_clear(puzzle: &Puzzle, positions: &[usize], board: &[u8]) -> bool {
    let king = puzzle.king_index();
    let shape = puzzle.shape(king);
    let (king_row, king_col) = cell_pos(puzzle.cols(), positions[king]);
    for row in 0..shape.rows() {
        for col in 0..shape.cols() {
            if shape.is_occupied(row, col) {
                continue;
            }
            let occupant = board[cell_index(puzzle.cols(), king_row + row, king_col + col)];
            if occupant != EMPTY && blocks_exit(shape, puzzle.door().side, row, col) {
                return false;
            }
        }
    }
    true
}

/// Whether a king cell lies beyond the bounding-box hole at (row, col),
/// away from the door edge, trapping the hole's occupant in the exit path.
fn blocks_exit(shape: &Shape, side: DoorSide, row: usize, col: usize) -> bool {
    match side {
        DoorSide::Top => (row + 1..shape.rows()).any(|r| shape.is_occupied(r, col)),
        DoorSide::Bottom => (0..row).any(|r| shape.is_occupied(r, col)),
        DoorSide::Left => (col + 1..shape.cols()).any(|c| shape.is_occupied(row, c)),
        DoorSide::Right => (0..col).any(|c| shape.is_occupied(row, c)),
    }
}

impl Search<'_> {
    /// Tries every non-banned direction for one piece from one state.
    ///
    /// Each legal unit shift becomes a new state. The recursion extends the
    /// chain with the inverse direction banned, so a slide never undoes the
    /// step it just took; other pieces, and this piece from a later dequeued
    /// state, stay unconstrained. Returns the winning state's arena index,
    /// if the chain reached one.
    fn try_move(&mut self, state: usize, piece: usize, banned: u8) -> Option<usize> {
        let puzzle = self.puzzle;
        let rows = puzzle.rows() as i32;
        let cols = puzzle.cols() as i32;
        let shape = puzzle.shape(piece);
        let (row, col) = cell_pos(puzzle.cols(), self.arena[state].positions[piece]);

        'directions: for (dir, &(row_step, col_step)) in DIRECTIONS.iter().enumerate() {
            if banned & (1u8 << dir) != 0 {
                continue;
            }
            let board = &self.arena[state].board;
            for (r, c) in shape.occupied_cells() {
                let dest_row = row as i32 + r as i32 + row_step;
                let dest_col = col as i32 + c as i32 + col_step;
                if dest_row < 0 || dest_row >= rows || dest_col < 0 || dest_col >= cols {
                    continue 'directions;
                }
                let occupant =
                    board[cell_index(puzzle.cols(), dest_row as usize, dest_col as usize)];
                // a cell covered by this same piece vacates as it slides
                if occupant != EMPTY && occupant != piece as u8 + 1 {
                    continue 'directions;
                }
            }

            let mut positions = self.arena[state].positions.clone();
            positions[piece] = (positions[piece] as i32 + row_step * cols + col_step) as usize;
            if !self.visited.insert(canonical_key(puzzle, &positions)) {
                // configuration already discovered through another order
                continue;
            }
            let child = self.arena.len();
            self.arena.push(Node {
                board: occupancy(puzzle, &positions),
                positions,
                parent: Some(state),
            });
            if is_winning_on(puzzle, &self.arena[child].positions, &self.arena[child].board) {
                return Some(child);
            }
            self.frontier.push_back(child);
            if let Some(win) = self.try_move(child, piece, 1u8 << INVERSE[dir]) {
                return Some(win);
            }
        }
        None
    }

    /// Walks parent links from the winning state back to the root, merging
    /// consecutive same-piece, same-heading unit shifts into single steps,
    /// then reverses the list into chronological order.
    fn reconstruct(&self, win: usize) -> Vec<Step> {
        let cols = self.puzzle.cols() as i32;
        let mut steps: Vec<Step> = Vec::new();
        let mut current = win;
        while let Some(parent) = self.arena[current].parent {
            let child_positions = &self.arena[current].positions;
            let parent_positions = &self.arena[parent].positions;
            for piece in 0..child_positions.len() {
                let delta = child_positions[piece] as i32 - parent_positions[piece] as i32;
                if delta == 0 {
                    continue;
                }
                let unit = unit_direction(cols, delta);
                match steps.last_mut() {
                    Some(last)
                        if last.piece_index == piece && same_heading(last.direction, unit) =>
                    {
                        last.direction.0 += unit.0;
                        last.direction.1 += unit.1;
                    }
                    _ => steps.push(Step {
                        piece_index: piece,
                        direction: unit,
                    }),
                }
                break;
            }
            current = parent;
        }
        steps.reverse();
        steps
    }
}

/// Decodes a one-unit cell-index delta into a (row, col) unit direction.
///
/// Vertical deltas are checked first so single-column boards, where
/// `cols == 1` makes the two encodings coincide, decode as vertical moves.
fn unit_direction(cols: i32, delta: i32) -> (i32, i32) {
    if delta == cols {
        (1, 0)
    } else if delta == -cols {
        (-1, 0)
    } else if delta == 1 {
        (0, 1)
    } else {
        debug_assert_eq!(delta, -1);
        (0, -1)
    }
}

/// Whether an accumulated step direction and a unit direction share a
/// heading (same axis, same sign).
fn same_heading(accumulated: (i32, i32), unit: (i32, i32)) -> bool {
    accumulated.0.signum() == unit.0 && accumulated.1.signum() == unit.1
}
