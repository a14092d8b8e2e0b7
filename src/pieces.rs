//! Puzzle piece and board definitions.
//!
//! A puzzle is a rectangular board, an ordered list of polyomino pieces (each
//! a boolean shape grid positioned by its bounding-box top-left corner), one
//! distinguished king piece, a win position for the king, and a door on the
//! board edge the king must exit through. Everything is validated once at
//! construction and immutable afterwards.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// A (row, column) position on the board.
pub type Pos = (usize, usize);

/// Maximum number of pieces in a puzzle.
///
/// Occupancy grids store 1-based piece numbers in a `u8`.
pub const MAX_PIECES: usize = 127;

/// The occupied cells of a piece within its bounding box.
///
/// Stored as a flat row-major grid. Two pieces with equal shapes belong to
/// the same kind for state canonicalization.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Creates a shape from a flat row-major cell grid.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        assert!(rows > 0 && cols > 0, "shape must have at least one cell");
        assert!(
            cells.len() == rows * cols,
            "cell count must equal rows * cols"
        );
        Self { rows, cols, cells }
    }

    /// Parses a shape from string rows, `'#'` occupied and `'.'` empty.
    pub fn parse(rows: &[&str]) -> Self {
        assert!(!rows.is_empty(), "shape must have at least one row");
        let cols = rows[0].len();
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            assert!(row.len() == cols, "shape rows must have equal length");
            for cell in row.chars() {
                match cell {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    _ => panic!("shape cells must be '#' or '.'"),
                }
            }
        }
        Self::from_cells(rows.len(), cols, cells)
    }

    /// Height of the bounding box.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Width of the bounding box.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the shape occupies the given cell of its bounding box.
    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Iterates the (row, col) cells the shape occupies.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_occupied(row, col))
    }
}

/// Board edge a door sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// The board-edge opening the king must exit through.
///
/// `offset` and `span` run along the edge: columns for top/bottom doors, rows
/// for left/right doors. The geometry informs validation and the default win
/// position; move legality never consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub side: DoorSide,
    pub offset: usize,
    pub span: usize,
}

impl Door {
    /// The win position that puts `king` flush against this door.
    pub fn king_win_pos(&self, king: &Shape, rows: usize, cols: usize) -> Pos {
        match self.side {
            DoorSide::Top => (0, self.offset),
            DoorSide::Right => (self.offset, cols.saturating_sub(king.cols())),
            DoorSide::Bottom => (rows.saturating_sub(king.rows()), self.offset),
            DoorSide::Left => (self.offset, 0),
        }
    }
}

/// One piece of the initial configuration: a shape at its starting position.
#[derive(Clone, Debug)]
pub struct Piece {
    pub shape: Shape,
    pub position: Pos,
}

impl Piece {
    /// Places a shape with its bounding-box top-left corner at (row, col).
    pub fn new(shape: Shape, row: usize, col: usize) -> Self {
        Self {
            shape,
            position: (row, col),
        }
    }
}

/// Rejected puzzle definitions.
///
/// All variants surface at construction time; the solver itself never
/// errors (an unsolvable puzzle is a normal outcome, not a defect).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("board must have at least one row and one column")]
    EmptyBoard,
    #[error("puzzle has no pieces")]
    NoPieces,
    #[error("puzzle has {0} pieces, the maximum is {max}", max = MAX_PIECES)]
    TooManyPieces(usize),
    #[error("king index {index} is out of range for {count} pieces")]
    KingIndexOutOfRange { index: usize, count: usize },
    #[error("piece {0} occupies no cells")]
    EmptyShape(usize),
    #[error("piece {index} does not fit on the board at ({row}, {col})")]
    PieceOutOfBounds { index: usize, row: usize, col: usize },
    #[error("pieces {first} and {second} overlap at ({row}, {col})")]
    OverlappingPieces {
        first: usize,
        second: usize,
        row: usize,
        col: usize,
    },
    #[error("the king does not fit on the board at the win position ({row}, {col})")]
    WinPositionOutOfBounds { row: usize, col: usize },
    #[error("the door does not fit on its board edge")]
    DoorOutOfBounds,
}

/// A validated, immutable puzzle definition.
///
/// Piece positions are encoded as single cell indices `row * cols + col`, so
/// a one-unit move is a `±1` or `±cols` delta on one entry.
#[derive(Clone, Debug)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    shapes: Vec<Shape>,
    kinds: Vec<u8>,
    start_cells: Vec<usize>,
    king: usize,
    win_cell: usize,
    door: Door,
}

impl Puzzle {
    /// Creates a puzzle with an explicit win position for the king.
    pub fn new(
        rows: usize,
        cols: usize,
        pieces: Vec<Piece>,
        king_index: usize,
        win_pos: Pos,
        door: Door,
    ) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyBoard);
        }
        if pieces.is_empty() {
            return Err(PuzzleError::NoPieces);
        }
        if pieces.len() > MAX_PIECES {
            return Err(PuzzleError::TooManyPieces(pieces.len()));
        }
        if king_index >= pieces.len() {
            return Err(PuzzleError::KingIndexOutOfRange {
                index: king_index,
                count: pieces.len(),
            });
        }

        // every piece must sit fully on the board, without overlap
        let mut occupied = vec![0u8; rows * cols];
        for (index, piece) in pieces.iter().enumerate() {
            if piece.shape.occupied_cells().next().is_none() {
                return Err(PuzzleError::EmptyShape(index));
            }
            let (row, col) = piece.position;
            if row + piece.shape.rows() > rows || col + piece.shape.cols() > cols {
                return Err(PuzzleError::PieceOutOfBounds { index, row, col });
            }
            for (r, c) in piece.shape.occupied_cells() {
                let cell = &mut occupied[(row + r) * cols + col + c];
                if *cell != 0 {
                    return Err(PuzzleError::OverlappingPieces {
                        first: *cell as usize - 1,
                        second: index,
                        row: row + r,
                        col: col + c,
                    });
                }
                *cell = index as u8 + 1;
            }
        }

        let king_shape = &pieces[king_index].shape;
        if win_pos.0 + king_shape.rows() > rows || win_pos.1 + king_shape.cols() > cols {
            return Err(PuzzleError::WinPositionOutOfBounds {
                row: win_pos.0,
                col: win_pos.1,
            });
        }

        let edge_len = match door.side {
            DoorSide::Top | DoorSide::Bottom => cols,
            DoorSide::Left | DoorSide::Right => rows,
        };
        if door.span == 0 || door.offset + door.span > edge_len {
            return Err(PuzzleError::DoorOutOfBounds);
        }

        // the king always gets kind 0; other pieces share one kind per
        // distinct shape, assigned in first-seen order
        let mut kinds = vec![0u8; pieces.len()];
        let mut kind_by_shape: FxHashMap<Shape, u8> = FxHashMap::default();
        let mut next_kind = 0u8;
        for (index, piece) in pieces.iter().enumerate() {
            if index == king_index {
                continue;
            }
            kinds[index] = *kind_by_shape
                .entry(piece.shape.clone())
                .or_insert_with(|| {
                    next_kind += 1;
                    next_kind
                });
        }

        let start_cells = pieces
            .iter()
            .map(|piece| piece.position.0 * cols + piece.position.1)
            .collect();
        let shapes = pieces.into_iter().map(|piece| piece.shape).collect();

        Ok(Self {
            rows,
            cols,
            shapes,
            kinds,
            start_cells,
            king: king_index,
            win_cell: win_pos.0 * cols + win_pos.1,
            door,
        })
    }

    /// Creates a puzzle whose win position is derived from the door: the
    /// placement that puts the king flush against the opening.
    pub fn through_door(
        rows: usize,
        cols: usize,
        pieces: Vec<Piece>,
        king_index: usize,
        door: Door,
    ) -> Result<Self, PuzzleError> {
        if king_index >= pieces.len() {
            return Err(PuzzleError::KingIndexOutOfRange {
                index: king_index,
                count: pieces.len(),
            });
        }
        let win_pos = door.king_win_pos(&pieces[king_index].shape, rows, cols);
        Self::new(rows, cols, pieces, king_index, win_pos, door)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn piece_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn shape(&self, piece: usize) -> &Shape {
        &self.shapes[piece]
    }

    /// Canonicalization kind of a piece; the king is always kind 0.
    pub fn kind(&self, piece: usize) -> u8 {
        self.kinds[piece]
    }

    pub fn king_index(&self) -> usize {
        self.king
    }

    /// The king's win position as a cell index.
    pub fn win_cell(&self) -> usize {
        self.win_cell
    }

    /// The king's win position as (row, col).
    pub fn win_pos(&self) -> Pos {
        (self.win_cell / self.cols, self.win_cell % self.cols)
    }

    pub fn door(&self) -> Door {
        self.door
    }

    /// Starting piece positions as board cell indices.
    pub fn start_cells(&self) -> &[usize] {
        &self.start_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn() -> Shape {
        Shape::parse(&["#"])
    }

    fn side_door() -> Door {
        Door {
            side: DoorSide::Left,
            offset: 0,
            span: 1,
        }
    }

    #[test]
    fn test_parse_shape_cells() {
        let shape = Shape::parse(&["#.", "##"]);
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.cols(), 2);
        let cells: Vec<Pos> = shape.occupied_cells().collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (1, 1)]);
        assert!(!shape.is_occupied(0, 1));
    }

    #[test]
    fn test_kinds_shared_by_shape_but_never_with_the_king() {
        let vertical = Shape::parse(&["#", "#"]);
        let pieces = vec![
            Piece::new(pawn(), 0, 0),
            Piece::new(pawn(), 0, 1),
            Piece::new(pawn(), 0, 2),
            Piece::new(vertical.clone(), 1, 0),
            Piece::new(vertical, 1, 1),
        ];
        let puzzle = Puzzle::new(3, 3, pieces, 0, (0, 0), side_door()).unwrap();

        assert_eq!(puzzle.kind(0), 0, "king kind is forced to 0");
        assert_eq!(puzzle.kind(1), puzzle.kind(2), "equal shapes share a kind");
        assert_eq!(puzzle.kind(3), puzzle.kind(4));
        assert_ne!(
            puzzle.kind(1),
            puzzle.kind(0),
            "a pawn shaped like the king still gets its own kind"
        );
        assert_ne!(puzzle.kind(1), puzzle.kind(3));
    }

    #[test]
    fn test_rejects_empty_board() {
        let result = Puzzle::new(0, 4, vec![Piece::new(pawn(), 0, 0)], 0, (0, 0), side_door());
        assert_eq!(result.unwrap_err(), PuzzleError::EmptyBoard);
    }

    #[test]
    fn test_rejects_missing_pieces() {
        let result = Puzzle::new(2, 2, vec![], 0, (0, 0), side_door());
        assert_eq!(result.unwrap_err(), PuzzleError::NoPieces);
    }

    #[test]
    fn test_rejects_king_index_out_of_range() {
        let result = Puzzle::new(2, 2, vec![Piece::new(pawn(), 0, 0)], 5, (0, 0), side_door());
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::KingIndexOutOfRange { index: 5, count: 1 }
        );
    }

    #[test]
    fn test_rejects_shape_without_cells() {
        let blank = Shape::from_cells(1, 1, vec![false]);
        let result = Puzzle::new(2, 2, vec![Piece::new(blank, 0, 0)], 0, (0, 0), side_door());
        assert_eq!(result.unwrap_err(), PuzzleError::EmptyShape(0));
    }

    #[test]
    fn test_rejects_piece_outside_the_board() {
        let result = Puzzle::new(2, 2, vec![Piece::new(pawn(), 2, 0)], 0, (0, 0), side_door());
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::PieceOutOfBounds {
                index: 0,
                row: 2,
                col: 0
            }
        );
    }

    #[test]
    fn test_rejects_overlapping_pieces() {
        let pieces = vec![Piece::new(pawn(), 0, 0), Piece::new(pawn(), 0, 0)];
        let result = Puzzle::new(2, 2, pieces, 0, (0, 0), side_door());
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::OverlappingPieces {
                first: 0,
                second: 1,
                row: 0,
                col: 0
            }
        );
    }

    #[test]
    fn test_rejects_win_position_that_does_not_fit_the_king() {
        let king = Shape::parse(&["##", "##"]);
        let result = Puzzle::new(2, 2, vec![Piece::new(king, 0, 0)], 0, (1, 1), side_door());
        assert_eq!(
            result.unwrap_err(),
            PuzzleError::WinPositionOutOfBounds { row: 1, col: 1 }
        );
    }

    #[test]
    fn test_rejects_door_off_its_edge() {
        let door = Door {
            side: DoorSide::Top,
            offset: 3,
            span: 2,
        };
        let result = Puzzle::new(2, 4, vec![Piece::new(pawn(), 0, 0)], 0, (0, 0), door);
        assert_eq!(result.unwrap_err(), PuzzleError::DoorOutOfBounds);

        let zero_span = Door {
            side: DoorSide::Top,
            offset: 0,
            span: 0,
        };
        let result = Puzzle::new(2, 4, vec![Piece::new(pawn(), 0, 0)], 0, (0, 0), zero_span);
        assert_eq!(result.unwrap_err(), PuzzleError::DoorOutOfBounds);
    }

    #[test]
    fn test_rejects_too_many_pieces() {
        let pieces: Vec<Piece> = (0..MAX_PIECES + 1)
            .map(|col| Piece::new(pawn(), 0, col))
            .collect();
        let result = Puzzle::new(1, MAX_PIECES + 1, pieces, 0, (0, 0), side_door());
        assert_eq!(result.unwrap_err(), PuzzleError::TooManyPieces(MAX_PIECES + 1));
    }

    #[test]
    fn test_win_position_derived_from_each_door_side() {
        let king = Shape::parse(&["##", "##"]);
        let top = Door {
            side: DoorSide::Top,
            offset: 1,
            span: 2,
        };
        assert_eq!(top.king_win_pos(&king, 5, 4), (0, 1));

        let right = Door {
            side: DoorSide::Right,
            offset: 1,
            span: 2,
        };
        assert_eq!(right.king_win_pos(&king, 5, 4), (1, 2));

        let bottom = Door {
            side: DoorSide::Bottom,
            offset: 1,
            span: 2,
        };
        assert_eq!(bottom.king_win_pos(&king, 5, 4), (3, 1));

        let left = Door {
            side: DoorSide::Left,
            offset: 2,
            span: 2,
        };
        assert_eq!(left.king_win_pos(&king, 5, 4), (2, 0));
    }

    #[test]
    fn test_start_cells_encode_row_major_positions() {
        let pieces = vec![Piece::new(pawn(), 0, 0), Piece::new(pawn(), 1, 2)];
        let puzzle = Puzzle::new(2, 3, pieces, 0, (0, 0), side_door()).unwrap();
        assert_eq!(puzzle.start_cells(), &[0, 5]);
    }
}
