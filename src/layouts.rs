//! Built-in puzzle layouts.
//!
//! Classic Klotski boards expressed directly as shape and position
//! constants. The king is always piece 0 so rendered boards show it as '1'.

use crate::pieces::{Door, DoorSide, Piece, Puzzle, Shape};

/// Names accepted by `by_name`, in display order.
pub const NAMES: &[&str] = &["classic", "corridor"];

/// Looks up a built-in layout by name.
pub fn by_name(name: &str) -> Option<Puzzle> {
    match name {
        "classic" => Some(classic()),
        "corridor" => Some(corridor()),
        _ => None,
    }
}

/// The classic Klotski opening: a 2x2 king behind a wall of guards on a
/// 5x4 board, exiting through a two-cell door at the bottom.
pub fn classic() -> Puzzle {
    let king = Shape::parse(&["##", "##"]);
    let vertical = Shape::parse(&["#", "#"]);
    let horizontal = Shape::parse(&["##"]);
    let pawn = Shape::parse(&["#"]);

    let pieces = vec![
        Piece::new(king, 0, 1),
        Piece::new(vertical.clone(), 0, 0),
        Piece::new(vertical.clone(), 0, 3),
        Piece::new(horizontal, 2, 1),
        Piece::new(vertical.clone(), 2, 0),
        Piece::new(vertical, 2, 3),
        Piece::new(pawn.clone(), 3, 1),
        Piece::new(pawn.clone(), 3, 2),
        Piece::new(pawn.clone(), 4, 0),
        Piece::new(pawn, 4, 3),
    ];
    let door = Door {
        side: DoorSide::Bottom,
        offset: 1,
        span: 2,
    };
    Puzzle::through_door(5, 4, pieces, 0, door).expect("classic layout is valid")
}

/// A 4x3 practice board where the king slides straight out through the
/// bottom door.
pub fn corridor() -> Puzzle {
    let king = Shape::parse(&["##", "##"]);
    let vertical = Shape::parse(&["#", "#"]);
    let pawn = Shape::parse(&["#"]);

    let pieces = vec![
        Piece::new(king, 0, 0),
        Piece::new(vertical, 0, 2),
        Piece::new(pawn.clone(), 2, 2),
        Piece::new(pawn, 3, 2),
    ];
    let door = Door {
        side: DoorSide::Bottom,
        offset: 0,
        span: 2,
    };
    Puzzle::through_door(4, 3, pieces, 0, door).expect("corridor layout is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_covers_every_layout() {
        for name in NAMES {
            assert!(by_name(name).is_some(), "missing layout {name}");
        }
        assert!(by_name("atlantis").is_none());
    }

    #[test]
    fn test_classic_win_position_sits_on_the_bottom_door() {
        let puzzle = classic();
        assert_eq!(puzzle.king_index(), 0);
        assert_eq!(puzzle.win_pos(), (3, 1));
        assert_eq!(puzzle.piece_count(), 10);
    }
}
