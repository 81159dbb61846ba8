//! Castling availability.
//!
//! Eligibility is driven by touch counters rather than explicit castling
//! rights: the king and the castling rook must still sit on their home
//! squares with counters at zero. A rook that left home and came back, or
//! a square that saw a capture, has a nonzero counter and disqualifies
//! that side forever.

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::evaluate;
use crate::modifiers::ModifierSet;

use super::SquareList;

const KING_HOME_COL: i8 = 4;
const QUEENSIDE_ROOK_COL: i8 = 0;
const KINGSIDE_ROOK_COL: i8 = 7;
const QUEENSIDE_KING_COL: i8 = 2;
const KINGSIDE_KING_COL: i8 = 6;

/// King destination squares for the castles `color` may play right now.
/// Empty when the king is displaced, touched, or currently in check. Each
/// square the king crosses or lands on is vetted with the same simulation
/// the self-check filter uses, so a castle out of the returned list never
/// needs further filtering.
pub fn castle_destinations(board: &Board, color: Color, modifiers: &ModifierSet) -> SquareList {
    let mut destinations = SquareList::new();
    let row = color.home_row();
    let king_home = Square::new(row, KING_HOME_COL);
    if !board.holds(king_home, Piece::King, color) || board.touch_count(king_home) != 0 {
        return destinations;
    }
    // Under the elimination win conditions check is never tracked, so it
    // cannot bar the castle either.
    if !modifiers.win.ignores_self_check() {
        if let Some(king) = board.king_square(color) {
            if evaluate::is_attacked(board, king, color.opposite(), modifiers) {
                return destinations;
            }
        }
    }

    // (rook column, columns that must be empty, columns the king crosses)
    let sides: [(i8, &[i8], i8); 2] = [
        (QUEENSIDE_ROOK_COL, &[1, 2, 3], QUEENSIDE_KING_COL),
        (KINGSIDE_ROOK_COL, &[5, 6], KINGSIDE_KING_COL),
    ];
    for (rook_col, between, king_col) in sides {
        let rook_home = Square::new(row, rook_col);
        if !board.holds(rook_home, Piece::Rook, color) || board.touch_count(rook_home) != 0 {
            continue;
        }
        if between.iter().any(|&col| !board.is_empty(Square::new(row, col))) {
            continue;
        }
        // The king may not pass through or land on an attacked square.
        let path = [
            Square::new(row, (KING_HOME_COL + king_col) / 2),
            Square::new(row, king_col),
        ];
        let safe = path.iter().all(|&step| {
            !evaluate::leaves_own_king_attacked(board, color, king_home, step, modifiers)
        });
        if safe {
            destinations.push(Square::new(row, king_col));
        }
    }
    destinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::board_position;
    use common::square::*;

    fn castles(board: &Board, color: Color) -> Vec<Square> {
        castle_destinations(board, color, &ModifierSet::STANDARD).into_vec()
    }

    #[test]
    fn test_both_castles_available_on_open_home_rank() {
        let board = board_position! {
            r...k..r
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        assert_eq!(castles(&board, Color::White), vec![C1, G1]);
        assert_eq!(castles(&board, Color::Black), vec![C8, G8]);
    }

    #[test]
    fn test_occupied_between_square_blocks_that_side() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            RN..K..R
        };
        // b1 blocks queenside even though the king never crosses it.
        assert_eq!(castles(&board, Color::White), vec![G1]);
    }

    #[test]
    fn test_touched_rook_square_disqualifies() {
        let mut board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        // Move the kingside rook away and back; its counter is now 2.
        board.clear(H1);
        board.place(H1, Piece::Rook, Color::White);
        assert_eq!(castles(&board, Color::White), vec![C1]);
    }

    #[test]
    fn test_no_castling_while_in_check() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ....r...
            R...K..R
        };
        assert_eq!(castles(&board, Color::White), vec![]);
    }

    #[test]
    fn test_no_castling_through_an_attacked_square() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            .....r..
            ........
            R...K..R
        };
        // f1 is covered, so only the queenside castle survives.
        assert_eq!(castles(&board, Color::White), vec![C1]);
    }

    #[test]
    fn test_no_castling_into_an_attacked_square() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ......r.
            ........
            R...K..R
        };
        assert_eq!(castles(&board, Color::White), vec![C1]);
    }

    #[test]
    fn test_displaced_king_cannot_castle() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R..K...R
        };
        assert_eq!(castles(&board, Color::White), vec![]);
    }
}
