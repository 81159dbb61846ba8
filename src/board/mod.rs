//! Chess board state representation.
//!
//! The board is the only mutable ground truth of piece placement: an 8x8
//! grid of optional pieces plus a per-square touch counter. The counter is
//! incremented every time a piece is placed onto or removed from a square
//! during play (`place`/`clear`), but not by setup or takeback restoration
//! (`set_raw`). Castling rights are derived from it: a king or rook is
//! eligible only while its home square's counter is still zero.

pub mod color;
pub mod piece;
pub mod setup;

mod display;

use common::square::Square;

use self::color::Color;
use self::piece::Piece;

/// A full 8x8 placement, row 0 = white's home rank.
pub type Layout = [[Option<(Piece, Color)>; 8]; 8];

/// What occupies a square, with off-board folded in so ray walks can use a
/// single probe.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SquareStatus {
    OffBoard,
    Empty,
    Occupied(Color),
}

/// Deep copy of the board taken before each move, for exact reversal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardSnapshot {
    cells: Layout,
    touch_counts: [[u32; 8]; 8],
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: Layout,
    touch_counts: [[u32; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; 8]; 8],
            touch_counts: [[0; 8]; 8],
        }
    }

    /// Seeds a board from an initial placement. Touch counters start at zero,
    /// which is what makes two-square pawn advances and castling available.
    pub fn from_layout(layout: Layout) -> Self {
        Board {
            cells: layout,
            touch_counts: [[0; 8]; 8],
        }
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row as usize][square.col as usize]
    }

    pub fn status(&self, square: Square) -> SquareStatus {
        if !square.is_on_board() {
            return SquareStatus::OffBoard;
        }
        match self.cells[square.row as usize][square.col as usize] {
            Some((_, color)) => SquareStatus::Occupied(color),
            None => SquareStatus::Empty,
        }
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.status(square) == SquareStatus::Empty
    }

    /// True if `square` holds exactly `piece` of `color`. Off-board squares
    /// hold nothing.
    pub fn holds(&self, square: Square, piece: Piece, color: Color) -> bool {
        self.get(square) == Some((piece, color))
    }

    /// Puts a piece on a square as part of a committed move, bumping the
    /// square's touch counter. Overwrites any capture victim.
    pub fn place(&mut self, square: Square, piece: Piece, color: Color) {
        self.set_counted(square, Some((piece, color)));
    }

    /// Empties a square as part of a committed move, bumping its counter.
    pub fn clear(&mut self, square: Square) {
        self.set_counted(square, None);
    }

    fn set_counted(&mut self, square: Square, cell: Option<(Piece, Color)>) {
        debug_assert!(square.is_on_board());
        let (row, col) = (square.row as usize, square.col as usize);
        self.cells[row][col] = cell;
        self.touch_counts[row][col] += 1;
    }

    /// Writes a square without touching its counter. Only setup and takeback
    /// restoration go through here.
    pub fn set_raw(&mut self, square: Square, cell: Option<(Piece, Color)>) {
        debug_assert!(square.is_on_board());
        self.cells[square.row as usize][square.col as usize] = cell;
    }

    pub fn touch_count(&self, square: Square) -> u32 {
        debug_assert!(square.is_on_board());
        self.touch_counts[square.row as usize][square.col as usize]
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells,
            touch_counts: self.touch_counts,
        }
    }

    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.cells = snapshot.cells;
        self.touch_counts = snapshot.touch_counts;
    }

    /// Where `color`'s king stands, if it is still on the board. Under the
    /// elimination win conditions kings really can be captured.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&square| self.holds(square, Piece::King, color))
    }

    pub fn piece_count(&self, color: Color) -> usize {
        Square::all()
            .filter(|&square| matches!(self.get(square), Some((_, c)) if c == color))
            .count()
    }

    pub fn occupied_squares(&self, color: Color) -> Vec<Square> {
        Square::all()
            .filter(|&square| matches!(self.get(square), Some((_, c)) if c == color))
            .collect()
    }

    pub fn layout(&self) -> &Layout {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_position;
    use common::square::*;

    #[test]
    fn test_place_and_clear_bump_touch_counts() {
        let mut board = Board::new();
        assert_eq!(board.touch_count(E4), 0);

        board.place(E4, Piece::Pawn, Color::White);
        assert_eq!(board.touch_count(E4), 1);
        assert_eq!(board.get(E4), Some((Piece::Pawn, Color::White)));

        board.clear(E4);
        assert_eq!(board.touch_count(E4), 2);
        assert_eq!(board.get(E4), None);
    }

    #[test]
    fn test_set_raw_leaves_touch_counts_alone() {
        let mut board = Board::new();
        board.set_raw(E4, Some((Piece::Queen, Color::Black)));
        assert_eq!(board.touch_count(E4), 0);
        assert_eq!(board.get(E4), Some((Piece::Queen, Color::Black)));
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let before = board.snapshot();

        board.place(E4, Piece::Rook, Color::White);
        board.clear(E1);
        assert_ne!(board.snapshot(), before);

        board.restore(&before);
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.touch_count(E4), 0);
        assert_eq!(board.get(E1), Some((Piece::King, Color::White)));
    }

    #[test]
    fn test_status_off_board() {
        let board = Board::new();
        assert_eq!(board.status(Square::new(-1, 0)), SquareStatus::OffBoard);
        assert_eq!(board.status(Square::new(0, 8)), SquareStatus::OffBoard);
        assert_eq!(board.status(Square::NONE), SquareStatus::OffBoard);
        assert_eq!(board.status(A1), SquareStatus::Empty);
    }

    #[test]
    fn test_king_square_and_piece_count() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            PPP.....
            ....K...
        };
        assert_eq!(board.king_square(Color::White), Some(E1));
        assert_eq!(board.king_square(Color::Black), Some(E8));
        assert_eq!(board.piece_count(Color::White), 4);
        assert_eq!(board.piece_count(Color::Black), 1);
    }
}
