use super::color::Color;
use super::piece::Piece;
use super::Board;
use std::fmt;

fn to_board_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..8 {
                match self.layout()[row][col] {
                    Some((piece, color)) => write!(f, "{} ", to_board_char(piece, color))?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Builds a `Board` from a literal drawn from white's perspective, so the
/// bottom-left token is a1. Uppercase is white, lowercase black, `.` empty.
#[macro_export]
macro_rules! board_position {
    ($($piece:tt)*) => {{
        let mut board = Board::new();
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = match c {
                    'K' => (Piece::King, Color::White),
                    'Q' => (Piece::Queen, Color::White),
                    'R' => (Piece::Rook, Color::White),
                    'B' => (Piece::Bishop, Color::White),
                    'N' => (Piece::Knight, Color::White),
                    'P' => (Piece::Pawn, Color::White),
                    'k' => (Piece::King, Color::Black),
                    'q' => (Piece::Queen, Color::Black),
                    'r' => (Piece::Rook, Color::Black),
                    'b' => (Piece::Bishop, Color::Black),
                    'n' => (Piece::Knight, Color::Black),
                    'p' => (Piece::Pawn, Color::Black),
                    _ => panic!("Invalid character in chess position"),
                };
                // The literal reads top-down from white's perspective, so the
                // first row of tokens is rank 8. Transpose back to row/col.
                let row = (7 - i / 8) as i8;
                let col = (i % 8) as i8;
                board.set_raw(common::square::Square::new(row, col), Some((piece, color)));
            }
        }
        board
    }};
}
