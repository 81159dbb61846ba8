//! Board coordinates.
//!
//! A `Square` is a (row, col) pair with both components in `[0, 7]`. Row 0 is
//! white's home rank ("1" in algebraic notation), column 0 is the a-file.
//! `Square::NONE` is the sentinel for "no square"; it is never on the board.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static ALGEBRAIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("valid regex"));

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    /// Sentinel for "no square" (unset selection, no en passant victim, ...).
    pub const NONE: Square = Square { row: -10, col: -10 };

    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    pub fn is_none(&self) -> bool {
        *self == Square::NONE
    }

    /// The square `dr` rows and `dc` columns away. The result may be off the
    /// board; callers gate on `is_on_board`.
    pub fn offset(&self, dr: i8, dc: i8) -> Square {
        Square::new(self.row + dr, self.col + dc)
    }

    pub fn file_char(&self) -> char {
        (b'a' + self.col as u8) as char
    }

    pub fn rank_char(&self) -> char {
        (b'1' + self.row as u8) as char
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    pub fn from_algebraic(coord: &str) -> Option<Square> {
        let caps = ALGEBRAIC_RE.captures(coord)?;
        let file_char = caps[1].chars().next()?.to_ascii_lowercase();
        let rank_char = caps[2].chars().next()?;
        let col = (file_char as u8 - b'a') as i8;
        let row = (rank_char as u8 - b'1') as i8;
        Some(Square::new(row, col))
    }

    /// Index into a row-major 64-element array.
    pub fn index(&self) -> usize {
        debug_assert!(self.is_on_board());
        (self.row * 8 + self.col) as usize
    }

    pub fn from_index(index: usize) -> Square {
        assert!(index < 64);
        Square::new((index / 8) as i8, (index % 8) as i8)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.to_algebraic())
        } else {
            write!(f, "-")
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.to_algebraic())
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}

macro_rules! square_consts {
    ($($name:ident => ($row:expr, $col:expr)),* $(,)?) => {
        $(pub const $name: Square = Square::new($row, $col);)*
    };
}

square_consts! {
    A1 => (0, 0), B1 => (0, 1), C1 => (0, 2), D1 => (0, 3),
    E1 => (0, 4), F1 => (0, 5), G1 => (0, 6), H1 => (0, 7),
    A2 => (1, 0), B2 => (1, 1), C2 => (1, 2), D2 => (1, 3),
    E2 => (1, 4), F2 => (1, 5), G2 => (1, 6), H2 => (1, 7),
    A3 => (2, 0), B3 => (2, 1), C3 => (2, 2), D3 => (2, 3),
    E3 => (2, 4), F3 => (2, 5), G3 => (2, 6), H3 => (2, 7),
    A4 => (3, 0), B4 => (3, 1), C4 => (3, 2), D4 => (3, 3),
    E4 => (3, 4), F4 => (3, 5), G4 => (3, 6), H4 => (3, 7),
    A5 => (4, 0), B5 => (4, 1), C5 => (4, 2), D5 => (4, 3),
    E5 => (4, 4), F5 => (4, 5), G5 => (4, 6), H5 => (4, 7),
    A6 => (5, 0), B6 => (5, 1), C6 => (5, 2), D6 => (5, 3),
    E6 => (5, 4), F6 => (5, 5), G6 => (5, 6), H6 => (5, 7),
    A7 => (6, 0), B7 => (6, 1), C7 => (6, 2), D7 => (6, 3),
    E7 => (6, 4), F7 => (6, 5), G7 => (6, 6), H7 => (6, 7),
    A8 => (7, 0), B8 => (7, 1), C8 => (7, 2), D8 => (7, 3),
    E8 => (7, 4), F8 => (7, 5), G8 => (7, 6), H8 => (7, 7),
}
