use std::fmt;

/// Piece kinds, ordered by the Piece Game upgrade ladder
/// (a capture upgrades the capturer one step to the right; Queen and King
/// are unaffected).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// The kinds a pawn may promote to.
pub const PAWN_PROMOTIONS: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

impl Piece {
    /// Algebraic notation letter. Pawns have none, knights are "N".
    pub fn to_algebraic_str(&self) -> &'static str {
        match self {
            Piece::Pawn => "",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
            Piece::King => "K",
        }
    }

    /// One step up the upgrade ladder, for the Piece Game modifier.
    pub fn upgraded(&self) -> Piece {
        match self {
            Piece::Pawn => Piece::Knight,
            Piece::Knight => Piece::Bishop,
            Piece::Bishop => Piece::Rook,
            Piece::Rook => Piece::Queen,
            Piece::Queen => Piece::Queen,
            Piece::King => Piece::King,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "pawn",
            Piece::Knight => "knight",
            Piece::Bishop => "bishop",
            Piece::Rook => "rook",
            Piece::Queen => "queen",
            Piece::King => "king",
        };
        write!(f, "{}", name)
    }
}
