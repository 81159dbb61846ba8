//! Committed move records.
//!
//! A `MoveRecord` captures everything about a committed move: enough to
//! render its algebraic notation and enough to reverse it exactly. The
//! board snapshot taken before the move is the reversal mechanism; no
//! incremental undo is attempted.

mod notation;

use std::fmt;

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::BoardSnapshot;

/// Which side the king castled to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn notation(&self) -> &'static str {
        match self {
            CastleSide::Kingside => "O-O",
            CastleSide::Queenside => "O-O-O",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MoveRecord {
    from: Square,
    to: Square,
    color: Color,
    piece: Piece,
    /// Piece standing on the destination square, if any. Stays `None` for
    /// en passant; `en_passant` marks that capture instead.
    captured: Option<Piece>,
    /// Origin squares of every same-kind piece of the mover's color that
    /// could also reach `to` this turn, the mover's own origin first.
    /// Notation disambiguation is derived from these.
    contenders: Vec<Square>,
    /// Square the en passant victim stood on, when this was one.
    en_passant: Option<Square>,
    castle: Option<CastleSide>,
    promoted: Option<Piece>,
    check: bool,
    checkmate: bool,
    stalemate: bool,
    notation: String,
    snapshot: BoardSnapshot,
}

impl MoveRecord {
    pub fn new(
        from: Square,
        to: Square,
        color: Color,
        piece: Piece,
        captured: Option<Piece>,
        contenders: Vec<Square>,
        snapshot: BoardSnapshot,
    ) -> Self {
        MoveRecord {
            from,
            to,
            color,
            piece,
            captured,
            contenders,
            en_passant: None,
            castle: None,
            promoted: None,
            check: false,
            checkmate: false,
            stalemate: false,
            notation: String::new(),
            snapshot,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from
    }

    pub fn to_square(&self) -> Square {
        self.to
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn castle(&self) -> Option<CastleSide> {
        self.castle
    }

    pub fn promoted(&self) -> Option<Piece> {
        self.promoted
    }

    pub fn is_check(&self) -> bool {
        self.check
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// True for a regular capture or an en passant capture.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some() || self.en_passant.is_some()
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn set_en_passant(&mut self, victim: Square) {
        self.en_passant = Some(victim);
    }

    pub fn set_castle(&mut self, side: CastleSide) {
        self.castle = Some(side);
    }

    pub fn set_promotion(&mut self, piece: Piece) {
        self.promoted = Some(piece);
    }

    pub fn mark_check(&mut self) {
        self.check = true;
    }

    /// Checkmate implies the check marker is dropped; notation shows "#"
    /// alone, never "+#".
    pub fn mark_checkmate(&mut self) {
        self.check = false;
        self.checkmate = true;
    }

    pub fn mark_stalemate(&mut self) {
        self.stalemate = true;
    }

    /// Renders the notation string from the record's final flags. Called
    /// once, after check/checkmate/stalemate evaluation has settled.
    pub fn render_notation(&mut self) {
        self.notation = notation::render(self);
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.notation.is_empty() {
            write!(f, "{}{}", self.from, self.to)
        } else {
            write!(f, "{}", self.notation)
        }
    }
}
