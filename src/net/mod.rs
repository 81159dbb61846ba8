//! Peer-to-peer message shapes.
//!
//! Matches are mirrored between two peers: one rolls the modifiers and
//! layout and ships a `SetupMessage`, then each committed move crosses the
//! wire as a `MoveMessage` for `Game::apply_remote_move`. The structs here
//! define the numeric encodings; framing and transport are the host
//! application's concern.

use thiserror::Error;

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Layout;
use crate::chess_move::MoveRecord;
use crate::modifiers::ModifierSet;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WireError {
    #[error("invalid piece code {0}")]
    InvalidPieceCode(u8),
    #[error("invalid promotion code {0}")]
    InvalidPromotionCode(u8),
    #[error("invalid modifier index")]
    InvalidModifierIndex,
    #[error("invalid intent code {0}")]
    InvalidIntentCode(u8),
}

/// Code for an empty board cell.
const EMPTY_CELL: u8 = 0;
/// A promotion slot carrying no promotion.
const NO_PROMOTION: u8 = 4;

/// Rolled modifiers plus the full initial placement, sent once by the peer
/// that created the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupMessage {
    pub setup: u8,
    pub movement: u8,
    pub win: u8,
    /// Cell codes in row-major order, a1 first.
    pub cells: [u8; 64],
}

impl SetupMessage {
    pub fn new(modifiers: &ModifierSet, layout: &Layout) -> Self {
        let (setup, movement, win) = modifiers.indices();
        let mut cells = [EMPTY_CELL; 64];
        for square in Square::all() {
            cells[square.index()] = encode_cell(layout[square.row as usize][square.col as usize]);
        }
        SetupMessage {
            setup,
            movement,
            win,
            cells,
        }
    }

    pub fn modifier_set(&self) -> Result<ModifierSet, WireError> {
        ModifierSet::from_indices(self.setup, self.movement, self.win)
            .ok_or(WireError::InvalidModifierIndex)
    }

    pub fn layout(&self) -> Result<Layout, WireError> {
        let mut layout: Layout = [[None; 8]; 8];
        for square in Square::all() {
            layout[square.row as usize][square.col as usize] =
                decode_cell(self.cells[square.index()])?;
        }
        Ok(layout)
    }
}

/// One committed move, including the promotion choice when the move ended
/// a promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveMessage {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
    pub mover: Color,
}

impl MoveMessage {
    pub fn from_record(record: &MoveRecord) -> Self {
        MoveMessage {
            from: record.from_square(),
            to: record.to_square(),
            promotion: record.promoted(),
            mover: record.color(),
        }
    }

    pub fn promotion_code(&self) -> u8 {
        match self.promotion {
            Some(Piece::Knight) => 0,
            Some(Piece::Bishop) => 1,
            Some(Piece::Rook) => 2,
            Some(Piece::Queen) => 3,
            _ => NO_PROMOTION,
        }
    }

    pub fn decode_promotion(code: u8) -> Result<Option<Piece>, WireError> {
        match code {
            0 => Ok(Some(Piece::Knight)),
            1 => Ok(Some(Piece::Bishop)),
            2 => Ok(Some(Piece::Rook)),
            3 => Ok(Some(Piece::Queen)),
            NO_PROMOTION => Ok(None),
            other => Err(WireError::InvalidPromotionCode(other)),
        }
    }
}

/// Out-of-band requests a peer can raise during or after a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Rematch,
    Takeback,
    Quit,
}

impl Intent {
    pub fn code(&self) -> u8 {
        match self {
            Intent::Rematch => 1,
            Intent::Takeback => 2,
            Intent::Quit => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Intent, WireError> {
        match code {
            1 => Ok(Intent::Rematch),
            2 => Ok(Intent::Takeback),
            3 => Ok(Intent::Quit),
            other => Err(WireError::InvalidIntentCode(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentMessage {
    pub sender: Color,
    pub intent: Intent,
}

fn encode_cell(cell: Option<(Piece, Color)>) -> u8 {
    match cell {
        None => EMPTY_CELL,
        Some((piece, color)) => {
            let base = match piece {
                Piece::Pawn => 1,
                Piece::Rook => 2,
                Piece::Knight => 3,
                Piece::Bishop => 4,
                Piece::Queen => 5,
                Piece::King => 6,
            };
            match color {
                Color::White => base,
                Color::Black => base + 6,
            }
        }
    }
}

fn decode_cell(code: u8) -> Result<Option<(Piece, Color)>, WireError> {
    if code == EMPTY_CELL {
        return Ok(None);
    }
    if code > 12 {
        return Err(WireError::InvalidPieceCode(code));
    }
    let color = if code <= 6 { Color::White } else { Color::Black };
    let piece = match (code - 1) % 6 {
        0 => Piece::Pawn,
        1 => Piece::Rook,
        2 => Piece::Knight,
        3 => Piece::Bishop,
        4 => Piece::Queen,
        _ => Piece::King,
    };
    Ok(Some((piece, color)))
}
