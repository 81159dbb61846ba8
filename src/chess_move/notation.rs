//! Algebraic notation rendering for committed moves.

use crate::board::piece::Piece;

use super::MoveRecord;

const CAPTURE_CHAR: char = 'x';
const CHECK_CHAR: char = '+';
const CHECKMATE_CHAR: char = '#';
const EN_PASSANT_SUFFIX: &str = " e.p.";
const DRAW_STR: &str = "1/2 - 1/2";

/// Renders a record's notation. Castles render bare ("O-O"/"O-O-O"), with
/// no check or mate suffix; a stalemate replaces the whole string with the
/// draw marker.
pub fn render(record: &MoveRecord) -> String {
    if let Some(side) = record.castle() {
        return side.notation().to_string();
    }
    if record.is_stalemate() {
        return DRAW_STR.to_string();
    }

    let mut out = String::new();
    out.push_str(record.piece().to_algebraic_str());

    let (file_needed, rank_needed) = disambiguation(record);
    if file_needed && record.piece() != Piece::Pawn {
        out.push(record.from_square().file_char());
    }
    if rank_needed {
        out.push(record.from_square().rank_char());
    }

    if record.is_capture() {
        if record.piece() == Piece::Pawn {
            out.push(record.from_square().file_char());
        }
        out.push(CAPTURE_CHAR);
    }

    out.push_str(&record.to_square().to_algebraic());

    if let Some(promoted) = record.promoted() {
        out.push_str(promoted.to_algebraic_str());
    }

    if record.is_checkmate() {
        out.push(CHECKMATE_CHAR);
    } else if record.is_check() {
        out.push(CHECK_CHAR);
    }

    if record.en_passant().is_some() {
        out.push_str(EN_PASSANT_SUFFIX);
    }

    out
}

/// Whether the origin's file and/or rank must be written to tell the mover
/// apart from other same-kind pieces that could also reach the destination.
/// A contender on the same rank forces the file; one on the same file
/// forces the rank. Contenders differing in both stay ambiguous on purpose:
/// the source square's file and rank alone decide.
fn disambiguation(record: &MoveRecord) -> (bool, bool) {
    let mover = record.from_square();
    let mut file_needed = false;
    let mut rank_needed = false;
    for &other in record.contenders.iter() {
        if other.row == mover.row && other.col != mover.col {
            file_needed = true;
        } else if other.col == mover.col && other.row != mover.row {
            rank_needed = true;
        }
    }
    (file_needed, rank_needed)
}
