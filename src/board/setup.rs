//! Initial piece placement for each setup modifier.
//!
//! Placement is the only randomized part of the engine. Callers pass the RNG
//! so a host can seed it; in a two-peer match only one peer generates the
//! layout and ships it to the other in a `net::SetupMessage`.

use rand::seq::SliceRandom;
use rand::Rng;

use super::color::Color;
use super::piece::Piece;
use super::Layout;
use crate::modifiers::SetupModifier;

const CLASSIC_BACK_ROW: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

const KING_COL: usize = 4;

pub fn initial_layout<R: Rng>(modifier: SetupModifier, rng: &mut R) -> Layout {
    let mut layout: Layout = [[None; 8]; 8];
    match modifier {
        SetupModifier::Normal => {
            mirrored_fill(&mut layout, 1, 6, Piece::Pawn, false);
            for (col, &piece) in CLASSIC_BACK_ROW.iter().enumerate() {
                mirrored_place(&mut layout, 0, 7, col, piece);
            }
        }
        SetupModifier::Scrambled => {
            mirrored_fill(&mut layout, 1, 6, Piece::Pawn, false);
            let mut back_row = vec![
                Piece::Rook,
                Piece::Rook,
                Piece::Knight,
                Piece::Knight,
                Piece::Bishop,
                Piece::Bishop,
                Piece::Queen,
                Piece::King,
            ];
            back_row.shuffle(rng);
            for (col, &piece) in back_row.iter().enumerate() {
                mirrored_place(&mut layout, 0, 7, col, piece);
            }
        }
        SetupModifier::ScrambledTwo => {
            let mut pieces = vec![
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Pawn,
                Piece::Rook,
                Piece::Rook,
                Piece::Knight,
                Piece::Knight,
                Piece::Bishop,
                Piece::Bishop,
                Piece::Queen,
                Piece::King,
            ];
            pieces.shuffle(rng);
            for col in 0..8 {
                let mut back = pieces[2 * col];
                let mut front = pieces[2 * col + 1];
                // Keep the king off the front row so no game opens in check.
                if front == Piece::King {
                    std::mem::swap(&mut back, &mut front);
                }
                mirrored_place(&mut layout, 0, 7, col, back);
                mirrored_place(&mut layout, 1, 6, col, front);
            }
        }
        SetupModifier::Random => {
            mirrored_fill(&mut layout, 1, 6, Piece::Pawn, false);
            let king_col = rng.gen_range(0..8);
            for col in 0..8 {
                let piece = if col == king_col {
                    Piece::King
                } else {
                    random_royal(rng)
                };
                mirrored_place(&mut layout, 0, 7, col, piece);
            }
        }
        SetupModifier::RandomTwo => {
            let king_col = rng.gen_range(0..8);
            for col in 0..8 {
                let back = if col == king_col {
                    Piece::King
                } else {
                    random_any(rng)
                };
                mirrored_place(&mut layout, 0, 7, col, back);
                mirrored_place(&mut layout, 1, 6, col, random_any(rng));
            }
        }
        SetupModifier::ArmyOfPawns => army(&mut layout, Piece::Pawn),
        SetupModifier::ArmyOfRooks => army(&mut layout, Piece::Rook),
        SetupModifier::ArmyOfKnights => army(&mut layout, Piece::Knight),
        SetupModifier::ArmyOfBishops => army(&mut layout, Piece::Bishop),
        SetupModifier::ArmyOfQueens => army(&mut layout, Piece::Queen),
        SetupModifier::Reversed => {
            mirrored_fill(&mut layout, 0, 7, Piece::Pawn, false);
            for (col, &piece) in CLASSIC_BACK_ROW.iter().enumerate() {
                mirrored_place(&mut layout, 1, 6, col, piece);
            }
        }
    }
    layout
}

/// Back row replaced with `piece`, except the e-file king.
fn army(layout: &mut Layout, piece: Piece) {
    mirrored_fill(layout, 1, 6, Piece::Pawn, false);
    mirrored_fill(layout, 0, 7, piece, true);
    mirrored_place(layout, 0, 7, KING_COL, Piece::King);
}

fn mirrored_place(layout: &mut Layout, white_row: usize, black_row: usize, col: usize, piece: Piece) {
    layout[white_row][col] = Some((piece, Color::White));
    layout[black_row][col] = Some((piece, Color::Black));
}

fn mirrored_fill(
    layout: &mut Layout,
    white_row: usize,
    black_row: usize,
    piece: Piece,
    skip_king_col: bool,
) {
    for col in 0..8 {
        if skip_king_col && col == KING_COL {
            continue;
        }
        mirrored_place(layout, white_row, black_row, col, piece);
    }
}

/// Rook, bishop, knight or queen with equal probability.
fn random_royal<R: Rng>(rng: &mut R) -> Piece {
    match rng.gen_range(0..4) {
        0 => Piece::Rook,
        1 => Piece::Bishop,
        2 => Piece::Knight,
        _ => Piece::Queen,
    }
}

/// Any non-king piece with equal probability.
fn random_any<R: Rng>(rng: &mut R) -> Piece {
    match rng.gen_range(0..5) {
        0 => Piece::Rook,
        1 => Piece::Bishop,
        2 => Piece::Knight,
        3 => Piece::Queen,
        _ => Piece::Pawn,
    }
}
