//! Candidate and legal destination generation.
//!
//! `candidate_squares` produces the geometric destinations for a single
//! piece under the active movement modifier, with no regard for the mover's
//! own king. `legal_destinations` layers the self-check filter from
//! `evaluate` on top. Both take the move history because two modifiers
//! (Cooldown) and en passant depend on previous moves rather than board
//! state.

mod castling;

use smallvec::SmallVec;

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::{Board, SquareStatus};
use crate::chess_move::MoveRecord;
use crate::evaluate;
use crate::modifiers::{ModifierSet, MovementModifier};

pub use self::castling::castle_destinations;

/// Destination list for one piece. 32 inline slots covers the worst case
/// (a queen on an open board under any modifier) without spilling.
pub type SquareList = SmallVec<[Square; 32]>;

/// Touch count at which the Medusa modifier freezes a square's piece.
pub const PETRIFY_TOUCH_COUNT: u32 = 15;

/// Maximum ray length under the Shortsighted modifier.
pub(crate) const SHORTSIGHTED_RANGE: i8 = 3;

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
/// Extra knight reach under the Horsepower modifier.
pub(crate) const HORSEPOWER_JUMPS: [(i8, i8); 8] = [
    (2, 2),
    (2, -2),
    (-2, 2),
    (-2, -2),
    (2, 0),
    (-2, 0),
    (0, 2),
    (0, -2),
];

/// Legal destinations for the piece on `from`: candidates minus moves that
/// leave the mover's own king attacked. The elimination-style win
/// conditions skip the filter entirely (kings are ordinary pieces there),
/// and castling destinations were already vetted square by square during
/// generation.
pub fn legal_destinations(
    board: &Board,
    from: Square,
    modifiers: &ModifierSet,
    history: &[MoveRecord],
) -> SquareList {
    let mut candidates = candidate_squares(board, from, modifiers, history);
    if modifiers.win.ignores_self_check() {
        return candidates;
    }
    let (piece, color) = match board.get(from) {
        Some(occupant) => occupant,
        None => return candidates,
    };
    let castles: SquareList =
        if piece == Piece::King && modifiers.movement != MovementModifier::DivineBirthright {
            castling::castle_destinations(board, color, modifiers)
        } else {
            SquareList::new()
        };
    candidates.retain(|&mut to| {
        castles.contains(&to) || !evaluate::leaves_own_king_attacked(board, color, from, to, modifiers)
    });
    candidates
}

/// Geometric destinations for the piece on `from`, before self-check
/// filtering. Every returned square is on the board and is either empty or
/// holds a capturable enemy piece.
pub fn candidate_squares(
    board: &Board,
    from: Square,
    modifiers: &ModifierSet,
    history: &[MoveRecord],
) -> SquareList {
    let mut targets = SquareList::new();
    let (piece, color) = match board.get(from) {
        Some(occupant) => occupant,
        None => return targets,
    };
    let movement = modifiers.movement;

    if movement == MovementModifier::Medusa && board.touch_count(from) >= PETRIFY_TOUCH_COUNT {
        return targets;
    }
    // Cooldown rests the piece the mover touched last turn. That move sits
    // two entries back; the last entry is the opponent's reply.
    if movement == MovementModifier::Cooldown && history.len() >= 2 {
        if history[history.len() - 2].to_square() == from {
            return targets;
        }
    }

    match piece {
        Piece::Pawn => pawn_targets(board, from, color, movement, history, &mut targets),
        Piece::Knight => {
            jump_targets(board, from, color, Piece::Knight, movement, &KNIGHT_JUMPS, &mut targets);
            if movement == MovementModifier::Horsepower {
                jump_targets(
                    board,
                    from,
                    color,
                    Piece::Knight,
                    movement,
                    &HORSEPOWER_JUMPS,
                    &mut targets,
                );
            }
        }
        Piece::Rook => {
            ray_targets(board, from, color, Piece::Rook, movement, &ROOK_DIRECTIONS, &mut targets)
        }
        Piece::Bishop => ray_targets(
            board,
            from,
            color,
            Piece::Bishop,
            movement,
            &BISHOP_DIRECTIONS,
            &mut targets,
        ),
        Piece::Queen => {
            ray_targets(board, from, color, Piece::Queen, movement, &ROOK_DIRECTIONS, &mut targets);
            ray_targets(
                board,
                from,
                color,
                Piece::Queen,
                movement,
                &BISHOP_DIRECTIONS,
                &mut targets,
            );
        }
        Piece::King => {
            if movement == MovementModifier::DivineBirthright {
                // The king ranges like a queen and gives up castling.
                ray_targets(board, from, color, Piece::King, movement, &ROOK_DIRECTIONS, &mut targets);
                ray_targets(
                    board,
                    from,
                    color,
                    Piece::King,
                    movement,
                    &BISHOP_DIRECTIONS,
                    &mut targets,
                );
            } else {
                jump_targets(board, from, color, Piece::King, movement, &KING_STEPS, &mut targets);
                for castle in castling::castle_destinations(board, color, modifiers) {
                    targets.push(castle);
                }
            }
        }
    }
    targets
}

/// Whether `attacker` may capture the piece on the destination under the
/// active movement modifier. `victim` is `None` for a quiet move, which is
/// always allowed through.
fn capture_allowed(attacker: Piece, victim: Option<Piece>, movement: MovementModifier) -> bool {
    match movement {
        MovementModifier::Untouchable => {
            !(victim == Some(Piece::Queen) && attacker != Piece::Queen)
        }
        MovementModifier::RoyalPower => {
            !(attacker == Piece::Pawn && victim.is_some() && victim != Some(Piece::Pawn))
        }
        _ => true,
    }
}

fn pawn_targets(
    board: &Board,
    from: Square,
    color: Color,
    movement: MovementModifier,
    history: &[MoveRecord],
    targets: &mut SquareList,
) {
    let forward = color.forward();

    if movement == MovementModifier::Scouts {
        let mut next = from.offset(forward, 0);
        while board.is_empty(next) {
            targets.push(next);
            next = next.offset(forward, 0);
        }
    } else {
        let one = from.offset(forward, 0);
        if board.is_empty(one) {
            targets.push(one);
            // The double advance is gated on the pawn's own square never
            // having been touched, not on its rank.
            let two = from.offset(2 * forward, 0);
            if board.touch_count(from) == 0 && board.is_empty(two) {
                targets.push(two);
            }
        }
    }

    let en_passant = en_passant_targets(history);
    for dc in [-1, 1] {
        let diagonal = from.offset(forward, dc);
        let victim = match board.status(diagonal) {
            SquareStatus::Occupied(c) if c != color => board.get(diagonal).map(|(p, _)| p),
            SquareStatus::Empty if en_passant.contains(&diagonal) => Some(Piece::Pawn),
            _ => continue,
        };
        if capture_allowed(Piece::Pawn, victim, movement) {
            targets.push(diagonal);
        }
    }
}

/// Squares capturable en passant this turn: everything the last-moved pawn
/// skipped over. Under Scouts a pawn can skip several squares, and all of
/// them are valid en passant targets.
pub fn en_passant_targets(history: &[MoveRecord]) -> SmallVec<[Square; 8]> {
    let mut targets = SmallVec::new();
    if let Some(last) = history.last() {
        if last.piece() == Piece::Pawn {
            let low = last.from_square().row.min(last.to_square().row);
            let high = last.from_square().row.max(last.to_square().row);
            for row in low + 1..high {
                targets.push(Square::new(row, last.to_square().col));
            }
        }
    }
    targets
}

fn jump_targets(
    board: &Board,
    from: Square,
    color: Color,
    attacker: Piece,
    movement: MovementModifier,
    offsets: &[(i8, i8)],
    targets: &mut SquareList,
) {
    for &(dr, dc) in offsets {
        let to = from.offset(dr, dc);
        match board.status(to) {
            SquareStatus::Empty => targets.push(to),
            SquareStatus::Occupied(c) if c != color => {
                if capture_allowed(attacker, board.get(to).map(|(p, _)| p), movement) {
                    targets.push(to);
                }
            }
            _ => {}
        }
    }
}

fn ray_targets(
    board: &Board,
    from: Square,
    color: Color,
    attacker: Piece,
    movement: MovementModifier,
    directions: &[(i8, i8)],
    targets: &mut SquareList,
) {
    let range = if movement == MovementModifier::Shortsighted {
        SHORTSIGHTED_RANGE
    } else {
        8
    };
    for &(dr, dc) in directions {
        for step in 1..=range {
            let to = from.offset(dr * step, dc * step);
            match board.status(to) {
                SquareStatus::Empty => targets.push(to),
                SquareStatus::Occupied(c) if c != color => {
                    if capture_allowed(attacker, board.get(to).map(|(p, _)| p), movement) {
                        targets.push(to);
                    }
                    break;
                }
                _ => break,
            }
        }
    }
}
