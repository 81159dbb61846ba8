//! Attack detection, the self-check filter, and end-of-turn evaluation.
//!
//! Attack detection honors the movement modifiers that change piece
//! geometry (Horsepower, Shortsighted, Divine Birthright) but not the ones
//! that merely restrict captures (Untouchable, Royal Power) or availability
//! (Medusa, Cooldown): a petrified rook still gives check.

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::{Board, SquareStatus};
use crate::chess_move::MoveRecord;
use crate::modifiers::{ModifierSet, MovementModifier, WinModifier};
use crate::move_generation::{
    BISHOP_DIRECTIONS, HORSEPOWER_JUMPS, KING_STEPS, KNIGHT_JUMPS, ROOK_DIRECTIONS,
    SHORTSIGHTED_RANGE,
};

/// Half-move count at which a Survival match is decided on material.
pub const SURVIVAL_HALF_MOVE_LIMIT: usize = 60;

/// How a finished match ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Win(Color),
    Stalemate,
}

/// What the end-of-turn evaluation decided: flags for the just-committed
/// move's record, the square to highlight if the side to move is in check,
/// and the match outcome if the game just ended.
#[derive(Default, Debug)]
pub struct TurnEvaluation {
    pub check_square: Option<Square>,
    pub mark_check: bool,
    pub mark_checkmate: bool,
    pub mark_stalemate: bool,
    pub outcome: Option<Outcome>,
}

/// True if any piece of `by` attacks `square` on this board.
pub fn is_attacked(board: &Board, square: Square, by: Color, modifiers: &ModifierSet) -> bool {
    let movement = modifiers.movement;

    // Pawns attack along their own forward diagonals, so look backwards.
    let back = -by.forward();
    for dc in [-1, 1] {
        if board.holds(square.offset(back, dc), Piece::Pawn, by) {
            return true;
        }
    }

    for &(dr, dc) in KNIGHT_JUMPS.iter() {
        if board.holds(square.offset(dr, dc), Piece::Knight, by) {
            return true;
        }
    }
    if movement == MovementModifier::Horsepower {
        for &(dr, dc) in HORSEPOWER_JUMPS.iter() {
            if board.holds(square.offset(dr, dc), Piece::Knight, by) {
                return true;
            }
        }
    }

    for &(dr, dc) in KING_STEPS.iter() {
        if board.holds(square.offset(dr, dc), Piece::King, by) {
            return true;
        }
    }

    let range = if movement == MovementModifier::Shortsighted {
        SHORTSIGHTED_RANGE
    } else {
        8
    };
    // Divine Birthright turns the king into a ray attacker as well.
    let royal_rays = movement == MovementModifier::DivineBirthright;
    ray_attacker(board, square, by, range, &ROOK_DIRECTIONS, Piece::Rook, royal_rays)
        || ray_attacker(board, square, by, range, &BISHOP_DIRECTIONS, Piece::Bishop, royal_rays)
}

fn ray_attacker(
    board: &Board,
    square: Square,
    by: Color,
    range: i8,
    directions: &[(i8, i8)],
    slider: Piece,
    royal_rays: bool,
) -> bool {
    for &(dr, dc) in directions {
        for step in 1..=range {
            let probe = square.offset(dr * step, dc * step);
            match board.status(probe) {
                SquareStatus::Empty => continue,
                SquareStatus::Occupied(c) if c == by => {
                    match board.get(probe) {
                        Some((piece, _))
                            if piece == slider
                                || piece == Piece::Queen
                                || (royal_rays && piece == Piece::King) =>
                        {
                            return true
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }
    }
    false
}

/// Whether playing `from -> to` would leave `color`'s own king attacked.
/// Simulated on a scratch copy: the mover lands on `to` (or, under Duel, a
/// capture vaporizes both pieces) and `from` empties.
pub fn leaves_own_king_attacked(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    modifiers: &ModifierSet,
) -> bool {
    let mut scratch = board.clone();
    let moving = scratch.get(from);
    let duel_removes = modifiers.movement == MovementModifier::Duel
        && scratch.get(to).is_some()
        && !matches!(moving, Some((Piece::King, _)));
    scratch.set_raw(to, if duel_removes { None } else { moving });
    scratch.set_raw(from, None);
    match scratch.king_square(color) {
        Some(king) => is_attacked(&scratch, king, color.opposite(), modifiers),
        None => false,
    }
}

/// Evaluates the position after a move (or at match start) from the
/// perspective of `to_move`, the side about to play. `has_moves` is whether
/// `to_move` has any legal destination at all; `history` supplies the
/// just-committed move for the promotion and king-crossing win conditions
/// and the half-move count for Survival.
pub fn evaluate_turn(
    board: &Board,
    modifiers: &ModifierSet,
    to_move: Color,
    has_moves: bool,
    history: &[MoveRecord],
) -> TurnEvaluation {
    let mover = to_move.opposite();
    let mut eval = TurnEvaluation::default();

    if modifiers.win.ignores_self_check() {
        if board.piece_count(to_move) == 0 {
            eval.mark_checkmate = true;
            eval.outcome = Some(Outcome::Win(mover));
            return eval;
        }
        if !has_moves {
            eval.mark_stalemate = true;
            eval.outcome = Some(Outcome::Stalemate);
        }
        if modifiers.win == WinModifier::Survival && history.len() >= SURVIVAL_HALF_MOVE_LIMIT {
            let white = board.piece_count(Color::White);
            let black = board.piece_count(Color::Black);
            // Decided on raw material; no record flags, so the last move
            // keeps its plain notation.
            eval.outcome = Some(if white > black {
                Outcome::Win(Color::White)
            } else if black > white {
                Outcome::Win(Color::Black)
            } else {
                Outcome::Stalemate
            });
        }
        return eval;
    }

    let king = board.king_square(to_move);
    let checked = match king {
        Some(k) => is_attacked(board, k, mover, modifiers),
        None => false,
    };
    if checked {
        eval.check_square = king;
        eval.mark_check = true;
    }
    if !has_moves {
        if checked {
            eval.mark_checkmate = true;
            eval.outcome = Some(Outcome::Win(mover));
        } else {
            eval.mark_stalemate = true;
            eval.outcome = Some(Outcome::Stalemate);
        }
    }

    match modifiers.win {
        WinModifier::Ascension => {
            if history.last().map_or(false, |last| last.promoted().is_some()) {
                eval.mark_checkmate = true;
                eval.outcome = Some(Outcome::Win(mover));
            }
        }
        WinModifier::Escort => {
            if let Some(last) = history.last() {
                if last.piece() == Piece::King && crossed_midline(mover, last.to_square()) {
                    eval.mark_checkmate = true;
                    eval.outcome = Some(Outcome::Win(mover));
                }
            }
        }
        _ => {}
    }
    eval
}

/// True once `color`'s king stands in the opponent's half of the board.
fn crossed_midline(color: Color, square: Square) -> bool {
    match color {
        Color::White => square.row > 3,
        Color::Black => square.row < 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::board_position;
    use common::square::*;

    fn mods(movement: MovementModifier) -> ModifierSet {
        ModifierSet {
            movement,
            ..ModifierSet::STANDARD
        }
    }

    fn win(win: WinModifier) -> ModifierSet {
        ModifierSet {
            win,
            ..ModifierSet::STANDARD
        }
    }

    #[test]
    fn test_attack_detection_by_every_piece_kind() {
        let board = board_position! {
            ....k...
            ........
            ........
            ..b.....
            ........
            q...n...
            ...p....
            ....K...
        };
        let mods = ModifierSet::STANDARD;
        // Pawn on d2 covers e1, knight on e3 covers d1, bishop on c5
        // covers d4, queen on a3 covers c1. The knight also blocks the
        // bishop's long diagonal, so f2 is safe.
        assert!(is_attacked(&board, E1, Color::Black, &mods));
        assert!(is_attacked(&board, D1, Color::Black, &mods));
        assert!(is_attacked(&board, D4, Color::Black, &mods));
        assert!(!is_attacked(&board, F2, Color::Black, &mods));
        assert!(is_attacked(&board, C1, Color::Black, &mods));
        assert!(!is_attacked(&board, H4, Color::Black, &mods));
    }

    #[test]
    fn test_blocked_rays_do_not_attack() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ....r...
            ....P...
            ........
            ....K...
        };
        assert!(!is_attacked(&board, E1, Color::Black, &ModifierSet::STANDARD));
        assert!(is_attacked(&board, E3, Color::Black, &ModifierSet::STANDARD));
    }

    #[test]
    fn test_shortsighted_attacks_stop_at_three_squares() {
        // e4 is three steps from e1, the last square a shortsighted rook
        // still covers.
        let in_range = board_position! {
            ....k...
            ........
            ........
            ........
            ....r...
            ........
            ........
            ....K...
        };
        assert!(is_attacked(&in_range, E1, Color::Black, &mods(MovementModifier::Shortsighted)));

        let out_of_range = board_position! {
            ....k...
            ........
            ........
            ....r...
            ........
            ........
            ........
            ....K...
        };
        assert!(is_attacked(&out_of_range, E1, Color::Black, &ModifierSet::STANDARD));
        assert!(!is_attacked(&out_of_range, E1, Color::Black, &mods(MovementModifier::Shortsighted)));
        assert!(is_attacked(&out_of_range, E2, Color::Black, &mods(MovementModifier::Shortsighted)));
    }

    #[test]
    fn test_horsepower_extends_knight_attacks() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ....n...
            ........
            ....K...
        };
        assert!(!is_attacked(&board, E1, Color::Black, &ModifierSet::STANDARD));
        assert!(is_attacked(&board, E1, Color::Black, &mods(MovementModifier::Horsepower)));
    }

    #[test]
    fn test_divine_birthright_king_attacks_along_rays() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        assert!(!is_attacked(&board, E4, Color::Black, &ModifierSet::STANDARD));
        assert!(is_attacked(
            &board,
            E4,
            Color::Black,
            &mods(MovementModifier::DivineBirthright)
        ));
    }

    #[test]
    fn test_moving_a_pinned_piece_is_flagged() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ....r...
            ....N...
            ........
            ....K...
        };
        let mods = ModifierSet::STANDARD;
        assert!(leaves_own_king_attacked(&board, Color::White, E3, C4, &mods));
        // Capturing the pinning rook is fine.
        assert!(!leaves_own_king_attacked(&board, Color::White, E3, E4, &mods));
    }

    #[test]
    fn test_duel_capture_vaporizes_the_capturer_in_simulation() {
        // The knight could normally block the pin by capturing on e4, but
        // under Duel the capture removes the knight too, reopening the file.
        let board = board_position! {
            ....k...
            ........
            ........
            ....r...
            ....r...
            ....N...
            ........
            ....K...
        };
        assert!(!leaves_own_king_attacked(
            &board,
            Color::White,
            E3,
            E4,
            &ModifierSet::STANDARD
        ));
        assert!(leaves_own_king_attacked(
            &board,
            Color::White,
            E3,
            E4,
            &mods(MovementModifier::Duel)
        ));
    }

    #[test]
    fn test_king_moving_out_of_check_is_not_flagged() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K..r
        };
        let mods = ModifierSet::STANDARD;
        assert!(leaves_own_king_attacked(&board, Color::White, E1, D1, &mods));
        assert!(!leaves_own_king_attacked(&board, Color::White, E1, D2, &mods));
    }

    #[test]
    fn test_evaluate_marks_check() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ....R...
            ....K...
        };
        let eval = evaluate_turn(&board, &ModifierSet::STANDARD, Color::Black, true, &[]);
        assert!(eval.mark_check);
        assert_eq!(eval.check_square, Some(E8));
        assert!(eval.outcome.is_none());
    }

    #[test]
    fn test_evaluate_checkmate_and_stalemate() {
        let board = Board::new();
        let mods = ModifierSet::STANDARD;
        // The board contents are irrelevant here; has_moves and the check
        // state drive the verdict.
        let checked = board_position! {
            ....k...
            ....R...
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let eval = evaluate_turn(&checked, &mods, Color::Black, false, &[]);
        assert!(eval.mark_checkmate);
        assert_eq!(eval.outcome, Some(Outcome::Win(Color::White)));

        let eval = evaluate_turn(&board, &mods, Color::Black, false, &[]);
        assert!(eval.mark_stalemate);
        assert_eq!(eval.outcome, Some(Outcome::Stalemate));
    }

    #[test]
    fn test_elimination_win_on_zero_pieces_without_check_tracking() {
        let board = board_position! {
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let eval = evaluate_turn(&board, &win(WinModifier::Elimination), Color::Black, false, &[]);
        assert_eq!(eval.outcome, Some(Outcome::Win(Color::White)));
        assert!(eval.mark_checkmate);
        assert!(eval.check_square.is_none());
    }

    #[test]
    fn test_elimination_never_marks_check() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ....R...
            ....K...
        };
        let eval = evaluate_turn(&board, &win(WinModifier::Elimination), Color::Black, true, &[]);
        assert!(!eval.mark_check);
        assert!(eval.check_square.is_none());
        assert!(eval.outcome.is_none());
    }

    #[test]
    fn test_survival_decides_on_material_at_the_half_move_limit() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ...PP...
            ....K...
        };
        let record = MoveRecord::new(
            E8,
            E8,
            Color::Black,
            Piece::King,
            None,
            vec![E8],
            board.snapshot(),
        );
        let history: Vec<MoveRecord> = (0..SURVIVAL_HALF_MOVE_LIMIT).map(|_| record.clone()).collect();
        let eval = evaluate_turn(&board, &win(WinModifier::Survival), Color::Black, true, &history);
        assert_eq!(eval.outcome, Some(Outcome::Win(Color::White)));

        let short = &history[..SURVIVAL_HALF_MOVE_LIMIT - 1];
        let eval = evaluate_turn(&board, &win(WinModifier::Survival), Color::Black, true, short);
        assert!(eval.outcome.is_none());
    }

    #[test]
    fn test_survival_equal_material_is_a_draw() {
        let board = board_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let record = MoveRecord::new(
            E8,
            E8,
            Color::Black,
            Piece::King,
            None,
            vec![E8],
            board.snapshot(),
        );
        let history: Vec<MoveRecord> = (0..SURVIVAL_HALF_MOVE_LIMIT).map(|_| record.clone()).collect();
        let eval = evaluate_turn(&board, &win(WinModifier::Survival), Color::White, true, &history);
        assert_eq!(eval.outcome, Some(Outcome::Stalemate));
    }

    #[test]
    fn test_ascension_win_on_promotion() {
        let board = board_position! {
            ....Q...
            ........
            ....k...
            ........
            ........
            ........
            ........
            ....K...
        };
        let mut record = MoveRecord::new(
            E7,
            E8,
            Color::White,
            Piece::Pawn,
            None,
            vec![E7],
            board.snapshot(),
        );
        record.set_promotion(Piece::Queen);
        let history = vec![record];
        let eval = evaluate_turn(&board, &win(WinModifier::Ascension), Color::Black, true, &history);
        assert_eq!(eval.outcome, Some(Outcome::Win(Color::White)));
        assert!(eval.mark_checkmate);
    }

    #[test]
    fn test_escort_win_when_the_king_crosses_the_midline() {
        let board = board_position! {
            ....k...
            ........
            ........
            ....K...
            ........
            ........
            ........
            ........
        };
        let record = MoveRecord::new(
            E4,
            E5,
            Color::White,
            Piece::King,
            None,
            vec![E4],
            board.snapshot(),
        );
        let history = vec![record];
        let eval = evaluate_turn(&board, &win(WinModifier::Escort), Color::Black, true, &history);
        assert_eq!(eval.outcome, Some(Outcome::Win(Color::White)));

        let record = MoveRecord::new(
            E3,
            E4,
            Color::White,
            Piece::King,
            None,
            vec![E3],
            board.snapshot(),
        );
        let history = vec![record];
        let eval = evaluate_turn(&board, &win(WinModifier::Escort), Color::Black, true, &history);
        assert!(eval.outcome.is_none());
    }
}
