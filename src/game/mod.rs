//! Match state machine.
//!
//! `Game` owns the board, the move history, the cached legal-move map for
//! the side to move, and the match status. Every mutation goes through a
//! request method that validates against the cached map first, so a
//! committed move is legal by construction. Turn handover recomputes the
//! map and runs the win-condition evaluation before control flips.

pub mod error;

use std::fmt;

use common::square::Square;

use crate::board::color::Color;
use crate::board::piece::{Piece, PAWN_PROMOTIONS};
use crate::board::setup;
use crate::board::{Board, Layout};
use crate::chess_move::{CastleSide, MoveRecord};
use crate::evaluate::{self, Outcome};
use crate::modifiers::{ModifierSet, MovementModifier};
use crate::move_generation::{self, SquareList};
use crate::net::MoveMessage;

use self::error::GameError;

/// Where a match stands. The last four are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchStatus {
    WhiteToMove,
    BlackToMove,
    WhitePromotionPending,
    BlackPromotionPending,
    WhiteWon,
    BlackWon,
    Stalemate,
    Aborted,
}

impl MatchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MatchStatus::WhiteWon | MatchStatus::BlackWon | MatchStatus::Stalemate | MatchStatus::Aborted
        )
    }

    /// The color whose move request would be accepted right now.
    pub fn color_to_move(&self) -> Option<Color> {
        match self {
            MatchStatus::WhiteToMove => Some(Color::White),
            MatchStatus::BlackToMove => Some(Color::Black),
            _ => None,
        }
    }

    /// The color that owes a promotion choice right now.
    pub fn promoting_color(&self) -> Option<Color> {
        match self {
            MatchStatus::WhitePromotionPending => Some(Color::White),
            MatchStatus::BlackPromotionPending => Some(Color::Black),
            _ => None,
        }
    }

    fn to_move(color: Color) -> MatchStatus {
        match color {
            Color::White => MatchStatus::WhiteToMove,
            Color::Black => MatchStatus::BlackToMove,
        }
    }

    fn promotion_pending(color: Color) -> MatchStatus {
        match color {
            Color::White => MatchStatus::WhitePromotionPending,
            Color::Black => MatchStatus::BlackPromotionPending,
        }
    }

    fn won(color: Color) -> MatchStatus {
        match color {
            Color::White => MatchStatus::WhiteWon,
            Color::Black => MatchStatus::BlackWon,
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::WhiteToMove => "white to move",
            MatchStatus::BlackToMove => "black to move",
            MatchStatus::WhitePromotionPending => "white must choose a promotion",
            MatchStatus::BlackPromotionPending => "black must choose a promotion",
            MatchStatus::WhiteWon => "white won",
            MatchStatus::BlackWon => "black won",
            MatchStatus::Stalemate => "stalemate",
            MatchStatus::Aborted => "aborted",
        };
        write!(f, "{}", s)
    }
}

/// Presentation hint for one square, given an optional selected origin.
/// Selection and its candidate destinations paint over the check marker.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Highlight {
    Idle,
    Selected,
    CandidateDestination,
    KingInCheck,
}

pub struct Game {
    board: Board,
    modifiers: ModifierSet,
    history: Vec<MoveRecord>,
    /// Legal destinations for the side to move, indexed by origin square.
    /// Squares holding no piece of that color map to an empty list.
    legal_moves: Vec<SquareList>,
    check_square: Option<Square>,
    status: MatchStatus,
}

impl Game {
    /// Starts a match, rolling the initial placement for the setup
    /// modifier. White moves first.
    pub fn new(modifiers: ModifierSet) -> Self {
        let layout = setup::initial_layout(modifiers.setup, &mut rand::thread_rng());
        Self::from_layout(modifiers, layout)
    }

    /// Starts a match from an explicit placement, as when the layout
    /// arrived from the remote peer that rolled it.
    pub fn from_layout(modifiers: ModifierSet, layout: Layout) -> Self {
        let mut game = Game {
            board: Board::from_layout(layout),
            modifiers,
            history: Vec::new(),
            legal_moves: vec![SquareList::new(); 64],
            check_square: None,
            status: MatchStatus::WhiteToMove,
        };
        game.begin_turn(Color::White, false);
        log::info!(
            "match started: {} / {} / {}",
            game.modifiers.setup,
            game.modifiers.movement,
            game.modifiers.win
        );
        game
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// The square of the king currently in check, when check is tracked.
    pub fn check_square(&self) -> Option<Square> {
        self.check_square
    }

    /// Legal destinations for the piece on `square` this turn.
    pub fn legal_destinations(&self, square: Square) -> &SquareList {
        &self.legal_moves[square.index()]
    }

    /// Moves a piece for the side to move. The destination must be in the
    /// piece's legal set; anything else is rejected without mutating state.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<(), GameError> {
        let color = self.status.color_to_move().ok_or(GameError::WrongTurn)?;
        let (piece, owner) = self.board.get(from).ok_or(GameError::IllegalMove)?;
        if owner != color {
            return Err(GameError::WrongTurn);
        }
        if !self.legal_moves[from.index()].contains(&to) {
            return Err(GameError::IllegalMove);
        }
        self.commit(from, to, piece, color);
        Ok(())
    }

    /// Completes a pending promotion. Only knight, bishop, rook and queen
    /// are accepted.
    pub fn request_promotion(&mut self, piece: Piece) -> Result<(), GameError> {
        let color = self.status.promoting_color().ok_or(GameError::InvalidPromotion)?;
        if !PAWN_PROMOTIONS.contains(&piece) {
            return Err(GameError::InvalidPromotion);
        }
        let to = match self.history.last() {
            Some(record) => record.to_square(),
            None => return Err(GameError::InvalidPromotion),
        };
        self.board.place(to, piece, color);
        if let Some(record) = self.history.last_mut() {
            record.set_promotion(piece);
        }
        self.begin_turn(color.opposite(), true);
        Ok(())
    }

    /// Reverses the most recent move, restoring board, counters and turn
    /// exactly. Available until a match ends in stalemate or abort.
    pub fn request_takeback(&mut self) -> Result<(), GameError> {
        if matches!(self.status, MatchStatus::Stalemate | MatchStatus::Aborted) {
            return Err(GameError::TakebackUnavailable);
        }
        let record = self.history.pop().ok_or(GameError::TakebackUnavailable)?;
        self.board.restore(record.snapshot());
        let mover = record.color();
        log::debug!("{} took back {}", mover, record);
        self.begin_turn(mover, false);
        Ok(())
    }

    /// Throws the current match away and starts over with fresh modifiers.
    pub fn request_restart(&mut self, modifiers: ModifierSet) {
        *self = Game::new(modifiers);
    }

    /// Freezes the match. Nothing mutates a board after this.
    pub fn request_abort(&mut self) {
        self.status = MatchStatus::Aborted;
        log::info!("match aborted");
    }

    /// Applies a move received from the remote peer. Any disagreement with
    /// the local position aborts the match rather than applying a move the
    /// local rules consider illegal.
    pub fn apply_remote_move(&mut self, message: &MoveMessage) -> Result<(), GameError> {
        if self.status.color_to_move() != Some(message.mover) {
            self.request_abort();
            return Err(GameError::InconsistentRemoteState);
        }
        if self.request_move(message.from, message.to).is_err() {
            self.request_abort();
            return Err(GameError::InconsistentRemoteState);
        }
        match (self.status.promoting_color(), message.promotion) {
            (Some(_), Some(piece)) => {
                if self.request_promotion(piece).is_err() {
                    self.request_abort();
                    return Err(GameError::InconsistentRemoteState);
                }
            }
            (None, None) => {}
            _ => {
                self.request_abort();
                return Err(GameError::InconsistentRemoteState);
            }
        }
        Ok(())
    }

    /// Presentation state for one square given the current selection.
    pub fn highlight(&self, square: Square, selected: Option<Square>) -> Highlight {
        if selected == Some(square) {
            return Highlight::Selected;
        }
        if let Some(origin) = selected {
            if self.legal_moves[origin.index()].contains(&square) {
                return Highlight::CandidateDestination;
            }
        }
        if self.check_square == Some(square) {
            return Highlight::KingInCheck;
        }
        Highlight::Idle
    }

    fn commit(&mut self, from: Square, to: Square, piece: Piece, color: Color) {
        let snapshot = self.board.snapshot();
        let captured = self.board.get(to).map(|(p, _)| p);
        let contenders = self.contenders(from, to, piece);
        let mut record = MoveRecord::new(from, to, color, piece, captured, contenders, snapshot);

        if piece == Piece::King && self.modifiers.movement != MovementModifier::DivineBirthright {
            self.relocate_castle_rook(&mut record, from, to, color);
        }

        // En passant: a pawn landing diagonally on an empty square took in
        // passing. The victim is the nearest enemy pawn behind the landing
        // square (under Scouts it may be several squares behind).
        let mut took_piece = captured.is_some();
        if piece == Piece::Pawn && captured.is_none() && from.col != to.col {
            let back = -color.forward();
            let mut victim = to.offset(back, 0);
            while victim.is_on_board() && !self.board.holds(victim, Piece::Pawn, color.opposite()) {
                victim = victim.offset(back, 0);
            }
            if victim.is_on_board() {
                self.board.clear(victim);
                record.set_en_passant(victim);
                took_piece = true;
            }
        }

        // Capture side effects resolve as the mover lands.
        if self.modifiers.movement == MovementModifier::Duel && took_piece && piece != Piece::King {
            self.board.clear(to);
        } else if self.modifiers.movement == MovementModifier::PieceGame && took_piece {
            self.board.place(to, piece.upgraded(), color);
        } else {
            self.board.place(to, piece, color);
        }
        self.board.clear(from);

        self.history.push(record);

        if piece == Piece::Pawn && to.row == color.promotion_row() {
            self.status = MatchStatus::promotion_pending(color);
            log::debug!("{} pawn reached {}, awaiting promotion", color, to);
            return;
        }
        self.begin_turn(color.opposite(), true);
    }

    /// Origins of every same-kind piece of the mover's color that could
    /// also reach `to` this turn, the mover first. Feeds notation
    /// disambiguation.
    fn contenders(&self, from: Square, to: Square, piece: Piece) -> Vec<Square> {
        let mut contenders = vec![from];
        for square in Square::all() {
            if square == from {
                continue;
            }
            if let Some((kind, _)) = self.board.get(square) {
                if kind == piece && self.legal_moves[square.index()].contains(&to) {
                    contenders.push(square);
                }
            }
        }
        contenders
    }

    /// A king stepping two columns from its home square can only be a
    /// generated castle; bring the rook across. Under Divine Birthright the
    /// caller skips this, since there the king covers such spans by ray.
    fn relocate_castle_rook(&mut self, record: &mut MoveRecord, from: Square, to: Square, color: Color) {
        let row = color.home_row();
        if from != Square::new(row, 4) {
            return;
        }
        if to == Square::new(row, 2) {
            self.board.clear(Square::new(row, 0));
            self.board.place(Square::new(row, 3), Piece::Rook, color);
            record.set_castle(CastleSide::Queenside);
        } else if to == Square::new(row, 6) {
            self.board.clear(Square::new(row, 7));
            self.board.place(Square::new(row, 5), Piece::Rook, color);
            record.set_castle(CastleSide::Kingside);
        }
    }

    /// Hands the turn to `next`: recomputes the legal map, evaluates check
    /// and win conditions, stamps the just-committed record, and settles
    /// the status. `render` is false when re-entering a restored position,
    /// where the record already carries its notation.
    fn begin_turn(&mut self, next: Color, render: bool) {
        self.compute_legal_moves(next);
        let has_moves = self.legal_moves.iter().any(|list| !list.is_empty());
        let eval = evaluate::evaluate_turn(&self.board, &self.modifiers, next, has_moves, &self.history);
        self.check_square = eval.check_square;
        if let Some(record) = self.history.last_mut() {
            if eval.mark_check {
                record.mark_check();
            }
            if eval.mark_checkmate {
                record.mark_checkmate();
            }
            if eval.mark_stalemate {
                record.mark_stalemate();
            }
            if render {
                record.render_notation();
                log::debug!("{} played {}", record.color(), record.notation());
            }
        }
        self.status = match eval.outcome {
            Some(Outcome::Win(color)) => MatchStatus::won(color),
            Some(Outcome::Stalemate) => MatchStatus::Stalemate,
            None => MatchStatus::to_move(next),
        };
    }

    fn compute_legal_moves(&mut self, color: Color) {
        for square in Square::all() {
            self.legal_moves[square.index()] = match self.board.get(square) {
                Some((_, c)) if c == color => move_generation::legal_destinations(
                    &self.board,
                    square,
                    &self.modifiers,
                    &self.history,
                ),
                _ => SquareList::new(),
            };
        }
    }
}
