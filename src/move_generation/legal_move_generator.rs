//! Full legal move generation.
//!
//! Walks the side-to-move pieces, expands each into pseudo-legal candidates and
//! filters out the ones that leave the mover's king attacked. The sequence is
//! lazy so "is there any legal move" stops at the first hit.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::piece_rules::{is_legal_move, pseudo_legal_moves};

impl GameState {
    /// Legal moves for the side to move. Empty unless the game is in progress.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let side = self.whose_turn;
        let playing = self.status == GameStatus::Playing;
        self.grid
            .pieces_of(side)
            .filter(move |_| playing)
            .flat_map(move |(from, _)| pseudo_legal_moves(self, from))
            .filter(move |mv| self.is_safe_move(*mv))
    }

    #[inline]
    pub fn has_legal_move(&self) -> bool {
        self.legal_moves().next().is_some()
    }

    /// Every precondition `make_move` enforces, without mutating anything.
    pub fn check_move(&self, mv: Move) -> ChessResult<()> {
        self.validate_move(mv).map(|_| ())
    }

    /// Same checks as [`GameState::check_move`], handing back the piece that would move.
    pub(crate) fn validate_move(&self, mv: Move) -> ChessResult<Piece> {
        if self.status != GameStatus::Playing {
            return Err(ChessError::NotPlaying(self.status));
        }
        if mv.from == mv.to {
            return Err(ChessError::NullMove(mv));
        }
        let piece = self
            .grid
            .get(mv.from)
            .ok_or(ChessError::EmptySquare(mv.from))?;
        if piece.color != self.whose_turn {
            return Err(ChessError::OutOfTurn {
                square: mv.from,
                owner: piece.color,
                turn: self.whose_turn,
            });
        }
        if !is_legal_move(self, mv.from, mv.to, mv.promotion) {
            return Err(ChessError::IllegalShape {
                kind: piece.kind,
                mv,
            });
        }
        if !self.is_safe_move(mv) {
            return Err(ChessError::KingLeftInCheck(mv));
        }
        Ok(piece)
    }

    #[inline]
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.check_move(mv).is_ok()
    }
}
