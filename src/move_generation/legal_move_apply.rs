//! Move engine: commit, promote and undo.
//!
//! Every entry point validates first and only then mutates, so a rejected call
//! leaves the board exactly as it was. Undo replays the per-ply logs in reverse
//! to restore the previous position bit for bit.

use tracing::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::piece_rules::{apply_side_effects, plan_side_effect};

impl GameState {
    /// Applies `mv` for the side to move.
    pub fn try_make_move(&mut self, mv: Move) -> ChessResult<()> {
        let piece = self.validate_move(mv).inspect_err(|err| {
            debug!(%mv, %err, "move rejected");
        })?;
        self.commit_move(piece, mv);
        Ok(())
    }

    #[inline]
    pub fn make_move(&mut self, mv: Move) -> bool {
        self.try_make_move(mv).is_ok()
    }

    fn commit_move(&mut self, piece: Piece, mv: Move) {
        let ply = self.history.len();
        let effect = plan_side_effect(self, piece, mv);

        self.last_double_step = None;
        if let Some(captured) = self.grid.relocate(mv.from, mv.to) {
            self.captured_at.insert(ply, captured);
            self.piece_count -= 1;
        }
        apply_side_effects(self, piece, mv, effect, ply);
        self.history.push(mv);

        if self.pending_promotion.is_some() {
            self.status = GameStatus::AwaitingPromotion;
            return;
        }
        self.pass_turn();
    }

    /// Completes a pending promotion with `kind`.
    pub fn try_promote(&mut self, kind: PieceKind) -> ChessResult<()> {
        let result = self.check_promotion(kind);
        if let Err(err) = &result {
            debug!(?kind, %err, "promotion rejected");
        }
        let square = result?;

        let Some(pawn) = self.grid.get(square) else {
            panic!("board invariant violated: pending promotion on empty {square}");
        };
        self.grid.set(square, Some(pawn.with_kind(kind)));
        if let Some(last) = self.history.last_mut() {
            last.promotion = kind;
        }
        self.pending_promotion = None;
        self.status = GameStatus::Playing;
        self.pass_turn();
        Ok(())
    }

    #[inline]
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        self.try_promote(kind).is_ok()
    }

    fn check_promotion(&self, kind: PieceKind) -> ChessResult<Square> {
        let pending = self
            .pending_promotion
            .filter(|_| self.status == GameStatus::AwaitingPromotion)
            .ok_or(ChessError::NoPendingPromotion)?;
        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(kind));
        }
        Ok(pending)
    }

    /// Takes back the most recent ply.
    pub fn try_undo(&mut self) -> ChessResult<()> {
        if self.status == GameStatus::AwaitingPromotion {
            debug!("undo rejected while a promotion is pending");
            return Err(ChessError::PromotionPending);
        }
        let Some(mv) = self.history.pop() else {
            debug!("undo rejected on an empty history");
            return Err(ChessError::NothingToUndo);
        };
        let ply = self.history.len();

        let Some(moved) = self.grid.take(mv.to) else {
            panic!("board invariant violated: nothing on {} to take back {mv}", mv.to);
        };
        let moved = if mv.has_promotion() {
            moved.with_kind(PieceKind::Pawn)
        } else {
            moved
        };
        self.grid.set(mv.from, Some(moved));

        if let Some(captured) = self.captured_at.remove(&ply) {
            self.grid.set(mv.to, Some(captured));
            self.piece_count += 1;
        }
        if let Some(effect) = self.side_effect_at.remove(&ply) {
            self.grid.revert(effect);
            if matches!(effect, SideEffect::EnPassant { .. }) {
                self.piece_count += 1;
            }
        }
        self.first_move_of
            .retain(|_, first| *first != FirstMove::AtPly(ply));
        self.last_double_step = self.double_step_at_top();

        if self.status.is_terminal() {
            self.status = GameStatus::Playing;
        } else {
            self.whose_turn = self.whose_turn.opposite();
        }
        Ok(())
    }

    #[inline]
    pub fn undo(&mut self) -> bool {
        self.try_undo().is_ok()
    }

    /// Applies `moves` in order. A move whose `from` equals its `to` completes
    /// a pending promotion. Either every move applies or the board is unchanged.
    pub fn replay(&mut self, moves: &[Move]) -> ChessResult<()> {
        let mut scratch = self.clone();
        for &mv in moves {
            if mv.is_promotion_marker() {
                scratch.try_promote(mv.promotion)?;
            } else {
                scratch.try_make_move(mv)?;
            }
        }
        *self = scratch;
        Ok(())
    }

    /// The pawn that double-stepped on the ply now on top of history.
    fn double_step_at_top(&self) -> Option<Square> {
        let Some(top) = self.history.last() else {
            return self.setup_double_step;
        };
        let is_pawn = self
            .grid
            .get(top.to)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);
        (is_pawn && top.from.file() == top.to.file() && top.from.rank().abs_diff(top.to.rank()) == 2)
            .then_some(top.to)
    }

    fn pass_turn(&mut self) {
        self.whose_turn = self.whose_turn.opposite();
        self.classify_position();
    }
}
