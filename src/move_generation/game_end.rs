//! Game-end classification.
//!
//! Runs right after the turn passes. A terminal verdict hands the turn back to
//! the side that just moved, so `turn()` on a finished board names the last
//! player to act (and `winner()` the side that delivered mate).

use tracing::debug;

use crate::game_state::chess_types::*;

impl GameState {
    /// Decides whether the side now to move is mated, stalemated, or whether
    /// neither side has mating material left.
    pub(crate) fn classify_position(&mut self) {
        let verdict = if !self.has_legal_move() {
            if self.king_in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            return;
        };

        self.status = verdict;
        self.whose_turn = self.whose_turn.opposite();
        debug!(status = ?verdict, last_mover = %self.whose_turn, ply = self.history.len(), "game over");
    }

    /// At most four pieces remain and every non-king is a knight or a lone
    /// bishop of its color.
    pub fn insufficient_material(&self) -> bool {
        if self.piece_count > 4 {
            return false;
        }
        let mut bishops = [0u8; 2];
        for (_, piece) in self.grid.occupied() {
            match piece.kind {
                PieceKind::King | PieceKind::Knight => {}
                PieceKind::Bishop => {
                    let seen = &mut bishops[piece.color.index()];
                    *seen += 1;
                    if *seen > 1 {
                        return false;
                    }
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        true
    }
}
