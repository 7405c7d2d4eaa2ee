//! Attack detection and self-check probing.
//!
//! `is_safe_move` simulates a move on a copy of the grid using the same
//! relocation and side-effect path the move engine commits with, so the live
//! board is never touched while legality is being probed.

use crate::game_state::chess_types::*;
use crate::moves::piece_rules::{attacks_square, plan_side_effect};

/// Whether any `by` piece on `grid` attacks `square`.
pub fn is_square_attacked(grid: &Grid, square: Square, by: Color) -> bool {
    grid.pieces_of(by)
        .any(|(from, piece)| attacks_square(grid, piece, from, square))
}

/// Whether `color`'s king on `grid` is attacked.
///
/// # Panics
/// When `color` has no king on `grid`.
pub fn is_king_attacked(grid: &Grid, color: Color) -> bool {
    let Some(king) = grid.find_king(color) else {
        panic!("board invariant violated: no {color} king on the board");
    };
    is_square_attacked(grid, king, color.opposite())
}

impl GameState {
    /// Whether the side to move is in check.
    pub fn king_in_check(&self) -> bool {
        let king = self.king_square(self.whose_turn);
        is_square_attacked(&self.grid, king, self.whose_turn.opposite())
    }

    /// Whether `mv` leaves the mover's king unattacked.
    ///
    /// Only the placement matters for attack detection, so the simulation runs
    /// on a copy of the grid; the real board stays exactly as it was.
    pub fn is_safe_move(&self, mv: Move) -> bool {
        let Some(piece) = self.grid.get(mv.from) else {
            return false;
        };
        let effect = plan_side_effect(self, piece, mv);

        let mut scratch = self.grid;
        scratch.relocate(mv.from, mv.to);
        if let Some(effect) = effect {
            scratch.perform(effect);
        }

        !is_king_attacked(&scratch, piece.color)
    }
}
