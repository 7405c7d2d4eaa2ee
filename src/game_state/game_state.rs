//! Authoritative board state with reversible history.
//!
//! `GameState` owns the piece placement, the side to move, the game status and
//! every log needed to undo a ply exactly: captured pieces and side effects
//! keyed by ply index, first-move records keyed by piece identity, and the
//! square of the pawn that just made a two-square advance.
//!
//! Mutation goes through `make_move`, `promote` and `undo` (see
//! `move_generation::legal_move_apply`); each either commits fully or leaves the
//! state untouched.

use std::collections::HashMap;

use crate::game_state::chess_rules::BACK_RANK;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) grid: Grid,
    pub(crate) whose_turn: Color,
    pub(crate) status: GameStatus,
    pub(crate) pending_promotion: Option<Square>,

    // --- Reversible history ---
    pub(crate) history: Vec<Move>,
    pub(crate) captured_at: HashMap<usize, Piece>,
    pub(crate) side_effect_at: HashMap<usize, SideEffect>,
    pub(crate) first_move_of: HashMap<PieceId, FirstMove>,

    // --- En passant ---
    pub(crate) last_double_step: Option<Square>,
    /// Double-step inherited from a loaded position; restored when undo empties history.
    pub(crate) setup_double_step: Option<Square>,

    pub(crate) piece_count: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// An empty board, white to move. Only setup code uses this directly.
    pub(crate) fn new_empty() -> Self {
        Self {
            grid: Grid::default(),
            whose_turn: Color::White,
            status: GameStatus::Playing,
            pending_promotion: None,
            history: Vec::new(),
            captured_at: HashMap::new(),
            side_effect_at: HashMap::new(),
            first_move_of: HashMap::new(),
            last_double_step: None,
            setup_double_step: None,
            piece_count: 0,
        }
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        for square in Square::ALL {
            let setup = [Color::White, Color::Black].into_iter().find_map(|color| {
                if square.rank() == color.home_rank() {
                    Some((BACK_RANK[square.file() as usize], color))
                } else if square.rank() == color.pawn_rank() {
                    Some((PieceKind::Pawn, color))
                } else {
                    None
                }
            });
            if let Some((kind, color)) = setup {
                state.place(square, kind, color);
            }
        }
        state
    }

    /// Spawns a new piece with the next free identity.
    pub(crate) fn place(&mut self, square: Square, kind: PieceKind, color: Color) -> Piece {
        let piece = Piece::new(kind, color, PieceId(self.piece_count as u8));
        self.grid.set(square, Some(piece));
        self.piece_count += 1;
        piece
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid.get(square)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move, or the last side to act once the game has ended.
    #[inline]
    pub fn turn(&self) -> Color {
        self.whose_turn
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn pending_promotion_square(&self) -> Option<Square> {
        self.pending_promotion
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Square of the pawn that advanced two squares on the previous ply.
    #[inline]
    pub fn last_double_step(&self) -> Option<Square> {
        self.last_double_step
    }

    /// Auxiliary relocation or removal performed by the most recent ply.
    pub fn last_side_effect(&self) -> Option<SideEffect> {
        let ply = self.history.len().checked_sub(1)?;
        self.side_effect_at.get(&ply).copied()
    }

    /// Pieces taken by ordinary captures, oldest first.
    pub fn captured_pieces(&self) -> Vec<Piece> {
        let mut plies: Vec<(&usize, &Piece)> = self.captured_at.iter().collect();
        plies.sort_by_key(|(ply, _)| **ply);
        plies.into_iter().map(|(_, piece)| *piece).collect()
    }

    /// Whether a king or rook has left its square (or lost the right at setup).
    #[inline]
    pub fn has_moved(&self, piece: Piece) -> bool {
        self.first_move_of.contains_key(&piece.id)
    }

    /// The side that delivered checkmate.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then_some(self.whose_turn)
    }

    /// Square of `color`'s king.
    ///
    /// # Panics
    /// When that king is missing, which only a corrupted state can produce.
    pub fn king_square(&self, color: Color) -> Square {
        match self.grid.find_king(color) {
            Some(square) => square,
            None => panic!("board invariant violated: no {color} king on the board"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_standard_layout() {
        let game = GameState::new_game();
        assert_eq!(game.piece_count(), 32);
        assert_eq!(game.grid().count(), 32);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.pending_promotion_square(), None);
        assert_eq!(game.last_side_effect(), None);

        let e1 = game.piece_at(Square::at(4, 0)).expect("white king");
        assert!(e1.is(PieceKind::King, Color::White));
        let d8 = game.piece_at(Square::at(3, 7)).expect("black queen");
        assert!(d8.is(PieceKind::Queen, Color::Black));
        assert!(game.piece_at(Square::at(4, 3)).is_none());
    }

    #[test]
    fn every_piece_has_distinct_identity() {
        let game = GameState::new_game();
        let mut ids: Vec<PieceId> = game.grid().occupied().map(|(_, p)| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn clone_is_independent() {
        let game = GameState::new_game();
        let mut copy = game.clone();
        copy.grid.set(Square::at(0, 0), None);
        assert!(game.piece_at(Square::at(0, 0)).is_some());
        assert_ne!(game, copy);
    }

    #[test]
    #[should_panic(expected = "no white king")]
    fn missing_king_is_fatal() {
        let game = GameState::new_empty();
        let _ = game.king_square(Color::White);
    }
}
