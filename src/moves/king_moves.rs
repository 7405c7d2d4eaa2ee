use crate::game_state::chess_rules::castle_rook_squares;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::piece_rules::{push_if_legal, PieceRules};

pub struct KingMoves;

impl KingMoves {
    #[inline]
    fn is_step(from: Square, to: Square) -> bool {
        from.file().abs_diff(to.file()) <= 1 && from.rank().abs_diff(to.rank()) <= 1
    }

    #[inline]
    fn is_castle_shape(from: Square, to: Square) -> bool {
        from.rank() == to.rank() && from.file().abs_diff(to.file()) == 2
    }

    /// Castling rights, path and attack conditions for a king on `from`
    /// heading two files to `to`. Whether the destination itself is attacked
    /// is left to the self-check filter, which sees the rook already moved.
    fn can_castle(state: &GameState, color: Color, from: Square, to: Square) -> bool {
        let Some(king) = state.grid.get(from) else {
            return false;
        };
        if state.has_moved(king) {
            return false;
        }

        let (rook_from, transit) = castle_rook_squares(from, to);
        let Some(rook) = state.grid.get(rook_from) else {
            return false;
        };
        if !rook.is(PieceKind::Rook, color) || state.has_moved(rook) {
            return false;
        }
        if !from.is_path_clear(rook_from, |sq| !state.grid.is_empty(sq)) {
            return false;
        }

        let enemy = color.opposite();
        !is_square_attacked(&state.grid, from, enemy) && !is_square_attacked(&state.grid, transit, enemy)
    }
}

impl PieceRules for KingMoves {
    fn is_legal_move(
        state: &GameState,
        color: Color,
        from: Square,
        to: Square,
        _promotion: PieceKind,
    ) -> bool {
        if Self::is_step(from, to) {
            return true;
        }
        Self::is_castle_shape(from, to) && state.grid.is_empty(to) && Self::can_castle(state, color, from, to)
    }

    fn attacks_square(_grid: &Grid, _color: Color, current: Square, target: Square) -> bool {
        Self::is_step(current, target)
    }

    fn candidate_moves(state: &GameState, _color: Color, from: Square, out: &mut Vec<Move>) {
        let steps = Direction::ALL.into_iter().filter_map(|d| {
            let (df, dr) = d.delta();
            from.offset(df, dr)
        });
        let castles = [from.offset(2, 0), from.offset(-2, 0)].into_iter().flatten();
        push_if_legal(state, from, steps.chain(castles), out);
    }

    fn plan_side_effect(_state: &GameState, _piece: Piece, mv: Move) -> Option<SideEffect> {
        if !Self::is_castle_shape(mv.from, mv.to) {
            return None;
        }
        let (from, to) = castle_rook_squares(mv.from, mv.to);
        Some(SideEffect::CastleRook { from, to })
    }

    fn apply_side_effects(
        state: &mut GameState,
        piece: Piece,
        _mv: Move,
        effect: Option<SideEffect>,
        ply: usize,
    ) {
        state
            .first_move_of
            .entry(piece.id)
            .or_insert(FirstMove::AtPly(ply));

        if let Some(effect @ SideEffect::CastleRook { from, .. }) = effect {
            if let Some(rook) = state.grid.get(from) {
                state
                    .first_move_of
                    .entry(rook.id)
                    .or_insert(FirstMove::AtPly(ply));
            }
            state.grid.perform(effect);
            state.side_effect_at.insert(ply, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::piece_rules::{is_legal_move, pseudo_legal_moves};

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    const CASTLE_READY: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    #[test]
    fn both_castles_generated_when_path_is_clear() {
        let game = GameState::from_fen(CASTLE_READY).expect("fen");
        let moves = pseudo_legal_moves(&game, sq("e1"));
        assert!(moves.contains(&Move::new(sq("e1"), sq("g1"))));
        assert!(moves.contains(&Move::new(sq("e1"), sq("c1"))));
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn castling_blocked_by_piece_between_king_and_rook() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").expect("fen");
        assert!(!is_legal_move(&game, sq("e1"), sq("c1"), PieceKind::Pawn));
        assert!(is_legal_move(&game, sq("e1"), sq("g1"), PieceKind::Pawn));
    }

    #[test]
    fn castling_through_attacked_transit_square_is_illegal() {
        // Black rook on f8 covers f1.
        let game = GameState::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen");
        assert!(!is_legal_move(&game, sq("e1"), sq("g1"), PieceKind::Pawn));
        assert!(is_legal_move(&game, sq("e1"), sq("c1"), PieceKind::Pawn));
    }

    #[test]
    fn castling_out_of_check_is_illegal() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen");
        assert!(!is_legal_move(&game, sq("e1"), sq("g1"), PieceKind::Pawn));
        assert!(!is_legal_move(&game, sq("e1"), sq("c1"), PieceKind::Pawn));
    }

    #[test]
    fn castling_onto_attacked_square_is_filtered_by_safety() {
        // Black rook on g8 covers g1 but not the transit square.
        let game = GameState::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("fen");
        assert!(is_legal_move(&game, sq("e1"), sq("g1"), PieceKind::Pawn));
        assert!(!game.is_legal_move(Move::new(sq("e1"), sq("g1"))));
        assert!(game.is_legal_move(Move::new(sq("e1"), sq("c1"))));
    }

    #[test]
    fn withheld_right_blocks_that_wing_only() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w K - 0 1").expect("fen");
        assert!(is_legal_move(&game, sq("e1"), sq("g1"), PieceKind::Pawn));
        assert!(!is_legal_move(&game, sq("e1"), sq("c1"), PieceKind::Pawn));
    }

    #[test]
    fn castle_plans_rook_relocation() {
        let game = GameState::from_fen(CASTLE_READY).expect("fen");
        let king = game.piece_at(sq("e1")).expect("king");
        let effect = KingMoves::plan_side_effect(&game, king, Move::new(sq("e1"), sq("c1")));
        assert_eq!(
            effect,
            Some(SideEffect::CastleRook {
                from: sq("a1"),
                to: sq("d1"),
            })
        );
        assert_eq!(
            KingMoves::plan_side_effect(&game, king, Move::new(sq("e1"), sq("f1"))),
            None
        );
    }
}
