use crate::game_state::chess_types::*;
use crate::moves::piece_rules::PieceRules;
use crate::moves::sliding_moves::{slide_targets, slides_to};

pub struct RookMoves;

impl PieceRules for RookMoves {
    fn is_legal_move(
        state: &GameState,
        _color: Color,
        from: Square,
        to: Square,
        _promotion: PieceKind,
    ) -> bool {
        slides_to(&state.grid, &Direction::ORTHOGONAL, from, to)
    }

    fn attacks_square(grid: &Grid, _color: Color, current: Square, target: Square) -> bool {
        slides_to(grid, &Direction::ORTHOGONAL, current, target)
    }

    fn candidate_moves(state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
        slide_targets(&state.grid, color, &Direction::ORTHOGONAL, from, out);
    }

    fn apply_side_effects(
        state: &mut GameState,
        piece: Piece,
        _mv: Move,
        _effect: Option<SideEffect>,
        ply: usize,
    ) {
        state
            .first_move_of
            .entry(piece.id)
            .or_insert(FirstMove::AtPly(ply));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::piece_rules::pseudo_legal_moves;

    #[test]
    fn rook_on_open_board_has_fourteen_targets() {
        let game = GameState::from_fen("7k/8/8/8/3R4/8/8/K7 w - - 0 1").expect("fen");
        let d4 = "d4".parse().expect("square");
        assert_eq!(pseudo_legal_moves(&game, d4).len(), 14);
    }

    #[test]
    fn first_rook_move_is_recorded_once() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("fen");
        let a1 = "a1".parse().expect("square");
        let rook = game.piece_at(a1).expect("rook");
        assert!(!game.has_moved(rook));

        assert!(game.make_move("a1a2".parse().expect("move")));
        assert!(game.make_move("e8d8".parse().expect("move")));
        assert!(game.make_move("a2a1".parse().expect("move")));
        assert_eq!(game.first_move_of.get(&rook.id), Some(&FirstMove::AtPly(0)));
    }
}
