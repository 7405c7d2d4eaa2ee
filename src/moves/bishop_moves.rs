use crate::game_state::chess_types::*;
use crate::moves::piece_rules::PieceRules;
use crate::moves::sliding_moves::{slide_targets, slides_to};

pub struct BishopMoves;

impl PieceRules for BishopMoves {
    fn is_legal_move(
        state: &GameState,
        _color: Color,
        from: Square,
        to: Square,
        _promotion: PieceKind,
    ) -> bool {
        slides_to(&state.grid, &Direction::DIAGONAL, from, to)
    }

    fn attacks_square(grid: &Grid, _color: Color, current: Square, target: Square) -> bool {
        slides_to(grid, &Direction::DIAGONAL, current, target)
    }

    fn candidate_moves(state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
        slide_targets(&state.grid, color, &Direction::DIAGONAL, from, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::piece_rules::pseudo_legal_moves;

    #[test]
    fn bishop_on_open_board_from_d4() {
        let game = GameState::from_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1").expect("fen");
        let d4 = "d4".parse().expect("square");
        assert_eq!(pseudo_legal_moves(&game, d4).len(), 13);
    }
}
