use crate::game_state::chess_types::*;
use crate::moves::piece_rules::PieceRules;
use crate::moves::sliding_moves::{slide_targets, slides_to};

pub struct QueenMoves;

impl PieceRules for QueenMoves {
    fn is_legal_move(
        state: &GameState,
        _color: Color,
        from: Square,
        to: Square,
        _promotion: PieceKind,
    ) -> bool {
        slides_to(&state.grid, &Direction::ALL, from, to)
    }

    fn attacks_square(grid: &Grid, _color: Color, current: Square, target: Square) -> bool {
        slides_to(grid, &Direction::ALL, current, target)
    }

    fn candidate_moves(state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
        slide_targets(&state.grid, color, &Direction::ALL, from, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queen_attacks_along_lines_only() {
        let grid = Grid::default();
        let d1: Square = "d1".parse().expect("square");
        assert!(QueenMoves::attacks_square(&grid, Color::White, d1, "h5".parse().expect("square")));
        assert!(QueenMoves::attacks_square(&grid, Color::White, d1, "d8".parse().expect("square")));
        assert!(!QueenMoves::attacks_square(&grid, Color::White, d1, "e3".parse().expect("square")));
    }
}
