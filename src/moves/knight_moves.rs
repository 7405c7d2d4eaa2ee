use crate::game_state::chess_types::*;
use crate::moves::piece_rules::{push_if_legal, PieceRules};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub struct KnightMoves;

impl KnightMoves {
    #[inline]
    fn is_jump(from: Square, to: Square) -> bool {
        let df = from.file().abs_diff(to.file());
        let dr = from.rank().abs_diff(to.rank());
        (df, dr) == (1, 2) || (df, dr) == (2, 1)
    }
}

impl PieceRules for KnightMoves {
    fn is_legal_move(
        _state: &GameState,
        _color: Color,
        from: Square,
        to: Square,
        _promotion: PieceKind,
    ) -> bool {
        Self::is_jump(from, to)
    }

    fn attacks_square(_grid: &Grid, _color: Color, current: Square, target: Square) -> bool {
        Self::is_jump(current, target)
    }

    fn candidate_moves(state: &GameState, _color: Color, from: Square, out: &mut Vec<Move>) {
        let targets = KNIGHT_OFFSETS
            .into_iter()
            .filter_map(|(df, dr)| from.offset(df, dr));
        push_if_legal(state, from, targets, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::piece_rules::pseudo_legal_moves;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn knight_from_d4_has_eight_targets() {
        let game = GameState::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").expect("fen");
        assert_eq!(pseudo_legal_moves(&game, sq("d4")).len(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_targets() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("fen");
        assert_eq!(pseudo_legal_moves(&game, sq("a1")).len(), 2);
    }

    #[test]
    fn knight_jumps_over_blockers() {
        let grid = Grid::default();
        assert!(KnightMoves::attacks_square(&grid, Color::White, sq("g1"), sq("f3")));
        assert!(!KnightMoves::attacks_square(&grid, Color::White, sq("g1"), sq("g3")));
    }
}
