//! Pluggable board evaluation for the search.
//!
//! Scores are from White's point of view: positive favours White. Search
//! delegates leaf evaluation to a [`BoardScorer`] so alternate heuristics can
//! be swapped in without touching the tree walk.

use crate::game_state::chess_rules::MATERIAL_WEIGHTS;
use crate::game_state::chess_types::*;

/// Bound used for the search window. Always larger than any evaluation.
pub const INFINITY: i32 = 1_000_000;
/// Score of a won game, strictly inside the search window.
pub const WIN_SCORE: i32 = 100_000;

pub trait BoardScorer: Send + Sync {
    /// Static evaluation, White-positive.
    fn score(&self, board: &GameState) -> i32;
}

/// Material count with the classic 1/3/3/5/9 weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        MATERIAL_WEIGHTS[kind.index()]
    }

    pub fn material_balance_white_minus_black(board: &GameState) -> i32 {
        board
            .grid()
            .occupied()
            .map(|(_, piece)| match piece.color {
                Color::White => Self::piece_value(piece.kind),
                Color::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &GameState) -> i32 {
        match board.status() {
            GameStatus::Checkmate => match board.winner() {
                Some(Color::White) => WIN_SCORE,
                _ => -WIN_SCORE,
            },
            GameStatus::Stalemate | GameStatus::InsufficientMaterial => 0,
            GameStatus::Playing | GameStatus::AwaitingPromotion => {
                Self::material_balance_white_minus_black(board)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(MaterialScorer.score(&GameState::new_game()), 0);
    }

    #[test]
    fn material_is_white_positive_regardless_of_turn() {
        let white_to_move = GameState::from_fen("3qk3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("fen");
        let black_to_move = GameState::from_fen("3qk3/8/8/8/8/8/8/R3K3 b - - 0 1").expect("fen");
        assert_eq!(MaterialScorer.score(&white_to_move), -4);
        assert_eq!(MaterialScorer.score(&black_to_move), -4);
    }

    #[test]
    fn terminal_positions_score_win_or_zero() {
        let mut mated = GameState::new_game();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(mated.make_move(text.parse().expect("move")));
        }
        assert_eq!(MaterialScorer.score(&mated), -WIN_SCORE);

        let drawn = GameState::from_fen("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").expect("fen");
        assert_eq!(drawn.status(), GameStatus::InsufficientMaterial);
        assert_eq!(MaterialScorer.score(&drawn), 0);
        assert!(WIN_SCORE < INFINITY);
    }
}
