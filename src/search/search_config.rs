//! Search depth policy.

use crate::game_state::chess_types::GameState;
use crate::search::minimax::root_candidates;

/// Knobs of the depth heuristic plus the root shuffle seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub base_depth: u8,
    /// Ply count from which the search starts deepening.
    pub deepening_start_ply: usize,
    /// One extra ply of depth per this many plies past the start.
    pub deepening_interval: usize,
    /// Positions with fewer root moves than this are searched deeper...
    pub narrow_move_threshold: usize,
    /// ...to at least this depth.
    pub narrow_min_depth: u8,
    /// Seed for the root move shuffle; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_depth: 1,
            deepening_start_ply: 50,
            deepening_interval: 10,
            narrow_move_threshold: 10,
            narrow_min_depth: 5,
            seed: None,
        }
    }
}

impl SearchConfig {
    #[inline]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Depth to search `board` at.
    pub fn depth_for(&self, board: &GameState) -> u8 {
        let mut depth = self.base_depth;
        let ply = board.ply_count();
        if ply >= self.deepening_start_ply {
            let steps = (ply - self.deepening_start_ply) / self.deepening_interval.max(1) + 1;
            depth = depth.saturating_add(u8::try_from(steps).unwrap_or(u8::MAX));
        }
        if root_candidates(board).len() < self.narrow_move_threshold {
            depth = depth.max(self.narrow_min_depth);
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::*;

    #[test]
    fn opening_searches_at_base_depth() {
        let config = SearchConfig::default();
        assert_eq!(config.depth_for(&GameState::new_game()), 1);
    }

    #[test]
    fn depth_grows_every_ten_plies_after_fifty() {
        let config = SearchConfig::default();
        let mut game = GameState::new_game();
        // Knights shuffle out and back; the position keeps twenty-odd moves.
        let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for (ply, text) in cycle.iter().cycle().take(60).enumerate() {
            let expected = match ply {
                0..=49 => 1,
                50..=59 => 2,
                _ => 3,
            };
            assert_eq!(config.depth_for(&game), expected, "ply {ply}");
            assert!(game.make_move(text.parse().expect("move")));
        }
        assert_eq!(config.depth_for(&game), 3);
    }

    #[test]
    fn narrow_positions_search_deeper() {
        let config = SearchConfig::default();
        let rook_ending = GameState::from_fen("7k/8/8/8/8/8/8/R6K w - - 0 1").expect("fen");
        assert_eq!(rook_ending.legal_moves().count(), 16);
        assert_eq!(config.depth_for(&rook_ending), 1);

        let lone_kings_and_pawn = GameState::from_fen("7k/8/8/8/8/8/P7/7K w - - 0 1").expect("fen");
        assert_eq!(config.depth_for(&lone_kings_and_pawn), 5);
    }
}
