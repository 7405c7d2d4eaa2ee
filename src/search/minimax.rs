//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The search never touches the caller's board: it works on a private clone,
//! recursing through `make_move`/`undo`. Root moves are shuffled first so that
//! equally scored moves vary from game to game (or stay fixed under a seed).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game_state::chess_types::*;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, INFINITY};
use crate::search::search_config::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Minimax value of `best_move`, White-positive.
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
}

/// Picks a move for the side to move with the default configuration.
///
/// Returns `None` only when there is nothing to play.
pub fn find_move(board: &GameState) -> Option<Move> {
    find_move_with(board, &SearchConfig::default()).best_move
}

/// Runs the search at the depth `config` chooses for `board`.
pub fn find_move_with(board: &GameState, config: &SearchConfig) -> SearchResult {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    search_root(board, &MaterialScorer, config.depth_for(board), &mut rng)
}

/// Moves the search considers at `board`: the four promotion choices while a
/// promotion is pending, otherwise the legal moves.
pub fn root_candidates(board: &GameState) -> Vec<Move> {
    match board.pending_promotion_square() {
        Some(square) if board.status() == GameStatus::AwaitingPromotion => PieceKind::PROMOTIONS
            .into_iter()
            .map(|kind| Move::promotion_marker(square, kind))
            .collect(),
        _ => board.legal_moves().collect(),
    }
}

pub fn search_root<S, R>(board: &GameState, scorer: &S, depth: u8, rng: &mut R) -> SearchResult
where
    S: BoardScorer + ?Sized,
    R: Rng + ?Sized,
{
    let mut scratch = board.clone();
    let maximizing = scratch.turn() == Color::White;
    let mut candidates = root_candidates(&scratch);
    candidates.shuffle(rng);

    let mut nodes = 0u64;
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best_move = None;
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };

    for mv in candidates {
        let child_depth = depth.saturating_sub(1);
        let score = with_child(&mut scratch, mv, |child| {
            search(child, scorer, child_depth, !maximizing, alpha, beta, &mut nodes)
        });
        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if improves || best_move.is_none() {
            best_score = score;
            best_move = Some(mv);
        }
        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
    }

    debug!(
        depth,
        nodes,
        score = best_score,
        best = ?best_move.map(|mv| mv.to_string()),
        "search finished"
    );
    SearchResult {
        best_move,
        best_score,
        depth,
        nodes,
    }
}

/// Minimax value of `board` searched `depth` plies deep.
///
/// Cuts off as soon as the running value leaves the `(alpha, beta)` window.
pub fn search<S>(
    board: &mut GameState,
    scorer: &S,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> i32
where
    S: BoardScorer + ?Sized,
{
    *nodes += 1;
    if depth == 0 || board.status().is_terminal() {
        return scorer.score(board);
    }

    let candidates = root_candidates(board);
    if candidates.is_empty() {
        return scorer.score(board);
    }

    if maximizing {
        let mut value = -INFINITY;
        for mv in candidates {
            let score = with_child(board, mv, |child| {
                search(child, scorer, depth - 1, false, alpha, beta, nodes)
            });
            value = value.max(score);
            if value > beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    } else {
        let mut value = INFINITY;
        for mv in candidates {
            let score = with_child(board, mv, |child| {
                search(child, scorer, depth - 1, true, alpha, beta, nodes)
            });
            value = value.min(score);
            if value < alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Runs `visit` on the position after `mv`, then restores `board`.
///
/// A completed promotion cannot be undone back into the pending state, so
/// promotion choices are explored on a copy.
fn with_child<T>(board: &mut GameState, mv: Move, visit: impl FnOnce(&mut GameState) -> T) -> T {
    if mv.is_promotion_marker() {
        let mut child = board.clone();
        if !child.promote(mv.promotion) {
            panic!("search produced an invalid promotion {mv}");
        }
        return visit(&mut child);
    }

    if !board.make_move(mv) {
        panic!("generated move {mv} was refused by the move engine");
    }
    let result = visit(board);
    if !board.undo() {
        panic!("could not take back {mv}");
    }
    result
}
