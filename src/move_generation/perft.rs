//! Perft: exhaustive legal-move tree counts.
//!
//! Walks the tree with make/undo on a private clone, so it exercises the move
//! engine's reversibility as much as the generator. Leaf statistics follow the
//! usual perft tables (en passant and promotions that capture count as captures).

use std::thread;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_attacked;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of legal move sequences of length `depth`.
pub fn perft(board: &GameState, depth: u8) -> u64 {
    perft_counts(board, depth).nodes
}

pub fn perft_counts(board: &GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    let mut scratch = board.clone();
    perft_recurse(&mut scratch, depth, &mut counts);
    counts
}

/// Leaf counts below each root move, in generation order.
pub fn perft_divide(board: &GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut scratch = board.clone();
    let roots: Vec<Move> = scratch.legal_moves().collect();
    roots
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            play_and_count(&mut scratch, mv, depth, &mut counts);
            (mv, counts.nodes)
        })
        .collect()
}

/// Same totals as [`perft_counts`], one worker thread per root move.
pub fn perft_multi_threaded(board: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(perft_counts(board, 0));
    }
    let roots: Vec<Move> = board.legal_moves().collect();

    thread::scope(|scope| {
        let handles: Vec<_> = roots
            .into_iter()
            .map(|mv| {
                let mut scratch = board.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    play_and_count(&mut scratch, mv, depth, &mut local);
                    local
                })
            })
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let local = handle.join().map_err(|_| ChessError::WorkerPanicked)?;
            total.merge(local);
        }
        Ok(total)
    })
}

fn perft_recurse(board: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let moves: Vec<Move> = board.legal_moves().collect();
    for mv in moves {
        play_and_count(board, mv, depth, counts);
    }
}

fn play_and_count(board: &mut GameState, mv: Move, depth: u8, counts: &mut PerftCounts) {
    let mover = board.turn();
    let captures = board.piece_at(mv.to).is_some();
    if !board.make_move(mv) {
        panic!("generated move {mv} was refused by the move engine");
    }

    if depth == 1 {
        counts.nodes += 1;
        match board.last_side_effect() {
            Some(SideEffect::EnPassant { .. }) => {
                counts.en_passant += 1;
                counts.captures += 1;
            }
            Some(SideEffect::CastleRook { .. }) => counts.castles += 1,
            None if captures => counts.captures += 1,
            None => {}
        }
        if mv.has_promotion() {
            counts.promotions += 1;
        }
        if is_king_attacked(board.grid(), mover.opposite()) {
            counts.checks += 1;
        }
        if board.status() == GameStatus::Checkmate {
            counts.checkmates += 1;
        }
    } else {
        perft_recurse(board, depth - 1, counts);
    }

    if !board.undo() {
        panic!("could not take back {mv}");
    }
}
