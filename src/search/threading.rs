//! Background search worker.
//!
//! A [`SearchTask`] owns a clone of the board taken at spawn time, runs the
//! search on its own thread and hands the result back over a single-shot
//! channel. The interactive board is never shared with the worker, so no lock
//! is needed between them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::trace;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::search::minimax::{find_move_with, SearchResult};
use crate::search::search_config::SearchConfig;

#[derive(Debug)]
pub struct SearchTask {
    receiver: Receiver<SearchResult>,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SearchTask {
    /// Starts searching a snapshot of `board`.
    pub fn spawn(board: &GameState, config: SearchConfig) -> Self {
        let snapshot = board.clone();
        let cancelled = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::sync_channel(1);

        let worker_cancelled = Arc::clone(&cancelled);
        let handle = thread::spawn(move || {
            trace!(ply = snapshot.ply_count(), "search worker started");
            let result = find_move_with(&snapshot, &config);
            if worker_cancelled.load(Ordering::Relaxed) {
                trace!("search worker finished after cancellation; dropping result");
                return;
            }
            // The receiver may already be gone; nobody is waiting then.
            let _ = sender.send(result);
            trace!(nodes = result.nodes, "search worker finished");
        });

        Self {
            receiver,
            cancelled,
            handle: Some(handle),
        }
    }

    /// Marks the task abandoned. The search keeps running to completion but
    /// its result is discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Non-blocking poll: `Ok(None)` while the worker is still searching.
    pub fn try_result(&mut self) -> ChessResult<Option<Move>> {
        if self.is_cancelled() {
            return Err(ChessError::Cancelled);
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.reap();
                result.best_move.map(Some).ok_or(ChessError::NoLegalMoves)
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(self.reap_failure()),
        }
    }

    /// Blocks until the worker delivers its move.
    pub fn wait(mut self) -> ChessResult<Move> {
        if self.is_cancelled() {
            return Err(ChessError::Cancelled);
        }
        match self.receiver.recv() {
            Ok(result) => {
                self.reap();
                result.best_move.ok_or(ChessError::NoLegalMoves)
            }
            Err(_) => Err(self.reap_failure()),
        }
    }

    fn reap(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Why the channel closed without a result.
    fn reap_failure(&mut self) -> ChessError {
        let panicked = self
            .handle
            .take()
            .is_some_and(|handle| handle.join().is_err());
        if panicked {
            ChessError::WorkerPanicked
        } else {
            ChessError::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SearchConfig {
        SearchConfig {
            narrow_min_depth: 2,
            ..SearchConfig::default().with_seed(17)
        }
    }

    #[test]
    fn worker_returns_a_legal_move() {
        let game = GameState::new_game();
        let task = SearchTask::spawn(&game, seeded());
        let mv = task.wait().expect("search result");
        assert!(game.is_legal_move(mv));
    }

    #[test]
    fn worker_matches_inline_search() {
        let game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("fen");
        let inline = find_move_with(&game, &seeded()).best_move;
        let task = SearchTask::spawn(&game, seeded());
        assert_eq!(task.wait().ok(), inline);
    }

    #[test]
    fn polling_eventually_yields_the_move() {
        let game = GameState::new_game();
        let mut task = SearchTask::spawn(&game, seeded());
        let mv = loop {
            match task.try_result().expect("worker alive") {
                Some(mv) => break mv,
                None => thread::yield_now(),
            }
        };
        assert!(game.is_legal_move(mv));
    }

    #[test]
    fn board_mutation_after_spawn_does_not_reach_the_worker() {
        let mut game = GameState::new_game();
        let task = SearchTask::spawn(&game, seeded());
        assert!(game.make_move("e2e4".parse().expect("move")));
        let mv = task.wait().expect("search result");
        assert!(GameState::new_game().is_legal_move(mv));
    }

    #[test]
    fn cancelled_task_reports_cancellation() {
        let game = GameState::new_game();
        let mut task = SearchTask::spawn(&game, seeded());
        task.cancel();
        assert_eq!(task.try_result(), Err(ChessError::Cancelled));
        assert_eq!(task.wait(), Err(ChessError::Cancelled));
    }

    #[test]
    fn finished_game_reports_no_legal_moves() {
        let mut game = GameState::new_game();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(game.make_move(text.parse().expect("move")));
        }
        let task = SearchTask::spawn(&game, seeded());
        assert_eq!(task.wait(), Err(ChessError::NoLegalMoves));
    }
}
