//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type of the crate. The variants describe
//! why a caller request was refused; a refused request never mutates the board.
//! Corrupted-state conditions (for example a missing king) are not represented
//! here: they panic, because no caller can recover from them.

use thiserror::Error;

use crate::game_state::chess_types::{Color, GameStatus, Move, PieceKind};
use crate::game_state::square_index::Square;

/// Every reason the engine refuses a request or fails to parse input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The game has ended or is waiting for a promotion choice.
    #[error("game is not accepting moves (status {0:?})")]
    NotPlaying(GameStatus),

    /// Origin and destination are the same square.
    #[error("move {0} does not leave its square")]
    NullMove(Move),

    /// Nothing stands on the origin square.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// The piece on the origin square belongs to the side not on move.
    #[error("piece on {square} belongs to {owner}, but it is {turn}'s turn")]
    OutOfTurn {
        square: Square,
        owner: Color,
        turn: Color,
    },

    /// The piece cannot move that way, or the path is blocked.
    #[error("{kind:?} cannot make move {mv}")]
    IllegalShape { kind: PieceKind, mv: Move },

    /// The move would expose or leave the mover's king in check.
    #[error("move {0} would leave the king in check")]
    KingLeftInCheck(Move),

    /// A promotion was requested while no pawn is waiting for one.
    #[error("no promotion is pending")]
    NoPendingPromotion,

    /// Pawns may only become a knight, bishop, rook or queen.
    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// History is empty.
    #[error("there is no move to undo")]
    NothingToUndo,

    /// Undo was requested before the pending promotion was chosen.
    #[error("cannot undo while a promotion is pending")]
    PromotionPending,

    /// Text that is not a coordinate such as `e4`.
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// Text that is not long algebraic such as `e2e4` or `e7e8q`.
    #[error("invalid move notation: {0:?}")]
    InvalidMoveNotation(String),

    /// A malformed or impossible FEN position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The search was asked for a move where none exists.
    #[error("side to move has no legal moves")]
    NoLegalMoves,

    /// The search task was cancelled before it reported.
    #[error("search task was cancelled")]
    Cancelled,

    /// A search or perft worker thread panicked.
    #[error("search worker panicked")]
    WorkerPanicked,
}

/// Result type alias for rules-engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
