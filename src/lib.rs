//! Crate root module declarations for the plum_rules chess engine.
//!
//! This file exposes the rules engine (board state, per-piece movement rules,
//! legality checks, the move engine and game-end classification), the
//! minimax search and the notation helpers so binaries, tests and benches can
//! import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod grid;
    pub mod square_index;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece_rules;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod game_end;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod search_config;
    pub mod threading;
}

pub mod utils {
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub use errors::{ChessError, ChessResult};
pub use game_state::chess_types::{
    Color, GameState, GameStatus, Move, Piece, PieceId, PieceKind, SideEffect, Square,
};
pub use search::minimax::{find_move, find_move_with};
pub use search::search_config::SearchConfig;
pub use search::threading::SearchTask;
