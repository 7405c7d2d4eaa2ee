//! Canonical chess-rule constants and castling geometry.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::square_index::Square;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Home-rank layout from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const KINGSIDE_ROOK_FILE: u8 = 7;
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
pub const KING_FILE: u8 = 4;

/// For a king travelling two files from `king_from` to `king_to`, the square
/// the castling rook starts on and the square it lands on (the king's transit
/// square).
pub fn castle_rook_squares(king_from: Square, king_to: Square) -> (Square, Square) {
    let rank = king_from.rank();
    if king_to.file() > king_from.file() {
        (
            Square::at(KINGSIDE_ROOK_FILE, rank),
            Square::at(king_from.file() + 1, rank),
        )
    } else {
        (
            Square::at(QUEENSIDE_ROOK_FILE, rank),
            Square::at(king_from.file() - 1, rank),
        )
    }
}

/// Static material weights used by search, indexed by [`PieceKind::index`].
pub const MATERIAL_WEIGHTS: [i32; 6] = [1, 3, 3, 5, 9, 0];
