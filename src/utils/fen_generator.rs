//! GameState-to-FEN generator.
//!
//! The board does not track the halfmove clock, so it is always written as 0;
//! the fullmove number counts from the position the board was created at.

use crate::game_state::chess_rules::{KING_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::*;

impl GameState {
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }
}

pub fn generate_fen(game_state: &GameState) -> String {
    // A finished board reports the last mover as its turn.
    let side = if game_state.status().is_terminal() {
        game_state.turn().opposite()
    } else {
        game_state.turn()
    };
    let side_to_move = match side {
        Color::White => "w",
        Color::Black => "b",
    };

    format!(
        "{} {} {} {} 0 {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state),
        generate_en_passant_field(game_state),
        1 + game_state.ply_count() / 2
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8 {
            if let Some(piece) = game_state.piece_at(Square::at(file, rank)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for color in [Color::White, Color::Black] {
        let home = color.home_rank();
        let unmoved = |file: u8, kind: PieceKind| {
            game_state
                .piece_at(Square::at(file, home))
                .is_some_and(|piece| piece.is(kind, color) && !game_state.has_moved(piece))
        };
        if !unmoved(KING_FILE, PieceKind::King) {
            continue;
        }
        for (file, letter) in [(KINGSIDE_ROOK_FILE, 'k'), (QUEENSIDE_ROOK_FILE, 'q')] {
            if unmoved(file, PieceKind::Rook) {
                out.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

/// Target square behind the pawn that just advanced two squares.
fn generate_en_passant_field(game_state: &GameState) -> String {
    let target = game_state.last_double_step().and_then(|pawn_square| {
        let pawn = game_state.piece_at(pawn_square)?;
        pawn_square.offset(0, -pawn.color.forward())
    });
    match target {
        Some(square) => square.to_string(),
        None => "-".to_owned(),
    }
}
