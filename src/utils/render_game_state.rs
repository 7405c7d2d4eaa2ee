//! Terminal-oriented Unicode board renderer.
//!
//! `Display for GameState` draws rank 8 at the top with file and rank labels
//! around the grid, followed by a one-line status summary.

use std::fmt;

use crate::game_state::chess_types::*;

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8 {
            match game_state.piece_at(Square::at(file, rank)) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_game_state(self))?;
        match self.status() {
            GameStatus::Playing => write!(f, "{} to move, ply {}", self.turn(), self.ply_count()),
            GameStatus::AwaitingPromotion => write!(
                f,
                "{} to choose a promotion on {}",
                self.turn(),
                self.pending_promotion_square()
                    .map_or_else(|| "?".to_owned(), |sq| sq.to_string())
            ),
            GameStatus::Checkmate => write!(f, "checkmate, {} wins", self.turn()),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::InsufficientMaterial => f.write_str("draw by insufficient material"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_renders_with_labels() {
        let text = GameState::new_game().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
        assert_eq!(lines[10], "white to move, ply 0");
    }

    #[test]
    fn finished_game_reports_outcome() {
        let mut game = GameState::new_game();
        for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert!(game.make_move(text.parse().expect("move")));
        }
        assert!(game.to_string().ends_with("checkmate, black wins"));
    }
}
