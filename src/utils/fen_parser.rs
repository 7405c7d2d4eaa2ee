//! FEN-to-GameState parser.
//!
//! Builds a playable board from Forsyth-Edwards Notation. Castling rights that
//! the castling field withholds are recorded as "moved before setup" on the
//! affected king or rook, and the en-passant field marks the pawn that just
//! advanced two squares. The loaded position is classified right away, so a
//! FEN of a mated or stalemated side loads as a finished game.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{KING_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_attacked;

impl GameState {
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;

    // Clocks are optional; when present they must be numbers.
    for (name, clock) in [("halfmove clock", parts.next()), ("fullmove number", parts.next())] {
        if let Some(clock) = clock {
            clock
                .parse::<u32>()
                .map_err(|_| invalid(format!("invalid {name}: {clock}")))?;
        }
    }
    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();
    parse_board(board_part, &mut game_state)?;
    game_state.whose_turn = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut game_state)?;

    let double_step = parse_en_passant(en_passant_part, &game_state)?;
    game_state.last_double_step = double_step;
    game_state.setup_double_step = double_step;

    let idle = game_state.whose_turn.opposite();
    if is_king_attacked(&game_state.grid, idle) {
        return Err(invalid(format!("{idle} is in check but it is not {idle}'s turn")));
    }

    game_state.classify_position();
    Ok(game_state)
}

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut kings = [0usize; 2];
    let mut placements = Vec::new();
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(format!("rank {} has too many files", rank + 1)));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if file >= 8 {
                return Err(invalid(format!("rank {} has too many files", rank + 1)));
            }
            if kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                return Err(invalid(format!("pawn on back rank {}", rank + 1)));
            }
            if kind == PieceKind::King {
                kings[color.index()] += 1;
            }

            placements.push((Square::at(file, rank), kind, color));
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank {} does not sum to 8 files", rank + 1)));
        }
    }

    // Identities are handed out in square order, matching `GameState::new_game`.
    placements.sort_by_key(|(square, _, _)| *square);
    for (square, kind, color) in placements {
        game_state.place(square, kind, color);
    }

    for color in [Color::White, Color::Black] {
        if kings[color.index()] != 1 {
            return Err(invalid(format!(
                "expected exactly one {color} king, found {}",
                kings[color.index()]
            )));
        }
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side to move: {side_part}"))),
    }
}

/// Marks every king and rook that may not castle as already moved.
fn apply_castling_rights(castling_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    // Indexed by color, then [kingside, queenside].
    let mut rights = [[false; 2]; 2];
    if castling_part != "-" {
        for ch in castling_part.chars() {
            let (color, wing) = match ch {
                'K' => (Color::White, 0),
                'Q' => (Color::White, 1),
                'k' => (Color::Black, 0),
                'q' => (Color::Black, 1),
                _ => return Err(invalid(format!("invalid castling character '{ch}'"))),
            };
            rights[color.index()][wing] = true;
        }
    }

    let mut withheld = Vec::new();
    for (square, piece) in game_state.grid.occupied() {
        let home = piece.color.home_rank();
        let wings = rights[piece.color.index()];
        let keeps_right = match piece.kind {
            PieceKind::King => square == Square::at(KING_FILE, home) && (wings[0] || wings[1]),
            PieceKind::Rook => {
                (wings[0] && square == Square::at(KINGSIDE_ROOK_FILE, home))
                    || (wings[1] && square == Square::at(QUEENSIDE_ROOK_FILE, home))
            }
            _ => continue,
        };
        if !keeps_right {
            withheld.push(piece.id);
        }
    }
    for id in withheld {
        game_state.first_move_of.insert(id, FirstMove::BeforeSetup);
    }
    Ok(())
}

/// The en-passant target square names the square behind the pawn that just
/// advanced; returns that pawn's square.
fn parse_en_passant(en_passant_part: &str, game_state: &GameState) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target: Square = en_passant_part
        .parse()
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
    let mover = game_state.whose_turn;
    let advanced = mover.opposite();

    let expected_rank = (advanced.pawn_rank() as i8 + advanced.forward()) as u8;
    let pawn_square = target.offset(0, advanced.forward());
    let pawn_in_place = pawn_square
        .and_then(|sq| game_state.grid.get(sq))
        .is_some_and(|piece| piece.is(PieceKind::Pawn, advanced));

    match pawn_square {
        Some(square) if target.rank() == expected_rank && pawn_in_place => Ok(Some(square)),
        _ => Err(invalid(format!(
            "en-passant square {target} has no {advanced} pawn in front of it"
        ))),
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };
    Some((color, PieceKind::from_letter(ch)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn starting_fen_matches_new_game() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(parsed, GameState::new_game());
    }

    #[test]
    fn clocks_are_optional_but_checked() {
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q -").is_ok());
        assert!(matches!(
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - x 1"),
            Err(ChessError::InvalidFen(_))
        ));
    }

    #[test]
    fn withheld_rights_mark_pieces_as_moved() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("fen");
        let piece = |name| game.piece_at(sq(name)).expect("piece");
        assert!(!game.has_moved(piece("e1")));
        assert!(!game.has_moved(piece("h1")));
        assert!(game.has_moved(piece("a1")));
        assert!(!game.has_moved(piece("e8")));
        assert!(!game.has_moved(piece("a8")));
        assert!(game.has_moved(piece("h8")));
    }

    #[test]
    fn no_rights_freezes_the_king() {
        let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").expect("fen");
        assert!(game.has_moved(game.piece_at(sq("e1")).expect("king")));
        assert!(!game.is_legal_move("e1g1".parse().expect("move")));
    }

    #[test]
    fn en_passant_field_enables_the_capture() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("fen");
        assert_eq!(game.last_double_step(), Some(sq("d5")));
        assert!(game.is_legal_move("e5d6".parse().expect("move")));
    }

    #[test]
    fn inconsistent_en_passant_is_rejected() {
        for fen in [
            "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - z9 0 1",
        ] {
            assert!(matches!(GameState::from_fen(fen), Err(ChessError::InvalidFen(_))), "{fen}");
        }
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        for fen in [
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KK2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2X w - - 0 1",
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8/4K3",
        ] {
            assert!(matches!(GameState::from_fen(fen), Err(ChessError::InvalidFen(_))), "{fen}");
        }
    }

    #[test]
    fn idle_side_in_check_is_rejected() {
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4K2R b - - 0 1").is_ok());
        assert!(GameState::from_fen("4k3/8/8/8/8/8/8/4R2K w - - 0 1").is_err());
    }

    #[test]
    fn mated_position_loads_as_finished() {
        let game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("fen");
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.winner(), Some(Color::White));
    }
}
