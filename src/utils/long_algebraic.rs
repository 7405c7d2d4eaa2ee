//! Long algebraic move notation (`e2e4`, `e7e8q`).
//!
//! A promotion completed after the pawn arrived is written with equal origin
//! and destination, e.g. `e8e8q`.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if self.has_promotion() {
            write!(f, "{}", self.promotion.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ChessError::InvalidMoveNotation(s.to_owned());
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(bad());
        }

        let from: Square = s[0..2].parse().map_err(|_| bad())?;
        let to: Square = s[2..4].parse().map_err(|_| bad())?;
        let promotion = match s[4..].chars().next() {
            None => PieceKind::Pawn,
            Some(ch) => char_to_promotion(ch).ok_or_else(bad)?,
        };

        if from == to && promotion == PieceKind::Pawn {
            return Err(bad());
        }
        Ok(Move::with_promotion(from, to, promotion))
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    PieceKind::from_letter(ch).filter(|kind| kind.is_promotion_target())
}

/// Space-separated long algebraic text for a move list.
pub fn moves_to_long_algebraic(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses whitespace-separated long algebraic moves.
pub fn parse_move_list(text: &str) -> ChessResult<Vec<Move>> {
    text.split_whitespace().map(str::parse).collect()
}
