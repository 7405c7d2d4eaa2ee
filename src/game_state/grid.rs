//! The 64-slot piece placement.
//!
//! `Grid` is `Copy`, which is what lets legality probing simulate a move on a
//! scratch placement without touching the live board.

use crate::game_state::chess_types::{Color, Piece, PieceKind, SideEffect};
use crate::game_state::square_index::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    slots: [Option<Piece>; 64],
}

impl Default for Grid {
    fn default() -> Self {
        Self { slots: [None; 64] }
    }
}

impl Grid {
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.slots[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.slots[square.index()].is_none()
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.slots[square.index()] = piece;
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.slots[square.index()].take()
    }

    /// Moves whatever stands on `from` to `to`, returning what `to` held.
    #[inline]
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.take(from);
        std::mem::replace(&mut self.slots[to.index()], moving)
    }

    /// Applies the grid part of a side effect.
    pub fn perform(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::CastleRook { from, to } => {
                self.relocate(from, to);
            }
            SideEffect::EnPassant { captured_at, .. } => {
                self.set(captured_at, None);
            }
        }
    }

    /// Inverse of [`Grid::perform`].
    pub fn revert(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::CastleRook { from, to } => {
                self.relocate(to, from);
            }
            SideEffect::EnPassant { captured_at, pawn } => {
                self.set(captured_at, Some(pawn));
            }
        }
    }

    /// Occupied squares with their pieces, in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceId;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn relocate_reports_displaced_piece() {
        let mut grid = Grid::default();
        let rook = Piece::new(PieceKind::Rook, Color::White, PieceId(1));
        let knight = Piece::new(PieceKind::Knight, Color::Black, PieceId(2));
        grid.set(sq("a1"), Some(rook));
        grid.set(sq("a8"), Some(knight));

        assert_eq!(grid.relocate(sq("a1"), sq("a8")), Some(knight));
        assert!(grid.is_empty(sq("a1")));
        assert_eq!(grid.get(sq("a8")), Some(rook));
        assert_eq!(grid.count(), 1);
    }

    #[test]
    fn perform_and_revert_are_inverse() {
        let mut grid = Grid::default();
        let rook = Piece::new(PieceKind::Rook, Color::White, PieceId(1));
        let pawn = Piece::new(PieceKind::Pawn, Color::Black, PieceId(2));
        grid.set(sq("h1"), Some(rook));
        grid.set(sq("d5"), Some(pawn));
        let before = grid;

        let castle = SideEffect::CastleRook {
            from: sq("h1"),
            to: sq("f1"),
        };
        let en_passant = SideEffect::EnPassant {
            captured_at: sq("d5"),
            pawn,
        };
        grid.perform(castle);
        grid.perform(en_passant);
        assert_eq!(grid.get(sq("f1")), Some(rook));
        assert!(grid.is_empty(sq("d5")));

        grid.revert(en_passant);
        grid.revert(castle);
        assert_eq!(grid, before);
    }

    #[test]
    fn find_king_by_color() {
        let mut grid = Grid::default();
        grid.set(
            sq("e8"),
            Some(Piece::new(PieceKind::King, Color::Black, PieceId(0))),
        );
        assert_eq!(grid.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(grid.find_king(Color::White), None);
    }
}
