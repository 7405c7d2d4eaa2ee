//! Per-variant movement rules and their dispatch table.
//!
//! Each piece kind implements [`PieceRules`] in its own module. The free
//! functions below pick the implementation for a piece and apply the checks
//! every variant shares (own-piece targets, promotion requests on non-pawns).

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::BishopMoves;
use crate::moves::king_moves::KingMoves;
use crate::moves::knight_moves::KnightMoves;
use crate::moves::pawn_moves::PawnMoves;
use crate::moves::queen_moves::QueenMoves;
use crate::moves::rook_moves::RookMoves;

/// Shape, attack and side-effect behaviour of one piece kind.
///
/// None of these consider whether the mover's own king ends up attacked; that
/// filtering belongs to the legality checks in `move_generation`.
pub trait PieceRules {
    /// Shape/capture rule for moving a `color` piece of this kind. `to` is
    /// known not to hold a piece of the same color.
    fn is_legal_move(
        state: &GameState,
        color: Color,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> bool;

    /// Whether a `color` piece of this kind standing on `current` attacks `target`.
    fn attacks_square(grid: &Grid, color: Color, current: Square, target: Square) -> bool;

    /// Pseudo-legal moves from `from`, appended to `out`.
    fn candidate_moves(state: &GameState, color: Color, from: Square, out: &mut Vec<Move>);

    /// Side effect the move would trigger, decided before anything is mutated.
    fn plan_side_effect(_state: &GameState, _piece: Piece, _mv: Move) -> Option<SideEffect> {
        None
    }

    /// Bookkeeping after `piece` has been relocated for ply `ply`.
    fn apply_side_effects(
        _state: &mut GameState,
        _piece: Piece,
        _mv: Move,
        _effect: Option<SideEffect>,
        _ply: usize,
    ) {
    }
}

/// Shape/capture legality of `from -> to` for whatever stands on `from`.
pub fn is_legal_move(state: &GameState, from: Square, to: Square, promotion: PieceKind) -> bool {
    let Some(piece) = state.grid.get(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    if let Some(target) = state.grid.get(to) {
        if target.color == piece.color {
            return false;
        }
    }
    if piece.kind != PieceKind::Pawn && promotion != PieceKind::Pawn {
        return false;
    }

    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => PawnMoves::is_legal_move(state, color, from, to, promotion),
        PieceKind::Knight => KnightMoves::is_legal_move(state, color, from, to, promotion),
        PieceKind::Bishop => BishopMoves::is_legal_move(state, color, from, to, promotion),
        PieceKind::Rook => RookMoves::is_legal_move(state, color, from, to, promotion),
        PieceKind::Queen => QueenMoves::is_legal_move(state, color, from, to, promotion),
        PieceKind::King => KingMoves::is_legal_move(state, color, from, to, promotion),
    }
}

pub fn attacks_square(grid: &Grid, piece: Piece, current: Square, target: Square) -> bool {
    if current == target {
        return false;
    }
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => PawnMoves::attacks_square(grid, color, current, target),
        PieceKind::Knight => KnightMoves::attacks_square(grid, color, current, target),
        PieceKind::Bishop => BishopMoves::attacks_square(grid, color, current, target),
        PieceKind::Rook => RookMoves::attacks_square(grid, color, current, target),
        PieceKind::Queen => QueenMoves::attacks_square(grid, color, current, target),
        PieceKind::King => KingMoves::attacks_square(grid, color, current, target),
    }
}

/// Pseudo-legal moves of the piece on `from` (empty if the square is empty).
pub fn pseudo_legal_moves(state: &GameState, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    let Some(piece) = state.grid.get(from) else {
        return out;
    };
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => PawnMoves::candidate_moves(state, color, from, &mut out),
        PieceKind::Knight => KnightMoves::candidate_moves(state, color, from, &mut out),
        PieceKind::Bishop => BishopMoves::candidate_moves(state, color, from, &mut out),
        PieceKind::Rook => RookMoves::candidate_moves(state, color, from, &mut out),
        PieceKind::Queen => QueenMoves::candidate_moves(state, color, from, &mut out),
        PieceKind::King => KingMoves::candidate_moves(state, color, from, &mut out),
    }
    out
}

pub fn plan_side_effect(state: &GameState, piece: Piece, mv: Move) -> Option<SideEffect> {
    match piece.kind {
        PieceKind::Pawn => PawnMoves::plan_side_effect(state, piece, mv),
        PieceKind::King => KingMoves::plan_side_effect(state, piece, mv),
        _ => None,
    }
}

pub fn apply_side_effects(
    state: &mut GameState,
    piece: Piece,
    mv: Move,
    effect: Option<SideEffect>,
    ply: usize,
) {
    match piece.kind {
        PieceKind::Pawn => PawnMoves::apply_side_effects(state, piece, mv, effect, ply),
        PieceKind::Rook => RookMoves::apply_side_effects(state, piece, mv, effect, ply),
        PieceKind::King => KingMoves::apply_side_effects(state, piece, mv, effect, ply),
        _ => {}
    }
}

/// Keeps the candidates of `targets` that pass the piece's own shape rule.
pub(crate) fn push_if_legal(
    state: &GameState,
    from: Square,
    targets: impl IntoIterator<Item = Square>,
    out: &mut Vec<Move>,
) {
    for to in targets {
        if is_legal_move(state, from, to, PieceKind::Pawn) {
            out.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn start_position_pseudo_moves_per_piece() {
        let game = GameState::new_game();
        assert_eq!(pseudo_legal_moves(&game, sq("b1")).len(), 2);
        assert_eq!(pseudo_legal_moves(&game, sq("e2")).len(), 2);
        assert!(pseudo_legal_moves(&game, sq("a1")).is_empty());
        assert!(pseudo_legal_moves(&game, sq("e4")).is_empty());
    }

    #[test]
    fn non_pawn_promotion_request_is_rejected() {
        let game = GameState::new_game();
        assert!(is_legal_move(&game, sq("g1"), sq("f3"), PieceKind::Pawn));
        assert!(!is_legal_move(&game, sq("g1"), sq("f3"), PieceKind::Queen));
    }

    #[test]
    fn own_piece_targets_are_rejected() {
        let game = GameState::new_game();
        assert!(!is_legal_move(&game, sq("a1"), sq("a2"), PieceKind::Pawn));
        assert!(!is_legal_move(&game, sq("d1"), sq("e1"), PieceKind::Pawn));
    }
}
