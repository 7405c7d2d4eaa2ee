use crate::game_state::chess_types::*;
use crate::moves::piece_rules::PieceRules;

pub struct PawnMoves;

impl PawnMoves {
    /// Square of the pawn an en-passant capture `from -> to` would remove,
    /// if such a capture is available right now.
    fn en_passant_victim(state: &GameState, color: Color, from: Square, to: Square) -> Option<Square> {
        let victim = Square::at(to.file(), from.rank());
        if state.last_double_step != Some(victim) || !state.grid.is_empty(to) {
            return None;
        }
        let pawn = state.grid.get(victim)?;
        pawn.is(PieceKind::Pawn, color.opposite()).then_some(victim)
    }
}

impl PieceRules for PawnMoves {
    fn is_legal_move(
        state: &GameState,
        color: Color,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> bool {
        let reaches_last_rank = to.rank() == color.last_rank();
        if reaches_last_rank {
            if promotion == PieceKind::King {
                return false;
            }
        } else if promotion != PieceKind::Pawn {
            return false;
        }

        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        let forward = color.forward();
        let grid = &state.grid;

        if df == 0 && dr == forward {
            return grid.is_empty(to);
        }
        if df == 0 && dr == 2 * forward {
            return from.rank() == color.pawn_rank()
                && from.offset(0, forward).is_some_and(|mid| grid.is_empty(mid))
                && grid.is_empty(to);
        }
        if df.abs() == 1 && dr == forward {
            return match grid.get(to) {
                Some(target) => target.color != color,
                None => Self::en_passant_victim(state, color, from, to).is_some(),
            };
        }
        false
    }

    fn attacks_square(_grid: &Grid, color: Color, current: Square, target: Square) -> bool {
        let df = target.file() as i8 - current.file() as i8;
        let dr = target.rank() as i8 - current.rank() as i8;
        df.abs() == 1 && dr == color.forward()
    }

    fn candidate_moves(state: &GameState, color: Color, from: Square, out: &mut Vec<Move>) {
        let forward = color.forward();
        let targets = [
            from.offset(0, forward),
            from.offset(0, 2 * forward),
            from.offset(-1, forward),
            from.offset(1, forward),
        ];

        for to in targets.into_iter().flatten() {
            if to.rank() == color.last_rank() {
                for kind in PieceKind::PROMOTIONS {
                    if Self::is_legal_move(state, color, from, to, kind) {
                        out.push(Move::with_promotion(from, to, kind));
                    }
                }
            } else if Self::is_legal_move(state, color, from, to, PieceKind::Pawn) {
                out.push(Move::new(from, to));
            }
        }
    }

    fn plan_side_effect(state: &GameState, piece: Piece, mv: Move) -> Option<SideEffect> {
        if mv.from.file() == mv.to.file() {
            return None;
        }
        let captured_at = Self::en_passant_victim(state, piece.color, mv.from, mv.to)?;
        let pawn = state.grid.get(captured_at)?;
        Some(SideEffect::EnPassant { captured_at, pawn })
    }

    fn apply_side_effects(
        state: &mut GameState,
        piece: Piece,
        mv: Move,
        effect: Option<SideEffect>,
        ply: usize,
    ) {
        if mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            state.last_double_step = Some(mv.to);
        }

        if let Some(effect @ SideEffect::EnPassant { .. }) = effect {
            state.grid.perform(effect);
            state.side_effect_at.insert(ply, effect);
            state.piece_count -= 1;
        }

        if mv.to.rank() == piece.color.last_rank() {
            if mv.has_promotion() {
                state.grid.set(mv.to, Some(piece.with_kind(mv.promotion)));
            } else {
                state.pending_promotion = Some(mv.to);
            }
        }
    }
}
