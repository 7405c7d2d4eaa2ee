//! Shared geometry for bishops, rooks and queens.
//!
//! A slider reaches a square when both lie on one of its allowed lines and
//! every square strictly between them is empty.

use crate::game_state::chess_types::*;

/// Whether a slider moving along `directions` reaches `target` from `current`.
pub fn slides_to(grid: &Grid, directions: &[Direction], current: Square, target: Square) -> bool {
    match Direction::between(current, target) {
        Some(direction) if directions.contains(&direction) => {
            current.segment_between(target).all(|sq| grid.is_empty(sq))
        }
        _ => false,
    }
}

/// Walks each ray until the first blocker, keeping enemy-occupied stops.
pub fn slide_targets(
    grid: &Grid,
    color: Color,
    directions: &[Direction],
    from: Square,
    out: &mut Vec<Move>,
) {
    for &direction in directions {
        for to in from.ray(direction) {
            match grid.get(to) {
                None => out.push(Move::new(from, to)),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
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
    fn blocker_stops_slide() {
        let mut grid = Grid::default();
        grid.set(
            sq("a4"),
            Some(Piece::new(PieceKind::Pawn, Color::Black, PieceId(0))),
        );
        assert!(slides_to(&grid, &Direction::ORTHOGONAL, sq("a1"), sq("a4")));
        assert!(!slides_to(&grid, &Direction::ORTHOGONAL, sq("a1"), sq("a5")));
        assert!(!slides_to(&grid, &Direction::DIAGONAL, sq("a1"), sq("a3")));
    }

    #[test]
    fn slide_targets_include_capture_but_not_beyond() {
        let mut grid = Grid::default();
        grid.set(
            sq("a4"),
            Some(Piece::new(PieceKind::Pawn, Color::Black, PieceId(0))),
        );
        grid.set(
            sq("c1"),
            Some(Piece::new(PieceKind::Bishop, Color::White, PieceId(1))),
        );
        let mut out = Vec::new();
        slide_targets(&grid, Color::White, &Direction::ORTHOGONAL, sq("a1"), &mut out);
        let names: Vec<String> = out.iter().map(|m| m.to.to_string()).collect();
        assert_eq!(names, ["a2", "a3", "a4", "b1"]);
    }
}
