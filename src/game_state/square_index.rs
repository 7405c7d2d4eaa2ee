//! Flat 0..64 square indexing and compass ray walking.
//!
//! Square `0 == a1`, `7 == h1`, `63 == h8`. Squares are plain `Copy` values, so
//! every lookup is by value and no square is ever allocated.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Every square in index order.
    pub const ALL: [Square; 64] = all_squares();

    #[inline]
    pub const fn exists(file: i8, rank: i8) -> bool {
        file >= 0 && file < 8 && rank >= 0 && rank < 8
    }

    /// Square at `(file, rank)`.
    ///
    /// # Panics
    /// When the coordinates are off the board.
    #[inline]
    pub fn at(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square ({file}, {rank}) is off the board");
        Self(rank * 8 + file)
    }

    #[inline]
    pub fn try_at(file: i8, rank: i8) -> Option<Self> {
        if Self::exists(file, rank) {
            Some(Self((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// The square `(df, dr)` away, if it is on the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::try_at(self.file() as i8 + df, self.rank() as i8 + dr)
    }

    /// Squares walked from `self` in `direction`, origin excluded, until the edge.
    #[inline]
    pub fn ray(self, direction: Direction) -> Ray {
        Ray {
            current: self,
            direction,
        }
    }

    /// Squares strictly between `self` and `other`.
    ///
    /// # Panics
    /// When the two squares share no rank, file or diagonal.
    pub fn segment_between(self, other: Square) -> Segment {
        let direction = Direction::between(self, other).unwrap_or_else(|| {
            panic!("squares {self} and {other} are not on a common line")
        });
        Segment {
            ray: self.ray(direction),
            end: other,
        }
    }

    /// Whether nothing in `occupied` sits strictly between the two squares.
    /// Unaligned squares are never clear.
    pub fn is_path_clear(self, other: Square, mut occupied: impl FnMut(Square) -> bool) -> bool {
        Direction::between(self, other).is_some()
            && self.segment_between(other).all(|sq| !occupied(sq))
    }
}

const fn all_squares() -> [Square; 64] {
    let mut out = [Square(0); 64];
    let mut i = 0;
    while i < 64 {
        out[i] = Square(i as u8);
        i += 1;
    }
    out
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file()),
            char::from(b'1' + self.rank())
        )
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::InvalidSquare(s.to_owned()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Ok(Square::at(file, rank))
        } else {
            Err(ChessError::InvalidSquare(s.to_owned()))
        }
    }
}

/// The eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// `(file step, rank step)`.
    #[inline]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    /// Direction leading from `from` to `to` along a rank, file or diagonal.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let df = to.file() as i8 - from.file() as i8;
        let dr = to.rank() as i8 - from.rank() as i8;
        if (df, dr) == (0, 0) || (df != 0 && dr != 0 && df.abs() != dr.abs()) {
            return None;
        }
        let step = (df.signum(), dr.signum());
        Direction::ALL.into_iter().find(|d| d.delta() == step)
    }
}

/// Lazy walk from a square to the board edge. Restartable by cloning.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    direction: Direction,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let (df, dr) = self.direction.delta();
        let next = self.current.offset(df, dr)?;
        self.current = next;
        Some(next)
    }
}

/// Squares strictly between two aligned squares.
#[derive(Debug, Clone)]
pub struct Segment {
    ray: Ray,
    end: Square,
}

impl Iterator for Segment {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        self.ray.next().filter(|sq| *sq != self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square should parse")
    }

    #[test]
    fn coordinates_round_trip_through_notation() {
        assert_eq!(Square::at(0, 0).index(), 0);
        assert_eq!(Square::at(7, 7).index(), 63);
        assert_eq!(sq("e4"), Square::at(4, 3));
        assert_eq!(sq("h8").to_string(), "h8");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
    }

    #[test]
    fn exists_checks_both_bounds() {
        assert!(Square::exists(0, 7));
        assert!(!Square::exists(-1, 0));
        assert!(!Square::exists(0, 8));
    }

    #[test]
    #[should_panic]
    fn at_rejects_off_board() {
        let _ = Square::at(8, 0);
    }

    #[test]
    fn ray_stops_at_edge_and_skips_origin() {
        let from_d4: Vec<String> = sq("d4")
            .ray(Direction::NorthEast)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(from_d4, ["e5", "f6", "g7", "h8"]);
        assert_eq!(sq("h4").ray(Direction::East).count(), 0);
        assert_eq!(sq("a1").ray(Direction::North).count(), 7);
    }

    #[test]
    fn segment_excludes_both_ends() {
        let between: Vec<String> = sq("a1")
            .segment_between(sq("a5"))
            .map(|s| s.to_string())
            .collect();
        assert_eq!(between, ["a2", "a3", "a4"]);
        assert_eq!(sq("c3").segment_between(sq("d4")).count(), 0);
        assert_eq!(sq("h1").segment_between(sq("a8")).count(), 6);
    }

    #[test]
    #[should_panic]
    fn segment_requires_alignment() {
        let _ = sq("a1").segment_between(sq("b3"));
    }

    #[test]
    fn direction_between_detects_lines() {
        assert_eq!(Direction::between(sq("e1"), sq("h1")), Some(Direction::East));
        assert_eq!(Direction::between(sq("e4"), sq("b1")), Some(Direction::SouthWest));
        assert_eq!(Direction::between(sq("e4"), sq("f6")), None);
        assert_eq!(Direction::between(sq("e4"), sq("e4")), None);
    }
}
