//! Value types shared by every layer of the rules engine.
//!
//! Pieces, colors, moves, statuses and the auxiliary records the board keeps
//! for reversible history all live here so that move generation, the move
//! engine and search can agree on one vocabulary.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::grid::Grid;
pub use crate::game_state::square_index::{Direction, Square};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank on which this color's pawns start.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which this color's pawns promote.
    #[inline]
    pub const fn last_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank holding this color's king and rooks at the start.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    /// Also doubles as "no promotion chosen" inside a [`Move`].
    #[default]
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may become, in the order move generation fans them out.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    /// Lowercase letter used by FEN and long algebraic notation.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Stable per-piece identity assigned when the piece is placed.
///
/// Two rooks of the same color compare unequal through their ids, which is
/// what castling-rights bookkeeping is keyed on. A promoted piece keeps the
/// id of the pawn it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

/// An immutable (kind, color) pair plus its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub id: PieceId,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, id: PieceId) -> Self {
        Self { kind, color, id }
    }

    /// Same identity and color, different kind. Used for promotion and its undo.
    #[inline]
    pub const fn with_kind(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

/// A requested or recorded relocation.
///
/// `promotion == PieceKind::Pawn` means no promotion was chosen. A move whose
/// `to` equals its `from` marks "promotion completed on this square" when a
/// history is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: PieceKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: PieceKind::Pawn,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// History marker for a promotion chosen after the pawn arrived on `square`.
    #[inline]
    pub const fn promotion_marker(square: Square, promotion: PieceKind) -> Self {
        Self {
            from: square,
            to: square,
            promotion,
        }
    }

    #[inline]
    pub fn is_promotion_marker(self) -> bool {
        self.from == self.to
    }

    #[inline]
    pub fn has_promotion(self) -> bool {
        self.promotion != PieceKind::Pawn
    }
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    AwaitingPromotion,
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl GameStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::InsufficientMaterial
        )
    }
}

/// Board mutation performed in addition to the primary relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    /// The rook that travelled with a castling king.
    CastleRook { from: Square, to: Square },
    /// The pawn removed by an en-passant capture.
    EnPassant { captured_at: Square, pawn: Piece },
}

impl SideEffect {
    /// The effect as an auxiliary move for presentation layers. En-passant
    /// removals have no destination.
    pub fn as_relocation(self) -> (Square, Option<Square>) {
        match self {
            SideEffect::CastleRook { from, to } => (from, Some(to)),
            SideEffect::EnPassant { captured_at, .. } => (captured_at, None),
        }
    }
}

/// When a king or rook first left its square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstMove {
    /// Loaded from a position whose castling field withheld the right.
    BeforeSetup,
    AtPly(usize),
}
