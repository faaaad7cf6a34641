//! Value types for the position model: squares, pieces, castling rights,
//! move records and snapshots. See [`crate::board`] for the authoritative
//! position these types describe.

mod castling;
mod position;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use position::{MoveRecord, Position, Snapshot};
pub use square::Square;

use strum::EnumIs;

/// One side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row direction a pawn of this color advances toward (−1 for White, +1
    /// for Black, matching spec §4.1's pawn dispatch).
    #[inline]
    pub fn pawn_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[inline]
    pub fn home_rank_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    #[inline]
    pub fn promotion_row(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }
}

/// A chessman kind, independent of color. Used for promotion choices and
/// pseudo-legal move dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Twelve non-empty variants plus an empty sentinel (spec §3 Piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    WhitePawn,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,
    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

impl Piece {
    #[inline]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        match (color, kind) {
            (Color::White, PieceKind::Pawn) => Self::WhitePawn,
            (Color::White, PieceKind::Knight) => Self::WhiteKnight,
            (Color::White, PieceKind::Bishop) => Self::WhiteBishop,
            (Color::White, PieceKind::Rook) => Self::WhiteRook,
            (Color::White, PieceKind::Queen) => Self::WhiteQueen,
            (Color::White, PieceKind::King) => Self::WhiteKing,
            (Color::Black, PieceKind::Pawn) => Self::BlackPawn,
            (Color::Black, PieceKind::Knight) => Self::BlackKnight,
            (Color::Black, PieceKind::Bishop) => Self::BlackBishop,
            (Color::Black, PieceKind::Rook) => Self::BlackRook,
            (Color::Black, PieceKind::Queen) => Self::BlackQueen,
            (Color::Black, PieceKind::King) => Self::BlackKing,
        }
    }

    /// Color is a pure function of the variant; `None` for the empty sentinel.
    #[inline]
    pub fn color(self) -> Option<Color> {
        use Piece::*;
        match self {
            Empty => None,
            WhitePawn | WhiteKnight | WhiteBishop | WhiteRook | WhiteQueen | WhiteKing => {
                Some(Color::White)
            }
            BlackPawn | BlackKnight | BlackBishop | BlackRook | BlackQueen | BlackKing => {
                Some(Color::Black)
            }
        }
    }

    #[inline]
    pub fn kind(self) -> Option<PieceKind> {
        use Piece::*;
        match self {
            Empty => None,
            WhitePawn | BlackPawn => Some(PieceKind::Pawn),
            WhiteKnight | BlackKnight => Some(PieceKind::Knight),
            WhiteBishop | BlackBishop => Some(PieceKind::Bishop),
            WhiteRook | BlackRook => Some(PieceKind::Rook),
            WhiteQueen | BlackQueen => Some(PieceKind::Queen),
            WhiteKing | BlackKing => Some(PieceKind::King),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// FEN piece letter, `.` for the empty sentinel.
    pub fn to_char(self) -> char {
        use Piece::*;
        match self {
            Empty => '.',
            WhitePawn => 'P',
            WhiteKnight => 'N',
            WhiteBishop => 'B',
            WhiteRook => 'R',
            WhiteQueen => 'Q',
            WhiteKing => 'K',
            BlackPawn => 'p',
            BlackKnight => 'n',
            BlackBishop => 'b',
            BlackRook => 'r',
            BlackQueen => 'q',
            BlackKing => 'k',
        }
    }

    /// Inverse of [`Piece::to_char`]; `None` for any letter that is not one
    /// of `PNBRQKpnbrqk`.
    pub fn from_char(c: char) -> Option<Piece> {
        use Piece::*;
        Some(match c {
            'P' => WhitePawn,
            'N' => WhiteKnight,
            'B' => WhiteBishop,
            'R' => WhiteRook,
            'Q' => WhiteQueen,
            'K' => WhiteKing,
            'p' => BlackPawn,
            'n' => BlackKnight,
            'b' => BlackBishop,
            'r' => BlackRook,
            'q' => BlackQueen,
            'k' => BlackKing,
            _ => return None,
        })
    }
}
