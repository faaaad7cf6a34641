use super::{CastlingRights, Color, Piece, Square};

/// The authoritative board state: an 8×8 grid of pieces, the side to move,
/// castling rights, the en-passant target, and both clocks — spec §3
/// Position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: [Piece; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            grid: [Piece::Empty; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    #[inline]
    pub fn at(&self, sq: Square) -> Piece {
        self.grid[sq.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.grid[sq.index() as usize] = piece;
    }

    pub fn squares_with(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        (0..64).filter_map(move |ix| {
            let sq = Square::new(ix);
            (self.at(sq).color() == Some(color)).then_some(sq)
        })
    }

    /// Locates the unique king of `color`, if present. `apply_move` treats
    /// its absence as an aborted, rolled-back move (spec §3 invariants).
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let mut found = None;
        for ix in 0..64 {
            let sq = Square::new(ix);
            let piece = self.at(sq);
            if piece.color() == Some(color) && piece.kind() == Some(super::PieceKind::King) {
                if found.is_some() {
                    return None; // more than one king: treat as absent/invalid
                }
                found = Some(sq);
            }
        }
        found
    }
}

/// A frozen copy of an entire [`Position`], sufficient to reverse exactly one
/// move — spec §3 Snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot(Position);

impl Snapshot {
    pub fn capture(position: &Position) -> Self {
        Self(position.clone())
    }

    pub fn restore(self) -> Position {
        self.0
    }
}

/// One applied move, kept for `uci_move_list`, `undo`, and rendering —
/// spec §3 Move record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub is_castle_kingside: bool,
    pub is_castle_queenside: bool,
    pub is_promotion: bool,
    pub captured_piece: Option<Piece>,
    pub promoted_to: Option<Piece>,
    pub gives_check: bool,
    pub gives_checkmate: bool,
}
