use std::fmt;

use super::Color;

/// Which side of the board a castle move crosses toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

const WK: u8 = 0b0001;
const WQ: u8 = 0b0010;
const BK: u8 = 0b0100;
const BQ: u8 = 0b1000;

/// The 4-bit castling-rights set {WK, WQ, BK, BQ} — spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(WK | WQ | BK | BQ);

    #[inline]
    fn bit(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => WK,
            (Color::White, CastleSide::Queen) => WQ,
            (Color::Black, CastleSide::King) => BK,
            (Color::Black, CastleSide::Queen) => BQ,
        }
    }

    #[inline]
    pub fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit(color, side);
    }

    #[inline]
    pub fn clear(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit(color, side);
    }

    /// Clears both rights for a color, e.g. when its king moves.
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::King);
        self.clear(color, CastleSide::Queen);
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field (`"KQkq"`, any subset, or `"-"`).
    /// Unrecognized letters are simply ignored, matching the permissive
    /// subset-of-KQkq contract in spec §6.1 — a FEN with a stray letter in
    /// this field is flagged at a higher level where field-shape is checked.
    pub fn from_fen_field(s: &str) -> Self {
        let mut rights = Self::NONE;
        for c in s.chars() {
            match c {
                'K' => rights.set(Color::White, CastleSide::King),
                'Q' => rights.set(Color::White, CastleSide::Queen),
                'k' => rights.set(Color::Black, CastleSide::King),
                'q' => rights.set(Color::Black, CastleSide::Queen),
                _ => {}
            }
        }
        rights
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        if self.has(Color::White, CastleSide::King) {
            f.write_str("K")?;
        }
        if self.has(Color::White, CastleSide::Queen) {
            f.write_str("Q")?;
        }
        if self.has(Color::Black, CastleSide::King) {
            f.write_str("k")?;
        }
        if self.has(Color::Black, CastleSide::Queen) {
            f.write_str("q")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_renders_dash() {
        assert_eq!(CastlingRights::NONE.to_string(), "-");
    }

    #[test]
    fn parses_subset_in_kqkq_order() {
        let rights = CastlingRights::from_fen_field("Kq");
        assert!(rights.has(Color::White, CastleSide::King));
        assert!(rights.has(Color::Black, CastleSide::Queen));
        assert!(!rights.has(Color::White, CastleSide::Queen));
        assert_eq!(rights.to_string(), "Kq");
    }

    #[test]
    fn clear_color_drops_both_sides() {
        let mut rights = CastlingRights::ALL;
        rights.clear_color(Color::White);
        assert_eq!(rights.to_string(), "kq");
    }
}
