use std::fmt;

use crate::model::{PieceKind, Square};

/// Long-algebraic move text: two squares and an optional promotion letter —
/// `e2e4`, `e7e8q` (spec §4.5, §6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongAlgebraic {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl LongAlgebraic {
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self { from, to, promotion }
    }

    /// Parses `"e2e4"` or `"e7e8q"`. Anything else (wrong length, unknown
    /// promotion letter, invalid squares) yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 4 && s.len() != 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.len() {
            4 => None,
            5 => Some(promotion_from_letter(s.as_bytes()[4] as char)?),
            _ => unreachable!(),
        };
        Some(Self { from, to, promotion })
    }
}

pub fn promotion_from_letter(c: char) -> Option<PieceKind> {
    match c.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

pub fn promotion_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Queen => 'q',
        PieceKind::Rook => 'r',
        PieceKind::Bishop => 'b',
        PieceKind::Knight => 'n',
        _ => unreachable!("only Q/R/B/N are valid promotion targets"),
    }
}

impl fmt::Display for LongAlgebraic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", promotion_letter(kind))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let mv = LongAlgebraic::parse("e2e4").unwrap();
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e2e4");

        let promo = LongAlgebraic::parse("e7e8q").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Queen));
        assert_eq!(promo.to_string(), "e7e8q");
    }

    #[test]
    fn rejects_bad_length_and_bad_promotion_letter() {
        assert!(LongAlgebraic::parse("e2e").is_none());
        assert!(LongAlgebraic::parse("e2e4x").is_none());
    }
}
