//! Parses `bestmove`/`info` lines and applies the result to a [`Board`] —
//! spec §4.5.

use crate::board::Board;
use crate::model::Piece;
use crate::notation::LongAlgebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Centipawns(i32),
    MatePlies(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMoveResult {
    pub mv: LongAlgebraic,
    pub ponder: Option<LongAlgebraic>,
    pub score: Option<Score>,
}

/// Parses a `bestmove <m> [ponder <p>]` sentinel line.
pub fn parse_bestmove_line(line: &str) -> Option<BestMoveResult> {
    let rest = line.trim().strip_prefix("bestmove ")?;
    let mut tokens = rest.split_whitespace();
    let mv = LongAlgebraic::parse(tokens.next()?)?;
    let ponder = match tokens.next() {
        Some("ponder") => tokens.next().and_then(LongAlgebraic::parse),
        _ => None,
    };
    Some(BestMoveResult { mv, ponder, score: None })
}

/// Scans buffered `info …` lines for the last `score cp <n>` or `score mate
/// <n>` pair — the two are mutually exclusive, whichever appears last in the
/// buffer wins (spec §4.4).
pub fn latest_score(info_lines: &[String]) -> Option<Score> {
    let mut latest = None;
    for line in info_lines {
        let mut tokens = line.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok != "score" {
                continue;
            }
            match tokens.next() {
                Some("cp") => {
                    if let Some(n) = tokens.next().and_then(|s| s.parse().ok()) {
                        latest = Some(Score::Centipawns(n));
                    }
                }
                Some("mate") => {
                    if let Some(n) = tokens.next().and_then(|s| s.parse().ok()) {
                        latest = Some(Score::MatePlies(n));
                    }
                }
                _ => {}
            }
        }
    }
    latest
}

impl BestMoveResult {
    /// Replays this move onto `board`. When a promotion suffix is present,
    /// temporarily installs a single-shot chooser that returns the requested
    /// piece, then restores whatever chooser was registered before (spec
    /// §4.5, §9's "polymorphic promotion chooser").
    pub fn apply_to(&self, board: &mut Board) -> bool {
        let Some(kind) = self.mv.promotion else {
            return board.apply_move(self.mv.from, self.mv.to);
        };
        let color = board.side_to_move();
        let piece = Piece::new(color, kind);
        let previous = board.swap_promotion_chooser(Some(Box::new(move |_, _| piece)));
        let applied = board.apply_move(self.mv.from, self.mv.to);
        board.swap_promotion_chooser(previous);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PieceKind, Square};

    #[test]
    fn parses_plain_bestmove() {
        let result = parse_bestmove_line("bestmove e2e4").unwrap();
        assert_eq!(result.mv.from, Square::from_algebraic("e2").unwrap());
        assert_eq!(result.mv.to, Square::from_algebraic("e4").unwrap());
        assert_eq!(result.ponder, None);
    }

    #[test]
    fn parses_bestmove_with_ponder_and_promotion() {
        let result = parse_bestmove_line("bestmove e7e8q ponder a7a6").unwrap();
        assert_eq!(result.mv.promotion, Some(PieceKind::Queen));
        assert!(result.ponder.is_some());
    }

    #[test]
    fn latest_score_prefers_the_last_info_line() {
        let lines = vec![
            "info depth 1 score cp 30".to_string(),
            "info depth 5 score mate 3".to_string(),
        ];
        assert_eq!(latest_score(&lines), Some(Score::MatePlies(3)));
    }

    #[test]
    fn apply_to_installs_promotion_then_restores_previous_chooser() {
        let mut board = Board::from_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board.set_promotion_chooser(|_, _| Piece::WhiteRook);
        let result = parse_bestmove_line("bestmove e7e8q").unwrap();
        assert!(result.apply_to(&mut board));
        assert_eq!(board.read_square(0, 4), 'Q');
    }
}
