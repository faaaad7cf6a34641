//! The authoritative chess position: legality, history, FEN round-tripping —
//! spec §4.1.

mod checkmate;
mod fen;

pub use checkmate::{has_legal_reply, is_checkmate, is_in_check, is_stalemate};
pub use fen::STARTPOS_FEN;

use log::debug;

use crate::error::ChessRelayError;
use crate::model::{CastleSide, Color, MoveRecord, Piece, PieceKind, Position, Snapshot, Square};
use crate::notation::LongAlgebraic;
use crate::rules::{castling, is_square_attacked, pseudo_legal_move_kind, MoveKind};

type PromotionChooser = Box<dyn FnMut(Square, Square) -> Piece>;

/// The single source of truth for the current position (spec §4.1).
/// `apply_move`/`undo` are the only ways its grid changes; `from_fen` resets
/// it wholesale and clears history.
pub struct Board {
    position: Position,
    move_history: Vec<MoveRecord>,
    snapshot_history: Vec<Snapshot>,
    promotion_chooser: Option<PromotionChooser>,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::from_fen(STARTPOS_FEN).expect("startpos FEN is well-formed")
    }

    pub fn from_fen(s: &str) -> Result<Self, ChessRelayError> {
        let position = fen::parse_fen(s)?;
        Ok(Self {
            position,
            move_history: Vec::new(),
            snapshot_history: Vec::new(),
            promotion_chooser: None,
        })
    }

    /// Reloads this board in place from a new FEN. On failure the board is
    /// left completely unchanged (spec §4.1); on success both history stacks
    /// are cleared.
    pub fn load_fen(&mut self, s: &str) -> Result<(), ChessRelayError> {
        let position = fen::parse_fen(s)?;
        self.position = position;
        self.move_history.clear();
        self.snapshot_history.clear();
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(&self.position)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Read-only accessor for rendering; `'.'` for an empty square.
    pub fn read_square(&self, row: u8, col: u8) -> char {
        Square::from_row_col(row, col)
            .map(|sq| self.position.at(sq).to_char())
            .unwrap_or('.')
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.position, color)
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.position, color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        is_stalemate(&self.position, color)
    }

    /// Registers `f`, invoked exactly when a pawn reaches its last rank. A
    /// chooser that returns a non-promotion piece (or a piece of the wrong
    /// color) for the moving side is overridden to a queen (spec §4.1 phase
    /// 6, boundary behavior in §8).
    pub fn set_promotion_chooser(&mut self, f: impl FnMut(Square, Square) -> Piece + 'static) {
        self.promotion_chooser = Some(Box::new(f));
    }

    pub fn clear_promotion_chooser(&mut self) {
        self.promotion_chooser = None;
    }

    /// Swaps in a new chooser (or none) and returns whatever was installed
    /// before, so a caller (the UCI `BestMoveResult` applier, spec §9) can
    /// temporarily force one promotion piece and then restore the previous
    /// chooser afterward.
    pub(crate) fn swap_promotion_chooser(
        &mut self,
        new: Option<PromotionChooser>,
    ) -> Option<PromotionChooser> {
        std::mem::replace(&mut self.promotion_chooser, new)
    }

    /// Logs the §7 `IllegalMove` taxonomy entry and returns `false`; every
    /// rejection branch of `apply_move` routes through here so the error
    /// variant is actually built, not just declared.
    fn reject_illegal(&self) -> bool {
        debug!("{}", ChessRelayError::IllegalMove);
        false
    }

    fn choose_promotion(&mut self, from: Square, to: Square, color: Color) -> Piece {
        let chosen = match &mut self.promotion_chooser {
            Some(f) => f(from, to),
            None => Piece::new(color, PieceKind::Queen),
        };
        let valid_kind = matches!(
            chosen.kind(),
            Some(PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)
        );
        if chosen.color() == Some(color) && valid_kind {
            chosen
        } else {
            Piece::new(color, PieceKind::Queen)
        }
    }

    /// Attempts the move from `from` to `to`. Returns `true` iff it is fully
    /// legal; on `false` the position is byte-for-byte identical to the
    /// pre-call state (spec §4.1).
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        if from == to {
            return self.reject_illegal();
        }
        let mover = self.position.at(from);
        let Some(mover_color) = mover.color() else {
            return self.reject_illegal();
        };
        if mover_color != self.position.side_to_move {
            return self.reject_illegal();
        }

        let Some(kind) = pseudo_legal_move_kind(&self.position, from, to) else {
            return self.reject_illegal();
        };

        let snapshot = Snapshot::capture(&self.position);

        let mut is_capture = false;
        let mut is_en_passant = false;
        let captured_piece;

        if let MoveKind::EnPassantCapture = kind {
            is_en_passant = true;
            is_capture = true;
            let captured_sq = Square::from_row_col(from.row(), to.col()).unwrap();
            captured_piece = Some(self.position.at(captured_sq));
            self.position.set(captured_sq, Piece::Empty);
        } else {
            let occupant = self.position.at(to);
            if occupant.is_empty() {
                captured_piece = None;
            } else {
                is_capture = true;
                captured_piece = Some(occupant);
            }
        }

        self.position.set(to, mover);
        self.position.set(from, Piece::Empty);

        let (mut is_castle_kingside, mut is_castle_queenside) = (false, false);
        if let MoveKind::Castle(side) = kind {
            match side {
                CastleSide::King => is_castle_kingside = true,
                CastleSide::Queen => is_castle_queenside = true,
            }
            let rook_home = castling::rook_home(mover_color, side);
            let rook_to = castling::rook_destination(mover_color, side);
            let rook = self.position.at(rook_home);
            self.position.set(rook_to, rook);
            self.position.set(rook_home, Piece::Empty);
        }

        let mut is_promotion = false;
        let mut promoted_to = None;
        if mover.kind() == Some(PieceKind::Pawn) && to.row() == mover_color.promotion_row() {
            is_promotion = true;
            let chosen = self.choose_promotion(from, to, mover_color);
            self.position.set(to, chosen);
            promoted_to = Some(chosen);
        }

        self.update_castling_rights(mover, from, to, is_capture);

        let king_square = self.position.king_square(mover_color);
        let king_safe = king_square
            .map(|sq| !is_square_attacked(&self.position, sq, mover_color.opp()))
            .unwrap_or(false);
        if !king_safe {
            self.position = snapshot.restore();
            return self.reject_illegal();
        }

        self.position.en_passant = match kind {
            MoveKind::DoublePawnPush => {
                let skipped_row = (from.row() as i8 + mover_color.pawn_direction() as i8) as u8;
                Square::from_row_col(skipped_row, from.col())
            }
            _ => None,
        };

        if is_capture || mover.kind() == Some(PieceKind::Pawn) {
            self.position.halfmove_clock = 0;
        } else {
            self.position.halfmove_clock += 1;
        }
        if mover_color.is_black() {
            self.position.fullmove_number += 1;
        }

        self.position.side_to_move = mover_color.opp();

        let opponent = mover_color.opp();
        let gives_check = is_in_check(&self.position, opponent);
        let gives_checkmate = gives_check && !has_legal_reply(&self.position, opponent);

        self.snapshot_history.push(snapshot);
        self.move_history.push(MoveRecord {
            piece: mover,
            from,
            to,
            is_capture,
            is_en_passant,
            is_castle_kingside,
            is_castle_queenside,
            is_promotion,
            captured_piece,
            promoted_to,
            gives_check,
            gives_checkmate,
        });

        true
    }

    fn update_castling_rights(&mut self, moved: Piece, from: Square, to: Square, is_capture: bool) {
        if let Some(color) = moved.color() {
            if moved.kind() == Some(PieceKind::King) {
                self.position.castling_rights.clear_color(color);
            }
            if moved.kind() == Some(PieceKind::Rook) {
                for side in [CastleSide::King, CastleSide::Queen] {
                    if from == castling::rook_home(color, side) {
                        self.position.castling_rights.clear(color, side);
                    }
                }
            }
        }
        if is_capture {
            for color in [Color::White, Color::Black] {
                for side in [CastleSide::King, CastleSide::Queen] {
                    if to == castling::rook_home(color, side) {
                        self.position.castling_rights.clear(color, side);
                    }
                }
            }
        }
    }

    /// Rolls back the most recent successful move, returning its record
    /// (`None` if history is empty) — spec §4.1.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.move_history.pop()?;
        let snapshot = self
            .snapshot_history
            .pop()
            .expect("move/snapshot stacks stay in lockstep");
        self.position = snapshot.restore();
        Some(record)
    }

    /// Long-algebraic move history, suitable for `position startpos moves
    /// ...` (spec §4.1, §6.2).
    pub fn uci_move_list(&self) -> Vec<String> {
        self.move_history
            .iter()
            .map(|mv| {
                let promotion = mv.promoted_to.and_then(Piece::kind);
                LongAlgebraic::new(mv.from, mv.to, promotion).to_string()
            })
            .collect()
    }

    /// Convenience used by tests and the REPL: would this move be legal,
    /// without mutating `self`?
    pub fn would_be_legal(&self, from: &str, to: &str) -> bool {
        let (Some(from), Some(to)) = (Square::from_algebraic(from), Square::from_algebraic(to))
        else {
            return false;
        };
        let mut probe = Board {
            position: self.position.clone(),
            move_history: Vec::new(),
            snapshot_history: Vec::new(),
            promotion_chooser: None,
        };
        probe.apply_move(from, to)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_two_step_sets_en_passant_and_flips_side() {
        let mut board = Board::new();
        let from = Square::from_algebraic("e2").unwrap();
        let to = Square::from_algebraic("e4").unwrap();
        assert!(board.apply_move(from, to));
        assert!(board.to_fen().contains(" e3 "));
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn promotion_without_callback_defaults_to_queen() {
        let mut board = Board::from_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let from = Square::from_algebraic("e7").unwrap();
        let to = Square::from_algebraic("e8").unwrap();
        assert!(board.apply_move(from, to));
        assert_eq!(board.read_square(0, 4), 'Q');
        assert_eq!(board.position().halfmove_clock, 0);
    }

    #[test]
    fn callback_returning_invalid_piece_is_overridden_to_queen() {
        let mut board = Board::from_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board.set_promotion_chooser(|_, _| Piece::BlackKnight);
        let from = Square::from_algebraic("e7").unwrap();
        let to = Square::from_algebraic("e8").unwrap();
        assert!(board.apply_move(from, to));
        assert_eq!(board.read_square(0, 4), 'Q');
    }

    #[test]
    fn kingside_castle_moves_the_rook_and_clears_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let from = Square::from_algebraic("e1").unwrap();
        let to = Square::from_algebraic("g1").unwrap();
        assert!(board.apply_move(from, to));
        assert_eq!(board.read_square(7, 5), 'R');
        assert!(!board.to_fen().contains('K'));
        assert!(!board.to_fen().contains('Q'));
    }

    #[test]
    fn en_passant_capture_sequence() {
        let mut board = Board::new();
        for (from, to) in [
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("e5", "d6"),
        ] {
            let from = Square::from_algebraic(from).unwrap();
            let to = Square::from_algebraic(to).unwrap();
            assert!(board.apply_move(from, to), "expected {from}-{to} to be legal");
        }
        assert_eq!(board.read_square(2, 3), 'P'); // d6
        assert_eq!(board.read_square(3, 3), '.'); // d5 now empty
    }

    #[test]
    fn rook_move_then_restore_still_forfeits_castling_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        for (from, to) in [("a1", "a2"), ("h8", "h7"), ("a2", "a1"), ("h7", "h8")] {
            let from = Square::from_algebraic(from).unwrap();
            let to = Square::from_algebraic(to).unwrap();
            assert!(board.apply_move(from, to));
        }
        assert!(!board.would_be_legal("e1", "c1"));
    }

    #[test]
    fn illegal_move_leaves_fen_unchanged() {
        let mut board = Board::new();
        let before = board.to_fen();
        let from = Square::from_algebraic("e2").unwrap();
        let to = Square::from_algebraic("e5").unwrap();
        assert!(!board.apply_move(from, to));
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn undo_restores_pre_move_fen() {
        let mut board = Board::new();
        let before = board.to_fen();
        let from = Square::from_algebraic("g1").unwrap();
        let to = Square::from_algebraic("f3").unwrap();
        assert!(board.apply_move(from, to));
        let record = board.undo().unwrap();
        assert_eq!(record.from, from);
        assert_eq!(board.to_fen(), before);
    }

    #[test]
    fn uci_move_list_replays_to_same_fen() {
        let mut board = Board::new();
        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3")] {
            let from = Square::from_algebraic(from).unwrap();
            let to = Square::from_algebraic(to).unwrap();
            assert!(board.apply_move(from, to));
        }
        let moves = board.uci_move_list();

        let mut replay = Board::new();
        for mv in &moves {
            let parsed = LongAlgebraic::parse(mv).unwrap();
            assert!(replay.apply_move(parsed.from, parsed.to));
        }
        assert_eq!(replay.to_fen(), board.to_fen());
    }
}
