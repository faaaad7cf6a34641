use crate::model::{CastleSide, Color, PieceKind, Position, Square};

use super::attacks::{pawn_attack_squares, path_empty};
use super::castling::castle_legal;

/// What kind of move `from -> to` would be, for a piece already confirmed to
/// belong to the side to move. Computed purely from geometry and blockers
/// (spec §4.1 phase 3); it says nothing about whether the mover's own king
/// ends up in check — that is [`crate::board::Board::apply_move`]'s phase 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    EnPassantCapture,
    Castle(CastleSide),
}

pub fn pseudo_legal_move_kind(pos: &Position, from: Square, to: Square) -> Option<MoveKind> {
    let piece = pos.at(from);
    let color = piece.color()?;
    let kind = piece.kind()?;
    if from == to {
        return None;
    }
    let own_occupied = pos.at(to).color() == Some(color);

    match kind {
        PieceKind::Pawn => pawn_move_kind(pos, from, to, color),
        PieceKind::Knight => {
            let dr = (from.row() as i8 - to.row() as i8).abs();
            let dc = (from.col() as i8 - to.col() as i8).abs();
            (!own_occupied && ((dr, dc) == (1, 2) || (dr, dc) == (2, 1))).then_some(MoveKind::Normal)
        }
        PieceKind::Bishop => diagonal_move(pos, from, to, own_occupied),
        PieceKind::Rook => orthogonal_move(pos, from, to, own_occupied),
        PieceKind::Queen => diagonal_move(pos, from, to, own_occupied)
            .or_else(|| orthogonal_move(pos, from, to, own_occupied)),
        PieceKind::King => king_move_kind(pos, from, to, color, own_occupied),
    }
}

fn pawn_move_kind(pos: &Position, from: Square, to: Square, color: Color) -> Option<MoveKind> {
    let dr = color.pawn_direction();
    let one_step_row = from.row() as i8 + dr;
    if one_step_row < 0 || one_step_row >= 8 {
        return None;
    }

    // Straight pushes never capture.
    if to.col() == from.col() {
        let one = Square::from_row_col(one_step_row as u8, from.col())?;
        if to == one && pos.at(to).is_empty() {
            return Some(MoveKind::Normal);
        }
        if from.row() == color.home_rank_row() {
            let two_step_row = one_step_row + dr as i8;
            if (0..8).contains(&two_step_row) {
                let two = Square::from_row_col(two_step_row as u8, from.col())?;
                if to == two && pos.at(one).is_empty() && pos.at(two).is_empty() {
                    return Some(MoveKind::DoublePawnPush);
                }
            }
        }
        return None;
    }

    // Diagonal: ordinary capture, or onto the en-passant target.
    if pawn_attack_squares(from, color).any(|sq| sq == to) {
        if pos.en_passant == Some(to) {
            return Some(MoveKind::EnPassantCapture);
        }
        if pos.at(to).color() == Some(color.opp()) {
            return Some(MoveKind::Normal);
        }
    }
    None
}

fn diagonal_move(pos: &Position, from: Square, to: Square, own_occupied: bool) -> Option<MoveKind> {
    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;
    (!own_occupied && dr.abs() == dc.abs() && dr != 0 && path_empty(pos, from, to, dr.signum(), dc.signum()))
        .then_some(MoveKind::Normal)
}

fn orthogonal_move(pos: &Position, from: Square, to: Square, own_occupied: bool) -> Option<MoveKind> {
    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;
    (!own_occupied
        && ((dr == 0) ^ (dc == 0))
        && path_empty(pos, from, to, dr.signum(), dc.signum()))
    .then_some(MoveKind::Normal)
}

fn king_move_kind(
    pos: &Position,
    from: Square,
    to: Square,
    color: Color,
    own_occupied: bool,
) -> Option<MoveKind> {
    let dr = (from.row() as i8 - to.row() as i8).abs();
    let dc = from.col() as i8 - to.col() as i8;
    if !own_occupied && dr <= 1 && dc.abs() <= 1 {
        return Some(MoveKind::Normal);
    }
    if dr == 0 && dc.abs() == 2 {
        let side = if dc < 0 {
            CastleSide::King
        } else {
            CastleSide::Queen
        };
        if castle_legal(pos, color, side) {
            return Some(MoveKind::Castle(side));
        }
    }
    None
}
