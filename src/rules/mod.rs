//! Pseudo-legal move generation and attack detection, as pure functions of a
//! [`crate::model::Position`] — spec §4.1 phase 3 and §4.2. Kept free of
//! history/rollback concerns so [`crate::board::Board`]'s checkmate search
//! can reuse them unchanged.

pub mod attacks;
pub mod castling;
pub mod pseudo_legal;

pub use attacks::is_square_attacked;
pub use pseudo_legal::{pseudo_legal_move_kind, MoveKind};
