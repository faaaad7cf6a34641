//! Long-algebraic move text shared by [`crate::board`] (`uci_move_list`) and
//! [`crate::uci`] (`bestmove` parsing) — spec §4.5, §6.2.

mod long_algebraic;

pub use long_algebraic::{promotion_from_letter, promotion_letter, LongAlgebraic};
