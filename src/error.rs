use std::fmt;

/// Why a FEN string was rejected — the eight concrete parse failures of
/// spec §4.1's `from_fen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidFenReason {
    WrongFieldCount { found: usize },
    WrongRankCount { found: usize },
    RankFileCountNot8 { rank_index: usize, total: u32 },
    UnrecognizedPieceLetter { letter: char },
    BadActiveColor { found: String },
    BadEnPassantSquare { found: String },
    NonIntegerHalfmoveClock { found: String },
    NonIntegerFullmoveNumber { found: String },
}

impl fmt::Display for InvalidFenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFieldCount { found } => {
                write!(f, "expected 6 space-separated fields, found {found}")
            }
            Self::WrongRankCount { found } => {
                write!(f, "expected 8 '/'-separated ranks, found {found}")
            }
            Self::RankFileCountNot8 { rank_index, total } => write!(
                f,
                "rank {rank_index} covers {total} files, expected 8"
            ),
            Self::UnrecognizedPieceLetter { letter } => {
                write!(f, "unrecognized piece letter '{letter}'")
            }
            Self::BadActiveColor { found } => {
                write!(f, "active color must be 'w' or 'b', found {found:?}")
            }
            Self::BadEnPassantSquare { found } => {
                write!(f, "en-passant field must be '-' or a square, found {found:?}")
            }
            Self::NonIntegerHalfmoveClock { found } => {
                write!(f, "halfmove clock must be a non-negative integer, found {found:?}")
            }
            Self::NonIntegerFullmoveNumber { found } => {
                write!(f, "fullmove number must be a positive integer, found {found:?}")
            }
        }
    }
}

/// Spec §7's error taxonomy. Only `InvalidFen` is surfaced as a typed
/// `Result` error — every other spec operation keeps the boolean/`Option`
/// contract the language-independent spec mandates, so those variants are
/// built only to be logged via their `Display` text at the point of failure
/// ([`crate::board::Board::apply_move`], [`crate::uci::UciDriver`]) rather
/// than returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessRelayError {
    InvalidFen(InvalidFenReason),
    IllegalMove,
    EngineUnavailable,
    EngineTimeout,
    EngineExited,
    ProtocolParse(String),
}

impl fmt::Display for ChessRelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFen(reason) => write!(f, "invalid FEN: {reason}"),
            Self::IllegalMove => write!(f, "illegal move"),
            Self::EngineUnavailable => write!(f, "engine executable unavailable"),
            Self::EngineTimeout => write!(f, "engine did not respond before the deadline"),
            Self::EngineExited => write!(f, "engine process exited"),
            Self::ProtocolParse(raw) => write!(f, "unparseable UCI line: {raw:?}"),
        }
    }
}

impl std::error::Error for ChessRelayError {}
