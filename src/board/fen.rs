use crate::error::{ChessRelayError, InvalidFenReason};
use crate::model::{CastlingRights, Color, Piece, Position, Square};

/// The standard starting position, used by `Board::new`/`Board::default`.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a six-field FEN into a [`Position`] — spec §4.1/§6.1. Field-by-field,
/// so each of the eight named rejection reasons can be reported precisely.
pub fn parse_fen(s: &str) -> Result<Position, ChessRelayError> {
    let fields: Vec<&str> = s.split(' ').filter(|f| !f.is_empty()).collect();
    if fields.len() != 6 {
        return Err(ChessRelayError::InvalidFen(InvalidFenReason::WrongFieldCount {
            found: fields.len(),
        }));
    }

    let mut position = Position::empty();
    parse_placement(fields[0], &mut position)?;
    parse_active_color(fields[1], &mut position)?;
    position.castling_rights = CastlingRights::from_fen_field(fields[2]);
    parse_en_passant(fields[3], &mut position)?;
    position.halfmove_clock = fields[4].parse().map_err(|_| {
        ChessRelayError::InvalidFen(InvalidFenReason::NonIntegerHalfmoveClock {
            found: fields[4].to_string(),
        })
    })?;
    position.fullmove_number = fields[5].parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
        ChessRelayError::InvalidFen(InvalidFenReason::NonIntegerFullmoveNumber {
            found: fields[5].to_string(),
        })
    })?;

    Ok(position)
}

fn parse_placement(field: &str, position: &mut Position) -> Result<(), ChessRelayError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessRelayError::InvalidFen(InvalidFenReason::WrongRankCount {
            found: ranks.len(),
        }));
    }

    for (rank_index, rank) in ranks.iter().enumerate() {
        let row = rank_index as u8;
        let mut col: u32 = 0;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ChessRelayError::InvalidFen(InvalidFenReason::RankFileCountNot8 {
                        rank_index,
                        total: col + run,
                    }));
                }
                for _ in 0..run {
                    if col < 8 {
                        position.set(Square::from_row_col(row, col as u8).unwrap(), Piece::Empty);
                    }
                    col += 1;
                }
            } else {
                let piece = Piece::from_char(c).ok_or(ChessRelayError::InvalidFen(
                    InvalidFenReason::UnrecognizedPieceLetter { letter: c },
                ))?;
                if col < 8 {
                    position.set(Square::from_row_col(row, col as u8).unwrap(), piece);
                }
                col += 1;
            }
        }
        if col != 8 {
            return Err(ChessRelayError::InvalidFen(InvalidFenReason::RankFileCountNot8 {
                rank_index,
                total: col,
            }));
        }
    }
    Ok(())
}

fn parse_active_color(field: &str, position: &mut Position) -> Result<(), ChessRelayError> {
    position.side_to_move = match field {
        "w" => Color::White,
        "b" => Color::Black,
        _ => {
            return Err(ChessRelayError::InvalidFen(InvalidFenReason::BadActiveColor {
                found: field.to_string(),
            }))
        }
    };
    Ok(())
}

fn parse_en_passant(field: &str, position: &mut Position) -> Result<(), ChessRelayError> {
    position.en_passant = if field == "-" {
        None
    } else {
        Some(Square::from_algebraic(field).ok_or_else(|| {
            ChessRelayError::InvalidFen(InvalidFenReason::BadEnPassantSquare {
                found: field.to_string(),
            })
        })?)
    };
    Ok(())
}

/// The inverse of [`parse_fen`]: always six fields, empty-square runs merged,
/// empty castling rights rendered as `-` (spec §4.1, §6.1).
pub fn to_fen(position: &Position) -> String {
    let mut placement = String::new();
    for row in 0..8 {
        if row > 0 {
            placement.push('/');
        }
        let mut empty_run = 0u32;
        for col in 0..8 {
            let sq = Square::from_row_col(row, col).unwrap();
            let piece = position.at(sq);
            if piece.is_empty() {
                empty_run += 1;
            } else {
                if empty_run > 0 {
                    placement.push_str(&empty_run.to_string());
                    empty_run = 0;
                }
                placement.push(piece.to_char());
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
    }

    let active_color = match position.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    };

    let en_passant = position
        .en_passant
        .map(|sq| sq.to_algebraic())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} {} {} {} {} {}",
        placement,
        active_color,
        position.castling_rights,
        en_passant,
        position.halfmove_clock,
        position.fullmove_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let pos = parse_fen(STARTPOS_FEN).unwrap();
        assert_eq!(to_fen(&pos), STARTPOS_FEN);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(ChessRelayError::InvalidFen(InvalidFenReason::WrongFieldCount { found: 5 }))
        );
    }

    #[test]
    fn rejects_rank_not_summing_to_eight() {
        let bad = "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            parse_fen(bad),
            Err(ChessRelayError::InvalidFen(InvalidFenReason::RankFileCountNot8 { .. }))
        ));
    }

    #[test]
    fn rejects_unrecognized_piece_letter() {
        let bad = "xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(
            parse_fen(bad),
            Err(ChessRelayError::InvalidFen(InvalidFenReason::UnrecognizedPieceLetter {
                letter: 'x'
            }))
        );
    }

    #[test]
    fn rejects_bad_en_passant_field() {
        let bad = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1";
        assert!(matches!(
            parse_fen(bad),
            Err(ChessRelayError::InvalidFen(InvalidFenReason::BadEnPassantSquare { .. }))
        ));
    }
}
