//! UCI command formatting and sentinel matching — spec §4.4/§6.2.

/// A line completes a pending sentinel wait by case-insensitive equality, or
/// by case-insensitive prefix (used for `bestmove …`) — spec §4.4.
pub fn sentinel_matches(expected: &str, line: &str) -> bool {
    let expected = expected.to_ascii_lowercase();
    let line = line.trim().to_ascii_lowercase();
    line == expected || line.starts_with(&expected)
}

pub fn fmt_ucinewgame() -> String {
    "ucinewgame".to_string()
}

pub fn fmt_isready() -> String {
    "isready".to_string()
}

pub fn fmt_quit() -> String {
    "quit".to_string()
}

pub fn fmt_debug(on: bool) -> String {
    format!("debug {}", if on { "on" } else { "off" })
}

pub fn fmt_position_fen(fen: &str) -> String {
    format!("position fen {fen}")
}

pub fn fmt_position_startpos(moves: &[String]) -> String {
    if moves.is_empty() {
        "position startpos".to_string()
    } else {
        format!("position startpos moves {}", moves.join(" "))
    }
}

pub fn fmt_go_movetime(movetime_ms: u64) -> String {
    format!("go movetime {movetime_ms}")
}

/// The three shapes `setoption`'s value argument can take (spec §4.4).
#[derive(Debug, Clone)]
pub enum SetOptionValue {
    Button,
    Check(bool),
    Other(String),
}

pub fn fmt_set_option(name: &str, value: &SetOptionValue) -> String {
    match value {
        SetOptionValue::Button => format!("setoption name {name}"),
        SetOptionValue::Check(v) => format!("setoption name {name} value {v}"),
        SetOptionValue::Other(v) => format!("setoption name {name} value {v}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_equality_is_case_insensitive() {
        assert!(sentinel_matches("uciok", "UCIOK"));
        assert!(!sentinel_matches("uciok", "readyok"));
    }

    #[test]
    fn sentinel_prefix_matches_bestmove_with_trailing_fields() {
        assert!(sentinel_matches("bestmove", "bestmove e2e4 ponder e7e5"));
    }

    #[test]
    fn set_option_formatting_matches_type() {
        assert_eq!(fmt_set_option("Ponder", &SetOptionValue::Check(true)), "setoption name Ponder value true");
        assert_eq!(fmt_set_option("Clear Hash", &SetOptionValue::Button), "setoption name Clear Hash");
    }
}
