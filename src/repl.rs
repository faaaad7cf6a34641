//! Command tokenizing and the read-eval loop — spec §6.3. An external
//! collaborator per §1; kept thin, existing only so the library has a
//! runnable binary on the other end of [`crate::board::Board`] and
//! [`crate::uci::UciDriver`].

use regex::Regex;
use static_init::Lazy;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::board::Board;
use crate::model::Square;
use crate::uci::UciDriver;

static MOVE_PATTERN: Lazy<Regex> = Lazy::new(build_move_pattern);

fn build_move_pattern() -> Regex {
    Regex::new(r"^([a-h][1-8])\s*[-,]?\s*([a-h][1-8])$").expect("move pattern is a fixed valid regex")
}

/// One parsed line of REPL input (spec §6.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move { from: Square, to: Square },
    Undo,
    ShowFen,
    Reset,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one REPL line. `<from> <to>` accepts space, `-`, `,`, or no
/// separator at all (`"e2e4"`); everything else is matched against the fixed
/// command words, falling back to `Invalid`.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "undo" | "u" => return Command::Undo,
        "fen" => return Command::ShowFen,
        "reset" | "r" => return Command::Reset,
        "help" | "?" => return Command::Help,
        "quit" | "q" => return Command::Quit,
        _ => {}
    }

    if let Some(caps) = MOVE_PATTERN.captures(trimmed) {
        let from = Square::from_algebraic(&caps[1]);
        let to = Square::from_algebraic(&caps[2]);
        if let (Some(from), Some(to)) = (from, to) {
            return Command::Move { from, to };
        }
    }

    Command::Invalid(trimmed.to_string())
}

fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..8 {
        for col in 0..8 {
            out.push(board.read_square(row, col));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

const HELP_TEXT: &str = "\
moves: <from> <to> (e2e4, e2-e4, e2 e4, e2,e4)
undo (u) | fen | reset (r) | help (?) | quit (q)";

/// Drives the loop: read a line, parse it, act on the `Board`/`UciDriver`
/// pair, render, repeat. On a legal move, asks the driver for its best
/// reply and applies it before rendering again (spec §6.3).
pub async fn run(board: &mut Board, driver: &UciDriver) {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render(board));

    loop {
        print!("> ");
        let _ = std::io::Write::flush(&mut std::io::stdout());

        let line = match stdin.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => break,
        };

        match parse_command(&line) {
            Command::Move { from, to } => {
                if !board.apply_move(from, to) {
                    println!("illegal move");
                    continue;
                }
                if !driver.position_from_moves(&board.uci_move_list()).await {
                    println!("engine unavailable");
                    continue;
                }
                if let Some(result) = driver.best_move().await {
                    result.apply_to(board);
                    println!("engine plays {}", result.mv);
                } else {
                    println!("engine did not reply in time");
                }
                println!("{}", render(board));
            }
            Command::Undo => match board.undo() {
                Some(_) => println!("{}", render(board)),
                None => println!("nothing to undo"),
            },
            Command::ShowFen => println!("{}", board.to_fen()),
            Command::Reset => {
                let _ = board.load_fen(crate::board::STARTPOS_FEN);
                println!("{}", render(board));
            }
            Command::Help => println!("{HELP_TEXT}"),
            Command::Quit => break,
            Command::Invalid(raw) => println!("unrecognized command: {raw:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_documented_separator() {
        for text in ["e2e4", "e2-e4", "e2 e4", "e2,e4"] {
            let expected_from = Square::from_algebraic("e2").unwrap();
            let expected_to = Square::from_algebraic("e4").unwrap();
            assert_eq!(parse_command(text), Command::Move { from: expected_from, to: expected_to });
        }
    }

    #[test]
    fn recognizes_fixed_command_words_and_aliases() {
        assert_eq!(parse_command("undo"), Command::Undo);
        assert_eq!(parse_command("u"), Command::Undo);
        assert_eq!(parse_command("fen"), Command::ShowFen);
        assert_eq!(parse_command("reset"), Command::Reset);
        assert_eq!(parse_command("r"), Command::Reset);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn garbage_input_is_invalid_not_a_panic() {
        assert_eq!(parse_command("not a command"), Command::Invalid("not a command".to_string()));
        assert_eq!(parse_command(""), Command::Invalid(String::new()));
    }
}
