//! The named end-to-end scenarios (spec §8).

use chessrelay::board::Board;
use chessrelay::model::{Color, Square};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

#[test]
fn white_pawn_two_step_sets_en_passant_and_passes_the_move() {
    let mut board = Board::new();
    assert!(board.apply_move(sq("e2"), sq("e4")));
    let fen = board.to_fen();
    let fields: Vec<&str> = fen.split(' ').collect();
    assert_eq!(fields[1], "b");
    assert_eq!(fields[3], "e3");
}

#[test]
fn lone_pawn_promotes_to_queen_without_a_callback() {
    let mut board = Board::from_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(board.apply_move(sq("e7"), sq("e8")));
    assert_eq!(board.read_square(0, 4), 'Q');
    assert_eq!(board.position().halfmove_clock, 0);
}

#[test]
fn kingside_castle_relocates_the_rook_and_clears_white_rights() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(board.apply_move(sq("e1"), sq("g1")));
    assert_eq!(board.read_square(7, 5), 'R');
    let fen = board.to_fen();
    let rights = fen.split(' ').nth(2).unwrap();
    assert!(!rights.contains('K'));
    assert!(!rights.contains('Q'));
    assert!(rights.contains('k'));
    assert!(rights.contains('q'));
}

#[test]
fn en_passant_capture_follows_the_enabling_double_step() {
    let mut board = Board::new();
    assert!(board.apply_move(sq("e2"), sq("e4")));
    assert!(board.apply_move(sq("a7"), sq("a6")));
    assert!(board.apply_move(sq("e4"), sq("e5")));
    assert!(board.apply_move(sq("d7"), sq("d5")));
    assert!(board.apply_move(sq("e5"), sq("d6")));

    assert_eq!(board.read_square(3, 3), '.');
    assert_eq!(board.read_square(2, 3), 'P');
}

#[test]
fn pinned_knight_cannot_move_off_the_pin_line() {
    let mut board = Board::from_fen("4r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(!board.apply_move(sq("e2"), sq("d4")));
    assert_eq!(board.to_fen(), "4r3/8/8/8/8/8/4N3/4K3 w - - 0 1");
}

#[test]
fn castling_after_the_rook_has_moved_and_returned_is_still_forfeited() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(board.apply_move(sq("a1"), sq("a2")));
    assert!(board.apply_move(sq("h8"), sq("h7")));
    assert!(!board.apply_move(sq("e1"), sq("c1")));
}

#[test]
fn fresh_board_reports_white_to_move_and_no_check() {
    let board = Board::new();
    assert_eq!(board.side_to_move(), Color::White);
    assert!(!board.is_in_check(Color::White));
}
