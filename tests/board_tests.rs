//! Board tests: bounds, collision, locking and row compaction

use blockfall::core::{Board, Piece};
use blockfall::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, color: Color) {
    for x in 0..board.width() as i8 {
        board.set(x, y, Some(color));
    }
}

#[test]
fn test_default_board_is_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "cell ({}, {}) should be open", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_out_of_bounds() {
    let board = Board::new(6, 8);
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(6, 0), None);
    assert_eq!(board.get(0, 8), None);
    assert!(!board.is_valid(6, 3));
    assert!(!board.is_valid(2, 8));
}

#[test]
fn test_custom_dimensions_collide_at_their_edges() {
    let board = Board::new(6, 8);
    // Vertical I in column x + 1.
    let mut piece = Piece::new(PieceKind::I, Color::Cyan);
    piece.x = 4;
    assert!(!board.collides(&piece));
    piece.x = 5;
    assert!(board.collides(&piece));

    piece.x = 0;
    piece.y = 4;
    assert!(!board.collides(&piece));
    piece.y = 5;
    assert!(board.collides(&piece));
}

#[test]
fn test_lock_writes_piece_color() {
    let mut board = Board::default();
    let mut piece = Piece::new(PieceKind::T, Color::Pink);
    piece.y = 10;
    let cells = board.lock_piece(&piece);

    for &(x, y) in &cells {
        assert_eq!(board.get(x, y), Some(Some(Color::Pink)));
    }
    assert!(board.collides(&piece));
}

#[test]
fn test_clear_compacts_rows_above() {
    let mut board = Board::default();
    board.set(3, 17, Some(Color::Green));
    board.set(7, 18, Some(Color::Purple));
    fill_row(&mut board, 19, Color::Red);

    let rows = board.clear_full_rows();
    assert_eq!(rows.as_slice(), &[19]);

    assert_eq!(board.get(3, 18), Some(Some(Color::Green)));
    assert_eq!(board.get(7, 19), Some(Some(Color::Purple)));
    assert_eq!(board.get(3, 17), Some(None));
    assert!(!board.is_row_full(19));
}

#[test]
fn test_clear_reports_rows_in_scan_order() {
    let mut board = Board::default();
    fill_row(&mut board, 12, Color::Cyan);
    fill_row(&mut board, 19, Color::Cyan);
    board.set(0, 11, Some(Color::Brown));

    let rows = board.clear_full_rows();
    assert_eq!(rows.as_slice(), &[12, 19]);
    // The lone block fell twice.
    assert_eq!(board.get(0, 13), Some(Some(Color::Brown)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
}

#[test]
fn test_spawn_row_is_never_cleared() {
    let mut board = Board::default();
    fill_row(&mut board, 0, Color::Red);

    assert!(board.clear_full_rows().is_empty());
    assert!(board.is_row_full(0));
}

#[test]
fn test_full_top_playfield_row_does_not_repeat() {
    let mut board = Board::default();
    fill_row(&mut board, 1, Color::Red);

    assert_eq!(board.clear_full_rows().as_slice(), &[1]);
    assert!(!board.is_row_full(1));
    assert!(board.clear_full_rows().is_empty());
}
