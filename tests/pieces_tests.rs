//! Piece tests: shape tables, rotation and random selection

use blockfall::core::{get_shape, Piece, ScriptedRng};
use blockfall::types::{Color, PieceKind, SPAWN_POSITION};

#[test]
fn test_every_shape_has_four_distinct_cells() {
    for kind in PieceKind::ALL {
        for rotation in 0..kind.rotation_count() {
            let mut shape = get_shape(kind, rotation);
            shape.sort_unstable();
            assert!(shape.windows(2).all(|w| w[0] != w[1]), "{:?} r{}", kind, rotation);
            assert!(shape.iter().all(|&i| i < 16));
        }
    }
}

#[test]
fn test_shape_tables() {
    assert_eq!(get_shape(PieceKind::I, 0), [1, 5, 9, 13]);
    assert_eq!(get_shape(PieceKind::I, 1), [4, 5, 6, 7]);
    assert_eq!(get_shape(PieceKind::O, 0), [1, 2, 5, 6]);
    assert_eq!(get_shape(PieceKind::T, 0), [1, 4, 5, 6]);
    assert_eq!(get_shape(PieceKind::L, 3), [3, 5, 6, 7]);
    // Rotation index wraps.
    assert_eq!(get_shape(PieceKind::Z, 2), get_shape(PieceKind::Z, 0));
}

#[test]
fn test_rotation_cycles_back() {
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind, Color::Green);
        let start = piece.positions();
        for _ in 0..kind.rotation_count() {
            piece.rotate();
        }
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece.positions(), start, "{:?}", kind);
    }
}

#[test]
fn test_positions_are_anchor_relative() {
    let mut piece = Piece::new(PieceKind::T, Color::Red);
    assert_eq!((piece.x, piece.y), SPAWN_POSITION);
    assert_eq!(piece.positions(), [(4, 0), (3, 1), (4, 1), (5, 1)]);

    piece = piece.shifted(2, 5);
    assert_eq!(piece.positions(), [(6, 5), (5, 6), (6, 6), (7, 6)]);
    assert_eq!(piece.width(), 3);
}

#[test]
fn test_random_draws_kind_then_color() {
    let mut rng = ScriptedRng::new(vec![5, 3, 12, 8]);
    let first = Piece::random(&mut rng);
    assert_eq!(first.kind, PieceKind::T);
    assert_eq!(first.color, Color::Green);

    // Values wrap modulo the table sizes.
    let second = Piece::random(&mut rng);
    assert_eq!(second.kind, PieceKind::T);
    assert_eq!(second.color, Color::Brown);
}
