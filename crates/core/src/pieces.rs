//! Pieces module - shape catalog and the active piece
//!
//! Every shape lives in a 4x4 local box. A rotation state is the list of the four
//! occupied cell indices in that box, where `index = row * 4 + col`.

use crate::rng::RandomSource;
use crate::types::{Color, PieceKind, SPAWN_POSITION};

/// Four occupied cell indices within the 4x4 local box
pub type PieceShape = [u8; 4];

/// Offset of a single mino relative to the piece anchor, as (col, row)
pub type MinoOffset = (i8, i8);

const I_ROTATIONS: [PieceShape; 2] = [[1, 5, 9, 13], [4, 5, 6, 7]];
const Z_ROTATIONS: [PieceShape; 2] = [[4, 5, 9, 10], [2, 6, 5, 9]];
const S_ROTATIONS: [PieceShape; 2] = [[6, 7, 9, 10], [1, 5, 6, 10]];
const J_ROTATIONS: [PieceShape; 4] = [[1, 2, 5, 9], [0, 4, 5, 6], [1, 5, 9, 8], [4, 5, 6, 10]];
const L_ROTATIONS: [PieceShape; 4] = [[1, 2, 6, 10], [5, 6, 7, 9], [2, 6, 10, 11], [3, 5, 6, 7]];
const T_ROTATIONS: [PieceShape; 4] = [[1, 4, 5, 6], [1, 4, 5, 9], [4, 5, 6, 9], [1, 5, 6, 9]];
const O_ROTATIONS: [PieceShape; 1] = [[1, 2, 5, 6]];

/// All rotation states of a piece kind, in rotation order
pub fn rotations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
        PieceKind::O => &O_ROTATIONS,
    }
}

/// Get the occupied cell indices for a piece kind and rotation.
///
/// The rotation index wraps, so any `u8` is accepted.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = rotations(kind);
    states[rotation as usize % states.len()]
}

/// Convert a local cell index into a (col, row) offset
#[inline(always)]
pub fn cell_offset(index: u8) -> MinoOffset {
    ((index % 4) as i8, (index / 4) as i8)
}

/// A falling tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into `rotations(kind)`
    pub rotation: u8,
    /// Grid column of the local box's left edge
    pub x: i8,
    /// Grid row of the local box's top edge
    pub y: i8,
    pub color: Color,
}

impl Piece {
    /// Create a piece at the spawn anchor in its first rotation state
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            color,
        }
    }

    /// Create a spawn-anchored piece with uniformly random kind and color.
    ///
    /// Draws the kind first, then the color.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let kind = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
        let color = Color::ALL[rng.next_range(Color::ALL.len() as u32) as usize];
        Self::new(kind, color)
    }

    /// Occupied local cell indices for the current rotation
    pub fn cells(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Occupied cells as (col, row) offsets from the anchor
    pub fn minos(&self) -> [MinoOffset; 4] {
        self.cells().map(cell_offset)
    }

    /// Occupied cells in grid coordinates
    pub fn positions(&self) -> [(i8, i8); 4] {
        self.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Advance to the next rotation state. Legality is the caller's problem.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.kind.rotation_count();
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Leftmost and rightmost occupied local columns
    pub fn column_span(&self) -> (i8, i8) {
        let minos = self.minos();
        let min = minos.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let max = minos.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
        (min, max)
    }

    /// Number of columns the current rotation spans
    pub fn width(&self) -> i8 {
        let (min, max) = self.column_span();
        max - min + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn test_every_rotation_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(rotations(kind).len(), kind.rotation_count() as usize);
            for shape in rotations(kind) {
                let mut sorted = *shape;
                sorted.sort_unstable();
                for pair in sorted.windows(2) {
                    assert_ne!(pair[0], pair[1], "{:?} has a duplicate cell", kind);
                }
                assert!(shape.iter().all(|&c| c < 16));
            }
        }
    }

    #[test]
    fn test_rotation_wraps_per_kind() {
        let mut piece = Piece::new(PieceKind::S, Color::Green);
        piece.rotate();
        assert_eq!(piece.rotation, 1);
        piece.rotate();
        assert_eq!(piece.rotation, 0);

        let mut o = Piece::new(PieceKind::O, Color::Red);
        o.rotate();
        assert_eq!(o.rotation, 0);
        assert_eq!(o.cells(), [1, 2, 5, 6]);
    }

    #[test]
    fn test_cell_offset() {
        assert_eq!(cell_offset(0), (0, 0));
        assert_eq!(cell_offset(5), (1, 1));
        assert_eq!(cell_offset(11), (3, 2));
        assert_eq!(cell_offset(13), (1, 3));
    }

    #[test]
    fn test_column_span() {
        // Vertical I occupies column 1 only.
        let i = Piece::new(PieceKind::I, Color::Cyan);
        assert_eq!(i.column_span(), (1, 1));
        assert_eq!(i.width(), 1);

        // L in its last state spans columns 1..=3.
        let mut l = Piece::new(PieceKind::L, Color::Purple);
        l.rotation = 3;
        assert_eq!(l.column_span(), (1, 3));
        assert_eq!(l.width(), 3);
    }

    #[test]
    fn test_random_piece_draws_kind_then_color() {
        let mut rng = ScriptedRng::new(vec![5, 2]);
        let piece = Piece::random(&mut rng);
        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.color, Color::Brown);
        assert_eq!((piece.x, piece.y), SPAWN_POSITION);
        assert_eq!(piece.rotation, 0);
    }
}
