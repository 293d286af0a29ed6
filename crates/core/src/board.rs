//! Board module - manages the game grid
//!
//! The grid is `height` rows of `width` cells, stored as a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Row 0 is the spawn buffer: it is never scanned for full rows and never
//! touched by compaction.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Most rows a single lock can complete: a piece spans at most four rows.
pub const MAX_CLEARED_ROWS: usize = 4;

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Dimensions are clamped to 1..=120 so every coordinate fits in an `i8`
    /// with room for the 4x4 piece box.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.clamp(1, 120);
        let height = height.clamp(1, 120);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// A row's cells, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Does the piece overlap a locked cell or leave the grid (either side or the bottom)?
    pub fn collides(&self, piece: &Piece) -> bool {
        piece
            .positions()
            .iter()
            .any(|&(x, y)| !self.is_valid(x, y))
    }

    /// Write the piece's color into every cell it occupies.
    ///
    /// The caller guarantees the position is legal; cells outside the grid are skipped.
    /// Returns the grid positions that were written.
    pub fn lock_piece(&mut self, piece: &Piece) -> [(i8, i8); 4] {
        let positions = piece.positions();
        for &(x, y) in &positions {
            self.set(x, y, Some(piece.color));
        }
        positions
    }

    /// Clear every full row from row 1 downwards and compact the rows above it.
    ///
    /// Rows are scanned in ascending index order. Each full row `r` is removed by
    /// copying row `r-1` into `r` for `r` down to 2 and emptying row 1. Row 0 is
    /// left alone. Returns the cleared row indices in scan order.
    ///
    /// At most [`MAX_CLEARED_ROWS`] rows are cleared per call, which is all a
    /// single lock can fill. Any further full rows stay on the board for the
    /// next call.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = self.width as usize;

        for y in 1..self.height as usize {
            if cleared_rows.is_full() {
                break;
            }
            if !self.is_row_full(y) {
                continue;
            }
            cleared_rows.push(y);

            // Shift rows 1..y down by one; copy_within handles the overlap.
            for row in (2..=y).rev() {
                let src_start = (row - 1) * width;
                self.cells
                    .copy_within(src_start..src_start + width, row * width);
            }
            self.cells[width..2 * width].fill(None);
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write palette ids (0 = empty) into `out`, reusing its allocation
    pub fn write_u8_grid(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|cell| cell.map_or(0, |c| c.id())));
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, one string per row, top first.
    ///
    /// `.` is empty; any other character is a locked block. Rows beyond the
    /// board height and characters beyond its width are ignored.
    #[cfg(test)]
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        use crate::types::Color;

        let mut board = Self::new(width, height);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set(x as i8, y as i8, Some(Color::Red));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let board = Board::new(0, 200);
        assert_eq!(board.width(), 1);
        assert_eq!(board.height(), 120);
    }

    #[test]
    fn test_collides_at_side_walls() {
        let board = Board::default();
        // Vertical I occupies local column 1.
        let mut piece = Piece::new(PieceKind::I, Color::Cyan);

        piece.x = -1;
        assert!(!board.collides(&piece));
        piece.x = -2;
        assert!(board.collides(&piece));

        piece.x = 8;
        assert!(!board.collides(&piece));
        piece.x = 9;
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_collides_at_floor() {
        let board = Board::default();
        let mut piece = Piece::new(PieceKind::I, Color::Cyan);

        // Vertical I spans local rows 0..=3.
        piece.y = 16;
        assert!(!board.collides(&piece));
        piece.y = 17;
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_collides_with_locked_cell() {
        let mut board = Board::default();
        let piece = Piece::new(PieceKind::O, Color::Red);
        assert!(!board.collides(&piece));

        // O occupies (4,0),(5,0),(4,1),(5,1) at spawn.
        board.set(5, 1, Some(Color::Green));
        assert!(board.collides(&piece));
        board.set(5, 1, None);
        board.set(6, 1, Some(Color::Green));
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_single_row_clear_shifts_rows_above() {
        let mut board = Board::from_rows(
            4,
            5,
            &["x...", "..x.", ".x..", "xxxx", "x..x"],
        );

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[3]);

        // Row 0 untouched, row 1 emptied, rows 1..=2 moved down.
        assert!(board.is_occupied(0, 0));
        assert_eq!(board.row(1), Some(&[None, None, None, None][..]));
        assert!(board.is_occupied(2, 2));
        assert!(board.is_occupied(1, 3));
        assert!(!board.is_occupied(2, 3));
        assert!(board.is_occupied(0, 4));
        assert!(board.is_occupied(3, 4));
    }

    #[test]
    fn test_row_zero_never_clears() {
        let mut board = Board::from_rows(3, 4, &["xxx", "...", "...", "..."]);
        assert!(board.clear_full_rows().is_empty());
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_full_row_one_is_emptied() {
        let mut board = Board::from_rows(3, 4, &["x..", "xxx", "...", "..."]);
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[1]);
        assert!(board.row(1).unwrap().iter().all(|c| c.is_none()));
        assert!(board.is_occupied(0, 0));
    }

    #[test]
    fn test_multiple_rows_clear_in_ascending_order() {
        let mut board = Board::from_rows(
            3,
            6,
            &["...", ".x.", "xxx", "x..", "xxx", "xxx"],
        );
        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[2, 4, 5]);

        // Survivors (.x. and x..) settle at the bottom in their original order.
        assert_eq!(board.row(5).unwrap(), &[Some(Color::Red), None, None][..]);
        assert_eq!(board.row(4).unwrap(), &[None, Some(Color::Red), None][..]);
        for y in 1..4 {
            assert!(board.row(y).unwrap().iter().all(|c| c.is_none()));
        }
    }

    #[test]
    fn test_lock_piece_writes_color() {
        let mut board = Board::default();
        let mut piece = Piece::new(PieceKind::T, Color::Pink);
        piece.y = 18;

        let written = board.lock_piece(&piece);
        // T spawn state: cells 1,4,5,6.
        assert_eq!(written, [(4, 18), (3, 19), (4, 19), (5, 19)]);
        for (x, y) in written {
            assert_eq!(board.get(x, y), Some(Some(Color::Pink)));
        }
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new(2, 2);
        board.set(1, 1, Some(Color::Brown));
        let mut out = vec![9; 10];
        board.write_u8_grid(&mut out);
        assert_eq!(out, vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_clear_stops_after_four_rows() {
        let mut board = Board::from_rows(
            3,
            8,
            &["...", "...", "xxx", "xxx", "xxx", "xxx", "xxx", "xxx"],
        );

        assert_eq!(board.clear_full_rows().as_slice(), &[2, 3, 4, 5]);
        assert!(board.is_row_full(6));
        assert!(board.is_row_full(7));

        assert_eq!(board.clear_full_rows().as_slice(), &[6, 7]);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
