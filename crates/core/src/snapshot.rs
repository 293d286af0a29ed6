use crate::effects::{flash_visible, ClearEffect};
use crate::pieces::Piece;
use crate::types::{Color, PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub color: Color,
    /// Occupied cells in grid coordinates
    pub cells: [(i8, i8); 4],
    /// Occupied cells relative to the anchor, for previews
    pub minos: [(i8, i8); 4],
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color,
            cells: value.positions(),
            minos: value.minos(),
        }
    }
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major palette ids, 0 = empty
    pub board: Vec<u8>,
    pub active: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub progress: u32,
    pub progress_capacity: Option<u32>,
    /// Line effects still on screen
    pub clear_effects: Vec<ClearEffect>,
    pub double_timer: u8,
}

impl GameSnapshot {
    /// Palette id at (x, y), or None if out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.board.get(y * self.width as usize + x).copied()
    }

    pub fn clear(&mut self) {
        self.width = BOARD_WIDTH;
        self.height = BOARD_HEIGHT;
        self.board.clear();
        self.board
            .resize(BOARD_WIDTH as usize * BOARD_HEIGHT as usize, 0);
        self.active = None;
        self.next = None;
        self.phase = Phase::Waiting;
        self.score = 0;
        self.level = 1;
        self.high_score = 0;
        self.progress = 0;
        self.progress_capacity = None;
        self.clear_effects.clear();
        self.double_timer = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn double_active(&self) -> bool {
        self.double_timer > 0
    }

    /// Whether the double-score flash is lit this frame
    pub fn double_flash_visible(&self) -> bool {
        flash_visible(self.double_timer)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: Vec::new(),
            active: None,
            next: None,
            phase: Phase::Waiting,
            score: 0,
            level: 1,
            high_score: 0,
            progress: 0,
            progress_capacity: None,
            clear_effects: Vec::new(),
            double_timer: 0,
        };
        s.clear();
        s
    }
}
