//! Shared data types and constants
//!
//! Everything in this crate is plain data with no dependencies, so the engine,
//! the input mapper and the terminal view can all agree on one vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn anchor**: (3, 0); row 0 doubles as the spawn buffer and is never cleared
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `GRAVITY_FPS` | 30 | Gravity divisor: one step every `GRAVITY_FPS / level` frames |
//! | `CLEAR_EFFECT_FRAMES` | 30 | Lifetime of a clearing-line glow |
//! | `DOUBLE_SCORE_FRAMES` | 30 | Lifetime of the double-score flash |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::J.rotation_count(), 4);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity divisor. At level `n` the piece steps down every `GRAVITY_FPS / n` frames.
pub const GRAVITY_FPS: u32 = 30;

/// Frames a clearing-line glow stays on screen
pub const CLEAR_EFFECT_FRAMES: u8 = 30;

/// Starting glow intensity of a cleared line
pub const CLEAR_EFFECT_INTENSITY: u8 = 255;

/// Frames the "2x" marker is drawn on a cleared line (the first half of its glow)
pub const CLEAR_EFFECT_LABEL_FRAMES: u8 = 15;

/// Frames the double-score flash stays active
pub const DOUBLE_SCORE_FRAMES: u8 = 30;

/// Points awarded for clearing N rows with one lock
///
/// - 0 rows: 0
/// - 1 row: 100
/// - 2 rows: 300
/// - 3 rows: 700
/// - 4 rows: 1500
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Score needed per level
pub const POINTS_PER_LEVEL: u32 = 2000;

/// Double-score chance at level 1, in percent
pub const DOUBLE_CHANCE_BASE: u32 = 10;

/// Extra double-score chance per level above 1, in percent
pub const DOUBLE_CHANCE_PER_LEVEL: u32 = 3;

/// Upper bound on the double-score chance, in percent
pub const DOUBLE_CHANCE_CAP: u32 = 50;


/// The seven tetromino piece kinds, in catalog order
///
/// Catalog order matters: random selection draws an index into [`PieceKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    Z,
    S,
    J,
    L,
    T,
    O,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Number of distinct rotation states
    pub fn rotation_count(&self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::Z | PieceKind::S => 2,
            PieceKind::J | PieceKind::L | PieceKind::T => 4,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::T => "t",
            PieceKind::O => "o",
        }
    }
}

/// Block colors. Palette index 0 is the background and has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Purple,
    Cyan,
    Brown,
    Green,
    Red,
    Pink,
}

impl Color {
    /// All block colors in palette order (ids 1..=6)
    pub const ALL: [Color; 6] = [
        Color::Purple,
        Color::Cyan,
        Color::Brown,
        Color::Green,
        Color::Red,
        Color::Pink,
    ];

    /// Palette index, 1-based
    pub fn id(&self) -> u8 {
        match self {
            Color::Purple => 1,
            Color::Cyan => 2,
            Color::Brown => 3,
            Color::Green => 4,
            Color::Red => 5,
            Color::Pink => 6,
        }
    }

    /// Inverse of [`Color::id`]. Returns `None` for the background (0) and unknown ids.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=6 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// 24-bit RGB value
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Purple => (0x78, 0x25, 0xB3),
            Color::Cyan => (0x64, 0xB3, 0xB3),
            Color::Brown => (0x50, 0x22, 0x16),
            Color::Green => (0x50, 0x86, 0x16),
            Color::Red => (0xB4, 0x22, 0x16),
            Color::Pink => (0xB4, 0x22, 0x7A),
        }
    }
}

/// Engine lifecycle
///
/// `Waiting -> Playing -> {Over, Victory}`. Both terminal phases only accept a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Welcome stage, waiting for a confirm signal
    Waiting,
    Playing,
    /// Topped out
    Over,
    /// Progress track filled. Also counts as over.
    Victory,
}

impl Phase {
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Over | Phase::Victory)
    }
}

/// Actions a driver can feed into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift piece one column left
    MoveLeft,
    /// Shift piece one column right
    MoveRight,
    /// Step piece one row down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// Advance to the next rotation state
    Rotate,
    /// Leave the welcome stage, or restart after the game ended
    Confirm,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "confirm" => Some(GameAction::Confirm),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Confirm => "confirm",
        }
    }
}

/// Audible cues for whoever plays sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Rotate,
    Land,
    Clear,
    Double,
}

/// A cell on the board: empty, or a locked block of some color
pub type Cell = Option<Color>;
