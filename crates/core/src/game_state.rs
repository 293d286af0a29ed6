//! Game state module - the board engine
//!
//! Ties together board, pieces, RNG and scoring. The engine holds no I/O
//! handles: every operation reports what changed through its return value and
//! the driver decides what to play, draw or persist.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::board::{Board, MAX_CLEARED_ROWS};
use crate::effects::Effects;
use crate::pieces::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{calculate_level, calculate_score, gravity_frames, is_double_roll};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Cue, GameAction, Phase, BOARD_HEIGHT, BOARD_WIDTH};

/// Frame counter wraps here so it never overflows in a long session
const FRAME_WRAP: u32 = 100_000;

/// Victory condition: fill `columns` columns of `rows_per_column` cleared rows each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgressTrack {
    pub columns: u32,
    pub rows_per_column: u32,
}

impl ProgressTrack {
    pub fn new(columns: u32, rows_per_column: u32) -> Self {
        Self {
            columns,
            rows_per_column,
        }
    }

    /// Cleared rows needed for victory
    pub fn capacity(&self) -> u32 {
        self.columns.saturating_mul(self.rows_per_column)
    }
}

/// Fixed rules chosen when the engine is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub width: u8,
    pub height: u8,
    /// Start in [`Phase::Waiting`] until a confirm signal arrives
    pub welcome_stage: bool,
    /// Enables the victory condition
    pub progress: Option<ProgressTrack>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            welcome_stage: false,
            progress: None,
        }
    }
}

/// Everything that changed when a piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Grid positions the piece was written into
    pub cells: [(i8, i8); 4],
    /// Lock was forced by a hard drop
    pub hard_drop: bool,
    /// Cleared row indices, in scan order
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
    /// Points from the line table before doubling
    pub base_score: u32,
    /// Points added to the score
    pub score_delta: u32,
    pub doubled: bool,
    /// Level after the lock
    pub level: u32,
    /// This lock filled the progress track
    pub victory: bool,
    /// The replacement piece spawned into locked cells
    pub topped_out: bool,
}

impl LockEvent {
    pub fn lines_cleared(&self) -> usize {
        self.rows.len()
    }

    /// Sound cues, in the order they should play
    pub fn cues(&self) -> ArrayVec<Cue, 3> {
        let mut cues = ArrayVec::new();
        cues.push(Cue::Land);
        if !self.rows.is_empty() {
            cues.push(Cue::Clear);
        }
        if self.doubled {
            cues.push(Cue::Double);
        }
        cues
    }
}

/// Result of feeding the engine an action or a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Left the welcome stage
    Started,
    /// Piece shifted or stepped down without locking
    Moved,
    Rotated,
    Locked(LockEvent),
    /// A finished game was replaced by a fresh one
    Restarted,
}

impl GameEvent {
    pub fn cues(&self) -> ArrayVec<Cue, 3> {
        match self {
            GameEvent::Rotated => {
                let mut cues = ArrayVec::new();
                cues.push(Cue::Rotate);
                cues
            }
            GameEvent::Locked(lock) => lock.cues(),
            _ => ArrayVec::new(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    rules: Rules,
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    rng: R,
    phase: Phase,
    score: u32,
    level: u32,
    high_score: u32,
    /// Cleared rows counted toward the progress track
    progress: u32,
    effects: Effects,
    frame: u32,
}

impl GameState<SimpleRng> {
    /// Default rules, seeded RNG, no previous high score
    pub fn with_seed(seed: u32) -> Self {
        Self::new(Rules::default(), SimpleRng::new(seed), 0)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Build an engine.
    ///
    /// Without a welcome stage the game starts immediately and the first piece is
    /// already in play.
    pub fn new(rules: Rules, rng: R, high_score: u32) -> Self {
        let mut state = Self {
            rules,
            board: Board::new(rules.width, rules.height),
            active: None,
            next: None,
            rng,
            phase: Phase::Waiting,
            score: 0,
            level: calculate_level(0),
            high_score,
            progress: 0,
            effects: Effects::new(),
            frame: 0,
        };
        if !rules.welcome_stage {
            state.start();
        }
        state
    }

    /// Leave the welcome stage and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Waiting {
            return false;
        }
        self.phase = Phase::Playing;
        self.spawn_next();
        trace!(phase = ?self.phase, "game started");
        true
    }

    /// Replace a finished game with a fresh one, keeping the RNG and the high score.
    ///
    /// Only valid once the game is over.
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_over() {
            return false;
        }
        self.settle_high_score();
        self.board = Board::new(self.rules.width, self.rules.height);
        self.active = None;
        self.next = None;
        self.phase = Phase::Waiting;
        self.score = 0;
        self.level = calculate_level(0);
        self.progress = 0;
        self.effects.clear();
        self.frame = 0;
        if !self.rules.welcome_stage {
            self.start();
        }
        true
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Direct access to the active piece for setting up positions
    pub fn active_mut(&mut self) -> Option<&mut Piece> {
        self.active.as_mut()
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn victory(&self) -> bool {
        self.phase == Phase::Victory
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn progress_capacity(&self) -> Option<u32> {
        self.rules.progress.map(|track| track.capacity())
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Raise the high score to the current score if it is higher.
    ///
    /// Returns the new high score when it changed, so the caller can persist it.
    pub fn settle_high_score(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            debug!(high_score = self.high_score, "new high score");
            Some(self.high_score)
        } else {
            None
        }
    }

    /// Promote the look-ahead piece to active and draw a new look-ahead
    pub fn spawn_next(&mut self) {
        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => Piece::random(&mut self.rng),
        };
        self.active = Some(promoted);
        self.next = Some(Piece::random(&mut self.rng));
        trace!(kind = ?promoted.kind, color = ?promoted.color, "spawned piece");
    }

    /// Is the active piece off the grid or on a locked cell?
    pub fn collides(&self) -> bool {
        self.active
            .map(|piece| self.board.collides(&piece))
            .unwrap_or(false)
    }

    /// Shift the active piece horizontally.
    ///
    /// Rejected without mutation if the piece's occupied columns would leave the
    /// grid or the new position overlaps locked cells.
    pub fn shift(&mut self, delta: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let (min_col, max_col) = piece.column_span();
        let span = piece.x.checked_add(delta).and_then(|new_x| {
            Some((new_x.checked_add(min_col)?, new_x.checked_add(max_col)?))
        });
        let Some((left, right)) = span else {
            return false;
        };
        if left < 0 || right >= self.board.width() as i8 {
            return false;
        }

        let moved = piece.shifted(delta, 0);
        if self.board.collides(&moved) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Move the active piece one row down, locking it where it stands if it cannot move.
    pub fn step_down(&mut self) -> Option<GameEvent> {
        if !self.is_playing() {
            return None;
        }
        let piece = self.active?;

        let moved = piece.shifted(0, 1);
        if self.board.collides(&moved) {
            return self.lock_active(false).map(GameEvent::Locked);
        }
        self.active = Some(moved);
        Some(GameEvent::Moved)
    }

    /// Drop the active piece to the lowest legal row and lock it
    pub fn hard_drop(&mut self) -> Option<LockEvent> {
        if !self.is_playing() {
            return None;
        }
        let mut piece = self.active?;

        // Terminates: every step moves down and the grid has a floor.
        while !self.board.collides(&piece) {
            piece.y += 1;
        }
        piece.y -= 1;
        self.active = Some(piece);

        self.lock_active(true)
    }

    /// Rotate the active piece with a horizontal-only wall kick.
    ///
    /// After advancing the rotation the piece is pushed left while it sticks out
    /// past the right wall, then right while its anchor is left of the grid. If it
    /// still collides, rotation and column are both restored.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(original) = self.active else {
            return false;
        };

        let mut piece = original;
        piece.rotate();

        let width = self.board.width() as i8;
        while piece.x + piece.width() > width {
            piece.x -= 1;
        }
        while piece.x < 0 {
            piece.x += 1;
        }

        if self.board.collides(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Apply one input action
    pub fn apply_action(&mut self, action: GameAction) -> Option<GameEvent> {
        match action {
            GameAction::MoveLeft => self.shift(-1).then_some(GameEvent::Moved),
            GameAction::MoveRight => self.shift(1).then_some(GameEvent::Moved),
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => self.hard_drop().map(GameEvent::Locked),
            GameAction::Rotate => self.rotate().then_some(GameEvent::Rotated),
            GameAction::Confirm => match self.phase {
                Phase::Waiting => self.start().then_some(GameEvent::Started),
                Phase::Over | Phase::Victory => self.restart().then_some(GameEvent::Restarted),
                Phase::Playing => None,
            },
        }
    }

    /// Advance one frame: count effects down and apply gravity when it is due.
    pub fn tick(&mut self) -> Option<GameEvent> {
        self.effects.advance();
        self.frame = (self.frame + 1) % FRAME_WRAP;

        if self.is_playing() && self.frame % self.gravity_frames() == 0 {
            return self.step_down();
        }
        None
    }

    /// Frames between gravity steps at the current level
    pub fn gravity_frames(&self) -> u32 {
        gravity_frames(self.level)
    }

    /// Lock, clear, score, check progress, respawn, check top-out.
    fn lock_active(&mut self, hard_drop: bool) -> Option<LockEvent> {
        let piece = self.active.take()?;

        let cells = self.board.lock_piece(&piece);
        let rows = self.board.clear_full_rows();
        let lines = rows.len();

        let doubled = hard_drop && lines > 0 && self.roll_double();
        let result = calculate_score(lines, doubled);
        self.score = self.score.saturating_add(result.total);
        self.effects.on_lock(&rows, result.doubled);
        self.level = calculate_level(self.score);

        let mut victory = false;
        if let Some(capacity) = self.progress_capacity() {
            for _ in 0..lines {
                self.progress = self.progress.saturating_add(1);
                if self.progress >= capacity && self.phase == Phase::Playing {
                    self.phase = Phase::Victory;
                    victory = true;
                }
            }
        }

        self.spawn_next();
        let topped_out = self.collides();
        if topped_out && self.phase == Phase::Playing {
            self.phase = Phase::Over;
        }

        if lines > 0 {
            debug!(
                lines,
                score_delta = result.total,
                doubled = result.doubled,
                score = self.score,
                level = self.level,
                "rows cleared"
            );
        }
        if victory {
            debug!(progress = self.progress, "progress track filled");
        }
        if topped_out {
            debug!(score = self.score, "topped out");
        }

        Some(LockEvent {
            cells,
            hard_drop,
            rows,
            base_score: result.base,
            score_delta: result.total,
            doubled: result.doubled,
            level: self.level,
            victory,
            topped_out,
        })
    }

    /// Roll for double score at the current (pre-lock) level
    fn roll_double(&mut self) -> bool {
        let roll = self.rng.roll_percent();
        is_double_roll(roll, self.level)
    }

    /// Copy the renderer-facing state into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.high_score = self.high_score;
        out.progress = self.progress;
        out.progress_capacity = self.progress_capacity();
        out.clear_effects.clear();
        out.clear_effects.extend(self.effects.active_lines().copied());
        out.double_timer = self.effects.double_timer();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
