//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! terminal, audio or storage dependencies, which makes it:
//!
//! - **Deterministic**: the same random source produces the same game
//! - **Testable**: scripted random sources force piece kinds and double-score rolls
//! - **Portable**: drivers for any front end read the same snapshot
//!
//! # Module Structure
//!
//! - [`pieces`]: the shape catalog and the falling [`Piece`]
//! - [`board`]: the grid, collision and row compaction
//! - [`rng`]: the injected entropy source
//! - [`scoring`]: line awards, double-score odds, level and gravity
//! - [`effects`]: presentation timers for cleared lines and double scores
//! - [`game_state`]: the engine tying it all together
//! - [`snapshot`]: a read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - **Uniform selection**: every piece kind and color is equally likely on each draw
//! - **Simple wall kick**: rotation only ever shifts the piece sideways, and is
//!   rejected outright if that does not find room
//! - **Spawn buffer**: row 0 is never cleared
//! - **Scoring**: 100/300/700/1500 for 1-4 rows; hard-drop clears may score double
//! - **Level**: `score / 2000 + 1`
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameEvent, GameState};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! let event = game.apply_action(GameAction::HardDrop);
//!
//! assert!(matches!(event, Some(GameEvent::Locked(_))));
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per frame. Gravity
//! steps the piece down every `30 / level` frames.

pub mod board;
pub mod effects;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use effects::{ClearEffect, Effects};
pub use game_state::{GameEvent, GameState, LockEvent, ProgressTrack, Rules};
pub use pieces::{get_shape, Piece};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{calculate_level, calculate_score, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
