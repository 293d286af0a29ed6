//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Keys with no
//! meaning to the game are dropped here and never reach the engine.

pub mod map;

pub use blockfall_types as types;

pub use map::{accepts, handle_key_event, should_quit};
