//! Terminal front end for the engine.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled cells, then
//! flushes only the cells that changed since the previous frame. No widget
//! toolkit: board cells are drawn two columns wide so they look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
