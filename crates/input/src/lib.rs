//! Terminal input for the console (engine-facing).
//!
//! Maps `crossterm` key events onto the controller [`Action`](types::Action)s
//! and adds held-key repeat for the d-pad, including terminals without
//! key-release events. [`TerminalInput`] plugs the result into a session as
//! its [`InputSource`](ledtris_engine::InputSource).

pub mod map;
pub mod repeat;
pub mod terminal;

pub use ledtris_types as types;

pub use map::{is_quit, map_key};
pub use repeat::{HorizontalDirection, RepeatHandler};
pub use terminal::TerminalInput;
