//! Terminal stand-in for the LED console.
//!
//! The real console drives a 10x20 RGB LED matrix and a seven-segment panel.
//! This crate draws the same picture in a terminal so the game can be played
//! and debugged on a desktop:
//!
//! - [`fb`]: character framebuffer
//! - [`console_view`]: pure layout of matrix, panel and message
//! - [`screen`]: raw-mode terminal plus diffed flushing
//! - [`display`]: [`TerminalDisplay`], the session-facing [`Display`](ledtris_engine::Display)
//!
//! Each LED is two terminal columns wide to keep the matrix roughly square.

pub mod console_view;
pub mod display;
pub mod fb;
pub mod screen;

pub use ledtris_core as core;
pub use ledtris_types as types;

pub use console_view::{ConsoleView, Panel, Viewport};
pub use display::TerminalDisplay;
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use screen::Screen;
