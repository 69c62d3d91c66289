//! Session engine for the LED console.
//!
//! Wraps the pure [`ledtris_core`] rules in a timed loop and connects them to
//! the outside world through four small traits in [`ports`]:
//!
//! - [`Display`](ports::Display): 10x20 LED matrix plus the segment panel
//! - [`InputSource`](ports::InputSource): controller actions, polled per tick
//! - [`HighScoreStore`](ports::HighScoreStore): the persisted record
//! - [`Clock`](ports::Clock): monotonic time and sleeping
//!
//! The same [`Session`] drives the hardware and the terminal stand-in; tests
//! drive it with [`ManualClock`](clock::ManualClock), a scripted input and an
//! in-memory store.
//!
//! # Example
//!
//! ```
//! use ledtris_engine::clock::ManualClock;
//! use ledtris_engine::ports::{Display, NoInput, Peripherals};
//! use ledtris_engine::store::MemoryStore;
//! use ledtris_engine::types::{Led, Shape};
//! use ledtris_engine::{Session, SessionConfig, SessionResult};
//!
//! struct Blind;
//! impl Display for Blind {
//!     fn clear(&mut self) {}
//!     fn set_cell(&mut self, _: u8, _: u8, _: Led) {}
//!     fn present(&mut self) {}
//!     fn show_score(&mut self, _: u32, _: u32, _: Shape) {}
//!     fn show_message(&mut self, _: &str) {}
//! }
//!
//! let (mut display, mut input) = (Blind, NoInput);
//! let (mut store, mut clock) = (MemoryStore::new(), ManualClock::new());
//! let session = Session::new(
//!     Peripherals {
//!         display: &mut display,
//!         input: &mut input,
//!         store: &mut store,
//!         clock: &mut clock,
//!     },
//!     SessionConfig::default(),
//! );
//!
//! // Nobody touches the controller: pieces stack up until a spawn is blocked.
//! assert!(matches!(session.run(), SessionResult::GameOver { .. }));
//! ```

pub mod clock;
pub mod ports;
pub mod session;
pub mod store;

pub use ledtris_core as core;
pub use ledtris_types as types;

pub use clock::{ManualClock, SystemClock};
pub use ports::{Clock, Display, HighScoreStore, InputSource, NoInput, Peripherals, ScriptedInput};
pub use session::{Session, SessionConfig, SessionResult};
pub use store::{JsonFileStore, MemoryStore, StoreError};
