//! Collaborator interfaces the session talks to.
//!
//! The LED driver, the terminal stand-in and test doubles all implement these;
//! the session never knows which one it is driving.

use std::collections::VecDeque;
use std::time::Duration;

use crate::store::StoreError;
use crate::types::{Action, Led, Shape};

/// Output side: the LED matrix plus the segment panel.
///
/// A frame is `clear`, one `set_cell` per LED that should change, then
/// `present`. The session never reads display state back.
pub trait Display {
    fn clear(&mut self);

    /// Set one matrix LED. `col < BOARD_WIDTH`, `row < BOARD_HEIGHT`.
    fn set_cell(&mut self, col: u8, row: u8, led: Led);

    fn present(&mut self);

    /// Segment panel: score (already clamped to 6 digits), level and the upcoming shape
    fn show_score(&mut self, score: u32, level: u32, next: Shape);

    /// Scrolling text message
    fn show_message(&mut self, text: &str);
}

/// Input side: non-blocking stream of controller actions.
///
/// Polled until it returns `None` once per tick. Actions not drained within a
/// tick may be dropped by the source.
pub trait InputSource {
    fn poll(&mut self) -> Option<Action>;
}

/// Persisted high score.
pub trait HighScoreStore {
    /// Stored high score; a missing record is `Ok(0)`
    fn load(&mut self) -> Result<u32, StoreError>;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Input source for a console without a controller: never yields anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> Option<Action> {
        None
    }
}

/// Input source that replays a fixed list of actions, one per poll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    actions: VecDeque<Action>,
}

impl ScriptedInput {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push_back(action);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }
}

/// Every collaborator of one session.
pub struct Peripherals<'a> {
    pub display: &'a mut dyn Display,
    pub input: &'a mut dyn InputSource,
    pub store: &'a mut dyn HighScoreStore,
    pub clock: &'a mut dyn Clock,
}
