//! Held-key repeat for the d-pad.
//!
//! Holding Left or Right moves once, then again after a delay and at a fixed
//! rate; holding Down repeats at its own rate straight away. Terminals that
//! never report key releases are handled with a timeout: a direction with no
//! fresh press for `release_timeout_ms` counts as released.

use arrayvec::ArrayVec;

use crate::types::{
    Action, DOWN_REPEAT_MS, MAX_ACTIONS_PER_TICK, SIDE_REPEAT_DELAY_MS, SIDE_REPEAT_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<Action> {
        match self {
            HorizontalDirection::Left => Some(Action::Left),
            HorizontalDirection::Right => Some(Action::Right),
            HorizontalDirection::None => None,
        }
    }
}

// A single tap must not turn into a held key on terminals without release events.
const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 150;

/// Repeat timers for the held directions
#[derive(Debug, Clone)]
pub struct RepeatHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    since_press_ms: u32,
    side_timer_ms: u32,
    down_timer_ms: u32,
    side_delay_ms: u32,
    side_rate_ms: u32,
    down_rate_ms: u32,
    release_timeout_ms: u32,
}

impl RepeatHandler {
    pub fn new() -> Self {
        Self::with_rates(SIDE_REPEAT_DELAY_MS, SIDE_REPEAT_MS, DOWN_REPEAT_MS)
    }

    pub fn with_rates(side_delay_ms: u32, side_rate_ms: u32, down_rate_ms: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            since_press_ms: 0,
            side_timer_ms: 0,
            down_timer_ms: 0,
            side_delay_ms,
            side_rate_ms: side_rate_ms.max(1),
            down_rate_ms: down_rate_ms.max(1),
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn is_down_held(&self) -> bool {
        self.down_held
    }

    /// Register a press. Returns the action to apply now, or `None` when the
    /// key is already held (an OS auto-repeat) and the timers take care of it.
    ///
    /// Actions other than Left, Right and Down pass straight through.
    pub fn press(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::Left | Action::Right => {
                self.since_press_ms = 0;
                let direction = if action == Action::Left {
                    HorizontalDirection::Left
                } else {
                    HorizontalDirection::Right
                };
                if self.horizontal == direction {
                    None
                } else {
                    self.horizontal = direction;
                    self.side_timer_ms = 0;
                    Some(action)
                }
            }
            Action::Down => {
                self.since_press_ms = 0;
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_timer_ms = 0;
                    Some(action)
                }
            }
            other => Some(other),
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::Left if self.horizontal == HorizontalDirection::Left => self.release_side(),
            Action::Right if self.horizontal == HorizontalDirection::Right => self.release_side(),
            Action::Down => self.release_down(),
            _ => {}
        }
    }

    /// Advance the timers and collect the repeats that came due
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Action, MAX_ACTIONS_PER_TICK> {
        let mut actions = ArrayVec::new();

        self.since_press_ms = self.since_press_ms.saturating_add(elapsed_ms);
        if self.since_press_ms > self.release_timeout_ms {
            self.release_side();
            self.release_down();
        }

        if let Some(action) = self.horizontal.action() {
            let before = self.side_timer_ms;
            self.side_timer_ms = self.side_timer_ms.saturating_add(elapsed_ms);
            // First repeat at `delay`, then one every `rate`.
            let due = |t: u32| {
                if t < self.side_delay_ms {
                    0
                } else {
                    (t - self.side_delay_ms) / self.side_rate_ms + 1
                }
            };
            for _ in due(before)..due(self.side_timer_ms) {
                if actions.try_push(action).is_err() {
                    break;
                }
            }
        }

        if self.down_held {
            let before = self.down_timer_ms;
            self.down_timer_ms = self.down_timer_ms.saturating_add(elapsed_ms);
            let repeats = self.down_timer_ms / self.down_rate_ms - before / self.down_rate_ms;
            for _ in 0..repeats {
                if actions.try_push(Action::Down).is_err() {
                    break;
                }
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release_side();
        self.release_down();
        self.since_press_ms = 0;
    }

    fn release_side(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.side_timer_ms = 0;
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_timer_ms = 0;
    }
}

impl Default for RepeatHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_repeat_after_delay_then_rate() {
        let mut rh = RepeatHandler::with_rates(150, 150, 100).with_release_timeout_ms(10_000);

        assert_eq!(rh.press(Action::Left), Some(Action::Left));

        assert!(rh.update(149).is_empty());
        assert_eq!(rh.update(1).as_slice(), &[Action::Left]);
        assert!(rh.update(149).is_empty());
        assert_eq!(rh.update(1).as_slice(), &[Action::Left]);
        assert_eq!(rh.update(300).as_slice(), &[Action::Left, Action::Left]);
    }

    #[test]
    fn test_held_press_is_not_repeated_by_os_autorepeat() {
        let mut rh = RepeatHandler::new();
        assert_eq!(rh.press(Action::Right), Some(Action::Right));
        assert_eq!(rh.press(Action::Right), None);
        assert_eq!(rh.press(Action::Left), Some(Action::Left));
        assert_eq!(rh.horizontal(), HorizontalDirection::Left);
    }

    #[test]
    fn test_down_repeats_at_rate() {
        let mut rh = RepeatHandler::new().with_release_timeout_ms(10_000);

        assert_eq!(rh.press(Action::Down), Some(Action::Down));
        assert!(rh.update(99).is_empty());
        assert_eq!(rh.update(1).as_slice(), &[Action::Down]);
        assert_eq!(rh.update(200).as_slice(), &[Action::Down, Action::Down]);
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut rh = RepeatHandler::new().with_release_timeout_ms(50);

        rh.press(Action::Left);
        rh.press(Action::Down);
        assert!(rh.update(51).is_empty());
        assert_eq!(rh.horizontal(), HorizontalDirection::None);
        assert!(!rh.is_down_held());
    }

    #[test]
    fn test_other_actions_pass_through_without_refreshing_hold() {
        let mut rh = RepeatHandler::new().with_release_timeout_ms(50);

        rh.press(Action::Right);
        rh.update(40);
        assert_eq!(rh.press(Action::RotateCw), Some(Action::RotateCw));
        rh.update(11);
        assert_eq!(rh.horizontal(), HorizontalDirection::None);
    }

    #[test]
    fn test_release_and_reset_stop_repeats() {
        let mut rh = RepeatHandler::new().with_release_timeout_ms(10_000);

        rh.press(Action::Left);
        rh.release(Action::Right);
        assert_eq!(rh.horizontal(), HorizontalDirection::Left);
        rh.release(Action::Left);
        assert!(rh.update(500).is_empty());

        rh.press(Action::Down);
        assert!(!rh.update(500).is_empty());
        rh.reset();
        assert!(rh.update(500).is_empty());
    }
}
