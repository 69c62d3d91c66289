//! Keyboard as the console controller.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::warn;

use crate::map::map_key;
use crate::repeat::RepeatHandler;
use crate::types::Action;
use ledtris_engine::InputSource;

/// [`InputSource`] reading crossterm key events without blocking.
///
/// Presses are mapped with [`map_key`] and fed through a [`RepeatHandler`],
/// so holding a d-pad key keeps moving the piece. If the terminal stops
/// delivering events the source simply yields nothing.
#[derive(Debug)]
pub struct TerminalInput {
    repeat: RepeatHandler,
    pending: VecDeque<Action>,
    last_update: Instant,
    unavailable: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::with_repeat(RepeatHandler::new())
    }

    pub fn with_repeat(repeat: RepeatHandler) -> Self {
        Self {
            repeat,
            pending: VecDeque::new(),
            last_update: Instant::now(),
            unavailable: false,
        }
    }

    /// Queue the actions for one terminal event
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = map_key(key) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(action) = self.repeat.press(action) {
                    self.pending.push_back(action);
                }
            }
            KeyEventKind::Release => self.repeat.release(action),
        }
    }

    /// Queue the held-key repeats due after `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: u32) {
        self.pending.extend(self.repeat.update(elapsed_ms));
    }

    /// Forget queued actions and held keys, e.g. between games
    pub fn reset(&mut self) {
        self.pending.clear();
        self.repeat.reset();
        self.last_update = Instant::now();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn refill(&mut self) {
        if self.unavailable {
            return;
        }
        if let Err(err) = self.read_available() {
            warn!("terminal input unavailable: {err}");
            self.unavailable = true;
            return;
        }

        let elapsed = self.last_update.elapsed();
        let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        self.last_update += Duration::from_millis(ms as u64);
        self.update(ms);
    }

    fn read_available(&mut self) -> std::io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Option<Action> {
        if self.pending.is_empty() {
            self.refill();
        }
        self.pending.pop_front()
    }
}
