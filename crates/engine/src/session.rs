//! Session controller - one Tetris game on the console.
//!
//! Each tick:
//! 1. spawn the next piece if none is falling (a blocked spawn ends the game)
//! 2. drain the controller
//! 3. let the piece fall, or land it
//! 4. render the matrix and, when something changed, the segment panel
//! 5. sleep until the next tick boundary
//!
//! `Start` pauses: the matrix stops updating, only `Start` (resume) and
//! `Select` (back to the menu) are honoured, and paused time does not count
//! toward the fall timer.

use std::time::Duration;

use log::{debug, info};

use crate::core::{display_score, CoreError, GameState};
use crate::ports::Peripherals;
use crate::store::{load_or_zero, save_or_discard};
use crate::types::{
    Action, Led, Shape, BOARD_HEIGHT, BOARD_WIDTH, GAME_OVER_DELAY_MS, MAX_ACTIONS_PER_TICK,
    TICK_MS,
};

/// Message shown while paused
pub const PAUSE_MESSAGE: &str = "PAUSE";

/// Message shown after a game that beat the high score
pub const NEW_HIGH_SCORE_MESSAGE: &str = "New Highscore !!!";

/// Tunables of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Length of one loop iteration
    pub tick: Duration,
    /// Pause between the blocked spawn and the result
    pub game_over_delay: Duration,
    /// Draw the landing preview under the falling piece
    pub show_ghost: bool,
    /// Piece generator seed
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            game_over_delay: Duration::from_millis(GAME_OVER_DELAY_MS as u64),
            show_ghost: true,
            seed: 1,
        }
    }
}

/// What a tick (or a whole session) ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionResult {
    /// Keep ticking
    Continue,
    /// The board filled up
    GameOver {
        score: u32,
        /// High score after this game
        high_score: u32,
        /// Whether this game set a new high score
        new_record: bool,
    },
    /// `Select` while paused
    QuitToMenu,
    /// `Quit`: the caller should shut the console down
    Shutdown,
}

/// Segment panel contents, to skip redundant updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PanelState {
    score: u32,
    level: u32,
    next: Shape,
}

/// One game from first spawn to game over or quit
pub struct Session<'a> {
    io: Peripherals<'a>,
    config: SessionConfig,
    state: GameState,
    high_score: u32,
    paused: bool,
    /// Clock reading up to which elapsed time has been fed to the fall timer
    fall_clock: Duration,
    panel: Option<PanelState>,
    result: Option<SessionResult>,
}

impl<'a> Session<'a> {
    /// Start a session: load the high score and announce it.
    pub fn new(mut io: Peripherals<'a>, config: SessionConfig) -> Self {
        let high_score = load_or_zero(io.store);
        info!("tetris session started (seed {}, high score {})", config.seed, high_score);

        io.display.show_message(&format!("Tetris Highscore: {high_score}"));
        let fall_clock = io.clock.now();

        Self {
            io,
            config,
            state: GameState::new(config.seed),
            high_score,
            paused: false,
            fall_clock,
            panel: None,
            result: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the game, for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Tick until the session ends
    pub fn run(mut self) -> SessionResult {
        loop {
            let result = self.tick();
            if result != SessionResult::Continue {
                return result;
            }
        }
    }

    /// One loop iteration
    pub fn tick(&mut self) -> SessionResult {
        if let Some(result) = self.result {
            return result;
        }

        let tick_start = self.io.clock.now();
        let result = if self.paused {
            self.tick_paused()
        } else {
            self.tick_playing()
        };

        if result != SessionResult::Continue {
            self.result = Some(result);
            return result;
        }

        self.sleep_until(tick_start + self.config.tick);
        SessionResult::Continue
    }

    fn tick_playing(&mut self) -> SessionResult {
        match self.state.spawn_if_needed() {
            // A new piece's fall timer starts now, not at the last tick boundary.
            Ok(true) => self.fall_clock = self.io.clock.now(),
            Ok(false) => {}
            Err(err) => return self.game_over(err),
        }

        for _ in 0..MAX_ACTIONS_PER_TICK {
            let Some(action) = self.io.input.poll() else {
                break;
            };
            match action {
                Action::Start => {
                    self.pause();
                    return SessionResult::Continue;
                }
                Action::Quit => {
                    info!("quit requested (score {})", self.state.score());
                    return SessionResult::Shutdown;
                }
                // Only meaningful while paused.
                Action::Select => {}
                movement => {
                    self.state.apply_action(movement);
                }
            }
        }

        let elapsed_ms = self.take_elapsed_ms();
        if let Some(landing) = self.state.advance(elapsed_ms) {
            if landing.level_up {
                info!("level {} reached", self.state.level());
            }
        }

        self.render();
        SessionResult::Continue
    }

    fn tick_paused(&mut self) -> SessionResult {
        for _ in 0..MAX_ACTIONS_PER_TICK {
            let Some(action) = self.io.input.poll() else {
                break;
            };
            match action {
                Action::Start => {
                    self.resume();
                    break;
                }
                Action::Select => {
                    info!("left paused game for the menu (score {})", self.state.score());
                    return SessionResult::QuitToMenu;
                }
                Action::Quit => return SessionResult::Shutdown,
                _ => {}
            }
        }
        SessionResult::Continue
    }

    fn pause(&mut self) {
        debug!("paused");
        self.paused = true;
        self.io.display.show_message(PAUSE_MESSAGE);
    }

    fn resume(&mut self) {
        debug!("resumed");
        self.paused = false;
        // Paused time must not count toward the fall timer.
        self.fall_clock = self.io.clock.now();
        self.panel = None;
    }

    /// Whole milliseconds since the last call; the remainder carries over
    fn take_elapsed_ms(&mut self) -> u32 {
        let now = self.io.clock.now();
        let elapsed = now.saturating_sub(self.fall_clock);
        let ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        self.fall_clock += Duration::from_millis(ms as u64);
        ms
    }

    fn game_over(&mut self, err: CoreError) -> SessionResult {
        let score = self.state.score();
        info!(
            "game over ({err}): score {}, lines {}, level {}",
            score,
            self.state.lines(),
            self.state.level()
        );

        self.io.clock.sleep(self.config.game_over_delay);

        let new_record = score > self.high_score;
        if new_record {
            info!("new high score {} (was {})", score, self.high_score);
            self.high_score = score;
            save_or_discard(self.io.store, score);
            self.io.display.show_message(NEW_HIGH_SCORE_MESSAGE);
        }

        SessionResult::GameOver {
            score,
            high_score: self.high_score,
            new_record,
        }
    }

    fn render(&mut self) {
        let display = &mut *self.io.display;
        let board = self.state.board();

        display.clear();
        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                let cell = board.get(col, row).flatten();
                display.set_cell(col as u8, row as u8, Led::from(cell));
            }
        }

        if let Some(piece) = self.state.falling() {
            if self.config.show_ghost {
                if let Some(ghost) = self.state.ghost() {
                    for (col, row) in ghost.cells() {
                        if row >= 0 && !board.is_occupied(col, row) {
                            display.set_cell(col as u8, row as u8, Led::Ghost(ghost.color));
                        }
                    }
                }
            }
            for (col, row) in piece.cells() {
                if row >= 0 {
                    display.set_cell(col as u8, row as u8, Led::Lit(piece.color));
                }
            }
        }
        display.present();

        let panel = PanelState {
            score: display_score(self.state.score()),
            level: self.state.level(),
            next: self.state.next().shape,
        };
        if self.panel != Some(panel) {
            display.show_score(panel.score, panel.level, panel.next);
            self.panel = Some(panel);
        }
    }

    fn sleep_until(&mut self, deadline: Duration) {
        let now = self.io.clock.now();
        if deadline > now {
            self.io.clock.sleep(deadline - now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ports::{Clock, Display, ScriptedInput};
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct CountingDisplay {
        frames: u32,
        panel_updates: u32,
        messages: Vec<String>,
    }

    impl Display for CountingDisplay {
        fn clear(&mut self) {}
        fn set_cell(&mut self, _col: u8, _row: u8, _led: Led) {}
        fn present(&mut self) {
            self.frames += 1;
        }
        fn show_score(&mut self, _score: u32, _level: u32, _next: Shape) {
            self.panel_updates += 1;
        }
        fn show_message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
    }

    #[test]
    fn test_session_announces_high_score() {
        let mut display = CountingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut store = MemoryStore::with_value(321);
        let mut clock = ManualClock::new();

        let session = Session::new(
            Peripherals {
                display: &mut display,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            SessionConfig::default(),
        );
        assert_eq!(session.high_score(), 321);
        drop(session);
        assert_eq!(display.messages, vec!["Tetris Highscore: 321".to_string()]);
    }

    #[test]
    fn test_tick_sleeps_to_boundary_and_renders() {
        let mut display = CountingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut store = MemoryStore::new();
        let mut clock = ManualClock::new();

        {
            let mut session = Session::new(
                Peripherals {
                    display: &mut display,
                    input: &mut input,
                    store: &mut store,
                    clock: &mut clock,
                },
                SessionConfig::default(),
            );
            for _ in 0..3 {
                assert_eq!(session.tick(), SessionResult::Continue);
            }
        }

        assert_eq!(clock.now(), Duration::from_millis(150));
        assert_eq!(display.frames, 3);
        // Score and next piece did not change after the first frame.
        assert_eq!(display.panel_updates, 1);
    }

    #[test]
    fn test_take_elapsed_keeps_remainder() {
        let mut display = CountingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut store = MemoryStore::new();
        let mut clock = ManualClock::new();
        let mut session = Session::new(
            Peripherals {
                display: &mut display,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            SessionConfig::default(),
        );

        session.io.clock.sleep(Duration::from_micros(1500));
        assert_eq!(session.take_elapsed_ms(), 1);
        session.io.clock.sleep(Duration::from_micros(500));
        assert_eq!(session.take_elapsed_ms(), 1);
    }

    #[test]
    fn test_fall_timer_starts_at_spawn() {
        let mut display = CountingDisplay::default();
        let mut input = ScriptedInput::default();
        let mut store = MemoryStore::new();
        let mut clock = ManualClock::new();
        let mut session = Session::new(
            Peripherals {
                display: &mut display,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            SessionConfig::default(),
        );

        // Time that passed before the piece existed does not count.
        session.io.clock.sleep(Duration::from_millis(30));
        assert_eq!(session.tick(), SessionResult::Continue);
        assert_eq!(session.state().pieces_spawned(), 1);
        assert_eq!(session.state().fall_timer_ms(), 0);

        assert_eq!(session.tick(), SessionResult::Continue);
        assert_eq!(session.state().fall_timer_ms(), 50);
    }
}
