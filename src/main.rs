//! Terminal runner for the LED console game (default binary).
//!
//! Plays sessions back to back in the terminal stand-in: after a game over or
//! a return to the menu, `Start` plays again and `Select` or `Quit` exits.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ledtris::engine::{
    Clock, Display, InputSource, JsonFileStore, Peripherals, Session, SessionConfig,
    SessionResult, SystemClock,
};
use ledtris::input::TerminalInput;
use ledtris::term::TerminalDisplay;
use ledtris::types::{Action, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "ledtris", about = "Tetris on a (simulated) 10x20 LED matrix")]
struct Args {
    /// Loop period in milliseconds (the LED hardware runs at 20)
    #[arg(long, default_value_t = TICK_MS as u64)]
    tick_ms: u64,

    /// Piece generator seed (default: derived from the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = "ledtris-highscore.json")]
    high_score_file: PathBuf,

    /// Do not draw the landing preview
    #[arg(long)]
    no_ghost: bool,

    /// Write logs here; filter with RUST_LOG (default: info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut display = TerminalDisplay::new();
    display.enter()?;

    let result = run(&args, &mut display);

    // Always try to restore terminal state.
    let _ = display.leave();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(args: &Args, display: &mut TerminalDisplay) -> Result<()> {
    let mut input = TerminalInput::new();
    let mut store = JsonFileStore::new(&args.high_score_file);
    let mut clock = SystemClock::new();
    let mut seed = args.seed.unwrap_or_else(seed_from_time);

    loop {
        let config = SessionConfig {
            tick: Duration::from_millis(args.tick_ms.max(1)),
            show_ghost: !args.no_ghost,
            seed,
            ..SessionConfig::default()
        };

        let session = Session::new(
            Peripherals {
                display: &mut *display,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            config,
        );

        let result = session.run();
        if result == SessionResult::Shutdown {
            return Ok(());
        }
        if let SessionResult::GameOver { score, high_score, .. } = result {
            info!("final score {score}, high score {high_score}");
        }
        if let Some(message) = menu_message(result) {
            display.show_message(&message);
        }

        input.reset();
        if !wait_for_start(&mut input, &mut clock, config.tick) {
            return Ok(());
        }
        seed = seed.wrapping_add(1);
    }
}

/// Text shown while waiting in the menu. A new record keeps the session's
/// high-score message up instead.
fn menu_message(result: SessionResult) -> Option<String> {
    match result {
        SessionResult::GameOver { new_record: true, .. } => None,
        SessionResult::GameOver { score, .. } => Some(format!("Game Over  {score}")),
        SessionResult::QuitToMenu => Some("Tetris".to_string()),
        SessionResult::Continue | SessionResult::Shutdown => None,
    }
}

/// Menu: `Start` plays again, `Select` or `Quit` leaves.
fn wait_for_start(input: &mut dyn InputSource, clock: &mut dyn Clock, tick: Duration) -> bool {
    loop {
        while let Some(action) = input.poll() {
            match action {
                Action::Start => return true,
                Action::Select | Action::Quit => return false,
                _ => {}
            }
        }
        clock.sleep(tick);
    }
}

fn seed_from_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_keeps_high_score_message() {
        let result = SessionResult::GameOver {
            score: 120,
            high_score: 120,
            new_record: true,
        };
        assert_eq!(menu_message(result), None);
    }

    #[test]
    fn test_ordinary_game_over_shows_score() {
        let result = SessionResult::GameOver {
            score: 80,
            high_score: 120,
            new_record: false,
        };
        assert_eq!(menu_message(result).as_deref(), Some("Game Over  80"));
        assert_eq!(menu_message(SessionResult::QuitToMenu).as_deref(), Some("Tetris"));
    }
}
