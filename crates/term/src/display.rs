//! Terminal stand-in for the LED matrix and segment panel.

use anyhow::Result;
use log::warn;

use crate::console_view::{ConsoleView, Viewport};
use crate::fb::FrameBuffer;
use crate::screen::Screen;
use crate::types::{Led, Shape};
use ledtris_engine::Display;

/// [`Display`] that draws the console into the terminal.
///
/// The matrix is redrawn on `present`; panel and message changes are shown
/// straight away, like the hardware does. Messages expire the way
/// [`ConsoleView`] ages them. Terminal write errors are logged
/// once and otherwise ignored so a broken terminal never stops the game.
pub struct TerminalDisplay {
    view: ConsoleView,
    screen: Screen,
    frame: FrameBuffer,
    write_failed: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            view: ConsoleView::default(),
            screen: Screen::new(),
            frame: FrameBuffer::new(0, 0),
            write_failed: false,
        }
    }

    /// Take over the terminal. Pair with [`leave`](Self::leave).
    pub fn enter(&mut self) -> Result<()> {
        self.screen.enter()?;
        self.write_failed = false;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        self.screen.leave()
    }

    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    fn redraw(&mut self) {
        let viewport = crossterm::terminal::size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or_else(|_| self.view.preferred_size());
        self.view.render_into(viewport, &mut self.frame);

        if let Err(err) = self.screen.flush(&self.frame) {
            if !self.write_failed {
                warn!("terminal display write failed: {err:#}");
                self.write_failed = true;
            }
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self) {
        self.view.clear();
    }

    fn set_cell(&mut self, col: u8, row: u8, led: Led) {
        self.view.set_cell(col, row, led);
    }

    fn present(&mut self) {
        self.redraw();
        self.view.present();
    }

    fn show_score(&mut self, score: u32, level: u32, next: Shape) {
        self.view.show_score(score, level, next);
        self.redraw();
    }

    fn show_message(&mut self, text: &str) {
        self.view.show_message(text);
        self.redraw();
    }
}
