//! ConsoleView: the terminal picture of the LED console.
//!
//! Holds what the session last asked the hardware to show (matrix LEDs,
//! segment panel, message) and lays it out into a [`FrameBuffer`]. Pure, no
//! I/O, so it can be unit-tested.
//!
//! The hardware scrolls a message past once; here a message stays up for
//! [`MESSAGE_FRAMES`] presented frames and then disappears. While the session
//! is paused no frames are presented, so the pause message stays.

use ledtris_engine::Display;

use crate::core::template;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Led, Shape, BOARD_HEIGHT, BOARD_WIDTH, SCORE_DISPLAY_MAX, TEMPLATE_SIZE};

/// Frames a message stays visible (2s at the default 50ms tick)
pub const MESSAGE_FRAMES: u32 = 40;

const LED_COUNT: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const MATRIX_BG: Rgb = Rgb::new(20, 20, 28);
const OFF_FG: Rgb = Rgb::new(60, 60, 70);
const FRAME_FG: Rgb = Rgb::new(200, 200, 200);
const SEGMENT_FG: Rgb = Rgb::new(255, 60, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Segment panel contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub score: u32,
    pub level: u32,
    pub next: Shape,
}

#[derive(Debug, Clone)]
pub struct ConsoleView {
    leds: [Led; LED_COUNT],
    panel: Option<Panel>,
    message: String,
    /// Presented frames left before the message disappears
    message_frames: u32,
    /// Terminal columns per LED; 2 keeps the matrix roughly square.
    led_w: u16,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ConsoleView {
    pub fn new(led_w: u16) -> Self {
        Self {
            leds: [Led::Off; LED_COUNT],
            panel: None,
            message: String::new(),
            message_frames: 0,
            led_w: led_w.max(1),
        }
    }

    pub fn clear_leds(&mut self) {
        self.leds = [Led::Off; LED_COUNT];
    }

    /// Out-of-range coordinates are ignored, as the LED driver does.
    pub fn set_led(&mut self, col: u8, row: u8, led: Led) {
        if col < BOARD_WIDTH && row < BOARD_HEIGHT {
            self.leds[row as usize * BOARD_WIDTH as usize + col as usize] = led;
        }
    }

    pub fn led(&self, col: u8, row: u8) -> Option<Led> {
        (col < BOARD_WIDTH && row < BOARD_HEIGHT)
            .then(|| self.leds[row as usize * BOARD_WIDTH as usize + col as usize])
    }

    pub fn set_panel(&mut self, panel: Panel) {
        self.panel = Some(Panel {
            score: panel.score.min(SCORE_DISPLAY_MAX),
            ..panel
        });
    }

    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    pub fn set_message(&mut self, text: &str) {
        self.message.clear();
        self.message.push_str(text);
        self.message_frames = MESSAGE_FRAMES;
    }

    /// Count one presented frame against the message lifetime
    pub fn age_message(&mut self) {
        self.message_frames = self.message_frames.saturating_sub(1);
        if self.message_frames == 0 {
            self.message.clear();
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Size needed to show everything: framed matrix, panel, message line
    pub fn preferred_size(&self) -> Viewport {
        let (frame_w, frame_h) = self.frame_size();
        Viewport::new(frame_w + 2 + PANEL_WIDTH, frame_h + 2)
    }

    fn frame_size(&self) -> (u16, u16) {
        (BOARD_WIDTH as u16 * self.led_w + 2, BOARD_HEIGHT as u16 + 2)
    }

    /// Lay the console out centred in `viewport`.
    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::new(' ', Style::new(FRAME_FG, BACKGROUND)));

        let (frame_w, frame_h) = self.frame_size();
        let wanted = self.preferred_size();
        let x0 = viewport.width.saturating_sub(wanted.width) / 2;
        let y0 = viewport.height.saturating_sub(wanted.height) / 2;

        draw_frame(fb, x0, y0, frame_w, frame_h, Style::new(FRAME_FG, BACKGROUND));
        self.draw_matrix(fb, x0 + 1, y0 + 1);
        self.draw_panel(fb, x0 + frame_w + 2, y0);

        if !self.message.is_empty() {
            let text_w = self.message.chars().count() as u16;
            let x = x0 + frame_w.saturating_sub(text_w) / 2;
            let style = Style::new(Rgb::new(255, 255, 255), BACKGROUND).bold();
            fb.put_str(x, y0 + frame_h, &self.message, style);
        }
    }

    pub fn render(&self, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(viewport, &mut fb);
        fb
    }

    fn draw_matrix(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let led = self.leds[row as usize * BOARD_WIDTH as usize + col as usize];
                let glyph = led_glyph(led);
                fb.fill_rect(x + col as u16 * self.led_w, y + row as u16, self.led_w, 1, glyph);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let label = Style::new(FRAME_FG, BACKGROUND).bold();
        let digits = Style::new(SEGMENT_FG, BACKGROUND).bold();

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 3, "LEVEL", label);
        fb.put_str(x, y + 6, "NEXT", label);

        let Some(panel) = self.panel else {
            fb.put_str(x, y + 1, "------", digits);
            return;
        };
        fb.put_str(x, y + 1, &format!("{:06}", panel.score), digits);
        fb.put_str(x, y + 4, &format!("{:>2}", panel.level), digits);

        let color = panel.next.color();
        let block = Glyph::new('█', Style::new(Rgb::from(color.rgb()), BACKGROUND));
        let preview = template(panel.next, 0);
        for (ty, cells) in preview.iter().enumerate() {
            for (tx, filled) in cells.iter().enumerate() {
                if *filled {
                    fb.fill_rect(x + tx as u16 * 2, y + 7 + ty as u16, 2, 1, block);
                }
            }
        }
    }
}

impl Display for ConsoleView {
    fn clear(&mut self) {
        self.clear_leds();
    }

    fn set_cell(&mut self, col: u8, row: u8, led: Led) {
        self.set_led(col, row, led);
    }

    fn present(&mut self) {
        self.age_message();
    }

    fn show_score(&mut self, score: u32, level: u32, next: Shape) {
        self.set_panel(Panel { score, level, next });
    }

    fn show_message(&mut self, text: &str) {
        self.set_message(text);
    }
}

const PANEL_WIDTH: u16 = TEMPLATE_SIZE as u16 * 2;

fn led_glyph(led: Led) -> Glyph {
    match led {
        Led::Off => Glyph::new('·', Style::new(OFF_FG, MATRIX_BG)),
        Led::Lit(color) => Glyph::new('█', Style::new(Rgb::from(color.rgb()), MATRIX_BG)),
        Led::Ghost(color) => Glyph::new('▒', Style::new(Rgb::from(color.dim_rgb()), MATRIX_BG)),
    }
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.set(x, y, Glyph::new('┌', style));
    fb.set(right, y, Glyph::new('┐', style));
    fb.set(x, bottom, Glyph::new('└', style));
    fb.set(right, bottom, Glyph::new('┘', style));
    for dx in 1..w - 1 {
        fb.set(x + dx, y, Glyph::new('─', style));
        fb.set(x + dx, bottom, Glyph::new('─', style));
    }
    for dy in 1..h - 1 {
        fb.set(x, y + dy, Glyph::new('│', style));
        fb.set(right, y + dy, Glyph::new('│', style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Color};
    use ledtris_engine::{
        ManualClock, MemoryStore, Peripherals, ScriptedInput, Session, SessionConfig,
        SessionResult,
    };

    fn rows_containing(fb: &FrameBuffer, text: &str) -> usize {
        (0..fb.height()).filter(|&y| fb.row_text(y).contains(text)).count()
    }

    fn exact(view: &ConsoleView) -> FrameBuffer {
        view.render(view.preferred_size())
    }

    #[test]
    fn test_empty_console_shows_off_leds_and_dashes() {
        let view = ConsoleView::default();
        let fb = exact(&view);

        assert!(fb.row_text(0).starts_with('┌'));
        assert_eq!(fb.get(1, 1).map(|g| g.ch), Some('·'));
        assert!(fb.row_text(1).contains("------"));
    }

    #[test]
    fn test_lit_and_ghost_leds_are_two_columns_wide() {
        let mut view = ConsoleView::default();
        view.set_led(0, 0, Led::Lit(Color::new(2)));
        view.set_led(9, 19, Led::Ghost(Color::new(2)));
        let fb = exact(&view);

        let lit = fb.get(1, 1).unwrap();
        assert_eq!(lit.ch, '█');
        assert_eq!(lit.style.fg, Rgb::new(255, 0, 0));
        assert_eq!(fb.get(2, 1).unwrap().ch, '█');

        let ghost = fb.get(1 + 9 * 2, 20).unwrap();
        assert_eq!(ghost.ch, '▒');
        assert_eq!(ghost.style.fg, Rgb::new(63, 0, 0));
    }

    #[test]
    fn test_out_of_range_led_is_ignored() {
        let mut view = ConsoleView::default();
        view.set_led(10, 0, Led::Lit(Color::new(1)));
        view.set_led(0, 20, Led::Lit(Color::new(1)));
        assert_eq!(view.led(10, 0), None);
        assert!((0..BOARD_HEIGHT).all(|r| view.led(0, r) == Some(Led::Off)));
    }

    #[test]
    fn test_panel_pads_and_clamps_score() {
        let mut view = ConsoleView::default();
        view.set_panel(Panel {
            score: 1_234_567,
            level: 3,
            next: Shape::I,
        });
        assert_eq!(view.panel().unwrap().score, 999_999);

        view.set_panel(Panel {
            score: 420,
            level: 3,
            next: Shape::I,
        });
        let fb = exact(&view);
        assert!(fb.row_text(1).contains("000420"));
        assert!(fb.row_text(4).contains(" 3"));
    }

    #[test]
    fn test_message_is_drawn_below_matrix() {
        let mut view = ConsoleView::default();
        view.set_message("PAUSE");
        let fb = exact(&view);
        assert!(fb.row_text(22).contains("PAUSE"));
        assert_eq!(view.message(), "PAUSE");
    }

    #[test]
    fn test_message_expires_after_its_frames() {
        let mut view = ConsoleView::default();
        view.show_message("Tetris Highscore: 7");
        for _ in 0..MESSAGE_FRAMES - 1 {
            view.present();
        }
        assert_eq!(view.message(), "Tetris Highscore: 7");

        view.present();
        assert_eq!(view.message(), "");
        assert_eq!(rows_containing(&exact(&view), "Highscore"), 0);
    }

    #[test]
    fn test_pause_message_clears_after_resume() {
        let mut view = ConsoleView::default();
        let mut input = ScriptedInput::new([Action::Start, Action::Start]);
        let mut store = MemoryStore::new();
        let mut clock = ManualClock::new();

        let mut session = Session::new(
            Peripherals {
                display: &mut view,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            SessionConfig::default(),
        );
        assert_eq!(session.tick(), SessionResult::Continue);
        assert!(session.is_paused());
        assert_eq!(session.tick(), SessionResult::Continue);
        assert!(!session.is_paused());
        for _ in 0..MESSAGE_FRAMES {
            assert_eq!(session.tick(), SessionResult::Continue);
        }
        drop(session);

        assert_eq!(view.message(), "");
        assert_eq!(rows_containing(&exact(&view), "PAUSE"), 0);
    }

    #[test]
    fn test_pause_message_stays_while_paused() {
        let mut view = ConsoleView::default();
        let mut input = ScriptedInput::new([Action::Start]);
        let mut store = MemoryStore::new();
        let mut clock = ManualClock::new();

        let mut session = Session::new(
            Peripherals {
                display: &mut view,
                input: &mut input,
                store: &mut store,
                clock: &mut clock,
            },
            SessionConfig::default(),
        );
        for _ in 0..MESSAGE_FRAMES * 2 {
            assert_eq!(session.tick(), SessionResult::Continue);
        }
        assert!(session.is_paused());
        drop(session);

        assert_eq!(view.message(), "PAUSE");
        assert_eq!(rows_containing(&exact(&view), "PAUSE"), 1);
    }
}
