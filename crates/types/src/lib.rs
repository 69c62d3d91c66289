//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the console.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, session loop, terminal stand-in, LED driver).
//!
//! # Board Dimensions
//!
//! The playfield is the LED matrix itself:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Template**: every piece rotation is authored on a 5x5 grid
//! - **Spawn position**: (3, -2), above the visible board
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Session tick on the desktop stand-in |
//! | `BASE_FALL_MS` | 700 | Fall interval before the level adjustment |
//! | `FALL_STEP_MS` | 60 | Fall interval reduction per level |
//! | `FALL_FLOOR_MS` | 50 | Fastest fall interval |
//! | `GAME_OVER_DELAY_MS` | 2000 | Pause before the game-over result |
//!
//! # Held-Key Repeat
//!
//! - `SIDE_REPEAT_DELAY_MS`: 150ms - time before left/right auto-repeat starts
//! - `SIDE_REPEAT_MS`: 150ms - interval between left/right repeats
//! - `DOWN_REPEAT_MS`: 100ms - interval between soft-drop repeats
//!
//! # Examples
//!
//! ```
//! use ledtris_types::{Color, Led, Shape, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Shapes carry their palette color
//! assert_eq!(Shape::I.color(), Color::new(2));
//!
//! // Empty board cells render as unlit LEDs
//! assert_eq!(Led::from(None), Led::Off);
//! assert_eq!(Led::from(Some(Shape::T.color())), Led::Lit(Color::new(6)));
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 LED columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 LED rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square template grid every rotation state is authored on
pub const TEMPLATE_SIZE: u8 = 5;

/// Column of the template origin for a freshly spawned piece
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - (TEMPLATE_SIZE / 2) as i8;

/// Row of the template origin for a freshly spawned piece (above the board)
pub const SPAWN_Y: i8 = -2;

/// Session tick in the desktop stand-in (50ms)
pub const TICK_MS: u32 = 50;

/// Fall interval before the per-level reduction (700ms)
pub const BASE_FALL_MS: u32 = 700;

/// Fall interval reduction per level (60ms)
pub const FALL_STEP_MS: u32 = 60;

/// Fastest fall interval (50ms)
pub const FALL_FLOOR_MS: u32 = 50;

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 6;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Largest score the 6-digit segment panel can show
pub const SCORE_DISPLAY_MAX: u32 = 999_999;

/// Pause between the blocked spawn and the game-over result (2s)
pub const GAME_OVER_DELAY_MS: u32 = 2000;

/// Delay before a held left/right key starts repeating
pub const SIDE_REPEAT_DELAY_MS: u32 = 150;

/// Interval between left/right repeats while held
pub const SIDE_REPEAT_MS: u32 = 150;

/// Interval between soft-drop repeats while down is held
pub const DOWN_REPEAT_MS: u32 = 100;

/// Upper bound on actions consumed in a single session tick
pub const MAX_ACTIONS_PER_TICK: usize = 32;


/// Palette index of a lit LED.
///
/// The console uses a fixed seven-entry palette, one entry per shape:
///
/// | Index | Color | Shape |
/// |-------|-------|-------|
/// | 0 | blue | S |
/// | 1 | green | Z |
/// | 2 | red | I |
/// | 3 | yellow | J |
/// | 4 | cyan | L |
/// | 5 | magenta | O |
/// | 6 | orange | T |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

/// Number of palette entries
pub const PALETTE_SIZE: u8 = 7;

/// Full-brightness RGB values, indexed by [`Color::index`]
pub const PALETTE_RGB: [(u8, u8, u8); PALETTE_SIZE as usize] = [
    (0, 0, 255),
    (0, 255, 0),
    (255, 0, 0),
    (255, 255, 0),
    (0, 255, 255),
    (255, 0, 255),
    (255, 100, 0),
];

impl Color {
    /// Create a palette color, wrapping out-of-range indices into the palette
    pub const fn new(index: u8) -> Self {
        Self(index % PALETTE_SIZE)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Full-brightness RGB triple
    pub fn rgb(self) -> (u8, u8, u8) {
        PALETTE_RGB[self.0 as usize]
    }

    /// Dimmed RGB triple used for the ghost projection
    ///
    /// # Examples
    ///
    /// ```
    /// use ledtris_types::Color;
    ///
    /// assert_eq!(Color::new(2).rgb(), (255, 0, 0));
    /// assert_eq!(Color::new(2).dim_rgb(), (63, 0, 0));
    /// ```
    pub fn dim_rgb(self) -> (u8, u8, u8) {
        let (r, g, b) = self.rgb();
        (r / 4, g / 4, b / 4)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell lit with the color of the piece that landed there
///
/// Boards never remember which piece filled a cell, only its color.
pub type Cell = Option<Color>;

/// The seven tetromino shapes, in palette order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    S,
    Z,
    I,
    J,
    L,
    O,
    T,
}

impl Shape {
    /// All shapes in palette order
    pub const ALL: [Shape; 7] = [
        Shape::S,
        Shape::Z,
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::T,
    ];

    /// Position in palette order; also the id shown on the segment panel
    pub fn index(self) -> u8 {
        match self {
            Shape::S => 0,
            Shape::Z => 1,
            Shape::I => 2,
            Shape::J => 3,
            Shape::L => 4,
            Shape::O => 5,
            Shape::T => 6,
        }
    }

    /// Palette color a piece of this shape is drawn with
    pub fn color(self) -> Color {
        Color::new(self.index())
    }
}

/// Rotation direction for the falling piece
///
/// Rotation states are authored per shape, so a direction only says which way to
/// step through the shape's rotation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// Next rotation state (`+1`)
    Cw,
    /// Previous rotation state (`-1`)
    Ccw,
}

impl RotationDirection {
    /// Step applied to the rotation index
    pub fn step(self) -> i32 {
        match self {
            RotationDirection::Cw => 1,
            RotationDirection::Ccw => -1,
        }
    }
}

/// Controller actions consumed by the session loop
///
/// Movement actions mutate the falling piece; `Start`, `Select` and `Quit`
/// are handled by the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Move piece one row down
    Down,
    /// Drop piece to the lowest valid row
    Up,
    /// Step to the next rotation state
    RotateCw,
    /// Step to the previous rotation state
    RotateCcw,
    /// Pause / resume
    Start,
    /// Leave the paused game for the menu
    Select,
    /// Shut the console down
    Quit,
}

/// State of one LED as requested by the session renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Led {
    #[default]
    Off,
    /// Board cell or falling piece
    Lit(Color),
    /// Ghost projection, a dimmed variant of the piece color
    Ghost(Color),
}

impl From<Cell> for Led {
    fn from(cell: Cell) -> Self {
        match cell {
            Some(color) => Led::Lit(color),
            None => Led::Off,
        }
    }
}

/// Line clear scoring table
///
/// Base points for clearing N lines with one landing:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level (1-based).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];
