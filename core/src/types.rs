use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid positions.
pub type Coord = u8;

/// Two-dimensional grid coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Side length of the square tile grid.
pub const GRID_SIZE: Coord = 3;

/// Fixed position of the prompt tile, the center of the grid.
pub const PROMPT_POS: Coord2 = (1, 1);

/// Number of pool (non-prompt) tiles; also the working palette length.
pub const POOL_SIZE: usize = 8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// One of the real colors a tile can show or be printed in.
///
/// The "no color" case is not a variant; empty palette slots, blank
/// tile words, and missed taps are all expressed as `Option<Color>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
    Pink,
    Orange,
    Black,
    Purple,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
        Color::Pink,
        Color::Orange,
        Color::Black,
        Color::Purple,
    ];

    /// The lower-case color word as printed on a tile.
    pub const fn word(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Pink => "pink",
            Color::Orange => "orange",
            Color::Black => "black",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// One slot of the working palette; `None` is an empty slot.
pub type PaletteSlot = Option<Color>;

/// The 8-slot sequence of colors pool tiles are populated from.
pub type Palette = [PaletteSlot; POOL_SIZE];

/// Canonical palette arrangement every run starts from: three empty
/// slots are filled one by one as the score ramps up.
pub const PALETTE_SEED: Palette = [
    None,
    Some(Color::Red),
    None,
    Some(Color::Blue),
    Some(Color::Green),
    None,
    Some(Color::Yellow),
    None,
];

/// Ruleset selector. Hard mode randomizes pool tile inks so word and
/// ink disagree (full Stroop interference); normal mode keeps pool
/// inks neutral and only the words vary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Normal,
    Hard,
}

impl GameMode {
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Hard)
    }

    /// How much the decay rate grows every 5 points.
    pub const fn decay_ramp_step(self) -> f32 {
        match self {
            Self::Normal => 0.002,
            Self::Hard => 0.001,
        }
    }

    /// Score past which the decay rate stops growing.
    pub const fn ramp_score_ceiling(self) -> u32 {
        match self {
            Self::Normal => 100,
            Self::Hard => 75,
        }
    }

    /// Storage key the mode's high score is kept under.
    pub const fn high_score_key(self) -> &'static str {
        match self {
            Self::Normal => "highScore",
            Self::Hard => "hardHighScore",
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Normal
    }
}
