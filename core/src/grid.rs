use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Outcome of evaluating a resolved selection against the prompt.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The tap missed, hit the prompt, or hit a blank tile.
    Noop,
    Match,
    Mismatch,
}

impl MatchOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Noop)
    }

    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Transient non-empty set of real colors currently in the palette.
type Candidates = SmallVec<[Color; POOL_SIZE]>;

/// The 3×3 board: one prompt tile in the center and 8 pool tiles
/// populated positionally from the working palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Array2<Tile>,
    palette: Palette,
}

impl TileGrid {
    /// Builds the base (easy) configuration from the canonical palette
    /// seed and draws the first prompt.
    pub fn new<R: Rng>(rng: &mut R) -> Result<Self> {
        let palette = PALETTE_SEED;
        let prompt = Self::draw_prompt(&palette, rng)?;
        let tiles = Array2::from_shape_fn(
            (GRID_SIZE as usize, GRID_SIZE as usize),
            |(x, y)| match pool_index((x as Coord, y as Coord)) {
                None => prompt,
                Some(i) => Tile::pool(Color::Black, palette[i]),
            },
        );
        Ok(Self { tiles, palette })
    }

    pub fn prompt(&self) -> &Tile {
        &self.tiles[PROMPT_POS.to_nd_index()]
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// The 8 non-prompt tiles in palette-slot order.
    pub fn pool_tiles(&self) -> [Tile; POOL_SIZE] {
        core::array::from_fn(|i| self.tiles[pool_coords(i).to_nd_index()])
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < GRID_SIZE && coords.1 < GRID_SIZE {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Resolves a tap on `coords` to the color it stands for, `None`
    /// for the prompt cell or a blank tile.
    pub fn selection_at(&self, coords: Coord2, mode: GameMode) -> Result<Option<Color>> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tile_at(coords).selection_color(mode))
    }

    /// Checks a resolved selection against the prompt's ink.
    pub fn evaluate(&self, selection: Option<Color>) -> MatchOutcome {
        match selection {
            None => MatchOutcome::Noop,
            Some(color) if color == self.prompt().ink() => MatchOutcome::Match,
            Some(_) => MatchOutcome::Mismatch,
        }
    }

    /// Redraws the prompt: ink and word are independent uniform draws
    /// from the palette's current colors, so they may coincide.
    pub fn refresh_prompt<R: Rng>(&mut self, rng: &mut R) -> Result<&Tile> {
        let prompt = Self::draw_prompt(&self.palette, rng)?;
        self.tiles[PROMPT_POS.to_nd_index()] = prompt;
        Ok(self.prompt())
    }

    /// Repopulates the pool under normal rules: neutral ink, words
    /// taken positionally from the (optionally re-seeded) permuted
    /// palette.
    pub fn reshuffle_normal<R: Rng>(&mut self, rng: &mut R, reset_to_seed: bool) {
        if reset_to_seed {
            self.palette = PALETTE_SEED;
        } else {
            self.palette.shuffle(rng);
        }
        for (i, &slot) in self.palette.iter().enumerate() {
            self.tiles[pool_coords(i).to_nd_index()] = Tile::pool(Color::Black, slot);
        }
    }

    /// Repopulates the pool under hard rules: words positional from
    /// the permuted palette, inks independent uniform draws from the
    /// colors present *before* the permutation. Zero or several pool
    /// tiles may end up sharing the prompt's ink.
    pub fn reshuffle_hard<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let candidates = Self::candidates(&self.palette);
        if candidates.is_empty() {
            return Err(GameError::EmptyPalette);
        }
        self.palette.shuffle(rng);
        for (i, &slot) in self.palette.iter().enumerate() {
            let ink = candidates[rng.random_range(0..candidates.len())];
            self.tiles[pool_coords(i).to_nd_index()] = Tile::pool(ink, slot);
        }
        Ok(())
    }

    /// Difficulty ratchet: writes one color not yet in the palette
    /// into its first empty slot. Returns whether anything changed.
    pub fn grow_palette<R: Rng>(&mut self, rng: &mut R, pool: &[Color]) -> bool {
        let Some(free) = self.palette.iter().position(Option::is_none) else {
            return false;
        };
        let mut candidates: Candidates = pool.iter().copied().collect();
        candidates.shuffle(rng);
        for color in candidates {
            if !self.palette.contains(&Some(color)) {
                self.palette[free] = Some(color);
                return true;
            }
        }
        false
    }

    fn candidates(palette: &Palette) -> Candidates {
        palette.iter().copied().flatten().collect()
    }

    fn draw_prompt<R: Rng>(palette: &Palette, rng: &mut R) -> Result<Tile> {
        let candidates = Self::candidates(palette);
        if candidates.is_empty() {
            return Err(GameError::EmptyPalette);
        }
        let ink = candidates[rng.random_range(0..candidates.len())];
        let word = candidates[rng.random_range(0..candidates.len())];
        Ok(Tile::prompt(ink, word))
    }
}

/// Maps grid coordinates to the palette slot feeding that cell, `None`
/// for the prompt cell.
pub(crate) fn pool_index(coords: Coord2) -> Option<usize> {
    if coords == PROMPT_POS {
        return None;
    }
    let linear = usize::from(coords.0) * usize::from(GRID_SIZE) + usize::from(coords.1);
    // cells past the prompt shift down by one palette slot
    Some(if linear > PROMPT_LINEAR {
        linear - 1
    } else {
        linear
    })
}

/// Inverse of [`pool_index`].
pub(crate) fn pool_coords(index: usize) -> Coord2 {
    let linear = if index >= PROMPT_LINEAR {
        index + 1
    } else {
        index
    };
    (
        (linear / usize::from(GRID_SIZE)) as Coord,
        (linear % usize::from(GRID_SIZE)) as Coord,
    )
}

const PROMPT_LINEAR: usize =
    PROMPT_POS.0 as usize * GRID_SIZE as usize + PROMPT_POS.1 as usize;
