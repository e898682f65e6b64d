use serde::{Deserialize, Serialize};

use crate::*;

/// A single cell of the grid: a color word printed in some ink.
///
/// The prompt tile's ink is the target the player must find; its word
/// is a red herring drawn independently. Pool tile words can be blank
/// when their palette slot is empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    ink: Color,
    word: Option<Color>,
    is_prompt: bool,
}

impl Tile {
    pub(crate) const fn pool(ink: Color, word: Option<Color>) -> Self {
        Self {
            ink,
            word,
            is_prompt: false,
        }
    }

    pub(crate) const fn prompt(ink: Color, word: Color) -> Self {
        Self {
            ink,
            word: Some(word),
            is_prompt: true,
        }
    }

    /// The color the word is rendered in.
    pub const fn ink(&self) -> Color {
        self.ink
    }

    /// The color name printed on the tile, if any.
    pub const fn word(&self) -> Option<Color> {
        self.word
    }

    pub const fn is_prompt(&self) -> bool {
        self.is_prompt
    }

    /// The color a tap on this tile stands for, or `None` when the
    /// tile cannot be an answer (the prompt itself, or a blank tile in
    /// normal mode).
    ///
    /// In normal mode every pool tile is inked neutrally, so the word
    /// is the answer attribute; in hard mode the ink is, and the word
    /// becomes the distractor.
    pub fn selection_color(&self, mode: GameMode) -> Option<Color> {
        if self.is_prompt {
            return None;
        }
        match mode {
            GameMode::Normal => self.word,
            GameMode::Hard => Some(self.ink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_tile_never_yields_a_selection() {
        let tile = Tile::prompt(Color::Red, Color::Blue);
        assert_eq!(tile.selection_color(GameMode::Normal), None);
        assert_eq!(tile.selection_color(GameMode::Hard), None);
    }

    #[test]
    fn pool_selection_follows_the_mode() {
        let tile = Tile::pool(Color::Black, Some(Color::Green));
        assert_eq!(tile.selection_color(GameMode::Normal), Some(Color::Green));
        assert_eq!(tile.selection_color(GameMode::Hard), Some(Color::Black));
    }

    #[test]
    fn blank_pool_tile_is_a_noop_in_normal_mode() {
        let tile = Tile::pool(Color::Black, None);
        assert_eq!(tile.selection_color(GameMode::Normal), None);
        assert_eq!(tile.selection_color(GameMode::Hard), Some(Color::Black));
    }
}
