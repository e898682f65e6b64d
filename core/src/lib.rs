//! Core game-state engine for a Stroop-effect reaction game: a 3×3
//! grid of colored word-tiles where the player must find the tile
//! matching the center prompt's ink color before health runs out.
//!
//! Presentation, hit-testing, and the tick clock belong to the host;
//! this crate owns the grid, the difficulty curve, and the session
//! state machine, and exposes pull-based [`SessionView`] snapshots.

pub use difficulty::*;
pub use error::*;
pub use grid::*;
pub use session::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod difficulty;
mod error;
mod grid;
mod session;
mod store;
mod tile;
mod types;
