use chrono::prelude::*;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Playing (first accepted match)
/// - Ready -> GameOver (mismatch on the very first tap)
/// - Playing -> GameOver (mismatch, or health running out)
/// - GameOver -> Ready (acknowledgment tap)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    /// Idle pre-game; no decay applied.
    Ready,
    /// Active run; decay applied every tick.
    Playing,
    /// Run over; the next tap acknowledges and resets.
    GameOver,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Outcome of a tap event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Noop,
    Matched,
    GameOver,
    /// The tap acknowledged a finished run and reset the session.
    Reset,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Noop)
    }
}

/// Outcome of one clock tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Idle,
    Decayed,
    GameOver,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Snapshot handed to the presentation layer after state changes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SessionView {
    pub score: u32,
    pub high_score: u32,
    pub health: f32,
    pub state: SessionState,
    pub prompt: Tile,
    pub pool: [Tile; POOL_SIZE],
}

/// Top-level state machine tying input to scoring, health decay, and
/// high-score persistence. Single logical actor: taps and ticks are
/// fed synchronously by the host.
#[derive(Clone, Debug)]
pub struct GameSession<S> {
    grid: TileGrid,
    difficulty: DifficultyModel,
    mode: GameMode,
    state: SessionState,
    score: u32,
    store: S,
    rng: SmallRng,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl<S: ScoreStore> GameSession<S> {
    pub fn new(mode: GameMode, seed: u64, store: S) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = TileGrid::new(&mut rng)?;
        if mode.is_hard() {
            // hard rounds are ink-randomized from the first tap on
            grid.reshuffle_hard(&mut rng)?;
        }
        Ok(Self {
            grid,
            difficulty: DifficultyModel::new(mode),
            mode,
            state: Default::default(),
            score: 0,
            store,
            rng,
            started_at: None,
            ended_at: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn health(&self) -> f32 {
        self.difficulty.health()
    }

    pub fn decay_rate(&self) -> f32 {
        self.difficulty.decay_rate()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn high_score(&self) -> u32 {
        self.store.get_int(self.mode.high_score_key())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            score: self.score,
            high_score: self.high_score(),
            health: self.difficulty.health(),
            state: self.state,
            prompt: *self.grid.prompt(),
            pool: self.grid.pool_tiles(),
        }
    }

    /// How many seconds the current (or last) run lasted, 0 before the
    /// first accepted match.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Feeds one tap. `None` means the tap hit no tile at all; the
    /// hit-testing itself is the host's job.
    pub fn on_tap(&mut self, target: Option<Coord2>) -> Result<TapOutcome> {
        if self.state.is_game_over() {
            self.reset()?;
            return Ok(TapOutcome::Reset);
        }

        let selection = match target {
            Some(coords) => self.grid.selection_at(coords, self.mode)?,
            None => None,
        };

        let outcome = self.grid.evaluate(selection);
        match outcome {
            MatchOutcome::Noop => return Ok(TapOutcome::Noop),
            MatchOutcome::Match => {
                self.score += 1;
                self.difficulty.refill();
                self.difficulty.ramp_for_score(self.score);
                if self.difficulty.should_ramp_palette(self.score)
                    && self.grid.grow_palette(&mut self.rng, &Color::ALL)
                {
                    log::debug!("palette grown at score {}", self.score);
                }
                self.mark_started();
            }
            MatchOutcome::Mismatch => {
                log::debug!(
                    "selection {:?} mismatched prompt ink {:?}",
                    selection,
                    self.grid.prompt().ink()
                );
                self.end_run();
            }
        }

        // every accepted move puts a fresh round on the board
        self.next_round()?;

        Ok(if outcome.is_match() {
            TapOutcome::Matched
        } else {
            TapOutcome::GameOver
        })
    }

    /// Feeds one clock tick; a no-op outside an active run.
    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::Idle;
        }

        self.difficulty.apply_decay();
        if self.difficulty.is_depleted() {
            self.end_run();
            TickOutcome::GameOver
        } else {
            TickOutcome::Decayed
        }
    }

    fn next_round(&mut self) -> Result<()> {
        self.grid.refresh_prompt(&mut self.rng)?;
        match self.mode {
            GameMode::Normal => {
                self.grid.reshuffle_normal(&mut self.rng, false);
                Ok(())
            }
            GameMode::Hard => self.grid.reshuffle_hard(&mut self.rng),
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            let now = Utc::now();
            log::debug!("run started at {}", now);
            self.started_at.replace(now);
            self.ended_at = None;
            self.state = SessionState::Playing;
        }
    }

    fn end_run(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        self.ended_at.replace(Utc::now());
        self.state = SessionState::GameOver;
        self.commit_high_score();
        log::debug!("run ended with score {}", self.score);
    }

    fn commit_high_score(&mut self) {
        let key = self.mode.high_score_key();
        if self.score > self.store.get_int(key) {
            self.store.set_int(key, self.score);
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.score = 0;
        self.difficulty.reset();
        self.grid.reshuffle_normal(&mut self.rng, true);
        if self.mode.is_hard() {
            self.grid.reshuffle_hard(&mut self.rng)?;
        }
        self.grid.refresh_prompt(&mut self.rng)?;
        self.state = SessionState::Ready;
        self.started_at = None;
        self.ended_at = None;
        log::debug!("session reset");
        Ok(())
    }
}
