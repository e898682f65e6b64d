use serde::{Deserialize, Serialize};

use crate::GameMode;

/// Decay rate every run starts from.
pub const BASE_DECAY_RATE: f32 = 0.005;

/// Fixed subtraction once health is nearly gone.
const FADE_OUT_DECAY: f32 = 0.005;

const FULL_HEALTH: f32 = 1.0;

/// Health-decay curve and its acceleration as the score climbs.
///
/// Health lives in `(-inf, 1.0]`; every write clamps the top end only.
/// Crossing below zero is the run-ending signal the session checks.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyModel {
    mode: GameMode,
    health: f32,
    decay_rate: f32,
}

impl DifficultyModel {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            health: FULL_HEALTH,
            decay_rate: BASE_DECAY_RATE,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    /// One per-tick decay step. The subtraction shrinks in the low
    /// bands so the bar fades out instead of snapping to empty.
    pub fn apply_decay(&mut self) {
        let step = if self.health > 0.15 {
            self.decay_rate
        } else if self.health < 0.05 {
            FADE_OUT_DECAY
        } else if self.health < 0.10 {
            self.decay_rate / 2.0
        } else {
            self.decay_rate * 0.75
        };
        self.set_health(self.health - step);
    }

    /// Accepted match: health snaps back to full.
    pub fn refill(&mut self) {
        self.set_health(FULL_HEALTH);
    }

    pub fn is_depleted(&self) -> bool {
        self.health < 0.0
    }

    /// Speeds up decay every 5 points until the mode's score ceiling.
    pub fn ramp_for_score(&mut self, score: u32) {
        if score > 0 && score % 5 == 0 && score <= self.mode.ramp_score_ceiling() {
            self.decay_rate += self.mode.decay_ramp_step();
            log::debug!("decay rate ramped to {} at score {}", self.decay_rate, score);
        }
    }

    /// The palette gains a color at every 20 points up to 80, one per
    /// empty seed slot.
    pub fn should_ramp_palette(&self, score: u32) -> bool {
        score > 0 && score % 20 == 0 && score <= 80
    }

    pub fn reset(&mut self) {
        self.health = FULL_HEALTH;
        self.decay_rate = BASE_DECAY_RATE;
    }

    fn set_health(&mut self, value: f32) {
        self.health = value.min(FULL_HEALTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_at(health: f32) -> DifficultyModel {
        DifficultyModel {
            mode: GameMode::Normal,
            health,
            decay_rate: BASE_DECAY_RATE,
        }
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn full_band_subtracts_the_decay_rate() {
        let mut model = model_at(0.20);
        model.apply_decay();
        assert_close(model.health(), 0.20 - BASE_DECAY_RATE);
    }

    #[test]
    fn boundary_at_0_15_falls_into_the_three_quarter_band() {
        let mut model = model_at(0.15);
        model.apply_decay();
        assert_close(model.health(), 0.15 - BASE_DECAY_RATE * 0.75);
    }

    #[test]
    fn boundary_at_0_10_falls_into_the_three_quarter_band() {
        let mut model = model_at(0.10);
        model.apply_decay();
        assert_close(model.health(), 0.10 - BASE_DECAY_RATE * 0.75);
    }

    #[test]
    fn below_0_10_subtracts_half_the_decay_rate() {
        let mut model = model_at(0.08);
        model.apply_decay();
        assert_close(model.health(), 0.08 - BASE_DECAY_RATE / 2.0);
    }

    #[test]
    fn boundary_at_0_05_subtracts_half_the_decay_rate() {
        let mut model = model_at(0.05);
        model.apply_decay();
        assert_close(model.health(), 0.05 - BASE_DECAY_RATE / 2.0);
    }

    #[test]
    fn terminal_band_uses_the_fixed_constant() {
        let mut model = model_at(0.04);
        model.apply_decay();
        assert_close(model.health(), 0.04 - 0.005);
    }

    #[test]
    fn health_can_cross_below_zero_but_never_above_one() {
        let mut model = model_at(0.001);
        model.apply_decay();
        assert!(model.is_depleted());

        model.refill();
        assert_close(model.health(), 1.0);
        assert!(!model.is_depleted());
    }

    #[test]
    fn decay_ramps_on_multiples_of_five_up_to_the_ceiling() {
        let mut model = DifficultyModel::new(GameMode::Normal);
        model.ramp_for_score(4);
        assert_close(model.decay_rate(), BASE_DECAY_RATE);

        model.ramp_for_score(5);
        assert_close(model.decay_rate(), BASE_DECAY_RATE + 0.002);

        model.ramp_for_score(100);
        assert_close(model.decay_rate(), BASE_DECAY_RATE + 0.004);

        model.ramp_for_score(105);
        assert_close(model.decay_rate(), BASE_DECAY_RATE + 0.004);
    }

    #[test]
    fn hard_mode_ramps_slower_and_stops_earlier() {
        let mut model = DifficultyModel::new(GameMode::Hard);
        model.ramp_for_score(75);
        assert_close(model.decay_rate(), BASE_DECAY_RATE + 0.001);

        model.ramp_for_score(80);
        assert_close(model.decay_rate(), BASE_DECAY_RATE + 0.001);
    }

    #[test]
    fn palette_ramps_exactly_on_20_40_60_80() {
        let model = DifficultyModel::new(GameMode::Normal);
        let ramps: Vec<u32> = (0..=120).filter(|&s| model.should_ramp_palette(s)).collect();
        assert_eq!(ramps, [20, 40, 60, 80]);
    }

    #[test]
    fn reset_restores_the_base_curve() {
        let mut model = DifficultyModel::new(GameMode::Normal);
        model.ramp_for_score(10);
        model.apply_decay();

        model.reset();

        assert_close(model.health(), 1.0);
        assert_close(model.decay_rate(), BASE_DECAY_RATE);
    }
}
