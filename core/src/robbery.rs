//! The lingering effect of a robbery on customer arrivals.
//!
//! A failed robbery is free publicity: word spreads and more customers
//! come by. A successful one scares them away. Either way the effect
//! decays exponentially with the minutes elapsed since the robbery.

use crate::config::SimConfig;
use crate::types::Minute;

/// Cooling-down state machine for the spawn-probability adjustment.
#[derive(Debug, Clone)]
pub struct RobberyModel {
    base_spawn_probability: f64,
    boost: f64,
    drop: f64,
    coefficient: f64,
    reset_threshold: Option<f64>,
    memory: Option<RobberyMemory>,
}

#[derive(Debug, Clone, Copy)]
struct RobberyMemory {
    time: Minute,
    succeeded: bool,
}

impl RobberyModel {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            base_spawn_probability: config.spawn_probability,
            boost: config.spawn_boost,
            drop: config.spawn_drop,
            coefficient: config.adjustment_coefficient,
            reset_threshold: config.adjustment_reset_threshold,
            memory: None,
        }
    }

    /// Enter the cooling-down state.
    pub fn record(&mut self, time: Minute, succeeded: bool) {
        self.memory = Some(RobberyMemory { time, succeeded });
    }

    /// The per-minute arrival probability at `now`:
    /// `base + delta * e^(-dt / coefficient)` while cooling down, where
    /// delta is `-drop` after a successful robbery and `+boost` after a
    /// failed one. With a reset threshold configured, the cooling-down
    /// state is cleared once the adjustment magnitude falls below it.
    pub fn spawn_probability(&mut self, now: Minute) -> f64 {
        let Some(memory) = self.memory else {
            return self.base_spawn_probability;
        };
        let dt = now.saturating_sub(memory.time);
        let delta = if memory.succeeded { -self.drop } else { self.boost };
        let adjustment = delta * (-f64::from(dt) / self.coefficient).exp();
        if let Some(threshold) = self.reset_threshold {
            if adjustment.abs() < threshold {
                self.memory = None;
                return self.base_spawn_probability;
            }
        }
        self.base_spawn_probability + adjustment
    }

    /// Minute and outcome of the last robbery, if any occurred yet.
    pub fn last_robbery(&self) -> Option<(Minute, bool)> {
        self.memory.map(|m| (m.time, m.succeeded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(reset_threshold: Option<f64>) -> RobberyModel {
        let config = SimConfig {
            spawn_probability: 0.2,
            spawn_boost: 0.3,
            spawn_drop: 0.15,
            adjustment_coefficient: 10.0,
            adjustment_reset_threshold: reset_threshold,
            ..SimConfig::default()
        };
        RobberyModel::new(&config)
    }

    #[test]
    fn base_probability_before_any_robbery() {
        let mut model = model(None);
        assert_eq!(model.spawn_probability(540), 0.2);
        assert_eq!(model.last_robbery(), None);
    }

    #[test]
    fn full_boost_at_zero_elapsed() {
        let mut model = model(None);
        model.record(600, false);
        assert_eq!(model.spawn_probability(600), 0.2 + 0.3);
    }

    #[test]
    fn full_drop_at_zero_elapsed() {
        let mut model = model(None);
        model.record(600, true);
        assert_eq!(model.spawn_probability(600), 0.2 - 0.15);
    }

    #[test]
    fn adjustment_magnitude_strictly_decreases() {
        let mut model = model(None);
        model.record(600, false);
        let mut previous = f64::INFINITY;
        for dt in [0, 1, 2, 5, 10, 20, 50, 100] {
            let magnitude = (model.spawn_probability(600 + dt) - 0.2).abs();
            assert!(magnitude < previous, "dt={dt}: {magnitude} >= {previous}");
            previous = magnitude;
        }
    }

    #[test]
    fn adjustment_asymptotes_to_base() {
        let mut model = model(None);
        model.record(0, true);
        assert!((model.spawn_probability(10_000) - 0.2).abs() < 1e-9);
        // Cooling-down state is never exited without a threshold.
        assert!(model.last_robbery().is_some());
    }

    #[test]
    fn reset_threshold_clears_cooling_down() {
        // boost 0.3, coefficient 10: the adjustment crosses 0.01
        // between dt=34 (0.0100...) and dt=35 (0.0090...).
        let mut model = model(Some(0.01));
        model.record(0, false);

        assert!(model.spawn_probability(34) > 0.2);
        assert!(model.last_robbery().is_some());

        assert_eq!(model.spawn_probability(35), 0.2);
        assert_eq!(model.last_robbery(), None);

        // A later robbery re-enters the cooling-down state.
        model.record(100, true);
        assert!(model.spawn_probability(100) < 0.2);
    }
}
