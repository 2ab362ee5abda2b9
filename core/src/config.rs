//! Run configuration: the typed parameter record and its validation.
//!
//! Validation is all-or-nothing: the engine only ever sees a config
//! that passed [`SimConfig::validate`], so no partially-applied
//! parameter state can exist.

use crate::clock;
use crate::error::{SimError, SimResult};
use crate::types::Minute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Opening time, minutes since midnight.
    pub open: Minute,
    /// Closing time, minutes since midnight. Must be strictly after `open`.
    pub close: Minute,
    /// Per-minute probability that a new customer arrives.
    pub spawn_probability: f64,
    /// Service minutes consumed by each of a customer's tasks.
    pub minutes_per_task: u32,
    /// Per-minute probability of a robbery while the facility is open.
    pub robbery_probability: f64,
    /// Probability that a robbery succeeds against the clerk.
    pub robbery_success_rate: f64,
    /// Per-customer probability of being killed during a robbery.
    pub kill_probability: f64,
    /// Spawn-probability boost applied after a failed robbery.
    pub spawn_boost: f64,
    /// Spawn-probability drop applied after a successful robbery.
    pub spawn_drop: f64,
    /// Decay coefficient for how quickly the boost/drop fades.
    pub adjustment_coefficient: f64,
    /// When set, the cooling-down state is cleared once the decayed
    /// adjustment magnitude falls below this threshold. When unset the
    /// adjustment is applied forever, trending to zero.
    #[serde(default)]
    pub adjustment_reset_threshold: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            open: 9 * 60,
            close: 18 * 60,
            spawn_probability: 0.2,
            minutes_per_task: 2,
            robbery_probability: 0.001,
            robbery_success_rate: 0.3,
            kill_probability: 0.5,
            spawn_boost: 0.3,
            spawn_drop: 0.15,
            adjustment_coefficient: 10.0,
            adjustment_reset_threshold: None,
        }
    }
}

impl SimConfig {
    /// Check every field, reporting the first offender by name.
    pub fn validate(&self) -> SimResult<()> {
        if self.close <= self.open {
            return Err(SimError::Config {
                field: "close",
                reason: format!(
                    "closing time {} must be strictly after opening time {}",
                    clock::display(self.close),
                    clock::display(self.open)
                ),
            });
        }
        probability("spawn_probability", self.spawn_probability)?;
        probability("robbery_probability", self.robbery_probability)?;
        probability("robbery_success_rate", self.robbery_success_rate)?;
        probability("kill_probability", self.kill_probability)?;
        probability("spawn_boost", self.spawn_boost)?;
        probability("spawn_drop", self.spawn_drop)?;
        if self.minutes_per_task == 0 {
            return Err(SimError::Config {
                field: "minutes_per_task",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.adjustment_coefficient > 0.0) || !self.adjustment_coefficient.is_finite() {
            return Err(SimError::Config {
                field: "adjustment_coefficient",
                reason: format!("must be a positive number, got {}", self.adjustment_coefficient),
            });
        }
        if let Some(threshold) = self.adjustment_reset_threshold {
            if !(threshold > 0.0) || !threshold.is_finite() {
                return Err(SimError::Config {
                    field: "adjustment_reset_threshold",
                    reason: format!("must be a positive number, got {threshold}"),
                });
            }
        }
        Ok(())
    }
}

fn probability(field: &'static str, value: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::Config {
            field,
            reason: format!("probability must lie in [0, 1], got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_close_not_after_open() {
        let mut config = SimConfig::default();
        config.close = config.open;
        let err = config.validate().unwrap_err();
        match err {
            SimError::Config { field, reason } => {
                assert_eq!(field, "close");
                assert!(reason.contains("opening"));
            }
            other => panic!("unexpected error: {other}"),
        }

        config.close = config.open - 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_probabilities() {
        let fields: [(&str, fn(&mut SimConfig, f64)); 6] = [
            ("spawn_probability", |c, v| c.spawn_probability = v),
            ("robbery_probability", |c, v| c.robbery_probability = v),
            ("robbery_success_rate", |c, v| c.robbery_success_rate = v),
            ("kill_probability", |c, v| c.kill_probability = v),
            ("spawn_boost", |c, v| c.spawn_boost = v),
            ("spawn_drop", |c, v| c.spawn_drop = v),
        ];
        for (field, apply) in fields {
            for bad in [-0.1, 1.5, f64::NAN] {
                let mut config = SimConfig::default();
                apply(&mut config, bad);
                let err = config.validate().unwrap_err();
                match err {
                    SimError::Config { field: f, .. } => assert_eq!(f, field),
                    other => panic!("unexpected error: {other}"),
                }
            }
        }
    }

    #[test]
    fn rejects_zero_minutes_per_task() {
        let config = SimConfig { minutes_per_task: 0, ..SimConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SimError::Config { field: "minutes_per_task", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_coefficient() {
        for bad in [0.0, -1.0, f64::NAN] {
            let config = SimConfig { adjustment_coefficient: bad, ..SimConfig::default() };
            assert!(matches!(
                config.validate(),
                Err(SimError::Config { field: "adjustment_coefficient", .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_reset_threshold() {
        let config = SimConfig {
            adjustment_reset_threshold: Some(0.0),
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            adjustment_reset_threshold: Some(0.01),
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
