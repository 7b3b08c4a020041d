//! Engine configuration.
//!
//! `SimParams` is a plain value the host application builds (typically from
//! a TOML/JSON file) and hands to the engine at construction.  Validation
//! lives here so every consumer gets the same contract.

use crate::error::{CoreError, CoreResult};

/// What happens when an agent tries to enter an edge that is at capacity.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// Over-capacity occupancy is allowed; the congestion weight alone
    /// discourages it.  The default.
    #[default]
    Queue,
    /// A full edge is treated as closed at the entry check; the agent waits
    /// at the boundary node until a re-plan routes it elsewhere.
    ClosedWhenFull,
}

/// Top-level engine configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Simulation step duration in seconds.
    pub dt: f64,

    /// Consecutive identical beacon readings required before the inferred
    /// beacon switches.
    pub hysteresis_threshold: u32,

    /// Standard deviation of the Gaussian noise added to each beacon range.
    pub localization_noise_sigma: f64,

    /// Congestion sensitivity `α` in `T0 * (1 + α·(n/C)^β)`.
    pub congestion_sensitivity: f64,

    /// Congestion exponent `β`.
    pub congestion_exponent: f64,

    /// Seconds between re-plan boundaries.  Internally converted to a tick
    /// count (`ceil(interval / dt)`, minimum 1) so long runs never drift.
    pub replan_interval_secs: f64,

    /// Lower bound of the uniform per-agent speed sample (units/second).
    pub agent_speed_min: f64,

    /// Upper bound of the uniform per-agent speed sample (units/second).
    pub agent_speed_max: f64,

    /// Behavior at capacity-saturated edges.
    pub overflow_policy: OverflowPolicy,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: 1.0,
            hysteresis_threshold: 3,
            localization_noise_sigma: 5.0,
            congestion_sensitivity: 1.0,
            congestion_exponent: 2.0,
            replan_interval_secs: 10.0,
            agent_speed_min: 10.0,
            agent_speed_max: 20.0,
            overflow_policy: OverflowPolicy::Queue,
        }
    }
}

impl SimParams {
    /// Check every field for internal consistency.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(CoreError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if self.hysteresis_threshold == 0 {
            return Err(CoreError::Config("hysteresis_threshold must be >= 1".into()));
        }
        if !(self.localization_noise_sigma >= 0.0) {
            return Err(CoreError::Config(format!(
                "localization_noise_sigma must be >= 0, got {}",
                self.localization_noise_sigma
            )));
        }
        if !(self.congestion_sensitivity >= 0.0 && self.congestion_sensitivity.is_finite()) {
            return Err(CoreError::Config(format!(
                "congestion_sensitivity must be >= 0 and finite, got {}",
                self.congestion_sensitivity
            )));
        }
        if !(self.congestion_exponent >= 0.0 && self.congestion_exponent.is_finite()) {
            return Err(CoreError::Config(format!(
                "congestion_exponent must be >= 0 and finite, got {}",
                self.congestion_exponent
            )));
        }
        if !(self.replan_interval_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "replan_interval_secs must be positive, got {}",
                self.replan_interval_secs
            )));
        }
        if !(self.agent_speed_min > 0.0 && self.agent_speed_max >= self.agent_speed_min) {
            return Err(CoreError::Config(format!(
                "agent speed range [{}, {}] must be positive and ordered",
                self.agent_speed_min, self.agent_speed_max
            )));
        }
        Ok(())
    }

    /// Re-plan interval expressed in whole ticks, never less than one.
    #[inline]
    pub fn replan_interval_ticks(&self) -> u64 {
        (self.replan_interval_secs / self.dt).ceil().max(1.0) as u64
    }

    /// Midpoint of the configured speed range — the idealized cruising speed
    /// used as the delay baseline in the stats snapshot.
    #[inline]
    pub fn mean_speed(&self) -> f64 {
        0.5 * (self.agent_speed_min + self.agent_speed_max)
    }
}
