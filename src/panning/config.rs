use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError, Result};

/// Shape of one panning session: how long a full left-right-left sweep
/// takes, how far it swings, and how often the scheduler ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPanningConfig")]
pub struct PanningConfig {
    cycle_seconds: f64,
    depth: f64,
    tick_interval_ms: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPanningConfig {
    cycle_seconds: f64,
    depth: f64,
    tick_interval_ms: u64,
}

impl TryFrom<RawPanningConfig> for PanningConfig {
    type Error = EngineError;

    fn try_from(raw: RawPanningConfig) -> Result<Self> {
        Self::new(raw.cycle_seconds, raw.depth, raw.tick_interval_ms)
    }
}

impl PanningConfig {
    pub fn new(cycle_seconds: f64, depth: f64, tick_interval_ms: u64) -> Result<Self> {
        let cycle_seconds = ensure_positive("cycle_seconds", cycle_seconds)?;
        if !(0.0..=1.0).contains(&depth) {
            return Err(EngineError::invalid("depth", depth, "must be within [0, 1]"));
        }
        if tick_interval_ms == 0 {
            return Err(EngineError::invalid(
                "tick_interval_ms",
                0.0,
                "must be > 0",
            ));
        }
        Ok(Self {
            cycle_seconds,
            depth,
            tick_interval_ms,
        })
    }

    /// Unchecked constructor for the built-in band table literals.
    pub(crate) const fn preset(cycle_seconds: f64, depth: f64, tick_interval_ms: u64) -> Self {
        Self {
            cycle_seconds,
            depth,
            tick_interval_ms,
        }
    }

    pub fn cycle_seconds(&self) -> f64 {
        self.cycle_seconds
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Scheduler ticks in one full sine cycle. Need not be an integer.
    pub fn steps_per_cycle(&self) -> f64 {
        (self.cycle_seconds * 1000.0) / self.tick_interval_ms as f64
    }

    /// Phase advance, in radians, per tick.
    pub fn phase_increment(&self) -> f64 {
        std::f64::consts::TAU / self.steps_per_cycle()
    }
}

impl Default for PanningConfig {
    /// The theta band, the engine's target meditation state.
    fn default() -> Self {
        Self::preset(6.0, 0.35, 50)
    }
}
