//! Brainwave bands and the table that tunes panning for each of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::PanningConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrainwaveBand {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
    HighGamma,
}

impl BrainwaveBand {
    /// Ascending; the order the threshold scan walks.
    pub const ALL: [BrainwaveBand; 6] = [
        Self::Delta,
        Self::Theta,
        Self::Alpha,
        Self::Beta,
        Self::Gamma,
        Self::HighGamma,
    ];

    /// Inclusive upper bound of the band in Hz. High-gamma is open-ended.
    pub fn upper_bound_hz(self) -> Option<f64> {
        match self {
            Self::Delta => Some(4.0),
            Self::Theta => Some(8.0),
            Self::Alpha => Some(12.0),
            Self::Beta => Some(30.0),
            Self::Gamma => Some(50.0),
            Self::HighGamma => None,
        }
    }

    /// First band whose upper bound admits `beat_hz`.
    ///
    /// Zero, negative and NaN beats land in delta; anything above 50 Hz in
    /// high-gamma.
    pub fn for_beat_frequency(beat_hz: f64) -> Self {
        if beat_hz.is_nan() {
            return Self::Delta;
        }
        Self::ALL
            .into_iter()
            .find(|band| band.upper_bound_hz().map_or(true, |upper| beat_hz <= upper))
            .unwrap_or(Self::HighGamma)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Delta => "delta",
            Self::Theta => "theta",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Gamma => "gamma",
            Self::HighGamma => "high-gamma",
        }
    }
}

impl fmt::Display for BrainwaveBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Panning tuning per band.
///
/// The literals in [`BandTable::default`] are tunable presets, not a curve;
/// deployments may load their own table through the settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandTable {
    pub delta: PanningConfig,
    pub theta: PanningConfig,
    pub alpha: PanningConfig,
    pub beta: PanningConfig,
    pub gamma: PanningConfig,
    pub high_gamma: PanningConfig,
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            delta: PanningConfig::preset(8.0, 0.40, 50),
            theta: PanningConfig::preset(6.0, 0.35, 50),
            alpha: PanningConfig::preset(4.0, 0.30, 40),
            beta: PanningConfig::preset(2.0, 0.25, 25),
            gamma: PanningConfig::preset(1.0, 0.20, 15),
            high_gamma: PanningConfig::preset(0.5, 0.15, 10),
        }
    }
}

impl BandTable {
    pub fn config_for(&self, band: BrainwaveBand) -> PanningConfig {
        match band {
            BrainwaveBand::Delta => self.delta,
            BrainwaveBand::Theta => self.theta,
            BrainwaveBand::Alpha => self.alpha,
            BrainwaveBand::Beta => self.beta,
            BrainwaveBand::Gamma => self.gamma,
            BrainwaveBand::HighGamma => self.high_gamma,
        }
    }

    pub fn config_for_beat_frequency(&self, beat_hz: f64) -> PanningConfig {
        self.config_for(BrainwaveBand::for_beat_frequency(beat_hz))
    }

    pub fn with_config(mut self, band: BrainwaveBand, config: PanningConfig) -> Self {
        let slot = match band {
            BrainwaveBand::Delta => &mut self.delta,
            BrainwaveBand::Theta => &mut self.theta,
            BrainwaveBand::Alpha => &mut self.alpha,
            BrainwaveBand::Beta => &mut self.beta,
            BrainwaveBand::Gamma => &mut self.gamma,
            BrainwaveBand::HighGamma => &mut self.high_gamma,
        };
        *slot = config;
        self
    }
}

/// Looks `beat_hz` up in the built-in table.
pub fn config_for_beat_frequency(beat_hz: f64) -> PanningConfig {
    BandTable::default().config_for_beat_frequency(beat_hz)
}
