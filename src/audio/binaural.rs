use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError, Result};
use crate::panning::{BandTable, BrainwaveBand, PanningConfig};

/// Left and right carrier tones of a binaural beat.
///
/// The listener perceives a beat at the difference of the two carriers;
/// that beat picks the brainwave band and so the panning tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCarrierPair")]
pub struct CarrierPair {
    left_hz: f64,
    right_hz: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCarrierPair {
    left_hz: f64,
    right_hz: f64,
}

impl TryFrom<RawCarrierPair> for CarrierPair {
    type Error = EngineError;

    fn try_from(raw: RawCarrierPair) -> Result<Self> {
        Self::new(raw.left_hz, raw.right_hz)
    }
}

impl CarrierPair {
    pub fn new(left_hz: f64, right_hz: f64) -> Result<Self> {
        Ok(Self {
            left_hz: ensure_positive("left_hz", left_hz)?,
            right_hz: ensure_positive("right_hz", right_hz)?,
        })
    }

    pub fn left_hz(&self) -> f64 {
        self.left_hz
    }

    pub fn right_hz(&self) -> f64 {
        self.right_hz
    }

    pub fn beat_hz(&self) -> f64 {
        (self.right_hz - self.left_hz).abs()
    }

    pub fn band(&self) -> BrainwaveBand {
        BrainwaveBand::for_beat_frequency(self.beat_hz())
    }

    pub fn panning_config(&self, table: &BandTable) -> PanningConfig {
        table.config_for(self.band())
    }
}

impl Default for CarrierPair {
    /// 200 Hz / 204 Hz, a 4 Hz delta beat.
    fn default() -> Self {
        Self {
            left_hz: 200.0,
            right_hz: 204.0,
        }
    }
}
