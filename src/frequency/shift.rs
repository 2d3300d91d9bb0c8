use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, EngineError, Result};

use super::math::{self, STANDARD_PITCH_HZ};

/// A validated (target, reference) frequency pair.
///
/// Only the two frequencies are stored; the semitone shift is derived on
/// every call so it can never drift from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFrequencyShift")]
pub struct FrequencyShift {
    target_hz: f64,
    standard_hz: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrequencyShift {
    target_hz: f64,
    #[serde(default = "default_standard_hz")]
    standard_hz: f64,
}

fn default_standard_hz() -> f64 {
    STANDARD_PITCH_HZ
}

impl TryFrom<RawFrequencyShift> for FrequencyShift {
    type Error = EngineError;

    fn try_from(raw: RawFrequencyShift) -> Result<Self> {
        Self::new(raw.target_hz, raw.standard_hz)
    }
}

impl FrequencyShift {
    pub fn new(target_hz: f64, standard_hz: f64) -> Result<Self> {
        Ok(Self {
            target_hz: ensure_positive("target_hz", target_hz)?,
            standard_hz: ensure_positive("standard_hz", standard_hz)?,
        })
    }

    /// Shift from concert pitch (440 Hz) to `target_hz`.
    pub fn from_standard(target_hz: f64) -> Result<Self> {
        Self::new(target_hz, STANDARD_PITCH_HZ)
    }

    pub fn target_hz(&self) -> f64 {
        self.target_hz
    }

    pub fn standard_hz(&self) -> f64 {
        self.standard_hz
    }

    pub fn semitones(&self) -> f64 {
        if self.target_hz == self.standard_hz {
            return 0.0;
        }
        math::SEMITONES_PER_OCTAVE * (self.target_hz / self.standard_hz).log2()
    }

    /// Value handed to the player's pitch parameter.
    pub fn playback_pitch(&self) -> f64 {
        math::playback_pitch(self.semitones())
    }

    /// Frequency reached by applying [`Self::semitones`] to the reference.
    pub fn result_hz(&self) -> f64 {
        self.standard_hz * (self.semitones() / math::SEMITONES_PER_OCTAVE).exp2()
    }

    pub fn is_within_tolerance(&self, expected_hz: f64, tolerance_percent: f64) -> Result<bool> {
        math::is_within_tolerance(
            self.semitones(),
            expected_hz,
            self.standard_hz,
            tolerance_percent,
        )
    }
}
