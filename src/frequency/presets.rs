//! Named healing frequencies and the pitch-shift constants shipped for them.
//!
//! Several shipped constants are rounded to a friendly semitone value and do
//! not reproduce the named frequency exactly. That is a product choice; the
//! tolerance gate in [`HealingFrequency::validate`] is what keeps it honest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::math::{self, STANDARD_PITCH_HZ};

/// Shipped and exact shifts closer than this count as exact.
const APPROXIMATION_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealingFrequency {
    Solfeggio174,
    Solfeggio285,
    Solfeggio396,
    Solfeggio417,
    Verdi432,
    Solfeggio528,
    Solfeggio639,
    Solfeggio741,
    Solfeggio852,
    Solfeggio963,
}

impl HealingFrequency {
    pub const ALL: [HealingFrequency; 10] = [
        Self::Solfeggio174,
        Self::Solfeggio285,
        Self::Solfeggio396,
        Self::Solfeggio417,
        Self::Verdi432,
        Self::Solfeggio528,
        Self::Solfeggio639,
        Self::Solfeggio741,
        Self::Solfeggio852,
        Self::Solfeggio963,
    ];

    pub fn target_hz(self) -> f64 {
        match self {
            Self::Solfeggio174 => 174.0,
            Self::Solfeggio285 => 285.0,
            Self::Solfeggio396 => 396.0,
            Self::Solfeggio417 => 417.0,
            Self::Verdi432 => 432.0,
            Self::Solfeggio528 => 528.0,
            Self::Solfeggio639 => 639.0,
            Self::Solfeggio741 => 741.0,
            Self::Solfeggio852 => 852.0,
            Self::Solfeggio963 => 963.0,
        }
    }

    /// Pitch shift, in semitones from 440 Hz, that playback actually uses.
    pub fn shipped_semitones(self) -> f64 {
        match self {
            Self::Solfeggio174 => -16.0,
            Self::Solfeggio285 => -7.5,
            Self::Solfeggio396 => -1.8,
            Self::Solfeggio417 => -0.9,
            Self::Verdi432 => -0.31767,
            // +3.0 plays 523.25 Hz
            Self::Solfeggio528 => 3.0,
            Self::Solfeggio639 => 6.5,
            Self::Solfeggio741 => 9.0,
            Self::Solfeggio852 => 11.5,
            Self::Solfeggio963 => 13.5,
        }
    }

    pub fn exact_semitones(self) -> f64 {
        math::SEMITONES_PER_OCTAVE * (self.target_hz() / STANDARD_PITCH_HZ).log2()
    }

    pub fn is_approximate(self) -> bool {
        (self.shipped_semitones() - self.exact_semitones()).abs() > APPROXIMATION_EPSILON
    }

    /// Frequency the shipped shift really produces from 440 Hz.
    pub fn shipped_hz(self) -> f64 {
        STANDARD_PITCH_HZ * (self.shipped_semitones() / math::SEMITONES_PER_OCTAVE).exp2()
    }

    pub fn playback_pitch(self) -> f64 {
        math::playback_pitch(self.shipped_semitones())
    }

    /// Runs the tolerance gate on the shipped constant.
    pub fn validate(self, tolerance_percent: f64) -> Result<bool> {
        math::is_within_tolerance(
            self.shipped_semitones(),
            self.target_hz(),
            STANDARD_PITCH_HZ,
            tolerance_percent,
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Solfeggio174 => "solfeggio_174",
            Self::Solfeggio285 => "solfeggio_285",
            Self::Solfeggio396 => "solfeggio_396",
            Self::Solfeggio417 => "solfeggio_417",
            Self::Verdi432 => "verdi_432",
            Self::Solfeggio528 => "solfeggio_528",
            Self::Solfeggio639 => "solfeggio_639",
            Self::Solfeggio741 => "solfeggio_741",
            Self::Solfeggio852 => "solfeggio_852",
            Self::Solfeggio963 => "solfeggio_963",
        }
    }

    fn from_hz_label(label: &str) -> Option<Self> {
        let hz: u32 = label.parse().ok()?;
        Self::ALL
            .into_iter()
            .find(|preset| preset.target_hz() as u32 == hz)
    }
}

impl fmt::Display for HealingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HealingFrequency {
    type Err = EngineError;

    /// Accepts `"528"`, `"528hz"`, `"528 Hz"` or a preset name such as
    /// `"solfeggio_528"`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Some(preset) = Self::ALL.into_iter().find(|p| p.name() == normalized) {
            return Ok(preset);
        }

        let label = normalized.trim_end_matches("hz").trim_end();
        Self::from_hz_label(label).ok_or_else(|| EngineError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shipped_preset_passes_the_two_percent_gate() {
        for preset in HealingFrequency::ALL {
            assert!(
                preset.validate(math::DEFAULT_TOLERANCE_PERCENT).unwrap(),
                "{preset} plays {} Hz",
                preset.shipped_hz()
            );
        }
    }

    #[test]
    fn rounded_presets_are_flagged_as_approximate() {
        assert!(HealingFrequency::Solfeggio528.is_approximate());
        assert!(HealingFrequency::Solfeggio639.is_approximate());
        assert!(!HealingFrequency::Verdi432.is_approximate());
    }

    #[test]
    fn approximate_528_misses_a_tight_gate() {
        let preset = HealingFrequency::Solfeggio528;
        assert!((preset.shipped_hz() - 523.25).abs() < 0.01);
        assert!(!preset.validate(0.5).unwrap());
    }

    #[test]
    fn presets_parse_from_identifiers() {
        assert_eq!("528".parse::<HealingFrequency>().unwrap(), HealingFrequency::Solfeggio528);
        assert_eq!("528Hz".parse::<HealingFrequency>().unwrap(), HealingFrequency::Solfeggio528);
        assert_eq!("963 hz".parse::<HealingFrequency>().unwrap(), HealingFrequency::Solfeggio963);
        assert_eq!("verdi_432".parse::<HealingFrequency>().unwrap(), HealingFrequency::Verdi432);
        assert_eq!(
            "440".parse::<HealingFrequency>(),
            Err(EngineError::UnknownPreset("440".to_string()))
        );
        assert!("loud".parse::<HealingFrequency>().is_err());
    }

    #[test]
    fn names_round_trip_through_display() {
        for preset in HealingFrequency::ALL {
            assert_eq!(preset.to_string().parse::<HealingFrequency>().unwrap(), preset);
        }
    }
}
