//! Semitone math between a target frequency and a reference pitch.
//!
//! All functions are pure and reentrant.

use crate::error::{ensure_positive, EngineError, Result};

/// Concert pitch A4 in Hz, the reference every preset is tuned against.
pub const STANDARD_PITCH_HZ: f64 = 440.0;

/// Accuracy band, in percent, a shipped preset must stay within.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 2.0;

pub const SEMITONES_PER_OCTAVE: f64 = 12.0;

/// Semitones needed to move `standard_hz` onto `target_hz`.
///
/// Negative for downward shifts, positive for upward, exactly `0.0` when the
/// two frequencies are equal.
pub fn pitch_shift_semitones(target_hz: f64, standard_hz: f64) -> Result<f64> {
    let target_hz = ensure_positive("target_hz", target_hz)?;
    let standard_hz = ensure_positive("standard_hz", standard_hz)?;
    if target_hz == standard_hz {
        return Ok(0.0);
    }
    Ok(SEMITONES_PER_OCTAVE * (target_hz / standard_hz).log2())
}

/// [`pitch_shift_semitones`] against [`STANDARD_PITCH_HZ`].
pub fn pitch_shift_from_standard(target_hz: f64) -> Result<f64> {
    pitch_shift_semitones(target_hz, STANDARD_PITCH_HZ)
}

/// Frequency produced by shifting `base_hz` by `semitones`.
///
/// Exact inverse of [`pitch_shift_semitones`].
pub fn result_frequency_hz(semitones: f64, base_hz: f64) -> Result<f64> {
    let base_hz = ensure_positive("base_hz", base_hz)?;
    if !semitones.is_finite() {
        return Err(EngineError::invalid(
            "semitones",
            semitones,
            "must be finite",
        ));
    }
    Ok(base_hz * (semitones / SEMITONES_PER_OCTAVE).exp2())
}

/// Checks that `semitones` applied to `base_hz` lands within
/// `tolerance_percent` of `expected_hz`.
///
/// A `false` result is an ordinary answer, not an error: approximate presets
/// are expected to be measured with this.
pub fn is_within_tolerance(
    semitones: f64,
    expected_hz: f64,
    base_hz: f64,
    tolerance_percent: f64,
) -> Result<bool> {
    let expected_hz = ensure_positive("expected_hz", expected_hz)?;
    if !(tolerance_percent.is_finite() && tolerance_percent >= 0.0) {
        return Err(EngineError::invalid(
            "tolerance_percent",
            tolerance_percent,
            "must be finite and >= 0",
        ));
    }
    let actual_hz = result_frequency_hz(semitones, base_hz)?;
    Ok((actual_hz - expected_hz).abs() <= expected_hz * tolerance_percent / 100.0)
}

/// Player pitch parameter for a semitone shift.
///
/// This linear mapping is the calibration contract with the playback
/// pipeline; the player interprets the value, not this crate.
pub fn playback_pitch(semitones: f64) -> f64 {
    1.0 + semitones / SEMITONES_PER_OCTAVE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_relative_eq(actual: f64, expected: f64, rel: f64) {
        let err = ((actual - expected) / expected).abs();
        assert!(
            err <= rel,
            "expected {expected}, got {actual} (relative error {err})"
        );
    }

    #[test]
    fn equal_frequencies_shift_by_exactly_zero() {
        assert_eq!(pitch_shift_semitones(440.0, 440.0).unwrap(), 0.0);
        assert_eq!(pitch_shift_semitones(123.456, 123.456).unwrap(), 0.0);
    }

    #[test]
    fn verdi_tuning_known_values() {
        let shift = pitch_shift_semitones(432.0, 440.0).unwrap();
        assert!((shift - -0.31767).abs() < 1e-4, "got {shift}");

        let hz = result_frequency_hz(-0.31767, 440.0).unwrap();
        assert!((hz - 432.0).abs() < 0.05, "got {hz}");
    }

    #[test]
    fn octaves_are_twelve_semitones() {
        assert!((pitch_shift_semitones(880.0, 440.0).unwrap() - 12.0).abs() < 1e-12);
        assert!((pitch_shift_semitones(220.0, 440.0).unwrap() + 12.0).abs() < 1e-12);
        assert!((result_frequency_hz(-24.0, 440.0).unwrap() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn round_trip_recovers_target() {
        let samples = [0.5, 1.0, 27.5, 174.0, 432.0, 440.0, 528.0, 963.0, 4186.0, 20_000.0];
        for &standard in &samples {
            for &target in &samples {
                let shift = pitch_shift_semitones(target, standard).unwrap();
                let back = result_frequency_hz(shift, standard).unwrap();
                assert_relative_eq(back, target, 1e-9);
            }
        }
    }

    #[test]
    fn extreme_ratios_stay_finite_and_accurate() {
        let down = pitch_shift_semitones(440.0e-6, 440.0).unwrap();
        let up = pitch_shift_semitones(440.0e6, 440.0).unwrap();
        let expected = SEMITONES_PER_OCTAVE * 1e6f64.log2();
        assert_relative_eq(up, expected, 1e-6);
        assert_relative_eq(down, -expected, 1e-6);
        assert_relative_eq(result_frequency_hz(up, 440.0).unwrap(), 440.0e6, 1e-9);
    }

    #[test]
    fn non_positive_frequencies_are_rejected() {
        for bad in [0.0, -432.0, f64::NAN] {
            assert!(matches!(
                pitch_shift_semitones(bad, 440.0),
                Err(EngineError::InvalidArgument { name: "target_hz", .. })
            ));
            assert!(matches!(
                pitch_shift_semitones(432.0, bad),
                Err(EngineError::InvalidArgument { name: "standard_hz", .. })
            ));
            assert!(result_frequency_hz(1.0, bad).is_err());
        }
    }

    #[test]
    fn tolerance_gate_accepts_verdi_shift() {
        assert!(is_within_tolerance(-0.31767, 432.0, 440.0, 2.0).unwrap());
        assert!(is_within_tolerance(-0.31767, 432.0, 440.0, 0.01).unwrap());
    }

    #[test]
    fn tolerance_gate_rejects_unshifted_audio() {
        // 440 Hz sits 1.85% above 432 Hz, so only a tighter gate catches it.
        assert!(!is_within_tolerance(0.0, 432.0, 440.0, 1.0).unwrap());
        assert!(!is_within_tolerance(0.0, 528.0, 440.0, 2.0).unwrap());
        assert!(is_within_tolerance(0.0, 432.0, 440.0, 2.0).unwrap());
    }

    #[test]
    fn tolerance_gate_rejects_bad_inputs() {
        assert!(is_within_tolerance(0.0, 0.0, 440.0, 2.0).is_err());
        assert!(is_within_tolerance(0.0, 432.0, 440.0, -1.0).is_err());
        assert!(is_within_tolerance(0.0, 432.0, -440.0, 2.0).is_err());
    }

    #[test]
    fn playback_pitch_is_linear_in_semitones() {
        assert_eq!(playback_pitch(0.0), 1.0);
        assert_eq!(playback_pitch(12.0), 2.0);
        assert_eq!(playback_pitch(-6.0), 0.5);
    }
}
