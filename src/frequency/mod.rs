pub mod math;
pub mod presets;
pub mod shift;

pub use math::{
    is_within_tolerance, pitch_shift_from_standard, pitch_shift_semitones, playback_pitch,
    result_frequency_hz, DEFAULT_TOLERANCE_PERCENT, STANDARD_PITCH_HZ,
};
pub use presets::HealingFrequency;
pub use shift::FrequencyShift;
