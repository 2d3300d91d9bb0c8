//! Binaural-beat frequency engine.
//!
//! Two independent pieces sit on top of a shared error type:
//!
//! * [`frequency`] computes the semitone shift that retunes 440 Hz audio to
//!   a healing frequency, its inverse, and the tolerance gate shipped
//!   presets must pass.
//! * [`panning`] maps a binaural beat to a brainwave band's
//!   [`PanningConfig`] and runs a [`PanningEngine`] that emits stereo gain
//!   pairs on a tokio ticker.
//!
//! Decoding, resampling and mixing belong to the host's audio pipeline; this
//! crate only produces the numbers that pipeline applies.

pub mod audio;
pub mod error;
pub mod frequency;
pub mod panning;
pub mod settings;
pub mod utils;

pub use audio::CarrierPair;
pub use error::{EngineError, Result};
pub use frequency::{
    is_within_tolerance, pitch_shift_from_standard, pitch_shift_semitones, playback_pitch,
    result_frequency_hz, FrequencyShift, HealingFrequency,
};
pub use panning::{
    config_for_beat_frequency, BandTable, BrainwaveBand, EngineStatus, GainPair, PanningConfig,
    PanningEngine,
};
pub use settings::{EngineSettings, SettingsStore};
pub use utils::logging::init_logging;
