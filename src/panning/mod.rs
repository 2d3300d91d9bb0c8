pub mod bands;
pub mod config;
pub mod controller;
pub mod state;

pub use bands::{config_for_beat_frequency, BandTable, BrainwaveBand};
pub use config::PanningConfig;
pub use controller::{PanCallback, PanningEngine};
pub use state::{pan_position_at, EngineStatus, GainPair, PanFrame, PanningState};
