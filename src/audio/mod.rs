pub mod binaural;

pub use binaural::CarrierPair;
