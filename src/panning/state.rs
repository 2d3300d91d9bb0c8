use serde::{Deserialize, Serialize};

use super::config::PanningConfig;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EngineStatus {
    Idle,
    Active,
    Disposed,
}

impl Default for EngineStatus {
    fn default() -> Self {
        EngineStatus::Idle
    }
}

/// Per-channel gains for the stereo mixer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainPair {
    pub left: f64,
    pub right: f64,
}

impl GainPair {
    pub const UNITY: GainPair = GainPair {
        left: 1.0,
        right: 1.0,
    };

    /// Boost law centred on unity: the side the image leans towards is
    /// raised above 1.0 while the other drops by the same amount, so
    /// `left + right == 2.0` for every position.
    pub fn from_position(depth: f64, position: f64) -> Self {
        let right = 1.0 + depth * position;
        // Derived from `right` so the pair sums to exactly 2.0 in f64.
        Self {
            left: 2.0 - right,
            right,
        }
    }

    pub fn apply(&self, frame: [f32; 2]) -> [f32; 2] {
        [
            frame[0] * self.left as f32,
            frame[1] * self.right as f32,
        ]
    }
}

impl Default for GainPair {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Output of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanFrame {
    pub tick: u64,
    pub position: f64,
    pub gains: GainPair,
}

/// Pan position after `tick` ticks of a session running `config`.
pub fn pan_position_at(config: &PanningConfig, tick: u64) -> f64 {
    (tick as f64 * config.phase_increment()).sin()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanningState {
    pub status: EngineStatus,
    pub config: PanningConfig,
    pub tick_count: u64,
    pub pan_position: f64,
    /// Bumped on every session boundary; a ticker holding an older value
    /// must not touch the state.
    #[serde(skip)]
    pub generation: u64,
}

impl Default for PanningState {
    fn default() -> Self {
        Self {
            status: EngineStatus::Idle,
            config: PanningConfig::default(),
            tick_count: 0,
            pan_position: 0.0,
            generation: 0,
        }
    }
}

impl PanningState {
    pub fn new(config: PanningConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EngineStatus::Active
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.is_active() && self.generation == generation
    }

    /// Starts a fresh session and returns its generation.
    pub fn begin_session(&mut self, config: PanningConfig) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.status = EngineStatus::Active;
        self.config = config;
        self.tick_count = 0;
        self.pan_position = 0.0;
        self.generation
    }

    /// Advances one tick. Phase is recomputed from the tick counter rather
    /// than accumulated, so a delayed tick never drifts or steps backwards.
    pub fn advance(&mut self) -> PanFrame {
        self.tick_count = self.tick_count.saturating_add(1);
        self.pan_position = pan_position_at(&self.config, self.tick_count);
        PanFrame {
            tick: self.tick_count,
            position: self.pan_position,
            gains: GainPair::from_position(self.config.depth(), self.pan_position),
        }
    }

    /// Ends the running session. Returns false when there was none.
    pub fn stop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.generation = self.generation.wrapping_add(1);
        self.status = EngineStatus::Idle;
        self.tick_count = 0;
        self.pan_position = 0.0;
        true
    }

    pub fn dispose(&mut self) {
        self.stop();
        self.status = EngineStatus::Disposed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_second_cycle() -> PanningConfig {
        PanningConfig::new(1.0, 0.35, 50).unwrap()
    }

    #[test]
    fn twenty_ticks_complete_one_cycle() {
        let mut state = PanningState::new(one_second_cycle());
        state.begin_session(one_second_cycle());
        let mut last = None;
        for _ in 0..20 {
            last = Some(state.advance());
        }
        let frame = last.unwrap();
        assert_eq!(state.tick_count, 20);
        assert_eq!(frame.tick, 20);
        assert!(state.pan_position.abs() < 1e-6);
    }

    #[test]
    fn quarter_cycle_peaks_right() {
        let mut state = PanningState::default();
        state.begin_session(one_second_cycle());
        let frame = (0..5).map(|_| state.advance()).last().unwrap();
        assert!((frame.position - 1.0).abs() < 1e-12);
        assert!((frame.gains.left - 0.65).abs() < 1e-12);
        assert!((frame.gains.right - 1.35).abs() < 1e-12);
    }

    #[test]
    fn ticks_are_strictly_increasing() {
        let mut state = PanningState::default();
        state.begin_session(one_second_cycle());
        let ticks: Vec<u64> = (0..50).map(|_| state.advance().tick).collect();
        assert!(ticks.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(ticks[0], 1);
    }

    #[test]
    fn gain_law_stays_in_bounds_and_sums_to_two() {
        for i in 0..=200 {
            let position = -1.0 + i as f64 * 0.01;
            let gains = GainPair::from_position(0.35, position);
            assert!((0.65 - 1e-12..=1.35 + 1e-12).contains(&gains.left));
            assert!((0.65 - 1e-12..=1.35 + 1e-12).contains(&gains.right));
            assert_eq!(gains.left + gains.right, 2.0);
        }
        let full_left = GainPair::from_position(0.35, -1.0);
        assert!((full_left.left - 1.35).abs() < 1e-12);
        assert!((full_left.right - 0.65).abs() < 1e-12);
    }

    #[test]
    fn zero_depth_never_pans() {
        assert_eq!(GainPair::from_position(0.0, 0.7), GainPair::UNITY);
    }

    #[test]
    fn apply_scales_each_channel() {
        let gains = GainPair { left: 1.5, right: 0.5 };
        assert_eq!(gains.apply([0.5, 0.5]), [0.75, 0.25]);
    }

    #[test]
    fn stop_resets_and_invalidates_generation() {
        let mut state = PanningState::default();
        let generation = state.begin_session(one_second_cycle());
        state.advance();
        state.advance();
        assert!(state.is_current(generation));

        assert!(state.stop());
        assert!(!state.is_current(generation));
        assert_eq!(state.status, EngineStatus::Idle);
        assert_eq!(state.pan_position, 0.0);
        assert_eq!(state.tick_count, 0);
        assert!(!state.stop());
    }

    #[test]
    fn new_session_restarts_phase() {
        let mut state = PanningState::default();
        let first = state.begin_session(one_second_cycle());
        for _ in 0..7 {
            state.advance();
        }
        let second = state.begin_session(one_second_cycle());
        assert_ne!(first, second);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.advance().tick, 1);
    }
}
