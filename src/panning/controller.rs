use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::error::{EngineError, Result};

use super::{
    config::PanningConfig,
    state::{EngineStatus, GainPair, PanningState},
};

// Set to true to enable lifecycle logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Receives the gain pair computed on every tick.
pub type PanCallback = Box<dyn FnMut(GainPair) + Send + 'static>;

struct Shared {
    state: PanningState,
    on_pan_change: Option<PanCallback>,
    position_tx: Option<watch::Sender<f64>>,
}

impl Shared {
    fn publish(&self, position: f64) {
        if let Some(tx) = &self.position_tx {
            tx.send_replace(position);
        }
    }
}

struct Ticker {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

/// Drives a sine-law stereo pan from a tokio ticker.
///
/// Each tick advances the phase, publishes the new pan position on a
/// latest-value channel and hands the resulting [`GainPair`] to the callback
/// registered by [`PanningEngine::start`]. The callback runs on a runtime
/// worker while the engine's state lock is held, which is what lets
/// [`PanningEngine::stop`] promise that no callback fires after it returns.
/// The callback must therefore never call back into the engine.
pub struct PanningEngine {
    shared: Arc<Mutex<Shared>>,
    runtime: Handle,
    ticker: Option<Ticker>,
}

impl PanningEngine {
    pub fn new(runtime: Handle) -> Self {
        Self::with_config(runtime, PanningConfig::default())
    }

    pub fn with_config(runtime: Handle, config: PanningConfig) -> Self {
        let (position_tx, _) = watch::channel(0.0);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: PanningState::new(config),
                on_pan_change: None,
                position_tx: Some(position_tx),
            })),
            runtime,
            ticker: None,
        }
    }

    /// Binds to the tokio runtime the caller is running on.
    pub fn try_current() -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|err| EngineError::illegal_state(format!("no tokio runtime: {err}")))?;
        Ok(Self::new(runtime))
    }

    /// Starts a session with `config`, restarting cleanly if one is running.
    pub fn start<F>(&mut self, config: PanningConfig, on_pan_change: F) -> Result<()>
    where
        F: FnMut(GainPair) + Send + 'static,
    {
        if self.status() == EngineStatus::Disposed {
            return Err(EngineError::illegal_state(
                "cannot start a disposed panning engine",
            ));
        }
        self.stop();

        let generation = {
            let mut shared = lock(&self.shared);
            shared.on_pan_change = Some(Box::new(on_pan_change));
            shared.state.begin_session(config)
        };

        let cancel_token = CancellationToken::new();
        let handle = self.runtime.spawn(ticker_loop(
            self.shared.clone(),
            generation,
            config.tick_interval(),
            cancel_token.clone(),
        ));
        self.ticker = Some(Ticker {
            handle,
            cancel_token,
        });

        log_info!(
            "panning started: cycle {}s, depth {}, tick {}ms",
            config.cycle_seconds(),
            config.depth(),
            config.tick_interval_ms()
        );
        Ok(())
    }

    /// Cancels the running session. No callback fires once this returns.
    /// Calling it while idle or disposed does nothing.
    pub fn stop(&mut self) {
        let was_active = {
            let mut shared = lock(&self.shared);
            let was_active = shared.state.stop();
            if was_active {
                shared.on_pan_change = None;
                shared.publish(0.0);
            }
            was_active
        };

        self.cancel_ticker();

        if was_active {
            log_info!("panning stopped");
        }
    }

    /// Switches to `config`. A running session restarts from phase zero;
    /// an idle engine only remembers the config for the next start.
    pub fn update_config<F>(&mut self, config: PanningConfig, on_pan_change: F) -> Result<()>
    where
        F: FnMut(GainPair) + Send + 'static,
    {
        let is_active = {
            let mut shared = lock(&self.shared);
            match shared.state.status {
                EngineStatus::Active => true,
                EngineStatus::Idle => {
                    shared.state.config = config;
                    false
                }
                EngineStatus::Disposed => {
                    return Err(EngineError::illegal_state(
                        "cannot reconfigure a disposed panning engine",
                    ))
                }
            }
        };

        if is_active {
            log_info!("panning reconfigured, restarting phase");
            self.start(config, on_pan_change)
        } else {
            Ok(())
        }
    }

    /// Stops the engine for good and closes the position stream.
    pub fn dispose(&mut self) {
        self.stop();
        let mut shared = lock(&self.shared);
        if shared.state.status == EngineStatus::Disposed {
            return;
        }
        shared.state.dispose();
        shared.position_tx = None;
        log_info!("panning engine disposed");
    }

    /// Latest pan position; receivers only ever see the newest sample.
    pub fn subscribe_position(&self) -> Result<watch::Receiver<f64>> {
        lock(&self.shared)
            .position_tx
            .as_ref()
            .map(|tx| tx.subscribe())
            .ok_or_else(|| EngineError::illegal_state("panning engine is disposed"))
    }

    pub fn status(&self) -> EngineStatus {
        lock(&self.shared).state.status
    }

    pub fn is_active(&self) -> bool {
        lock(&self.shared).state.is_active()
    }

    pub fn tick_count(&self) -> u64 {
        lock(&self.shared).state.tick_count
    }

    pub fn pan_position(&self) -> f64 {
        lock(&self.shared).state.pan_position
    }

    pub fn config(&self) -> PanningConfig {
        lock(&self.shared).state.config
    }

    pub fn snapshot(&self) -> PanningState {
        lock(&self.shared).state.clone()
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel_token.cancel();
            ticker.handle.abort();
        }
    }
}

impl Drop for PanningEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn ticker_loop(
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    period: time::Duration,
    cancel_token: CancellationToken,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = interval.tick() => {
                if !on_tick(&shared, generation) {
                    break;
                }
            }
        }
    }
}

/// Runs one tick under the state lock. Returns false once the session
/// this ticker belongs to has ended.
fn on_tick(shared: &Mutex<Shared>, generation: u64) -> bool {
    let mut guard = lock(shared);
    if !guard.state.is_current(generation) {
        return false;
    }

    let frame = guard.state.advance();
    guard.publish(frame.position);
    log_debug!(
        "pan tick {}: position {:.4}, gains ({:.4}, {:.4})",
        frame.tick,
        frame.position,
        frame.gains.left,
        frame.gains.right
    );

    if let Some(on_pan_change) = guard.on_pan_change.as_mut() {
        on_pan_change(frame.gains);
    }
    true
}
