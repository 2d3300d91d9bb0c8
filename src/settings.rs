use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use crate::error::ensure_positive;
use crate::frequency::{DEFAULT_TOLERANCE_PERCENT, STANDARD_PITCH_HZ};
use crate::panning::{BandTable, PanningConfig};

const ENABLE_LOGS: bool = true;

use crate::log_info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub standard_hz: f64,
    pub tolerance_percent: f64,
    pub band_table: BandTable,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            standard_hz: STANDARD_PITCH_HZ,
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            band_table: BandTable::default(),
        }
    }
}

impl EngineSettings {
    fn validate(&self) -> Result<()> {
        ensure_positive("standard_hz", self.standard_hz)?;
        ensure_positive("tolerance_percent", self.tolerance_percent)?;
        Ok(())
    }
}

/// JSON-file backed settings. Band configs are validated as they are
/// deserialized; a bad file is an error, never silently replaced.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<EngineSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let data = read_settings(&path)?;
            log_info!("Loaded engine settings from {}", path.display());
            data
        } else {
            EngineSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> EngineSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn band_table(&self) -> BandTable {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .band_table
            .clone()
    }

    pub fn config_for_beat_frequency(&self, beat_hz: f64) -> PanningConfig {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .band_table
            .config_for_beat_frequency(beat_hz)
    }

    pub fn update(&self, settings: EngineSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn update_band_table(&self, table: BandTable) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let updated = EngineSettings {
            band_table: table,
            ..guard.clone()
        };
        self.persist(&updated)?;
        *guard = updated;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let data = read_settings(&self.path)?;
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;
        Ok(())
    }

    fn persist(&self, data: &EngineSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

fn read_settings(path: &Path) -> Result<EngineSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let data: EngineSettings = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    data.validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(data)
}
