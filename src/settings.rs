/// Front-end settings.
///
/// Read from the JSON file named by `RIVER_CROSSING_CONFIG`; any field left
/// out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compute::DEFAULT_SEED;
use crate::entities::Event;
use crate::vector::ROW_HEIGHT;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "RIVER_CROSSING_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("{name} must be positive, got {value}")]
    NonPositiveStep { name: &'static str, value: f64 },

    #[error("vertical_step may not exceed one row ({max}), got {value}")]
    VerticalStepTooLarge { value: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Horizontal distance of one left/right press.
    pub horizontal_step: f64,
    /// Vertical distance of one up/down press.
    pub vertical_step: f64,
    /// Seed of the first game; 0 picks a random one.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            horizontal_step: 20.0,
            vertical_step: ROW_HEIGHT,
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Load from `RIVER_CROSSING_CONFIG` if set, defaults otherwise.
    pub fn load() -> Result<Self, SettingsError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        log::info!("settings loaded from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval_ms == 0 {
            return Err(SettingsError::ZeroTickInterval);
        }
        for (name, value) in [
            ("horizontal_step", self.horizontal_step),
            ("vertical_step", self.vertical_step),
        ] {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(SettingsError::NonPositiveStep { name, value });
            }
        }
        if self.vertical_step > ROW_HEIGHT {
            return Err(SettingsError::VerticalStepTooLarge {
                value: self.vertical_step,
                max: ROW_HEIGHT,
            });
        }
        Ok(())
    }

    pub fn move_up(&self) -> Event {
        Event::Move { dx: 0.0, dy: -self.vertical_step }
    }

    pub fn move_down(&self) -> Event {
        Event::Move { dx: 0.0, dy: self.vertical_step }
    }

    pub fn move_left(&self) -> Event {
        Event::Move { dx: -self.horizontal_step, dy: 0.0 }
    }

    pub fn move_right(&self) -> Event {
        Event::Move { dx: self.horizontal_step, dy: 0.0 }
    }
}
