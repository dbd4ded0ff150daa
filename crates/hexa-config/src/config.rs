//! Universe settings: generation parameters, simulation run settings, and
//! their `universe.ron` persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::ParameterSet;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "universe.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Generation parameters (rarity, density, size and distance bounds).
    pub params: ParameterSet,
    /// Headless simulation settings.
    pub simulation: SimulationConfig,
    /// Diagnostics.
    pub debug: DebugConfig,
}

/// Settings for a headless simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the pseudorandom stream. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Fixed frame delta-time in seconds.
    pub frame_dt: f32,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Observer velocity in world units per second.
    pub observer_velocity: [f32; 3],
    /// Populate the starting scene around the origin before the first frame.
    pub initial_scene: bool,
    /// Distance from the observer at which shooting stars appear.
    pub shooting_star_distance: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_dt: 0.016,
            frames: 3600,
            observer_velocity: [0.0, 0.0, -120.0],
            initial_scene: true,
            shooting_star_distance: 500.0,
        }
    }
}

impl SimulationConfig {
    /// Replace a non-finite or non-positive `frame_dt` or
    /// `shooting_star_distance` with its default.
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        if !is_positive(self.frame_dt) {
            log::warn!("Ignoring frame_dt {}; using {}", self.frame_dt, defaults.frame_dt);
            self.frame_dt = defaults.frame_dt;
        }
        if !is_positive(self.shooting_star_distance) {
            log::warn!(
                "Ignoring shooting_star_distance {}; using {}",
                self.shooting_star_distance,
                defaults.shooting_star_distance
            );
            self.shooting_star_distance = defaults.shooting_star_distance;
        }
    }
}

/// Finite and strictly greater than zero.
pub(crate) fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Diagnostic settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Default tracing level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for HexaNebula, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hexanebula"))
}

impl Config {
    /// Path of the settings file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Read `universe.ron` from `config_dir`, writing the defaults there
    /// first if the file does not exist yet.
    ///
    /// Parameters read from disk are clamped exactly as the setters would;
    /// unusable simulation timings fall back to their defaults.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(config_dir);
        if !path.exists() {
            let defaults = Self::default();
            defaults.save(config_dir)?;
            log::info!("Wrote default universe settings to {}", path.display());
            return Ok(defaults);
        }

        let config = Self::read(&path)?;
        log::info!(
            "Universe settings loaded from {} (seed: {})",
            path.display(),
            config
                .simulation
                .seed
                .map_or_else(|| "random".to_string(), |seed| seed.to_string())
        );
        Ok(config)
    }

    /// Write the settings to `config_dir/universe.ron` as pretty RON,
    /// creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let text = ron::ser::to_string_pretty(self, Self::pretty_format())
            .map_err(ConfigError::SerializeError)?;
        std::fs::write(Self::path_in(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some` only if it no longer matches `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let on_disk = Self::read(&Self::path_in(config_dir))?;
        if on_disk == *self {
            return Ok(None);
        }
        log::info!("Universe settings changed on disk");
        Ok(Some(on_disk))
    }

    fn pretty_format() -> ron::ser::PrettyConfig {
        // Vectors such as the observer velocity stay on one line.
        ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .struct_names(false)
            .enumerate_arrays(false)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let mut config: Self = ron::from_str(&text).map_err(ConfigError::ParseError)?;
        config.simulation.sanitize();
        Ok(config)
    }
}
