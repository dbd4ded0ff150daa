//! Configuration system for the HexaNebula universe generator.
//!
//! Provides the tunable [`ParameterSet`] consumed by every generator, plus
//! simulation settings that persist to disk as RON files. Supports CLI
//! overrides via clap, hot-reload detection, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;
mod params;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, SimulationConfig, default_config_dir};
pub use error::ConfigError;
pub use params::{ParameterName, ParameterSet};
