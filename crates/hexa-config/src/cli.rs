//! Command-line argument parsing for the HexaNebula simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::config::is_positive;
use crate::error::ConfigError;
use crate::params::ParameterName;

/// HexaNebula command-line arguments.
///
/// CLI values override settings loaded from `universe.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexa-sim", about = "HexaNebula headless universe simulator")]
pub struct CliArgs {
    /// Seed for the pseudorandom stream.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Frame delta-time in seconds.
    #[arg(long)]
    pub dt: Option<f32>,

    /// Observer velocity as `x,y,z` in units per second.
    #[arg(long, allow_hyphen_values = true)]
    pub velocity: Option<String>,

    /// Skip the starting scene around the origin.
    #[arg(long)]
    pub no_initial_scene: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Parameter override as `name=value`; may be repeated.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(seed) = args.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.simulation.frames = frames;
        }
        if let Some(dt) = args.dt {
            if !is_positive(dt) {
                return Err(ConfigError::InvalidOverride {
                    input: dt.to_string(),
                    reason: "frame delta-time must be positive".to_string(),
                });
            }
            self.simulation.frame_dt = dt;
        }
        if let Some(ref velocity) = args.velocity {
            self.simulation.observer_velocity = parse_vec3(velocity)?;
        }
        if args.no_initial_scene {
            self.simulation.initial_scene = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        for raw in &args.overrides {
            let (name, value) = parse_assignment(raw)?;
            self.params.set(name, value);
        }
        Ok(())
    }
}

fn parse_assignment(raw: &str) -> Result<(ParameterName, f32), ConfigError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride {
            input: raw.to_string(),
            reason: "expected NAME=VALUE".to_string(),
        })?;
    let name: ParameterName = name.parse()?;
    let value = parse_float(raw, value)?;
    Ok((name, value))
}

fn parse_vec3(raw: &str) -> Result<[f32; 3], ConfigError> {
    let parts: Vec<&str> = raw.split(',').collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(ConfigError::InvalidOverride {
            input: raw.to_string(),
            reason: "expected three comma-separated components".to_string(),
        });
    };
    Ok([
        parse_float(raw, x)?,
        parse_float(raw, y)?,
        parse_float(raw, z)?,
    ])
}

fn parse_float(input: &str, text: &str) -> Result<f32, ConfigError> {
    text.trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidOverride {
            input: input.to_string(),
            reason: e.to_string(),
        })
}
