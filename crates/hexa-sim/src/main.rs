//! HexaNebula headless simulator.
//!
//! Flies an observer through the procedural universe for a fixed number of
//! frames and logs what gets generated along the way. Rendering, audio and
//! input live outside this binary; it drives the same per-frame tick a
//! windowed front end would.
//!
//! Run with: `cargo run -p hexa-sim -- --seed 42 --frames 600`

mod observer;

use clap::Parser;
use hexa_config::{CliArgs, Config, default_config_dir};
use hexa_universe::{Universe, UniverseRng, UniverseStats};
use tracing::{error, info};

use observer::Observer;

/// Frames between periodic progress reports.
const REPORT_INTERVAL: u32 = 600;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let loaded = match config_dir.as_deref() {
        Some(dir) => Config::load_or_create(dir),
        None => Ok(Config::default()),
    };
    // Logging needs the config's level, so load errors are reported after init.
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let override_error = config.apply_cli_overrides(&args).err();

    let log_dir = config_dir.as_deref().map(|dir| dir.join("logs"));
    hexa_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Some(e) = load_error {
        error!("Failed to load config, using defaults: {}", e);
    }
    if let Some(e) = override_error {
        error!("Invalid command-line override: {}", e);
        std::process::exit(2);
    }

    let rng = match config.simulation.seed {
        Some(seed) => UniverseRng::seeded(seed),
        None => UniverseRng::from_entropy(),
    };
    info!("HexaNebula simulator, seed {}", rng.seed());

    let simulation = &config.simulation;
    info!(
        "Frames: {} | dt: {:.4}s | velocity: ({:.1}, {:.1}, {:.1})",
        simulation.frames,
        simulation.frame_dt,
        simulation.observer_velocity[0],
        simulation.observer_velocity[1],
        simulation.observer_velocity[2],
    );

    let mut universe = Universe::new(config.params.clone(), rng)
        .with_shooting_star_distance(simulation.shooting_star_distance);
    if simulation.initial_scene {
        universe.populate_initial_scene();
    }

    let mut observer = Observer::from_config(simulation);
    for frame in 1..=simulation.frames {
        universe.tick(observer.position, simulation.frame_dt);
        observer.advance(simulation.frame_dt);

        if frame % REPORT_INTERVAL == 0 {
            report(&universe.stats(), observer.position);
        }
    }

    let stats = universe.stats();
    info!("Simulation finished after {} frames", stats.frame);
    report(&stats, observer.position);
}

fn report(stats: &UniverseStats, position: glam::Vec3) {
    info!(
        "Frame {} at ({:.0}, {:.0}, {:.0}): {} regions, {} stars ({} clustered, {} scattered, {} glimmering)",
        stats.frame,
        position.x,
        position.y,
        position.z,
        stats.regions,
        stats.total_stars(),
        stats.clustered_stars,
        stats.scattered_stars,
        stats.glimmering_stars,
    );
    info!(
        "  clusters: {} placed, {} rejected | suns: {} | nebulae: {} | shooting stars: {}",
        stats.clusters, stats.rejected_clusters, stats.suns, stats.nebulae, stats.shooting_stars,
    );
}
