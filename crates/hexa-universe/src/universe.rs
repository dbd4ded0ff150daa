//! The world object: owns every generated collection and runs the frame tick.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use hexa_config::ParameterSet;

use crate::generator::{CelestialBodies, CelestialGenerator};
use crate::nebula::Nebula;
use crate::region::RegionManager;
use crate::rng::UniverseRng;
use crate::shooting_star::{DEFAULT_SPAWN_DISTANCE, ShootingStar, TransientEffectManager};
use crate::star::Star;
use crate::sun::Sun;

/// Initial scene layout.
const INITIAL_CLUSTERS: usize = 5;
const INITIAL_SCATTERED_STARS: usize = 200;
const INITIAL_SCATTER_RADIUS: f32 = 200.0;

/// Snapshot of collection sizes, for logging and summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniverseStats {
    pub frame: u64,
    pub regions: usize,
    pub clustered_stars: usize,
    pub scattered_stars: usize,
    pub glimmering_stars: usize,
    pub clusters: usize,
    pub rejected_clusters: u64,
    pub suns: usize,
    pub nebulae: usize,
    pub shooting_stars: usize,
}

impl UniverseStats {
    pub fn total_stars(&self) -> usize {
        self.clustered_stars + self.scattered_stars
    }
}

/// Observer-centered procedural universe.
///
/// Every frame runs, in order: region discovery around the observer, the
/// shooting-star update and spawn, one glimmer step per star, and the
/// rotation advance of suns and nebulae.
///
/// The region edge is read from the parameters once, at construction. Later
/// changes through [`Universe::params_mut`] affect generation and effects
/// but not the region grid.
#[derive(Debug)]
pub struct Universe {
    params: ParameterSet,
    rng: UniverseRng,
    regions: RegionManager,
    generator: CelestialGenerator,
    bodies: CelestialBodies,
    effects: TransientEffectManager,
    frame: u64,
}

impl Universe {
    pub fn new(params: ParameterSet, rng: UniverseRng) -> Self {
        let region_size = params.region_size();
        Self {
            params,
            rng,
            regions: RegionManager::new(region_size),
            generator: CelestialGenerator::new(region_size),
            bodies: CelestialBodies::new(),
            effects: TransientEffectManager::new(DEFAULT_SPAWN_DISTANCE),
            frame: 0,
        }
    }

    /// Use a different spawn distance for shooting stars.
    pub fn with_shooting_star_distance(mut self, distance: f32) -> Self {
        self.effects = TransientEffectManager::new(distance);
        self
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn regions(&self) -> &RegionManager {
        &self.regions
    }

    pub fn bodies(&self) -> &CelestialBodies {
        &self.bodies
    }

    pub fn stars(&self) -> &[Star] {
        &self.bodies.stars
    }

    pub fn suns(&self) -> &[Sun] {
        &self.bodies.suns
    }

    pub fn nebulae(&self) -> &[Nebula] {
        &self.bodies.nebulae
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        self.effects.live()
    }

    /// Populate every unvisited region around `observer`. Returns the number
    /// of regions populated.
    pub fn ensure_generated(&mut self, observer: glam::Vec3) -> usize {
        let Self {
            params,
            rng,
            regions,
            generator,
            bodies,
            ..
        } = self;
        regions.ensure_generated(observer, |_, center| {
            generator.populate(bodies, center, params, rng);
        })
    }

    /// Advance the world by one frame of `dt` seconds with the observer at
    /// `observer`. Returns the number of regions populated this frame.
    pub fn tick(&mut self, observer: glam::Vec3, dt: f32) -> usize {
        let discovered = self.ensure_generated(observer);

        self.effects.update(dt);
        self.effects.maybe_spawn(observer, &self.params, &mut self.rng);

        for star in &mut self.bodies.stars {
            star.update(&mut self.rng);
        }
        for sun in &mut self.bodies.suns {
            sun.update(dt);
        }
        for nebula in &mut self.bodies.nebulae {
            nebula.update(dt);
        }

        self.frame += 1;
        discovered
    }

    /// Seed the neighborhood of the origin so the first frame is not empty:
    /// one distant sun, five dense clusters near the origin, and a shell of
    /// scattered stars around it.
    ///
    /// Not part of [`Universe::new`]; callers opt in.
    pub fn populate_initial_scene(&mut self) {
        let Self {
            params,
            rng,
            generator,
            bodies,
            ..
        } = self;

        let distance = rng.range_f32(params.sun_min_distance(), params.sun_max_distance());
        let azimuth = rng.unit() * TAU;
        let elevation = rng.unit() * PI - FRAC_PI_2;
        let position = glam::Vec3::new(
            distance * elevation.cos() * azimuth.cos(),
            distance * elevation.cos() * azimuth.sin(),
            distance * elevation.sin(),
        );
        generator.place_sun(bodies, position, params, rng);

        for _ in 0..INITIAL_CLUSTERS {
            let direction = rng.unit_sphere_direction();
            let center = direction * (rng.unit() * 100.0 + 50.0);
            let count = rng.range_i32(100, 300) as usize;
            let radius = rng.unit() * 30.0 + 20.0;
            generator.spawn_cluster(bodies, center, count, radius, rng);
        }

        generator.scatter_stars(
            bodies,
            glam::Vec3::ZERO,
            INITIAL_SCATTERED_STARS,
            INITIAL_SCATTER_RADIUS,
            params,
            rng,
        );

        tracing::info!(
            "Initial scene: {} stars, {} sun(s)",
            bodies.stars.len(),
            bodies.suns.len()
        );
    }

    pub fn stats(&self) -> UniverseStats {
        let mut stats = UniverseStats {
            frame: self.frame,
            regions: self.regions.index().len(),
            clusters: self.bodies.clusters.len(),
            rejected_clusters: self.bodies.rejected_clusters,
            suns: self.bodies.suns.len(),
            nebulae: self.bodies.nebulae.len(),
            shooting_stars: self.effects.len(),
            ..UniverseStats::default()
        };
        for star in &self.bodies.stars {
            if star.is_scattered() {
                stats.scattered_stars += 1;
                stats.glimmering_stars += star.is_glimmering() as usize;
            } else {
                stats.clustered_stars += 1;
            }
        }
        stats
    }
}
