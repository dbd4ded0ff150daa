//! Tunable generation parameters with clamped setters.
//!
//! Every generator reads its densities, rarities, and size/distance bounds from
//! a [`ParameterSet`]. Writes always go through a setter that clamps the value
//! into its legal range, so downstream code never sees a degenerate
//! configuration such as `min_size > max_size`. Deserialization runs the
//! same clamps, so a set read from disk is as consistent as one built in code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named tunable floats driving universe generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawParameterSet")]
pub struct ParameterSet {
    region_size: f32,

    sun_rarity: f32,
    sun_min_size: f32,
    sun_max_size: f32,
    sun_min_distance: f32,
    sun_max_distance: f32,

    star_cluster_density: f32,
    scattered_star_density: f32,
    star_glimmer_chance: f32,
    star_glimmer_intensity: f32,

    shooting_star_chance: f32,
    shooting_star_speed: f32,
    shooting_star_size: f32,

    nebula_rarity: f32,
    nebula_min_size: f32,
    nebula_max_size: f32,
    nebula_particle_density: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            region_size: 2000.0,
            sun_rarity: 0.0002,
            sun_min_size: 500.0,
            sun_max_size: 1000.0,
            sun_min_distance: 4000.0,
            sun_max_distance: 10000.0,
            star_cluster_density: 1.0,
            scattered_star_density: 1.0,
            star_glimmer_chance: 0.05,
            star_glimmer_intensity: 2.5,
            shooting_star_chance: 0.02,
            shooting_star_speed: 1.0,
            shooting_star_size: 1.0,
            nebula_rarity: 0.05,
            nebula_min_size: 500.0,
            nebula_max_size: 1500.0,
            nebula_particle_density: 1.0,
        }
    }
}

/// Unchecked field values as they appear on disk; missing keys take the
/// defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawParameterSet {
    region_size: f32,
    sun_rarity: f32,
    sun_min_size: f32,
    sun_max_size: f32,
    sun_min_distance: f32,
    sun_max_distance: f32,
    star_cluster_density: f32,
    scattered_star_density: f32,
    star_glimmer_chance: f32,
    star_glimmer_intensity: f32,
    shooting_star_chance: f32,
    shooting_star_speed: f32,
    shooting_star_size: f32,
    nebula_rarity: f32,
    nebula_min_size: f32,
    nebula_max_size: f32,
    nebula_particle_density: f32,
}

impl Default for RawParameterSet {
    fn default() -> Self {
        let params = ParameterSet::default();
        Self {
            region_size: params.region_size,
            sun_rarity: params.sun_rarity,
            sun_min_size: params.sun_min_size,
            sun_max_size: params.sun_max_size,
            sun_min_distance: params.sun_min_distance,
            sun_max_distance: params.sun_max_distance,
            star_cluster_density: params.star_cluster_density,
            scattered_star_density: params.scattered_star_density,
            star_glimmer_chance: params.star_glimmer_chance,
            star_glimmer_intensity: params.star_glimmer_intensity,
            shooting_star_chance: params.shooting_star_chance,
            shooting_star_speed: params.shooting_star_speed,
            shooting_star_size: params.shooting_star_size,
            nebula_rarity: params.nebula_rarity,
            nebula_min_size: params.nebula_min_size,
            nebula_max_size: params.nebula_max_size,
            nebula_particle_density: params.nebula_particle_density,
        }
    }
}

impl From<RawParameterSet> for ParameterSet {
    fn from(raw: RawParameterSet) -> Self {
        let mut params = Self {
            region_size: raw.region_size,
            sun_rarity: raw.sun_rarity,
            sun_min_size: raw.sun_min_size,
            sun_max_size: raw.sun_max_size,
            sun_min_distance: raw.sun_min_distance,
            sun_max_distance: raw.sun_max_distance,
            star_cluster_density: raw.star_cluster_density,
            scattered_star_density: raw.scattered_star_density,
            star_glimmer_chance: raw.star_glimmer_chance,
            star_glimmer_intensity: raw.star_glimmer_intensity,
            shooting_star_chance: raw.shooting_star_chance,
            shooting_star_speed: raw.shooting_star_speed,
            shooting_star_size: raw.shooting_star_size,
            nebula_rarity: raw.nebula_rarity,
            nebula_min_size: raw.nebula_min_size,
            nebula_max_size: raw.nebula_max_size,
            nebula_particle_density: raw.nebula_particle_density,
        };
        params.sanitize();
        params
    }
}

// Clamp bounds. Dependent bounds (min/max pairs) additionally clamp against
// the partner value at the time of the write.
const REGION_SIZE: (f32, f32) = (500.0, 5000.0);
const SUN_RARITY: (f32, f32) = (0.0001, 0.05);
const SUN_SIZE: (f32, f32) = (100.0, 2000.0);
const SUN_DISTANCE: (f32, f32) = (1000.0, 20000.0);
const DENSITY: (f32, f32) = (0.1, 5.0);
const GLIMMER_CHANCE: (f32, f32) = (0.0, 1.0);
const GLIMMER_INTENSITY: (f32, f32) = (1.0, 5.0);
const SHOOTING_STAR_CHANCE: (f32, f32) = (0.0, 0.1);
const SHOOTING_STAR_SPEED: (f32, f32) = (0.1, 5.0);
const SHOOTING_STAR_SIZE: (f32, f32) = (0.1, 3.0);
const NEBULA_RARITY: (f32, f32) = (0.001, 0.2);
const NEBULA_SIZE: (f32, f32) = (100.0, 3000.0);
const NEBULA_PARTICLE_DENSITY: (f32, f32) = (0.1, 3.0);

fn clamp(value: f32, (lo, hi): (f32, f32)) -> f32 {
    // NaN collapses to the lower bound rather than propagating.
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

impl ParameterSet {
    /// Edge length of one cubic region in world units.
    pub fn region_size(&self) -> f32 {
        self.region_size
    }

    /// Per-region probability of spawning a sun.
    pub fn sun_rarity(&self) -> f32 {
        self.sun_rarity
    }

    pub fn sun_min_size(&self) -> f32 {
        self.sun_min_size
    }

    pub fn sun_max_size(&self) -> f32 {
        self.sun_max_size
    }

    /// Closest a sun may be placed to its region center.
    pub fn sun_min_distance(&self) -> f32 {
        self.sun_min_distance
    }

    /// Farthest a sun may be placed from its region center.
    pub fn sun_max_distance(&self) -> f32 {
        self.sun_max_distance
    }

    /// Multiplier on the member count of every star cluster.
    pub fn star_cluster_density(&self) -> f32 {
        self.star_cluster_density
    }

    /// Multiplier on the number of scattered stars per region.
    pub fn scattered_star_density(&self) -> f32 {
        self.scattered_star_density
    }

    /// Mean per-frame ignite probability of a glimmer-eligible star.
    pub fn star_glimmer_chance(&self) -> f32 {
        self.star_glimmer_chance
    }

    /// Mean brightness multiplier while a star glimmers.
    pub fn star_glimmer_intensity(&self) -> f32 {
        self.star_glimmer_intensity
    }

    /// Per-frame probability of spawning a shooting star.
    pub fn shooting_star_chance(&self) -> f32 {
        self.shooting_star_chance
    }

    pub fn shooting_star_speed(&self) -> f32 {
        self.shooting_star_speed
    }

    pub fn shooting_star_size(&self) -> f32 {
        self.shooting_star_size
    }

    /// Per-region probability of spawning a nebula.
    pub fn nebula_rarity(&self) -> f32 {
        self.nebula_rarity
    }

    pub fn nebula_min_size(&self) -> f32 {
        self.nebula_min_size
    }

    pub fn nebula_max_size(&self) -> f32 {
        self.nebula_max_size
    }

    /// Multiplier on nebula particle counts.
    pub fn nebula_particle_density(&self) -> f32 {
        self.nebula_particle_density
    }

    pub fn set_region_size(&mut self, value: f32) {
        self.region_size = clamp(value, REGION_SIZE);
    }

    pub fn set_sun_rarity(&mut self, value: f32) {
        self.sun_rarity = clamp(value, SUN_RARITY);
    }

    pub fn set_sun_min_size(&mut self, value: f32) {
        self.sun_min_size = clamp(value, (SUN_SIZE.0, self.sun_max_size));
    }

    pub fn set_sun_max_size(&mut self, value: f32) {
        self.sun_max_size = clamp(value, (self.sun_min_size, SUN_SIZE.1));
    }

    pub fn set_sun_min_distance(&mut self, value: f32) {
        self.sun_min_distance = clamp(value, (SUN_DISTANCE.0, self.sun_max_distance));
    }

    pub fn set_sun_max_distance(&mut self, value: f32) {
        self.sun_max_distance = clamp(value, (self.sun_min_distance, SUN_DISTANCE.1));
    }

    pub fn set_star_cluster_density(&mut self, value: f32) {
        self.star_cluster_density = clamp(value, DENSITY);
    }

    pub fn set_scattered_star_density(&mut self, value: f32) {
        self.scattered_star_density = clamp(value, DENSITY);
    }

    pub fn set_star_glimmer_chance(&mut self, value: f32) {
        self.star_glimmer_chance = clamp(value, GLIMMER_CHANCE);
    }

    pub fn set_star_glimmer_intensity(&mut self, value: f32) {
        self.star_glimmer_intensity = clamp(value, GLIMMER_INTENSITY);
    }

    pub fn set_shooting_star_chance(&mut self, value: f32) {
        self.shooting_star_chance = clamp(value, SHOOTING_STAR_CHANCE);
    }

    pub fn set_shooting_star_speed(&mut self, value: f32) {
        self.shooting_star_speed = clamp(value, SHOOTING_STAR_SPEED);
    }

    pub fn set_shooting_star_size(&mut self, value: f32) {
        self.shooting_star_size = clamp(value, SHOOTING_STAR_SIZE);
    }

    pub fn set_nebula_rarity(&mut self, value: f32) {
        self.nebula_rarity = clamp(value, NEBULA_RARITY);
    }

    pub fn set_nebula_min_size(&mut self, value: f32) {
        self.nebula_min_size = clamp(value, (NEBULA_SIZE.0, self.nebula_max_size));
    }

    pub fn set_nebula_max_size(&mut self, value: f32) {
        self.nebula_max_size = clamp(value, (self.nebula_min_size, NEBULA_SIZE.1));
    }

    pub fn set_nebula_particle_density(&mut self, value: f32) {
        self.nebula_particle_density = clamp(value, NEBULA_PARTICLE_DENSITY);
    }

    /// Read a parameter by name.
    pub fn get(&self, name: ParameterName) -> f32 {
        match name {
            ParameterName::RegionSize => self.region_size,
            ParameterName::SunRarity => self.sun_rarity,
            ParameterName::SunMinSize => self.sun_min_size,
            ParameterName::SunMaxSize => self.sun_max_size,
            ParameterName::SunMinDistance => self.sun_min_distance,
            ParameterName::SunMaxDistance => self.sun_max_distance,
            ParameterName::StarClusterDensity => self.star_cluster_density,
            ParameterName::ScatteredStarDensity => self.scattered_star_density,
            ParameterName::StarGlimmerChance => self.star_glimmer_chance,
            ParameterName::StarGlimmerIntensity => self.star_glimmer_intensity,
            ParameterName::ShootingStarChance => self.shooting_star_chance,
            ParameterName::ShootingStarSpeed => self.shooting_star_speed,
            ParameterName::ShootingStarSize => self.shooting_star_size,
            ParameterName::NebulaRarity => self.nebula_rarity,
            ParameterName::NebulaMinSize => self.nebula_min_size,
            ParameterName::NebulaMaxSize => self.nebula_max_size,
            ParameterName::NebulaParticleDensity => self.nebula_particle_density,
        }
    }

    /// Write a parameter by name through its clamped setter.
    pub fn set(&mut self, name: ParameterName, value: f32) {
        match name {
            ParameterName::RegionSize => self.set_region_size(value),
            ParameterName::SunRarity => self.set_sun_rarity(value),
            ParameterName::SunMinSize => self.set_sun_min_size(value),
            ParameterName::SunMaxSize => self.set_sun_max_size(value),
            ParameterName::SunMinDistance => self.set_sun_min_distance(value),
            ParameterName::SunMaxDistance => self.set_sun_max_distance(value),
            ParameterName::StarClusterDensity => self.set_star_cluster_density(value),
            ParameterName::ScatteredStarDensity => self.set_scattered_star_density(value),
            ParameterName::StarGlimmerChance => self.set_star_glimmer_chance(value),
            ParameterName::StarGlimmerIntensity => self.set_star_glimmer_intensity(value),
            ParameterName::ShootingStarChance => self.set_shooting_star_chance(value),
            ParameterName::ShootingStarSpeed => self.set_shooting_star_speed(value),
            ParameterName::ShootingStarSize => self.set_shooting_star_size(value),
            ParameterName::NebulaRarity => self.set_nebula_rarity(value),
            ParameterName::NebulaMinSize => self.set_nebula_min_size(value),
            ParameterName::NebulaMaxSize => self.set_nebula_max_size(value),
            ParameterName::NebulaParticleDensity => self.set_nebula_particle_density(value),
        }
    }

    /// Re-apply every clamp.
    ///
    /// Runs on every deserialized set. Min/max pairs are clamped
    /// consistently: the max against its absolute bounds first, then the min
    /// against `[absolute_min, max]`.
    pub fn sanitize(&mut self) {
        self.region_size = clamp(self.region_size, REGION_SIZE);
        self.sun_rarity = clamp(self.sun_rarity, SUN_RARITY);
        (self.sun_min_size, self.sun_max_size) =
            clamp_pair(self.sun_min_size, self.sun_max_size, SUN_SIZE);
        (self.sun_min_distance, self.sun_max_distance) =
            clamp_pair(self.sun_min_distance, self.sun_max_distance, SUN_DISTANCE);
        self.star_cluster_density = clamp(self.star_cluster_density, DENSITY);
        self.scattered_star_density = clamp(self.scattered_star_density, DENSITY);
        self.star_glimmer_chance = clamp(self.star_glimmer_chance, GLIMMER_CHANCE);
        self.star_glimmer_intensity = clamp(self.star_glimmer_intensity, GLIMMER_INTENSITY);
        self.shooting_star_chance = clamp(self.shooting_star_chance, SHOOTING_STAR_CHANCE);
        self.shooting_star_speed = clamp(self.shooting_star_speed, SHOOTING_STAR_SPEED);
        self.shooting_star_size = clamp(self.shooting_star_size, SHOOTING_STAR_SIZE);
        self.nebula_rarity = clamp(self.nebula_rarity, NEBULA_RARITY);
        (self.nebula_min_size, self.nebula_max_size) =
            clamp_pair(self.nebula_min_size, self.nebula_max_size, NEBULA_SIZE);
        self.nebula_particle_density =
            clamp(self.nebula_particle_density, NEBULA_PARTICLE_DENSITY);
    }
}

fn clamp_pair(min: f32, max: f32, bounds: (f32, f32)) -> (f32, f32) {
    let max = clamp(max, bounds);
    let min = clamp(min, (bounds.0, max));
    (min, max)
}

/// Names of every entry in a [`ParameterSet`], in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterName {
    RegionSize,
    SunRarity,
    SunMinSize,
    SunMaxSize,
    SunMinDistance,
    SunMaxDistance,
    StarClusterDensity,
    ScatteredStarDensity,
    StarGlimmerChance,
    StarGlimmerIntensity,
    ShootingStarChance,
    ShootingStarSpeed,
    ShootingStarSize,
    NebulaRarity,
    NebulaMinSize,
    NebulaMaxSize,
    NebulaParticleDensity,
}

impl ParameterName {
    /// All parameter names.
    pub const ALL: [ParameterName; 17] = [
        ParameterName::RegionSize,
        ParameterName::SunRarity,
        ParameterName::SunMinSize,
        ParameterName::SunMaxSize,
        ParameterName::SunMinDistance,
        ParameterName::SunMaxDistance,
        ParameterName::StarClusterDensity,
        ParameterName::ScatteredStarDensity,
        ParameterName::StarGlimmerChance,
        ParameterName::StarGlimmerIntensity,
        ParameterName::ShootingStarChance,
        ParameterName::ShootingStarSpeed,
        ParameterName::ShootingStarSize,
        ParameterName::NebulaRarity,
        ParameterName::NebulaMinSize,
        ParameterName::NebulaMaxSize,
        ParameterName::NebulaParticleDensity,
    ];

    /// The `snake_case` key used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::RegionSize => "region_size",
            ParameterName::SunRarity => "sun_rarity",
            ParameterName::SunMinSize => "sun_min_size",
            ParameterName::SunMaxSize => "sun_max_size",
            ParameterName::SunMinDistance => "sun_min_distance",
            ParameterName::SunMaxDistance => "sun_max_distance",
            ParameterName::StarClusterDensity => "star_cluster_density",
            ParameterName::ScatteredStarDensity => "scattered_star_density",
            ParameterName::StarGlimmerChance => "star_glimmer_chance",
            ParameterName::StarGlimmerIntensity => "star_glimmer_intensity",
            ParameterName::ShootingStarChance => "shooting_star_chance",
            ParameterName::ShootingStarSpeed => "shooting_star_speed",
            ParameterName::ShootingStarSize => "shooting_star_size",
            ParameterName::NebulaRarity => "nebula_rarity",
            ParameterName::NebulaMinSize => "nebula_min_size",
            ParameterName::NebulaMaxSize => "nebula_max_size",
            ParameterName::NebulaParticleDensity => "nebula_particle_density",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ParameterName::ALL
            .into_iter()
            .find(|name| name.as_str() == key)
            .ok_or_else(|| ConfigError::UnknownParameter(key.to_string()))
    }
}
