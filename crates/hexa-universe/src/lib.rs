//! Observer-centered procedural universe: lazy region generation, celestial
//! body placement, glimmering stars, and shooting-star lifecycles.
//!
//! [`Universe`] owns every generated collection and advances them once per
//! frame. Rendering, audio, and input are external; they read the collections
//! and supply the observer position and frame delta-time.

pub mod generator;
pub mod nebula;
pub mod region;
pub mod rng;
pub mod shooting_star;
pub mod star;
pub mod sun;
pub mod universe;


pub use generator::{
    CelestialBodies, CelestialGenerator, FAR_CLUSTER_THRESHOLD, MIN_CLUSTER_DISTANCE, StarCluster,
};
pub use nebula::{Nebula, NebulaKind, NebulaParticle};
pub use region::{RegionIndex, RegionKey, RegionManager, region_center, region_key_of};
pub use rng::UniverseRng;
pub use shooting_star::{DEFAULT_SPAWN_DISTANCE, ShootingStar, TransientEffectManager, fade_alpha};
pub use star::{Glimmer, GlimmerState, Star, StarKind};
pub use sun::Sun;
pub use universe::{Universe, UniverseStats};
