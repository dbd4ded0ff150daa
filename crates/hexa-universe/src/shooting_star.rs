//! Shooting stars: the only entities with a bounded lifetime.
//!
//! [`TransientEffectManager`] owns the live collection. Each frame it first
//! advances and retires existing stars, then makes one spawn draw.

use hexa_config::ParameterSet;

use crate::rng::UniverseRng;

/// Number of segments in a shooting star's trail.
pub const TRAIL_SEGMENTS: usize = 20;

/// Default distance from the observer at which new shooting stars appear.
pub const DEFAULT_SPAWN_DISTANCE: f32 = 500.0;

/// Weight of the toward-observer component in the flight direction.
const TOWARD_OBSERVER_WEIGHT: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    pub position: glam::Vec3,
    /// Unit flight direction.
    pub direction: glam::Vec3,
    pub speed: f32,
    /// Total lifetime in seconds.
    pub lifetime: f32,
    /// Seconds lived so far.
    pub elapsed: f32,
    pub trail_length: f32,
    /// Segment widths, tapering from head to tail with per-segment jitter.
    pub trail_widths: Vec<f32>,
    pub head_size: f32,
}

impl ShootingStar {
    /// Create a shooting star `distance` units from `observer` in a uniformly
    /// random direction, flying mostly across the observer's view.
    pub fn spawn(
        observer: glam::Vec3,
        distance: f32,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) -> Self {
        let position = observer + rng.unit_sphere_direction() * distance;

        let to_observer = (observer - position).normalize_or(glam::Vec3::NEG_Z);
        let right = to_observer.cross(glam::Vec3::Y).normalize_or_zero();
        // Straight above or below the observer the cross product vanishes.
        let right = if right == glam::Vec3::ZERO {
            to_observer.any_orthonormal_vector()
        } else {
            right
        };
        let up = right.cross(to_observer).normalize();

        let blend = to_observer * TOWARD_OBSERVER_WEIGHT
            + right * (rng.unit() * 2.0 - 1.0)
            + up * (rng.unit() * 2.0 - 1.0);
        let direction = blend.normalize_or(right);

        let speed = (rng.unit() * 200.0 + 100.0) * params.shooting_star_speed();
        let lifetime = rng.unit() * 5.0 + 5.0;
        let trail_length = rng.unit() * 10.0 + 15.0;
        // Each segment gets its own jitter on top of the head-to-tail taper.
        let trail_widths = (0..TRAIL_SEGMENTS)
            .map(|i| {
                let taper = 1.0 - 0.8 * i as f32 / TRAIL_SEGMENTS as f32;
                taper * (rng.unit() * 0.5 + 1.5)
            })
            .collect();
        let head_size = (rng.unit() * 0.1 + 0.15) * params.shooting_star_size();

        Self {
            position,
            direction,
            speed,
            lifetime,
            elapsed: 0.0,
            trail_length,
            trail_widths,
            head_size,
        }
    }

    /// Advance position and age by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
        self.elapsed += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.lifetime
    }

    /// Current opacity, see [`fade_alpha`].
    pub fn alpha(&self) -> f32 {
        fade_alpha(self.elapsed, self.lifetime)
    }
}

/// Opacity over a lifetime: linear fade-in over the first 10%, full in the
/// middle, linear fade-out over the last 20%, and zero once expired.
pub fn fade_alpha(elapsed: f32, lifetime: f32) -> f32 {
    if lifetime <= 0.0 || elapsed >= lifetime {
        return 0.0;
    }
    let fade_in = lifetime * 0.1;
    let fade_out_start = lifetime * 0.8;
    let alpha = if elapsed < fade_in {
        elapsed / fade_in
    } else if elapsed > fade_out_start {
        1.0 - (elapsed - fade_out_start) / (lifetime * 0.2)
    } else {
        1.0
    };
    alpha.clamp(0.0, 1.0)
}

/// Owns and drives the live shooting stars.
#[derive(Debug)]
pub struct TransientEffectManager {
    stars: Vec<ShootingStar>,
    spawn_distance: f32,
}

impl Default for TransientEffectManager {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_DISTANCE)
    }
}

impl TransientEffectManager {
    pub fn new(spawn_distance: f32) -> Self {
        Self {
            stars: Vec::new(),
            spawn_distance,
        }
    }

    /// Live shooting stars, oldest first.
    pub fn live(&self) -> &[ShootingStar] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn spawn_distance(&self) -> f32 {
        self.spawn_distance
    }

    /// Add an already built shooting star to the live set.
    pub fn insert(&mut self, star: ShootingStar) {
        self.stars.push(star);
    }

    /// Advance every live star and remove those whose elapsed time has
    /// reached their lifetime. Returns the number removed.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut expired = 0;
        for i in (0..self.stars.len()).rev() {
            let star = &mut self.stars[i];
            star.advance(dt);
            if star.is_expired() {
                self.stars.remove(i);
                expired += 1;
            }
        }
        if expired > 0 {
            tracing::trace!("{} shooting star(s) expired, {} live", expired, self.stars.len());
        }
        debug_assert!(self.stars.iter().all(|s| !s.is_expired()));
        expired
    }

    /// One Bernoulli draw against `shooting_star_chance`; on success spawns
    /// a shooting star around `observer`. Returns whether one was spawned.
    pub fn maybe_spawn(
        &mut self,
        observer: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) -> bool {
        if rng.unit() >= params.shooting_star_chance() {
            return false;
        }
        let star = ShootingStar::spawn(observer, self.spawn_distance, params, rng);
        tracing::trace!(
            "Spawned shooting star at ({:.1}, {:.1}, {:.1}), lifetime {:.2}s",
            star.position.x,
            star.position.y,
            star.position.z,
            star.lifetime
        );
        self.stars.push(star);
        true
    }
}
