//! The single pseudorandom stream shared by every generator.
//!
//! All generation call sites draw from one [`UniverseRng`] threaded through
//! explicitly, so a run is fully reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable sequential source of uniform floats and integers.
#[derive(Clone, Debug)]
pub struct UniverseRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl UniverseRng {
    /// Create a deterministic stream from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a stream from a freshly drawn seed. The seed is kept so the run
    /// can be replayed with [`UniverseRng::seeded`].
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// The seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// Uniform float in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform integer in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    /// `1.0` or `-1.0` with equal probability.
    pub fn sign(&mut self) -> f32 {
        if self.inner.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.random_range(0..len)
    }

    /// Direction on the unit sphere: θ = U·2π around the axis, φ = acos(2U−1)
    /// from the pole.
    pub fn unit_sphere_direction(&mut self) -> glam::Vec3 {
        let theta = self.unit() * std::f32::consts::TAU;
        let phi = (2.0 * self.unit() - 1.0).acos();
        glam::Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
    }

    /// Point inside a sphere of `radius` around `center` with a uniform
    /// direction and a radius drawn linearly in `[0, radius)`.
    ///
    /// The radius is not cube-rooted, so points bunch toward the center.
    pub fn point_in_sphere(&mut self, center: glam::Vec3, radius: f32) -> (glam::Vec3, f32) {
        let direction = self.unit_sphere_direction();
        let r = self.unit() * radius;
        (center + direction * r, r)
    }
}
