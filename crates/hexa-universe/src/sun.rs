//! Rare massive suns.
//!
//! At most one sun is placed per region. After creation only the rotation
//! phase changes.

use std::f32::consts::TAU;

use crate::rng::UniverseRng;

/// A large star placed far from its region center.
#[derive(Clone, Debug, PartialEq)]
pub struct Sun {
    pub position: glam::Vec3,
    /// Radius in world units.
    pub size: f32,
    /// Rotation phase in radians, kept in `[0, 2π)`.
    pub rotation: f32,
    /// Signed rotation speed in radians per second.
    pub rotation_speed: f32,
}

impl Sun {
    /// Create a sun with a random spin: magnitude in `[0.001, 0.006)` rad/s,
    /// either direction.
    pub fn new(position: glam::Vec3, size: f32, rng: &mut UniverseRng) -> Self {
        let rotation_speed = (rng.unit() * 0.005 + 0.001) * rng.sign();
        Self {
            position,
            size,
            rotation: 0.0,
            rotation_speed,
        }
    }

    /// Advance the rotation phase by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.rotation = advance_phase(self.rotation, self.rotation_speed, dt);
    }
}

/// Advance an angular phase and wrap it into `[0, 2π)`.
pub(crate) fn advance_phase(phase: f32, speed: f32, dt: f32) -> f32 {
    let next = (phase + speed * dt).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if next >= TAU { 0.0 } else { next }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_speed_band() {
        let mut rng = UniverseRng::seeded(8);
        let mut negative = 0;
        for _ in 0..1000 {
            let sun = Sun::new(glam::Vec3::ZERO, 600.0, &mut rng);
            let speed = sun.rotation_speed.abs();
            assert!((0.001..=0.006).contains(&speed), "speed = {speed}");
            negative += (sun.rotation_speed < 0.0) as u32;
        }
        assert!((400..600).contains(&negative), "negative = {negative}");
    }

    #[test]
    fn test_rotation_wraps_into_full_turn() {
        let mut sun = Sun {
            position: glam::Vec3::ZERO,
            size: 500.0,
            rotation: 6.2,
            rotation_speed: 1.0,
        };
        sun.update(0.5);
        assert!((sun.rotation - (6.7 - TAU)).abs() < 1e-5);

        sun.rotation_speed = -1.0;
        sun.update(1.0);
        assert!((0.0..TAU).contains(&sun.rotation));
    }

    #[test]
    fn test_phase_stays_in_range_over_many_frames() {
        let mut phase = 0.0;
        for i in 0..100_000 {
            let speed = if i % 3 == 0 { -0.006 } else { 0.004 };
            phase = advance_phase(phase, speed, 0.016);
            assert!((0.0..TAU).contains(&phase));
        }
    }
}
