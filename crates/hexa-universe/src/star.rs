//! Stars and the per-star glimmer state machine.
//!
//! Clustered stars are static. Scattered stars carry a [`Glimmer`] that flips
//! between [`GlimmerState::Steady`] and [`GlimmerState::Glimmering`] through
//! independent Bernoulli draws each frame, so flash length is memoryless
//! rather than timed.

use hexa_config::ParameterSet;

use crate::rng::UniverseRng;

/// Fraction of scattered stars that can glimmer at all.
pub const GLIMMER_ELIGIBLE_FRACTION: f32 = 0.9;

/// Per-frame probability that a glimmering star settles back to steady.
pub const GLIMMER_STOP_CHANCE: f32 = 0.15;

/// Ignite probability band at the default glimmer chance: 3%..8% per frame.
const IGNITE_BASE: f32 = 0.03;
const IGNITE_SPREAD: f32 = 0.05;
const DEFAULT_GLIMMER_CHANCE: f32 = 0.05;

/// Intensity band at the default glimmer intensity: 1.8×..3.0× brightness.
const INTENSITY_BASE: f32 = 1.8;
const INTENSITY_SPREAD: f32 = 1.2;
const DEFAULT_GLIMMER_INTENSITY: f32 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlimmerState {
    Steady,
    Glimmering,
}

/// Flicker behavior of a single scattered star.
#[derive(Clone, Debug, PartialEq)]
pub struct Glimmer {
    /// Ineligible stars never leave [`GlimmerState::Steady`].
    pub eligible: bool,
    /// Per-frame probability of `Steady -> Glimmering`.
    pub ignite_chance: f32,
    /// Brightness multiplier while glimmering.
    pub intensity: f32,
    pub state: GlimmerState,
}

impl Glimmer {
    /// Draw glimmer parameters for a freshly created scattered star.
    ///
    /// Consumes exactly three draws (eligibility, chance, intensity) whether
    /// or not the star turns out eligible. The configured glimmer chance and
    /// intensity scale the bands, which reproduce 3–8% and 1.8–3.0× at their
    /// defaults.
    pub fn roll(rng: &mut UniverseRng, params: &ParameterSet) -> Self {
        let eligible = rng.unit() < GLIMMER_ELIGIBLE_FRACTION;
        let chance_scale = params.star_glimmer_chance() / DEFAULT_GLIMMER_CHANCE;
        let ignite_chance = ((rng.unit() * IGNITE_SPREAD + IGNITE_BASE) * chance_scale).min(1.0);
        let intensity_scale = params.star_glimmer_intensity() / DEFAULT_GLIMMER_INTENSITY;
        let intensity = (rng.unit() * INTENSITY_SPREAD + INTENSITY_BASE) * intensity_scale;
        Self {
            eligible,
            ignite_chance,
            intensity,
            state: GlimmerState::Steady,
        }
    }

    /// Advance one frame. Eligible stars consume exactly one draw; ineligible
    /// stars consume none. Returns `true` if the state changed.
    pub fn step(&mut self, rng: &mut UniverseRng) -> bool {
        if !self.eligible {
            return false;
        }
        let next = match self.state {
            GlimmerState::Steady if rng.unit() < self.ignite_chance => GlimmerState::Glimmering,
            GlimmerState::Glimmering if rng.unit() < GLIMMER_STOP_CHANCE => GlimmerState::Steady,
            current => current,
        };
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn is_glimmering(&self) -> bool {
        self.state == GlimmerState::Glimmering
    }
}

/// Behavior variant of a star.
#[derive(Clone, Debug, PartialEq)]
pub enum StarKind {
    /// Member of a star cluster. Never glimmers.
    Clustered,
    /// Free-floating star scattered through a region.
    Scattered(Glimmer),
}

/// A point star. Created during generation and never destroyed.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: glam::Vec3,
    pub size: f32,
    /// Brightness when not glimmering.
    pub brightness: f32,
    pub kind: StarKind,
}

impl Star {
    pub fn clustered(position: glam::Vec3, size: f32, brightness: f32) -> Self {
        Self {
            position,
            size,
            brightness,
            kind: StarKind::Clustered,
        }
    }

    pub fn scattered(position: glam::Vec3, size: f32, brightness: f32, glimmer: Glimmer) -> Self {
        Self {
            position,
            size,
            brightness,
            kind: StarKind::Scattered(glimmer),
        }
    }

    pub fn is_scattered(&self) -> bool {
        matches!(self.kind, StarKind::Scattered(_))
    }

    pub fn is_glimmering(&self) -> bool {
        matches!(&self.kind, StarKind::Scattered(g) if g.is_glimmering())
    }

    /// Brightness the renderer should draw this frame.
    pub fn displayed_brightness(&self) -> f32 {
        match &self.kind {
            StarKind::Scattered(g) if g.is_glimmering() => self.brightness * g.intensity,
            _ => self.brightness,
        }
    }

    /// Advance the glimmer state machine one frame. No-op for clustered stars.
    pub fn update(&mut self, rng: &mut UniverseRng) -> bool {
        match &mut self.kind {
            StarKind::Scattered(glimmer) => glimmer.step(rng),
            StarKind::Clustered => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glimmer(eligible: bool, ignite_chance: f32) -> Glimmer {
        Glimmer {
            eligible,
            ignite_chance,
            intensity: 2.0,
            state: GlimmerState::Steady,
        }
    }

    #[test]
    fn test_roll_bands_at_default_params() {
        let params = ParameterSet::default();
        let mut rng = UniverseRng::seeded(3);
        let mut eligible = 0;
        for _ in 0..10_000 {
            let g = Glimmer::roll(&mut rng, &params);
            assert!((0.03..=0.08).contains(&g.ignite_chance), "{}", g.ignite_chance);
            assert!((1.8..=3.0).contains(&g.intensity), "{}", g.intensity);
            assert_eq!(g.state, GlimmerState::Steady);
            eligible += g.eligible as u32;
        }
        assert!((8700..9300).contains(&eligible), "eligible = {eligible}");
    }

    #[test]
    fn test_clustered_star_never_glimmers() {
        let mut star = Star::clustered(glam::Vec3::ZERO, 0.2, 1.0);
        let mut rng = UniverseRng::seeded(1);
        for _ in 0..10_000 {
            assert!(!star.update(&mut rng));
            assert!(!star.is_glimmering());
            assert_eq!(star.displayed_brightness(), 1.0);
        }
    }

    #[test]
    fn test_ineligible_scattered_star_never_glimmers() {
        let mut star = Star::scattered(glam::Vec3::ZERO, 0.1, 0.9, glimmer(false, 1.0));
        let mut rng = UniverseRng::seeded(1);
        for _ in 0..10_000 {
            star.update(&mut rng);
            assert!(!star.is_glimmering());
        }
    }

    #[test]
    fn test_ineligible_star_consumes_no_draws() {
        let mut star = Star::scattered(glam::Vec3::ZERO, 0.1, 0.9, glimmer(false, 1.0));
        let mut rng = UniverseRng::seeded(11);
        let mut reference = UniverseRng::seeded(11);
        star.update(&mut rng);
        assert_eq!(rng.unit(), reference.unit());
    }

    #[test]
    fn test_certain_ignite_sets_boosted_brightness() {
        let mut star = Star::scattered(glam::Vec3::ZERO, 0.1, 0.9, glimmer(true, 1.0));
        let mut rng = UniverseRng::seeded(1);
        assert!(star.update(&mut rng));
        assert!(star.is_glimmering());
        assert!((star.displayed_brightness() - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_glimmer_reverts_to_base_brightness() {
        let mut star = Star::scattered(glam::Vec3::ZERO, 0.1, 0.9, glimmer(true, 1.0));
        let mut rng = UniverseRng::seeded(2);
        star.update(&mut rng);
        // Stop chance is 15% per frame; 500 frames without stopping is ~1e-35.
        let mut reverted = false;
        for _ in 0..500 {
            if star.update(&mut rng) {
                reverted = true;
                break;
            }
        }
        assert!(reverted);
        assert!(!star.is_glimmering());
        assert_eq!(star.displayed_brightness(), 0.9);
    }

    #[test]
    fn test_mean_glimmer_duration_is_memoryless() {
        // Geometric with p = 0.15 has mean 1/p ≈ 6.67 frames.
        let mut g = glimmer(true, 1.0);
        let mut rng = UniverseRng::seeded(77);
        let mut flashes = 0u32;
        let mut glimmer_frames = 0u32;
        for _ in 0..200_000 {
            let was_glimmering = g.is_glimmering();
            g.step(&mut rng);
            if g.is_glimmering() {
                glimmer_frames += 1;
                if !was_glimmering {
                    flashes += 1;
                }
            }
        }
        let mean = glimmer_frames as f32 / flashes as f32;
        assert!((6.0..7.4).contains(&mean), "mean glimmer duration = {mean}");
    }

    #[test]
    fn test_glimmer_params_scale_with_configuration() {
        let mut params = ParameterSet::default();
        params.set_star_glimmer_chance(0.0);
        params.set_star_glimmer_intensity(5.0);
        let mut rng = UniverseRng::seeded(4);
        for _ in 0..100 {
            let g = Glimmer::roll(&mut rng, &params);
            assert_eq!(g.ignite_chance, 0.0);
            assert!((3.6..=6.0).contains(&g.intensity));
        }
    }
}
