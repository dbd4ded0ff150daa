//! Rare nebulae: gas clouds made of particle collections around a center.
//!
//! Particles are generated once and then only the rotation phase changes.
//! Particle layout is cylindrical and stretched along Y so clouds read as
//! tall columns rather than spheres.

use std::f32::consts::TAU;

use crate::rng::UniverseRng;
use crate::sun::advance_phase;

/// Broad classification of a nebula. Renderers map this to a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NebulaKind {
    Emission,
    Reflection,
    Planetary,
    Dark,
}

impl NebulaKind {
    pub const ALL: [NebulaKind; 4] = [
        NebulaKind::Emission,
        NebulaKind::Reflection,
        NebulaKind::Planetary,
        NebulaKind::Dark,
    ];
}

/// One particle of a nebula, positioned relative to the nebula center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaParticle {
    pub offset: glam::Vec3,
    pub size: f32,
    pub opacity: f32,
}

/// Shape constants of one particle layer.
struct Layer {
    /// Layer radius relative to the nebula radius.
    radius_scale: f32,
    /// Exponent applied to the distance draw; higher packs the core tighter.
    falloff: f32,
    horizontal: f32,
    vertical_stretch: f32,
    jitter: f32,
    size_base: f32,
    size_spread: f32,
    size_falloff: f32,
    opacity_base: f32,
    opacity_spread: f32,
    opacity_falloff: f32,
}

const CORE: Layer = Layer {
    radius_scale: 1.0,
    falloff: 1.5,
    horizontal: 0.7,
    vertical_stretch: 2.5,
    jitter: 0.2,
    size_base: 10.0,
    size_spread: 15.0,
    size_falloff: 0.7,
    opacity_base: 0.3,
    opacity_spread: 0.5,
    opacity_falloff: 0.5,
};

const CLOUD: Layer = Layer {
    radius_scale: 2.0,
    falloff: 1.2,
    horizontal: 0.9,
    vertical_stretch: 3.0,
    jitter: 0.3,
    size_base: 25.0,
    size_spread: 40.0,
    size_falloff: 0.5,
    opacity_base: 0.15,
    opacity_spread: 0.3,
    opacity_falloff: 0.6,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Nebula {
    pub center: glam::Vec3,
    pub radius: f32,
    pub kind: NebulaKind,
    /// Dense core particles.
    pub particles: Vec<NebulaParticle>,
    /// Diffuse background cloud, twice as many particles over twice the radius.
    pub background: Vec<NebulaParticle>,
    /// Rotation phase about the Y axis, kept in `[0, 2π)`.
    pub rotation: f32,
    /// Signed rotation speed in radians per second.
    pub rotation_speed: f32,
}

impl Nebula {
    /// Generate a nebula with `particle_count` core particles and twice as
    /// many background particles.
    pub fn generate(
        center: glam::Vec3,
        radius: f32,
        particle_count: usize,
        kind: NebulaKind,
        rng: &mut UniverseRng,
    ) -> Self {
        let rotation_speed = (rng.unit() * 0.01 + 0.005) * rng.sign();
        let particles = generate_layer(&CORE, radius, particle_count, rng);
        let background = generate_layer(&CLOUD, radius, particle_count * 2, rng);
        Self {
            center,
            radius,
            kind,
            particles,
            background,
            rotation: 0.0,
            rotation_speed,
        }
    }

    /// Advance the rotation phase by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.rotation = advance_phase(self.rotation, self.rotation_speed, dt);
    }

    /// Total number of particles across both layers.
    pub fn particle_count(&self) -> usize {
        self.particles.len() + self.background.len()
    }
}

fn generate_layer(
    layer: &Layer,
    radius: f32,
    count: usize,
    rng: &mut UniverseRng,
) -> Vec<NebulaParticle> {
    let layer_radius = radius * layer.radius_scale;
    (0..count)
        .map(|_| {
            let theta = rng.unit() * TAU;
            let f = rng.unit().powf(layer.falloff);
            let r = layer_radius * f * layer.horizontal;
            let y = (rng.unit() * 2.0 - 1.0) * layer_radius * layer.vertical_stretch * f;
            let x = r * theta.cos();
            let z = r * theta.sin();
            let jitter = layer_radius * layer.jitter;
            let offset = glam::Vec3::new(
                x + (rng.unit() - 0.5) * jitter,
                y + (rng.unit() - 0.5) * jitter,
                z + (rng.unit() - 0.5) * jitter,
            );
            let size = (1.0 - f * layer.size_falloff)
                * (rng.unit() * layer.size_spread + layer.size_base);
            let opacity = (1.0 - f * layer.opacity_falloff)
                * (rng.unit() * layer.opacity_spread + layer.opacity_base);
            NebulaParticle {
                offset,
                size,
                opacity,
            }
        })
        .collect()
}
