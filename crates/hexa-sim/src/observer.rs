//! Straight-line observer flight, standing in for camera input.

use glam::Vec3;
use hexa_config::SimulationConfig;

/// The moving reference point that drives region discovery.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub position: Vec3,
    /// World units per second.
    pub velocity: Vec3,
}

impl Observer {
    /// Start at the origin with the configured velocity.
    pub fn from_config(simulation: &SimulationConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::from_array(simulation.observer_velocity),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}
