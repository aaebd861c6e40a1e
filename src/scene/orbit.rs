//! Orbit animation
//!
//! The orbit group spins about its own Y axis. The angle only ever grows (or
//! shrinks, for negative speeds); it is consumed through trig functions, so
//! there is no need to wrap it.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    /// Accumulated spin, radians
    pub current_angle: f32,
}

impl OrbitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame
    pub fn tick(&mut self, dt: f32, rotation_speed: f32, reverse_direction: bool) {
        let direction = if reverse_direction { -1.0 } else { 1.0 };
        self.current_angle += dt * rotation_speed * direction;
    }

    /// `T(0, orbit_y, 0) * Rx(tilt) * Ry(current_angle)`
    pub fn group_matrix(&self, orbit_y: f32, tilt: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, orbit_y, 0.0))
            * Mat4::from_rotation_x(tilt)
            * Mat4::from_rotation_y(self.current_angle)
    }
}
