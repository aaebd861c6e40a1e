//! Colored accent lights around the orbit

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::{
    ACCENT_LIGHT_DECAY, ACCENT_LIGHT_RANGE_FACTOR, ACCENT_LIGHT_TOTAL_INTENSITY, MAX_ACCENT_LIGHTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccentLight {
    pub position: Vec3,
    pub intensity: f32,
    /// Distance at which the light has fully fallen off
    pub distance: f32,
    pub decay: f32,
}

/// Up to four lights spread evenly around the orbit circle
///
/// Intensity is split between them so the total stays the same whatever
/// the text length. No text, no lights.
pub fn accent_lights(char_count: usize, orbit_radius: f32) -> Vec<AccentLight> {
    let count = char_count.min(MAX_ACCENT_LIGHTS);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            AccentLight {
                position: Vec3::new(angle.cos() * orbit_radius, 0.0, angle.sin() * orbit_radius),
                intensity: ACCENT_LIGHT_TOTAL_INTENSITY / count as f32,
                distance: orbit_radius * ACCENT_LIGHT_RANGE_FACTOR,
                decay: ACCENT_LIGHT_DECAY,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_count_is_capped() {
        assert!(accent_lights(0, 1.0).is_empty());
        assert_eq!(accent_lights(1, 1.0).len(), 1);
        assert_eq!(accent_lights(3, 1.0).len(), 3);
        assert_eq!(accent_lights(15, 1.0).len(), 4);
    }

    #[test]
    fn test_total_intensity_is_constant() {
        for count in 1..=20 {
            let total: f32 = accent_lights(count, 0.4).iter().map(|l| l.intensity).sum();
            assert!((total - 0.8).abs() < 1e-6, "{count} chars -> {total}");
        }
    }

    #[test]
    fn test_lights_sit_on_the_orbit() {
        let lights = accent_lights(4, 2.0);
        for light in &lights {
            assert!((light.position.length() - 2.0).abs() < 1e-5);
            assert_eq!(light.position.y, 0.0);
            assert_eq!(light.distance, 5.0);
            assert_eq!(light.decay, 2.0);
        }
        assert!((lights[1].position - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }
}
