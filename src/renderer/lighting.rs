//! Fixed key lighting around the object

use glam::Vec3;
use serde::{Deserialize, Serialize};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// A light the backend places once; accent lights are added per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyLight {
    Ambient {
        intensity: f32,
    },
    /// Shines from `position` toward the origin
    Directional {
        position: Vec3,
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        position: Vec3,
        intensity: f32,
        /// Zero intensity beyond this range
        distance: f32,
    },
}

impl KeyLight {
    pub fn intensity(&self) -> f32 {
        match *self {
            KeyLight::Ambient { intensity }
            | KeyLight::Directional { intensity, .. }
            | KeyLight::Point { intensity, .. } => intensity,
        }
    }
}

/// Soft fill, a white key from the front right, a warm rim from behind
/// and a point light above the back of the object
pub const KEY_LIGHTS: [KeyLight; 4] = [
    KeyLight::Ambient { intensity: 0.3 },
    KeyLight::Directional {
        position: Vec3::new(5.0, 5.0, 5.0),
        color: WHITE,
        intensity: 1.5,
    },
    KeyLight::Directional {
        position: Vec3::new(-3.0, 2.0, -3.0),
        // #ffffee
        color: [1.0, 1.0, 238.0 / 255.0],
        intensity: 0.5,
    },
    KeyLight::Point {
        position: Vec3::new(0.0, 3.0, -3.0),
        intensity: 0.8,
        distance: 10.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_light_rig() {
        assert_eq!(KEY_LIGHTS[0], KeyLight::Ambient { intensity: 0.3 });
        let ambient = KEY_LIGHTS
            .iter()
            .filter(|l| matches!(l, KeyLight::Ambient { .. }))
            .count();
        assert_eq!(ambient, 1);

        let total: f32 = KEY_LIGHTS.iter().map(KeyLight::intensity).sum();
        assert!((total - 3.1).abs() < 1e-5);

        match KEY_LIGHTS[3] {
            KeyLight::Point { position, distance, .. } => {
                assert_eq!(position, Vec3::new(0.0, 3.0, -3.0));
                assert_eq!(distance, 10.0);
            }
            other => panic!("expected a point light, got {other:?}"),
        }
    }

    #[test]
    fn test_rim_light_is_warm() {
        let KeyLight::Directional { position, color, .. } = KEY_LIGHTS[2] else {
            panic!("expected a directional light");
        };
        assert!(position.z < 0.0);
        assert!(color[2] < color[0]);
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_string(&KEY_LIGHTS[3]).unwrap();
        assert!(json.contains(r#""kind":"point""#), "{json}");
        assert!(json.contains(r#""distance":10.0"#), "{json}");
    }
}
