//! Scene settings and preferences
//!
//! One flat record drives the whole scene. The UI mutates it, the scene reads
//! a sanitized copy every frame, and the share codec round-trips a whitelist
//! of its fields through the page URL.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_TEXT_CHARS;
use crate::deg_to_rad;

/// A selectable font resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub name: &'static str,
    pub path: &'static str,
}

/// Typeface catalogue offered by the control panel
pub const FONTS: &[FontChoice] = &[
    FontChoice { name: "Helvetiker Bold", path: "/fonts/helvetiker_bold.json" },
    FontChoice { name: "Helvetiker", path: "/fonts/helvetiker_regular.json" },
    FontChoice { name: "Optimer Bold", path: "/fonts/optimer_bold.json" },
    FontChoice { name: "Optimer", path: "/fonts/optimer_regular.json" },
    FontChoice { name: "Gentilis Bold", path: "/fonts/gentilis_bold.json" },
    FontChoice { name: "Gentilis", path: "/fonts/gentilis_regular.json" },
    FontChoice { name: "Droid Sans Bold", path: "/fonts/droid_sans_bold.json" },
    FontChoice { name: "Droid Sans", path: "/fonts/droid_sans_regular.json" },
    FontChoice { name: "Droid Serif Bold", path: "/fonts/droid_serif_bold.json" },
    FontChoice { name: "Droid Serif", path: "/fonts/droid_serif_regular.json" },
];

/// Display name for a font path, if it is one of ours
pub fn font_name(path: &str) -> Option<&'static str> {
    FONTS.iter().find(|f| f.path == path).map(|f| f.name)
}

/// Glow color used when the configured color does not parse
pub const FALLBACK_GLOW_RGB: [u8; 3] = [90, 231, 106];

/// Smallest letter spread the sanitizer lets through
pub const MIN_LETTER_SPACING: f32 = 0.05;

/// Inclusive slider range exposed to the control surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Control panel slider ranges
pub mod ranges {
    use super::SliderRange;

    pub const OBJECT_SCALE: SliderRange = SliderRange::new(0.1, 3.0, 0.05);
    pub const OBJECT_ROTATION: SliderRange = SliderRange::new(-180.0, 180.0, 1.0);
    /// 0° horizontal, 90° vertical
    pub const TILT: SliderRange = SliderRange::new(0.0, 360.0, 1.0);
    pub const ORBIT_Y: SliderRange = SliderRange::new(-2.0, 2.0, 0.05);
    pub const ORBIT_RADIUS: SliderRange = SliderRange::new(0.2, 4.0, 0.05);
    pub const SPEED: SliderRange = SliderRange::new(0.0, 1.2, 0.01);
    pub const LETTER_SPACING: SliderRange = SliderRange::new(0.2, 1.0, 0.05);
    pub const CHAR_SIZE: SliderRange = SliderRange::new(0.12, 0.6, 0.01);
    pub const TEXT_THICKNESS: SliderRange = SliderRange::new(0.02, 0.3, 0.01);
    pub const GLOW: SliderRange = SliderRange::new(0.0, 5.0, 0.1);
}

/// A single violated settings invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("text has {0} characters, at most 20 are allowed")]
    TextTooLong(usize),
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("letter_spacing must be in (0, 1], got {0}")]
    LetterSpacing(f32),
    #[error("emissive_intensity must not be negative, got {0}")]
    NegativeGlow(f32),
    #[error("color {0:?} is not a #rrggbb hex color")]
    Color(String),
    #[error("{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<SettingsError>),
}

/// The record driving the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    // === Text ===
    /// Each Unicode scalar becomes one orbiting character
    pub text: String,
    /// Glow color, `#rrggbb`
    pub color: String,
    /// Font resource path
    pub font: String,
    pub char_size: f32,
    pub text_thickness: f32,
    pub emissive_intensity: f32,

    // === Orbit ===
    pub orbit_radius: f32,
    /// Height of the orbit plane
    pub orbit_y: f32,
    /// Radians per second; the sign picks the direction
    pub rotation_speed: f32,
    /// Fraction of the full circle the text spans
    pub letter_spacing: f32,
    /// Orbit plane tilt about X (degrees)
    pub tilt_degrees: f32,
    /// Flips the effective orbit direction
    pub reverse_direction: bool,

    // === Object ===
    pub mesh_url: String,
    pub object_scale: f32,
    /// Degrees
    pub object_rotation_x: f32,
    pub object_rotation_y: f32,
    pub object_rotation_z: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            text: "THE HALO EFFECT".to_string(),
            color: "#5ae76a".to_string(),
            font: FONTS[0].path.to_string(),
            char_size: 0.14,
            text_thickness: 0.02,
            emissive_intensity: 3.0,

            orbit_radius: 0.4,
            orbit_y: 0.75,
            rotation_speed: 0.5,
            letter_spacing: 0.7,
            tilt_degrees: 327.0,
            reverse_direction: false,

            mesh_url: "/models/mesh.obj".to_string(),
            object_scale: 2.0,
            object_rotation_x: -106.0,
            object_rotation_y: 10.0,
            object_rotation_z: 167.0,
        }
    }
}

impl SceneSettings {
    /// Number of orbiting characters
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Rotation speed with the reverse toggle applied
    pub fn effective_speed(&self) -> f32 {
        if self.reverse_direction {
            -self.rotation_speed
        } else {
            self.rotation_speed
        }
    }

    /// Orbit tilt in radians
    pub fn tilt_radians(&self) -> f32 {
        deg_to_rad(self.tilt_degrees)
    }

    /// Object rotation (x, y, z) in radians
    pub fn object_rotation_radians(&self) -> [f32; 3] {
        [
            deg_to_rad(self.object_rotation_x),
            deg_to_rad(self.object_rotation_y),
            deg_to_rad(self.object_rotation_z),
        ]
    }

    /// Glow color as RGB bytes, falling back to the default green
    pub fn glow_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.color).unwrap_or(FALLBACK_GLOW_RGB)
    }

    /// `"r, g, b"` form used for CSS custom properties
    pub fn glow_rgb_string(&self) -> String {
        let [r, g, b] = self.glow_rgb();
        format!("{r}, {g}, {b}")
    }

    /// Linear 0-1 glow color
    pub fn glow_rgb_f32(&self) -> [f32; 3] {
        self.glow_rgb().map(|c| c as f32 / 255.0)
    }

    /// Check every invariant, collecting all violations
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors = Vec::new();

        let count = self.char_count();
        if count > MAX_TEXT_CHARS {
            errors.push(SettingsError::TextTooLong(count));
        }
        if parse_hex_color(&self.color).is_none() {
            errors.push(SettingsError::Color(self.color.clone()));
        }

        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                errors.push(SettingsError::NotFinite { field });
            }
        }

        validate_positive(&mut errors, "orbit_radius", self.orbit_radius);
        validate_positive(&mut errors, "char_size", self.char_size);
        validate_positive(&mut errors, "text_thickness", self.text_thickness);
        validate_positive(&mut errors, "object_scale", self.object_scale);

        if !(self.letter_spacing > 0.0 && self.letter_spacing <= 1.0) {
            errors.push(SettingsError::LetterSpacing(self.letter_spacing));
        }
        if self.emissive_intensity < 0.0 {
            errors.push(SettingsError::NegativeGlow(self.emissive_intensity));
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SettingsError::Multiple(errors)),
        }
    }

    /// A copy that satisfies every invariant
    ///
    /// Invalid values fall back to the defaults rather than failing; the
    /// color is left alone since `glow_rgb` already has a fallback.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut s = self.clone();

        if s.char_count() > MAX_TEXT_CHARS {
            s.text = s.text.chars().take(MAX_TEXT_CHARS).collect();
        }

        s.orbit_radius = positive_or(s.orbit_radius, defaults.orbit_radius);
        s.char_size = positive_or(s.char_size, defaults.char_size);
        s.text_thickness = positive_or(s.text_thickness, defaults.text_thickness);
        s.object_scale = positive_or(s.object_scale, defaults.object_scale);

        s.letter_spacing = if s.letter_spacing.is_finite() {
            s.letter_spacing.clamp(MIN_LETTER_SPACING, 1.0)
        } else {
            defaults.letter_spacing
        };
        s.emissive_intensity = finite_or(s.emissive_intensity, defaults.emissive_intensity).max(0.0);

        s.orbit_y = finite_or(s.orbit_y, defaults.orbit_y);
        s.rotation_speed = finite_or(s.rotation_speed, defaults.rotation_speed);
        s.tilt_degrees = finite_or(s.tilt_degrees, defaults.tilt_degrees);
        s.object_rotation_x = finite_or(s.object_rotation_x, defaults.object_rotation_x);
        s.object_rotation_y = finite_or(s.object_rotation_y, defaults.object_rotation_y);
        s.object_rotation_z = finite_or(s.object_rotation_z, defaults.object_rotation_z);

        s
    }

    fn numeric_fields(&self) -> [(&'static str, f32); 12] {
        [
            ("char_size", self.char_size),
            ("text_thickness", self.text_thickness),
            ("emissive_intensity", self.emissive_intensity),
            ("orbit_radius", self.orbit_radius),
            ("orbit_y", self.orbit_y),
            ("rotation_speed", self.rotation_speed),
            ("letter_spacing", self.letter_spacing),
            ("tilt_degrees", self.tilt_degrees),
            ("object_scale", self.object_scale),
            ("object_rotation_x", self.object_rotation_x),
            ("object_rotation_y", self.object_rotation_y),
            ("object_rotation_z", self.object_rotation_z),
        ]
    }
}

fn validate_positive(errors: &mut Vec<SettingsError>, field: &'static str, value: f32) {
    // NaN is reported separately
    if value.is_finite() && value <= 0.0 {
        errors.push(SettingsError::NotPositive { field, value });
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Parse `#rrggbb` / `rrggbb` (case-insensitive)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SceneSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.sanitized(), settings);
        assert_eq!(font_name(&settings.font), Some("Helvetiker Bold"));
    }

    #[test]
    fn test_effective_speed_respects_reverse() {
        let mut settings = SceneSettings::default();
        assert_eq!(settings.effective_speed(), 0.5);
        settings.reverse_direction = true;
        assert_eq!(settings.effective_speed(), -0.5);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#5ae76a"), Some([90, 231, 106]));
        assert_eq!(parse_hex_color("FF0080"), Some([255, 0, 128]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_glow_rgb_fallback() {
        let settings = SceneSettings {
            color: "not a color".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.glow_rgb(), FALLBACK_GLOW_RGB);
        assert_eq!(settings.glow_rgb_string(), "90, 231, 106");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let settings = SceneSettings {
            text: "X".repeat(25),
            orbit_radius: 0.0,
            letter_spacing: 1.5,
            emissive_intensity: -1.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(SettingsError::Multiple(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.contains(&SettingsError::TextTooLong(25)));
                assert!(errors.contains(&SettingsError::LetterSpacing(1.5)));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_sanitized_repairs_invariants() {
        let settings = SceneSettings {
            text: "ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_string(),
            orbit_radius: -2.0,
            letter_spacing: 0.0,
            char_size: f32::NAN,
            emissive_intensity: -3.0,
            tilt_degrees: f32::INFINITY,
            ..Default::default()
        };
        let fixed = settings.sanitized();
        assert_eq!(fixed.char_count(), MAX_TEXT_CHARS);
        assert_eq!(fixed.orbit_radius, 0.4);
        assert_eq!(fixed.letter_spacing, MIN_LETTER_SPACING);
        assert_eq!(fixed.char_size, 0.14);
        assert_eq!(fixed.emissive_intensity, 0.0);
        assert_eq!(fixed.tilt_degrees, 327.0);
        assert_eq!(fixed.validate(), Ok(()));
    }

    #[test]
    fn test_text_counts_scalars_not_bytes() {
        let settings = SceneSettings {
            text: "héllo✨".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.char_count(), 6);
    }

    #[test]
    fn test_default_values_sit_inside_slider_ranges() {
        let s = SceneSettings::default();
        assert!(ranges::OBJECT_SCALE.contains(s.object_scale));
        assert!(ranges::OBJECT_ROTATION.contains(s.object_rotation_x));
        assert!(ranges::TILT.contains(s.tilt_degrees));
        assert!(ranges::ORBIT_Y.contains(s.orbit_y));
        assert!(ranges::ORBIT_RADIUS.contains(s.orbit_radius));
        assert!(ranges::SPEED.contains(s.rotation_speed));
        assert!(ranges::LETTER_SPACING.contains(s.letter_spacing));
        assert!(ranges::CHAR_SIZE.contains(s.char_size));
        assert!(ranges::TEXT_THICKNESS.contains(s.text_thickness));
        assert!(ranges::GLOW.contains(s.emissive_intensity));
    }
}
