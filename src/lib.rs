//! Halo Orbit - neon text orbiting a normalized mesh
//!
//! Core modules:
//! - `scene`: Character layout, mesh normalization, orbit/entrance animation
//! - `settings`: The scene settings record, defaults and validation
//! - `share`: Shareable-link codec for settings
//! - `renderer`: Hand-off types for the external render backend
//! - `platform`: Browser/native platform abstraction

pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod share;

pub use scene::{FrameView, Scene};
pub use settings::{FONTS, SceneSettings};
pub use share::{decode, encode};

use glam::Vec3;

/// Scene tuning constants
pub mod consts {
    /// Maximum number of orbiting characters accepted from the text field
    pub const MAX_TEXT_CHARS: usize = 20;
    /// Text edits reach the layout once typing pauses this long (seconds)
    pub const TEXT_DEBOUNCE_SECS: f32 = 0.2;

    /// Entrance wrapper starts below its resting height...
    pub const ENTRANCE_START_Y: f32 = -1.5;
    /// ...and settles here
    pub const ENTRANCE_TARGET_Y: f32 = 0.5;
    /// Fraction of the remaining distance covered per frame
    pub const ENTRANCE_SMOOTHING: f32 = 0.04;

    /// Accent lights never exceed this count, regardless of text length
    pub const MAX_ACCENT_LIGHTS: usize = 4;
    /// Combined intensity shared by all accent lights
    pub const ACCENT_LIGHT_TOTAL_INTENSITY: f32 = 0.8;
    /// Light falloff distance as a multiple of the orbit radius
    pub const ACCENT_LIGHT_RANGE_FACTOR: f32 = 2.5;
    pub const ACCENT_LIGHT_DECAY: f32 = 2.0;

    /// How long the share toast stays up (seconds)
    pub const SHARE_MESSAGE_SECS: f32 = 2.0;

    /// Viewports at or below this width get the lighter bloom
    pub const NARROW_VIEWPORT_PX: u32 = 768;

    /// Query-string parameter carrying encoded settings
    pub const SHARE_QUERY_KEY: &str = "s";
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Point on a horizontal circle of radius `r`, measured from the +Z axis
/// toward +X (so angle 0 faces the camera)
#[inline]
pub fn orbit_point(r: f32, angle: f32) -> Vec3 {
    Vec3::new(angle.sin() * r, 0.0, angle.cos() * r)
}

/// Heading (rotation about +Y) that points a local +Z axis away from the origin
#[inline]
pub fn outward_heading(pos: Vec3) -> f32 {
    pos.x.atan2(pos.z)
}
