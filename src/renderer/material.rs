//! Material and glyph presets for the render backend

use serde::{Deserialize, Serialize};

/// Physically based surface description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub env_map_intensity: f32,
    /// Emissive output bypasses tone mapping so bloom can pick it up
    pub tone_mapped: bool,
}

/// Gold, with subtle reflections so the text in front stays readable
pub const OBJECT_MATERIAL: MaterialParams = MaterialParams {
    // #B8860B
    base_color: [184.0 / 255.0, 134.0 / 255.0, 11.0 / 255.0],
    metalness: 0.85,
    roughness: 0.5,
    env_map_intensity: 0.2,
    tone_mapped: true,
};

/// White base under the emissive glow
pub const CHARACTER_MATERIAL: MaterialParams = MaterialParams {
    base_color: [1.0, 1.0, 1.0],
    metalness: 0.1,
    roughness: 0.2,
    env_map_intensity: 1.0,
    tone_mapped: false,
};

/// How each character is extruded by the font service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphStyle {
    pub size: f32,
    /// Extrusion depth
    pub depth: f32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl GlyphStyle {
    pub fn new(size: f32, depth: f32) -> Self {
        Self {
            size,
            depth,
            bevel_thickness: 0.02,
            bevel_size: 0.01,
            bevel_segments: 3,
        }
    }
}
