//! Per-character instance data handed to the render backend

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// One glowing character: world transform plus emissive color
///
/// Laid out for direct upload into an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CharacterInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// Linear RGB emissive color pre-multiplied by intensity, alpha = 1
    pub emissive: [f32; 4],
}

impl CharacterInstance {
    pub fn new(model: Mat4, glow_rgb: [f32; 3], intensity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            emissive: [
                glow_rgb[0] * intensity,
                glow_rgb[1] * intensity,
                glow_rgb[2] * intensity,
                1.0,
            ],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Raw bytes for a whole instance buffer
    pub fn as_bytes(instances: &[CharacterInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
