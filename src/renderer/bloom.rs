//! Bloom post-process parameters

use serde::{Deserialize, Serialize};

use crate::consts::NARROW_VIEWPORT_PX;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomSettings {
    pub intensity: f32,
    /// Luminance above which pixels start to bloom
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
    /// Vertical resolution of the blur targets
    pub height: u32,
}

impl BloomSettings {
    /// Small screens get a softer, cheaper bloom
    pub fn for_viewport(width_px: u32) -> Self {
        let narrow = width_px <= NARROW_VIEWPORT_PX;
        Self {
            intensity: if narrow { 0.8 } else { 1.2 },
            luminance_threshold: 0.2,
            luminance_smoothing: 0.9,
            height: if narrow { 200 } else { 300 },
        }
    }
}
