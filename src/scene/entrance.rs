//! Slide-up entrance of the whole scene
//!
//! The content waits below its resting height, then eases toward it with a
//! fixed per-frame fraction. There is no duration: the approach is
//! asymptotic and tolerant of uneven frame rates.

use serde::{Deserialize, Serialize};

use crate::consts::{ENTRANCE_SMOOTHING, ENTRANCE_START_Y, ENTRANCE_TARGET_Y};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntranceState {
    pub current_y: f32,
    pub start_y: f32,
    pub target_y: f32,
    /// Fraction of the remaining gap closed per frame
    pub smoothing: f32,
}

impl Default for EntranceState {
    fn default() -> Self {
        Self::new(ENTRANCE_START_Y, ENTRANCE_TARGET_Y)
    }
}

impl EntranceState {
    pub fn new(start_y: f32, target_y: f32) -> Self {
        Self {
            current_y: start_y,
            start_y,
            target_y,
            smoothing: ENTRANCE_SMOOTHING,
        }
    }

    /// Advance one frame; until `animate` is set the content is held at `start_y`
    pub fn tick(&mut self, animate: bool) {
        self.current_y = if animate {
            self.current_y + (self.target_y - self.current_y) * self.smoothing
        } else {
            self.start_y
        };
    }

    /// Within `epsilon` of the resting height
    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target_y - self.current_y).abs() <= epsilon
    }
}
