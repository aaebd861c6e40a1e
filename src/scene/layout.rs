//! Character placement around the orbit band
//!
//! Characters are spread over a fraction of the circle, centered on the +Z
//! axis, each turned to face away from the center.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::{orbit_point, outward_heading};

/// Placement of one character in the orbit group's local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterLayout {
    pub x: f32,
    pub z: f32,
    /// Rotation about +Y, radians
    pub facing_angle: f32,
}

impl CharacterLayout {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

/// Band angle of character `index` (0 is straight ahead)
///
/// `char_count` of 0 is treated as 1 so the step never divides by zero.
pub fn band_angle(index: usize, char_count: usize, letter_spacing: f32) -> f32 {
    let n = char_count.max(1) as f32;
    let total_arc = TAU * letter_spacing;
    let step = total_arc / n;
    let start_angle = -total_arc / 2.0 + step / 2.0;
    start_angle + index as f32 * step
}

/// Place `char_count` characters on a circle of `orbit_radius`
///
/// Entries follow text order. Pure: the same inputs always give the same
/// output.
pub fn compute_character_layout(
    char_count: usize,
    orbit_radius: f32,
    letter_spacing: f32,
) -> Vec<CharacterLayout> {
    (0..char_count)
        .map(|i| {
            let angle = band_angle(i, char_count, letter_spacing);
            let pos = orbit_point(orbit_radius, angle);
            CharacterLayout {
                x: pos.x,
                z: pos.z,
                facing_angle: outward_heading(pos),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    char_count: usize,
    orbit_radius: u32,
    letter_spacing: u32,
}

impl LayoutKey {
    fn new(char_count: usize, orbit_radius: f32, letter_spacing: f32) -> Self {
        Self {
            char_count,
            orbit_radius: orbit_radius.to_bits(),
            letter_spacing: letter_spacing.to_bits(),
        }
    }
}

/// Memoized layout, recomputed only when one of its inputs changes
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<LayoutKey>,
    layout: Vec<CharacterLayout>,
    recomputes: u32,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        char_count: usize,
        orbit_radius: f32,
        letter_spacing: f32,
    ) -> &[CharacterLayout] {
        let key = LayoutKey::new(char_count, orbit_radius, letter_spacing);
        if self.key != Some(key) {
            log::debug!(
                "Recomputing layout: {char_count} chars, r={orbit_radius}, spread={letter_spacing}"
            );
            self.layout = compute_character_layout(char_count, orbit_radius, letter_spacing);
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.layout
    }

    /// How many times the layout has been rebuilt
    pub fn recomputes(&self) -> u32 {
        self.recomputes
    }
}
