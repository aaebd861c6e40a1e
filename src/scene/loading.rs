//! Load sequencing: assets ready -> show -> animate
//!
//! Once the assets resolve, the loading overlay fades out. After a short
//! delay the content becomes visible, and only after a second delay does the
//! entrance animation start, so the entrance is never played while hidden.
//! Delays are measured in accumulated frame time.

use serde::{Deserialize, Serialize};

/// The two delays of the load sequence (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadTiming {
    /// From assets ready until the content is shown
    pub show_delay: f32,
    /// From content shown until the entrance starts
    pub animate_delay: f32,
}

impl LoadTiming {
    /// Snappy start
    pub const QUICK: Self = Self {
        show_delay: 0.5,
        animate_delay: 0.1,
    };
    /// Lets a long overlay fade finish before anything moves
    pub const RELAXED: Self = Self {
        show_delay: 1.5,
        animate_delay: 1.5,
    };
}

impl Default for LoadTiming {
    fn default() -> Self {
        Self::QUICK
    }
}

/// Where the scene is in its load sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LoadPhase {
    /// Waiting for assets, overlay up
    Loading,
    /// Assets ready, overlay fading, content still hidden
    Ready { elapsed: f32 },
    /// Content visible, entrance held at its start
    Shown { elapsed: f32 },
    /// Entrance running
    Animating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSequence {
    timing: LoadTiming,
    phase: LoadPhase,
}

impl Default for LoadSequence {
    fn default() -> Self {
        Self::new(LoadTiming::default())
    }
}

impl LoadSequence {
    pub fn new(timing: LoadTiming) -> Self {
        Self {
            timing,
            phase: LoadPhase::Loading,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Assets have finished loading. Later calls are ignored.
    pub fn on_ready(&mut self) {
        if self.phase == LoadPhase::Loading {
            log::info!("Assets ready, starting load sequence");
            self.phase = LoadPhase::Ready { elapsed: 0.0 };
        }
    }

    /// Advance the sequence by one frame
    ///
    /// Each phase consumes at most one frame, so a huge `dt` cannot skip the
    /// visible-but-still frame before the entrance starts.
    pub fn tick(&mut self, dt: f32) {
        self.phase = match self.phase {
            LoadPhase::Ready { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.show_delay {
                    log::debug!("Content shown");
                    LoadPhase::Shown { elapsed: 0.0 }
                } else {
                    LoadPhase::Ready { elapsed }
                }
            }
            LoadPhase::Shown { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.animate_delay {
                    log::debug!("Entrance started");
                    LoadPhase::Animating
                } else {
                    LoadPhase::Shown { elapsed }
                }
            }
            phase => phase,
        };
    }

    /// Loading overlay is fully up (assets outstanding)
    pub fn overlay_visible(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn content_visible(&self) -> bool {
        matches!(self.phase, LoadPhase::Shown { .. } | LoadPhase::Animating)
    }

    pub fn should_animate(&self) -> bool {
        self.phase == LoadPhase::Animating
    }
}
