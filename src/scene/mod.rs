//! Scene state and per-frame update
//!
//! Geometry here is pure and cached by its inputs; the only per-frame
//! mutation is the orbit angle, the entrance height and the load sequence.
//! Everything is driven from a single `frame(dt)` call by the render loop.

pub mod assets;
pub mod debounce;
pub mod entrance;
pub mod layout;
pub mod lights;
pub mod loading;
pub mod mesh;
pub mod orbit;

pub use assets::{AssetLoader, AssetSlot, AssetTicket, FontHandle, LoadedMesh};
pub use debounce::Debounced;
pub use entrance::EntranceState;
pub use layout::{CharacterLayout, LayoutCache, compute_character_layout};
pub use lights::{AccentLight, accent_lights};
pub use loading::{LoadPhase, LoadSequence, LoadTiming};
pub use mesh::{Aabb, MeshTransform, MeshTransformCache, compute_mesh_transform, object_matrix};
pub use orbit::OrbitState;

use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::consts::TEXT_DEBOUNCE_SECS;
use crate::renderer::{CharacterInstance, GlyphStyle};
use crate::settings::SceneSettings;

/// One orbiting character ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct OrbitCharacter {
    pub glyph: char,
    /// Index into the text (keeps instances stable while text is edited)
    pub index: usize,
    #[serde(skip)]
    pub instance: CharacterInstance,
    pub world: Mat4,
}

/// Everything the render backend needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    /// Loading overlay still covering the canvas
    pub overlay_visible: bool,
    /// Scene content drawn at all
    pub content_visible: bool,
    /// Height of the entrance wrapper
    pub content_y: f32,
    pub font: Option<FontHandle>,
    pub glyph_style: GlyphStyle,
    pub characters: Vec<OrbitCharacter>,
    /// `None` while no mesh with bounds is loaded
    pub object: Option<Mat4>,
    pub lights: Vec<AccentLight>,
}

impl FrameView {
    /// Instance buffer contents for the characters
    pub fn instances(&self) -> Vec<CharacterInstance> {
        self.characters.iter().map(|c| c.instance).collect()
    }
}

pub struct Scene {
    settings: SceneSettings,
    /// Text as drawn; trails `settings.text` while the user is typing
    text: Debounced<String>,
    layout: LayoutCache,
    mesh_transform: MeshTransformCache,
    mesh: AssetSlot<LoadedMesh>,
    font: AssetSlot<FontHandle>,
    orbit: OrbitState,
    entrance: EntranceState,
    sequence: LoadSequence,
}

impl Scene {
    pub fn new(settings: SceneSettings, timing: LoadTiming) -> Self {
        let settings = Self::checked(settings);
        Self {
            text: Debounced::new(settings.text.clone(), TEXT_DEBOUNCE_SECS),
            settings,
            layout: LayoutCache::new(),
            mesh_transform: MeshTransformCache::new(),
            mesh: AssetSlot::new(),
            font: AssetSlot::new(),
            orbit: OrbitState::new(),
            entrance: EntranceState::default(),
            sequence: LoadSequence::new(timing),
        }
    }

    fn checked(settings: SceneSettings) -> SceneSettings {
        match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Adjusting scene settings: {e}");
                settings.sanitized()
            }
        }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Replace the settings; takes effect from the next frame, except text
    /// which waits for typing to pause
    pub fn set_settings(&mut self, settings: SceneSettings) {
        self.settings = Self::checked(settings);
        self.text.set(self.settings.text.clone());
    }

    /// Text currently laid out around the orbit
    pub fn displayed_text(&self) -> &str {
        self.text.settled()
    }

    /// Edit the settings in place
    pub fn update_settings(&mut self, f: impl FnOnce(&mut SceneSettings)) {
        let mut settings = self.settings.clone();
        f(&mut settings);
        self.set_settings(settings);
    }

    /// Ask `loader` for any mesh or font whose URL changed
    pub fn sync_assets(&mut self, loader: &mut impl AssetLoader) {
        if let Some(ticket) = self.mesh.request(&self.settings.mesh_url) {
            log::info!("Loading mesh {}", self.settings.mesh_url);
            loader.load_mesh(&self.settings.mesh_url, ticket);
        }
        if let Some(ticket) = self.font.request(&self.settings.font) {
            log::info!("Loading font {}", self.settings.font);
            loader.load_font(&self.settings.font, ticket);
        }
    }

    /// Deliver a finished mesh load
    pub fn mesh_loaded(&mut self, ticket: AssetTicket, mut mesh: LoadedMesh) {
        if let Some(bounds) = mesh.bounds.filter(|b| !b.is_valid()) {
            log::warn!("Mesh {:?} has unusable bounds {bounds:?}", self.mesh.key());
            mesh.bounds = None;
        }
        if mesh.bounds.is_none() {
            log::warn!("Mesh {:?} has no geometry, it will not be placed", self.mesh.key());
        }
        if self.mesh.resolve(ticket, mesh) {
            self.check_ready();
        }
    }

    /// Deliver a finished font load
    pub fn font_loaded(&mut self, ticket: AssetTicket, font: FontHandle) {
        if self.font.resolve(ticket, font) {
            self.check_ready();
        }
    }

    fn check_ready(&mut self) {
        if self.mesh.value().is_some() && self.font.value().is_some() {
            self.sequence.on_ready();
        }
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.sequence.phase()
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn entrance(&self) -> &EntranceState {
        &self.entrance
    }

    /// Current character layout (recomputed only when the displayed text
    /// length, radius or spread changed)
    pub fn layout(&mut self) -> &[CharacterLayout] {
        self.layout.get(
            self.text.settled().chars().count(),
            self.settings.orbit_radius,
            self.settings.letter_spacing,
        )
    }

    /// Current object transform, if a mesh with bounds is loaded
    pub fn mesh_transform(&mut self) -> Option<MeshTransform> {
        let bounds = self.mesh.value().and_then(|m| m.bounds.as_ref());
        self.mesh_transform.get(bounds, self.settings.object_scale)
    }

    /// Advance all animation by `dt` seconds and describe the frame
    pub fn frame(&mut self, dt: f32) -> FrameView {
        if self.text.tick(dt) {
            log::debug!("Text settled: {:?}", self.text.settled());
        }
        self.sequence.tick(dt);
        self.entrance.tick(self.sequence.should_animate());
        self.orbit.tick(
            dt,
            self.settings.rotation_speed,
            self.settings.reverse_direction,
        );
        self.view()
    }

    /// Describe the current state without advancing time
    pub fn view(&mut self) -> FrameView {
        let content = Mat4::from_translation(Vec3::new(0.0, self.entrance.current_y, 0.0));
        let orbit_group = content
            * self
                .orbit
                .group_matrix(self.settings.orbit_y, self.settings.tilt_radians());

        let glow = self.settings.glow_rgb_f32();
        let intensity = self.settings.emissive_intensity;
        let text = self.text.settled().clone();

        let characters = text
            .chars()
            .zip(self.layout().iter())
            .enumerate()
            .map(|(index, (glyph, placement))| {
                let local = Mat4::from_translation(placement.position())
                    * Mat4::from_rotation_y(placement.facing_angle);
                let world = orbit_group * local;
                OrbitCharacter {
                    glyph,
                    index,
                    instance: CharacterInstance::new(world, glow, intensity),
                    world,
                }
            })
            .collect();

        let rotation = self.settings.object_rotation_radians();
        let object = self
            .mesh_transform()
            .map(|t| content * object_matrix(rotation, &t));

        FrameView {
            overlay_visible: self.sequence.overlay_visible(),
            content_visible: self.sequence.content_visible(),
            content_y: self.entrance.current_y,
            font: self.font.value().copied(),
            glyph_style: GlyphStyle::new(self.settings.char_size, self.settings.text_thickness),
            characters,
            object,
            lights: accent_lights(text.chars().count(), self.settings.orbit_radius),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneSettings::default(), LoadTiming::default())
    }
}
