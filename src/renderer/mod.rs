//! Render hand-off
//!
//! Drawing happens in an external backend. These are the plain-data
//! descriptions it consumes: instance buffers, bloom, lighting and
//! material presets.

pub mod bloom;
pub mod instance;
pub mod lighting;
pub mod material;

pub use bloom::BloomSettings;
pub use instance::CharacterInstance;
pub use lighting::{KEY_LIGHTS, KeyLight};
pub use material::{CHARACTER_MATERIAL, GlyphStyle, MaterialParams, OBJECT_MATERIAL};
