//! Asset requests with last-write-wins semantics
//!
//! Mesh and font loading happen outside this crate. The scene asks an
//! [`AssetLoader`] for a key and later hands the result back with the ticket
//! it was issued. If the key changed in the meantime the stale result is
//! dropped.

use serde::{Deserialize, Serialize};

use super::mesh::Aabb;

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetTicket(pub u32);

/// Host-side font handle (opaque to the scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontHandle(pub u32);

/// What the scene needs from a loaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadedMesh {
    /// `None` for meshes without usable geometry; such meshes are not placed
    pub bounds: Option<Aabb>,
}

/// External loading service
pub trait AssetLoader {
    fn load_mesh(&mut self, url: &str, ticket: AssetTicket);
    fn load_font(&mut self, path: &str, ticket: AssetTicket);
}

/// One hot-swappable asset, keyed by URL/path
#[derive(Debug, Clone)]
pub struct AssetSlot<T> {
    key: Option<String>,
    ticket: AssetTicket,
    value: Option<T>,
    /// The key a value was last resolved for (may lag behind `key`)
    loaded_key: Option<String>,
}

impl<T> Default for AssetSlot<T> {
    fn default() -> Self {
        Self {
            key: None,
            ticket: AssetTicket(0),
            value: None,
            loaded_key: None,
        }
    }
}

impl<T> AssetSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the slot at `key`; returns a fresh ticket when a load is needed
    ///
    /// The previous value stays available until the new one arrives.
    pub fn request(&mut self, key: &str) -> Option<AssetTicket> {
        if self.key.as_deref() == Some(key) {
            return None;
        }
        self.key = Some(key.to_string());
        self.ticket = AssetTicket(self.ticket.0.wrapping_add(1));
        Some(self.ticket)
    }

    /// Store a load result; ignored unless `ticket` is the latest request
    pub fn resolve(&mut self, ticket: AssetTicket, value: T) -> bool {
        if ticket != self.ticket || self.key.is_none() {
            log::debug!("Discarding stale asset result {:?}", ticket);
            return false;
        }
        self.value = Some(value);
        self.loaded_key = self.key.clone();
        true
    }

    /// Latest loaded value (possibly for a superseded key)
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The current key has been loaded
    pub fn is_current(&self) -> bool {
        self.value.is_some() && self.loaded_key == self.key
    }
}
