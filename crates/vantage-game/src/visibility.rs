//! Active flags for scene objects toggled by the camera rig
//!
//! The host renderer reads these flags; the rig only writes them when the
//! perspective changes.

use std::collections::HashMap;

use vantage_core::EntityId;

/// Per-object visibility owned by the scene
#[derive(Debug, Clone, Default)]
pub struct SceneVisibility {
    active: HashMap<EntityId, bool>,
}

impl SceneVisibility {
    /// Create an empty visibility table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object with an initial active flag and return its ID
    pub fn register(&mut self, active: bool) -> EntityId {
        let id = EntityId::new();
        self.active.insert(id, active);
        id
    }

    /// Force an object active or inactive (unknown IDs are added)
    pub fn set_active(&mut self, id: EntityId, active: bool) {
        self.active.insert(id, active);
    }

    /// Whether an object is active; unknown objects are not
    pub fn is_active(&self, id: EntityId) -> bool {
        self.active.get(&id).copied().unwrap_or(false)
    }

    /// Number of tracked objects
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no objects are tracked
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
