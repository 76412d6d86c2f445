//! Use action: pick whatever is under the cursor and use it

use tracing::debug;
use vantage_core::{EntityId, LayerMask};
use vantage_physics::SceneQuery;

use crate::camera::Lens;
use crate::combat::Aim;
use crate::target::TargetRegistry;

/// Cursor probe for usable targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionProbe {
    /// Maximum probe distance
    pub range: f32,
    /// Layers the probe can hit
    pub layers: LayerMask,
}

impl Default for InteractionProbe {
    fn default() -> Self {
        Self {
            range: f32::INFINITY,
            layers: LayerMask::ALL,
        }
    }
}

impl InteractionProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast through the cursor and use the first thing hit, if usable.
    ///
    /// Returns the entity that was used.
    pub fn use_at_cursor(
        &self,
        lens: &Lens,
        aim: &Aim,
        world: &impl SceneQuery,
        targets: &mut TargetRegistry,
    ) -> Option<EntityId> {
        let ray = lens.screen_point_to_ray(aim.cursor, aim.viewport, &aim.camera);
        let entity = world.cast(&ray, self.range, self.layers)?.entity?;

        if targets.use_target(entity) {
            debug!("Used {:?}", entity);
            Some(entity)
        } else {
            None
        }
    }
}
