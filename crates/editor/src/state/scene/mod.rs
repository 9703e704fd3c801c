//! Scene state management
//!
//! This module owns the editable objects, their geometry, and the command
//! stack that replays recorded actions against them.

mod display;
mod history;
mod object_ops;
mod transform_ops;

pub use display::object_display_name;
pub use history::{CommandStack, ReplayOutcome};
pub use transform_ops::ObjectPose;

use shared::{ObjectId, PrimitiveKind};

use crate::geometry::GeometryBuffer;
use crate::state::settings::PrimitiveSettings;

/// An editable object: identity, primitive kind, pose and exclusively owned geometry
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub primitive: PrimitiveKind,
    pub pose: ObjectPose,
    pub geometry: GeometryBuffer,
}

/// Scene state with objects and id allocation
pub struct SceneState {
    objects: Vec<SceneObject>,
    /// Next id handed out by `spawn_object`; always greater than every id inserted so far
    next_id: ObjectId,
    /// Primitive sizes used when (re)instantiating objects
    pub(crate) primitives: PrimitiveSettings,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl SceneState {
    pub fn new(primitives: PrimitiveSettings) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
            primitives,
            version: 0,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// All objects in insertion order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get an object by ID
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get mutable object by ID
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Bump version without other changes
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(PrimitiveSettings::default())
    }
}
