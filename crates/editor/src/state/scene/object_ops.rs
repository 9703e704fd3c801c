//! Object create/remove operations

use shared::{ObjectId, ObjectRecord, PrimitiveKind};

use super::{ObjectPose, SceneObject, SceneState};
use crate::geometry::primitives::build_primitive;

impl SceneState {
    /// Create a new object with pristine primitive geometry and return its id
    pub fn spawn_object(&mut self, primitive: PrimitiveKind, pose: ObjectPose) -> ObjectId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;

        self.objects.push(SceneObject {
            id,
            primitive,
            pose,
            geometry: build_primitive(primitive, &self.primitives),
        });

        self.version += 1;
        id
    }

    /// Re-instantiate an object from a history record.
    ///
    /// Returns false when an object with the same id already exists. Recorded
    /// positions are applied when their count matches the primitive's.
    pub fn insert_record(&mut self, record: &ObjectRecord) -> bool {
        if self.contains(record.id) {
            tracing::debug!(id = record.id, "object already present, insert skipped");
            return false;
        }

        let mut geometry = build_primitive(record.primitive, &self.primitives);
        if let Some(positions) = &record.positions {
            geometry.restore_arrays(positions);
        }

        self.objects.push(SceneObject {
            id: record.id,
            primitive: record.primitive,
            pose: record.pose.into(),
            geometry,
        });
        self.next_id = self.next_id.max(record.id + 1);

        self.version += 1;
        true
    }

    /// Remove an object, returning it if it existed
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        self.version += 1;
        Some(self.objects.remove(pos))
    }

    /// Record an object for history. With `with_positions`, the current local
    /// positions are captured so re-insertion restores edited geometry.
    pub fn record_of(&self, id: ObjectId, with_positions: bool) -> Option<ObjectRecord> {
        let object = self.get(id)?;
        Some(ObjectRecord {
            id: object.id,
            primitive: object.primitive,
            pose: object.pose.into(),
            positions: with_positions.then(|| object.geometry.to_arrays()),
        })
    }
}
