use glam::DVec3;
use shared::ObjectId;

use super::scene::SceneState;

/// Copy of one object's vertex positions, taken when sub-component editing
/// (re)starts and used to cancel uncommitted edits.
#[derive(Clone, Debug, PartialEq)]
pub struct Baseline {
    pub object_id: ObjectId,
    pub positions: Vec<DVec3>,
}

impl Baseline {
    /// Snapshot the current geometry of `id`, or `None` if it does not exist
    pub fn capture(scene: &SceneState, id: ObjectId) -> Option<Self> {
        let object = scene.get(id)?;
        Some(Self {
            object_id: id,
            positions: object.geometry.snapshot(),
        })
    }

    /// Write the snapshot back into the scene.
    ///
    /// Returns false when the object is gone or its vertex count changed.
    pub fn restore(&self, scene: &mut SceneState) -> bool {
        let Some(object) = scene.get_mut(self.object_id) else {
            tracing::debug!(id = self.object_id, "baseline object missing");
            return false;
        };
        if !object.geometry.restore(&self.positions) {
            tracing::debug!(id = self.object_id, "baseline size mismatch");
            return false;
        }
        scene.notify_mutated();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scene::ObjectPose;
    use shared::PrimitiveKind;

    #[test]
    fn test_capture_and_restore() {
        let mut scene = SceneState::default();
        let id = scene.spawn_object(PrimitiveKind::Box, ObjectPose::IDENTITY);
        let baseline = Baseline::capture(&scene, id).unwrap();

        scene.translate_vertices(id, &[0, 1, 2], DVec3::ONE);
        assert_ne!(scene.get(id).unwrap().geometry.positions(), baseline.positions.as_slice());

        assert!(baseline.restore(&mut scene));
        assert_eq!(scene.get(id).unwrap().geometry.positions(), baseline.positions.as_slice());
    }

    #[test]
    fn test_missing_object() {
        let mut scene = SceneState::default();
        assert!(Baseline::capture(&scene, 3).is_none());
        let baseline = Baseline {
            object_id: 3,
            positions: Vec::new(),
        };
        assert!(!baseline.restore(&mut scene));
    }
}
