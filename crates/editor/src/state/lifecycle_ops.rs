//! Object creation, deletion, activation and numeric transforms

use glam::{DQuat, DVec3, EulerRot};
use shared::{Action, EditMode, ObjectId, PrimitiveKind};

use super::{Baseline, EditorSession, ObjectPose};

impl EditorSession {
    /// Create an object at the spawn position, make it active and record it
    pub fn spawn(&mut self, primitive: PrimitiveKind) -> ObjectId {
        self.cancel_drag();
        let position = DVec3::from_array(self.settings.primitives.spawn_position);
        let id = self.scene.spawn_object(primitive, ObjectPose::at(position));

        if let Some(record) = self.scene.record_of(id, false) {
            self.history.push(Action::Add {
                items: vec![record],
            });
        }
        self.activate(Some(id));
        id
    }

    /// Delete the active object. Returns false when nothing is active.
    pub fn delete_active(&mut self) -> bool {
        self.cancel_drag();
        let Some(id) = self.active else {
            return false;
        };
        let Some(record) = self.scene.record_of(id, true) else {
            return false;
        };
        self.scene.remove_object(id);
        self.history.push(Action::Delete {
            items: vec![record],
        });
        self.activate(None);
        true
    }

    /// Make `id` the active object, or deactivate with `None`.
    ///
    /// Returns false for an unknown id. Switching clears the selection and
    /// rebuilds the baseline.
    pub fn select_object(&mut self, id: Option<ObjectId>) -> bool {
        if let Some(id) = id {
            if !self.scene.contains(id) {
                tracing::debug!(id, "select_object on missing object");
                return false;
            }
        }
        self.cancel_drag();
        self.activate(id);
        true
    }

    fn activate(&mut self, id: Option<ObjectId>) {
        self.selection.clear();
        self.active = id;
        self.baseline = id.and_then(|id| Baseline::capture(&self.scene, id));
    }

    /// Set the active object's position, rotation (Euler XYZ degrees) or
    /// scale depending on the mode, recording one transform when it changed.
    pub fn set_transform_values(&mut self, values: [f64; 3]) -> bool {
        if self.drag.is_active() {
            tracing::debug!("numeric transform ignored during drag");
            return false;
        }
        let Some(id) = self.active else {
            return false;
        };
        let Some(before) = self.scene.get(id).map(|o| o.pose) else {
            return false;
        };

        let [x, y, z] = values;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            tracing::debug!(?values, "non-finite transform values");
            return false;
        }

        let mut after = before;
        match self.mode {
            EditMode::Translate => after.position = DVec3::new(x, y, z),
            EditMode::Rotate => {
                after.rotation = DQuat::from_euler(
                    EulerRot::XYZ,
                    x.to_radians(),
                    y.to_radians(),
                    z.to_radians(),
                );
            }
            EditMode::Scale => {
                let limits = &self.settings.transform;
                after.scale = DVec3::new(x, y, z).clamp(
                    DVec3::splat(limits.min_scale),
                    DVec3::splat(limits.max_scale),
                );
            }
            EditMode::Select => {
                tracing::debug!("numeric transform in select mode");
                return false;
            }
        }

        if after == before {
            return false;
        }
        self.scene.set_pose(id, after);
        self.history.push(Action::Transform {
            object_id: id,
            before: before.into(),
            after: after.into(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_records_add_and_activates() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Sphere);
        assert_eq!(session.active_object(), Some(id));
        assert_eq!(session.history().undo_entries().len(), 1);
        assert_eq!(
            session.scene().get(id).unwrap().pose.position,
            DVec3::new(0.0, 0.75, 0.0)
        );
        assert_eq!(session.baseline().unwrap().object_id, id);
    }

    #[test]
    fn test_delete_active() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Box);
        assert!(session.delete_active());
        assert!(!session.scene().contains(id));
        assert_eq!(session.active_object(), None);
        assert!(session.baseline().is_none());
        assert!(!session.delete_active());
    }

    #[test]
    fn test_select_unknown_object() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Box);
        assert!(!session.select_object(Some(99)));
        assert_eq!(session.active_object(), Some(id));
        assert!(session.select_object(None));
        assert_eq!(session.active_object(), None);
    }

    #[test]
    fn test_transform_values_per_mode() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Box);

        assert!(session.set_transform_values([1.0, 2.0, 3.0]));
        assert_eq!(session.scene().get(id).unwrap().pose.position, DVec3::new(1.0, 2.0, 3.0));
        // Same values again: nothing recorded
        assert!(!session.set_transform_values([1.0, 2.0, 3.0]));

        session.set_mode(EditMode::Rotate);
        assert!(session.set_transform_values([0.0, 90.0, 0.0]));
        let rotation = session.scene().get(id).unwrap().pose.rotation;
        assert!((rotation * DVec3::X - DVec3::NEG_Z).length() < 1e-9);

        session.set_mode(EditMode::Scale);
        assert!(session.set_transform_values([0.0, 50.0, 2.0]));
        assert_eq!(session.scene().get(id).unwrap().pose.scale, DVec3::new(0.05, 10.0, 2.0));

        session.set_mode(EditMode::Select);
        assert!(!session.set_transform_values([1.0, 1.0, 1.0]));

        // add + three transforms
        assert_eq!(session.history().undo_entries().len(), 4);
    }
}
