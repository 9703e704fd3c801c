//! Rigid pose and per-vertex edit operations

use glam::{DMat4, DQuat, DVec3};
use shared::{ObjectId, Pose};

use super::SceneState;

/// Object pose in glam types
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectPose {
    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl ObjectPose {
    pub const IDENTITY: ObjectPose = ObjectPose {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Object-to-world matrix
    pub fn local_to_world(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Convert a world-space displacement into object-local space.
    ///
    /// Translation does not affect displacements; a zero scale component
    /// yields zero motion along that local axis.
    pub fn world_to_local_vector(&self, delta: DVec3) -> DVec3 {
        let unrotated = self.rotation.inverse() * delta;
        DVec3::new(
            safe_div(unrotated.x, self.scale.x),
            safe_div(unrotated.y, self.scale.y),
            safe_div(unrotated.z, self.scale.z),
        )
    }

    /// Rotate a local axis direction into world space (unit length)
    pub fn world_axis(&self, local_axis: DVec3) -> DVec3 {
        (self.rotation * local_axis).normalize_or_zero()
    }
}

impl Default for ObjectPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Pose> for ObjectPose {
    fn from(pose: Pose) -> Self {
        let [x, y, z, w] = pose.rotation;
        let rotation = DQuat::from_xyzw(x, y, z, w);
        Self {
            position: DVec3::from_array(pose.position),
            rotation: if rotation.length_squared() > 0.0 {
                rotation.normalize()
            } else {
                DQuat::IDENTITY
            },
            scale: DVec3::from_array(pose.scale),
        }
    }
}

impl From<ObjectPose> for Pose {
    fn from(pose: ObjectPose) -> Self {
        Pose {
            position: pose.position.to_array(),
            rotation: pose.rotation.to_array(),
            scale: pose.scale.to_array(),
        }
    }
}

fn safe_div(value: f64, divisor: f64) -> f64 {
    if divisor.abs() < f64::EPSILON {
        0.0
    } else {
        value / divisor
    }
}

impl SceneState {
    /// Replace an object's pose. Returns false if the object does not exist.
    pub fn set_pose(&mut self, id: ObjectId, pose: ObjectPose) -> bool {
        let Some(object) = self.get_mut(id) else {
            tracing::debug!(id, "set_pose on missing object");
            return false;
        };
        object.pose = pose;
        self.version += 1;
        true
    }

    /// Apply a world-space translation delta to an object's position
    pub fn translate_object(&mut self, id: ObjectId, delta: DVec3) -> bool {
        let Some(object) = self.get_mut(id) else {
            tracing::debug!(id, "translate on missing object");
            return false;
        };
        object.pose.position += delta;
        self.version += 1;
        true
    }

    /// Add a local displacement to the listed vertices of an object
    pub fn translate_vertices(&mut self, id: ObjectId, indices: &[u32], local_delta: DVec3) -> bool {
        let Some(object) = self.get_mut(id) else {
            tracing::debug!(id, "vertex edit on missing object");
            return false;
        };
        object.geometry.translate_vertices(indices, local_delta);
        self.version += 1;
        true
    }
}
