use glam::DVec3;
use shared::ObjectId;

use super::camera::CameraView;
use super::gizmo::GizmoHandle;
use super::picking::{ray_plane, Plane, Ray};
use crate::state::scene::ObjectPose;

/// Phase of the pointer drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    /// Pointer pressed on a handle, not moved yet
    Anchored,
    Dragging,
}

/// What a drag moves
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    /// Rigid object translation, with the pose to return to
    Object { id: ObjectId, start_pose: ObjectPose },
    /// Selected vertices of an object
    Vertices { id: ObjectId, indices: Vec<u32> },
}

impl DragTarget {
    pub fn object_id(&self) -> ObjectId {
        match self {
            DragTarget::Object { id, .. } | DragTarget::Vertices { id, .. } => *id,
        }
    }
}

/// An in-flight drag
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub target: DragTarget,
    pub handle: GizmoHandle,
    /// World axis for constrained handles
    pub axis: Option<DVec3>,
    pub plane: Plane,
    /// Gizmo anchor at drag start
    pub start_anchor: DVec3,
    /// Last accepted plane hit
    pub prev_hit: DVec3,
    /// Accumulated world displacement
    pub total: DVec3,
    pub moved: bool,
}

impl ActiveDrag {
    /// Current anchor position
    pub fn anchor(&self) -> DVec3 {
        self.start_anchor + self.total
    }
}

/// Converts pointer rays into constrained world displacements
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn phase(&self) -> DragPhase {
        match &self.active {
            None => DragPhase::Idle,
            Some(drag) if drag.moved => DragPhase::Dragging,
            Some(_) => DragPhase::Anchored,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Enter the anchored phase. Any previous drag is replaced.
    ///
    /// The start hit is where `ray` meets the drag plane, or the anchor itself
    /// when the ray misses.
    pub fn begin(
        &mut self,
        target: DragTarget,
        handle: GizmoHandle,
        axis: Option<DVec3>,
        camera: &CameraView,
        anchor: DVec3,
        ray: &Ray,
        degenerate_epsilon: f64,
    ) {
        let plane = drag_plane(axis, camera.direction, anchor, degenerate_epsilon);
        let start_hit = ray_plane(ray, &plane).unwrap_or(anchor);
        tracing::debug!(?handle, ?anchor, normal = ?plane.normal, "drag anchored");

        self.active = Some(ActiveDrag {
            target,
            handle,
            axis,
            plane,
            start_anchor: anchor,
            prev_hit: start_hit,
            total: DVec3::ZERO,
            moved: false,
        });
    }

    /// Process one pointer sample and return the world delta to apply.
    ///
    /// Returns `None` while idle or when the ray misses the drag plane.
    pub fn update(&mut self, ray: &Ray) -> Option<DVec3> {
        let drag = self.active.as_mut()?;
        let Some(hit) = ray_plane(ray, &drag.plane) else {
            tracing::trace!("pointer ray misses drag plane");
            return None;
        };

        let raw = hit - drag.prev_hit;
        let delta = match drag.axis {
            Some(axis) => axis * raw.dot(axis),
            None => raw,
        };

        drag.prev_hit = hit;
        drag.total += delta;
        drag.moved = true;
        Some(delta)
    }

    /// Leave the drag, returning its final state
    pub fn finish(&mut self) -> Option<ActiveDrag> {
        self.active.take()
    }
}

/// Build the plane pointer motion is projected onto.
///
/// Free handles use the camera-facing plane through the anchor. Axis handles
/// use the plane containing the axis that faces the camera most directly,
/// falling back to world up and then world X when the axis is parallel to
/// the view direction.
pub fn drag_plane(axis: Option<DVec3>, camera_dir: DVec3, anchor: DVec3, degenerate_epsilon: f64) -> Plane {
    let Some(axis) = axis else {
        return Plane::from_normal_and_point(camera_dir, anchor);
    };

    let mut side = axis.cross(camera_dir);
    if side.length_squared() < degenerate_epsilon {
        side = axis.cross(DVec3::Y);
    }
    if side.length_squared() < degenerate_epsilon {
        side = axis.cross(DVec3::X);
    }

    Plane::from_normal_and_point(side.cross(axis), anchor)
}
