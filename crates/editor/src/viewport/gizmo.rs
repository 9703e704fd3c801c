use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use shared::{EditMode, ReferenceFrame};

use super::picking::{ray_plane, ray_point_distance, ray_segment_distance, Plane, Ray};
use crate::state::scene::SceneObject;
use crate::state::selection::SubSelection;
use crate::state::settings::GizmoSettings;

/// Which axis a gizmo handle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    /// Unit vector of the axis in the gizmo's own basis
    pub fn unit(self) -> DVec3 {
        match self {
            GizmoAxis::X => DVec3::X,
            GizmoAxis::Y => DVec3::Y,
            GizmoAxis::Z => DVec3::Z,
        }
    }
}

/// A grabbable part of the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "handle", content = "axis", rename_all = "snake_case")]
pub enum GizmoHandle {
    /// Arrow (translate) or box-tipped line (scale) along one axis
    Axis(GizmoAxis),
    /// Screen-plane handle at the center
    Free,
    /// Rotation ring around one axis
    Ring(GizmoAxis),
    /// Uniform scale handle at the center
    Uniform,
}

impl GizmoHandle {
    /// Axis the handle constrains motion to, if any
    pub fn axis(self) -> Option<GizmoAxis> {
        match self {
            GizmoHandle::Axis(axis) | GizmoHandle::Ring(axis) => Some(axis),
            GizmoHandle::Free | GizmoHandle::Uniform => None,
        }
    }

    /// Handles shown for an edit mode
    pub fn set_for(mode: EditMode) -> Vec<GizmoHandle> {
        let axes = GizmoAxis::ALL;
        match mode {
            EditMode::Translate | EditMode::Select => {
                let mut handles: Vec<_> = axes.iter().map(|a| GizmoHandle::Axis(*a)).collect();
                handles.push(GizmoHandle::Free);
                handles
            }
            EditMode::Rotate => axes.iter().map(|a| GizmoHandle::Ring(*a)).collect(),
            EditMode::Scale => {
                let mut handles: Vec<_> = axes.iter().map(|a| GizmoHandle::Axis(*a)).collect();
                handles.push(GizmoHandle::Uniform);
                handles
            }
        }
    }
}

/// Resolved placement of the handle cluster
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoPose {
    pub position: DVec3,
    pub orientation: DQuat,
    /// Size multiplier for handle geometry
    pub scale: f64,
    pub handles: Vec<GizmoHandle>,
    /// Whether pointer drags on the handles move anything
    pub draggable: bool,
}

impl GizmoPose {
    /// World direction of one of the gizmo axes
    pub fn world_axis(&self, axis: GizmoAxis) -> DVec3 {
        (self.orientation * axis.unit()).normalize_or_zero()
    }
}

/// Compute where the gizmo sits for the current mode and selection.
///
/// Returns `None` (hidden) without an active object, and in select mode
/// while nothing is selected.
pub fn resolve_gizmo_pose(
    mode: EditMode,
    selection: &SubSelection,
    object: Option<&SceneObject>,
    frame: ReferenceFrame,
    settings: &GizmoSettings,
) -> Option<GizmoPose> {
    let object = object?;

    let (position, scale) = if mode.is_object_mode() {
        (object.pose.position, settings.object_scale)
    } else {
        let center = selection.world_center(&object.pose.local_to_world())?;
        (center, settings.sub_scale)
    };

    let orientation = match frame {
        ReferenceFrame::Local => object.pose.rotation,
        ReferenceFrame::World => DQuat::IDENTITY,
    };

    Some(GizmoPose {
        position,
        orientation,
        scale,
        handles: GizmoHandle::set_for(mode),
        draggable: matches!(mode, EditMode::Translate | EditMode::Select),
    })
}

/// Test which handle of `pose` a ray grabs.
///
/// Center handles win over axes; among axes the closest one within the hit
/// threshold is returned.
pub fn gizmo_hit_test(ray: &Ray, pose: &GizmoPose, settings: &GizmoSettings) -> Option<GizmoHandle> {
    let center_radius = settings.free_handle_radius * pose.scale;
    let threshold = settings.hit_threshold * pose.scale;
    let length = settings.arrow_length * pose.scale;

    let mut best: Option<(GizmoHandle, f64)> = None;

    for handle in &pose.handles {
        let dist = match handle {
            GizmoHandle::Free | GizmoHandle::Uniform => {
                if ray_point_distance(ray, pose.position) < center_radius {
                    return Some(*handle);
                }
                continue;
            }
            GizmoHandle::Axis(axis) => {
                let end = pose.position + pose.world_axis(*axis) * length;
                ray_segment_distance(ray, pose.position, end)
            }
            GizmoHandle::Ring(axis) => {
                let plane = Plane::from_normal_and_point(pose.world_axis(*axis), pose.position);
                let Some(hit) = ray_plane(ray, &plane) else {
                    continue;
                };
                (hit.distance(pose.position) - length).abs()
            }
        };

        if dist < threshold && best.is_none_or(|(_, d)| dist < d) {
            best = Some((*handle, dist));
        }
    }

    best.map(|(handle, _)| handle)
}
