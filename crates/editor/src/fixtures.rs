//! Factory functions for creating test data.
//!
//! Provides helpers to construct cameras, pointer rays, object records and
//! pick candidates used in tests and by the command protocol.

use glam::DVec3;
use shared::*;

use crate::viewport::camera::CameraView;
use crate::viewport::picking::{EdgeHit, FaceHit, PickCandidates, Ray, VertexHit};

// ── Cameras ─────────────────────────────────────────────────────

/// Camera on the +Z axis looking down -Z at `target`.
pub fn front_camera(target: DVec3, distance: f64) -> CameraView {
    CameraView::new(target + DVec3::new(0.0, 0.0, distance), DVec3::NEG_Z)
}

/// Camera above `target` looking straight down.
pub fn top_camera(target: DVec3, distance: f64) -> CameraView {
    CameraView::new(target + DVec3::new(0.0, distance, 0.0), DVec3::NEG_Y)
}

/// Camera at `position` aimed at `target`.
pub fn camera_at(position: [f64; 3], target: [f64; 3]) -> CameraView {
    CameraView::looking_at(DVec3::from_array(position), DVec3::from_array(target))
}

// ── Rays ────────────────────────────────────────────────────────

/// Pointer ray from the camera eye through a world point.
pub fn ray_through(camera: &CameraView, point: DVec3) -> Ray {
    Ray::new(camera.position, point - camera.position)
}

/// Pointer ray parallel to the view direction, offset so it passes through `point`.
pub fn ortho_ray(camera: &CameraView, point: DVec3, back_off: f64) -> Ray {
    Ray::new(point - camera.direction * back_off, camera.direction)
}

// ── Records ─────────────────────────────────────────────────────

/// History record of a box at a position.
pub fn box_record(id: ObjectId, position: [f64; 3]) -> ObjectRecord {
    ObjectRecord {
        id,
        primitive: PrimitiveKind::Box,
        pose: Pose::at(position),
        positions: None,
    }
}

/// History record of a sphere at a position.
pub fn sphere_record(id: ObjectId, position: [f64; 3]) -> ObjectRecord {
    ObjectRecord {
        id,
        primitive: PrimitiveKind::Sphere,
        pose: Pose::at(position),
        positions: None,
    }
}

/// Pose with a rotation about Y in degrees.
pub fn pose_rotated_y(position: [f64; 3], degrees: f64) -> Pose {
    let q = glam::DQuat::from_rotation_y(degrees.to_radians());
    Pose {
        position,
        rotation: q.to_array(),
        scale: [1.0; 3],
    }
}

// ── Picks ───────────────────────────────────────────────────────

/// Candidates carrying all three kinds at once.
pub fn all_candidates(object_id: ObjectId, vertex: u32, edge_point: DVec3, corners: [u32; 3]) -> PickCandidates {
    PickCandidates {
        vertex: Some(VertexHit { object_id, index: vertex }),
        edge: Some(EdgeHit {
            object_id,
            point: edge_point.to_array(),
        }),
        face: Some(FaceHit { object_id, corners }),
    }
}
