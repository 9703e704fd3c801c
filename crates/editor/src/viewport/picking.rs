use glam::DVec3;
use serde::{Deserialize, Serialize};
use shared::ObjectId;

/// A ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Build a ray, normalizing the direction
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    /// Compute the box enclosing `points`. The result is empty (min > max) for no points.
    pub fn from_points(points: &[DVec3]) -> Self {
        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the bounding box
    pub fn center(&self) -> DVec3 {
        if self.is_empty() {
            return DVec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> DVec3 {
        if self.is_empty() {
            return DVec3::ZERO;
        }
        self.max - self.min
    }
}

/// Infinite plane `normal · p + constant = 0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub constant: f64,
}

impl Plane {
    /// Plane through `point` with the given (normalized) normal
    pub fn from_normal_and_point(normal: DVec3, point: DVec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    /// Signed distance from `point` to the plane
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.constant
    }
}

/// Ray-plane intersection.
/// Returns `None` when the ray is parallel to the plane or the hit lies behind the origin.
pub fn ray_plane(ray: &Ray, plane: &Plane) -> Option<DVec3> {
    let denom = plane.normal.dot(ray.direction);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = -(plane.normal.dot(ray.origin) + plane.constant) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}

/// Distance between a ray and a point, measured from the closest point on the ray
/// (clamped to the ray's start).
pub fn ray_point_distance(ray: &Ray, point: DVec3) -> f64 {
    let t = (point - ray.origin).dot(ray.direction).max(0.0);
    (ray.at(t) - point).length()
}

/// Minimum distance between a ray and a line segment.
pub fn ray_segment_distance(ray: &Ray, line_start: DVec3, line_end: DVec3) -> f64 {
    let u = ray.direction;
    let v = line_end - line_start;
    let w = ray.origin - line_start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);

    if c < 1e-12 {
        return ray_point_distance(ray, line_start);
    }

    let denom = a * c - b * b;

    let (sc, tc) = if denom < 1e-12 {
        // Nearly parallel
        (0.0, e / c)
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let tc = tc.clamp(0.0, 1.0);
    let sc = sc.max(0.0);

    let closest_ray = ray.origin + u * sc;
    let closest_line = line_start + v * tc;

    (closest_ray - closest_line).length()
}

// ── Pick results consumed from the rendering side ─────────────

/// Nearest vertex under the pointer, as reported by a point-cloud raycast
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexHit {
    pub object_id: ObjectId,
    pub index: u32,
}

/// Hit on the object's edge lines; only the world hit point is reliable
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeHit {
    pub object_id: ObjectId,
    pub point: [f64; 3],
}

/// Hit on a triangle of the object's surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceHit {
    pub object_id: ObjectId,
    pub corners: [u32; 3],
}

/// Everything the picker found under one pointer ray.
/// Candidates are tried in order vertex, edge, face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PickCandidates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertex: Option<VertexHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<EdgeHit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceHit>,
}

impl PickCandidates {
    pub fn vertex(object_id: ObjectId, index: u32) -> Self {
        Self {
            vertex: Some(VertexHit { object_id, index }),
            ..Default::default()
        }
    }

    pub fn edge(object_id: ObjectId, point: DVec3) -> Self {
        Self {
            edge: Some(EdgeHit {
                object_id,
                point: point.to_array(),
            }),
            ..Default::default()
        }
    }

    pub fn face(object_id: ObjectId, corners: [u32; 3]) -> Self {
        Self {
            face: Some(FaceHit { object_id, corners }),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex.is_none() && self.edge.is_none() && self.face.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_plane_hit() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 10.0), DVec3::NEG_Z);
        let plane = Plane::from_normal_and_point(DVec3::Z, DVec3::new(0.0, 0.0, 3.0));
        let hit = ray_plane(&ray, &plane).unwrap();
        assert!((hit - DVec3::new(1.0, 2.0, 3.0)).length() < 1e-12);
    }

    #[test]
    fn test_ray_plane_parallel_misses() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let plane = Plane::from_normal_and_point(DVec3::Y, DVec3::new(0.0, 1.0, 0.0));
        assert!(ray_plane(&ray, &plane).is_none());
    }

    #[test]
    fn test_ray_plane_behind_origin_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Z);
        let plane = Plane::from_normal_and_point(DVec3::Z, DVec3::ZERO);
        assert!(ray_plane(&ray, &plane).is_none());
    }

    #[test]
    fn test_ray_segment_distance() {
        let ray = Ray::new(DVec3::new(0.5, 1.0, 10.0), DVec3::NEG_Z);
        let d = ray_segment_distance(&ray, DVec3::ZERO, DVec3::X);
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[DVec3::new(-1.0, 0.0, 2.0), DVec3::new(3.0, -2.0, 0.0)]);
        assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(3.0, 0.0, 2.0));
        assert_eq!(aabb.center(), DVec3::new(1.0, -1.0, 1.0));
        assert!(Aabb::from_points(&[]).is_empty());
    }

    #[test]
    fn test_pick_candidates_serde() {
        let json = r#"{"vertex": {"object_id": 1, "index": 4}}"#;
        let pick: PickCandidates = serde_json::from_str(json).unwrap();
        assert_eq!(pick, PickCandidates::vertex(1, 4));
        assert!(!pick.is_empty());
        assert!(PickCandidates::default().is_empty());
    }
}
