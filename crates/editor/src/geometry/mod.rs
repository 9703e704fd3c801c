//! Geometry store: per-object vertex buffers and their derived data.

pub mod grouping;
pub mod primitives;

use glam::DVec3;

use crate::viewport::picking::Aabb;

/// Bounding sphere derived from the bounds center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f64,
}

/// Mutable vertex buffer of one object, in object-local space.
///
/// The vertex count never changes after construction; edits only move
/// positions. Normals, bounds and the bounding sphere are recomputed after
/// every mutation.
#[derive(Clone, Debug)]
pub struct GeometryBuffer {
    positions: Vec<DVec3>,
    /// Triangle list (3 indices per triangle)
    indices: Vec<u32>,
    normals: Vec<DVec3>,
    bounds: Aabb,
    sphere: BoundingSphere,
}

impl GeometryBuffer {
    pub fn new(positions: Vec<DVec3>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            normals: vec![DVec3::Y; positions.len()],
            bounds: Aabb::from_points(&positions),
            sphere: BoundingSphere {
                center: DVec3::ZERO,
                radius: 0.0,
            },
            positions,
            indices,
        };
        geometry.recompute_derived();
        geometry
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.sphere
    }

    /// Position of vertex `index`, if it exists
    pub fn position(&self, index: u32) -> Option<DVec3> {
        self.positions.get(index as usize).copied()
    }

    /// Mean local position of the given vertices (out-of-range indices are skipped)
    pub fn centroid(&self, indices: &[u32]) -> DVec3 {
        let mut sum = DVec3::ZERO;
        let mut count = 0usize;
        for p in indices.iter().filter_map(|&i| self.position(i)) {
            sum += p;
            count += 1;
        }
        sum / count.max(1) as f64
    }

    /// Full copy of the positions
    pub fn snapshot(&self) -> Vec<DVec3> {
        self.positions.clone()
    }

    /// Overwrite all positions from a snapshot of the same length.
    /// Returns false (and changes nothing) on a length mismatch.
    pub fn restore(&mut self, snapshot: &[DVec3]) -> bool {
        if snapshot.len() != self.positions.len() {
            tracing::debug!(
                expected = self.positions.len(),
                got = snapshot.len(),
                "snapshot length mismatch, restore skipped"
            );
            return false;
        }
        self.positions.copy_from_slice(snapshot);
        self.recompute_derived();
        true
    }

    /// Add `delta` to every listed vertex, then recompute derived data.
    /// Out-of-range indices are ignored.
    pub fn translate_vertices(&mut self, indices: &[u32], delta: DVec3) {
        for &i in indices {
            if let Some(p) = self.positions.get_mut(i as usize) {
                *p += delta;
            }
        }
        self.recompute_derived();
    }

    /// Positions as plain arrays (for history records)
    pub fn to_arrays(&self) -> Vec<[f64; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }

    /// Overwrite positions from plain arrays. Same length rule as [`restore`](Self::restore).
    pub fn restore_arrays(&mut self, arrays: &[[f64; 3]]) -> bool {
        let snapshot: Vec<DVec3> = arrays.iter().map(|a| DVec3::from_array(*a)).collect();
        self.restore(&snapshot)
    }

    /// Recompute area-weighted vertex normals, bounds and bounding sphere.
    pub fn recompute_derived(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };
            // Cross product length is twice the triangle area
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for n in &mut normals {
            let unit = n.normalize_or_zero();
            *n = if unit == DVec3::ZERO { DVec3::Y } else { unit };
        }
        self.normals = normals;

        self.bounds = Aabb::from_points(&self.positions);
        let center = self.bounds.center();
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max);
        self.sphere = BoundingSphere { center, radius };
    }
}
