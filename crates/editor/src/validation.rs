//! Geometry validation utilities.
//!
//! `GeometryValidator` checks a geometry buffer after edits: in-range indices,
//! finite positions, unit normals and derived bounds that agree with the
//! positions.

use glam::DVec3;

use crate::geometry::GeometryBuffer;
use crate::viewport::picking::Aabb;

/// Validator for `GeometryBuffer` integrity checks.
pub struct GeometryValidator<'a> {
    geometry: &'a GeometryBuffer,
}

impl<'a> GeometryValidator<'a> {
    pub fn new(geometry: &'a GeometryBuffer) -> Self {
        Self { geometry }
    }

    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.geometry.indices().len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.geometry.indices().iter().all(|&i| i < max_idx)
    }

    pub fn are_positions_finite(&self) -> bool {
        self.geometry.positions().iter().all(|p| p.is_finite())
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f64) -> bool {
        self.geometry
            .normals()
            .iter()
            .all(|n| (n.length() - 1.0).abs() <= epsilon)
    }

    /// Check that the cached bounds enclose exactly the current positions.
    pub fn are_bounds_current(&self, epsilon: f64) -> bool {
        let fresh = Aabb::from_points(self.geometry.positions());
        let cached = self.geometry.bounds();
        if fresh.is_empty() || cached.is_empty() {
            return fresh.is_empty() == cached.is_empty();
        }
        (fresh.min - cached.min).abs().max_element() <= epsilon
            && (fresh.max - cached.max).abs().max_element() <= epsilon
    }

    /// Dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> DVec3 {
        self.geometry.bounds().size()
    }

    /// Check that the bounding box dimensions are approximately `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f64; 3], tolerance: f64) -> bool {
        let dims = self.dimensions();
        (dims - DVec3::from_array(expected)).abs().max_element() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the geometry is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.geometry.indices().len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .geometry
                .indices()
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_positions_finite() {
            errors.push("Some positions are not finite".to_string());
        }

        if self.geometry.normals().len() != self.vertex_count() {
            errors.push(format!(
                "Normal count {} does not match vertex count {}",
                self.geometry.normals().len(),
                self.vertex_count()
            ));
        } else if self.vertex_count() > 0 && !self.are_normals_normalized(1e-6) {
            errors.push("Some normals are not unit-length (epsilon=1e-6)".to_string());
        }

        if !self.are_bounds_current(1e-9) {
            errors.push("Cached bounds do not match positions".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{cube, sphere};

    #[test]
    fn test_cube_is_valid() {
        let geometry = cube(1.5);
        let v = GeometryValidator::new(&geometry);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert_eq!(v.vertex_count(), 24);
        assert_eq!(v.triangle_count(), 12);
        assert!(v.assert_dimensions_approx([1.5, 1.5, 1.5], 1e-9));
    }

    #[test]
    fn test_sphere_is_valid() {
        let geometry = sphere(0.9, 16);
        let v = GeometryValidator::new(&geometry);
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
        assert!(v.assert_dimensions_approx([1.8, 1.8, 1.8], 1e-6));
    }

    #[test]
    fn test_edited_geometry_keeps_bounds_current() {
        let mut geometry = cube(1.0);
        geometry.translate_vertices(&[0, 1, 2, 3], DVec3::new(0.0, 2.0, 0.0));
        let v = GeometryValidator::new(&geometry);
        assert!(v.are_bounds_current(1e-12));
        assert!(v.validate_all().is_empty(), "{:?}", v.validate_all());
    }

    #[test]
    fn test_out_of_range_index_reported() {
        let geometry = GeometryBuffer::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![0, 1, 7]);
        let errors = GeometryValidator::new(&geometry).validate_all();
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }
}
