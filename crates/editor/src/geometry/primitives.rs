//! Primitive geometry needed to (re)instantiate objects

use glam::DVec3;
use shared::PrimitiveKind;

use super::GeometryBuffer;
use crate::state::settings::PrimitiveSettings;

/// Build the pristine geometry for a primitive kind
pub fn build_primitive(kind: PrimitiveKind, settings: &PrimitiveSettings) -> GeometryBuffer {
    match kind {
        PrimitiveKind::Box => cube(settings.box_size),
        PrimitiveKind::Sphere => sphere(settings.sphere_radius, settings.sphere_segments.max(3)),
    }
}

/// Axis-aligned cube centered at the origin. Four vertices per face, so every
/// corner position is shared by three vertices.
pub fn cube(size: f64) -> GeometryBuffer {
    let h = size * 0.5;

    let faces: [[DVec3; 4]; 6] = [
        // Front (+Z)
        [DVec3::new(-h, -h, h), DVec3::new(h, -h, h), DVec3::new(h, h, h), DVec3::new(-h, h, h)],
        // Back (-Z)
        [DVec3::new(h, -h, -h), DVec3::new(-h, -h, -h), DVec3::new(-h, h, -h), DVec3::new(h, h, -h)],
        // Right (+X)
        [DVec3::new(h, -h, h), DVec3::new(h, -h, -h), DVec3::new(h, h, -h), DVec3::new(h, h, h)],
        // Left (-X)
        [DVec3::new(-h, -h, -h), DVec3::new(-h, -h, h), DVec3::new(-h, h, h), DVec3::new(-h, h, -h)],
        // Top (+Y)
        [DVec3::new(-h, h, h), DVec3::new(h, h, h), DVec3::new(h, h, -h), DVec3::new(-h, h, -h)],
        // Bottom (-Y)
        [DVec3::new(-h, -h, -h), DVec3::new(h, -h, -h), DVec3::new(h, -h, h), DVec3::new(-h, -h, h)],
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for quad in &faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(quad);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    GeometryBuffer::new(positions, indices)
}

/// UV sphere with `segments` rings and sectors. The seam column and the pole
/// rows repeat positions.
pub fn sphere(radius: f64, segments: u32) -> GeometryBuffer {
    let rings = segments;
    let sectors = segments;
    let mut positions = Vec::with_capacity(((rings + 1) * (sectors + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * sectors * 6) as usize);

    for r in 0..=rings {
        let phi = std::f64::consts::PI * r as f64 / rings as f64;
        let (sp, cp) = phi.sin_cos();

        for s in 0..=sectors {
            let theta = std::f64::consts::TAU * s as f64 / sectors as f64;
            let (st, ct) = theta.sin_cos();
            positions.push(DVec3::new(sp * ct, cp, sp * st) * radius);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i1, i2, i1, i3, i2]);
        }
    }

    GeometryBuffer::new(positions, indices)
}
