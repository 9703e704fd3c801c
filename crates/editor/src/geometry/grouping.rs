//! Merge groups: vertex indices that share a local position.
//!
//! Groups are computed on demand with a full scan of the buffer and never
//! cached, so they always reflect the current positions. The scan is O(n) per
//! query, which is fine for the bounded primitive meshes this editor works on
//! and is the ceiling for anything larger.

use std::collections::HashMap;

use glam::DVec3;

use super::GeometryBuffer;
use crate::state::settings::GroupingSettings;

/// Identity of a vertex group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Quantized local position shared by every member
    Position([i64; 3]),
    /// Single vertex (explode mode)
    Index(u32),
}

/// A group of vertex indices edited as one unit
#[derive(Clone, Debug, PartialEq)]
pub struct VertexGroup {
    pub key: GroupKey,
    /// Member indices in ascending order
    pub indices: Vec<u32>,
}

/// Quantize a position to integer multiples of `tolerance` (rounded to nearest).
pub fn quantize(position: DVec3, tolerance: f64) -> [i64; 3] {
    let tolerance = effective_tolerance(tolerance);
    [
        (position.x / tolerance).round() as i64,
        (position.y / tolerance).round() as i64,
        (position.z / tolerance).round() as i64,
    ]
}

fn effective_tolerance(tolerance: f64) -> f64 {
    if tolerance > 0.0 && tolerance.is_finite() {
        tolerance
    } else {
        GroupingSettings::default().tolerance
    }
}

/// Resolve the group containing `index`.
///
/// In explode mode, or when `index` is out of range, the group is the single
/// index. Otherwise every vertex whose quantized position equals the query's
/// belongs to the group, the query included.
pub fn group_for(
    geometry: &GeometryBuffer,
    index: u32,
    explode: bool,
    settings: &GroupingSettings,
) -> VertexGroup {
    let singleton = VertexGroup {
        key: GroupKey::Index(index),
        indices: vec![index],
    };
    if explode {
        return singleton;
    }
    let Some(target) = geometry.position(index) else {
        tracing::debug!(index, "group query for missing vertex");
        return singleton;
    };

    if geometry.vertex_count() > settings.max_group_scan {
        tracing::debug!(
            vertices = geometry.vertex_count(),
            ceiling = settings.max_group_scan,
            "merge group scan exceeds the supported mesh size"
        );
    }

    let key = quantize(target, settings.tolerance);
    let indices = geometry
        .positions()
        .iter()
        .enumerate()
        .filter(|(_, p)| quantize(**p, settings.tolerance) == key)
        .map(|(i, _)| i as u32)
        .collect();

    VertexGroup {
        key: GroupKey::Position(key),
        indices,
    }
}

/// All merge groups of a buffer, ordered by the first index of each group.
pub fn merge_groups(geometry: &GeometryBuffer, tolerance: f64) -> Vec<VertexGroup> {
    let mut slots: HashMap<[i64; 3], usize> = HashMap::new();
    let mut groups: Vec<VertexGroup> = Vec::new();

    for (i, p) in geometry.positions().iter().enumerate() {
        let key = quantize(*p, tolerance);
        match slots.get(&key) {
            Some(&slot) => groups[slot].indices.push(i as u32),
            None => {
                slots.insert(key, groups.len());
                groups.push(VertexGroup {
                    key: GroupKey::Position(key),
                    indices: vec![i as u32],
                });
            }
        }
    }

    groups
}
