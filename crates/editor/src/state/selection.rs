use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::geometry::grouping::{group_for, quantize, GroupKey};
use crate::geometry::GeometryBuffer;
use crate::state::settings::GroupingSettings;

/// Kind of sub-component a selection item was picked as
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubKind {
    Vertex,
    Edge,
    Face,
}

/// Identity of a selection item. Re-picking an item with the same key deselects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Vertex(GroupKey),
    /// Sorted vertex index pair
    Edge([u32; 2]),
    /// Sorted triangle corner indices
    Face([u32; 3]),
}

/// A pick already routed to a sub-component kind, in object-local terms
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubPick {
    /// Vertex index under the pointer
    Vertex(u32),
    /// Local-space hit point on an edge line
    Edge(DVec3),
    /// Triangle corner indices
    Face([u32; 3]),
}

/// Grouping and multi-select policy applied to a pick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickPolicy {
    pub explode: bool,
    pub multi_select: bool,
}

/// Which sub-component kinds respond to picks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubComponentFlags {
    pub vertices: bool,
    pub edges: bool,
    pub faces: bool,
}

impl Default for SubComponentFlags {
    fn default() -> Self {
        Self {
            vertices: true,
            edges: false,
            faces: false,
        }
    }
}

/// One selected vertex group, edge or face
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionItem {
    pub kind: SubKind,
    pub key: SelectionKey,
    pub indices: Vec<u32>,
    /// Mean local position of the members. Moved along with drags and
    /// resynchronized from geometry once an edit settles.
    pub centroid: DVec3,
}

/// Ordered sub-component selection of the active object
#[derive(Clone, Debug, Default)]
pub struct SubSelection {
    items: Vec<SelectionItem>,
    /// Version counter for selection changes (for cache invalidation)
    pub version: u64,
}

impl SubSelection {
    pub fn items(&self) -> &[SelectionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.items.iter().any(|item| item.key == *key)
    }

    /// Remove every item
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.version += 1;
        }
    }

    /// Resolve `pick` into an item and toggle it.
    ///
    /// An item with the same key is removed; otherwise the new item is
    /// appended, after clearing the set when multi-select is off.
    /// Returns whether the set changed.
    pub fn toggle_pick(
        &mut self,
        pick: SubPick,
        geometry: &GeometryBuffer,
        policy: PickPolicy,
        grouping: &GroupingSettings,
    ) -> bool {
        let Some(item) = resolve_pick(pick, geometry, policy.explode, grouping) else {
            tracing::debug!(?pick, "pick does not resolve to a sub-component");
            return false;
        };

        if let Some(pos) = self.items.iter().position(|s| s.key == item.key) {
            self.items.remove(pos);
        } else {
            if !policy.multi_select {
                self.items.clear();
            }
            self.items.push(item);
        }
        self.version += 1;
        true
    }

    /// Deduplicated union of member indices, in order of first appearance
    pub fn unique_indices(&self) -> Vec<u32> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .flat_map(|item| item.indices.iter().copied())
            .filter(|i| seen.insert(*i))
            .collect()
    }

    /// Shift every cached centroid by a local delta
    pub fn translate_centroids(&mut self, delta: DVec3) {
        for item in &mut self.items {
            item.centroid += delta;
        }
    }

    /// Recompute cached centroids from the current geometry.
    ///
    /// Merged vertex items also take the position key of where their members
    /// are now, so re-picking a moved group still toggles it off.
    pub fn resync_centroids(&mut self, geometry: &GeometryBuffer, tolerance: f64) {
        for item in &mut self.items {
            item.centroid = geometry.centroid(&item.indices);
            if let SelectionKey::Vertex(GroupKey::Position(_)) = item.key {
                if let Some(p) = item.indices.first().and_then(|&i| geometry.position(i)) {
                    item.key = SelectionKey::Vertex(GroupKey::Position(quantize(p, tolerance)));
                }
            }
        }
        if !self.items.is_empty() {
            self.version += 1;
        }
    }

    /// Mean of the item centroids in world space; `None` when empty
    pub fn world_center(&self, local_to_world: &DMat4) -> Option<DVec3> {
        if self.items.is_empty() {
            return None;
        }
        let sum: DVec3 = self
            .items
            .iter()
            .map(|item| local_to_world.transform_point3(item.centroid))
            .sum();
        Some(sum / self.items.len() as f64)
    }
}

fn resolve_pick(
    pick: SubPick,
    geometry: &GeometryBuffer,
    explode: bool,
    grouping: &GroupingSettings,
) -> Option<SelectionItem> {
    let (kind, key, indices) = match pick {
        SubPick::Vertex(index) => {
            geometry.position(index)?;
            let group = group_for(geometry, index, explode, grouping);
            (SubKind::Vertex, SelectionKey::Vertex(group.key), group.indices)
        }
        SubPick::Edge(local_point) => {
            let [a, b] = nearest_edge(geometry, local_point, grouping.tolerance)?;
            let pair = [a.min(b), a.max(b)];
            (SubKind::Edge, SelectionKey::Edge(pair), pair.to_vec())
        }
        SubPick::Face(corners) => {
            if corners.iter().any(|&i| geometry.position(i).is_none()) {
                return None;
            }
            let mut sorted = corners;
            sorted.sort_unstable();
            (SubKind::Face, SelectionKey::Face(sorted), corners.to_vec())
        }
    };

    Some(SelectionItem {
        kind,
        key,
        centroid: geometry.centroid(&indices),
        indices,
    })
}

/// Approximate the edge under a hit point by its two nearest vertices.
///
/// The second vertex is the nearest one at a different position than the
/// first, so duplicated corners don't collapse the edge to a point. When every
/// other vertex coincides with the first, the nearest other index is used.
fn nearest_edge(geometry: &GeometryBuffer, point: DVec3, tolerance: f64) -> Option<[u32; 2]> {
    let positions = geometry.positions();
    let first = nearest_where(positions, point, |_, _| true)?;
    let first_key = quantize(positions[first], tolerance);

    let second = nearest_where(positions, point, |i, p| {
        i != first && quantize(p, tolerance) != first_key
    })
    .or_else(|| nearest_where(positions, point, |i, _| i != first))?;

    Some([first as u32, second as u32])
}

fn nearest_where(
    positions: &[DVec3],
    point: DVec3,
    accept: impl Fn(usize, DVec3) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in positions.iter().enumerate() {
        if !accept(i, *p) {
            continue;
        }
        let d = p.distance_squared(point);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::cube;

    const SINGLE: PickPolicy = PickPolicy {
        explode: false,
        multi_select: false,
    };
    const MULTI: PickPolicy = PickPolicy {
        explode: false,
        multi_select: true,
    };

    fn grouping() -> GroupingSettings {
        GroupingSettings::default()
    }

    #[test]
    fn test_initial_empty() {
        let s = SubSelection::default();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert!(s.world_center(&DMat4::IDENTITY).is_none());
    }

    #[test]
    fn test_vertex_pick_selects_merge_group() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        assert!(s.toggle_pick(SubPick::Vertex(0), &g, SINGLE, &grouping()));
        assert_eq!(s.len(), 1);
        assert_eq!(s.items()[0].kind, SubKind::Vertex);
        assert_eq!(s.items()[0].indices.len(), 3);
        let corner = g.position(0).unwrap();
        assert!((s.items()[0].centroid - corner).length() < 1e-12);
    }

    #[test]
    fn test_repick_same_group_deselects() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Vertex(0), &g, MULTI, &grouping());
        let other = s.items()[0].indices[1];
        assert!(s.toggle_pick(SubPick::Vertex(other), &g, MULTI, &grouping()));
        assert!(s.is_empty());
    }

    #[test]
    fn test_single_select_replaces() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Vertex(0), &g, SINGLE, &grouping());
        s.toggle_pick(SubPick::Vertex(2), &g, SINGLE, &grouping());
        assert_eq!(s.len(), 1);
        assert!(s.items()[0].indices.contains(&2));
    }

    #[test]
    fn test_multi_select_appends_in_order() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Vertex(0), &g, MULTI, &grouping());
        s.toggle_pick(SubPick::Vertex(2), &g, MULTI, &grouping());
        assert_eq!(s.len(), 2);
        assert!(s.items()[0].indices.contains(&0));
        assert!(s.items()[1].indices.contains(&2));
    }

    #[test]
    fn test_explode_selects_single_index() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        let policy = PickPolicy {
            explode: true,
            multi_select: false,
        };
        s.toggle_pick(SubPick::Vertex(0), &g, policy, &grouping());
        assert_eq!(s.items()[0].indices, vec![0]);
    }

    #[test]
    fn test_missing_vertex_is_noop() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        assert!(!s.toggle_pick(SubPick::Vertex(100), &g, SINGLE, &grouping()));
        assert_eq!(s.version, 0);
    }

    #[test]
    fn test_face_key_is_order_independent() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Face([0, 1, 2]), &g, MULTI, &grouping());
        assert_eq!(s.items()[0].key, SelectionKey::Face([0, 1, 2]));
        assert!(s.toggle_pick(SubPick::Face([2, 0, 1]), &g, MULTI, &grouping()));
        assert!(s.is_empty());
    }

    #[test]
    fn test_edge_pick_spans_two_positions() {
        let g = cube(2.0);
        let mut s = SubSelection::default();
        // Midpoint of the bottom-front edge, nudged toward the +X end
        let hit = DVec3::new(0.2, -1.0, 1.0);
        assert!(s.toggle_pick(SubPick::Edge(hit), &g, SINGLE, &grouping()));
        let item = &s.items()[0];
        assert_eq!(item.kind, SubKind::Edge);
        let a = g.position(item.indices[0]).unwrap();
        let b = g.position(item.indices[1]).unwrap();
        assert!(a.distance(b) > 1.0);
        assert!((item.centroid - DVec3::new(0.0, -1.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_unique_indices_dedupes() {
        let g = cube(1.5);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Face([0, 1, 2]), &g, MULTI, &grouping());
        s.toggle_pick(SubPick::Face([0, 2, 3]), &g, MULTI, &grouping());
        assert_eq!(s.unique_indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_world_center_uses_transform() {
        let g = cube(2.0);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Face([0, 1, 2]), &g, SINGLE, &grouping());
        let local = s.items()[0].centroid;
        let m = DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0));
        let center = s.world_center(&m).unwrap();
        assert!((center - (local + DVec3::new(10.0, 0.0, 0.0))).length() < 1e-12);
    }

    #[test]
    fn test_translate_then_resync_centroids() {
        let mut g = cube(2.0);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Vertex(0), &g, SINGLE, &grouping());
        let start = s.items()[0].centroid;
        let delta = DVec3::new(0.0, 0.5, 0.0);
        s.translate_centroids(delta);
        g.translate_vertices(&s.unique_indices(), delta);
        let moved = s.items()[0].centroid;
        s.resync_centroids(&g, grouping().tolerance);
        assert!((s.items()[0].centroid - moved).length() < 1e-12);
        assert!((moved - start - delta).length() < 1e-12);
    }

    #[test]
    fn test_resync_rekeys_moved_vertex_group() {
        let mut g = cube(2.0);
        let mut s = SubSelection::default();
        s.toggle_pick(SubPick::Vertex(0), &g, MULTI, &grouping());
        g.translate_vertices(&s.unique_indices(), DVec3::new(0.0, 0.5, 0.0));
        s.resync_centroids(&g, grouping().tolerance);

        assert!(s.toggle_pick(SubPick::Vertex(0), &g, MULTI, &grouping()));
        assert!(s.is_empty());
    }
}
