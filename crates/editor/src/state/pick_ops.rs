//! Sub-component picking on the active object

use glam::DVec3;
use shared::EditMode;

use super::selection::SubPick;
use super::{Baseline, EditorSession};
use crate::viewport::picking::PickCandidates;

impl EditorSession {
    /// Toggle the sub-component under the pointer.
    ///
    /// Candidates are tried vertex, edge, face, each only when its kind is
    /// enabled. Candidates on objects other than the active one are ignored.
    /// Returns whether the selection changed.
    pub fn pick(&mut self, candidates: &PickCandidates) -> bool {
        if self.mode != EditMode::Select {
            tracing::debug!(mode = ?self.mode, "sub-component pick outside select mode");
            return false;
        }
        if self.drag.is_active() {
            tracing::debug!("pick ignored during drag");
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let Some(object) = self.scene.get(active) else {
            return false;
        };

        let world_to_local = object.pose.local_to_world().inverse();
        let mut picks: Vec<SubPick> = Vec::with_capacity(3);
        if let Some(hit) = candidates.vertex.filter(|h| self.sub_flags.vertices && h.object_id == active) {
            picks.push(SubPick::Vertex(hit.index));
        }
        if let Some(hit) = candidates.edge.filter(|h| self.sub_flags.edges && h.object_id == active) {
            let local = world_to_local.transform_point3(DVec3::from_array(hit.point));
            if local.is_finite() {
                picks.push(SubPick::Edge(local));
            }
        }
        if let Some(hit) = candidates.face.filter(|h| self.sub_flags.faces && h.object_id == active) {
            picks.push(SubPick::Face(hit.corners));
        }

        if picks.is_empty() {
            tracing::debug!(active, "no enabled pick candidate on the active object");
            return false;
        }

        // Editing starts from whatever the geometry looks like now
        if self.baseline.as_ref().is_none_or(|b| b.object_id != active) {
            self.baseline = Baseline::capture(&self.scene, active);
        }

        let policy = self.pick_policy();
        for pick in picks {
            if self
                .selection
                .toggle_pick(pick, &object.geometry, policy, &self.settings.grouping)
            {
                return true;
            }
        }
        false
    }

    /// Empty the selection and take a fresh baseline from the current geometry
    pub fn clear_selection(&mut self) {
        self.cancel_drag();
        self.selection.clear();
        self.rearm_baseline();
    }
}
