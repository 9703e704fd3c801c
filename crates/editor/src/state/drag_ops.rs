//! Pointer drags on gizmo handles

use glam::DVec3;
use shared::{Action, EditMode, ObjectId};

use super::{Baseline, EditorSession};
use crate::viewport::drag::{ActiveDrag, DragTarget};
use crate::viewport::gizmo::GizmoHandle;
use crate::viewport::picking::Ray;

impl EditorSession {
    /// Press on a gizmo handle.
    ///
    /// Fails when a drag is already running, the gizmo is hidden, or the
    /// handle is not a draggable handle of the current gizmo.
    pub fn begin_drag(&mut self, handle: GizmoHandle, ray: &Ray) -> bool {
        if self.drag.is_active() {
            tracing::debug!("begin_drag while a drag is in flight");
            return false;
        }
        let Some(pose) = self.gizmo_pose() else {
            return false;
        };
        if !pose.draggable || !pose.handles.contains(&handle) {
            tracing::debug!(?handle, mode = ?self.mode, "handle is not draggable");
            return false;
        }
        let Some(id) = self.active else {
            return false;
        };
        let Some(object) = self.scene.get(id) else {
            return false;
        };

        let target = if self.mode == EditMode::Select {
            let indices = self.selection.unique_indices();
            if indices.is_empty() {
                return false;
            }
            if self.baseline.as_ref().is_none_or(|b| b.object_id != id) {
                self.baseline = Baseline::capture(&self.scene, id);
            }
            DragTarget::Vertices { id, indices }
        } else {
            DragTarget::Object {
                id,
                start_pose: object.pose,
            }
        };

        let axis = handle.axis().map(|a| pose.world_axis(a));
        self.drag.begin(
            target,
            handle,
            axis,
            &self.camera,
            pose.position,
            ray,
            self.settings.drag.degenerate_epsilon,
        );
        true
    }

    /// Move the pointer during a drag.
    ///
    /// Returns the distance from the anchor at drag start to the current
    /// anchor; 0 while idle.
    pub fn update_drag(&mut self, ray: &Ray) -> f64 {
        let Some(delta) = self.drag.update(ray) else {
            return self.drag.active().map_or(0.0, |d| d.total.length());
        };
        let Some(drag) = self.drag.active() else {
            return 0.0;
        };

        match &drag.target {
            DragTarget::Object { id, .. } => {
                self.scene.translate_object(*id, delta);
            }
            DragTarget::Vertices { id, indices } => {
                let Some(pose) = self.scene.get(*id).map(|o| o.pose) else {
                    return drag.total.length();
                };
                let local = pose.world_to_local_vector(delta);
                self.scene.translate_vertices(*id, indices, local);
                self.selection.translate_centroids(local);
            }
        }

        drag.total.length()
    }

    /// Release the pointer. Commits one action when the net displacement
    /// exceeds the commit threshold, otherwise restores the pre-drag state.
    /// Returns whether an action was recorded.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.finish() else {
            return false;
        };

        if drag.total.length() <= self.settings.drag.commit_epsilon {
            tracing::debug!(handle = ?drag.handle, "drag below commit threshold");
            self.restore_drag_start(&drag);
            return false;
        }

        let committed = match drag.target {
            DragTarget::Object { id, start_pose } => match self.scene.get(id) {
                Some(object) => {
                    self.history.push(Action::Transform {
                        object_id: id,
                        before: start_pose.into(),
                        after: object.pose.into(),
                    });
                    true
                }
                None => false,
            },
            DragTarget::Vertices { id, indices } => self.commit_vertex_drag(id, indices, drag.total),
        };

        self.rearm_baseline();
        self.resync_selection();
        committed
    }

    fn commit_vertex_drag(&mut self, id: ObjectId, indices: Vec<u32>, total: DVec3) -> bool {
        let Some(pose) = self.scene.get(id).map(|o| o.pose) else {
            return false;
        };
        let local_total = pose.world_to_local_vector(total);

        // Replace the incremental result with a single application of the
        // total so the geometry matches what replaying the action produces.
        if let Some(baseline) = self.baseline.as_ref().filter(|b| b.object_id == id) {
            if baseline.restore(&mut self.scene) {
                self.scene.translate_vertices(id, &indices, local_total);
            }
        }

        self.history.push(Action::SubEdit {
            object_id: id,
            indices,
            delta: local_total.to_array(),
        });
        true
    }

    /// Abort the drag (if any) and discard uncommitted sub-component edits
    pub fn cancel(&mut self) {
        if self.drag.is_active() {
            self.cancel_drag();
            return;
        }
        if self.mode == EditMode::Select {
            if let Some(baseline) = self.baseline.as_ref().filter(|b| Some(b.object_id) == self.active) {
                baseline.restore(&mut self.scene);
            }
            self.resync_selection();
        }
    }

    /// Stop an in-flight drag without recording it
    pub(super) fn cancel_drag(&mut self) {
        if let Some(drag) = self.drag.finish() {
            tracing::debug!(handle = ?drag.handle, "drag cancelled");
            self.restore_drag_start(&drag);
        }
    }

    fn restore_drag_start(&mut self, drag: &ActiveDrag) {
        match &drag.target {
            DragTarget::Object { id, start_pose } => {
                self.scene.set_pose(*id, *start_pose);
            }
            DragTarget::Vertices { id, .. } => {
                if let Some(baseline) = self.baseline.as_ref().filter(|b| b.object_id == *id) {
                    baseline.restore(&mut self.scene);
                }
                self.resync_selection();
            }
        }
    }
}
