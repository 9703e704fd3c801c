pub mod baseline;
pub mod scene;
pub mod selection;
pub mod settings;

mod drag_ops;
mod history_ops;
mod lifecycle_ops;
mod pick_ops;

use glam::DVec3;
use shared::{EditMode, ObjectId, ReferenceFrame};

pub use baseline::Baseline;
pub use scene::{object_display_name, CommandStack, ObjectPose, SceneObject, SceneState};
use selection::PickPolicy;
pub use selection::{SubComponentFlags, SubSelection};
pub use settings::EditorSettings;

use crate::viewport::camera::CameraView;
use crate::viewport::drag::{DragController, DragPhase};
use crate::viewport::gizmo::{gizmo_hit_test, resolve_gizmo_pose, GizmoHandle, GizmoPose};
use crate::viewport::picking::Ray;

/// One editing session: the scene, what is selected in it, the in-flight
/// drag and the undo history.
pub struct EditorSession {
    pub settings: EditorSettings,
    scene: SceneState,
    selection: SubSelection,
    history: CommandStack,
    drag: DragController,
    baseline: Option<Baseline>,
    /// Object whose sub-components are edited and whose pose the gizmo shows
    active: Option<ObjectId>,
    mode: EditMode,
    frame: ReferenceFrame,
    explode: bool,
    multi_select: bool,
    sub_flags: SubComponentFlags,
    camera: CameraView,
}

impl EditorSession {
    pub fn new(settings: EditorSettings) -> Self {
        let sub_flags = SubComponentFlags {
            vertices: settings.selection.vertices,
            edges: settings.selection.edges,
            faces: settings.selection.faces,
        };
        Self {
            scene: SceneState::new(settings.primitives.clone()),
            selection: SubSelection::default(),
            history: CommandStack::new(settings.history.limit),
            drag: DragController::default(),
            baseline: None,
            active: None,
            mode: EditMode::default(),
            frame: ReferenceFrame::default(),
            explode: settings.selection.explode,
            multi_select: settings.selection.multi_select,
            sub_flags,
            camera: CameraView::default(),
            settings,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn selection(&self) -> &SubSelection {
        &self.selection
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn reference_frame(&self) -> ReferenceFrame {
        self.frame
    }

    pub fn explode(&self) -> bool {
        self.explode
    }

    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn sub_flags(&self) -> SubComponentFlags {
        self.sub_flags
    }

    pub fn camera(&self) -> &CameraView {
        &self.camera
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Settings toggles ──────────────────────────────────────

    /// Switch the edit mode. An in-flight drag is cancelled.
    pub fn set_mode(&mut self, mode: EditMode) {
        if self.mode == mode {
            return;
        }
        self.cancel_drag();
        self.mode = mode;
    }

    pub fn set_reference_frame(&mut self, frame: ReferenceFrame) {
        self.frame = frame;
    }

    /// Grouping policy for future vertex picks; existing items keep their members
    pub fn set_explode(&mut self, explode: bool) {
        self.explode = explode;
    }

    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.multi_select = multi_select;
    }

    pub fn set_sub_flags(&mut self, flags: SubComponentFlags) {
        self.sub_flags = flags;
    }

    /// Update the camera used for drag planes. Drags in flight keep their plane.
    pub fn set_camera(&mut self, camera: CameraView) {
        self.camera = camera;
    }

    // ── Gizmo ─────────────────────────────────────────────────

    /// Current gizmo placement, `None` when hidden
    pub fn gizmo_pose(&self) -> Option<GizmoPose> {
        let object = self.active.and_then(|id| self.scene.get(id));
        resolve_gizmo_pose(self.mode, &self.selection, object, self.frame, &self.settings.gizmo)
    }

    /// Handle under the pointer ray, if the gizmo is shown
    pub fn handle_at(&self, ray: &Ray) -> Option<GizmoHandle> {
        let pose = self.gizmo_pose()?;
        gizmo_hit_test(ray, &pose, &self.settings.gizmo)
    }

    /// World center of the sub-component selection on the active object
    pub fn selection_world_center(&self) -> Option<DVec3> {
        let object = self.scene.get(self.active?)?;
        self.selection.world_center(&object.pose.local_to_world())
    }

    // ── Internal helpers ──────────────────────────────────────

    fn pick_policy(&self) -> PickPolicy {
        PickPolicy {
            explode: self.explode,
            multi_select: self.multi_select,
        }
    }

    /// Snapshot the active object's geometry as the new baseline
    fn rearm_baseline(&mut self) {
        self.baseline = self.active.and_then(|id| Baseline::capture(&self.scene, id));
    }

    /// Recompute selection centroids from the active object's geometry
    fn resync_selection(&mut self) {
        if let Some(object) = self.active.and_then(|id| self.scene.get(id)) {
            self.selection
                .resync_centroids(&object.geometry, self.settings.grouping.tolerance);
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
