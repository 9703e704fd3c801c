//! Headless test harness for programmatic editing.
//!
//! Wraps an `EditorSession` with shortcuts for the sequences a pointer-driven
//! UI would produce: picks by index, drags through world points, and geometry
//! inspection.

use glam::DVec3;
use shared::{EditMode, ObjectId, PrimitiveKind};

use crate::fixtures::ray_through;
use crate::state::settings::EditorSettings;
use crate::state::EditorSession;
use crate::validation::GeometryValidator;
use crate::viewport::camera::CameraView;
use crate::viewport::gizmo::GizmoHandle;
use crate::viewport::picking::{PickCandidates, Ray};

/// Headless test harness: one session plus pointer helpers
pub struct TestHarness {
    pub session: EditorSession,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            session: EditorSession::new(settings),
        }
    }

    // ── Objects ───────────────────────────────────────────────

    /// Spawn a box and return its id (it becomes active)
    pub fn spawn_box(&mut self) -> ObjectId {
        self.session.spawn(PrimitiveKind::Box)
    }

    /// Spawn a sphere and return its id (it becomes active)
    pub fn spawn_sphere(&mut self) -> ObjectId {
        self.session.spawn(PrimitiveKind::Sphere)
    }

    pub fn object_count(&self) -> usize {
        self.session.scene().object_count()
    }

    /// Local positions of an object's geometry (empty if missing)
    pub fn positions(&self, id: ObjectId) -> Vec<DVec3> {
        self.session
            .scene()
            .get(id)
            .map(|o| o.geometry.snapshot())
            .unwrap_or_default()
    }

    /// World position of an object's origin
    pub fn object_position(&self, id: ObjectId) -> Option<DVec3> {
        self.session.scene().get(id).map(|o| o.pose.position)
    }

    /// Run geometry validation on an object. A missing object is an error.
    pub fn validate(&self, id: ObjectId) -> Vec<String> {
        match self.session.scene().get(id) {
            Some(object) => GeometryValidator::new(&object.geometry).validate_all(),
            None => vec![format!("Object {id} not found")],
        }
    }

    // ── Modes ─────────────────────────────────────────────────

    /// Enter sub-component mode
    pub fn enter_select_mode(&mut self) {
        self.session.set_mode(EditMode::Select);
    }

    pub fn set_camera(&mut self, camera: CameraView) {
        self.session.set_camera(camera);
    }

    // ── Picking ───────────────────────────────────────────────

    /// Pick a vertex of the active object
    pub fn pick_vertex(&mut self, index: u32) -> bool {
        let Some(id) = self.session.active_object() else {
            return false;
        };
        self.session.pick(&PickCandidates::vertex(id, index))
    }

    /// Pick the edge under a world-space hit point on the active object
    pub fn pick_edge(&mut self, world_point: DVec3) -> bool {
        let Some(id) = self.session.active_object() else {
            return false;
        };
        self.session.pick(&PickCandidates::edge(id, world_point))
    }

    /// Pick a triangle of the active object
    pub fn pick_face(&mut self, corners: [u32; 3]) -> bool {
        let Some(id) = self.session.active_object() else {
            return false;
        };
        self.session.pick(&PickCandidates::face(id, corners))
    }

    // ── Dragging ──────────────────────────────────────────────

    /// Pointer ray from the session camera through a world point
    pub fn ray_to(&self, point: DVec3) -> Ray {
        ray_through(self.session.camera(), point)
    }

    /// Press on `handle` with the pointer over the gizmo center, move through
    /// `offsets` (world displacements from that center), then release.
    /// Returns whether an action was committed.
    pub fn drag(&mut self, handle: GizmoHandle, offsets: &[DVec3]) -> bool {
        let Some(pose) = self.session.gizmo_pose() else {
            return false;
        };
        let start = pose.position;
        if !self.session.begin_drag(handle, &self.ray_to(start)) {
            return false;
        }
        for offset in offsets {
            let ray = self.ray_to(start + *offset);
            self.session.update_drag(&ray);
        }
        self.session.end_drag()
    }

    // ── History ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn undo_count(&self) -> usize {
        self.session.history().undo_entries().len()
    }

    pub fn redo_count(&self) -> usize {
        self.session.history().redo_entries().len()
    }

    /// Discard everything and start over with the same settings
    pub fn reset(&mut self) {
        self.session = EditorSession::new(self.session.settings.clone());
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
