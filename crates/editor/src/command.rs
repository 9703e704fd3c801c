//! JSON command protocol over an editing session.
//!
//! Each command maps onto one session operation; scripts are JSON arrays of
//! commands replayed in order.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use shared::{EditMode, ObjectId, PrimitiveKind, ReferenceFrame};

use crate::harness::TestHarness;
use crate::state::object_display_name;
use crate::state::selection::SubComponentFlags;
use crate::viewport::camera::{ArcBallCamera, CameraView};
use crate::viewport::gizmo::GizmoHandle;
use crate::viewport::picking::{EdgeHit, FaceHit, PickCandidates, VertexHit};

/// A command a script or agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Create an object at the spawn position and make it active
    Spawn { primitive: PrimitiveKind },
    /// Delete the active object
    DeleteActive,
    /// Switch the active object (`null` deactivates)
    SelectObject {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    SetMode { mode: EditMode },
    SetReferenceFrame { frame: ReferenceFrame },
    SetExplode { enabled: bool },
    SetMultiSelect { enabled: bool },
    SetSubFlags {
        #[serde(default = "default_true")]
        vertices: bool,
        #[serde(default)]
        edges: bool,
        #[serde(default)]
        faces: bool,
    },
    /// Place the camera at `position` looking at `target`
    SetCamera { position: [f64; 3], target: [f64; 3] },
    /// Orbit around `target`; angles in degrees
    OrbitCamera {
        yaw: f64,
        pitch: f64,
        distance: f64,
        #[serde(default)]
        target: [f64; 3],
    },
    /// Pick sub-components. Missing `object_id` means the active object.
    Pick {
        #[serde(default)]
        object_id: Option<ObjectId>,
        #[serde(default)]
        vertex: Option<u32>,
        /// World-space hit point on an edge line
        #[serde(default)]
        edge: Option<[f64; 3]>,
        #[serde(default)]
        face: Option<[u32; 3]>,
    },
    ClearSelection,
    /// Gizmo handle under the pointer when it is over a world point
    HandleAt { point: [f64; 3] },
    /// Press on a handle with the pointer over a world point
    BeginDrag { handle: GizmoHandle, point: [f64; 3] },
    /// Move the pointer over a world point
    UpdateDrag { point: [f64; 3] },
    EndDrag,
    /// Full drag: press at the gizmo center, move through offsets from it, release
    Drag {
        handle: GizmoHandle,
        offsets: Vec<[f64; 3]>,
    },
    Cancel,
    Undo,
    Redo,
    /// Numeric position, rotation (degrees) or scale, depending on the mode
    SetTransform { values: [f64; 3] },
    /// Inspect the scene: list all objects.
    Inspect,
    /// Current gizmo placement
    Gizmo,
    /// Undo history in its serialized form
    History,
    /// Start over with an empty session
    Reset,
}

fn default_true() -> bool {
    true
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: EditorCommand) -> CommandResponse {
    let session = &mut harness.session;
    match cmd {
        EditorCommand::Spawn { primitive } => {
            let id = session.spawn(primitive);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::DeleteActive => {
            let deleted = session.delete_active();
            CommandResponse::ok_with_data(serde_json::json!({ "deleted": deleted }))
        }

        EditorCommand::SelectObject { id } => {
            if session.select_object(id) {
                CommandResponse::ok_with_data(serde_json::json!({ "active": id }))
            } else {
                CommandResponse::err(format!("Object {} not found", id.unwrap_or_default()))
            }
        }

        EditorCommand::SetMode { mode } => {
            session.set_mode(mode);
            CommandResponse::ok()
        }

        EditorCommand::SetReferenceFrame { frame } => {
            session.set_reference_frame(frame);
            CommandResponse::ok()
        }

        EditorCommand::SetExplode { enabled } => {
            session.set_explode(enabled);
            CommandResponse::ok()
        }

        EditorCommand::SetMultiSelect { enabled } => {
            session.set_multi_select(enabled);
            CommandResponse::ok()
        }

        EditorCommand::SetSubFlags {
            vertices,
            edges,
            faces,
        } => {
            session.set_sub_flags(SubComponentFlags {
                vertices,
                edges,
                faces,
            });
            CommandResponse::ok()
        }

        EditorCommand::SetCamera { position, target } => {
            if position == target {
                return CommandResponse::err("Camera position and target coincide");
            }
            session.set_camera(CameraView::looking_at(
                DVec3::from_array(position),
                DVec3::from_array(target),
            ));
            CommandResponse::ok()
        }

        EditorCommand::OrbitCamera {
            yaw,
            pitch,
            distance,
            target,
        } => {
            let orbit = ArcBallCamera::from_degrees(yaw, pitch, distance, DVec3::from_array(target));
            let view = orbit.view();
            session.set_camera(view);
            CommandResponse::ok_with_data(serde_json::json!({
                "position": view.position.to_array(),
                "direction": view.direction.to_array(),
            }))
        }
        EditorCommand::Pick {
            object_id,
            vertex,
            edge,
            face,
        } => {
            let Some(object_id) = object_id.or(session.active_object()) else {
                return CommandResponse::err("No active object");
            };
            let candidates = PickCandidates {
                vertex: vertex.map(|index| VertexHit { object_id, index }),
                edge: edge.map(|point| EdgeHit { object_id, point }),
                face: face.map(|corners| FaceHit { object_id, corners }),
            };
            let changed = session.pick(&candidates);
            CommandResponse::ok_with_data(serde_json::json!({
                "changed": changed,
                "selected": session.selection().len(),
                "indices": session.selection().unique_indices(),
            }))
        }

        EditorCommand::ClearSelection => {
            session.clear_selection();
            CommandResponse::ok()
        }

        EditorCommand::HandleAt { point } => {
            let ray = harness.ray_to(DVec3::from_array(point));
            let handle = harness.session.handle_at(&ray);
            CommandResponse::ok_with_data(serde_json::json!({ "handle": handle }))
        }
        EditorCommand::BeginDrag { handle, point } => {
            let ray = harness.ray_to(DVec3::from_array(point));
            let started = harness.session.begin_drag(handle, &ray);
            CommandResponse::ok_with_data(serde_json::json!({ "started": started }))
        }

        EditorCommand::UpdateDrag { point } => {
            let ray = harness.ray_to(DVec3::from_array(point));
            let distance = harness.session.update_drag(&ray);
            CommandResponse::ok_with_data(serde_json::json!({ "distance": distance }))
        }

        EditorCommand::EndDrag => {
            let committed = session.end_drag();
            CommandResponse::ok_with_data(serde_json::json!({ "committed": committed }))
        }

        EditorCommand::Drag { handle, offsets } => {
            let offsets: Vec<DVec3> = offsets.into_iter().map(DVec3::from_array).collect();
            let committed = harness.drag(handle, &offsets);
            CommandResponse::ok_with_data(serde_json::json!({ "committed": committed }))
        }

        EditorCommand::Cancel => {
            session.cancel();
            CommandResponse::ok()
        }

        EditorCommand::Undo => {
            let success = session.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = session.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::SetTransform { values } => {
            let changed = session.set_transform_values(values);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::Inspect => {
            let objects: Vec<serde_json::Value> = session
                .scene()
                .objects()
                .iter()
                .map(|object| {
                    serde_json::json!({
                        "id": object.id,
                        "name": object_display_name(object),
                        "primitive": object.primitive,
                        "position": object.pose.position.to_array(),
                        "vertex_count": object.geometry.vertex_count(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "active": session.active_object(),
                "mode": session.mode(),
                "frame": session.reference_frame(),
                "selected": session.selection().len(),
                "can_undo": session.can_undo(),
                "can_redo": session.can_redo(),
            }))
        }

        EditorCommand::Gizmo => {
            let data = match session.gizmo_pose() {
                Some(pose) => serde_json::json!({
                    "visible": true,
                    "position": pose.position.to_array(),
                    "orientation": pose.orientation.to_array(),
                    "scale": pose.scale,
                    "handles": pose.handles,
                    "draggable": pose.draggable,
                }),
                None => serde_json::json!({ "visible": false }),
            };
            CommandResponse::ok_with_data(data)
        }

        EditorCommand::History => match serde_json::to_value(session.history().undo_entries()) {
            Ok(entries) => CommandResponse::ok_with_data(serde_json::json!({
                "undo": entries,
                "redo_count": session.history().redo_entries().len(),
            })),
            Err(e) => CommandResponse::err(format!("Failed to serialize history: {e}")),
        },

        EditorCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
