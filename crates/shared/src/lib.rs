//! Serializable types shared by the editor core and any history consumer.
//!
//! `Action` is the stable contract of the undo/redo history: if history were
//! ever persisted or sent over a wire, this is the shape that would be written.

use serde::{Deserialize, Serialize};

/// Unique object identifier, assigned monotonically by the scene
pub type ObjectId = u64;

/// Primitive kind an object was instantiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Box,
    Sphere,
}

impl PrimitiveKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "Box",
            PrimitiveKind::Sphere => "Sphere",
        }
    }
}

/// Rigid pose of an object: position, orientation quaternion `[x, y, z, w]`, scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: [f64; 3],
    pub rotation: [f64; 4],
    pub scale: [f64; 3],
}

impl Pose {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Identity pose translated to `position`
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to re-instantiate an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub primitive: PrimitiveKind,
    pub pose: Pose,
    /// Local vertex positions at the time of recording. `None` means the
    /// pristine primitive geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<[f64; 3]>>,
}

/// A reversible, replayable edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Objects were created
    Add { items: Vec<ObjectRecord> },
    /// Objects were removed
    Delete { items: Vec<ObjectRecord> },
    /// Rigid pose change of one object
    Transform {
        object_id: ObjectId,
        before: Pose,
        after: Pose,
    },
    /// Local displacement applied to a set of vertex indices
    SubEdit {
        object_id: ObjectId,
        indices: Vec<u32>,
        delta: [f64; 3],
    },
}

impl Action {
    /// Object ids this action refers to
    pub fn object_ids(&self) -> Vec<ObjectId> {
        match self {
            Action::Add { items } | Action::Delete { items } => {
                items.iter().map(|item| item.id).collect()
            }
            Action::Transform { object_id, .. } | Action::SubEdit { object_id, .. } => {
                vec![*object_id]
            }
        }
    }

    /// Short human-readable label (for logs and status display)
    pub fn label(&self) -> &'static str {
        match self {
            Action::Add { .. } => "Add",
            Action::Delete { .. } => "Delete",
            Action::Transform { .. } => "Transform",
            Action::SubEdit { .. } => "Edit Vertices",
        }
    }
}

/// Coordinate basis for axis constraints and gizmo handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceFrame {
    #[default]
    World,
    Local,
}

/// Editor interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Translate,
    Rotate,
    Scale,
    /// Sub-component (vertex/edge/face) editing
    Select,
}

impl EditMode {
    /// Whether the mode manipulates the whole object
    pub fn is_object_mode(&self) -> bool {
        !matches!(self, EditMode::Select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_edit_shape() {
        let action = Action::SubEdit {
            object_id: 3,
            indices: vec![0, 5, 9],
            delta: [0.5, 0.0, -1.0],
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "sub_edit");
        assert_eq!(json["object_id"], 3);
        assert_eq!(json["indices"], serde_json::json!([0, 5, 9]));
        assert_eq!(json["delta"], serde_json::json!([0.5, 0.0, -1.0]));
    }

    #[test]
    fn test_transform_shape() {
        let action = Action::Transform {
            object_id: 1,
            before: Pose::new(),
            after: Pose::at([1.0, 2.0, 3.0]),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "transform");
        assert_eq!(json["after"]["position"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["before"]["rotation"], serde_json::json!([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_record_without_positions_omits_field() {
        let action = Action::Add {
            items: vec![ObjectRecord {
                id: 7,
                primitive: PrimitiveKind::Box,
                pose: Pose::new(),
                positions: None,
            }],
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(!json.contains("positions"));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_object_ids() {
        let action = Action::Delete {
            items: vec![
                ObjectRecord {
                    id: 2,
                    primitive: PrimitiveKind::Box,
                    pose: Pose::new(),
                    positions: None,
                },
                ObjectRecord {
                    id: 4,
                    primitive: PrimitiveKind::Sphere,
                    pose: Pose::new(),
                    positions: None,
                },
            ],
        };
        assert_eq!(action.object_ids(), vec![2, 4]);
        assert_eq!(action.label(), "Delete");
    }

    #[test]
    fn test_mode_and_frame_serde() {
        assert_eq!(serde_json::to_string(&EditMode::Select).unwrap(), "\"select\"");
        assert_eq!(
            serde_json::from_str::<ReferenceFrame>("\"local\"").unwrap(),
            ReferenceFrame::Local
        );
        assert!(EditMode::Translate.is_object_mode());
        assert!(!EditMode::Select.is_object_mode());
    }
}
