//! Editor settings

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Vertex grouping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingSettings {
    /// Positions closer than this (per quantized coordinate) share a merge group
    pub tolerance: f64,
    /// Above this vertex count a group scan is logged as over the complexity ceiling
    pub max_group_scan: usize,
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_group_scan: 65_536,
        }
    }
}

/// Sub-component selection policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Every vertex is its own group
    pub explode: bool,
    /// Picks add to the selection instead of replacing it
    pub multi_select: bool,
    /// Accept vertex picks
    pub vertices: bool,
    /// Accept edge picks
    pub edges: bool,
    /// Accept face picks
    pub faces: bool,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            explode: false,
            multi_select: false,
            vertices: true,
            edges: false,
            faces: false,
        }
    }
}

/// Drag commit thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Net displacements shorter than this are discarded on release
    pub commit_epsilon: f64,
    /// Squared length under which a cross product counts as degenerate
    pub degenerate_epsilon: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            commit_epsilon: 1e-6,
            degenerate_epsilon: 1e-8,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo entries kept
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 100 }
    }
}

/// Gizmo handle sizes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoSettings {
    /// Handle scale when manipulating whole objects
    pub object_scale: f64,
    /// Handle scale in sub-component mode
    pub sub_scale: f64,
    /// Axis handle length at scale 1
    pub arrow_length: f64,
    /// Free-move handle radius at scale 1
    pub free_handle_radius: f64,
    /// Max ray distance to an axis handle for a hit, at scale 1
    pub hit_threshold: f64,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            object_scale: 1.0,
            sub_scale: 0.5,
            arrow_length: 2.6,
            free_handle_radius: 0.3,
            hit_threshold: 0.15,
        }
    }
}

/// Primitive construction and spawn placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveSettings {
    /// Box edge length
    pub box_size: f64,
    /// Sphere radius
    pub sphere_radius: f64,
    /// Sphere rings and sectors
    pub sphere_segments: u32,
    /// Where new objects appear
    pub spawn_position: [f64; 3],
}

impl Default for PrimitiveSettings {
    fn default() -> Self {
        Self {
            box_size: 1.5,
            sphere_radius: 0.9,
            sphere_segments: 48,
            spawn_position: [0.0, 0.75, 0.0],
        }
    }
}

/// Limits for numeric transform entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            min_scale: 0.05,
            max_scale: 10.0,
        }
    }
}

/// All editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub grouping: GroupingSettings,
    pub selection: SelectionSettings,
    pub drag: DragSettings,
    pub history: HistorySettings,
    pub gizmo: GizmoSettings,
    pub primitives: PrimitiveSettings,
    pub transform: TransformSettings,
}

impl EditorSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "vcad", "vcad-editor")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring settings file: {e}"),
                }
            }
        }
        Self::default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }

    /// Save settings to the user config directory
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Err(e) = self.save_to(&path) {
                tracing::error!("{e}");
            }
        }
    }

    /// Save settings to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EditorSettings::default();
        assert_eq!(s.grouping.tolerance, 1e-4);
        assert!(!s.selection.explode);
        assert!(!s.selection.multi_select);
        assert!(s.selection.vertices);
        assert_eq!(s.history.limit, 100);
        assert_eq!(s.gizmo.sub_scale, 0.5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = EditorSettings::from_json(r#"{"selection": {"multi_select": true}}"#).unwrap();
        assert!(s.selection.multi_select);
        assert!(s.selection.vertices);
        assert_eq!(s.primitives.box_size, 1.5);
    }

    #[test]
    fn test_invalid_json() {
        let err = EditorSettings::from_json("{nope").unwrap_err();
        assert!(err.contains("Invalid settings JSON"));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("vcad-editor-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let mut s = EditorSettings::default();
        s.history.limit = 7;
        s.save_to(&path).unwrap();

        let loaded = EditorSettings::load_from(&path).unwrap();
        assert_eq!(loaded.history.limit, 7);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = EditorSettings::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }
}
