//! Display helper functions for objects

use super::SceneObject;

/// Get display name for an object, e.g. `Box #3`
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} #{}", object.primitive.display_name(), object.id)
}
