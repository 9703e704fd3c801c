// Library crate: the editing core, exposed for integration tests and the
// script runner binary.

pub mod command;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod state;
pub mod validation;

/// Camera, picking primitives, gizmo resolution and drag math.
pub mod viewport {
    pub mod camera;
    pub mod drag;
    pub mod gizmo;
    pub mod picking;
}
