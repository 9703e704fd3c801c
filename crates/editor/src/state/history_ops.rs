//! Undo/redo through the command stack

use super::scene::ReplayOutcome;
use super::EditorSession;

impl EditorSession {
    /// Undo the newest recorded action. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.cancel_drag();
        let Some(action) = self.history.undo() else {
            return false;
        };
        tracing::info!(kind = action.label(), "undo");
        let outcome = self.scene.apply_inverse(action);
        self.after_replay(outcome);
        true
    }

    /// Redo the newest undone action. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.cancel_drag();
        let Some(action) = self.history.redo() else {
            return false;
        };
        tracing::info!(kind = action.label(), "redo");
        let outcome = self.scene.apply_forward(action);
        self.after_replay(outcome);
        true
    }

    fn after_replay(&mut self, outcome: ReplayOutcome) {
        let active_removed = self.active.is_some_and(|id| outcome.removed.contains(&id));
        if active_removed {
            self.active = None;
        }
        if active_removed || outcome.deselect_all {
            self.selection.clear();
        }
        self.rearm_baseline();
        self.resync_selection();
    }
}

#[cfg(test)]
mod tests {
    use crate::state::EditorSession;
    use crate::viewport::picking::PickCandidates;
    use glam::DVec3;
    use shared::{EditMode, PrimitiveKind};

    #[test]
    fn test_undo_add_clears_active() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Box);
        session.set_mode(EditMode::Select);
        session.pick(&PickCandidates::vertex(id, 0));

        assert!(session.undo());
        assert!(!session.scene().contains(id));
        assert_eq!(session.active_object(), None);
        assert!(session.selection().is_empty());
        assert!(session.baseline().is_none());

        assert!(session.redo());
        assert!(session.scene().contains(id));
        assert!(!session.redo());
    }

    #[test]
    fn test_undo_delete_restores_edited_geometry() {
        let mut session = EditorSession::default();
        let id = session.spawn(PrimitiveKind::Box);
        session.set_transform_values([1.0, 0.0, 0.0]);
        let pose = session.scene().get(id).unwrap().pose;

        assert!(session.delete_active());
        assert!(session.undo());
        let restored = session.scene().get(id).unwrap();
        assert_eq!(restored.pose, pose);
        assert_eq!(restored.pose.position, DVec3::new(1.0, 0.0, 0.0));

        // Undo the transform too, on the re-inserted object
        assert!(session.undo());
        assert_eq!(
            session.scene().get(id).unwrap().pose.position,
            DVec3::new(0.0, 0.75, 0.0)
        );
    }

    #[test]
    fn test_empty_history() {
        let mut session = EditorSession::default();
        assert!(!session.undo());
        assert!(!session.redo());
    }
}
