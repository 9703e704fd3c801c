//! Undo/redo functionality

use glam::DVec3;
use shared::{Action, ObjectId};

use super::SceneState;

/// Undo and redo histories of recorded actions.
///
/// Entries that reference objects which no longer exist are kept: replaying
/// them is a no-op, and a later replay may bring the object back.
#[derive(Debug)]
pub struct CommandStack {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    /// Maximum undo entries (0 = unbounded)
    limit: usize,
}

impl CommandStack {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record a new action. Clears the redo history.
    pub fn push(&mut self, action: Action) {
        tracing::info!(kind = action.label(), objects = ?action.object_ids(), "history push");
        self.undo_stack.push(action);
        self.redo_stack.clear();
        if self.limit > 0 && self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Move the newest undo entry to the redo history and return it for inverse replay
    pub fn undo(&mut self) -> Option<&Action> {
        let action = self.undo_stack.pop()?;
        self.redo_stack.push(action);
        self.redo_stack.last()
    }

    /// Move the newest redo entry back to the undo history and return it for forward replay
    pub fn redo(&mut self) -> Option<&Action> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action);
        self.undo_stack.last()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo entries, oldest first
    pub fn undo_entries(&self) -> &[Action] {
        &self.undo_stack
    }

    /// Redo entries, the next one to redo last
    pub fn redo_entries(&self) -> &[Action] {
        &self.redo_stack
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Side effects of a replay that the session must reconcile
#[derive(Debug, Default, PartialEq)]
pub struct ReplayOutcome {
    /// Objects removed by the replay
    pub removed: Vec<ObjectId>,
    /// The replay always ends with nothing selected
    pub deselect_all: bool,
}

impl SceneState {
    /// Replay an action forward. Missing objects are skipped silently.
    pub fn apply_forward(&mut self, action: &Action) -> ReplayOutcome {
        let mut outcome = ReplayOutcome::default();
        match action {
            Action::Add { items } => {
                for item in items {
                    self.insert_record(item);
                }
            }
            Action::Delete { items } => {
                for item in items {
                    if self.remove_object(item.id).is_some() {
                        outcome.removed.push(item.id);
                    }
                }
                outcome.deselect_all = true;
            }
            Action::Transform {
                object_id, after, ..
            } => {
                self.set_pose(*object_id, (*after).into());
            }
            Action::SubEdit {
                object_id,
                indices,
                delta,
            } => {
                self.translate_vertices(*object_id, indices, DVec3::from_array(*delta));
            }
        }
        outcome
    }

    /// Replay the inverse of an action. Missing objects are skipped silently.
    pub fn apply_inverse(&mut self, action: &Action) -> ReplayOutcome {
        let mut outcome = ReplayOutcome::default();
        match action {
            Action::Add { items } => {
                for item in items {
                    if self.remove_object(item.id).is_some() {
                        outcome.removed.push(item.id);
                    }
                }
            }
            Action::Delete { items } => {
                for item in items {
                    self.insert_record(item);
                }
            }
            Action::Transform {
                object_id, before, ..
            } => {
                self.set_pose(*object_id, (*before).into());
            }
            Action::SubEdit {
                object_id,
                indices,
                delta,
            } => {
                self.translate_vertices(*object_id, indices, -DVec3::from_array(*delta));
            }
        }
        outcome
    }
}
