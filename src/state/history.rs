//! Undo/redo as a sequence of immutable snapshots.
//!
//! Snapshots pair the document with the layer selection, so undo restores
//! what the user was looking at when the change was made. Because a reducer
//! never mutates a snapshot in place, retaining old ones needs no copying
//! beyond the clone the reducer made anyway.

use serde::{Deserialize, Serialize};

use crate::error::InvariantError;
use crate::reducer::{application_reducer, Action, ReducerContext};
use crate::state::{ApplicationState, InteractionState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub document: crate::document::Document,
    pub selected_layer_ids: Vec<uuid::Uuid>,
}

impl Snapshot {
    fn of(state: &ApplicationState) -> Self {
        Self {
            document: state.document.clone(),
            selected_layer_ids: state.selected_layer_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    past: Vec<Snapshot>,
    pub present: ApplicationState,
    future: Vec<Snapshot>,
}

/// An action against the history wrapper: rewind, replay, or a plain
/// application action recorded when it changes the document.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    Undo,
    Redo,
    Apply(Action),
}

impl HistoryState {
    pub fn new(present: ApplicationState) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.present.document = snapshot.document;
        self.present.selected_layer_ids = snapshot.selected_layer_ids;
        self.present.interaction = InteractionState::None;
    }
}

/// Applies an action on top of the history, recording document changes.
///
/// In-progress gesture updates mutate the document continuously; only the
/// first change after the interaction returns to `None` starts a new
/// history entry, so a full drag is one undo step.
pub fn history_reducer(
    history: &HistoryState,
    action: &HistoryAction,
    ctx: &ReducerContext<'_>,
) -> Result<HistoryState, InvariantError> {
    let mut history = history.clone();

    match action {
        HistoryAction::Undo => {
            if let Some(snapshot) = history.past.pop() {
                history.future.push(Snapshot::of(&history.present));
                history.restore(snapshot);
            }
            Ok(history)
        }
        HistoryAction::Redo => {
            if let Some(snapshot) = history.future.pop() {
                history.past.push(Snapshot::of(&history.present));
                history.restore(snapshot);
            }
            Ok(history)
        }
        HistoryAction::Apply(action) => {
            let was_mid_gesture = history.present.interaction.is_gesture();
            let next = application_reducer(&history.present, action, ctx)?;

            if next.document != history.present.document && !was_mid_gesture {
                history.past.push(Snapshot::of(&history.present));
                history.future.clear();
            }

            history.present = next;
            Ok(history)
        }
    }
}
