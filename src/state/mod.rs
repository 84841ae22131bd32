//! Application state: the current document plus everything the editor
//! tracks around it (selection, in-progress gesture, per-page viewport).

pub mod history;
pub mod interaction;

pub use history::HistoryState;
pub use interaction::{
    interaction_reducer, CompassDirection, InteractionAction, InteractionState, ShapeType,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Document, Page};
use crate::geometry::Point;

/// Per-page viewport state. Not part of the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub scroll_origin: Point,
    pub zoom: f64,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            scroll_origin: Point::ZERO,
            zoom: 1.0,
        }
    }
}

/// Modifier keys that alter gesture geometry. `shift` constrains
/// proportions; `alt` mirrors drawing/scaling about the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModifiers {
    pub shift: bool,
    pub alt: bool,
}

/// Which control handle of a curve point is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlHandle {
    CurveFrom,
    CurveTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedControlPoint {
    pub layer_id: Uuid,
    pub point_index: usize,
    pub control: ControlHandle,
}

/// How a new selection combines with the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionBehavior {
    Replace,
    Add,
    Toggle,
}

/// The full editor state over one document snapshot.
///
/// A reducer never mutates the state it is given; it clones, edits the
/// clone, and returns it. Multiple readers can therefore hold the same
/// snapshot safely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub document: Document,
    pub selected_page: Uuid,
    pub selected_layer_ids: Vec<Uuid>,
    /// Selected point indices of points-bearing layers, keyed by layer id.
    pub selected_point_lists: HashMap<Uuid, Vec<usize>>,
    pub selected_control_point: Option<SelectedControlPoint>,
    pub interaction: InteractionState,
    pub page_metadata: HashMap<Uuid, PageMetadata>,
    pub key_modifiers: KeyModifiers,
}

impl ApplicationState {
    pub fn new(document: Document) -> Self {
        let selected_page = document.pages.first().map(|page| page.id).unwrap_or_default();

        Self {
            document,
            selected_page,
            selected_layer_ids: Vec::new(),
            selected_point_lists: HashMap::new(),
            selected_control_point: None,
            interaction: InteractionState::None,
            page_metadata: HashMap::new(),
            key_modifiers: KeyModifiers::default(),
        }
    }

    /// The page everything currently operates on. Falls back to the first
    /// page when the selected id has gone stale (e.g. page deleted).
    pub fn current_page(&self) -> &Page {
        self.document
            .page(self.selected_page)
            .or_else(|| self.document.pages.first())
            .expect("document has no pages")
    }

    pub fn current_page_metadata(&self) -> PageMetadata {
        self.page_metadata
            .get(&self.selected_page)
            .copied()
            .unwrap_or_default()
    }

    pub fn select_layers(&mut self, ids: &[Uuid], behavior: SelectionBehavior) {
        match behavior {
            SelectionBehavior::Replace => {
                self.selected_layer_ids = ids.to_vec();
            }
            SelectionBehavior::Add => {
                for id in ids {
                    if !self.selected_layer_ids.contains(id) {
                        self.selected_layer_ids.push(*id);
                    }
                }
            }
            SelectionBehavior::Toggle => {
                for id in ids {
                    if let Some(position) = self
                        .selected_layer_ids
                        .iter()
                        .position(|existing| existing == id)
                    {
                        self.selected_layer_ids.remove(position);
                    } else {
                        self.selected_layer_ids.push(*id);
                    }
                }
            }
        }
    }

    pub fn deselect_all_points(&mut self) {
        self.selected_point_lists.clear();
        self.selected_control_point = None;
    }
}
