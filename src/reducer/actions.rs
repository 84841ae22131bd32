//! The action vocabulary of the application reducer.

use uuid::Uuid;

use crate::geometry::Point;
use crate::model::OverridePropertyValue;
use crate::state::interaction::InteractionAction;
use crate::state::{ControlHandle, KeyModifiers, SelectionBehavior};

/// Everything the UI can ask the core to do. Interaction actions drive the
/// gesture state machine (and the geometry it commits); the rest mutate
/// selection, layer properties, or the page set directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Interaction(InteractionAction),
    /// Commits the draft layer of an in-progress drawing gesture.
    AddDrawnLayer,

    SelectLayers {
        ids: Vec<Uuid>,
        behavior: SelectionBehavior,
    },
    SelectPoint {
        layer_id: Uuid,
        index: usize,
        behavior: SelectionBehavior,
    },
    SelectControlPoint {
        layer_id: Uuid,
        index: usize,
        control: ControlHandle,
    },
    DeselectAllPoints,

    SetLayerName {
        id: Uuid,
        name: String,
    },
    SetLayerVisible {
        id: Uuid,
        is_visible: bool,
    },
    SetLayerLocked {
        id: Uuid,
        is_locked: bool,
    },
    SetLayerRotation {
        id: Uuid,
        degrees: f64,
    },
    /// Resizes every selected layer to the given width, rescaling its
    /// contents proportionally.
    SetLayerWidth {
        value: f64,
    },
    SetLayerHeight {
        value: f64,
    },
    DeleteSelectedLayers,

    SetOverrideValue {
        instance_id: Uuid,
        path: Vec<Uuid>,
        value: OverridePropertyValue,
    },

    SelectPage {
        id: Uuid,
    },
    AddPage {
        name: String,
    },
    SetZoom {
        value: f64,
    },
    SetScrollOrigin {
        point: Point,
    },
    SetKeyModifiers(KeyModifiers),
}
