#![warn(clippy::all, rust_2018_idioms)]

//! A document state and geometry engine for Sketch-style vector editors.
//!
//! The crate owns the document model, an action-driven reducer with an
//! interaction state machine, and the derived-geometry selectors (bounding
//! rects, hit testing, snapping, symbol resolution). Rendering, text
//! shaping, fonts, and the file format are injected through traits; the
//! core has no UI and no IO.

pub mod codec;
pub mod document;
pub mod error;
pub mod geometry;
pub mod model;
pub mod reducer;
pub mod render;
pub mod selectors;
pub mod state;
pub mod text;

pub use codec::{DocumentCodec, JsonCodec};
pub use document::{Document, Page};
pub use error::{CodecError, InvariantError};
pub use geometry::{AffineTransform, Insets, Point, Rect, Size};
pub use model::{Layer, LayerContent};
pub use reducer::{application_reducer, Action, ReducerContext};
pub use render::{render_page, Rasterizer};
pub use state::history::{history_reducer, HistoryAction, HistoryState};
pub use state::{
    ApplicationState, CompassDirection, InteractionAction, InteractionState, KeyModifiers,
    SelectionBehavior, ShapeType,
};
pub use text::{FontProvider, TextMeasurer};
