//! The interaction state machine.
//!
//! Models the current tool/gesture and validates transitions between them.
//! Continuous gestures (drawing, moving, scaling, point editing) capture an
//! immutable snapshot of their pre-gesture geometry at start, so every
//! update is a pure function of (snapshot, current point) and cancellation
//! is just `Reset` with no cleanup.
//!
//! The legal gesture sequences are:
//!
//! ```text
//! None ──Insert──► Insert ──StartDrawing──► Drawing ──Reset──► None
//! None ──MaybeMove──► MaybeMove ──UpdateMoving──► Moving ──Reset──► None
//! None ──MaybeScale──► MaybeScale ──UpdateScaling──► Scaling ──Reset──► None
//! None ──EditPath──► EditPath ──MaybeMovePoint──► MaybeMovePoint
//!      ──UpdateMovingPoint──► MovingPoint ──Reset──► None
//! ```
//!
//! (control points mirror the point sequence). An update action fired from
//! any other state is an [`InvariantError`]: it signals a defect in the
//! calling layer, not a recoverable condition.

use serde::{Deserialize, Serialize};

use crate::document::Page;
use crate::error::InvariantError;
use crate::geometry::{Point, Rect};
use crate::model::{factory, Layer};

/// The layer kinds that can be drawn with a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeType {
    Rectangle,
    Oval,
    Line,
    Text,
}

impl ShapeType {
    /// A draft layer of this kind with the given frame.
    pub fn create_layer(&self, frame: Rect) -> Layer {
        match self {
            ShapeType::Rectangle => factory::rectangle(frame),
            ShapeType::Oval => factory::oval(frame),
            ShapeType::Line => factory::line(frame),
            ShapeType::Text => factory::text(frame, ""),
        }
    }
}

/// A scale handle position on the selection's bounding rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl CompassDirection {
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::N,
        CompassDirection::Ne,
        CompassDirection::E,
        CompassDirection::Se,
        CompassDirection::S,
        CompassDirection::Sw,
        CompassDirection::W,
        CompassDirection::Nw,
    ];

    /// -1, 0, or +1: which horizontal edge this handle drags.
    pub fn x_sign(&self) -> i8 {
        match self {
            CompassDirection::Nw | CompassDirection::W | CompassDirection::Sw => -1,
            CompassDirection::N | CompassDirection::S => 0,
            CompassDirection::Ne | CompassDirection::E | CompassDirection::Se => 1,
        }
    }

    /// -1, 0, or +1: which vertical edge this handle drags.
    pub fn y_sign(&self) -> i8 {
        match self {
            CompassDirection::Nw | CompassDirection::N | CompassDirection::Ne => -1,
            CompassDirection::W | CompassDirection::E => 0,
            CompassDirection::Sw | CompassDirection::S | CompassDirection::Se => 1,
        }
    }
}

/// The current tool/gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionState {
    /// No active operation.
    None,
    /// An insert tool is armed; `current` tracks the hover point for snap
    /// feedback before the drag starts.
    Insert {
        shape_type: ShapeType,
        current: Option<Point>,
    },
    /// Dragging out a new layer. `value` is the draft, reframed on every
    /// update from (`origin`, `current`).
    Drawing {
        shape_type: ShapeType,
        origin: Point,
        current: Point,
        value: Layer,
    },
    /// Mouse down on the selection; becomes `Moving` on the first drag.
    MaybeMove { origin: Point },
    /// Dragging the selection. `previous` is the point of the last applied
    /// update, `next` the current one.
    Moving { previous: Point, next: Point },
    /// Mouse down on a scale handle.
    MaybeScale {
        origin: Point,
        direction: CompassDirection,
    },
    /// Dragging a scale handle. `page_snapshot` preserves the pre-gesture
    /// page so each update recomputes from scratch instead of accumulating.
    Scaling {
        origin: Point,
        current: Point,
        page_snapshot: Box<Page>,
        direction: CompassDirection,
    },
    /// Vector point editing mode.
    EditPath,
    /// Mouse down on a path point.
    MaybeMovePoint { origin: Point },
    /// Dragging selected path points.
    MovingPoint { previous: Point, next: Point },
    /// Mouse down on a control handle.
    MaybeMoveControlPoint { origin: Point },
    /// Dragging a control handle.
    MovingControlPoint { previous: Point, next: Point },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::None => "none",
            InteractionState::Insert { .. } => "insert",
            InteractionState::Drawing { .. } => "drawing",
            InteractionState::MaybeMove { .. } => "maybeMove",
            InteractionState::Moving { .. } => "moving",
            InteractionState::MaybeScale { .. } => "maybeScale",
            InteractionState::Scaling { .. } => "scaling",
            InteractionState::EditPath => "editPath",
            InteractionState::MaybeMovePoint { .. } => "maybeMovePoint",
            InteractionState::MovingPoint { .. } => "movingPoint",
            InteractionState::MaybeMoveControlPoint { .. } => "maybeMoveControlPoint",
            InteractionState::MovingControlPoint { .. } => "movingControlPoint",
        }
    }

    /// Whether a continuous gesture is in progress.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            InteractionState::Drawing { .. }
                | InteractionState::Moving { .. }
                | InteractionState::Scaling { .. }
                | InteractionState::MovingPoint { .. }
                | InteractionState::MovingControlPoint { .. }
        )
    }
}

/// A discrete input driving the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionAction {
    Reset,
    Insert(ShapeType),
    /// Track the hover point while an insert tool is armed.
    TrackInsertPoint(Point),
    StartDrawing {
        shape_type: ShapeType,
        point: Point,
    },
    UpdateDrawing(Point),
    MaybeMove {
        origin: Point,
    },
    UpdateMoving(Point),
    MaybeScale {
        origin: Point,
        direction: CompassDirection,
    },
    UpdateScaling(Point),
    EditPath,
    MaybeMovePoint {
        origin: Point,
    },
    UpdateMovingPoint {
        origin: Point,
        current: Point,
    },
    MaybeMoveControlPoint {
        origin: Point,
    },
    UpdateMovingControlPoint {
        origin: Point,
        current: Point,
    },
}

impl InteractionAction {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionAction::Reset => "reset",
            InteractionAction::Insert(_) => "insert",
            InteractionAction::TrackInsertPoint(_) => "trackInsertPoint",
            InteractionAction::StartDrawing { .. } => "startDrawing",
            InteractionAction::UpdateDrawing(_) => "updateDrawing",
            InteractionAction::MaybeMove { .. } => "maybeMove",
            InteractionAction::UpdateMoving(_) => "updateMoving",
            InteractionAction::MaybeScale { .. } => "maybeScale",
            InteractionAction::UpdateScaling(_) => "updateScaling",
            InteractionAction::EditPath => "editPath",
            InteractionAction::MaybeMovePoint { .. } => "maybeMovePoint",
            InteractionAction::UpdateMovingPoint { .. } => "movingPoint",
            InteractionAction::MaybeMoveControlPoint { .. } => "maybeMoveControlPoint",
            InteractionAction::UpdateMovingControlPoint { .. } => "movingControlPoint",
        }
    }
}

fn invalid(action: &InteractionAction, state: &InteractionState) -> InvariantError {
    InvariantError::InvalidTransition {
        action: action.name(),
        state: state.name(),
    }
}

/// Computes the next interaction state.
///
/// `page` is the current page, captured as the pre-gesture snapshot when a
/// scale gesture starts. Illegal combinations return an error rather than
/// silently keeping the state.
pub fn interaction_reducer(
    state: &InteractionState,
    action: &InteractionAction,
    page: &Page,
) -> Result<InteractionState, InvariantError> {
    match action {
        InteractionAction::Reset => Ok(InteractionState::None),

        InteractionAction::Insert(shape_type) => match state {
            InteractionState::None
            | InteractionState::Insert { .. }
            | InteractionState::EditPath => Ok(InteractionState::Insert {
                shape_type: *shape_type,
                current: None,
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::TrackInsertPoint(point) => match state {
            InteractionState::Insert { shape_type, .. } => Ok(InteractionState::Insert {
                shape_type: *shape_type,
                current: Some(*point),
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::StartDrawing { shape_type, point } => match state {
            InteractionState::None | InteractionState::Insert { .. } => {
                let value = shape_type.create_layer(Rect::from_points(*point, *point));

                Ok(InteractionState::Drawing {
                    shape_type: *shape_type,
                    origin: *point,
                    current: *point,
                    value,
                })
            }
            _ => Err(invalid(action, state)),
        },

        InteractionAction::UpdateDrawing(point) => match state {
            InteractionState::Drawing {
                shape_type,
                origin,
                value,
                ..
            } => {
                let mut value = value.clone();
                value.frame = Rect::from_points(*origin, *point);

                Ok(InteractionState::Drawing {
                    shape_type: *shape_type,
                    origin: *origin,
                    current: *point,
                    value,
                })
            }
            _ => Err(invalid(action, state)),
        },

        InteractionAction::MaybeMove { origin } => match state {
            InteractionState::None => Ok(InteractionState::MaybeMove { origin: *origin }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::UpdateMoving(point) => match state {
            // The first drag promotes; subsequent drags roll forward.
            InteractionState::MaybeMove { origin } => Ok(InteractionState::Moving {
                previous: *origin,
                next: *point,
            }),
            InteractionState::Moving { next, .. } => Ok(InteractionState::Moving {
                previous: *next,
                next: *point,
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::MaybeScale { origin, direction } => match state {
            InteractionState::None => Ok(InteractionState::MaybeScale {
                origin: *origin,
                direction: *direction,
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::UpdateScaling(point) => match state {
            InteractionState::MaybeScale { origin, direction } => Ok(InteractionState::Scaling {
                origin: *origin,
                current: *point,
                page_snapshot: Box::new(page.clone()),
                direction: *direction,
            }),
            InteractionState::Scaling {
                origin,
                page_snapshot,
                direction,
                ..
            } => Ok(InteractionState::Scaling {
                origin: *origin,
                current: *point,
                page_snapshot: page_snapshot.clone(),
                direction: *direction,
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::EditPath => match state {
            InteractionState::None | InteractionState::EditPath => Ok(InteractionState::EditPath),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::MaybeMovePoint { origin } => match state {
            InteractionState::EditPath => {
                Ok(InteractionState::MaybeMovePoint { origin: *origin })
            }
            _ => Err(invalid(action, state)),
        },

        InteractionAction::UpdateMovingPoint { origin, current } => match state {
            InteractionState::MaybeMovePoint { .. } => Ok(InteractionState::MovingPoint {
                previous: *origin,
                next: *current,
            }),
            InteractionState::MovingPoint { next, .. } => Ok(InteractionState::MovingPoint {
                previous: *next,
                next: *current,
            }),
            _ => Err(invalid(action, state)),
        },

        InteractionAction::MaybeMoveControlPoint { origin } => match state {
            InteractionState::EditPath => {
                Ok(InteractionState::MaybeMoveControlPoint { origin: *origin })
            }
            _ => Err(invalid(action, state)),
        },

        InteractionAction::UpdateMovingControlPoint { origin, current } => match state {
            InteractionState::MaybeMoveControlPoint { .. } => {
                Ok(InteractionState::MovingControlPoint {
                    previous: *origin,
                    next: *current,
                })
            }
            InteractionState::MovingControlPoint { next, .. } => {
                Ok(InteractionState::MovingControlPoint {
                    previous: *next,
                    next: *current,
                })
            }
            _ => Err(invalid(action, state)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new("Page 1")
    }

    #[test]
    fn reset_returns_to_none_from_any_state() {
        let page = page();
        let state = interaction_reducer(
            &InteractionState::None,
            &InteractionAction::MaybeMove {
                origin: Point::ZERO,
            },
            &page,
        )
        .unwrap();

        let state = interaction_reducer(&state, &InteractionAction::Reset, &page).unwrap();
        assert_eq!(state, InteractionState::None);
    }

    #[test]
    fn first_drag_promotes_maybe_move() {
        let page = page();
        let state = InteractionState::MaybeMove {
            origin: Point::new(10.0, 10.0),
        };

        let state = interaction_reducer(
            &state,
            &InteractionAction::UpdateMoving(Point::new(25.0, 25.0)),
            &page,
        )
        .unwrap();

        assert_eq!(
            state,
            InteractionState::Moving {
                previous: Point::new(10.0, 10.0),
                next: Point::new(25.0, 25.0),
            }
        );
    }

    #[test]
    fn update_moving_from_none_is_an_invariant_violation() {
        let page = page();
        let result = interaction_reducer(
            &InteractionState::None,
            &InteractionAction::UpdateMoving(Point::ZERO),
            &page,
        );

        assert!(matches!(
            result,
            Err(InvariantError::InvalidTransition {
                action: "updateMoving",
                state: "none",
            })
        ));
    }

    #[test]
    fn scaling_captures_the_page_snapshot_once() {
        let page = page();
        let state = InteractionState::MaybeScale {
            origin: Point::new(100.0, 100.0),
            direction: CompassDirection::Se,
        };

        let state = interaction_reducer(
            &state,
            &InteractionAction::UpdateScaling(Point::new(110.0, 110.0)),
            &page,
        )
        .unwrap();

        let InteractionState::Scaling { page_snapshot, .. } = &state else {
            panic!("expected scaling");
        };
        let first_snapshot = page_snapshot.clone();

        // A later update keeps the original snapshot even if the live page
        // has since changed.
        let mut changed = page.clone();
        changed.name = "Renamed".to_string();

        let state = interaction_reducer(
            &state,
            &InteractionAction::UpdateScaling(Point::new(125.0, 125.0)),
            &changed,
        )
        .unwrap();

        let InteractionState::Scaling { page_snapshot, .. } = &state else {
            panic!("expected scaling");
        };
        assert_eq!(*page_snapshot, first_snapshot);
    }

    #[test]
    fn drawing_reframes_the_draft_on_every_update() {
        let page = page();
        let state = interaction_reducer(
            &InteractionState::None,
            &InteractionAction::StartDrawing {
                shape_type: ShapeType::Rectangle,
                point: Point::new(50.0, 50.0),
            },
            &page,
        )
        .unwrap();

        // Dragging up-left of the origin still produces a normalized frame.
        let state = interaction_reducer(
            &state,
            &InteractionAction::UpdateDrawing(Point::new(20.0, 30.0)),
            &page,
        )
        .unwrap();

        let InteractionState::Drawing { value, .. } = &state else {
            panic!("expected drawing");
        };
        assert_eq!(value.frame, Rect::new(20.0, 30.0, 30.0, 20.0));
    }
}
