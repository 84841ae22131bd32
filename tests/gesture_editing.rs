//! End-to-end gesture dispatch: drawing, moving, and scaling layers
//! through the application reducer.

use sketchcore::geometry::{Point, Rect};
use sketchcore::model::factory;
use sketchcore::reducer::{application_reducer, Action, ReducerContext};
use sketchcore::state::{ApplicationState, CompassDirection, InteractionAction, InteractionState, KeyModifiers, SelectionBehavior, ShapeType};
use sketchcore::{Document, InvariantError, Layer, Page};

fn state_with_layers(layers: Vec<Layer>) -> ApplicationState {
    let _ = env_logger::builder().is_test(true).try_init();

    ApplicationState::new(Document::with_pages(vec![Page::with_layers(
        "Page 1", layers,
    )]))
}

fn dispatch(state: &ApplicationState, action: Action) -> ApplicationState {
    application_reducer(state, &action, &ReducerContext::default()).unwrap()
}

fn interact(state: &ApplicationState, action: InteractionAction) -> ApplicationState {
    dispatch(state, Action::Interaction(action))
}

fn layer_frame(state: &ApplicationState, id: uuid::Uuid) -> Rect {
    state.current_page().layer(id).unwrap().frame
}

#[test]
fn moving_a_layer_updates_its_frame() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(
        &state,
        InteractionAction::MaybeMove {
            origin: Point::new(50.0, 50.0),
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateMoving(Point::new(65.0, 75.0)),
    );

    assert_eq!(layer_frame(&state, id), Rect::new(15.0, 25.0, 100.0, 100.0));

    let state = interact(&state, InteractionAction::Reset);
    assert_eq!(state.interaction, InteractionState::None);
    assert_eq!(layer_frame(&state, id), Rect::new(15.0, 25.0, 100.0, 100.0));
}

#[test]
fn moving_applies_each_update_incrementally() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(&state, InteractionAction::MaybeMove { origin: Point::ZERO });
    let state = interact(&state, InteractionAction::UpdateMoving(Point::new(10.0, 0.0)));
    let state = interact(&state, InteractionAction::UpdateMoving(Point::new(30.0, 0.0)));

    assert_eq!(layer_frame(&state, id).x, 30.0);
}

#[test]
fn moving_multiple_layers_moves_each() {
    let a = factory::rectangle(Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = factory::oval(Rect::new(100.0, 0.0, 50.0, 50.0));
    let (a_id, b_id) = (a.id, b.id);

    let mut state = state_with_layers(vec![a, b]);
    state.select_layers(&[a_id, b_id], SelectionBehavior::Replace);

    let state = interact(&state, InteractionAction::MaybeMove { origin: Point::ZERO });
    let state = interact(
        &state,
        InteractionAction::UpdateMoving(Point::new(400.0, 400.0)),
    );

    assert_eq!(layer_frame(&state, a_id).origin(), Point::new(400.0, 400.0));
    assert_eq!(layer_frame(&state, b_id).origin(), Point::new(500.0, 400.0));
}

#[test]
fn moving_a_layer_inside_an_artboard_stays_parent_relative() {
    let child = factory::rectangle(Rect::new(10.0, 10.0, 50.0, 50.0));
    let child_id = child.id;
    let artboard = factory::artboard("Artboard", Rect::new(100.0, 100.0, 300.0, 300.0), vec![child]);

    let mut state = state_with_layers(vec![artboard]);
    state.select_layers(&[child_id], SelectionBehavior::Replace);

    let state = interact(&state, InteractionAction::MaybeMove { origin: Point::ZERO });
    let state = interact(
        &state,
        InteractionAction::UpdateMoving(Point::new(15.0, 15.0)),
    );

    assert_eq!(layer_frame(&state, child_id), Rect::new(25.0, 25.0, 50.0, 50.0));
}

#[test]
fn moving_snaps_to_a_nearby_edge() {
    let moving = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let target = factory::rectangle(Rect::new(200.0, 300.0, 100.0, 100.0));
    let id = moving.id;

    let mut state = state_with_layers(vec![moving, target]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    // A raw delta of 197 leaves the left edges 3 apart, inside the snap
    // threshold, so the move lands exactly on 200.
    let state = interact(&state, InteractionAction::MaybeMove { origin: Point::ZERO });
    let state = interact(
        &state,
        InteractionAction::UpdateMoving(Point::new(197.0, 0.0)),
    );

    assert_eq!(layer_frame(&state, id).x, 200.0);
}

#[test]
fn far_layers_do_not_snap() {
    let moving = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let target = factory::rectangle(Rect::new(500.0, 300.0, 100.0, 100.0));
    let id = moving.id;

    let mut state = state_with_layers(vec![moving, target]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(&state, InteractionAction::MaybeMove { origin: Point::ZERO });
    let state = interact(
        &state,
        InteractionAction::UpdateMoving(Point::new(15.0, 0.0)),
    );

    assert_eq!(layer_frame(&state, id).x, 15.0);
}

#[test]
fn scaling_from_the_south_east_handle() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(100.0, 100.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(125.0, 125.0)),
    );

    assert_eq!(layer_frame(&state, id), Rect::new(0.0, 0.0, 125.0, 125.0));
}

#[test]
fn scaling_from_the_north_east_handle_anchors_the_south_west() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(100.0, 0.0),
            direction: CompassDirection::Ne,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(125.0, 25.0)),
    );

    assert_eq!(layer_frame(&state, id), Rect::new(0.0, 25.0, 125.0, 75.0));
}

#[test]
fn scaling_snaps_the_dragged_edge_to_a_nearby_layer() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let target = factory::rectangle(Rect::new(200.0, 300.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect, target]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    // Dragging the se handle to x = 197 leaves the right edge 3 inside the
    // snap threshold of the neighbour's left edge, so the scale lands the
    // edge exactly on 200. The y extent is nowhere near a target value and
    // stays put.
    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(100.0, 100.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(197.0, 100.0)),
    );

    assert_eq!(layer_frame(&state, id), Rect::new(0.0, 0.0, 200.0, 100.0));
}

#[test]
fn scaling_recomputes_from_the_gesture_start_snapshot() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);

    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(100.0, 100.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(200.0, 200.0)),
    );
    // Dragging back to the start restores the original frame exactly.
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(100.0, 100.0)),
    );

    assert_eq!(layer_frame(&state, id), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn scaling_a_group_scales_its_children() {
    let child = factory::rectangle(Rect::new(0.0, 0.0, 50.0, 50.0));
    let child_id = child.id;
    let mut group = factory::group("Group", vec![child]);
    group.frame = Rect::new(0.0, 0.0, 100.0, 100.0);
    let group_id = group.id;

    let mut state = state_with_layers(vec![group]);
    state.select_layers(&[group_id], SelectionBehavior::Replace);

    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(100.0, 100.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(200.0, 200.0)),
    );

    assert_eq!(layer_frame(&state, group_id), Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(layer_frame(&state, child_id), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn scaling_multiple_layers_scales_about_the_shared_anchor() {
    let a = factory::rectangle(Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = factory::oval(Rect::new(100.0, 100.0, 50.0, 50.0));
    let (a_id, b_id) = (a.id, b.id);

    let mut state = state_with_layers(vec![a, b]);
    state.select_layers(&[a_id, b_id], SelectionBehavior::Replace);

    // The selection bounds span (0, 0)..(150, 150); dragging the se handle
    // to (300, 300) doubles everything about the top-left corner.
    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(150.0, 150.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(300.0, 300.0)),
    );

    assert_eq!(layer_frame(&state, a_id), Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(layer_frame(&state, b_id), Rect::new(200.0, 200.0, 100.0, 100.0));
}

#[test]
fn scaling_inside_an_artboard_commits_in_local_space() {
    let child = factory::rectangle(Rect::new(0.0, 0.0, 50.0, 50.0));
    let child_id = child.id;
    let artboard = factory::artboard("Artboard", Rect::new(100.0, 100.0, 300.0, 300.0), vec![child]);

    let mut state = state_with_layers(vec![artboard]);
    state.select_layers(&[child_id], SelectionBehavior::Replace);

    // Canvas-space handle positions include the artboard offset; the
    // committed frame stays artboard-relative.
    let state = interact(
        &state,
        InteractionAction::MaybeScale {
            origin: Point::new(150.0, 150.0),
            direction: CompassDirection::Se,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateScaling(Point::new(200.0, 200.0)),
    );

    assert_eq!(layer_frame(&state, child_id), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn drawing_a_rectangle_commits_on_add() {
    let state = state_with_layers(vec![]);

    let state = interact(&state, InteractionAction::Insert(ShapeType::Rectangle));
    let state = interact(
        &state,
        InteractionAction::StartDrawing {
            shape_type: ShapeType::Rectangle,
            point: Point::new(10.0, 10.0),
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateDrawing(Point::new(60.0, 70.0)),
    );
    let state = dispatch(&state, Action::AddDrawnLayer);

    assert_eq!(state.interaction, InteractionState::None);
    assert_eq!(state.current_page().layers.len(), 1);

    let layer = &state.current_page().layers[0];
    assert_eq!(layer.frame, Rect::new(10.0, 10.0, 50.0, 60.0));
    assert_eq!(state.selected_layer_ids, vec![layer.id]);
}

#[test]
fn drawing_with_shift_commits_a_square() {
    let state = state_with_layers(vec![]);

    let state = dispatch(
        &state,
        Action::SetKeyModifiers(KeyModifiers {
            shift: true,
            alt: false,
        }),
    );
    let state = interact(
        &state,
        InteractionAction::StartDrawing {
            shape_type: ShapeType::Oval,
            point: Point::ZERO,
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateDrawing(Point::new(100.0, 40.0)),
    );
    let state = dispatch(&state, Action::AddDrawnLayer);

    assert_eq!(
        state.current_page().layers[0].frame,
        Rect::new(0.0, 0.0, 100.0, 100.0)
    );
}

#[test]
fn drawing_inside_an_artboard_parents_the_new_layer() {
    let artboard = factory::artboard("Artboard", Rect::new(100.0, 100.0, 300.0, 300.0), vec![]);
    let artboard_id = artboard.id;
    let state = state_with_layers(vec![artboard]);

    let state = interact(
        &state,
        InteractionAction::StartDrawing {
            shape_type: ShapeType::Rectangle,
            point: Point::new(150.0, 150.0),
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateDrawing(Point::new(200.0, 200.0)),
    );
    let state = dispatch(&state, Action::AddDrawnLayer);

    let artboard = state.current_page().layer(artboard_id).unwrap();
    assert_eq!(artboard.children().len(), 1);
    // The committed frame is re-expressed in artboard space.
    assert_eq!(
        artboard.children()[0].frame,
        Rect::new(50.0, 50.0, 50.0, 50.0)
    );
}

#[test]
fn drawing_a_line_commits_an_open_path() {
    let state = state_with_layers(vec![]);

    let state = interact(
        &state,
        InteractionAction::StartDrawing {
            shape_type: ShapeType::Line,
            point: Point::new(0.0, 100.0),
        },
    );
    let state = interact(
        &state,
        InteractionAction::UpdateDrawing(Point::new(100.0, 0.0)),
    );
    let state = dispatch(&state, Action::AddDrawnLayer);

    let layer = &state.current_page().layers[0];
    assert_eq!(layer.frame, Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(layer.points().unwrap().len(), 2);
    assert!(!layer.is_closed());
}

#[test]
fn zero_extent_drafts_still_commit() {
    let state = state_with_layers(vec![]);

    let state = interact(
        &state,
        InteractionAction::StartDrawing {
            shape_type: ShapeType::Rectangle,
            point: Point::new(10.0, 10.0),
        },
    );
    let state = dispatch(&state, Action::AddDrawnLayer);

    assert_eq!(
        state.current_page().layers[0].frame,
        Rect::new(10.0, 10.0, 0.0, 0.0)
    );
}

#[test]
fn committed_text_drafts_take_their_measured_extent() {
    let state = state_with_layers(vec![]);
    let measurer = sketchcore::text::MonospaceMeasurer::default();
    let ctx = ReducerContext {
        measurer: Some(&measurer),
    };

    let state = application_reducer(
        &state,
        &Action::Interaction(InteractionAction::StartDrawing {
            shape_type: ShapeType::Text,
            point: Point::new(10.0, 10.0),
        }),
        &ctx,
    )
    .unwrap();
    let state = application_reducer(&state, &Action::AddDrawnLayer, &ctx).unwrap();

    // A click with no drag still yields a one-line-tall text frame.
    assert_eq!(
        state.current_page().layers[0].frame,
        Rect::new(10.0, 10.0, 0.0, 14.0)
    );
}

#[test]
fn update_without_a_gesture_is_an_error() {
    let state = state_with_layers(vec![]);

    let result = application_reducer(
        &state,
        &Action::Interaction(InteractionAction::UpdateScaling(Point::ZERO)),
        &ReducerContext::default(),
    );

    assert!(matches!(
        result,
        Err(InvariantError::InvalidTransition {
            action: "updateScaling",
            state: "none",
        })
    ));
}

#[test]
fn add_drawn_layer_outside_drawing_is_an_error() {
    let state = state_with_layers(vec![]);

    let result = application_reducer(
        &state,
        &Action::AddDrawnLayer,
        &ReducerContext::default(),
    );

    assert!(matches!(
        result,
        Err(InvariantError::InvalidTransition {
            action: "addDrawnLayer",
            state: "none",
        })
    ));
}
