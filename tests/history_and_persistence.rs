//! Undo/redo semantics and the document codec round trip.

use sketchcore::codec::{DocumentCodec, JsonCodec};
use sketchcore::geometry::{Point, Rect};
use sketchcore::model::{factory, Border, BorderOptions, Color, LineCapStyle};
use sketchcore::reducer::{Action, ReducerContext};
use sketchcore::state::history::{history_reducer, HistoryAction, HistoryState};
use sketchcore::state::{ApplicationState, InteractionAction, InteractionState, SelectionBehavior};
use sketchcore::{Document, Layer, Page};

fn state_with_layers(layers: Vec<Layer>) -> ApplicationState {
    ApplicationState::new(Document::with_pages(vec![Page::with_layers(
        "Page 1", layers,
    )]))
}

fn apply(history: &HistoryState, action: Action) -> HistoryState {
    history_reducer(history, &HistoryAction::Apply(action), &ReducerContext::default()).unwrap()
}

fn step(history: &HistoryState, action: HistoryAction) -> HistoryState {
    history_reducer(history, &action, &ReducerContext::default()).unwrap()
}

#[test]
fn undo_and_redo_restore_the_document() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
    let id = rect.id;
    let history = HistoryState::new(state_with_layers(vec![rect]));

    let history = apply(
        &history,
        Action::SetLayerName {
            id,
            name: "Renamed".to_string(),
        },
    );
    assert!(history.can_undo());

    let history = step(&history, HistoryAction::Undo);
    assert_eq!(
        history.present.current_page().layer(id).unwrap().name,
        "Rectangle"
    );
    assert!(history.can_redo());

    let history = step(&history, HistoryAction::Redo);
    assert_eq!(
        history.present.current_page().layer(id).unwrap().name,
        "Renamed"
    );
}

#[test]
fn a_full_drag_is_one_undo_step() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
    let id = rect.id;

    let mut state = state_with_layers(vec![rect]);
    state.select_layers(&[id], SelectionBehavior::Replace);
    let history = HistoryState::new(state);

    let history = apply(
        &history,
        Action::Interaction(InteractionAction::MaybeMove { origin: Point::ZERO }),
    );
    let history = apply(
        &history,
        Action::Interaction(InteractionAction::UpdateMoving(Point::new(10.0, 0.0))),
    );
    let history = apply(
        &history,
        Action::Interaction(InteractionAction::UpdateMoving(Point::new(30.0, 0.0))),
    );
    let history = apply(&history, Action::Interaction(InteractionAction::Reset));

    assert_eq!(
        history.present.current_page().layer(id).unwrap().frame.x,
        30.0
    );

    // One undo rewinds the whole drag and ends any in-progress gesture.
    let history = step(&history, HistoryAction::Undo);
    assert_eq!(
        history.present.current_page().layer(id).unwrap().frame.x,
        0.0
    );
    assert_eq!(history.present.interaction, InteractionState::None);
    assert!(!history.can_undo());
}

#[test]
fn selection_only_changes_are_not_recorded() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
    let id = rect.id;
    let history = HistoryState::new(state_with_layers(vec![rect]));

    let history = apply(
        &history,
        Action::SelectLayers {
            ids: vec![id],
            behavior: SelectionBehavior::Replace,
        },
    );

    assert!(!history.can_undo());
    assert_eq!(history.present.selected_layer_ids, vec![id]);
}

#[test]
fn a_new_edit_clears_the_redo_stack() {
    let rect = factory::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
    let id = rect.id;
    let history = HistoryState::new(state_with_layers(vec![rect]));

    let history = apply(
        &history,
        Action::SetLayerName {
            id,
            name: "First".to_string(),
        },
    );
    let history = step(&history, HistoryAction::Undo);
    assert!(history.can_redo());

    let history = apply(
        &history,
        Action::SetLayerName {
            id,
            name: "Second".to_string(),
        },
    );
    assert!(!history.can_redo());
}

#[test]
fn documents_round_trip_through_the_json_codec() {
    let label = factory::text(Rect::new(4.0, 4.0, 32.0, 12.0), "Button");
    let master = factory::symbol_master("Button", Rect::new(0.0, 0.0, 40.0, 20.0), vec![label]);
    let mut dashed = factory::rectangle(Rect::new(0.0, 0.0, 50.0, 50.0));
    if let Some(style) = dashed.style.as_mut() {
        style.borders.push(Border::new(Color::BLACK, 2.0));
        style.border_options = BorderOptions {
            dash_pattern: vec![4.0, 2.0],
            line_cap_style: LineCapStyle::Round,
            ..BorderOptions::default()
        };
    }
    let group = factory::group(
        "Group",
        vec![dashed, factory::oval(Rect::new(60.0, 0.0, 50.0, 50.0))],
    );
    let artboard = factory::artboard("Artboard", Rect::new(0.0, 0.0, 400.0, 400.0), vec![group]);

    let document = Document::with_pages(vec![
        Page::with_layers("Page 1", vec![artboard]),
        Page::with_layers("Symbols", vec![master]),
    ]);

    let codec = JsonCodec;
    let bytes = codec.encode(&document).unwrap();
    let decoded = codec.decode(&bytes).unwrap();

    assert_eq!(decoded, document);
}
