//! The application reducer: one entry point turning an [`Action`] and the
//! current [`ApplicationState`] into the next state.
//!
//! Reducers are pure: the incoming state is cloned, the clone edited, and
//! the result returned. Interaction actions run the gesture state machine
//! first, then commit whatever geometry the new gesture state implies, so
//! a single dispatch both transitions and edits.

mod actions;
mod canvas;
mod layer_properties;

pub use actions::Action;

use crate::error::InvariantError;
use crate::state::{interaction_reducer, ApplicationState, SelectionBehavior};
use crate::text::TextMeasurer;

use layer_properties::SizeDimension;

/// Ambient inputs a dispatch may need beyond the state itself. The
/// measurer sizes committed text drafts; dispatches that never touch text
/// can pass the default.
#[derive(Clone, Copy, Default)]
pub struct ReducerContext<'a> {
    pub measurer: Option<&'a dyn TextMeasurer>,
}

pub fn application_reducer(
    state: &ApplicationState,
    action: &Action,
    ctx: &ReducerContext<'_>,
) -> Result<ApplicationState, InvariantError> {
    let mut next = state.clone();

    match action {
        Action::Interaction(interaction_action) => {
            next.interaction =
                interaction_reducer(&state.interaction, interaction_action, state.current_page())?;
            canvas::apply_gesture_update(&mut next)?;
        }
        Action::AddDrawnLayer => canvas::add_drawn_layer(&mut next, ctx)?,

        Action::SelectLayers { ids, behavior } => {
            next.select_layers(ids, *behavior);
        }
        Action::SelectPoint {
            layer_id,
            index,
            behavior,
        } => {
            select_point(&mut next, *layer_id, *index, *behavior);
        }
        Action::SelectControlPoint {
            layer_id,
            index,
            control,
        } => {
            next.selected_control_point = Some(crate::state::SelectedControlPoint {
                layer_id: *layer_id,
                point_index: *index,
                control: *control,
            });
        }
        Action::DeselectAllPoints => next.deselect_all_points(),

        Action::SetLayerName { id, name } => {
            layer_properties::set_layer_name(&mut next, *id, name);
        }
        Action::SetLayerVisible { id, is_visible } => {
            layer_properties::set_layer_visible(&mut next, *id, *is_visible);
        }
        Action::SetLayerLocked { id, is_locked } => {
            layer_properties::set_layer_locked(&mut next, *id, *is_locked);
        }
        Action::SetLayerRotation { id, degrees } => {
            layer_properties::set_layer_rotation(&mut next, *id, *degrees);
        }
        Action::SetLayerWidth { value } => {
            layer_properties::set_layer_dimension(&mut next, SizeDimension::Width, *value);
        }
        Action::SetLayerHeight { value } => {
            layer_properties::set_layer_dimension(&mut next, SizeDimension::Height, *value);
        }
        Action::DeleteSelectedLayers => layer_properties::delete_selected_layers(&mut next),

        Action::SetOverrideValue {
            instance_id,
            path,
            value,
        } => {
            layer_properties::set_override_value(
                &mut next,
                *instance_id,
                path.clone(),
                value.clone(),
            );
        }

        Action::SelectPage { id } => layer_properties::select_page(&mut next, *id),
        Action::AddPage { name } => layer_properties::add_page(&mut next, name),
        Action::SetZoom { value } => layer_properties::set_zoom(&mut next, *value),
        Action::SetScrollOrigin { point } => layer_properties::set_scroll_origin(&mut next, *point),
        Action::SetKeyModifiers(modifiers) => {
            layer_properties::set_key_modifiers(&mut next, *modifiers);
        }
    }

    Ok(next)
}

fn select_point(
    state: &mut ApplicationState,
    layer_id: uuid::Uuid,
    index: usize,
    behavior: SelectionBehavior,
) {
    match behavior {
        SelectionBehavior::Replace => {
            state.selected_point_lists.clear();
            state.selected_point_lists.insert(layer_id, vec![index]);
        }
        SelectionBehavior::Add => {
            let indices = state.selected_point_lists.entry(layer_id).or_default();
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        SelectionBehavior::Toggle => {
            let indices = state.selected_point_lists.entry(layer_id).or_default();
            if let Some(position) = indices.iter().position(|existing| *existing == index) {
                indices.remove(position);
            } else {
                indices.push(index);
            }
            if indices.is_empty() {
                state.selected_point_lists.remove(&layer_id);
            }
        }
    }
}
