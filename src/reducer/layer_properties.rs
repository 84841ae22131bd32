//! Direct property edits: renames, visibility, rotation, sizing, deletion,
//! override values, and page/viewport bookkeeping.
//!
//! Edits addressed at an id that no longer exists are silent no-ops with a
//! warning: stale ids are routine when the UI races a deletion or an undo.

use log::warn;
use uuid::Uuid;

use crate::document::Page;
use crate::geometry::Point;
use crate::model::{Layer, LayerContent, OverridePropertyValue, OverrideValue};
use crate::reducer::canvas::{fix_ancestor_groups, scale_layer_children};
use crate::selectors::traversal::{
    access_mut, find_index_path, find_index_paths_excluding_descendants,
};
use crate::state::{ApplicationState, KeyModifiers, PageMetadata};

fn with_layer(state: &mut ApplicationState, id: Uuid, action: &str, edit: impl FnOnce(&mut Layer)) {
    let page_id = state.current_page().id;
    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };

    match page.layer_mut(id) {
        Some(layer) => edit(layer),
        None => warn!("{action}: no layer {id}, ignoring"),
    }
}

pub(crate) fn set_layer_name(state: &mut ApplicationState, id: Uuid, name: &str) {
    with_layer(state, id, "setLayerName", |layer| {
        layer.name = name.to_string();
    });
}

pub(crate) fn set_layer_visible(state: &mut ApplicationState, id: Uuid, is_visible: bool) {
    with_layer(state, id, "setLayerVisible", |layer| {
        layer.is_visible = is_visible;
    });
}

pub(crate) fn set_layer_locked(state: &mut ApplicationState, id: Uuid, is_locked: bool) {
    with_layer(state, id, "setLayerLocked", |layer| {
        layer.is_locked = is_locked;
    });
}

pub(crate) fn set_layer_rotation(state: &mut ApplicationState, id: Uuid, degrees: f64) {
    with_layer(state, id, "setLayerRotation", |layer| {
        // Stored with the sign convention the layer kind expects, so the
        // inspector value reads back unchanged.
        layer.rotation = degrees * layer.rotation_multiplier();
    });
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SizeDimension {
    Width,
    Height,
}

/// Sets one dimension of every selected layer, rescaling contents so they
/// keep their relative position and extent.
pub(crate) fn set_layer_dimension(
    state: &mut ApplicationState,
    dimension: SizeDimension,
    value: f64,
) {
    let selected = state.selected_layer_ids.clone();
    let page_id = state.current_page().id;
    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };

    for id in &selected {
        let Some(path) = find_index_path(page, *id) else {
            warn!("setLayerDimension: no layer {id}, ignoring");
            continue;
        };

        if let Some(layer) = access_mut(page, &path) {
            match dimension {
                SizeDimension::Width => {
                    let factor = if layer.frame.width == 0.0 {
                        1.0
                    } else {
                        value / layer.frame.width
                    };
                    layer.frame.width = value;
                    scale_layer_children(layer, factor, 1.0);
                }
                SizeDimension::Height => {
                    let factor = if layer.frame.height == 0.0 {
                        1.0
                    } else {
                        value / layer.frame.height
                    };
                    layer.frame.height = value;
                    scale_layer_children(layer, 1.0, factor);
                }
            }
        }

        fix_ancestor_groups(page, &path);
    }
}

fn remove_at_path(page: &mut Page, path: &[usize]) {
    let Some((&index, parent)) = path.split_last() else {
        return;
    };

    if parent.is_empty() {
        if index < page.layers.len() {
            page.layers.remove(index);
        }
        return;
    }

    if let Some(children) = access_mut(page, parent).and_then(Layer::children_mut) {
        if index < children.len() {
            children.remove(index);
        }
    }
}

/// Deletes every selected layer. A selected descendant of a selected
/// ancestor goes with its ancestor; groups left behind refit their frames.
pub(crate) fn delete_selected_layers(state: &mut ApplicationState) {
    let selected = state.selected_layer_ids.clone();
    let page_id = state.current_page().id;
    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };

    let mut paths = find_index_paths_excluding_descendants(page, &selected);

    // Back-to-front so earlier sibling indices stay valid.
    paths.sort();
    for path in paths.iter().rev() {
        remove_at_path(page, path);
        fix_ancestor_groups(page, path);
    }

    state.selected_layer_ids.clear();
    state.deselect_all_points();
}

/// Sets one override on a symbol instance. An existing entry for the same
/// layer path and property kind is replaced; otherwise the entry is
/// appended.
pub(crate) fn set_override_value(
    state: &mut ApplicationState,
    instance_id: Uuid,
    path: Vec<Uuid>,
    value: OverridePropertyValue,
) {
    with_layer(state, instance_id, "setOverrideValue", |layer| {
        let LayerContent::SymbolInstance { overrides, .. } = &mut layer.content else {
            warn!("setOverrideValue: layer {instance_id} is not a symbol instance, ignoring");
            return;
        };

        let same_kind = |existing: &OverridePropertyValue| {
            std::mem::discriminant(existing) == std::mem::discriminant(&value)
        };

        if let Some(existing) = overrides
            .iter_mut()
            .find(|entry| entry.path == path && same_kind(&entry.value))
        {
            existing.value = value;
        } else {
            overrides.push(OverrideValue::new(path, value));
        }
    });
}

pub(crate) fn select_page(state: &mut ApplicationState, id: Uuid) {
    if state.document.page(id).is_some() {
        state.selected_page = id;
        state.selected_layer_ids.clear();
        state.deselect_all_points();
    } else {
        warn!("selectPage: no page {id}, ignoring");
    }
}

pub(crate) fn add_page(state: &mut ApplicationState, name: &str) {
    let page = Page::new(name);
    state.selected_page = page.id;
    state.document.pages.push(page);
    state.selected_layer_ids.clear();
    state.deselect_all_points();
}

pub(crate) fn set_zoom(state: &mut ApplicationState, value: f64) {
    let entry = state
        .page_metadata
        .entry(state.selected_page)
        .or_insert_with(PageMetadata::default);
    entry.zoom = value;
}

pub(crate) fn set_scroll_origin(state: &mut ApplicationState, point: Point) {
    let entry = state
        .page_metadata
        .entry(state.selected_page)
        .or_insert_with(PageMetadata::default);
    entry.scroll_origin = point;
}

pub(crate) fn set_key_modifiers(state: &mut ApplicationState, modifiers: KeyModifiers) {
    state.key_modifiers = modifiers;
}
