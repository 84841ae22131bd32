//! Geometry commits for in-progress gestures.
//!
//! These run after the interaction transition, reading the *new*
//! interaction state to decide what to write into the document. Move and
//! point edits apply the per-update delta; scaling recomputes the whole
//! page from the gesture-start snapshot on every update so nothing drifts.

use log::debug;
use uuid::Uuid;

use crate::document::Page;
use crate::error::InvariantError;
use crate::geometry::{bounds_from_points, AffineTransform, Point, Rect};
use crate::model::{fix_group_frame, Layer, LayerContent, ParsedCurvePoint};
use crate::selectors::geometry::{drawn_layer_rect, get_bounding_rect};
use crate::selectors::handles::compass_point;
use crate::selectors::snaps::{move_snap_adjustment, scale_snap_adjustment};
use crate::selectors::transforms::layer_transform_at_index_path;
use crate::selectors::traversal::{
    access, access_mut, find_index_path, find_index_paths_excluding_descendants, visit_reversed,
    GroupTraversal, LayerTraversalOptions, TraversalControl,
};
use crate::state::{ApplicationState, ControlHandle, InteractionState};

/// Expresses a canvas-space displacement in the local space reached by
/// `transform`: the inverse linear map, with translation cancelled out.
fn vector_to_local(transform: &AffineTransform, delta: Point) -> Option<Point> {
    let inverse = transform.invert()?;
    Some(inverse.apply_to(delta) - inverse.apply_to(Point::ZERO))
}

/// Refits every group on the ancestor chain of `path`, deepest first, so a
/// mutated descendant never leaves a stale group frame behind.
pub(crate) fn fix_ancestor_groups(page: &mut Page, path: &[usize]) {
    for depth in (1..path.len()).rev() {
        if let Some(ancestor) = access_mut(page, &path[..depth]) {
            fix_group_frame(ancestor);
        }
    }
}

/// Recursively multiplies child frames when a container is resized, so
/// contents keep their relative position and extent.
pub(crate) fn scale_layer_children(layer: &mut Layer, sx: f64, sy: f64) {
    if sx == 1.0 && sy == 1.0 {
        return;
    }

    if let Some(children) = layer.children_mut() {
        for child in children {
            child.frame.x *= sx;
            child.frame.y *= sy;
            child.frame.width *= sx;
            child.frame.height *= sy;
            scale_layer_children(child, sx, sy);
        }
    }
}

/// Applies whatever geometry the new interaction state implies. Called for
/// every interaction action; states without a continuous payload are
/// no-ops.
pub(crate) fn apply_gesture_update(state: &mut ApplicationState) -> Result<(), InvariantError> {
    match &state.interaction {
        InteractionState::Drawing { .. } => {
            reframe_draft_layer(state);
            Ok(())
        }
        InteractionState::Moving { .. } => {
            move_selected_layers(state);
            Ok(())
        }
        InteractionState::Scaling { .. } => scale_selected_layers(state),
        InteractionState::MovingPoint { .. } => {
            move_selected_points(state);
            Ok(())
        }
        InteractionState::MovingControlPoint { .. } => {
            move_selected_control_point(state);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Recomputes the draft layer's frame from (origin, current) with the
/// current key modifiers. The interaction reducer keeps the plain
/// normalized rect; modifiers are a property of the application state, so
/// they are applied here.
fn reframe_draft_layer(state: &mut ApplicationState) {
    let modifiers = state.key_modifiers;

    if let InteractionState::Drawing {
        origin,
        current,
        value,
        ..
    } = &mut state.interaction
    {
        value.frame = drawn_layer_rect(*origin, *current, modifiers.shift, modifiers.alt);
    }
}

fn move_selected_layers(state: &mut ApplicationState) {
    let InteractionState::Moving { previous, next } = state.interaction else {
        return;
    };

    let selected = state.selected_layer_ids.clone();
    let page = state.current_page();
    let page_id = page.id;

    let paths = find_index_paths_excluding_descendants(page, &selected);
    if paths.is_empty() {
        return;
    }

    let raw_delta = next - previous;

    // Snap: shift the delta so the nearest in-threshold edge or center
    // pair coincides exactly.
    let snap_options = LayerTraversalOptions {
        include_hidden_layers: true,
        groups: GroupTraversal::ChildrenOnly,
        ..LayerTraversalOptions::default()
    };
    let adjustment = get_bounding_rect(page, &selected, &snap_options)
        .map(|rect| {
            let proposed = Rect {
                x: rect.x + raw_delta.x,
                y: rect.y + raw_delta.y,
                ..rect
            };
            move_snap_adjustment(page, &proposed, &selected)
        })
        .unwrap_or(Point::ZERO);

    let delta = raw_delta + adjustment;

    // The canvas delta becomes a different vector in each layer's parent
    // space: layers nested in rotated containers move along the rotated
    // axes.
    let moves: Vec<(Vec<usize>, Point)> = paths
        .iter()
        .filter_map(|path| {
            let transform =
                layer_transform_at_index_path(page, path, AffineTransform::IDENTITY);
            vector_to_local(&transform, delta).map(|local| (path.clone(), local))
        })
        .collect();

    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };

    for (path, local_delta) in &moves {
        if let Some(layer) = access_mut(page, path) {
            layer.frame.x += local_delta.x;
            layer.frame.y += local_delta.y;
        }
    }

    for (path, _) in &moves {
        fix_ancestor_groups(page, path);
    }

    debug!("moved {} layer(s) by ({}, {})", moves.len(), delta.x, delta.y);
}

fn scale_selected_layers(state: &mut ApplicationState) -> Result<(), InvariantError> {
    let InteractionState::Scaling {
        origin,
        current,
        page_snapshot,
        direction,
    } = &state.interaction
    else {
        return Ok(());
    };

    let (origin, current, direction) = (*origin, *current, *direction);
    let snapshot: Page = (**page_snapshot).clone();
    let selected = state.selected_layer_ids.clone();

    let original_rect = get_bounding_rect(
        &snapshot,
        &selected,
        &LayerTraversalOptions::default(),
    )
    .ok_or(InvariantError::MissingSelectionBounds)?;

    let delta = current - origin;
    let bounds = original_rect.bounds();

    // The dragged extent moves with the pointer on the handle's axes only,
    // then snaps against the stationary layers before the factors are
    // derived, so a resized edge lands exactly on a neighbour's.
    let extent = compass_point(&original_rect, direction);
    let new_extent = Point::new(
        extent.x + if direction.x_sign() != 0 { delta.x } else { 0.0 },
        extent.y + if direction.y_sign() != 0 { delta.y } else { 0.0 },
    );
    let new_extent = new_extent + scale_snap_adjustment(&snapshot, new_extent, direction, &selected);

    // The anchor is the opposite side, or the center with alt held.
    let anchor = if state.key_modifiers.alt {
        Point::new(bounds.mid_x, bounds.mid_y)
    } else {
        Point::new(
            match direction.x_sign() {
                -1 => bounds.max_x,
                0 => bounds.mid_x,
                _ => bounds.min_x,
            },
            match direction.y_sign() {
                -1 => bounds.max_y,
                0 => bounds.mid_y,
                _ => bounds.min_y,
            },
        )
    };

    let mut sx = if direction.x_sign() != 0 && extent.x != anchor.x {
        (new_extent.x - anchor.x) / (extent.x - anchor.x)
    } else {
        1.0
    };
    let mut sy = if direction.y_sign() != 0 && extent.y != anchor.y {
        (new_extent.y - anchor.y) / (extent.y - anchor.y)
    } else {
        1.0
    };

    if state.key_modifiers.shift {
        // Equal magnitudes, each axis keeping its own sign.
        let magnitude = if direction.x_sign() != 0 && direction.y_sign() != 0 {
            sx.abs().max(sy.abs())
        } else if direction.x_sign() != 0 {
            sx.abs()
        } else {
            sy.abs()
        };
        sx = magnitude.copysign(sx);
        sy = magnitude.copysign(sy);
    }

    let scale = AffineTransform::scale_about(sx, sy, anchor);

    // Rebuild from the snapshot so repeated updates never accumulate
    // rounding or constraint error.
    let mut new_page = snapshot.clone();
    let paths = find_index_paths_excluding_descendants(&snapshot, &selected);

    for path in &paths {
        let parent = layer_transform_at_index_path(&snapshot, path, AffineTransform::IDENTITY);
        let Some(parent_inverse) = parent.invert() else {
            continue;
        };
        let Some(old_frame) = access(&snapshot, path).map(|layer| layer.frame) else {
            continue;
        };

        // Scale in canvas space, then express the result back in the
        // layer's parent space.
        let local_scale = parent_inverse * scale * parent;
        let new_frame = local_scale.transform_rect(&old_frame);

        let fx = if old_frame.width != 0.0 {
            new_frame.width / old_frame.width
        } else {
            1.0
        };
        let fy = if old_frame.height != 0.0 {
            new_frame.height / old_frame.height
        } else {
            1.0
        };

        if let Some(layer) = access_mut(&mut new_page, path) {
            layer.frame = new_frame;
            scale_layer_children(layer, fx, fy);
        }
    }

    for path in &paths {
        fix_ancestor_groups(&mut new_page, path);
    }

    let page_id = new_page.id;
    if let Some(page) = state.document.page_mut(page_id) {
        *page = new_page;
    }

    debug!("scaled {} layer(s) by ({sx}, {sy})", paths.len());
    Ok(())
}

fn move_selected_points(state: &mut ApplicationState) {
    let InteractionState::MovingPoint { previous, next } = state.interaction else {
        return;
    };

    let raw_delta = next - previous;
    let point_lists: Vec<(Uuid, Vec<usize>)> = state
        .selected_point_lists
        .iter()
        .map(|(id, indices)| (*id, indices.clone()))
        .collect();

    let page = state.current_page();
    let page_id = page.id;

    let edits: Vec<(Vec<usize>, Vec<usize>, Point)> = point_lists
        .iter()
        .filter_map(|(layer_id, indices)| {
            let path = find_index_path(page, *layer_id)?;
            let transform =
                layer_transform_at_index_path(page, &path, AffineTransform::IDENTITY);
            let local_delta = vector_to_local(&transform, raw_delta)?;
            Some((path, indices.clone(), local_delta))
        })
        .collect();

    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };

    for (path, indices, local_delta) in &edits {
        let Some(layer) = access_mut(page, path) else {
            continue;
        };
        let frame = layer.frame;
        let Some(points) = layer.points_mut() else {
            continue;
        };

        let mut decoded: Vec<ParsedCurvePoint> =
            points.iter().map(|point| point.decode(&frame)).collect();

        for &index in indices {
            if let Some(point) = decoded.get_mut(index) {
                // Handles travel with their anchor.
                point.point = point.point + *local_delta;
                point.curve_from = point.curve_from.map(|p| p + *local_delta);
                point.curve_to = point.curve_to.map(|p| p + *local_delta);
            }
        }

        // Refit the frame to the moved anchors and re-express every point
        // against it.
        let anchors: Vec<Point> = decoded.iter().map(|point| point.point).collect();
        let Some(new_frame) = bounds_from_points(&anchors) else {
            continue;
        };

        *points = decoded
            .iter()
            .map(|point| point.encode(&new_frame))
            .collect();
        layer.frame = new_frame;
    }

    for (path, ..) in &edits {
        fix_ancestor_groups(page, path);
    }
}

fn move_selected_control_point(state: &mut ApplicationState) {
    let InteractionState::MovingControlPoint { previous, next } = state.interaction else {
        return;
    };
    let Some(selected) = state.selected_control_point else {
        return;
    };

    let raw_delta = next - previous;
    let page = state.current_page();
    let page_id = page.id;

    let Some(path) = find_index_path(page, selected.layer_id) else {
        return;
    };
    let transform = layer_transform_at_index_path(page, &path, AffineTransform::IDENTITY);
    let Some(local_delta) = vector_to_local(&transform, raw_delta) else {
        return;
    };

    let Some(page) = state.document.page_mut(page_id) else {
        return;
    };
    let Some(layer) = access_mut(page, &path) else {
        return;
    };

    let frame = layer.frame;
    let Some(points) = layer.points_mut() else {
        return;
    };
    let Some(point) = points.get_mut(selected.point_index) else {
        return;
    };

    let mut decoded = point.decode(&frame);
    apply_control_point_delta(&mut decoded, selected.control, local_delta);
    *point = decoded.encode(&frame);
}

/// Moves one control handle and keeps its partner consistent with the
/// point's curve mode: mirrored handles reflect through the anchor,
/// asymmetric ones share the angle but keep their own length.
fn apply_control_point_delta(
    point: &mut ParsedCurvePoint,
    control: ControlHandle,
    delta: Point,
) {
    use crate::model::CurveMode;

    let anchor = point.point;

    let (moved, partner) = match control {
        ControlHandle::CurveFrom => (&mut point.curve_from, &mut point.curve_to),
        ControlHandle::CurveTo => (&mut point.curve_to, &mut point.curve_from),
    };

    let Some(moved_value) = *moved else {
        return;
    };
    let new_value = moved_value + delta;
    *moved = Some(new_value);

    match point.curve_mode {
        CurveMode::Mirrored => {
            *partner = Some(anchor + (anchor - new_value));
        }
        CurveMode::Asymmetric => {
            if let Some(partner_value) = *partner {
                let opposite = anchor - new_value;
                let length = anchor.distance(partner_value);
                let magnitude = anchor.distance(new_value);

                if magnitude > 0.0 {
                    let scaled = Point::new(
                        opposite.x / magnitude * length,
                        opposite.y / magnitude * length,
                    );
                    *partner = Some(anchor + scaled);
                }
            }
        }
        CurveMode::Straight | CurveMode::Disconnected => {}
    }
}

/// Commits the drawing gesture's draft layer into the document.
///
/// The draft is parented into the topmost artboard containing the gesture
/// origin, with its frame re-expressed in that artboard's space; otherwise
/// it lands at page level. The new layer becomes the selection and the
/// interaction resets.
pub(crate) fn add_drawn_layer(
    state: &mut ApplicationState,
    ctx: &super::ReducerContext<'_>,
) -> Result<(), InvariantError> {
    let InteractionState::Drawing {
        origin,
        current,
        value,
        ..
    } = &state.interaction
    else {
        return Err(InvariantError::InvalidTransition {
            action: "addDrawnLayer",
            state: state.interaction.name(),
        });
    };

    let (origin, current) = (*origin, *current);
    let mut layer = value.clone();
    layer.frame = drawn_layer_rect(
        origin,
        current,
        state.key_modifiers.shift,
        state.key_modifiers.alt,
    )
    .normalized();

    // Text drafts have no intrinsic drag size; take the measured paragraph
    // extent so a plain click still yields a usable frame.
    if let LayerContent::Text { string, text_style } = &layer.content {
        if let Some(measurer) = ctx.measurer {
            let metrics = measurer.measure_paragraph(text_style, string, None);
            layer.frame.width = layer.frame.width.max(metrics.size.width);
            layer.frame.height = layer.frame.height.max(metrics.size.height);
        }
    }

    let layer_id = layer.id;
    let page = state.current_page();
    let page_id = page.id;

    // Topmost artboard containing the origin point adopts the new layer.
    let mut parent_path: Option<Vec<usize>> = None;
    visit_reversed(page, &mut |candidate, path| {
        if !candidate.is_artboard_or_symbol_master() {
            return TraversalControl::SkipChildren;
        }

        let transform = layer_transform_at_index_path(page, path, AffineTransform::IDENTITY);
        let canvas_frame = transform.transform_rect(&candidate.frame);

        if canvas_frame.contains_point(origin) {
            parent_path = Some(path.to_vec());
            return TraversalControl::Stop;
        }

        TraversalControl::SkipChildren
    });

    let into_local = parent_path.as_ref().and_then(|path| {
        let chain_transform =
            layer_transform_at_index_path(page, path, AffineTransform::IDENTITY);
        let artboard = access(page, path)?;
        (chain_transform
            * crate::selectors::transforms::layer_transform(
                AffineTransform::IDENTITY,
                artboard,
            ))
        .invert()
    });

    let Some(page) = state.document.page_mut(page_id) else {
        return Ok(());
    };

    match (parent_path, into_local) {
        (Some(path), Some(inverse)) => {
            let local_origin = inverse.apply_to(layer.frame.origin());
            layer.frame.x = local_origin.x;
            layer.frame.y = local_origin.y;

            if let Some(children) = access_mut(page, &path).and_then(Layer::children_mut) {
                children.push(layer);
            } else {
                page.layers.push(layer);
            }
        }
        _ => page.layers.push(layer),
    }

    debug!("committed drawn layer {layer_id}");

    state.selected_layer_ids = vec![layer_id];
    state.interaction = InteractionState::None;
    Ok(())
}
