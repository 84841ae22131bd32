//! Bounding rects, hit testing, and marquee selection.

use std::collections::HashMap;

use uuid::Uuid;

use crate::document::Page;
use crate::geometry::{
    rotated_rect_contains_point, AffineTransform, Insets, Point, Rect,
};
use crate::model::{layer_path, path_contains_point, Layer, LayerContent};
use crate::selectors::traversal::{
    visit_layers_reversed, ArtboardTraversal, GroupTraversal, LayerTraversalOptions,
    TraversalControl,
};
use crate::selectors::transforms::{
    canvas_transform, layer_flip_transform, layer_rotation_transform,
    layer_transform_at_index_path, screen_transform,
};
use crate::state::ApplicationState;
use crate::text::TextMeasurer;

/// The gap between an artboard's frame and its name label.
const ARTBOARD_LABEL_MARGIN: f64 = 4.0;

/// The full local-to-canvas transform of one layer: ancestor chain, then
/// flip, then rotation. Applied to frame corners it yields the layer's
/// canvas-space quadrilateral.
fn full_layer_transform(
    page: &Page,
    layer: &Layer,
    index_path: &[usize],
    ctm: AffineTransform,
) -> AffineTransform {
    layer_transform_at_index_path(page, index_path, ctm)
        * layer_flip_transform(layer)
        * layer_rotation_transform(layer)
}

/// The axis-aligned rect containing every layer in `layer_ids`, or `None`
/// if no id matched. A real zero-area selection still returns a rect;
/// absence always means "nothing matched".
pub fn get_bounding_rect(
    page: &Page,
    layer_ids: &[Uuid],
    options: &LayerTraversalOptions,
) -> Option<Rect> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut matched = false;

    visit_layers_reversed(page, options, &mut |layer, index_path| {
        if !layer_ids.contains(&layer.id) {
            return TraversalControl::Continue;
        }
        matched = true;

        let transform =
            full_layer_transform(page, layer, index_path, AffineTransform::IDENTITY);

        for corner in layer.frame.corner_points() {
            let point = transform.apply_to(corner);
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        TraversalControl::Continue
    });

    matched.then(|| Rect::from_extents(min_x, min_y, max_x, max_y))
}

/// The canvas-space corner points of one layer's frame, topmost match
/// first. Empty if the id is not found.
pub fn get_bounding_points(
    page: &Page,
    layer_id: Uuid,
    options: &LayerTraversalOptions,
) -> Vec<Point> {
    let mut points = Vec::new();

    visit_layers_reversed(page, options, &mut |layer, index_path| {
        if layer.id != layer_id {
            return TraversalControl::Continue;
        }

        let transform =
            full_layer_transform(page, layer, index_path, AffineTransform::IDENTITY);
        points = layer
            .frame
            .corner_points()
            .iter()
            .map(|corner| transform.apply_to(*corner))
            .collect();

        TraversalControl::Stop
    });

    points
}

/// Per-id bounding rects. Ids with no match are absent from the map.
pub fn get_bounding_rect_map(
    page: &Page,
    layer_ids: &[Uuid],
    options: &LayerTraversalOptions,
) -> HashMap<Uuid, Rect> {
    let mut map = HashMap::new();

    for id in layer_ids {
        if map.contains_key(id) {
            continue;
        }
        if let Some(rect) = get_bounding_rect(page, &[*id], options) {
            map.insert(*id, rect);
        }
    }

    map
}

/// The rect a drawing gesture currently spans, always normalized.
///
/// Constrained proportions forces the longer delta onto both axes
/// (sign-preserving); center mode mirrors the rect about the origin.
pub fn drawn_layer_rect(
    origin: Point,
    current: Point,
    constrain_proportions: bool,
    center_origin: bool,
) -> Rect {
    let mut current = current;
    let mut origin = origin;

    if constrain_proportions {
        let delta = current - origin;
        let max = delta.x.abs().max(delta.y.abs());

        current = Point::new(
            origin.x + if delta.x < 0.0 { -max } else { max },
            origin.y + if delta.y < 0.0 { -max } else { max },
        );
    }

    if center_origin {
        let delta = current - origin;
        origin = origin - delta;
    }

    Rect::from_points(origin, current)
}

/// The rect of an artboard's name label, in the artboard's parent space.
fn artboard_label_rect(frame: &Rect, label_size: crate::geometry::Size) -> Rect {
    Rect::new(
        frame.x,
        frame.y - label_size.height - ARTBOARD_LABEL_MARGIN,
        label_size.width,
        label_size.height,
    )
}

fn artboard_label_contains_point(
    measurer: &dyn TextMeasurer,
    layer: &Layer,
    canvas_transform: AffineTransform,
    screen_point: Point,
) -> bool {
    let metrics = measurer.measure_paragraph(&Default::default(), &layer.name, None);
    let label = artboard_label_rect(&layer.frame, metrics.size);

    canvas_transform
        .transform_rect(&label)
        .contains_point(screen_point)
}

/// Layers whose canvas-space frame intersects `rect` (marquee selection).
///
/// Containers follow the traversal options: a group in `GroupAndChildren`
/// mode is returned itself, artboards in the interactive mode are returned
/// only when empty or fully contained by the marquee.
pub fn get_layers_in_rect<'a>(
    state: &ApplicationState,
    page: &'a Page,
    insets: &Insets,
    rect: Rect,
    options: &LayerTraversalOptions,
) -> Vec<&'a Layer> {
    let mut found = Vec::new();

    let screen_rect = screen_transform(insets).transform_rect(&rect);
    let ctm = canvas_transform(state, insets);

    visit_layers_reversed(page, options, &mut |layer, index_path| {
        let transform = layer_transform_at_index_path(page, index_path, ctm);
        let transformed_frame = transform.transform_rect(&layer.frame);

        if !transformed_frame.intersects(&screen_rect) {
            return TraversalControl::SkipChildren;
        }

        let include_self = (layer.is_group()
            && options.groups == GroupTraversal::GroupAndChildren)
            || (layer.is_artboard_or_symbol_master()
                && (options.artboards == ArtboardTraversal::ArtboardAndChildren
                    || (options.artboards
                        == ArtboardTraversal::EmptyOrContainedArtboardOrChildren
                        && (layer.children().is_empty()
                            || screen_rect.contains_rect(&transformed_frame)))));

        // Recurse and return children instead of this container.
        if !include_self && options.should_visit_children(layer) {
            return TraversalControl::Continue;
        }

        found.push(layer);
        TraversalControl::SkipChildren
    });

    found
}

/// The topmost layer at a point, in screen space.
///
/// Rotated/flipped frames are tested with the corner-quadrilateral
/// containment check; rectangle/oval/path layers additionally require the
/// point to fall inside the resolved Bézier path, so clicks pass through
/// the transparent interior corners of, say, an oval's frame. The text
/// measurer (when provided) lets empty artboards be picked up by their
/// name label.
pub fn get_layer_at_point<'a>(
    state: &'a ApplicationState,
    insets: &Insets,
    point: Point,
    options: &LayerTraversalOptions,
    measurer: Option<&dyn TextMeasurer>,
) -> Option<&'a Layer> {
    let page = state.current_page();
    let ctm = canvas_transform(state, insets);
    let screen_point = screen_transform(insets).apply_to(point);

    let mut found = None;

    visit_layers_reversed(page, options, &mut |layer, index_path| {
        let transform = full_layer_transform(page, layer, index_path, ctm);

        let corners = layer.frame.corner_points().map(|corner| transform.apply_to(corner));
        let frame_contains_point = rotated_rect_contains_point(&corners, screen_point);

        if !frame_contains_point {
            if layer.is_artboard_or_symbol_master()
                && options.artboards == ArtboardTraversal::EmptyOrContainedArtboardOrChildren
            {
                if let Some(measurer) = measurer {
                    if artboard_label_contains_point(measurer, layer, ctm, screen_point) {
                        found = Some(layer);
                        return TraversalControl::Stop;
                    }
                }
            }

            return TraversalControl::SkipChildren;
        }

        let include_artboard = layer.is_artboard_or_symbol_master()
            && (options.artboards == ArtboardTraversal::ArtboardAndChildren
                || (options.artboards == ArtboardTraversal::EmptyOrContainedArtboardOrChildren
                    && layer.children().is_empty()));

        // Containers defer to their children unless explicitly included.
        if !include_artboard && options.should_visit_children(layer) {
            return TraversalControl::Continue;
        }

        match &layer.content {
            LayerContent::Rectangle { points, is_closed, .. }
            | LayerContent::Oval { points, is_closed }
            | LayerContent::Path { points, is_closed } => {
                let Some(inverse) = transform.invert() else {
                    return TraversalControl::SkipChildren;
                };
                let local_point = inverse.apply_to(screen_point);

                // The path is built in parent-relative space, same as the
                // frame the transform was derived from.
                let path = layer_path(points, &layer.frame, *is_closed);

                if !path_contains_point(&path, local_point) {
                    return TraversalControl::SkipChildren;
                }
            }
            _ => {}
        }

        found = Some(layer);
        TraversalControl::Stop
    });

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_rect_is_always_normalized() {
        let rect = drawn_layer_rect(
            Point::new(100.0, 100.0),
            Point::new(40.0, 60.0),
            false,
            false,
        );
        assert_eq!(rect, Rect::new(40.0, 60.0, 60.0, 40.0));
    }

    #[test]
    fn constrained_drawing_forces_a_square() {
        let rect = drawn_layer_rect(
            Point::new(0.0, 0.0),
            Point::new(100.0, 40.0),
            true,
            false,
        );
        assert_eq!(rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn center_drawing_mirrors_about_the_origin() {
        let rect = drawn_layer_rect(
            Point::new(50.0, 50.0),
            Point::new(70.0, 60.0),
            false,
            true,
        );
        assert_eq!(rect, Rect::new(30.0, 40.0, 40.0, 20.0));
    }
}
