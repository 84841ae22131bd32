//! Scale handles around the selection's bounding rect.

use crate::geometry::{Bounds, Point, Rect};
use crate::selectors::geometry::get_bounding_rect;
use crate::selectors::traversal::LayerTraversalOptions;
use crate::state::{ApplicationState, CompassDirection};

/// On-screen edge length of a handle at 100% zoom.
const HANDLE_SIZE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHandle {
    pub rect: Rect,
    pub direction: CompassDirection,
}

/// The anchor position of a compass handle on a rect: corners for the
/// diagonal directions, edge midpoints for the cardinal ones.
pub fn compass_point(rect: &Rect, direction: CompassDirection) -> Point {
    let Bounds {
        min_x,
        mid_x,
        max_x,
        min_y,
        mid_y,
        max_y,
    } = rect.bounds();

    let x = match direction.x_sign() {
        -1 => min_x,
        0 => mid_x,
        _ => max_x,
    };
    let y = match direction.y_sign() {
        -1 => min_y,
        0 => mid_y,
        _ => max_y,
    };

    Point::new(x, y)
}

/// The eight scale handles around a selection rect. Handles keep a constant
/// on-screen size, so their page-space extent shrinks as zoom grows.
pub fn get_drag_handles(bounding_rect: &Rect, zoom: f64) -> Vec<DragHandle> {
    let size = HANDLE_SIZE / zoom;

    CompassDirection::ALL
        .iter()
        .map(|direction| {
            let center = compass_point(bounding_rect, *direction);

            DragHandle {
                rect: Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
                direction: *direction,
            }
        })
        .collect()
}

/// The scale handle containing `point`, if any. `None` also when there is
/// no selection to scale.
pub fn get_scale_direction_at_point(
    state: &ApplicationState,
    point: Point,
) -> Option<CompassDirection> {
    let page = state.current_page();
    let bounding_rect = get_bounding_rect(
        page,
        &state.selected_layer_ids,
        &LayerTraversalOptions::default(),
    )?;

    let zoom = state.current_page_metadata().zoom;

    get_drag_handles(&bounding_rect, zoom)
        .into_iter()
        .find(|handle| handle.rect.contains_point(point))
        .map(|handle| handle.direction)
}
