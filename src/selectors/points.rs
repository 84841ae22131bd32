//! Selected curve point resolution.

use uuid::Uuid;

use crate::model::ParsedCurvePoint;
use crate::selectors::geometry::get_bounding_rect_map;
use crate::selectors::traversal::{visit, TraversalControl};
use crate::state::ApplicationState;

/// One selected curve point, decoded into canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedPoint {
    pub layer_id: Uuid,
    pub index: usize,
    pub point: ParsedCurvePoint,
}

/// Decodes every selected point of every points-bearing layer against the
/// layer's canvas-space bounding rect. Stale layer ids and out-of-range
/// indices in the selection simply produce nothing.
pub fn get_selected_points(state: &ApplicationState) -> Vec<SelectedPoint> {
    let page = state.current_page();
    let layer_ids: Vec<Uuid> = state.selected_point_lists.keys().copied().collect();
    let bounding_rects = get_bounding_rect_map(page, &layer_ids, &Default::default());

    let mut selected = Vec::new();

    visit(page, &mut |layer, _| {
        let (Some(bounding_rect), Some(point_list)) = (
            bounding_rects.get(&layer.id),
            state.selected_point_lists.get(&layer.id),
        ) else {
            return TraversalControl::Continue;
        };

        let Some(points) = layer.points() else {
            return TraversalControl::Continue;
        };

        for &index in point_list {
            if let Some(point) = points.get(index) {
                selected.push(SelectedPoint {
                    layer_id: layer.id,
                    index,
                    point: point.decode(bounding_rect),
                });
            }
        }

        TraversalControl::Continue
    });

    selected
}
