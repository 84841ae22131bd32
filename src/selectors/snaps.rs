//! Snapping and alignment guides.
//!
//! A snap value is one of a rect's min/mid/max coordinates on an axis. A
//! snap pairs a source value (from the dragged or resized selection) with a
//! target value (from a stationary layer); during a gesture the delta is
//! shifted so the nearest pair within the threshold coincides exactly, and
//! the pairs that coincide are displayed as alignment guides.

use uuid::Uuid;

use crate::document::Page;
use crate::geometry::{Point, Rect};
use crate::selectors::geometry::get_bounding_rect_map;
use crate::selectors::traversal::{
    visit_layers_reversed, GroupTraversal, LayerTraversalOptions, TraversalControl,
};
use crate::state::CompassDirection;

/// Maximum page-space distance at which a snap engages.
pub const SNAP_THRESHOLD: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn cross(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// The min, mid, and max coordinates of a rect on one axis: its edges plus
/// center, the values layers align on.
pub fn snap_values(rect: &Rect, axis: Axis) -> [f64; 3] {
    let bounds = rect.bounds();

    match axis {
        Axis::X => [bounds.min_x, bounds.mid_x, bounds.max_x],
        Axis::Y => [bounds.min_y, bounds.mid_y, bounds.max_y],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub source: f64,
    pub target: f64,
    pub target_id: Uuid,
}

/// Every (source, target) pairing for one target layer.
pub fn get_snaps(source_values: &[f64], target_values: &[f64], target_id: Uuid) -> Vec<Snap> {
    source_values
        .iter()
        .flat_map(|&source| {
            target_values.iter().map(move |&target| Snap {
                source,
                target,
                target_id,
            })
        })
        .collect()
}

/// Candidate layers a gesture can snap against: the current page's layers
/// in traversal order, minus the excluded selection and everything inside
/// it.
pub fn possible_snap_targets(page: &Page, excluding: &[Uuid]) -> Vec<Uuid> {
    let mut targets = Vec::new();
    let options = LayerTraversalOptions {
        groups: GroupTraversal::GroupOnly,
        ..LayerTraversalOptions::default()
    };

    visit_layers_reversed(page, &options, &mut |layer, _| {
        if excluding.contains(&layer.id) {
            return TraversalControl::SkipChildren;
        }

        targets.push(layer.id);
        TraversalControl::Continue
    });

    targets
}

/// The smallest in-threshold shift aligning a source value with a target
/// value, or `None` when nothing is within reach.
pub fn snap_adjustment(source_values: &[f64], target_values: &[f64]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for &source in source_values {
        for &target in target_values {
            let shift = target - source;

            if shift.abs() <= SNAP_THRESHOLD
                && best.is_none_or(|current| shift.abs() < current.abs())
            {
                best = Some(shift);
            }
        }
    }

    best
}

/// The per-axis shift that snaps `source_rect` against the candidate
/// targets. Zero on an axis with nothing in range.
pub fn move_snap_adjustment(page: &Page, source_rect: &Rect, excluding: &[Uuid]) -> Point {
    let targets = possible_snap_targets(page, excluding);
    let rect_map = get_bounding_rect_map(page, &targets, &LayerTraversalOptions::default());

    let mut adjustment = Point::ZERO;

    for axis in Axis::BOTH {
        let source_values = snap_values(source_rect, axis);

        let mut best: Option<f64> = None;
        for target in &targets {
            let Some(target_rect) = rect_map.get(target) else {
                continue;
            };

            if let Some(shift) = snap_adjustment(&source_values, &snap_values(target_rect, axis))
            {
                if best.is_none_or(|current| shift.abs() < current.abs()) {
                    best = Some(shift);
                }
            }
        }

        match axis {
            Axis::X => adjustment.x = best.unwrap_or(0.0),
            Axis::Y => adjustment.y = best.unwrap_or(0.0),
        }
    }

    adjustment
}

/// The per-axis shift that snaps a dragged scale handle's extent point
/// against the candidate targets. Only the axes the handle drags are
/// considered; zero on an axis with nothing in range.
pub fn scale_snap_adjustment(
    page: &Page,
    extent: Point,
    direction: CompassDirection,
    excluding: &[Uuid],
) -> Point {
    let targets = possible_snap_targets(page, excluding);
    let rect_map = get_bounding_rect_map(page, &targets, &LayerTraversalOptions::default());

    let mut adjustment = Point::ZERO;

    for axis in Axis::BOTH {
        let engaged = match axis {
            Axis::X => direction.x_sign() != 0,
            Axis::Y => direction.y_sign() != 0,
        };
        if !engaged {
            continue;
        }

        let source = match axis {
            Axis::X => [extent.x],
            Axis::Y => [extent.y],
        };

        let mut best: Option<f64> = None;
        for target in &targets {
            let Some(target_rect) = rect_map.get(target) else {
                continue;
            };

            if let Some(shift) = snap_adjustment(&source, &snap_values(target_rect, axis)) {
                if best.is_none_or(|current| shift.abs() < current.abs()) {
                    best = Some(shift);
                }
            }
        }

        match axis {
            Axis::X => adjustment.x = best.unwrap_or(0.0),
            Axis::Y => adjustment.y = best.unwrap_or(0.0),
        }
    }

    adjustment
}

/// A displayed alignment hint: a segment along the shared coordinate
/// spanning the source and every snapped target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentGuide {
    /// The axis the shared coordinate lies on.
    pub axis: Axis,
    pub start: Point,
    pub end: Point,
}

fn make_point(axis: Axis, on_axis: f64, cross: f64) -> Point {
    match axis {
        Axis::X => Point::new(on_axis, cross),
        Axis::Y => Point::new(cross, on_axis),
    }
}

/// Separation between two rects on one axis; zero when they overlap.
fn rect_gap(a: &Rect, b: &Rect, axis: Axis) -> f64 {
    let (a, b) = (a.bounds(), b.bounds());
    let (a_min, a_max, b_min, b_max) = match axis {
        Axis::X => (a.min_x, a.max_x, b.min_x, b.max_x),
        Axis::Y => (a.min_y, a.max_y, b.min_y, b.max_y),
    };

    (b_min - a_max).max(a_min - b_max).max(0.0)
}

/// Alignment guides between a source rect and the page's candidate layers:
/// at most one guide per axis, chosen from the exactly-coinciding snap
/// pairs.
///
/// Pairs sharing a source value merge into one guide spanning the combined
/// extent of the source and its targets. When several source values have
/// coinciding pairs on the same axis, the guide whose targets sit nearest
/// (smallest cross-axis gap) wins; the sort is stable, so exact distance
/// ties keep first-encountered order.
pub fn alignment_guides(page: &Page, source_rect: &Rect, excluding: &[Uuid]) -> Vec<AlignmentGuide> {
    let targets = possible_snap_targets(page, excluding);
    let rect_map = get_bounding_rect_map(page, &targets, &LayerTraversalOptions::default());

    let mut guides = Vec::new();

    for axis in Axis::BOTH {
        let source_values = snap_values(source_rect, axis);

        let snaps: Vec<Snap> = targets
            .iter()
            .filter_map(|id| rect_map.get(id).map(|rect| (*id, rect)))
            .flat_map(|(id, rect)| get_snaps(&source_values, &snap_values(rect, axis), id))
            .filter(|snap| snap.source == snap.target)
            .collect();

        if snaps.is_empty() {
            continue;
        }

        // Group coinciding pairs by their shared source value, keeping the
        // order the values were encountered in.
        let mut groups: Vec<(f64, Vec<Snap>)> = Vec::new();
        for snap in snaps {
            match groups.iter_mut().find(|(value, _)| *value == snap.source) {
                Some((_, group)) => group.push(snap),
                None => groups.push((snap.source, vec![snap])),
            }
        }

        let guide_of = |group: &[Snap]| -> AlignmentGuide {
            let cross = axis.cross();
            let [mut min, _, mut max] = snap_values(source_rect, cross);

            for snap in group {
                if let Some(rect) = rect_map.get(&snap.target_id) {
                    let values = snap_values(rect, cross);
                    min = min.min(values[0]);
                    max = max.max(values[2]);
                }
            }

            AlignmentGuide {
                axis,
                start: make_point(axis, group[0].target, min),
                end: make_point(axis, group[0].target, max),
            }
        };

        let group_distance = |group: &[Snap]| -> f64 {
            group
                .iter()
                .filter_map(|snap| rect_map.get(&snap.target_id))
                .map(|rect| rect_gap(source_rect, rect, axis.cross()))
                .fold(f64::INFINITY, f64::min)
        };

        // Stable sort: equal minimal distances keep input order.
        let mut ordered: Vec<&(f64, Vec<Snap>)> = groups.iter().collect();
        ordered.sort_by(|a, b| {
            group_distance(&a.1)
                .partial_cmp(&group_distance(&b.1))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some((_, group)) = ordered.first() {
            guides.push(guide_of(group));
        }
    }

    guides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_values_are_edges_and_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 60.0);
        assert_eq!(snap_values(&rect, Axis::X), [10.0, 60.0, 110.0]);
        assert_eq!(snap_values(&rect, Axis::Y), [20.0, 50.0, 80.0]);
    }

    #[test]
    fn nearest_shift_within_threshold_wins() {
        // min edge is 3 away from 100, max edge 5 away from 158.
        let adjustment = snap_adjustment(&[97.0, 125.0, 153.0], &[100.0, 158.0]).unwrap();
        assert_eq!(adjustment, 3.0);
    }

    #[test]
    fn out_of_threshold_values_do_not_snap() {
        assert!(snap_adjustment(&[0.0, 50.0, 100.0], &[110.0]).is_none());
    }
}
