use kurbo::{BezPath, Shape};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveMode {
    /// No control handles; segments touching this point are straight.
    Straight,
    /// Both handles move together, mirrored through the anchor.
    Mirrored,
    /// Handles share an angle through the anchor but keep their own lengths.
    Asymmetric,
    /// Handles move independently.
    Disconnected,
}

/// One anchor of a vector path.
///
/// Coordinates are normalized to the owning layer's frame: `(0, 0)` is the
/// frame origin and `(1, 1)` the opposite corner, so resizing the frame
/// rescales the path for free. `decode` against a rect to get absolute
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub point: Point,
    /// Outgoing control point, toward the next anchor.
    pub curve_from: Option<Point>,
    /// Incoming control point, from the previous anchor.
    pub curve_to: Option<Point>,
    pub curve_mode: CurveMode,
    pub corner_radius: f64,
}

impl CurvePoint {
    pub fn straight(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            curve_from: None,
            curve_to: None,
            curve_mode: CurveMode::Straight,
            corner_radius: 0.0,
        }
    }

    pub fn mirrored(point: Point, curve_from: Point, curve_to: Point) -> Self {
        Self {
            point,
            curve_from: Some(curve_from),
            curve_to: Some(curve_to),
            curve_mode: CurveMode::Mirrored,
            corner_radius: 0.0,
        }
    }

    /// Resolves normalized coordinates against `rect`.
    pub fn decode(&self, rect: &Rect) -> ParsedCurvePoint {
        let scale = |p: Point| Point::new(rect.x + p.x * rect.width, rect.y + p.y * rect.height);

        ParsedCurvePoint {
            point: scale(self.point),
            curve_from: self.curve_from.map(scale),
            curve_to: self.curve_to.map(scale),
            curve_mode: self.curve_mode,
            corner_radius: self.corner_radius,
        }
    }
}

/// A curve point with coordinates resolved against a concrete rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedCurvePoint {
    pub point: Point,
    pub curve_from: Option<Point>,
    pub curve_to: Option<Point>,
    pub curve_mode: CurveMode,
    pub corner_radius: f64,
}

impl ParsedCurvePoint {
    /// Re-normalizes absolute coordinates against `rect`. A zero-extent axis
    /// maps every coordinate on that axis to 0.
    pub fn encode(&self, rect: &Rect) -> CurvePoint {
        let normalize = |p: Point| {
            let x = if rect.width == 0.0 {
                0.0
            } else {
                (p.x - rect.x) / rect.width
            };
            let y = if rect.height == 0.0 {
                0.0
            } else {
                (p.y - rect.y) / rect.height
            };
            Point::new(x, y)
        };

        CurvePoint {
            point: normalize(self.point),
            curve_from: self.curve_from.map(normalize),
            curve_to: self.curve_to.map(normalize),
            curve_mode: self.curve_mode,
            corner_radius: self.corner_radius,
        }
    }
}

fn to_kurbo(point: Point) -> kurbo::Point {
    kurbo::Point::new(point.x, point.y)
}

fn push_segment(path: &mut BezPath, current: &ParsedCurvePoint, next: &ParsedCurvePoint) {
    if current.curve_mode == CurveMode::Straight && next.curve_mode == CurveMode::Straight {
        path.line_to(to_kurbo(next.point));
    } else {
        let c1 = current.curve_from.unwrap_or(current.point);
        let c2 = next.curve_to.unwrap_or(next.point);
        path.curve_to(to_kurbo(c1), to_kurbo(c2), to_kurbo(next.point));
    }
}

/// Builds the Bézier path of a points layer, in the same coordinate space as
/// `frame` (i.e. parent-relative, with the frame offset applied).
pub fn layer_path(points: &[CurvePoint], frame: &Rect, is_closed: bool) -> BezPath {
    let decoded: Vec<ParsedCurvePoint> = points.iter().map(|p| p.decode(frame)).collect();

    let mut path = BezPath::new();

    let Some(first) = decoded.first() else {
        return path;
    };

    path.move_to(to_kurbo(first.point));

    for pair in decoded.windows(2) {
        push_segment(&mut path, &pair[0], &pair[1]);
    }

    if is_closed && decoded.len() > 1 {
        push_segment(&mut path, &decoded[decoded.len() - 1], first);
        path.close_path();
    }

    path
}

/// Point-in-path test using the nonzero winding rule.
pub fn path_contains_point(path: &BezPath, point: Point) -> bool {
    path.contains(to_kurbo(point))
}
