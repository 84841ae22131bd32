use serde::{Deserialize, Serialize};

use super::point::{approx_eq, Point, Size};

/// An axis-aligned rectangle.
///
/// Width and height may be transiently negative while a gesture is in
/// progress; every rect stored in the document is normalized first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The derived extents of a rect. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub mid_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub mid_y: f64,
    pub max_y: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the normalized rect spanning two corner points.
    pub fn from_points(initial: Point, terminal: Point) -> Self {
        Self {
            x: terminal.x.min(initial.x),
            y: terminal.y.min(initial.y),
            width: (terminal.x - initial.x).abs(),
            height: (terminal.y - initial.y).abs(),
        }
    }

    /// Creates a rect from its min/max extents.
    pub fn from_extents(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Returns an equivalent rect with non-negative width and height.
    pub fn normalized(&self) -> Rect {
        Rect {
            x: (self.x + self.width).min(self.x),
            y: (self.y + self.height).min(self.y),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Bounds {
        let min_x = self.x.min(self.x + self.width);
        let min_y = self.y.min(self.y + self.height);
        let max_x = self.x.max(self.x + self.width);
        let max_y = self.y.max(self.y + self.height);

        Bounds {
            min_x,
            mid_x: (min_x + max_x) / 2.0,
            max_x,
            min_y,
            mid_y: (min_y + max_y) / 2.0,
            max_y,
        }
    }

    /// The four corners in clockwise order starting from the origin.
    pub fn corner_points(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }

    /// The midpoints of the four edges, clockwise starting from the top.
    pub fn edge_midpoints(&self) -> [Point; 4] {
        let Bounds {
            min_x,
            mid_x,
            max_x,
            min_y,
            mid_y,
            max_y,
        } = self.bounds();

        [
            Point::new(mid_x, min_y),
            Point::new(max_x, mid_y),
            Point::new(mid_x, max_y),
            Point::new(min_x, mid_y),
        ]
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.x <= point.x
            && point.x <= self.x + self.width
            && self.y <= point.y
            && point.y <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let x1 = self.x.max(other.x);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y1 = self.y.max(other.y);
        let y2 = (self.y + self.height).min(other.y + other.height);

        x1 < x2 && y1 < y2
    }

    pub fn contains_rect(&self, inner: &Rect) -> bool {
        let outer = self.bounds();
        let inner = inner.bounds();

        outer.min_x <= inner.min_x
            && inner.max_x <= outer.max_x
            && outer.min_y <= inner.min_y
            && inner.max_y <= outer.max_y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);

        Rect::from_extents(min_x, min_y, max_x, max_y)
    }

    /// Shrinks the rect by `dx` horizontally and `dy` vertically on each side.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - dx * 2.0,
            height: self.height - dy * 2.0,
        }
    }
}

/// Union of a sequence of rects, or `None` when the sequence is empty.
pub fn union_rects<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, rect| acc.union(&rect))
}

/// The tightest rect containing every point, or `None` when there are none.
pub fn bounds_from_points(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Rect::from_extents(min_x, min_y, max_x, max_y))
}

fn triangle_area(p1: Point, p2: Point, p3: Point) -> f64 {
    (p1.x * p2.y + p2.x * p3.y + p3.x * p1.y - p1.y * p2.x - p2.y * p3.x - p3.y * p1.x).abs() / 2.0
}

/// Whether a point falls inside the quadrilateral given by the transformed
/// corners of a rect.
///
/// Sums the areas of the four triangles formed by the point and each edge;
/// the point lies inside exactly when the sum equals the rectangle's area.
pub fn rotated_rect_contains_point(corners: &[Point; 4], point: Point) -> bool {
    let [a, b, c, d] = *corners;

    let triangle_sum = triangle_area(a, point, d)
        + triangle_area(d, point, c)
        + triangle_area(c, point, b)
        + triangle_area(b, point, a);

    let rect_area = triangle_area(a, b, c) + triangle_area(a, c, d);

    if approx_eq(triangle_sum, rect_area) {
        return true;
    }

    triangle_sum <= rect_area
}
