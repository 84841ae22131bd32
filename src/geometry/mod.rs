//! Geometry primitives shared by the document model, reducers, and
//! selectors: points, rects, derived bounds, and affine transforms.
//!
//! All coordinates are f64 in a y-down canvas space.

mod point;
mod rect;
mod transform;

pub use point::{Insets, Point, Size};
pub use rect::{bounds_from_points, rotated_rect_contains_point, union_rects, Bounds, Rect};
pub use transform::AffineTransform;
