use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::point::Point;
use super::rect::Rect;

/// A 2D affine transform.
///
/// Coefficients map a point as:
///
/// ```text
/// x' = m00 * x + m01 * y + m02
/// y' = m10 * x + m11 * y + m12
/// ```
///
/// Composition reads right to left: `a * b` applies `b` to a point first,
/// then `a`. Ancestor chains therefore compose root-to-leaf on the left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        m00: 1.0,
        m01: 0.0,
        m02: 0.0,
        m10: 0.0,
        m11: 1.0,
        m12: 0.0,
    };

    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            m02: x,
            m12: y,
            ..Self::IDENTITY
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            m00: sx,
            m11: sy,
            ..Self::IDENTITY
        }
    }

    /// Scale with a fixed point that maps to itself.
    pub fn scale_about(sx: f64, sy: f64, center: Point) -> Self {
        Self::translation(center.x, center.y)
            * Self::scale(sx, sy)
            * Self::translation(-center.x, -center.y)
    }

    /// Counterclockwise rotation about the origin, in radians.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();

        Self {
            m00: cos,
            m01: -sin,
            m02: 0.0,
            m10: sin,
            m11: cos,
            m12: 0.0,
        }
    }

    /// Rotation with a fixed point that maps to itself.
    pub fn rotation_about(radians: f64, center: Point) -> Self {
        Self::translation(center.x, center.y)
            * Self::rotation(radians)
            * Self::translation(-center.x, -center.y)
    }

    pub fn apply_to(&self, point: Point) -> Point {
        Point::new(
            self.m00 * point.x + self.m01 * point.y + self.m02,
            self.m10 * point.x + self.m11 * point.y + self.m12,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// The inverse transform, or `None` when this transform collapses the
    /// plane (zero determinant) and cannot be inverted.
    pub fn invert(&self) -> Option<AffineTransform> {
        let det = self.determinant();

        if det == 0.0 || !det.is_finite() {
            return None;
        }

        Some(AffineTransform {
            m00: self.m11 / det,
            m01: -self.m01 / det,
            m02: (self.m01 * self.m12 - self.m11 * self.m02) / det,
            m10: -self.m10 / det,
            m11: self.m00 / det,
            m12: (self.m10 * self.m02 - self.m00 * self.m12) / det,
        })
    }

    /// Maps a rect through this transform by its two bounding corners and
    /// normalizes the result. Rotation is not representable in the result;
    /// callers needing rotated extents map `corner_points` individually.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let bounds = rect.bounds();
        let p1 = self.apply_to(Point::new(bounds.min_x, bounds.min_y));
        let p2 = self.apply_to(Point::new(bounds.max_x, bounds.max_y));

        Rect::from_points(p1, p2)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        AffineTransform {
            m00: self.m00 * rhs.m00 + self.m01 * rhs.m10,
            m01: self.m00 * rhs.m01 + self.m01 * rhs.m11,
            m02: self.m00 * rhs.m02 + self.m01 * rhs.m12 + self.m02,
            m10: self.m10 * rhs.m00 + self.m11 * rhs.m10,
            m11: self.m10 * rhs.m01 + self.m11 * rhs.m11,
            m12: self.m10 * rhs.m02 + self.m11 * rhs.m12 + self.m12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_leaves_points_alone() {
        let p = Point::new(3.5, -2.0);
        assert_eq!(AffineTransform::IDENTITY.apply_to(p), p);
    }

    #[test]
    fn composition_applies_right_hand_side_first() {
        let translate = AffineTransform::translation(10.0, 0.0);
        let scale = AffineTransform::scale(2.0, 2.0);

        // Scale first, then translate.
        let combined = translate * scale;
        assert_eq!(
            combined.apply_to(Point::new(1.0, 1.0)),
            Point::new(12.0, 2.0)
        );

        // Translate first, then scale.
        let combined = scale * translate;
        assert_eq!(
            combined.apply_to(Point::new(1.0, 1.0)),
            Point::new(22.0, 2.0)
        );
    }

    #[test]
    fn rotation_about_center_fixes_the_center() {
        let center = Point::new(50.0, 50.0);
        let rotated = AffineTransform::rotation_about(std::f64::consts::FRAC_PI_2, center);

        let fixed = rotated.apply_to(center);
        assert!((fixed.x - center.x).abs() < 1e-9);
        assert!((fixed.y - center.y).abs() < 1e-9);

        let moved = rotated.apply_to(Point::new(60.0, 50.0));
        assert!((moved.x - 50.0).abs() < 1e-9);
        assert!((moved.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn invert_round_trips_points() {
        let transform = AffineTransform::translation(12.0, -7.0)
            * AffineTransform::rotation(0.31)
            * AffineTransform::scale(2.0, 0.5);
        let inverse = transform.invert().unwrap();

        let p = Point::new(4.2, 9.9);
        let round_tripped = inverse.apply_to(transform.apply_to(p));

        assert!((round_tripped.x - p.x).abs() < 1e-9);
        assert!((round_tripped.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn degenerate_transform_has_no_inverse() {
        assert!(AffineTransform::scale(0.0, 1.0).invert().is_none());
    }

    #[test]
    fn transform_rect_normalizes() {
        let flipped = AffineTransform::scale(-1.0, 1.0);
        let rect = flipped.transform_rect(&Rect::new(10.0, 0.0, 30.0, 20.0));

        assert_eq!(rect, Rect::new(-40.0, 0.0, 30.0, 20.0));
    }
}
