//! Constructors for fresh layers with default geometry and style.
//!
//! Every constructor assigns a new v4 UUID; ids are never reused, so two
//! calls with identical arguments still produce distinct layers.

use uuid::Uuid;

use crate::geometry::{Point, Rect};
use crate::model::curve::CurvePoint;
use crate::model::layer::{Layer, LayerContent};
use crate::model::overrides::OverrideValue;
use crate::model::style::{Color, Fill, Style, TextStyle};

/// The magic constant for approximating a quarter circle with one cubic
/// Bézier segment.
const CIRCLE_CONSTANT: f64 = 0.552_284_749_830_793_4;

fn default_shape_style() -> Style {
    Style {
        fills: vec![Fill::new(Color::new(0.85, 0.85, 0.85, 1.0))],
        ..Style::default()
    }
}

/// Four straight corner points of the unit square, clockwise from the
/// top-left.
fn rectangle_points() -> Vec<CurvePoint> {
    vec![
        CurvePoint::straight(0.0, 0.0),
        CurvePoint::straight(1.0, 0.0),
        CurvePoint::straight(1.0, 1.0),
        CurvePoint::straight(0.0, 1.0),
    ]
}

/// Four mirrored curve points tracing the unit circle, starting from the
/// bottom midpoint.
fn oval_points() -> Vec<CurvePoint> {
    let c = CIRCLE_CONSTANT / 2.0;

    vec![
        CurvePoint::mirrored(
            Point::new(0.5, 1.0),
            Point::new(0.5 - c, 1.0),
            Point::new(0.5 + c, 1.0),
        ),
        CurvePoint::mirrored(
            Point::new(0.0, 0.5),
            Point::new(0.0, 0.5 - c),
            Point::new(0.0, 0.5 + c),
        ),
        CurvePoint::mirrored(
            Point::new(0.5, 0.0),
            Point::new(0.5 + c, 0.0),
            Point::new(0.5 - c, 0.0),
        ),
        CurvePoint::mirrored(
            Point::new(1.0, 0.5),
            Point::new(1.0, 0.5 + c),
            Point::new(1.0, 0.5 - c),
        ),
    ]
}

pub fn rectangle(frame: Rect) -> Layer {
    let mut layer = Layer::new(
        "Rectangle",
        frame,
        LayerContent::Rectangle {
            points: rectangle_points(),
            is_closed: true,
            fixed_radius: 0.0,
        },
    );
    layer.style = Some(default_shape_style());
    layer
}

pub fn oval(frame: Rect) -> Layer {
    let mut layer = Layer::new(
        "Oval",
        frame,
        LayerContent::Oval {
            points: oval_points(),
            is_closed: true,
        },
    );
    layer.style = Some(default_shape_style());
    layer
}

/// An open two-point path from the frame's bottom-left to its top-right.
pub fn line(frame: Rect) -> Layer {
    let mut layer = Layer::new(
        "Line",
        frame,
        LayerContent::Path {
            points: vec![
                CurvePoint::straight(0.0, 1.0),
                CurvePoint::straight(1.0, 0.0),
            ],
            is_closed: false,
        },
    );
    layer.style = Some(default_shape_style());
    layer
}

pub fn text(frame: Rect, string: &str) -> Layer {
    Layer::new(
        "Text",
        frame,
        LayerContent::Text {
            string: string.to_string(),
            text_style: TextStyle::default(),
        },
    )
}

pub fn group(name: &str, layers: Vec<Layer>) -> Layer {
    Layer::new(
        name,
        Rect::ZERO,
        LayerContent::Group {
            layers,
            has_click_through: false,
        },
    )
}

pub fn artboard(name: &str, frame: Rect, layers: Vec<Layer>) -> Layer {
    Layer::new(
        name,
        frame,
        LayerContent::Artboard {
            layers,
            background_color: None,
        },
    )
}

pub fn symbol_master(name: &str, frame: Rect, layers: Vec<Layer>) -> Layer {
    Layer::new(
        name,
        frame,
        LayerContent::SymbolMaster {
            symbol_id: Uuid::new_v4(),
            layers,
            background_color: None,
            include_background_color_in_instance: false,
        },
    )
}

pub fn symbol_instance(name: &str, frame: Rect, symbol_id: Uuid) -> Layer {
    Layer::new(
        name,
        frame,
        LayerContent::SymbolInstance {
            symbol_id,
            overrides: Vec::<OverrideValue>::new(),
        },
    )
}

pub fn bitmap(name: &str, frame: Rect, image: crate::model::layer::ImageRef) -> Layer {
    Layer::new(name, frame, LayerContent::Bitmap { image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::curve::CurveMode;

    #[test]
    fn constructors_assign_unique_ids() {
        let frame = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_ne!(rectangle(frame).id, rectangle(frame).id);
    }

    #[test]
    fn oval_points_trace_the_unit_circle() {
        let layer = oval(Rect::new(0.0, 0.0, 1.0, 1.0));
        let points = layer.points().unwrap();

        assert_eq!(points.len(), 4);
        assert!(points
            .iter()
            .all(|p| p.curve_mode == CurveMode::Mirrored));
    }

    #[test]
    fn line_is_an_open_two_point_path() {
        let layer = line(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(layer.points().unwrap().len(), 2);
        assert!(!layer.is_closed());
    }
}
