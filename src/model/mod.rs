//! The immutable document model: layers, curve points, styles, symbol
//! overrides, and constructors for fresh layers.

pub mod curve;
pub mod factory;
pub mod layer;
pub mod overrides;
pub mod style;

pub use curve::{layer_path, path_contains_point, CurveMode, CurvePoint, ParsedCurvePoint};
pub use layer::{fix_group_frame, ImageRef, Layer, LayerContent};
pub use overrides::{OverridePropertyValue, OverrideValue};
pub use style::{
    Blur, Border, BorderOptions, BorderPosition, Color, Fill, LineCapStyle, LineJoinStyle, Shadow,
    SharedStyle, SharedTextStyle, Style, TextAlignment, TextStyle,
};
