use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub is_enabled: bool,
    pub color: Color,
}

impl Fill {
    pub fn new(color: Color) -> Self {
        Self {
            is_enabled: true,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderPosition {
    Inside,
    Center,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub is_enabled: bool,
    pub color: Color,
    pub thickness: f64,
    pub position: BorderPosition,
}

impl Border {
    pub fn new(color: Color, thickness: f64) -> Self {
        Self {
            is_enabled: true,
            color,
            thickness,
            position: BorderPosition::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCapStyle {
    Butt,
    Round,
    Projecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoinStyle {
    Miter,
    Round,
    Bevel,
}

/// Stroke options shared by every border of a style: the dash pattern and
/// the cap and join applied at segment ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderOptions {
    pub is_enabled: bool,
    /// Alternating dash and gap lengths; empty means a solid stroke.
    pub dash_pattern: Vec<f64>,
    pub line_cap_style: LineCapStyle,
    pub line_join_style: LineJoinStyle,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            is_enabled: true,
            dash_pattern: Vec::new(),
            line_cap_style: LineCapStyle::Butt,
            line_join_style: LineJoinStyle::Miter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub is_enabled: bool,
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    pub spread: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blur {
    pub is_enabled: bool,
    pub radius: f64,
}

/// The paint attributes a rasterizer needs to draw a layer.
///
/// Style data is carried opaquely by the core: reducers copy and reference
/// it but never interpret it beyond enabled/disabled flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub border_options: BorderOptions,
    pub shadows: Vec<Shadow>,
    pub blur: Option<Blur>,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fills: Vec::new(),
            borders: Vec::new(),
            border_options: BorderOptions::default(),
            shadows: Vec::new(),
            blur: None,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Left,
    Centered,
    Right,
    Justified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: Color,
    pub alignment: TextAlignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 12.0,
            color: Color::BLACK,
            alignment: TextAlignment::Left,
        }
    }
}

/// A named, reusable layer style referenced by id from layers and overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedStyle {
    pub id: Uuid,
    pub name: String,
    pub value: Style,
}

impl SharedStyle {
    pub fn new(name: &str, value: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            value,
        }
    }
}

/// A named, reusable text style referenced by id from overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedTextStyle {
    pub id: Uuid,
    pub name: String,
    pub value: TextStyle,
}

impl SharedTextStyle {
    pub fn new(name: &str, value: TextStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            value,
        }
    }
}
