use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{union_rects, Rect};
use crate::model::curve::CurvePoint;
use crate::model::overrides::OverrideValue;
use crate::model::style::{Color, Style, TextStyle};

/// A reference to externally stored image data, e.g. a key into an asset
/// store. The core never decodes pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

/// The kind-specific payload of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerContent {
    Rectangle {
        points: Vec<CurvePoint>,
        is_closed: bool,
        fixed_radius: f64,
    },
    Oval {
        points: Vec<CurvePoint>,
        is_closed: bool,
    },
    Path {
        points: Vec<CurvePoint>,
        is_closed: bool,
    },
    Text {
        string: String,
        text_style: TextStyle,
    },
    Bitmap {
        image: ImageRef,
    },
    Slice,
    Group {
        layers: Vec<Layer>,
        has_click_through: bool,
    },
    Artboard {
        layers: Vec<Layer>,
        background_color: Option<Color>,
    },
    SymbolMaster {
        symbol_id: Uuid,
        layers: Vec<Layer>,
        background_color: Option<Color>,
        include_background_color_in_instance: bool,
    },
    SymbolInstance {
        symbol_id: Uuid,
        overrides: Vec<OverrideValue>,
    },
}

/// A node in a page's layer tree.
///
/// `frame` is relative to the parent's coordinate space. `rotation` is in
/// degrees; groups store it with an inverted sign relative to all other
/// kinds, which `rotation_degrees` undoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier, assigned at creation and never reused.
    pub id: Uuid,
    /// Display name of the layer.
    pub name: String,
    /// Parent-relative bounding frame. Always normalized once committed.
    pub frame: Rect,
    /// Rotation in degrees, in the stored sign convention.
    pub rotation: f64,
    pub is_visible: bool,
    pub is_locked: bool,
    pub is_flipped_horizontal: bool,
    pub is_flipped_vertical: bool,
    /// Paint attributes; `None` inherits nothing and draws nothing.
    pub style: Option<Style>,
    /// Id of the shared style this layer's style was copied from, if any.
    pub shared_style_id: Option<Uuid>,
    pub content: LayerContent,
}

impl Layer {
    pub fn new(name: &str, frame: Rect, content: LayerContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            frame,
            rotation: 0.0,
            is_visible: true,
            is_locked: false,
            is_flipped_horizontal: false,
            is_flipped_vertical: false,
            style: None,
            shared_style_id: None,
            content,
        }
    }

    /// Child layers for container kinds, or an empty slice.
    pub fn children(&self) -> &[Layer] {
        match &self.content {
            LayerContent::Group { layers, .. }
            | LayerContent::Artboard { layers, .. }
            | LayerContent::SymbolMaster { layers, .. } => layers,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match &mut self.content {
            LayerContent::Group { layers, .. }
            | LayerContent::Artboard { layers, .. }
            | LayerContent::SymbolMaster { layers, .. } => Some(layers),
            _ => None,
        }
    }

    /// Curve points for points-bearing kinds (rectangle, oval, path).
    pub fn points(&self) -> Option<&[CurvePoint]> {
        match &self.content {
            LayerContent::Rectangle { points, .. }
            | LayerContent::Oval { points, .. }
            | LayerContent::Path { points, .. } => Some(points),
            _ => None,
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut Vec<CurvePoint>> {
        match &mut self.content {
            LayerContent::Rectangle { points, .. }
            | LayerContent::Oval { points, .. }
            | LayerContent::Path { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Whether the path closes back to its first point. False for layers
    /// without points.
    pub fn is_closed(&self) -> bool {
        match &self.content {
            LayerContent::Rectangle { is_closed, .. }
            | LayerContent::Oval { is_closed, .. }
            | LayerContent::Path { is_closed, .. } => *is_closed,
            _ => false,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.content, LayerContent::Group { .. })
    }

    pub fn is_artboard(&self) -> bool {
        matches!(self.content, LayerContent::Artboard { .. })
    }

    pub fn is_symbol_master(&self) -> bool {
        matches!(self.content, LayerContent::SymbolMaster { .. })
    }

    pub fn is_symbol_instance(&self) -> bool {
        matches!(self.content, LayerContent::SymbolInstance { .. })
    }

    pub fn is_artboard_or_symbol_master(&self) -> bool {
        self.is_artboard() || self.is_symbol_master()
    }

    pub fn is_points_layer(&self) -> bool {
        self.points().is_some()
    }

    pub fn has_click_through(&self) -> bool {
        matches!(
            self.content,
            LayerContent::Group {
                has_click_through: true,
                ..
            }
        )
    }

    /// Groups rotate with an inverted sign relative to every other kind.
    pub fn rotation_multiplier(&self) -> f64 {
        if self.is_group() { -1.0 } else { 1.0 }
    }

    /// Effective rotation in degrees, with the sign convention applied.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation * self.rotation_multiplier()
    }

    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees().to_radians()
    }
}

/// Refits a group's frame to the union of its children's frames.
///
/// Children are rebased so the union starts at the group-local origin; the
/// group's own frame absorbs the shift, keeping every child's absolute
/// position unchanged. Call after any mutation of a group's children.
pub fn fix_group_frame(group: &mut Layer) {
    if !group.is_group() {
        return;
    }

    let Some(children) = group.children_mut() else {
        return;
    };

    let Some(union) = union_rects(children.iter().map(|child| child.frame)) else {
        return;
    };

    for child in children.iter_mut() {
        child.frame.x -= union.x;
        child.frame.y -= union.y;
    }

    group.frame = Rect::new(
        group.frame.x + union.x,
        group.frame.y + union.y,
        union.width,
        union.height,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::factory;

    #[test]
    fn group_frame_refits_to_children() {
        let mut a = factory::rectangle(Rect::new(10.0, 10.0, 50.0, 50.0));
        let b = factory::rectangle(Rect::new(100.0, 20.0, 40.0, 80.0));
        a.name = "A".to_string();

        let mut group = factory::group("Group", vec![a, b]);
        group.frame.x = 5.0;
        group.frame.y = 5.0;
        fix_group_frame(&mut group);

        assert_eq!(group.frame, Rect::new(15.0, 15.0, 130.0, 90.0));
        assert_eq!(group.children()[0].frame.origin(), crate::geometry::Point::ZERO);
        assert_eq!(
            group.children()[1].frame.origin(),
            crate::geometry::Point::new(90.0, 10.0)
        );
    }

    #[test]
    fn rotation_sign_flips_for_groups() {
        let rect = factory::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut group = factory::group("Group", vec![rect.clone()]);

        group.rotation = 90.0;
        let mut plain = rect;
        plain.rotation = 90.0;

        assert_eq!(group.rotation_degrees(), -90.0);
        assert_eq!(plain.rotation_degrees(), 90.0);
    }
}
