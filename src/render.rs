//! Rendering boundary: walking a page and handing resolved geometry to an
//! injected [`Rasterizer`].
//!
//! The core owns what to draw and in which coordinate space; the host owns
//! how pixels are produced. Paths are resolved to canvas space before they
//! cross the boundary, so a rasterizer never needs the layer tree.

use kurbo::BezPath;

use crate::document::Document;
use crate::geometry::{AffineTransform, Rect};
use crate::model::{layer_path, Color, ImageRef, Layer, LayerContent, Style, TextStyle};
use crate::selectors::symbols::resolve_symbol_instance;
use crate::selectors::transforms::{
    layer_flip_transform, layer_rotation_transform, layer_transform,
};

/// Drawing primitives implemented by the rendering host.
///
/// Calls arrive bottom-most first; painting them in order yields the
/// correct stacking.
pub trait Rasterizer {
    fn fill_path(&mut self, path: &BezPath, color: Color, opacity: f64);
    fn stroke_path(&mut self, path: &BezPath, color: Color, thickness: f64, opacity: f64);
    /// Draws externally stored image data into a canvas-space quad.
    fn draw_image(&mut self, image: &ImageRef, frame: Rect, transform: &AffineTransform);
    fn draw_text(
        &mut self,
        text: &str,
        style: &TextStyle,
        frame: Rect,
        transform: &AffineTransform,
    );
}

fn to_kurbo_affine(transform: &AffineTransform) -> kurbo::Affine {
    kurbo::Affine::new([
        transform.m00,
        transform.m10,
        transform.m01,
        transform.m11,
        transform.m02,
        transform.m12,
    ])
}

fn rect_path(rect: &Rect) -> BezPath {
    let mut path = BezPath::new();
    let corners = rect.corner_points();

    path.move_to(kurbo::Point::new(corners[0].x, corners[0].y));
    for corner in &corners[1..] {
        path.line_to(kurbo::Point::new(corner.x, corner.y));
    }
    path.close_path();

    path
}

fn paint_path(rasterizer: &mut dyn Rasterizer, path: &BezPath, style: Option<&Style>) {
    let Some(style) = style else {
        return;
    };

    for fill in style.fills.iter().filter(|fill| fill.is_enabled) {
        rasterizer.fill_path(path, fill.color, style.opacity);
    }
    for border in style.borders.iter().filter(|border| border.is_enabled) {
        rasterizer.stroke_path(path, border.color, border.thickness, style.opacity);
    }
}

fn render_layer(
    layer: &Layer,
    document: &Document,
    ctm: AffineTransform,
    rasterizer: &mut dyn Rasterizer,
) {
    if !layer.is_visible {
        return;
    }

    // Paths carry the frame offset, so the draw transform excludes the
    // layer's own translation; children get it composed in.
    let draw_transform = ctm * layer_flip_transform(layer) * layer_rotation_transform(layer);
    let child_ctm = layer_transform(ctm, layer);

    match &layer.content {
        LayerContent::Rectangle {
            points, is_closed, ..
        }
        | LayerContent::Oval { points, is_closed }
        | LayerContent::Path { points, is_closed } => {
            let mut path = layer_path(points, &layer.frame, *is_closed);
            path.apply_affine(to_kurbo_affine(&draw_transform));
            paint_path(rasterizer, &path, layer.style.as_ref());
        }

        LayerContent::Text { string, text_style } => {
            rasterizer.draw_text(string, text_style, layer.frame, &draw_transform);
        }

        LayerContent::Bitmap { image } => {
            rasterizer.draw_image(image, layer.frame, &draw_transform);
        }

        LayerContent::Slice => {}

        LayerContent::Group { layers, .. } => {
            for child in layers {
                render_layer(child, document, child_ctm, rasterizer);
            }
        }

        LayerContent::Artboard {
            layers,
            background_color,
        }
        | LayerContent::SymbolMaster {
            layers,
            background_color,
            ..
        } => {
            if let Some(color) = background_color {
                let mut path = rect_path(&layer.frame);
                path.apply_affine(to_kurbo_affine(&draw_transform));
                rasterizer.fill_path(&path, *color, 1.0);
            }

            for child in layers {
                render_layer(child, document, child_ctm, rasterizer);
            }
        }

        LayerContent::SymbolInstance { .. } => {
            // A dangling master reference renders nothing.
            if let Some(resolved) = resolve_symbol_instance(layer, document) {
                render_layer(&resolved, document, ctm, rasterizer);
            }
        }
    }
}

/// Renders one page of a document through the rasterizer, bottom-most layer
/// first. `ctm` maps page coordinates to the rasterizer's target space
/// (e.g. the canvas transform of the current viewport).
pub fn render_page(
    document: &Document,
    page_index: usize,
    ctm: AffineTransform,
    rasterizer: &mut dyn Rasterizer,
) {
    let Some(page) = document.pages.get(page_index) else {
        return;
    };

    for layer in &page.layers {
        render_layer(layer, document, ctm, rasterizer);
    }
}
