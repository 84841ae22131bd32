//! Coordinate-space transforms through the layer tree.
//!
//! Transforms compose right-to-left: the page-to-canvas transform sits on
//! the left, each descendant's local transform multiplies on the right.

use crate::document::Page;
use crate::geometry::{AffineTransform, Insets, Point};
use crate::model::Layer;
use crate::selectors::traversal::access_path;
use crate::state::ApplicationState;

pub fn layer_translation_transform(layer: &Layer) -> AffineTransform {
    AffineTransform::translation(layer.frame.x, layer.frame.y)
}

/// Rotation about the frame's center, honoring the group sign convention.
pub fn layer_rotation_transform(layer: &Layer) -> AffineTransform {
    let bounds = layer.frame.bounds();
    let center = Point::new(bounds.mid_x, bounds.mid_y);

    AffineTransform::rotation_about(layer.rotation_radians(), center)
}

/// Mirrors about the frame's center per the layer's flip flags.
pub fn layer_flip_transform(layer: &Layer) -> AffineTransform {
    let bounds = layer.frame.bounds();
    let center = Point::new(bounds.mid_x, bounds.mid_y);

    let sx = if layer.is_flipped_horizontal { -1.0 } else { 1.0 };
    let sy = if layer.is_flipped_vertical { -1.0 } else { 1.0 };

    if sx == 1.0 && sy == 1.0 {
        return AffineTransform::IDENTITY;
    }

    AffineTransform::scale_about(sx, sy, center)
}

/// One layer's contribution to its children's coordinate space, composed
/// onto an incoming cumulative transform.
pub fn layer_transform(ctm: AffineTransform, layer: &Layer) -> AffineTransform {
    ctm * layer_rotation_transform(layer) * layer_translation_transform(layer)
}

/// The local-to-canvas transform at an index path: `layer_transform` folded
/// over the ancestor chain, excluding the page root and the layer itself.
pub fn layer_transform_at_index_path(
    page: &Page,
    index_path: &[usize],
    ctm: AffineTransform,
) -> AffineTransform {
    let chain = access_path(page, index_path);
    let ancestors = &chain[..chain.len().saturating_sub(1)];

    ancestors
        .iter()
        .fold(ctm, |result, layer| layer_transform(result, layer))
}

/// Maps canvas coordinates to screen coordinates.
pub fn screen_transform(insets: &Insets) -> AffineTransform {
    AffineTransform::translation(insets.left, 0.0)
}

/// Maps page coordinates to screen coordinates through the current page's
/// scroll origin and zoom.
pub fn canvas_transform(state: &ApplicationState, insets: &Insets) -> AffineTransform {
    let metadata = state.current_page_metadata();

    screen_transform(insets)
        * AffineTransform::translation(metadata.scroll_origin.x, metadata.scroll_origin.y)
        * AffineTransform::scale(metadata.zoom, metadata.zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::factory;
    use crate::selectors::traversal::find_index_path;

    #[test]
    fn nested_translations_compose() {
        let inner = factory::rectangle(Rect::new(5.0, 5.0, 10.0, 10.0));
        let inner_id = inner.id;
        let artboard = factory::artboard(
            "Artboard",
            Rect::new(100.0, 200.0, 300.0, 300.0),
            vec![inner],
        );
        let page = Page::with_layers("Page 1", vec![artboard]);

        let path = find_index_path(&page, inner_id).unwrap();
        let transform = layer_transform_at_index_path(&page, &path, AffineTransform::IDENTITY);

        // The ancestor chain excludes the layer itself, so only the
        // artboard's translation applies.
        assert_eq!(
            transform.apply_to(Point::new(5.0, 5.0)),
            Point::new(105.0, 205.0)
        );
    }

    #[test]
    fn group_rotation_inverts_sign() {
        let mut group = factory::group("Group", vec![]);
        group.frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        group.rotation = 90.0;

        // Stored +90 degrees rotates -90 for groups: a point right of
        // center maps above center.
        let transform = layer_rotation_transform(&group);
        let moved = transform.apply_to(Point::new(100.0, 50.0));

        assert!((moved.x - 50.0).abs() < 1e-9);
        assert!((moved.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn flip_transform_mirrors_about_center() {
        let mut layer = factory::rectangle(Rect::new(0.0, 0.0, 100.0, 50.0));
        layer.is_flipped_horizontal = true;

        let transform = layer_flip_transform(&layer);
        assert_eq!(
            transform.apply_to(Point::new(0.0, 0.0)),
            Point::new(100.0, 0.0)
        );
    }
}
