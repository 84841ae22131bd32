//! Layer tree traversal with explicit control signals and index paths.
//!
//! An index path is the sequence of child indices locating a layer from its
//! page; ancestry is always recovered by walking a path, never stored.

use uuid::Uuid;

use crate::document::Page;
use crate::model::Layer;

/// What the visitor wants done after entering a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalControl {
    /// Descend into children.
    Continue,
    /// Skip this layer's children but keep visiting siblings.
    SkipChildren,
    /// Abort the whole traversal.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupTraversal {
    /// Treat groups as leaves (unless they have click-through enabled).
    #[default]
    GroupOnly,
    /// Recurse into groups and never return the group itself.
    ChildrenOnly,
    /// Return groups and recurse into them.
    GroupAndChildren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtboardTraversal {
    /// Treat artboards as leaves.
    ArtboardOnly,
    /// Recurse into artboards and never return the artboard itself.
    #[default]
    ChildrenOnly,
    /// Return artboards and recurse into them.
    ArtboardAndChildren,
    /// Used for user interactions: select empty artboards, artboards fully
    /// contained by the marquee, or artboards whose name label is hit.
    EmptyOrContainedArtboardOrChildren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerTraversalOptions {
    pub include_hidden_layers: bool,
    pub include_locked_layers: bool,
    pub groups: GroupTraversal,
    pub artboards: ArtboardTraversal,
}

impl Default for LayerTraversalOptions {
    fn default() -> Self {
        Self {
            include_hidden_layers: false,
            include_locked_layers: true,
            groups: GroupTraversal::default(),
            artboards: ArtboardTraversal::default(),
        }
    }
}

impl LayerTraversalOptions {
    pub(crate) fn should_visit_layer(&self, layer: &Layer) -> bool {
        (layer.is_visible || self.include_hidden_layers)
            && (!layer.is_locked || self.include_locked_layers)
    }

    pub(crate) fn should_visit_children(&self, layer: &Layer) -> bool {
        if layer.is_artboard_or_symbol_master() {
            self.artboards != ArtboardTraversal::ArtboardOnly
        } else if layer.is_group() {
            self.groups != GroupTraversal::GroupOnly || layer.has_click_through()
        } else {
            false
        }
    }
}

fn visit_forest<'a>(
    layers: &'a [Layer],
    path: &mut Vec<usize>,
    reversed: bool,
    enter: &mut dyn FnMut(&'a Layer, &[usize]) -> TraversalControl,
) -> TraversalControl {
    let indices: Vec<usize> = if reversed {
        (0..layers.len()).rev().collect()
    } else {
        (0..layers.len()).collect()
    };

    for index in indices {
        let layer = &layers[index];
        path.push(index);
        let control = enter(layer, path);

        match control {
            TraversalControl::Stop => {
                path.pop();
                return TraversalControl::Stop;
            }
            TraversalControl::SkipChildren => {}
            TraversalControl::Continue => {
                if visit_forest(layer.children(), path, reversed, enter)
                    == TraversalControl::Stop
                {
                    path.pop();
                    return TraversalControl::Stop;
                }
            }
        }

        path.pop();
    }

    TraversalControl::Continue
}

/// Visits every layer depth-first in document order (bottom-most drawn
/// first). Index paths use true child indices.
pub fn visit<'a>(
    page: &'a Page,
    enter: &mut dyn FnMut(&'a Layer, &[usize]) -> TraversalControl,
) {
    let mut path = Vec::new();
    visit_forest(&page.layers, &mut path, false, enter);
}

/// Visits every layer depth-first in reverse document order, so the
/// topmost-drawn layer is entered first. Hit testing wants this order.
pub fn visit_reversed<'a>(
    page: &'a Page,
    enter: &mut dyn FnMut(&'a Layer, &[usize]) -> TraversalControl,
) {
    let mut path = Vec::new();
    visit_forest(&page.layers, &mut path, true, enter);
}

/// Reverse-order traversal gated by [`LayerTraversalOptions`]: hidden and
/// locked layers are skipped per the options, and containers only recurse
/// when the group/artboard mode allows it.
pub fn visit_layers_reversed<'a>(
    page: &'a Page,
    options: &LayerTraversalOptions,
    enter: &mut dyn FnMut(&'a Layer, &[usize]) -> TraversalControl,
) {
    visit_reversed(page, &mut |layer, path| {
        if !options.should_visit_layer(layer) {
            return TraversalControl::SkipChildren;
        }

        let control = enter(layer, path);

        if control == TraversalControl::Stop {
            return control;
        }

        if !options.should_visit_children(layer) {
            return TraversalControl::SkipChildren;
        }

        control
    });
}

/// The layer at an index path, or `None` if the path dangles.
pub fn access<'a>(page: &'a Page, path: &[usize]) -> Option<&'a Layer> {
    let (&first, rest) = path.split_first()?;
    let mut layer = page.layers.get(first)?;

    for &index in rest {
        layer = layer.children().get(index)?;
    }

    Some(layer)
}

/// The layer at an index path, mutably.
pub fn access_mut<'a>(page: &'a mut Page, path: &[usize]) -> Option<&'a mut Layer> {
    let (&first, rest) = path.split_first()?;
    let mut layer = page.layers.get_mut(first)?;

    for &index in rest {
        layer = layer.children_mut()?.get_mut(index)?;
    }

    Some(layer)
}

/// The chain of layers from the page's top level down to the path target,
/// inclusive. Empty if the path dangles.
pub fn access_path<'a>(page: &'a Page, path: &[usize]) -> Vec<&'a Layer> {
    let mut chain = Vec::with_capacity(path.len());
    let Some((&first, rest)) = path.split_first() else {
        return chain;
    };
    let Some(mut layer) = page.layers.get(first) else {
        return chain;
    };
    chain.push(layer);

    for &index in rest {
        let Some(child) = layer.children().get(index) else {
            return Vec::new();
        };
        layer = child;
        chain.push(layer);
    }

    chain
}

/// The index path of the layer with the given id, or `None`.
pub fn find_index_path(page: &Page, id: Uuid) -> Option<Vec<usize>> {
    let mut found = None;

    visit(page, &mut |layer, path| {
        if layer.id == id {
            found = Some(path.to_vec());
            TraversalControl::Stop
        } else {
            TraversalControl::Continue
        }
    });

    found
}

/// Index paths for a set of ids, in document order.
pub fn find_index_paths(page: &Page, ids: &[Uuid]) -> Vec<Vec<usize>> {
    let mut paths = Vec::new();

    visit(page, &mut |layer, path| {
        if ids.contains(&layer.id) {
            paths.push(path.to_vec());
        }
        TraversalControl::Continue
    });

    paths
}

/// Index paths for a set of ids, dropping any path that is a descendant of
/// another. Move and scale commits operate on these top-level paths only,
/// so a selected child inside a selected group is not transformed twice.
pub fn find_index_paths_excluding_descendants(page: &Page, ids: &[Uuid]) -> Vec<Vec<usize>> {
    let mut paths: Vec<Vec<usize>> = Vec::new();

    visit(page, &mut |layer, path| {
        if ids.contains(&layer.id) {
            paths.push(path.to_vec());
            // Anything below this layer moves with it already.
            return TraversalControl::SkipChildren;
        }
        TraversalControl::Continue
    });

    paths
}
