//! Derived geometry over the document: transforms through nested
//! coordinate spaces, bounding rects, hit testing, scale handles, snapping,
//! point resolution, and symbol expansion.
//!
//! Every selector is a pure function of (state, options); there are no
//! caches, so identical inputs always produce identical results.

pub mod geometry;
pub mod handles;
pub mod points;
pub mod snaps;
pub mod symbols;
pub mod transforms;
pub mod traversal;

pub use geometry::{
    drawn_layer_rect, get_bounding_points, get_bounding_rect, get_bounding_rect_map,
    get_layer_at_point, get_layers_in_rect,
};
pub use handles::{get_drag_handles, get_scale_direction_at_point, DragHandle};
pub use points::{get_selected_points, SelectedPoint};
pub use snaps::{
    alignment_guides, move_snap_adjustment, scale_snap_adjustment, snap_adjustment, snap_values,
    AlignmentGuide, Axis, Snap, SNAP_THRESHOLD,
};
pub use symbols::resolve_symbol_instance;
pub use transforms::{
    canvas_transform, layer_transform, layer_transform_at_index_path, screen_transform,
};
pub use traversal::{
    access, access_mut, access_path, find_index_path, find_index_paths,
    find_index_paths_excluding_descendants, visit, visit_layers_reversed, visit_reversed,
    ArtboardTraversal, GroupTraversal, LayerTraversalOptions, TraversalControl,
};
