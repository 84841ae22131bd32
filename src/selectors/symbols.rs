//! Symbol instance resolution.
//!
//! A symbol instance renders as a derived copy of its master's subtree with
//! the instance's overrides applied. The master itself is never modified,
//! and a dangling reference anywhere in the chain silently skips that step
//! rather than erroring: stale override paths are an expected result of
//! editing a master after instances were configured.

use uuid::Uuid;

use crate::document::Document;
use crate::model::{Layer, LayerContent, OverridePropertyValue, OverrideValue};

/// Applies one override to the layer forest of a derived master copy.
/// Descends the id path through nested symbol instances' masters is not
/// required here: paths address layers within this master only, and a
/// nested instance is retargeted via its `SymbolId` override.
fn apply_override(layers: &mut [Layer], override_value: &OverrideValue) {
    let Some((&head, rest)) = override_value.path.split_first() else {
        return;
    };

    let Some(layer) = layers.iter_mut().find(|layer| layer.id == head) else {
        return; // dangling path, skip
    };

    if !rest.is_empty() {
        if let Some(children) = layer.children_mut() {
            apply_override(
                children,
                &OverrideValue::new(rest.to_vec(), override_value.value.clone()),
            );
        }
        return;
    }

    match (&override_value.value, &mut layer.content) {
        (OverridePropertyValue::StringValue(value), LayerContent::Text { string, .. }) => {
            *string = value.clone();
        }
        (
            OverridePropertyValue::SymbolId(value),
            LayerContent::SymbolInstance { symbol_id, .. },
        ) => {
            *symbol_id = *value;
        }
        (OverridePropertyValue::Image(value), LayerContent::Bitmap { image }) => {
            *image = value.clone();
        }
        (OverridePropertyValue::StyleId(value), _) => {
            layer.shared_style_id = Some(*value);
        }
        // Property kind does not match the target layer kind: skip.
        _ => {}
    }
}

/// Resolves shared style references on a derived copy: a layer pointing at
/// a shared style takes the library's current value for it.
fn resolve_shared_styles(layers: &mut [Layer], document: &Document) {
    for layer in layers {
        if let Some(style_id) = layer.shared_style_id {
            if let Some(shared) = document.shared_style(style_id) {
                layer.style = Some(shared.value.clone());
            }
        }
        if let Some(children) = layer.children_mut() {
            resolve_shared_styles(children, document);
        }
    }
}

/// Derives the renderable subtree of a symbol instance.
///
/// The result is a group-shaped layer with the instance's id, frame,
/// rotation, and flip flags, whose children are a copy of the master's
/// children scaled from the master's size to the instance's and with every
/// override applied. `None` when the master reference dangles.
pub fn resolve_symbol_instance(instance: &Layer, document: &Document) -> Option<Layer> {
    let LayerContent::SymbolInstance {
        symbol_id,
        overrides,
    } = &instance.content
    else {
        return None;
    };

    let master = document.symbol_master(*symbol_id)?;
    let mut layers = master.children().to_vec();

    // Instances may be resized independently of the master.
    let sx = if master.frame.width == 0.0 {
        1.0
    } else {
        instance.frame.width / master.frame.width
    };
    let sy = if master.frame.height == 0.0 {
        1.0
    } else {
        instance.frame.height / master.frame.height
    };

    if sx != 1.0 || sy != 1.0 {
        for layer in &mut layers {
            scale_frames(layer, sx, sy);
        }
    }

    for override_value in overrides {
        apply_override(&mut layers, override_value);
    }

    resolve_shared_styles(&mut layers, document);

    let mut resolved = instance.clone();
    resolved.content = LayerContent::Group {
        layers,
        has_click_through: false,
    };

    Some(resolved)
}

fn scale_frames(layer: &mut Layer, sx: f64, sy: f64) {
    layer.frame.x *= sx;
    layer.frame.y *= sy;
    layer.frame.width *= sx;
    layer.frame.height *= sy;

    if let Some(children) = layer.children_mut() {
        for child in children {
            scale_frames(child, sx, sy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Page;
    use crate::geometry::Rect;
    use crate::model::factory;

    fn document_with_master() -> (Document, Uuid, Uuid) {
        let label = factory::text(Rect::new(4.0, 4.0, 32.0, 12.0), "Button");
        let label_id = label.id;

        let master = factory::symbol_master("Button", Rect::new(0.0, 0.0, 40.0, 20.0), vec![label]);
        let LayerContent::SymbolMaster { symbol_id, .. } = master.content else {
            unreachable!()
        };

        let document = Document::with_pages(vec![Page::with_layers("Symbols", vec![master])]);
        (document, symbol_id, label_id)
    }

    #[test]
    fn string_override_replaces_the_nested_text() {
        let (document, symbol_id, label_id) = document_with_master();

        let mut instance =
            factory::symbol_instance("Button", Rect::new(100.0, 100.0, 40.0, 20.0), symbol_id);
        if let LayerContent::SymbolInstance { overrides, .. } = &mut instance.content {
            overrides.push(OverrideValue::new(
                vec![label_id],
                OverridePropertyValue::StringValue("Cancel".to_string()),
            ));
        }

        let resolved = resolve_symbol_instance(&instance, &document).unwrap();
        let LayerContent::Text { string, .. } = &resolved.children()[0].content else {
            panic!("expected text child");
        };
        assert_eq!(string, "Cancel");
    }

    #[test]
    fn dangling_override_path_is_skipped() {
        let (document, symbol_id, _) = document_with_master();

        let mut instance =
            factory::symbol_instance("Button", Rect::new(0.0, 0.0, 40.0, 20.0), symbol_id);
        if let LayerContent::SymbolInstance { overrides, .. } = &mut instance.content {
            overrides.push(OverrideValue::new(
                vec![Uuid::new_v4()],
                OverridePropertyValue::StringValue("Lost".to_string()),
            ));
        }

        let resolved = resolve_symbol_instance(&instance, &document).unwrap();
        let LayerContent::Text { string, .. } = &resolved.children()[0].content else {
            panic!("expected text child");
        };
        assert_eq!(string, "Button");
    }

    #[test]
    fn dangling_master_reference_resolves_to_none() {
        let (document, _, _) = document_with_master();
        let instance =
            factory::symbol_instance("Ghost", Rect::new(0.0, 0.0, 40.0, 20.0), Uuid::new_v4());

        assert!(resolve_symbol_instance(&instance, &document).is_none());
    }

    #[test]
    fn resized_instances_scale_the_master_copy() {
        let (document, symbol_id, _) = document_with_master();
        let instance =
            factory::symbol_instance("Button", Rect::new(0.0, 0.0, 80.0, 20.0), symbol_id);

        let resolved = resolve_symbol_instance(&instance, &document).unwrap();
        let child = &resolved.children()[0];
        assert_eq!(child.frame, Rect::new(8.0, 4.0, 64.0, 12.0));
    }
}
