//! The document: an ordered sequence of pages, each the root of a layer
//! tree, plus the shared style library referenced by id from layers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Layer, LayerContent, SharedStyle, SharedTextStyle};

/// The root of one layer tree. Ancestry within the tree is encoded purely
/// by position; there are no parent back-pointers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub name: String,
    pub layers: Vec<Layer>,
}

impl Page {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            layers: Vec::new(),
        }
    }

    pub fn with_layers(name: &str, layers: Vec<Layer>) -> Self {
        Self {
            layers,
            ..Self::new(name)
        }
    }

    pub fn layer(&self, id: Uuid) -> Option<&Layer> {
        find_layer(&self.layers, &|layer| layer.id == id)
    }

    pub fn layer_mut(&mut self, id: Uuid) -> Option<&mut Layer> {
        find_layer_mut(&mut self.layers, &|layer| layer.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
    pub shared_styles: Vec<SharedStyle>,
    pub shared_text_styles: Vec<SharedTextStyle>,
}

impl Document {
    /// A document with a single empty page named "Page 1".
    pub fn new() -> Self {
        Self {
            pages: vec![Page::new("Page 1")],
            shared_styles: Vec::new(),
            shared_text_styles: Vec::new(),
        }
    }

    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages,
            shared_styles: Vec::new(),
            shared_text_styles: Vec::new(),
        }
    }

    pub fn page(&self, id: Uuid) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    pub fn page_mut(&mut self, id: Uuid) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == id)
    }

    pub fn shared_style(&self, id: Uuid) -> Option<&SharedStyle> {
        self.shared_styles.iter().find(|style| style.id == id)
    }

    /// The symbol master with the given symbol id, searched across every
    /// page. `None` when the reference dangles.
    pub fn symbol_master(&self, symbol_id: Uuid) -> Option<&Layer> {
        self.pages.iter().find_map(|page| {
            find_layer(&page.layers, &|layer| {
                matches!(
                    layer.content,
                    LayerContent::SymbolMaster { symbol_id: id, .. } if id == symbol_id
                )
            })
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first search over a layer forest.
pub fn find_layer<'a>(
    layers: &'a [Layer],
    predicate: &impl Fn(&Layer) -> bool,
) -> Option<&'a Layer> {
    for layer in layers {
        if predicate(layer) {
            return Some(layer);
        }
        if let Some(found) = find_layer(layer.children(), predicate) {
            return Some(found);
        }
    }
    None
}

/// Depth-first search returning a mutable reference.
pub fn find_layer_mut<'a>(
    layers: &'a mut [Layer],
    predicate: &impl Fn(&Layer) -> bool,
) -> Option<&'a mut Layer> {
    for layer in layers {
        if predicate(layer) {
            return Some(layer);
        }
        if let Some(children) = layer.children_mut() {
            if let Some(found) = find_layer_mut(children, predicate) {
                return Some(found);
            }
        }
    }
    None
}
