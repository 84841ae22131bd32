//! Symbol instance overrides.
//!
//! An override substitutes one property of a layer nested inside the
//! referenced symbol master, addressed by the chain of layer ids from the
//! master down to the target. The master itself is never modified; overrides
//! are applied to a derived copy when the instance is resolved.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::layer::ImageRef;

/// The replacement value of a single override entry. The variant doubles as
/// the property selector: a `StringValue` override targets a text layer's
/// string, a `SymbolId` override retargets a nested instance, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverridePropertyValue {
    StringValue(String),
    SymbolId(Uuid),
    StyleId(Uuid),
    Image(ImageRef),
}

/// One instance-local substitution, keyed by the id path into the master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideValue {
    /// Layer ids from the master's children down to the target layer.
    pub path: Vec<Uuid>,
    pub value: OverridePropertyValue,
}

impl OverrideValue {
    pub fn new(path: Vec<Uuid>, value: OverridePropertyValue) -> Self {
        Self { path, value }
    }
}
