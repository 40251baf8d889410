//! Vertex-level properties.
//!
//! A vertex is identified by its key and carries a caller-defined value plus
//! [`VertexProperties`]. Keys and values are generic at the store level; only
//! the properties have a fixed shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-to-string attribute map attached to vertices and edges.
///
/// A `BTreeMap` keeps the serialized form deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Properties stored alongside a vertex value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexProperties {
    /// Free-form attributes, persisted as a JSON object.
    #[serde(default)]
    pub attributes: Attributes,
    /// Vertex weight.
    #[serde(default)]
    pub weight: i64,
}

impl VertexProperties {
    /// Creates properties with the given weight and no attributes.
    pub fn weighted(weight: i64) -> Self {
        VertexProperties {
            attributes: Attributes::new(),
            weight,
        }
    }

    /// Adds (or replaces) an attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
