//! Edge records and their properties.
//!
//! An [`Edge`] is addressed by its ordered `(source, target)` key pair, so
//! `(a, b)`, `(b, a)` and the self-loop `(a, a)` are all distinct edges.
//! [`EdgeProperties::data`] is an opaque payload: stores persist the bytes
//! as given and never look inside them.

use serde::{Deserialize, Serialize};

use crate::vertex::Attributes;

/// Properties stored alongside an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProperties {
    /// Free-form attributes, persisted as a JSON object.
    #[serde(default)]
    pub attributes: Attributes,
    /// Edge weight.
    #[serde(default)]
    pub weight: i64,
    /// Caller-encoded payload. The encoding is the caller's choice.
    #[serde(default)]
    pub data: Vec<u8>,
}

impl EdgeProperties {
    /// Creates properties with the given weight, no attributes and no data.
    pub fn weighted(weight: i64) -> Self {
        EdgeProperties {
            weight,
            ..Default::default()
        }
    }

    /// Adds (or replaces) an attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces the opaque payload, builder style.
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }
}

/// A directed edge between two vertex keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<K> {
    pub source: K,
    pub target: K,
    #[serde(default)]
    pub properties: EdgeProperties,
}

impl<K> Edge<K> {
    /// Creates an edge with default properties.
    pub fn new(source: K, target: K) -> Self {
        Edge {
            source,
            target,
            properties: EdgeProperties::default(),
        }
    }

    /// Creates an edge with the given properties.
    pub fn with_properties(source: K, target: K, properties: EdgeProperties) -> Self {
        Edge {
            source,
            target,
            properties,
        }
    }

    /// Returns `true` if source and target are the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        K: PartialEq,
    {
        self.source == self.target
    }
}
