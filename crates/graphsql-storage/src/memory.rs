//! In-memory implementation of [`GraphStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. Entries live in insertion-ordered maps, so
//! listings come back in the order things were added.
//!
//! Being keyed maps, adding an existing vertex key or an existing
//! `(source, target)` pair replaces the stored entry; the SQL backend would
//! store a second row instead.

use std::hash::Hash;

use indexmap::IndexMap;

use graphsql_core::{Edge, EdgeProperties, VertexProperties};

use crate::error::StorageError;
use crate::traits::GraphStore;

/// In-memory implementation of [`GraphStore`].
#[derive(Debug, Clone)]
pub struct InMemoryStore<K, T> {
    /// Vertex values and properties indexed by key
    vertices: IndexMap<K, (T, VertexProperties)>,
    /// Edge properties indexed by (source, target)
    edges: IndexMap<(K, K), EdgeProperties>,
}

impl<K, T> InMemoryStore<K, T> {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        InMemoryStore {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }
}

impl<K, T> Default for InMemoryStore<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> GraphStore<K, T> for InMemoryStore<K, T>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    fn add_vertex(
        &mut self,
        key: K,
        value: T,
        properties: VertexProperties,
    ) -> Result<(), StorageError> {
        self.vertices.insert(key, (value, properties));
        Ok(())
    }

    fn remove_vertex(&mut self, key: &K) -> Result<(), StorageError> {
        self.vertices.shift_remove(key);
        Ok(())
    }

    fn vertex(&self, key: &K) -> Result<(T, VertexProperties), StorageError> {
        self.vertices
            .get(key)
            .cloned()
            .ok_or(StorageError::VertexNotFound)
    }

    fn list_vertices(&self) -> Result<Vec<K>, StorageError> {
        Ok(self.vertices.keys().cloned().collect())
    }

    fn vertex_count(&self) -> Result<usize, StorageError> {
        Ok(self.vertices.len())
    }

    fn add_edge(&mut self, source: K, target: K, edge: Edge<K>) -> Result<(), StorageError> {
        self.edges.insert((source, target), edge.properties);
        Ok(())
    }

    fn update_edge(
        &mut self,
        source: &K,
        target: &K,
        edge: Edge<K>,
    ) -> Result<(), StorageError> {
        if let Some(existing) = self.edges.get_mut(&(source.clone(), target.clone())) {
            *existing = edge.properties;
        }
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, target: &K) -> Result<(), StorageError> {
        self.edges.shift_remove(&(source.clone(), target.clone()));
        Ok(())
    }

    fn edge(&self, source: &K, target: &K) -> Result<Edge<K>, StorageError> {
        self.edges
            .get(&(source.clone(), target.clone()))
            .map(|properties| {
                Edge::with_properties(source.clone(), target.clone(), properties.clone())
            })
            .ok_or(StorageError::EdgeNotFound)
    }

    fn list_edges(&self) -> Result<Vec<Edge<K>>, StorageError> {
        Ok(self
            .edges
            .iter()
            .map(|((source, target), properties)| {
                Edge::with_properties(source.clone(), target.clone(), properties.clone())
            })
            .collect())
    }

    fn edge_count(&self) -> Result<usize, StorageError> {
        Ok(self.edges.len())
    }
}
