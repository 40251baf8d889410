//! The [`GraphStore`] trait defining the storage contract for graphs.
//!
//! A graph library holds no vertices or edges itself; it calls these methods
//! instead. Every backend (InMemoryStore, SqlStore) implements the trait with
//! the same error conventions, so they are swappable without changing the
//! caller.
//!
//! Conventions shared by all backends:
//! - Point lookups that find nothing return [`StorageError::VertexNotFound`]
//!   or [`StorageError::EdgeNotFound`], never a generic error.
//! - Removing an absent vertex or edge succeeds.
//! - Removing a vertex leaves its edges in place; keeping edges consistent
//!   with vertices is the caller's job.
//! - Listing and counting never mutate.

use graphsql_core::{Edge, VertexProperties};

use crate::error::StorageError;

/// The storage contract for directed graphs keyed by `K` with vertex values
/// of type `T`.
///
/// The trait is synchronous; each call is one independent operation with no
/// transaction spanning calls.
pub trait GraphStore<K, T> {
    // -------------------------------------------------------------------
    // Vertices
    // -------------------------------------------------------------------

    /// Stores a vertex with its value and properties.
    fn add_vertex(
        &mut self,
        key: K,
        value: T,
        properties: VertexProperties,
    ) -> Result<(), StorageError>;

    /// Removes the vertex with the given key, if any.
    fn remove_vertex(&mut self, key: &K) -> Result<(), StorageError>;

    /// Retrieves a vertex value and its properties.
    fn vertex(&self, key: &K) -> Result<(T, VertexProperties), StorageError>;

    /// Lists the keys of all stored vertices.
    fn list_vertices(&self) -> Result<Vec<K>, StorageError>;

    /// Counts stored vertices.
    fn vertex_count(&self) -> Result<usize, StorageError>;

    // -------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------

    /// Stores an edge from `source` to `target`.
    ///
    /// Only `edge.properties` is persisted; the endpoints are the explicit
    /// arguments.
    fn add_edge(&mut self, source: K, target: K, edge: Edge<K>) -> Result<(), StorageError>;

    /// Overwrites weight, attributes and data of the edge from `source` to
    /// `target`. Updating an absent edge is a no-op, not an error.
    fn update_edge(&mut self, source: &K, target: &K, edge: Edge<K>)
        -> Result<(), StorageError>;

    /// Removes the edge from `source` to `target`, if any.
    fn remove_edge(&mut self, source: &K, target: &K) -> Result<(), StorageError>;

    /// Retrieves the edge from `source` to `target`.
    fn edge(&self, source: &K, target: &K) -> Result<Edge<K>, StorageError>;

    /// Lists all stored edges.
    fn list_edges(&self) -> Result<Vec<Edge<K>>, StorageError>;

    /// Counts stored edges.
    fn edge_count(&self) -> Result<usize, StorageError>;
}
