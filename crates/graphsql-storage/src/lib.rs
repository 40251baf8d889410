//! SQL-backed storage for graphsql graphs.
//!
//! Provides the [`GraphStore`] trait defining the storage contract a graph
//! library delegates to, plus the [`SqlStore`] and [`InMemoryStore`]
//! backends that implement it.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`config`]: StoreConfig table names and column types
//! - [`schema`]: DDL builders for the vertices and edges tables
//! - [`types`]: SqlKey, the key-to-column mapping
//! - [`traits`]: GraphStore trait definition
//! - [`convert`]: JSON encoding of values and attributes
//! - [`memory`]: InMemoryStore implementation
//! - [`sqlite`]: SqlStore implementation

pub mod config;
pub mod convert;
pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use config::StoreConfig;
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqlStore;
pub use traits::GraphStore;
pub use types::SqlKey;

pub use graphsql_core::{Attributes, Edge, EdgeProperties, VertexProperties};
