//! Graph data model shared by every graphsql storage backend.
//!
//! These are the types a host graph library hands to its store: per-vertex
//! and per-edge properties, and the [`Edge`] record itself. Nothing here does
//! I/O; persistence lives in `graphsql-storage`.

pub mod edge;
pub mod vertex;

// Re-export commonly used types
pub use edge::{Edge, EdgeProperties};
pub use vertex::{Attributes, VertexProperties};
