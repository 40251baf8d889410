//! Table names and column types for the graph schema.
//!
//! Every field is substituted verbatim into SQL. The values come from the
//! operator, not from end users, and are not escaped.

use serde::{Deserialize, Serialize};

/// Configures the table schema: table names and the column types that vary
/// between databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the vertices table.
    pub vertices_table: String,
    /// Name of the edges table.
    pub edges_table: String,
    /// Column type of `hash`, `source_hash` and `target_hash`.
    pub vertex_hash_type: String,
    /// Column type of the vertex `value` column.
    pub vertex_value_type: String,
    /// Full declaration of the surrogate `id` column.
    pub id_column_type: String,
}

impl StoreConfig {
    pub const DEFAULT_VERTICES_TABLE: &'static str = "vertices";
    pub const DEFAULT_EDGES_TABLE: &'static str = "edges";
    pub const DEFAULT_VERTEX_HASH_TYPE: &'static str = "TEXT";
    pub const DEFAULT_VERTEX_VALUE_TYPE: &'static str = "JSON";
    pub const DEFAULT_ID_COLUMN_TYPE: &'static str = "INTEGER PRIMARY KEY AUTOINCREMENT";

    /// Returns the default schema with different table names.
    pub fn with_tables(vertices_table: impl Into<String>, edges_table: impl Into<String>) -> Self {
        StoreConfig {
            vertices_table: vertices_table.into(),
            edges_table: edges_table.into(),
            ..Default::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            vertices_table: Self::DEFAULT_VERTICES_TABLE.to_string(),
            edges_table: Self::DEFAULT_EDGES_TABLE.to_string(),
            vertex_hash_type: Self::DEFAULT_VERTEX_HASH_TYPE.to_string(),
            vertex_value_type: Self::DEFAULT_VERTEX_VALUE_TYPE.to_string(),
            id_column_type: Self::DEFAULT_ID_COLUMN_TYPE.to_string(),
        }
    }
}
