//! DDL for the vertices and edges tables.
//!
//! The statements are built from a [`StoreConfig`] by plain substitution.
//! Execution, ordering and error tagging live on
//! [`SqlStore::setup_tables`](crate::SqlStore::setup_tables) and
//! [`SqlStore::destroy_tables`](crate::SqlStore::destroy_tables).

use crate::config::StoreConfig;

/// `CREATE TABLE` for the vertices table.
pub fn create_vertices_table_sql(config: &StoreConfig) -> String {
    format!(
        r#"
CREATE TABLE {table} (
    id {id},
    hash {hash},
    value {value},
    weight INTEGER,
    attributes JSON
)"#,
        table = config.vertices_table,
        id = config.id_column_type,
        hash = config.vertex_hash_type,
        value = config.vertex_value_type,
    )
}

/// `CREATE TABLE` for the edges table.
pub fn create_edges_table_sql(config: &StoreConfig) -> String {
    format!(
        r#"
CREATE TABLE {table} (
    id {id},
    source_hash {hash},
    target_hash {hash},
    weight INTEGER,
    attributes JSON,
    data BLOB
)"#,
        table = config.edges_table,
        id = config.id_column_type,
        hash = config.vertex_hash_type,
    )
}

/// `DROP TABLE` for the vertices table.
pub fn drop_vertices_table_sql(config: &StoreConfig) -> String {
    format!("DROP TABLE {}", config.vertices_table)
}

/// `DROP TABLE` for the edges table.
pub fn drop_edges_table_sql(config: &StoreConfig) -> String {
    format!("DROP TABLE {}", config.edges_table)
}
