//! SQL implementation of [`GraphStore`].
//!
//! [`SqlStore`] maps every graph operation onto exactly one parameterized
//! statement against two tables, the vertices table and the edges table,
//! whose names and key/value column types come from a [`StoreConfig`].
//! Vertex values are JSON bound as a BLOB so column affinity never rewrites
//! them, attribute maps are JSON text via serde_json, and edge data is stored as a BLOB without interpretation.
//!
//! There are no transactions: a compound operation such as
//! [`SqlStore::setup_tables`] can leave the first table behind if the second
//! statement fails. Removing a vertex does not remove its edges.

use std::marker::PhantomData;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use graphsql_core::{Edge, EdgeProperties, VertexProperties};

use crate::config::StoreConfig;
use crate::convert::{
    decode_attributes, decode_value, encode_attributes, encode_value, BytesColumn, JsonColumn,
};
use crate::error::StorageError;
use crate::schema;
use crate::traits::GraphStore;
use crate::types::{KeyColumn, SqlKey};

/// SQL-backed implementation of [`GraphStore`].
///
/// Holds one externally supplied connection plus the schema configuration.
/// Tables are not created implicitly; call [`SqlStore::setup_tables`] once
/// for a fresh database.
pub struct SqlStore<K, T> {
    conn: Connection,
    config: StoreConfig,
    _marker: PhantomData<fn() -> (K, T)>,
}

impl<K, T> SqlStore<K, T> {
    /// Wraps an open connection.
    pub fn new(conn: Connection, config: StoreConfig) -> Self {
        SqlStore {
            conn,
            config,
            _marker: PhantomData,
        }
    }

    /// Opens (or creates) a SQLite database file at `path`.
    pub fn open(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(StorageError::Open)?;
        Ok(Self::new(conn, config))
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn open_in_memory(config: StoreConfig) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::Open)?;
        Ok(Self::new(conn, config))
    }

    /// The schema configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    // -----------------------------------------------------------------------
    // Schema lifecycle
    // -----------------------------------------------------------------------

    /// Creates the vertices table, then the edges table.
    ///
    /// Fails with [`StorageError::Setup`] naming the table that could not be
    /// created. A vertices table created before an edges failure is left in
    /// place.
    pub fn setup_tables(&self) -> Result<(), StorageError> {
        for (table, sql) in [
            (
                &self.config.vertices_table,
                schema::create_vertices_table_sql(&self.config),
            ),
            (
                &self.config.edges_table,
                schema::create_edges_table_sql(&self.config),
            ),
        ] {
            self.conn
                .execute_batch(&sql)
                .map_err(|source| StorageError::Setup {
                    table: table.clone(),
                    source,
                })?;
            info!(table = %table, "created table");
        }
        Ok(())
    }

    /// Drops the edges table, then the vertices table, removing all data.
    ///
    /// Fails with [`StorageError::Teardown`] naming the table that could not
    /// be dropped.
    pub fn destroy_tables(&self) -> Result<(), StorageError> {
        for (table, sql) in [
            (
                &self.config.edges_table,
                schema::drop_edges_table_sql(&self.config),
            ),
            (
                &self.config.vertices_table,
                schema::drop_vertices_table_sql(&self.config),
            ),
        ] {
            self.conn
                .execute_batch(&sql)
                .map_err(|source| StorageError::Teardown {
                    table: table.clone(),
                    source,
                })?;
            info!(table = %table, "dropped table");
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Runs one data statement, returning the number of affected rows.
    fn execute<P: Params>(
        &self,
        table: &str,
        operation: &'static str,
        sql: &str,
        params: P,
    ) -> Result<usize, StorageError> {
        debug!(table, operation, "executing statement");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(StorageError::sql(table, operation))?;
        stmt.execute(params)
            .map_err(StorageError::sql(table, operation))
    }

    /// Runs a query and maps its first row, if any.
    fn query_first<P, R, F>(
        &self,
        table: &str,
        operation: &'static str,
        sql: &str,
        params: P,
        f: F,
    ) -> Result<Option<R>, StorageError>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<R>,
    {
        debug!(table, operation, "executing query");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(StorageError::sql(table, operation))?;
        stmt.query_row(params, f)
            .optional()
            .map_err(StorageError::sql(table, operation))
    }

    /// Runs a query and maps every row. Any row failure aborts the whole
    /// result.
    fn query_all<P, R, F>(
        &self,
        table: &str,
        operation: &'static str,
        sql: &str,
        params: P,
        f: F,
    ) -> Result<Vec<R>, StorageError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<R>,
    {
        debug!(table, operation, "executing query");
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .map_err(StorageError::sql(table, operation))?;
        let rows = stmt
            .query_map(params, f)
            .map_err(StorageError::sql(table, operation))?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(StorageError::sql(table, operation))?);
        }
        Ok(result)
    }

    /// Counts non-NULL values of `column` in `table`.
    fn count(
        &self,
        table: &str,
        column: &str,
        operation: &'static str,
    ) -> Result<usize, StorageError> {
        let sql = format!("SELECT COUNT({column}) FROM {table}");
        let count: Option<i64> =
            self.query_first(table, operation, &sql, [], |row| row.get(0))?;
        Ok(count.unwrap_or(0) as usize)
    }
}

/// Raw edge columns as read from one row, before attribute decoding.
struct EdgeRow {
    weight: Option<i64>,
    attributes: JsonColumn,
    data: BytesColumn,
}

impl EdgeRow {
    fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(EdgeRow {
            weight: row.get(offset)?,
            attributes: row.get(offset + 1)?,
            data: row.get(offset + 2)?,
        })
    }

    fn into_properties(self) -> Result<EdgeProperties, StorageError> {
        Ok(EdgeProperties {
            attributes: decode_attributes(self.attributes.0.as_deref())?,
            weight: self.weight.unwrap_or_default(),
            data: self.data.0,
        })
    }
}

impl<K, T> GraphStore<K, T> for SqlStore<K, T>
where
    K: SqlKey,
    T: Serialize + DeserializeOwned,
{
    // -------------------------------------------------------------------
    // Vertices
    // -------------------------------------------------------------------

    fn add_vertex(
        &mut self,
        key: K,
        value: T,
        properties: VertexProperties,
    ) -> Result<(), StorageError> {
        let value_json = encode_value(&value)?.into_bytes();
        let attributes_json = encode_attributes(&properties.attributes)?;
        let table = &self.config.vertices_table;
        let sql = format!(
            "INSERT INTO {table} (hash, value, weight, attributes) VALUES (?1, ?2, ?3, ?4)"
        );
        self.execute(
            table,
            "add_vertex",
            &sql,
            params![
                key.to_sql_value(),
                value_json,
                properties.weight,
                attributes_json
            ],
        )?;
        Ok(())
    }

    fn remove_vertex(&mut self, key: &K) -> Result<(), StorageError> {
        let table = &self.config.vertices_table;
        let sql = format!("DELETE FROM {table} WHERE hash = ?1");
        self.execute(table, "remove_vertex", &sql, params![key.to_sql_value()])?;
        Ok(())
    }

    fn vertex(&self, key: &K) -> Result<(T, VertexProperties), StorageError> {
        let table = &self.config.vertices_table;
        let sql = format!("SELECT value, weight, attributes FROM {table} WHERE hash = ?1");
        let row = self.query_first(
            table,
            "vertex",
            &sql,
            params![key.to_sql_value()],
            |row| {
                let value: JsonColumn = row.get(0)?;
                let weight: Option<i64> = row.get(1)?;
                let attributes: JsonColumn = row.get(2)?;
                Ok((value, weight, attributes))
            },
        )?;

        let Some((value, weight, attributes)) = row else {
            return Err(StorageError::VertexNotFound);
        };
        let value: T = decode_value(value.0.as_deref())?;
        let properties = VertexProperties {
            attributes: decode_attributes(attributes.0.as_deref())?,
            weight: weight.unwrap_or_default(),
        };
        Ok((value, properties))
    }

    fn list_vertices(&self) -> Result<Vec<K>, StorageError> {
        let table = &self.config.vertices_table;
        let sql = format!("SELECT hash FROM {table}");
        self.query_all(table, "list_vertices", &sql, [], |row| {
            let key: KeyColumn<K> = row.get(0)?;
            Ok(key.0)
        })
    }

    fn vertex_count(&self) -> Result<usize, StorageError> {
        self.count(&self.config.vertices_table, "hash", "vertex_count")
    }

    // -------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------

    fn add_edge(&mut self, source: K, target: K, edge: Edge<K>) -> Result<(), StorageError> {
        let attributes_json = encode_attributes(&edge.properties.attributes)?;
        let table = &self.config.edges_table;
        let sql = format!(
            "INSERT INTO {table} (source_hash, target_hash, weight, attributes, data) VALUES (?1, ?2, ?3, ?4, ?5)"
        );
        self.execute(
            table,
            "add_edge",
            &sql,
            params![
                source.to_sql_value(),
                target.to_sql_value(),
                edge.properties.weight,
                attributes_json,
                edge.properties.data,
            ],
        )?;
        Ok(())
    }

    fn update_edge(
        &mut self,
        source: &K,
        target: &K,
        edge: Edge<K>,
    ) -> Result<(), StorageError> {
        let attributes_json = encode_attributes(&edge.properties.attributes)?;
        let table = &self.config.edges_table;
        let sql = format!(
            "UPDATE {table} SET weight = ?1, attributes = ?2, data = ?3 WHERE source_hash = ?4 AND target_hash = ?5"
        );
        let rows = self.execute(
            table,
            "update_edge",
            &sql,
            params![
                edge.properties.weight,
                attributes_json,
                edge.properties.data,
                source.to_sql_value(),
                target.to_sql_value(),
            ],
        )?;
        if rows == 0 {
            debug!(table = %table, "update_edge matched no rows");
        }
        Ok(())
    }

    fn remove_edge(&mut self, source: &K, target: &K) -> Result<(), StorageError> {
        let table = &self.config.edges_table;
        let sql = format!("DELETE FROM {table} WHERE source_hash = ?1 AND target_hash = ?2");
        self.execute(
            table,
            "remove_edge",
            &sql,
            params![source.to_sql_value(), target.to_sql_value()],
        )?;
        Ok(())
    }

    fn edge(&self, source: &K, target: &K) -> Result<Edge<K>, StorageError> {
        let table = &self.config.edges_table;
        let sql = format!(
            "SELECT weight, attributes, data FROM {table} WHERE source_hash = ?1 AND target_hash = ?2"
        );
        let row = self.query_first(
            table,
            "edge",
            &sql,
            params![source.to_sql_value(), target.to_sql_value()],
            |row| EdgeRow::read(row, 0),
        )?;

        match row {
            Some(row) => Ok(Edge::with_properties(
                source.clone(),
                target.clone(),
                row.into_properties()?,
            )),
            None => Err(StorageError::EdgeNotFound),
        }
    }

    fn list_edges(&self) -> Result<Vec<Edge<K>>, StorageError> {
        let table = &self.config.edges_table;
        let sql = format!("SELECT source_hash, target_hash, weight, attributes, data FROM {table}");
        let rows = self.query_all(table, "list_edges", &sql, [], |row| {
            let source: KeyColumn<K> = row.get(0)?;
            let target: KeyColumn<K> = row.get(1)?;
            Ok((source.0, target.0, EdgeRow::read(row, 2)?))
        })?;

        let mut edges = Vec::with_capacity(rows.len());
        for (source, target, row) in rows {
            edges.push(Edge::with_properties(source, target, row.into_properties()?));
        }
        Ok(edges)
    }

    fn edge_count(&self) -> Result<usize, StorageError> {
        // Counting the surrogate id undercounts on SQLite when the id column
        // is not a rowid alias, so count an always-set column instead.
        self.count(&self.config.edges_table, "source_hash", "edge_count")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    fn create_store<K, T>() -> SqlStore<K, T> {
        let store = SqlStore::open_in_memory(StoreConfig::default()).unwrap();
        store.setup_tables().unwrap();
        store
    }

    fn assert_graph_store<S: GraphStore<i32, i32>>() {}

    #[test]
    fn test_implements_graph_store() {
        assert_graph_store::<SqlStore<i32, i32>>();
    }

    #[test]
    fn test_edge_count() {
        let mut store = create_store::<i32, i32>();
        store.add_vertex(1, 1, VertexProperties::default()).unwrap();
        store.add_vertex(2, 2, VertexProperties::default()).unwrap();
        assert_eq!(store.edge_count().unwrap(), 0);

        store.add_edge(1, 2, Edge::new(1, 2)).unwrap();
        assert_eq!(store.edge_count().unwrap(), 1);
        store.add_edge(2, 1, Edge::new(2, 1)).unwrap();
        assert_eq!(store.edge_count().unwrap(), 2);
        store.add_edge(1, 1, Edge::new(1, 1)).unwrap();
        assert_eq!(store.edge_count().unwrap(), 3);
        store.add_edge(2, 2, Edge::new(2, 2)).unwrap();
        assert_eq!(store.edge_count().unwrap(), 4);

        store.remove_edge(&2, &2).unwrap();
        assert_eq!(store.edge_count().unwrap(), 3);
    }

    #[test]
    fn test_remove_vertex() {
        let mut store = create_store::<i32, i32>();
        store.add_vertex(1, 1, VertexProperties::default()).unwrap();
        assert_eq!(store.vertex_count().unwrap(), 1);
        store.remove_vertex(&1).unwrap();
        assert_eq!(store.vertex_count().unwrap(), 0);

        // larger graph
        for key in 1..=4 {
            store
                .add_vertex(key, key, VertexProperties::default())
                .unwrap();
        }
        assert_eq!(store.vertex_count().unwrap(), 4);

        store.remove_vertex(&3).unwrap();
        assert_eq!(store.vertex_count().unwrap(), 3);
        assert!(matches!(store.vertex(&3), Err(StorageError::VertexNotFound)));
    }

    #[test]
    fn test_update_edge() {
        let mut store = create_store::<i32, i32>();
        store.add_vertex(1, 1, VertexProperties::default()).unwrap();
        store.add_vertex(2, 2, VertexProperties::default()).unwrap();
        for (s, t) in [(1, 2), (2, 1), (1, 1), (2, 2)] {
            store.add_edge(s, t, Edge::new(s, t)).unwrap();
        }

        let props = EdgeProperties::weighted(5)
            .with_attribute("abc", "xyz")
            .with_data(b"happy".to_vec());
        store
            .update_edge(&1, &1, Edge::with_properties(1, 1, props))
            .unwrap();

        let edge = store.edge(&1, &1).unwrap();
        assert_eq!(edge.source, 1);
        assert_eq!(edge.target, 1);
        assert_eq!(edge.properties.weight, 5);
        assert_eq!(edge.properties.attributes["abc"], "xyz");
        assert_eq!(edge.properties.data, b"happy");

        // Other edges are untouched.
        let other = store.edge(&2, &2).unwrap();
        assert_eq!(other.properties, EdgeProperties::default());
    }

    #[test]
    fn test_update_replaces_instead_of_merging() {
        let mut store = create_store::<i32, i32>();
        let first = EdgeProperties::weighted(1)
            .with_attribute("stale", "1")
            .with_data(vec![1, 2, 3]);
        store
            .add_edge(1, 2, Edge::with_properties(1, 2, first))
            .unwrap();

        let second = EdgeProperties::weighted(2).with_attribute("fresh", "1");
        store
            .update_edge(&1, &2, Edge::with_properties(1, 2, second.clone()))
            .unwrap();

        assert_eq!(store.edge(&1, &2).unwrap().properties, second);
    }

    #[test]
    fn test_update_missing_edge_succeeds_without_creating() {
        let mut store = create_store::<i32, i32>();
        store
            .update_edge(&1, &2, Edge::with_properties(1, 2, EdgeProperties::weighted(3)))
            .unwrap();
        assert_eq!(store.edge_count().unwrap(), 0);
        assert!(store.edge(&1, &2).unwrap_err().is_edge_not_found());
    }

    #[test]
    fn test_vertex_roundtrip_with_struct_value() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct City {
            name: String,
            population: u64,
            tags: Vec<String>,
        }

        let mut store = create_store::<String, City>();
        let city = City {
            name: "Berlin".into(),
            population: 3_700_000,
            tags: vec!["capital".into()],
        };
        let props = VertexProperties::weighted(7).with_attribute("country", "DE");
        store
            .add_vertex("berlin".into(), city.clone(), props.clone())
            .unwrap();

        let (value, loaded) = store.vertex(&"berlin".to_string()).unwrap();
        assert_eq!(value, city);
        assert_eq!(loaded, props);
    }

    #[test]
    fn test_numeric_values_survive_column_affinity() {
        let mut floats = create_store::<i32, f64>();
        floats.add_vertex(1, -0.0, VertexProperties::default()).unwrap();
        floats.add_vertex(2, 2.5, VertexProperties::default()).unwrap();
        let (negative_zero, _) = floats.vertex(&1).unwrap();
        assert_eq!(negative_zero, 0.0);
        assert!(negative_zero.is_sign_negative());
        assert_eq!(floats.vertex(&2).unwrap().0, 2.5);

        let mut wide = create_store::<i32, u64>();
        wide.add_vertex(1, u64::MAX, VertexProperties::default()).unwrap();
        assert_eq!(wide.vertex(&1).unwrap().0, u64::MAX);

        let mut json = create_store::<i32, serde_json::Value>();
        json.add_vertex(1, serde_json::json!(1.0), VertexProperties::default())
            .unwrap();
        let (whole_float, _) = json.vertex(&1).unwrap();
        assert!(whole_float.is_f64());
        assert_eq!(whole_float.to_string(), "1.0");

        let mut strings = create_store::<i32, String>();
        strings
            .add_vertex(1, "42".to_string(), VertexProperties::default())
            .unwrap();
        assert_eq!(strings.vertex(&1).unwrap().0, "42");
    }

    #[test]
    fn test_values_are_stored_as_blobs() {
        let mut store = create_store::<i32, i64>();
        store.add_vertex(1, 5, VertexProperties::default()).unwrap();
        let storage_class: String = store
            .connection()
            .query_row("SELECT typeof(value) FROM vertices", [], |row| row.get(0))
            .unwrap();
        assert_eq!(storage_class, "blob");
        assert_eq!(store.vertex(&1).unwrap().0, 5);
    }

    #[test]
    fn test_integer_keys_in_text_column() {
        let mut store = create_store::<i64, i32>();
        for key in [10, 20, 30] {
            store
                .add_vertex(key, 0, VertexProperties::default())
                .unwrap();
        }
        store.add_edge(10, 20, Edge::new(10, 20)).unwrap();

        let mut keys = store.list_vertices().unwrap();
        keys.sort_unstable();
        assert_eq!(keys, vec![10, 20, 30]);

        let edges = store.list_edges().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source, edges[0].target), (10, 20));
    }

    #[test]
    fn test_list_edges_decodes_every_row() {
        let mut store = create_store::<String, i32>();
        let mut attributes = BTreeMap::new();
        attributes.insert("kind".to_string(), "road".to_string());
        store
            .add_edge(
                "a".into(),
                "b".into(),
                Edge::with_properties(
                    "a".into(),
                    "b".into(),
                    EdgeProperties {
                        attributes: attributes.clone(),
                        weight: 3,
                        data: vec![0xde, 0xad],
                    },
                ),
            )
            .unwrap();
        store
            .add_edge("b".into(), "a".into(), Edge::new("b".into(), "a".into()))
            .unwrap();

        let mut edges = store.list_edges().unwrap();
        edges.sort_by(|x, y| x.source.cmp(&y.source));
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].properties.attributes, attributes);
        assert_eq!(edges[0].properties.data, vec![0xde, 0xad]);
        assert_eq!(edges[1].properties, EdgeProperties::default());
    }

    #[test]
    fn test_list_edges_aborts_on_bad_row() {
        let mut store = create_store::<i32, i32>();
        store.add_edge(1, 2, Edge::new(1, 2)).unwrap();
        store
            .connection()
            .execute(
                "INSERT INTO edges (source_hash, target_hash, weight, attributes) VALUES (3, 4, 0, 'not json')",
                [],
            )
            .unwrap();

        let err = store.list_edges().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Decode {
                field: "attributes",
                ..
            }
        ));
    }

    #[test]
    fn test_vertex_decode_error() {
        let store = create_store::<i32, Vec<i32>>();
        store
            .connection()
            .execute(
                "INSERT INTO vertices (hash, value, weight, attributes) VALUES (1, '{\"not\": \"a list\"}', 0, '{}')",
                [],
            )
            .unwrap();
        assert!(matches!(
            store.vertex(&1),
            Err(StorageError::Decode { field: "value", .. })
        ));
    }

    #[test]
    fn test_null_columns_decode_as_defaults() {
        let store = create_store::<i32, Option<i32>>();
        store
            .connection()
            .execute("INSERT INTO vertices (hash) VALUES (1)", [])
            .unwrap();
        store
            .connection()
            .execute("INSERT INTO edges (source_hash, target_hash) VALUES (1, 1)", [])
            .unwrap();

        let (value, props) = store.vertex(&1).unwrap();
        assert_eq!(value, None);
        assert_eq!(props, VertexProperties::default());
        assert_eq!(store.edge(&1, &1).unwrap().properties, EdgeProperties::default());
    }

    #[test]
    fn test_missing_tables_report_table_and_operation() {
        let store: SqlStore<i32, i32> =
            SqlStore::open_in_memory(StoreConfig::default()).unwrap();
        match store.vertex_count() {
            Err(StorageError::Sql {
                table, operation, ..
            }) => {
                assert_eq!(table, "vertices");
                assert_eq!(operation, "vertex_count");
            }
            other => panic!("expected Sql error, got: {:?}", other),
        }
    }
}
