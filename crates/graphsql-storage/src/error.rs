//! Storage error types for graphsql-storage.
//!
//! [`StorageError`] covers every failure mode of the storage layer:
//! encoding, decoding, not-found lookups, and database failures tagged with
//! the table and operation that produced them.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A vertex value or an attribute map could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored payload could not be parsed back.
    #[error("failed to decode {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// No vertex row matched the requested key.
    #[error("vertex not found")]
    VertexNotFound,

    /// No edge row matched the requested (source, target) pair.
    #[error("edge not found")]
    EdgeNotFound,

    /// The database could not be opened.
    #[error("failed to open database: {0}")]
    Open(#[source] rusqlite::Error),

    /// A statement against one of the graph tables failed.
    #[error("{operation} on {table} failed: {source}")]
    Sql {
        table: String,
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Creating one of the graph tables failed.
    #[error("failed to set up {table} table: {source}")]
    Setup {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Dropping one of the graph tables failed.
    #[error("failed to drop {table} table: {source}")]
    Teardown {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl StorageError {
    /// Returns `true` for both vertex and edge lookups that found no row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::VertexNotFound | StorageError::EdgeNotFound)
    }

    /// Returns `true` only when an edge lookup found no row.
    pub fn is_edge_not_found(&self) -> bool {
        matches!(self, StorageError::EdgeNotFound)
    }

    /// Builds a mapper that tags a rusqlite error with its table and operation.
    pub(crate) fn sql<'a>(
        table: &'a str,
        operation: &'static str,
    ) -> impl FnOnce(rusqlite::Error) -> StorageError + 'a {
        move |source| StorageError::Sql {
            table: table.to_string(),
            operation,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_predicates() {
        assert!(StorageError::VertexNotFound.is_not_found());
        assert!(!StorageError::VertexNotFound.is_edge_not_found());
        assert!(StorageError::EdgeNotFound.is_not_found());
        assert!(StorageError::EdgeNotFound.is_edge_not_found());
    }

    #[test]
    fn sql_error_names_table_and_operation() {
        let err = StorageError::sql("edges", "edge_count")(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_not_found());
        let message = err.to_string();
        assert!(message.starts_with("edge_count on edges failed"), "{message}");
    }

    #[test]
    fn setup_and_teardown_messages_name_the_table() {
        let setup = StorageError::Setup {
            table: "vertices".into(),
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(setup.to_string().contains("set up vertices table"));

        let teardown = StorageError::Teardown {
            table: "edges".into(),
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(teardown.to_string().contains("drop edges table"));
    }
}
