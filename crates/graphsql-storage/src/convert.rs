//! JSON encoding of vertex values and attribute maps, and the column adapters
//! used to read them back.
//!
//! Values are serialized to JSON and bound as a BLOB, which SQLite stores
//! untouched whatever the column's affinity. Reads go through [`JsonColumn`]
//! rather than `String` so rows written by other tools as TEXT, or as a
//! number coerced by a NUMERIC column, still decode.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use serde::de::DeserializeOwned;
use serde::Serialize;

use graphsql_core::Attributes;

use crate::error::StorageError;

/// Encodes a vertex value.
pub fn encode_value<T: Serialize>(value: &T) -> Result<String, StorageError> {
    Ok(serde_json::to_string(value)?)
}

/// Encodes an attribute map as a JSON object.
pub fn encode_attributes(attributes: &Attributes) -> Result<String, StorageError> {
    Ok(serde_json::to_string(attributes)?)
}

/// Decodes a vertex value. A NULL column is decoded as JSON `null`.
pub fn decode_value<T: DeserializeOwned>(raw: Option<&str>) -> Result<T, StorageError> {
    serde_json::from_str(raw.unwrap_or("null")).map_err(|source| StorageError::Decode {
        field: "value",
        source,
    })
}

/// Decodes an attribute map. NULL and JSON `null` both decode as empty.
pub fn decode_attributes(raw: Option<&str>) -> Result<Attributes, StorageError> {
    let Some(raw) = raw else {
        return Ok(Attributes::new());
    };
    let attributes: Option<Attributes> =
        serde_json::from_str(raw).map_err(|source| StorageError::Decode {
            field: "attributes",
            source,
        })?;
    Ok(attributes.unwrap_or_default())
}

/// JSON text read back from a column, whatever storage class it ended up in.
pub(crate) struct JsonColumn(pub Option<String>);

impl FromSql for JsonColumn {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = match value {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(i.to_string()),
            ValueRef::Real(f) => Some(f.to_string()),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(
                String::from_utf8(bytes.to_vec()).map_err(|e| FromSqlError::Other(Box::new(e)))?,
            ),
        };
        Ok(JsonColumn(text))
    }
}

/// Opaque edge payload. NULL reads as an empty payload.
pub(crate) struct BytesColumn(pub Vec<u8>);

impl FromSql for BytesColumn {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(BytesColumn(Vec::new())),
            ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Ok(BytesColumn(bytes.to_vec())),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn value_roundtrip_through_json() {
        let mut value = HashMap::new();
        value.insert("name".to_string(), vec![1, 2, 3]);
        let json = encode_value(&value).unwrap();
        let back: HashMap<String, Vec<i32>> = decode_value(Some(&json)).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn null_value_only_decodes_into_optional_types() {
        let missing: Option<i32> = decode_value(None).unwrap();
        assert_eq!(missing, None);
        let err = decode_value::<i32>(None).unwrap_err();
        assert!(matches!(err, StorageError::Decode { field: "value", .. }));
    }

    #[test]
    fn attributes_encode_as_object() {
        let mut attributes = Attributes::new();
        attributes.insert("b".into(), "2".into());
        attributes.insert("a".into(), "1".into());
        assert_eq!(encode_attributes(&attributes).unwrap(), r#"{"a":"1","b":"2"}"#);
        assert_eq!(encode_attributes(&Attributes::new()).unwrap(), "{}");
    }

    #[test]
    fn missing_attributes_decode_as_empty() {
        assert!(decode_attributes(None).unwrap().is_empty());
        assert!(decode_attributes(Some("null")).unwrap().is_empty());
    }

    #[test]
    fn malformed_attributes_are_a_decode_error() {
        let err = decode_attributes(Some("[1, 2]")).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Decode {
                field: "attributes",
                ..
            }
        ));
    }

    #[test]
    fn json_column_renders_numeric_storage_classes() {
        let JsonColumn(int) = JsonColumn::column_result(ValueRef::Integer(5)).unwrap();
        assert_eq!(int.as_deref(), Some("5"));
        let JsonColumn(real) = JsonColumn::column_result(ValueRef::Real(1.5)).unwrap();
        assert_eq!(real.as_deref(), Some("1.5"));
        let JsonColumn(null) = JsonColumn::column_result(ValueRef::Null).unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn bytes_column_treats_null_as_empty() {
        let BytesColumn(bytes) = BytesColumn::column_result(ValueRef::Null).unwrap();
        assert!(bytes.is_empty());
        let BytesColumn(bytes) = BytesColumn::column_result(ValueRef::Blob(b"\x00\x01")).unwrap();
        assert_eq!(bytes, vec![0, 1]);
    }
}
