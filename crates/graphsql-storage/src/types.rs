//! Mapping between vertex keys and SQL column values.
//!
//! The key column type is operator configured (`TEXT` by default), so the
//! storage class SQLite hands back need not match the one that was bound: an
//! integer key written into a `TEXT` column is read back as text. Decoding is
//! therefore lenient across integer and text storage classes.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Value, ValueRef};

/// A vertex key that can be bound as a statement parameter and read back from
/// a key column.
pub trait SqlKey: Clone + Eq {
    /// Converts the key into the value bound for `hash`, `source_hash` and
    /// `target_hash`.
    fn to_sql_value(&self) -> Value;

    /// Decodes a key from a column value.
    fn from_sql_value(value: ValueRef<'_>) -> FromSqlResult<Self>;
}

fn utf8(bytes: &[u8]) -> FromSqlResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))
}

impl SqlKey for String {
    fn to_sql_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_sql_value(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(text) | ValueRef::Blob(text) => utf8(text).map(str::to_string),
            ValueRef::Integer(i) => Ok(i.to_string()),
            ValueRef::Real(f) => Ok(f.to_string()),
            ValueRef::Null => Err(FromSqlError::InvalidType),
        }
    }
}

macro_rules! impl_sql_key_for_int {
    ($($ty:ty),*) => {
        $(
            impl SqlKey for $ty {
                fn to_sql_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }

                fn from_sql_value(value: ValueRef<'_>) -> FromSqlResult<Self> {
                    let wide = match value {
                        ValueRef::Integer(i) => i,
                        ValueRef::Text(text) => utf8(text)?
                            .trim()
                            .parse::<i64>()
                            .map_err(|e| FromSqlError::Other(Box::new(e)))?,
                        _ => return Err(FromSqlError::InvalidType),
                    };
                    <$ty>::try_from(wide).map_err(|_| FromSqlError::OutOfRange(wide))
                }
            }
        )*
    };
}

impl_sql_key_for_int!(i8, i16, i32, i64, u8, u16, u32);

/// Column adapter so `row.get::<_, KeyColumn<K>>(idx)` decodes any [`SqlKey`].
pub(crate) struct KeyColumn<K>(pub K);

impl<K: SqlKey> FromSql for KeyColumn<K> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        K::from_sql_value(value).map(KeyColumn)
    }
}
