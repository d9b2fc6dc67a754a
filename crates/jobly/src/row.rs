//! Row mapping traits and utilities

use crate::error::{JoblyError, JoblyResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for types that can be constructed from a database row.
pub trait FromRow: Sized {
    /// Construct an instance from a database row.
    fn from_row(row: &Row) -> JoblyResult<Self>;
}

/// Extension methods for `tokio_postgres::Row`.
pub trait RowExt {
    /// Get a column value by name, mapping failures to [`JoblyError::Decode`].
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| JoblyError::decode(column, e.to_string()))
    }
}
