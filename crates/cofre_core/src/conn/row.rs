//! Buffered result rows and positional record mapping.

use super::{ConnError, ConnResult};
use rusqlite::types::{FromSql, Value, ValueRef};

/// One result row detached from its statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Reads column `index` converted to `T`.
    ///
    /// # Errors
    /// - `Mapping` when the index is out of range or the stored value does
    ///   not convert to `T`.
    pub fn get<T: FromSql>(&self, index: usize) -> ConnResult<T> {
        let value = self.values.get(index).ok_or_else(|| {
            ConnError::Mapping(format!(
                "column index {index} out of range for row with {} columns",
                self.values.len()
            ))
        })?;
        T::column_result(ValueRef::from(value))
            .map_err(|err| ConnError::Mapping(format!("column {index}: {err}")))
    }
}

/// Record shape that can be built positionally from a [`Row`].
///
/// `FIELDS` lists the expected columns in order. Rows whose column count
/// differs from `FIELDS.len()` are rejected before `from_row` runs.
pub trait FromRow: Sized {
    const FIELDS: &'static [&'static str];

    fn from_row(row: &Row) -> ConnResult<Self>;
}

pub(crate) fn map_row<T: FromRow>(row: &Row) -> ConnResult<T> {
    if row.len() != T::FIELDS.len() {
        return Err(ConnError::Mapping(format!(
            "expected {} columns ({}), got {}",
            T::FIELDS.len(),
            T::FIELDS.join(", "),
            row.len()
        )));
    }
    T::from_row(row)
}

macro_rules! tuple_from_row {
    ($($name:ident => $index:tt),+) => {
        impl<$($name: FromSql),+> FromRow for ($($name,)+) {
            const FIELDS: &'static [&'static str] = &[$(stringify!($index)),+];

            fn from_row(row: &Row) -> ConnResult<Self> {
                Ok(($(row.get::<$name>($index)?,)+))
            }
        }
    };
}

tuple_from_row!(A => 0);
tuple_from_row!(A => 0, B => 1);
tuple_from_row!(A => 0, B => 1, C => 2);
tuple_from_row!(A => 0, B => 1, C => 2, D => 3);
