//! Data-access-object contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the CRUD/query shape every entity DAO implements.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - DAOs never pre-check constraints; the engine enforces them and the
//!   resulting `ConnError::IntegrityViolation` propagates unchanged.
//! - Absence is a value (`None`, empty `Vec`), never an error.
//! - Batch reads return matches in primary-key order, never input order.
//! - DAOs borrow a `TransactedConnection`; they never own one.

use crate::conn::ConnResult;

pub mod category_dao;

/// CRUD contract for one entity table.
pub trait Dao {
    /// Surrogate key assigned by the engine.
    type Key;
    /// Uniquely constrained non-surrogate field.
    type NaturalKey;
    /// Full persisted record.
    type Record;
    /// Record shape before a key is assigned.
    type NewRecord;

    /// Inserts `data` and returns the assigned key.
    fn create(&self, data: &Self::NewRecord) -> ConnResult<Self::Key>;

    fn fetch_by_key(&self, key: &Self::Key) -> ConnResult<Option<Self::Record>>;

    fn fetch_by_natural_key(
        &self,
        natural_key: &Self::NaturalKey,
    ) -> ConnResult<Option<Self::Record>>;

    /// Returns the existing subset of `keys`; unknown keys are skipped.
    fn list_by_keys(&self, keys: &[Self::Key]) -> ConnResult<Vec<Self::Record>>;

    /// Returns the existing subset of `natural_keys`; unknown ones are skipped.
    fn list_by_natural_keys(
        &self,
        natural_keys: &[Self::NaturalKey],
    ) -> ConnResult<Vec<Self::Record>>;

    /// Full scan ordered by primary key.
    fn list_all(&self) -> ConnResult<Vec<Self::Record>>;

    /// Deletes at most one record. A missing key is a no-op.
    fn delete_by_key(&self, key: &Self::Key) -> ConnResult<()>;

    /// Replaces every field of the record stored under `record`'s key.
    ///
    /// Does not check existence: a missing key is a no-op.
    fn save_with_key(&self, record: &Self::Record) -> ConnResult<()>;
}

/// Bound parameters SQLite accepts in one statement
/// (`SQLITE_MAX_VARIABLE_NUMBER` of the bundled build).
pub const MAX_BIND_PARAMS: usize = 32_766;

/// Builds `?1, ?2, …, ?n` for an `IN (…)` clause.
pub fn in_placeholders(count: usize) -> String {
    (1..=count)
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::in_placeholders;

    #[test]
    fn in_placeholders_numbers_from_one() {
        assert_eq!(in_placeholders(1), "?1");
        assert_eq!(in_placeholders(3), "?1, ?2, ?3");
        assert_eq!(in_placeholders(0), "");
    }
}
