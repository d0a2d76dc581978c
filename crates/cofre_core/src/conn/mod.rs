//! Transaction-scoped SQLite access layer.
//!
//! # Responsibility
//! - Wrap one physical SQLite connection behind a buffered cursor API.
//! - Translate engine errors into the stable [`ConnError`] taxonomy.
//! - Enforce that statements only run inside an explicit transaction scope.
//!
//! # Invariants
//! - Constraint failures (`SQLITE_CONSTRAINT*`) surface as
//!   [`ConnError::IntegrityViolation`]; every other engine failure surfaces
//!   as [`ConnError::Driver`].
//! - A [`TransactedConnection`] is `Inactive` whenever no
//!   [`TransactionScope`] is alive.

use log::warn;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod row;
mod transacted;
mod wrapper;

pub use row::{FromRow, Row};
pub use transacted::{TransactedConnection, TransactionScope, TransactionState};
pub use wrapper::SqliteConnection;

pub type ConnResult<T> = Result<T, ConnError>;

/// Error taxonomy shared by the connection layer and every DAO built on it.
#[derive(Debug)]
pub enum ConnError {
    /// A statement, fetch, commit or rollback ran outside a transaction scope.
    TransactionNotActive,
    /// A transaction scope was opened while another one is still alive.
    TransactionAlreadyActive,
    /// The engine rejected a statement because of a unique, check, not-null,
    /// primary key or foreign key constraint.
    IntegrityViolation(rusqlite::Error),
    /// Any other engine-level failure (I/O, syntax, busy, misuse).
    Driver(rusqlite::Error),
    /// A result row does not fit the requested record shape.
    Mapping(String),
}

impl ConnError {
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::IntegrityViolation(_))
    }
}

impl Display for ConnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransactionNotActive => write!(f, "no transaction is active"),
            Self::TransactionAlreadyActive => write!(f, "a transaction is already active"),
            Self::IntegrityViolation(err) => write!(f, "integrity violation: {err}"),
            Self::Driver(err) => write!(f, "{err}"),
            Self::Mapping(message) => write!(f, "row mapping failed: {message}"),
        }
    }
}

impl Error for ConnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IntegrityViolation(err) | Self::Driver(err) => Some(err),
            Self::TransactionNotActive | Self::TransactionAlreadyActive | Self::Mapping(_) => None,
        }
    }
}

impl From<rusqlite::Error> for ConnError {
    fn from(value: rusqlite::Error) -> Self {
        if is_constraint_violation(&value) {
            warn!(
                "event=db_execute module=conn status=error error_code=integrity_violation error={}",
                value
            );
            Self::IntegrityViolation(value)
        } else {
            Self::Driver(value)
        }
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::ConnError;
    use rusqlite::ffi;

    fn failure(code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), None)
    }

    #[test]
    fn constraint_codes_classify_as_integrity_violation() {
        for code in [
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            ffi::SQLITE_CONSTRAINT_CHECK,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            ffi::SQLITE_CONSTRAINT_NOTNULL,
        ] {
            let err = ConnError::from(failure(code));
            assert!(err.is_integrity_violation(), "code {code} should be a violation");
        }
    }

    #[test]
    fn other_engine_failures_classify_as_driver_errors() {
        let err = ConnError::from(failure(ffi::SQLITE_BUSY));
        assert!(matches!(err, ConnError::Driver(_)));

        let err = ConnError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, ConnError::Driver(_)));
    }
}
