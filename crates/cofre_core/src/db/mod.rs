//! Raw connection bootstrap for the vault database.
//!
//! Everything above this module works on a [`rusqlite::Connection`] that
//! [`open_db`] (or one of its variants) has already configured: foreign
//! keys on, busy timeout set, schema at [`migrations::latest_version`].
//! Callers normally reach it through `CoreConfig::open_connection` or
//! `TransactedConnection::open`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{
    open_db, open_db_in_memory, open_db_with_timeout, DEFAULT_BUSY_TIMEOUT, MAX_BUSY_TIMEOUT_MS,
};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to hand out a ready connection.
#[derive(Debug)]
pub enum DbError {
    /// The engine refused to open, configure or migrate the file.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; it is left untouched.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Requested busy timeout does not fit SQLite's millisecond counter.
    BusyTimeoutOutOfRange { requested_ms: u128 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::BusyTimeoutOutOfRange { requested_ms } => write!(
                f,
                "busy timeout of {requested_ms}ms exceeds the maximum of {MAX_BUSY_TIMEOUT_MS}ms"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::BusyTimeoutOutOfRange { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
