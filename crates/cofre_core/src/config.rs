//! Embedding-application configuration for the core.
//!
//! The core never reads configuration on its own; the embedding application
//! deserializes a [`CoreConfig`] (any serde format) at startup and hands it
//! over.

use crate::conn::TransactedConnection;
use crate::db::{open_db_in_memory, open_db_with_timeout, DbResult, DEFAULT_BUSY_TIMEOUT};
use crate::logging::{default_log_level, init_logging};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Database and logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Database file. `None` opens a private in-memory database.
    pub db_path: Option<PathBuf>,
    /// How long a statement waits on a locked database, in milliseconds.
    /// At most [`crate::db::MAX_BUSY_TIMEOUT_MS`]; ignored for in-memory databases.
    pub busy_timeout_ms: u64,
    /// File logging; `None` leaves logging to the embedding application.
    pub log: Option<LogConfig>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT.as_millis() as u64,
            log: None,
        }
    }
}

/// Rolling file logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level_string")]
    pub level: String,
    /// Absolute directory for log files.
    pub log_dir: PathBuf,
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

impl CoreConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Opens the configured database and wraps it in a
    /// [`TransactedConnection`].
    pub fn open_connection(&self) -> DbResult<TransactedConnection> {
        let conn = match &self.db_path {
            Some(path) => open_db_with_timeout(path, self.busy_timeout())?,
            None => open_db_in_memory()?,
        };
        Ok(TransactedConnection::new(conn))
    }

    /// Starts file logging when configured; no-op otherwise.
    pub fn init_logging(&self) -> Result<(), String> {
        match &self.log {
            Some(log) => init_logging(log),
            None => Ok(()),
        }
    }
}
