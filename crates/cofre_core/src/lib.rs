//! Persistence core for the cofre credential/category manager.
//! Transaction-scoped SQLite access, the generic DAO contract and the
//! category entity built on it.

pub mod config;
pub mod conn;
pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{CoreConfig, LogConfig};
pub use conn::{
    ConnError, ConnResult, FromRow, Row, TransactedConnection, TransactionScope, TransactionState,
};
pub use dao::category_dao::{CategoryDao, CategoryRecord, NewCategoryRecord, SqliteCategoryDao};
pub use dao::Dao;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryKey, CategoryName};
pub use model::secret::SecretKey;
pub use service::category_service::{
    CategoryError, CategoryLookup, CategoryResult, CategoryService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
