//! Transaction state machine over [`SqliteConnection`].
//!
//! # Responsibility
//! - Gate every statement behind an explicit transaction scope.
//! - Provide RAII (`TransactionScope`) and higher-order
//!   (`run_in_transaction`, `transact`) ways to open that scope.
//!
//! # Invariants
//! - Initial state is `Inactive`; only `begin` moves it to `Active`.
//! - Dropping a `TransactionScope` always restores `Inactive` and clears the
//!   cursor, including on error propagation and panic unwinding.
//! - Scope exit never commits. `commit`/`rollback` end the current engine
//!   transaction but keep the scope `Active`; the next statement opens a new
//!   engine transaction on its own.
//! - Work left uncommitted at scope exit stays pending in the engine until a
//!   later `commit`, `rollback`, or `close`.
//!
//! The type holds `Cell`/`RefCell` state and is therefore `!Sync`: one
//! instance must not be shared across threads.

use super::row::{map_row, FromRow, Row};
use super::wrapper::SqliteConnection;
use super::{ConnError, ConnResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use log::debug;
use rusqlite::{Connection, Params};
use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::path::Path;

/// Lifecycle state of a [`TransactedConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Inactive,
    Active,
}

/// Connection wrapper that only runs statements inside a transaction scope.
#[derive(Debug)]
pub struct TransactedConnection {
    inner: RefCell<SqliteConnection>,
    state: Cell<TransactionState>,
}

impl TransactedConnection {
    /// Takes exclusive ownership of an already configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            inner: RefCell::new(SqliteConnection::new(conn)),
            state: Cell::new(TransactionState::Inactive),
        }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    pub fn state(&self) -> TransactionState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == TransactionState::Active
    }

    /// Opens a transaction scope.
    ///
    /// # Errors
    /// - `TransactionAlreadyActive` when another scope is still alive.
    /// - `Driver` when the engine refuses `BEGIN`.
    pub fn begin(&self) -> ConnResult<TransactionScope<'_>> {
        if self.is_active() {
            return Err(ConnError::TransactionAlreadyActive);
        }
        self.inner.borrow_mut().begin()?;
        self.state.set(TransactionState::Active);
        debug!("event=tx_scope module=conn status=enter");
        Ok(TransactionScope { conn: self })
    }

    /// Runs `f` inside a fresh transaction scope.
    ///
    /// The scope is closed when `f` returns; committing or rolling back is
    /// left to `f`.
    pub fn run_in_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<ConnError>,
    {
        let _scope = self.begin()?;
        f()
    }

    /// Wraps `f` so that every call of the returned function runs inside
    /// its own transaction scope.
    pub fn transact<'a, T, E, F>(&'a self, f: F) -> impl Fn() -> Result<T, E> + 'a
    where
        F: Fn() -> Result<T, E> + 'a,
        T: 'a,
        E: From<ConnError> + 'a,
    {
        move || self.run_in_transaction(&f)
    }

    /// Executes one statement inside the active scope.
    ///
    /// # Errors
    /// - `TransactionNotActive` outside a scope; nothing reaches the engine.
    /// - `IntegrityViolation` / `Driver` as classified by the engine. The
    ///   engine transaction stays open either way.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> ConnResult<usize> {
        self.ensure_active()?;
        let mut inner = self.inner.borrow_mut();
        inner.begin()?;
        inner.execute(sql, params)
    }

    pub fn fetch_one(&self) -> ConnResult<Option<Row>> {
        self.ensure_active()?;
        Ok(self.inner.borrow_mut().fetch_one())
    }

    pub fn fetch_one_as<T: FromRow>(&self) -> ConnResult<Option<T>> {
        self.fetch_one()?.as_ref().map(map_row::<T>).transpose()
    }

    pub fn fetch_all(&self) -> ConnResult<Vec<Row>> {
        self.ensure_active()?;
        Ok(self.inner.borrow_mut().fetch_all())
    }

    pub fn fetch_all_as<T: FromRow>(&self) -> ConnResult<Vec<T>> {
        self.ensure_active()?;
        self.inner.borrow_mut().fetch_all_as()
    }

    /// Rowid assigned by the most recent successful `INSERT` in this scope.
    pub fn last_insert_key(&self) -> ConnResult<i64> {
        self.ensure_active()?;
        Ok(self.inner.borrow().last_insert_rowid())
    }

    /// Makes pending work durable. The scope stays `Active`.
    pub fn commit(&self) -> ConnResult<()> {
        self.ensure_active()?;
        self.inner.borrow_mut().commit()
    }

    /// Discards pending work. The scope stays `Active`.
    pub fn rollback(&self) -> ConnResult<()> {
        self.ensure_active()?;
        self.inner.borrow_mut().rollback()
    }

    /// Closes the physical connection, discarding uncommitted work.
    pub fn close(self) -> ConnResult<()> {
        self.inner.into_inner().close()
    }

    fn ensure_active(&self) -> ConnResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(ConnError::TransactionNotActive)
        }
    }

    fn end_scope(&self) {
        self.state.set(TransactionState::Inactive);
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.clear_cursor();
        }
        debug!("event=tx_scope module=conn status=exit");
    }
}

/// RAII guard for one transaction scope.
///
/// Dereferences to the owning [`TransactedConnection`].
#[derive(Debug)]
pub struct TransactionScope<'conn> {
    conn: &'conn TransactedConnection,
}

impl<'conn> TransactionScope<'conn> {
    /// Returns the connection with the full borrow lifetime, for building
    /// DAOs that outlive a reborrow of the guard.
    pub fn connection(&self) -> &'conn TransactedConnection {
        self.conn
    }
}

impl Deref for TransactionScope<'_> {
    type Target = TransactedConnection;

    fn deref(&self) -> &Self::Target {
        self.conn
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        self.conn.end_scope();
    }
}
