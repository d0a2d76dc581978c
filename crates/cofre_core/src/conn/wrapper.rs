//! Raw statement execution over one SQLite connection.
//!
//! # Invariants
//! - Each `execute` replaces the cursor; rows of a previous statement are
//!   never mixed with rows of the next one.
//! - Transaction primitives are idempotent with respect to engine state:
//!   `begin` is a no-op inside an open transaction, `commit`/`rollback`
//!   are no-ops in autocommit mode.
//! - State enforcement belongs to `TransactedConnection`, not here.

use super::row::{map_row, FromRow, Row};
use super::{ConnError, ConnResult};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{Connection, Params};
use std::collections::VecDeque;

/// Owner of one physical SQLite connection and its result cursor.
#[derive(Debug)]
pub struct SqliteConnection {
    conn: Connection,
    cursor: VecDeque<Row>,
}

impl SqliteConnection {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            cursor: VecDeque::new(),
        }
    }

    /// Runs one statement with bound parameters.
    ///
    /// Statements that yield columns have all of their rows buffered for
    /// `fetch_*`; the return value is then `0`. Other statements return
    /// the number of changed rows.
    pub fn execute<P: Params>(&mut self, sql: &str, params: P) -> ConnResult<usize> {
        self.clear_cursor();

        let mut stmt = self.conn.prepare(sql)?;
        let column_count = stmt.column_count();
        if column_count == 0 {
            return Ok(stmt.execute(params)?);
        }

        let mut buffered = VecDeque::new();
        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let values = (0..column_count)
                .map(|index| row.get::<_, Value>(index))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            buffered.push_back(Row::new(values));
        }

        self.cursor = buffered;
        Ok(0)
    }

    /// Returns the next buffered row, or `None` when the cursor is drained.
    pub fn fetch_one(&mut self) -> Option<Row> {
        self.cursor.pop_front()
    }

    /// Drains every remaining buffered row in statement order.
    pub fn fetch_all(&mut self) -> Vec<Row> {
        self.cursor.drain(..).collect()
    }

    /// Drains every remaining row mapped into `T`.
    pub fn fetch_all_as<T: FromRow>(&mut self) -> ConnResult<Vec<T>> {
        self.cursor.drain(..).map(|row| map_row(&row)).collect()
    }

    /// Rowid assigned by the most recent successful `INSERT`.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Whether the engine currently holds an open transaction.
    pub fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }

    pub fn begin(&mut self) -> ConnResult<()> {
        if self.in_transaction() {
            return Ok(());
        }
        self.conn.execute_batch("BEGIN;")?;
        debug!("event=tx_begin module=conn status=ok");
        Ok(())
    }

    pub fn commit(&mut self) -> ConnResult<()> {
        if !self.in_transaction() {
            return Ok(());
        }
        self.conn.execute_batch("COMMIT;")?;
        info!("event=tx_commit module=conn status=ok");
        Ok(())
    }

    pub fn rollback(&mut self) -> ConnResult<()> {
        if !self.in_transaction() {
            return Ok(());
        }
        self.conn.execute_batch("ROLLBACK;")?;
        info!("event=tx_rollback module=conn status=ok");
        Ok(())
    }

    pub fn clear_cursor(&mut self) {
        self.cursor.clear();
    }

    /// Closes the physical connection. Pending uncommitted work is discarded
    /// by the engine.
    pub fn close(self) -> ConnResult<()> {
        self.conn.close().map_err(|(_, err)| ConnError::from(err))?;
        info!("event=db_close module=conn status=ok");
        Ok(())
    }
}
