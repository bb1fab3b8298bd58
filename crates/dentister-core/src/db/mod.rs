//! Database layer for the clinic records store.

mod bulk;
mod meetings;
mod patients;
mod payments;
mod schema;
mod transfers;

pub use bulk::*;
pub use schema::*;

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Integrity violation: {0}")]
    Integrity(String),
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => DbError::Integrity(e.to_string()),
            _ => DbError::Sqlite(e),
        }
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Opened clinic database");
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> DbResult<rusqlite::Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Wipe all four tables in one transaction.
    pub fn clear_all(&mut self) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.clear_tables()?;
        tx.commit()?;
        tracing::info!("Cleared all clinic records");
        Ok(())
    }

    /// Delete every row and reset ID sequences, inside the caller's transaction.
    pub(crate) fn clear_tables(&self) -> DbResult<()> {
        self.conn.execute_batch(
            r#"
            DELETE FROM meetings;
            DELETE FROM transfers;
            DELETE FROM payments;
            DELETE FROM patients;
            DELETE FROM sqlite_sequence
                WHERE name IN ('patients', 'meetings', 'transfers', 'payments');
            "#,
        )?;
        Ok(())
    }
}
