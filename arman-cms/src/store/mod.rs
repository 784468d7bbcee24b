//! Store adapters
//!
//! One module per entity. Every function takes `&mut SqliteConnection`, so the
//! same code runs against a pooled connection (`&mut conn`) or an open unit
//! of work (`uow.conn()`).
//!
//! Writes that target a single row go through [`check_affected`]: zero rows
//! means the id does not exist, more than one means the schema is broken.

pub mod biography;
pub mod composer;
pub mod dependents;
pub mod event;
pub mod piece;
pub mod programme;
pub mod venue;

use arman_common::{Error, Result};
use sqlx::sqlite::SqliteQueryResult;
use sqlx::SqliteConnection;

/// Tables addressable by primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Composers,
    Pieces,
    Programmes,
    Venues,
    Events,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Table::Composers => "composers",
            Table::Pieces => "pieces",
            Table::Programmes => "programmes",
            Table::Venues => "venues",
            Table::Events => "events",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Table::Composers => "composer_id",
            Table::Pieces => "piece_id",
            Table::Programmes => "programme_id",
            Table::Venues => "venue_id",
            Table::Events => "event_id",
        }
    }
}

/// Exactly one row must have been touched
pub fn check_affected(result: SqliteQueryResult) -> Result<()> {
    match result.rows_affected() {
        0 => Err(Error::ResourceNotFound),
        1 => Ok(()),
        n => Err(Error::InvariantViolation(format!(
            "expected 1 row affected, got {}",
            n
        ))),
    }
}

/// Touch the row `id` in `table` before a guarded mutation.
///
/// Issues a no-op update of the row. Inside a unit of work the database
/// write lock is already held, so no concurrent writer can add a dependent
/// row between a guard's count and the mutation that follows it. Fails with
/// `ResourceNotFound` when the row does not exist.
pub async fn lock_for_update(conn: &mut SqliteConnection, table: Table, id: i64) -> Result<()> {
    let sql = format!(
        "UPDATE {table} SET {key} = {key} WHERE {key} = ?",
        table = table.name(),
        key = table.key()
    );

    let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;

    check_affected(result)
}

/// Whether a row with `id` exists in `table`
pub async fn exists(conn: &mut SqliteConnection, table: Table, id: i64) -> Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {table} WHERE {key} = ?)",
        table = table.name(),
        key = table.key()
    );

    let found: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await?;

    Ok(found)
}
