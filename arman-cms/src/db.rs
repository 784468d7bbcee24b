//! Unit of work
//!
//! Wraps one SQLite transaction together with the name of the operation that
//! opened it. Every multi-statement decision (guard then act, resolve then
//! persist) runs inside a single unit of work.
//!
//! - Units open with `BEGIN IMMEDIATE`. A deferred transaction that reads
//!   first and writes later cannot upgrade its lock while another writer is
//!   active and fails with SQLITE_BUSY instead of waiting on
//!   `busy_timeout`, so every unit takes the write lock up front.
//! - `commit` consumes the unit, so a committed unit cannot be rolled back.
//! - Dropping an uncommitted unit rolls the transaction back. This covers
//!   every early `?` return as well as a request future that is cancelled
//!   mid-flight.

use arman_common::Result;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::time::Instant;

/// Transactions held longer than this are logged at warn level
const LONG_TRANSACTION_MS: u128 = 2000;

pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    monitor: Monitor,
}

/// Release logging, kept apart from the transaction so `commit` can move the
/// transaction out while the monitor still observes drops.
struct Monitor {
    operation: &'static str,
    acquired_at: Instant,
    committed: bool,
}

impl UnitOfWork {
    /// Begin a transaction on `pool` on behalf of `operation`
    pub async fn begin(pool: &SqlitePool, operation: &'static str) -> Result<Self> {
        let start = Instant::now();

        tracing::debug!(operation, "Connection acquisition requested");

        let tx = pool.begin_with("BEGIN IMMEDIATE").await?;

        let wait_ms = start.elapsed().as_millis();
        if wait_ms > 1000 {
            tracing::warn!(
                operation,
                wait_ms,
                "Slow connection acquisition, pool may be saturated"
            );
        } else {
            tracing::debug!(operation, wait_ms, "Unit of work started");
        }

        Ok(Self {
            tx,
            monitor: Monitor {
                operation,
                acquired_at: Instant::now(),
                committed: false,
            },
        })
    }

    /// Connection bound to this transaction
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<()> {
        let UnitOfWork { tx, mut monitor } = self;

        tx.commit().await?;
        monitor.committed = true;

        Ok(())
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        let held_ms = self.acquired_at.elapsed().as_millis();

        if self.committed {
            if held_ms > LONG_TRANSACTION_MS {
                tracing::warn!(
                    operation = self.operation,
                    held_ms,
                    "Long transaction committed"
                );
            } else {
                tracing::debug!(operation = self.operation, held_ms, "Unit of work committed");
            }
        } else if held_ms > LONG_TRANSACTION_MS {
            tracing::warn!(
                operation = self.operation,
                held_ms,
                "Long transaction rolled back"
            );
        } else {
            tracing::debug!(operation = self.operation, held_ms, "Unit of work rolled back");
        }
    }
}
