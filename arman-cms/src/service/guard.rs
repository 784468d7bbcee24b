//! Protection guard
//!
//! Refuses a deletion or mutation while dependent rows reference the target.
//! Callers run the guard inside the unit of work that performs the mutation,
//! after locking the target row, so the count cannot go stale before the act.

use crate::store::dependents::Dependency;
use arman_common::{Error, Result};
use sqlx::SqliteConnection;
use tracing::debug;

/// Fail with `blocked` if any row on the dependent side of `dependency`
/// references `id`.
pub async fn ensure_unreferenced(
    conn: &mut SqliteConnection,
    dependency: Dependency,
    id: i64,
    blocked: Error,
) -> Result<()> {
    let count = dependency.count(conn, id).await?;

    debug!(?dependency, id, count, "Reference count");

    if count > 0 {
        return Err(blocked);
    }

    Ok(())
}
