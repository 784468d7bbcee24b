use super::guard::ensure_unreferenced;
use super::report;
use super::resolver::resolve;
use crate::db::UnitOfWork;
use crate::store::dependents::Dependency;
use crate::store::{self, lock_for_update, Table};
use arman_common::content::{Venue, VenueWithDetails};
use arman_common::{Error, Intent, Operation, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct VenueCommand {
    pub venue: Intent<Venue>,
}

pub struct VenueService {
    db: SqlitePool,
}

impl VenueService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn get(&self, id: i64) -> Result<VenueWithDetails> {
        let mut conn = self.db.acquire().await?;
        store::venue::get_with_details(&mut conn, id).await
    }

    pub async fn list(&self) -> Result<Vec<VenueWithDetails>> {
        let mut conn = self.db.acquire().await?;
        store::venue::list_with_details(&mut conn).await
    }

    pub async fn create(&self, command: VenueCommand) -> Result<Venue> {
        const OP: &str = "venue.create";

        command
            .venue
            .ensure_operation(Operation::Create)
            .inspect_err(|e| report(OP, "operation", e))?;

        let mut conn = self.db.acquire().await?;
        let venue = resolve(&mut conn, command.venue)
            .await
            .inspect_err(|e| report(OP, "insert", e))?;

        info!(operation = OP, venue_id = venue.id, "Venue created");
        Ok(venue)
    }

    pub async fn update(&self, id: i64, command: VenueCommand) -> Result<Venue> {
        const OP: &str = "venue.update";

        command
            .venue
            .ensure_operation(Operation::Update)
            .inspect_err(|e| report(OP, "operation", e))?;

        let mut intent = command.venue;
        intent.data.id = id;

        let mut conn = self.db.acquire().await?;
        let venue = resolve(&mut conn, intent)
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        info!(operation = OP, venue_id = id, "Venue updated");
        Ok(venue)
    }

    /// Delete a venue no published event is held at
    pub async fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "venue.delete";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Venues, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(
            uow.conn(),
            Dependency::VenuePublishedEvents,
            id,
            Error::VenueProtected,
        )
        .await
        .inspect_err(|e| report(OP, "guard", e))?;

        store::venue::delete(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "delete", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, venue_id = id, "Venue deleted");
        Ok(())
    }
}
