//! Programme use cases
//!
//! A programme referenced by a published event is frozen: its title and its
//! piece list are immutable and it cannot be deleted.

use super::guard::ensure_unreferenced;
use super::report;
use crate::db::UnitOfWork;
use crate::store::dependents::Dependency;
use crate::store::{self, lock_for_update, Table};
use arman_common::content::{Programme, ProgrammeWithDetails, ProgrammeWithPieces};
use arman_common::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeSet;
use tracing::info;

pub struct ProgrammeService {
    db: SqlitePool,
}

/// Programme and its slots in sequence order
pub(crate) async fn load_with_pieces(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<ProgrammeWithPieces> {
    let programme = store::programme::get(conn, id).await?;
    let pieces = store::programme::list_pieces(conn, id).await?;

    Ok(ProgrammeWithPieces { programme, pieces })
}

impl ProgrammeService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn get(&self, id: i64) -> Result<ProgrammeWithPieces> {
        let mut conn = self.db.acquire().await?;
        load_with_pieces(&mut conn, id).await
    }

    pub async fn get_details(&self, id: i64) -> Result<ProgrammeWithDetails> {
        let mut conn = self.db.acquire().await?;
        store::programme::get_with_details(&mut conn, id).await
    }

    pub async fn list(&self) -> Result<Vec<ProgrammeWithDetails>> {
        let mut conn = self.db.acquire().await?;
        store::programme::list_with_details(&mut conn).await
    }

    /// Create an empty programme
    pub async fn create(&self, programme: Programme) -> Result<Programme> {
        const OP: &str = "programme.create";

        programme
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        let mut conn = self.db.acquire().await?;
        let created = store::programme::create(&mut conn, &programme)
            .await
            .inspect_err(|e| report(OP, "insert", e))?;

        info!(operation = OP, programme_id = created.id, "Programme created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, mut programme: Programme) -> Result<Programme> {
        const OP: &str = "programme.update";

        programme.id = id;
        programme
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Programmes, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(
            uow.conn(),
            Dependency::ProgrammePublishedEvents,
            id,
            Error::ProgrammeImmutable,
        )
        .await
        .inspect_err(|e| report(OP, "guard", e))?;

        let updated = store::programme::update(uow.conn(), &programme)
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, programme_id = id, "Programme updated");
        Ok(updated)
    }

    /// Replace the piece list of a programme.
    ///
    /// Slots are numbered from 1 in the order of `piece_ids`; a piece listed
    /// twice fills two slots. Every id must name an existing piece.
    pub async fn update_pieces(&self, id: i64, piece_ids: Vec<i64>) -> Result<ProgrammeWithPieces> {
        const OP: &str = "programme.update_pieces";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Programmes, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(
            uow.conn(),
            Dependency::ProgrammePublishedEvents,
            id,
            Error::ProgrammeImmutable,
        )
        .await
        .inspect_err(|e| report(OP, "guard", e))?;

        for piece_id in piece_ids.iter().copied().collect::<BTreeSet<_>>() {
            if !store::exists(uow.conn(), Table::Pieces, piece_id).await? {
                let err = Error::ResourceNotFound;
                report(OP, "check_pieces", &err);
                return Err(err);
            }
        }

        store::programme::replace_pieces(uow.conn(), id, &piece_ids)
            .await
            .inspect_err(|e| report(OP, "replace", e))?;

        let programme = load_with_pieces(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "reload", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(
            operation = OP,
            programme_id = id,
            piece_count = programme.pieces.len(),
            "Programme pieces replaced"
        );
        Ok(programme)
    }

    /// Delete a programme no published event performs
    pub async fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "programme.delete";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Programmes, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(
            uow.conn(),
            Dependency::ProgrammePublishedEvents,
            id,
            Error::ProgrammeProtected,
        )
        .await
        .inspect_err(|e| report(OP, "guard", e))?;

        store::programme::delete(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "delete", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, programme_id = id, "Programme deleted");
        Ok(())
    }
}
