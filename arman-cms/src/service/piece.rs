use super::guard::ensure_unreferenced;
use super::report;
use super::resolver::resolve;
use crate::db::UnitOfWork;
use crate::store::dependents::Dependency;
use crate::store::{self, lock_for_update, Table};
use arman_common::content::{Composer, Piece, PieceWithDetails};
use arman_common::{Error, Intent, Operation, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

/// A piece together with the composer it should be attached to.
///
/// The composer is resolved first, whatever its operation, and its id
/// replaces `piece.data.composer_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct PieceCommand {
    pub piece: Intent<Piece>,
    pub composer: Intent<Composer>,
}

pub struct PieceService {
    db: SqlitePool,
}

impl PieceService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn get(&self, id: i64) -> Result<PieceWithDetails> {
        let mut conn = self.db.acquire().await?;
        store::piece::get_with_details(&mut conn, id).await
    }

    pub async fn list(&self) -> Result<Vec<PieceWithDetails>> {
        let mut conn = self.db.acquire().await?;
        store::piece::list_with_details(&mut conn).await
    }

    /// Create a piece and, in the same unit of work, resolve its composer
    pub async fn create(&self, command: PieceCommand) -> Result<Piece> {
        const OP: &str = "piece.create";

        command
            .piece
            .ensure_operation(Operation::Create)
            .inspect_err(|e| report(OP, "operation", e))?;

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        let composer = resolve(uow.conn(), command.composer)
            .await
            .inspect_err(|e| report(OP, "resolve_composer", e))?;

        let mut intent = command.piece;
        intent.data.composer_id = composer.id;

        let piece = resolve(uow.conn(), intent)
            .await
            .inspect_err(|e| report(OP, "insert", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(
            operation = OP,
            piece_id = piece.id,
            composer_id = composer.id,
            "Piece created"
        );
        Ok(piece)
    }

    pub async fn update(&self, id: i64, command: PieceCommand) -> Result<Piece> {
        const OP: &str = "piece.update";

        command
            .piece
            .ensure_operation(Operation::Update)
            .inspect_err(|e| report(OP, "operation", e))?;

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Pieces, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        let composer = resolve(uow.conn(), command.composer)
            .await
            .inspect_err(|e| report(OP, "resolve_composer", e))?;

        let mut intent = command.piece;
        intent.data.id = id;
        intent.data.composer_id = composer.id;

        let piece = resolve(uow.conn(), intent)
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, piece_id = id, composer_id = composer.id, "Piece updated");
        Ok(piece)
    }

    /// Delete a piece that appears in no programme
    pub async fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "piece.delete";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Pieces, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(uow.conn(), Dependency::PieceProgrammes, id, Error::PieceProtected)
            .await
            .inspect_err(|e| report(OP, "guard", e))?;

        store::piece::delete(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "delete", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, piece_id = id, "Piece deleted");
        Ok(())
    }
}
