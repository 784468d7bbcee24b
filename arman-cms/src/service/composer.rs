use super::guard::ensure_unreferenced;
use super::report;
use crate::db::UnitOfWork;
use crate::store::dependents::Dependency;
use crate::store::{self, lock_for_update, Table};
use arman_common::content::{Composer, ComposerWithDetails};
use arman_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

pub struct ComposerService {
    db: SqlitePool,
}

impl ComposerService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    pub async fn get(&self, id: i64) -> Result<ComposerWithDetails> {
        let mut conn = self.db.acquire().await?;
        store::composer::get_with_details(&mut conn, id).await
    }

    pub async fn list(&self) -> Result<Vec<ComposerWithDetails>> {
        let mut conn = self.db.acquire().await?;
        store::composer::list_with_details(&mut conn).await
    }

    pub async fn create(&self, composer: Composer) -> Result<Composer> {
        const OP: &str = "composer.create";

        composer
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        let mut conn = self.db.acquire().await?;
        let created = store::composer::create(&mut conn, &composer)
            .await
            .inspect_err(|e| report(OP, "insert", e))?;

        info!(operation = OP, composer_id = created.id, "Composer created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, mut composer: Composer) -> Result<Composer> {
        const OP: &str = "composer.update";

        composer.id = id;
        composer
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        let mut conn = self.db.acquire().await?;
        let updated = store::composer::update(&mut conn, &composer)
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        info!(operation = OP, composer_id = id, "Composer updated");
        Ok(updated)
    }

    /// Delete a composer that has no pieces
    pub async fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "composer.delete";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Composers, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        ensure_unreferenced(uow.conn(), Dependency::ComposerPieces, id, Error::ComposerProtected)
            .await
            .inspect_err(|e| report(OP, "guard", e))?;

        store::composer::delete(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "delete", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, composer_id = id, "Composer deleted");
        Ok(())
    }
}
