use super::report;
use crate::store;
use arman_common::content::{Biography, BiographyVariant};
use arman_common::Result;
use sqlx::SqlitePool;
use tracing::info;

pub struct BiographyService {
    db: SqlitePool,
}

impl BiographyService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    /// Biography for `variant`, which must be `full` or `short`
    pub async fn get(&self, variant: &str) -> Result<Biography> {
        let variant: BiographyVariant = variant
            .parse()
            .inspect_err(|e| report("biography.get", "variant", e))?;

        let mut conn = self.db.acquire().await?;
        store::biography::get(&mut conn, variant).await
    }

    pub async fn update(&self, variant: &str, content: String) -> Result<Biography> {
        const OP: &str = "biography.update";

        let variant: BiographyVariant = variant
            .parse()
            .inspect_err(|e| report(OP, "variant", e))?;

        let mut conn = self.db.acquire().await?;
        let biography = store::biography::upsert(&mut conn, &Biography { content, variant })
            .await
            .inspect_err(|e| report(OP, "upsert", e))?;

        info!(operation = OP, %variant, "Biography updated");
        Ok(biography)
    }
}
