//! Intent resolution
//!
//! [`resolve`] turns an [`Intent`] for a composable resource into a persisted
//! value: `SELECT` fetches the row named by the payload's id, `CREATE`
//! validates and inserts, `UPDATE` validates and rewrites the row. Unknown
//! operations fail with `InvalidOperation` before any statement runs.
//!
//! The resolver runs on whatever connection it is handed, so a nested intent
//! resolved inside a unit of work commits or rolls back with its parent.

use crate::store::{self, Table};
use arman_common::content::{Composer, Piece, ValidationError, Venue};
use arman_common::{Error, Intent, Operation, Result};
use sqlx::SqliteConnection;
use std::future::Future;
use tracing::debug;

/// A resource that can be the target of an intent
pub trait Resolvable: Sized + Send + Sync {
    /// Name used in logs
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    fn fetch(conn: &mut SqliteConnection, id: i64) -> impl Future<Output = Result<Self>> + Send;

    fn insert(conn: &mut SqliteConnection, value: &Self)
        -> impl Future<Output = Result<Self>> + Send;

    fn update(conn: &mut SqliteConnection, value: &Self)
        -> impl Future<Output = Result<Self>> + Send;
}

/// Resolve `intent` against storage
pub async fn resolve<T: Resolvable>(conn: &mut SqliteConnection, intent: Intent<T>) -> Result<T> {
    debug!(
        kind = T::KIND,
        operation = %intent.operation,
        id = intent.data.id(),
        "Resolving intent"
    );

    match intent.operation {
        Operation::Select => T::fetch(conn, intent.data.id()).await,
        Operation::Create => {
            intent.data.validate().map_err(Error::InvalidResource)?;
            T::insert(conn, &intent.data).await
        }
        Operation::Update => {
            intent.data.validate().map_err(Error::InvalidResource)?;
            T::update(conn, &intent.data).await
        }
        Operation::Unsupported => Err(Error::InvalidOperation),
    }
}

impl Resolvable for Composer {
    const KIND: &'static str = "composer";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Composer::validate(self)
    }

    async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Self> {
        store::composer::get(conn, id).await
    }

    async fn insert(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        store::composer::create(conn, value).await
    }

    async fn update(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        store::composer::update(conn, value).await
    }
}

impl Resolvable for Piece {
    const KIND: &'static str = "piece";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Piece::validate(self)
    }

    async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Self> {
        store::piece::get(conn, id).await
    }

    async fn insert(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        ensure_composer(conn, value.composer_id).await?;
        store::piece::create(conn, value).await
    }

    async fn update(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        ensure_composer(conn, value.composer_id).await?;
        store::piece::update(conn, value).await
    }
}

/// A piece must point at an existing composer
async fn ensure_composer(conn: &mut SqliteConnection, composer_id: i64) -> Result<()> {
    if store::exists(conn, Table::Composers, composer_id).await? {
        Ok(())
    } else {
        Err(Error::ResourceNotFound)
    }
}

impl Resolvable for Venue {
    const KIND: &'static str = "venue";

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        Venue::validate(self)
    }

    async fn fetch(conn: &mut SqliteConnection, id: i64) -> Result<Self> {
        store::venue::get(conn, id).await
    }

    async fn insert(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        store::venue::create(conn, value).await
    }

    async fn update(conn: &mut SqliteConnection, value: &Self) -> Result<Self> {
        store::venue::update(conn, value).await
    }
}
