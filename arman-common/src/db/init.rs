//! Database initialization
//!
//! Opens (creating if needed) the SQLite database and creates the schema.
//! Every statement is idempotent, so startup against an existing database is
//! safe.
//!
//! Referential actions mirror the protection rules enforced by the services:
//! - pieces → composers and programme_pieces → pieces are `RESTRICT`; the
//!   guard counts every dependent row, so a violation here means a guard was
//!   bypassed.
//! - events → venues / programmes are `SET NULL`; only published events
//!   protect a venue or programme, so drafts and archived events lose the
//!   reference when it is deleted.
//! - programme_pieces → programmes is `CASCADE`.

use crate::config::DatabaseConfig;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path, config: &DatabaseConfig) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Pragmas are set per connection through the connect options so that
    // every pooled connection enforces foreign keys.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and seed rows
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_composers_table(pool).await?;
    create_pieces_table(pool).await?;
    create_programmes_table(pool).await?;
    create_programme_pieces_table(pool).await?;
    create_venues_table(pool).await?;
    create_events_table(pool).await?;
    create_biographies_table(pool).await?;

    Ok(())
}

pub async fn create_composers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS composers (
            composer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            short_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_pieces_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pieces (
            piece_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            composer_id INTEGER NOT NULL
                REFERENCES composers(composer_id) ON DELETE RESTRICT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pieces_composer ON pieces(composer_id)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_programmes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programmes (
            programme_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Join table keyed by slot, not by piece: the same piece may occupy several
/// slots of one programme.
pub async fn create_programme_pieces_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS programme_pieces (
            programme_id INTEGER NOT NULL
                REFERENCES programmes(programme_id) ON DELETE CASCADE,
            piece_id INTEGER NOT NULL
                REFERENCES pieces(piece_id) ON DELETE RESTRICT,
            sequence INTEGER NOT NULL CHECK (sequence > 0),
            PRIMARY KEY (programme_id, sequence)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_programme_pieces_piece ON programme_pieces(piece_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_venues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            venue_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            full_address TEXT NOT NULL,
            short_address TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn create_events_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            event_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            date TEXT,
            ticket_link TEXT,
            venue_id INTEGER
                REFERENCES venues(venue_id) ON DELETE SET NULL,
            programme_id INTEGER
                REFERENCES programmes(programme_id) ON DELETE SET NULL,
            status TEXT NOT NULL DEFAULT 'draft'
                CHECK (status IN ('draft', 'published', 'archived')),
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_venue ON events(venue_id, status)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_events_programme ON events(programme_id, status)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// One row per variant, seeded empty
pub async fn create_biographies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS biographies (
            variant TEXT PRIMARY KEY CHECK (variant IN ('full', 'short')),
            content TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO biographies (variant, content) VALUES ('full', ''), ('short', '')")
        .execute(pool)
        .await?;

    Ok(())
}
