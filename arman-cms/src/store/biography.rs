//! Biography persistence
//!
//! Both variants are seeded at schema creation, so reads always find a row.

use arman_common::content::{Biography, BiographyVariant};
use arman_common::{Error, Result};
use sqlx::{Row, SqliteConnection};

pub async fn get(conn: &mut SqliteConnection, variant: BiographyVariant) -> Result<Biography> {
    let row = sqlx::query("SELECT content FROM biographies WHERE variant = ?")
        .bind(variant.as_str())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    Ok(Biography {
        content: row.get("content"),
        variant,
    })
}

pub async fn upsert(conn: &mut SqliteConnection, biography: &Biography) -> Result<Biography> {
    let row = sqlx::query(
        r#"
        INSERT INTO biographies (variant, content)
        VALUES (?, ?)
        ON CONFLICT(variant) DO UPDATE SET content = excluded.content
        RETURNING content
        "#,
    )
    .bind(biography.variant.as_str())
    .bind(&biography.content)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Biography {
        content: row.get("content"),
        variant: biography.variant,
    })
}
