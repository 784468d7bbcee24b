//! Composer persistence

use super::check_affected;
use arman_common::content::{Composer, ComposerWithDetails};
use arman_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

pub(crate) fn composer_from_row(row: &SqliteRow) -> Composer {
    Composer {
        id: row.get("composer_id"),
        full_name: row.get("full_name"),
        short_name: row.get("short_name"),
    }
}

fn details_from_row(row: &SqliteRow) -> ComposerWithDetails {
    ComposerWithDetails {
        composer: composer_from_row(row),
        piece_count: row.get("piece_count"),
    }
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Composer> {
    let row = sqlx::query(
        r#"
        SELECT composer_id, full_name, short_name
        FROM composers
        WHERE composer_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(composer_from_row(&row))
}

pub async fn get_with_details(conn: &mut SqliteConnection, id: i64) -> Result<ComposerWithDetails> {
    let row = sqlx::query(
        r#"
        SELECT c.composer_id, c.full_name, c.short_name,
               (SELECT COUNT(*) FROM pieces p WHERE p.composer_id = c.composer_id) AS piece_count
        FROM composers c
        WHERE c.composer_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(details_from_row(&row))
}

pub async fn list_with_details(conn: &mut SqliteConnection) -> Result<Vec<ComposerWithDetails>> {
    let rows = sqlx::query(
        r#"
        SELECT c.composer_id, c.full_name, c.short_name,
               (SELECT COUNT(*) FROM pieces p WHERE p.composer_id = c.composer_id) AS piece_count
        FROM composers c
        ORDER BY c.composer_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(details_from_row).collect())
}

/// Insert a composer, ignoring `composer.id`
pub async fn create(conn: &mut SqliteConnection, composer: &Composer) -> Result<Composer> {
    let row = sqlx::query(
        r#"
        INSERT INTO composers (full_name, short_name)
        VALUES (?, ?)
        RETURNING composer_id, full_name, short_name
        "#,
    )
    .bind(&composer.full_name)
    .bind(&composer.short_name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(composer_from_row(&row))
}

pub async fn update(conn: &mut SqliteConnection, composer: &Composer) -> Result<Composer> {
    let row = sqlx::query(
        r#"
        UPDATE composers
        SET full_name = ?, short_name = ?
        WHERE composer_id = ?
        RETURNING composer_id, full_name, short_name
        "#,
    )
    .bind(&composer.full_name)
    .bind(&composer.short_name)
    .bind(composer.id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(composer_from_row(&row))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM composers WHERE composer_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    check_affected(result)
}
