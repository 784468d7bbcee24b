//! Piece persistence

use super::check_affected;
use arman_common::content::{Piece, PieceWithDetails};
use arman_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

pub(crate) fn piece_from_row(row: &SqliteRow) -> Piece {
    Piece {
        id: row.get("piece_id"),
        title: row.get("title"),
        composer_id: row.get("composer_id"),
    }
}

fn details_from_row(row: &SqliteRow) -> PieceWithDetails {
    PieceWithDetails {
        piece: piece_from_row(row),
        programme_count: row.get("programme_count"),
    }
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Piece> {
    let row = sqlx::query("SELECT piece_id, title, composer_id FROM pieces WHERE piece_id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    Ok(piece_from_row(&row))
}

/// Piece with the number of distinct programmes it appears in
pub async fn get_with_details(conn: &mut SqliteConnection, id: i64) -> Result<PieceWithDetails> {
    let row = sqlx::query(
        r#"
        SELECT p.piece_id, p.title, p.composer_id,
               (SELECT COUNT(DISTINCT pp.programme_id)
                FROM programme_pieces pp
                WHERE pp.piece_id = p.piece_id) AS programme_count
        FROM pieces p
        WHERE p.piece_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(details_from_row(&row))
}

pub async fn list_with_details(conn: &mut SqliteConnection) -> Result<Vec<PieceWithDetails>> {
    let rows = sqlx::query(
        r#"
        SELECT p.piece_id, p.title, p.composer_id,
               (SELECT COUNT(DISTINCT pp.programme_id)
                FROM programme_pieces pp
                WHERE pp.piece_id = p.piece_id) AS programme_count
        FROM pieces p
        ORDER BY p.piece_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(details_from_row).collect())
}

pub async fn create(conn: &mut SqliteConnection, piece: &Piece) -> Result<Piece> {
    let row = sqlx::query(
        r#"
        INSERT INTO pieces (title, composer_id)
        VALUES (?, ?)
        RETURNING piece_id, title, composer_id
        "#,
    )
    .bind(&piece.title)
    .bind(piece.composer_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(piece_from_row(&row))
}

pub async fn update(conn: &mut SqliteConnection, piece: &Piece) -> Result<Piece> {
    let row = sqlx::query(
        r#"
        UPDATE pieces
        SET title = ?, composer_id = ?
        WHERE piece_id = ?
        RETURNING piece_id, title, composer_id
        "#,
    )
    .bind(&piece.title)
    .bind(piece.composer_id)
    .bind(piece.id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(piece_from_row(&row))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM pieces WHERE piece_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    check_affected(result)
}
