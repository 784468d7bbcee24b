//! Programme persistence, including the ordered piece list

use super::check_affected;
use super::composer::composer_from_row;
use super::piece::piece_from_row;
use arman_common::content::programme::assign_sequence;
use arman_common::content::{Programme, ProgrammePiece, ProgrammeWithDetails};
use arman_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

fn programme_from_row(row: &SqliteRow) -> Programme {
    Programme {
        id: row.get("programme_id"),
        title: row.get("title"),
    }
}

fn details_from_row(row: &SqliteRow) -> ProgrammeWithDetails {
    ProgrammeWithDetails {
        programme: programme_from_row(row),
        piece_count: row.get("piece_count"),
        event_count: row.get("event_count"),
    }
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Programme> {
    let row = sqlx::query("SELECT programme_id, title FROM programmes WHERE programme_id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    Ok(programme_from_row(&row))
}

/// Programme with its slot count and the number of published events using it
pub async fn get_with_details(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<ProgrammeWithDetails> {
    let row = sqlx::query(
        r#"
        SELECT pr.programme_id, pr.title,
               (SELECT COUNT(*) FROM programme_pieces pp
                WHERE pp.programme_id = pr.programme_id) AS piece_count,
               (SELECT COUNT(*) FROM events e
                WHERE e.programme_id = pr.programme_id AND e.status = 'published') AS event_count
        FROM programmes pr
        WHERE pr.programme_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(details_from_row(&row))
}

pub async fn list_with_details(conn: &mut SqliteConnection) -> Result<Vec<ProgrammeWithDetails>> {
    let rows = sqlx::query(
        r#"
        SELECT pr.programme_id, pr.title,
               (SELECT COUNT(*) FROM programme_pieces pp
                WHERE pp.programme_id = pr.programme_id) AS piece_count,
               (SELECT COUNT(*) FROM events e
                WHERE e.programme_id = pr.programme_id AND e.status = 'published') AS event_count
        FROM programmes pr
        ORDER BY pr.programme_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(details_from_row).collect())
}

pub async fn create(conn: &mut SqliteConnection, programme: &Programme) -> Result<Programme> {
    let row = sqlx::query("INSERT INTO programmes (title) VALUES (?) RETURNING programme_id, title")
        .bind(&programme.title)
        .fetch_one(&mut *conn)
        .await?;

    Ok(programme_from_row(&row))
}

pub async fn update(conn: &mut SqliteConnection, programme: &Programme) -> Result<Programme> {
    let row = sqlx::query(
        r#"
        UPDATE programmes
        SET title = ?
        WHERE programme_id = ?
        RETURNING programme_id, title
        "#,
    )
    .bind(&programme.title)
    .bind(programme.id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(programme_from_row(&row))
}

/// Delete a programme; its slots go with it
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM programmes WHERE programme_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    check_affected(result)
}

/// Slots of a programme joined with piece and composer, in sequence order
pub async fn list_pieces(conn: &mut SqliteConnection, id: i64) -> Result<Vec<ProgrammePiece>> {
    let rows = sqlx::query(
        r#"
        SELECT pp.sequence,
               p.piece_id, p.title, p.composer_id,
               c.full_name, c.short_name
        FROM programme_pieces pp
        JOIN pieces p ON p.piece_id = pp.piece_id
        JOIN composers c ON c.composer_id = p.composer_id
        WHERE pp.programme_id = ?
        ORDER BY pp.sequence
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ProgrammePiece {
            piece: piece_from_row(row),
            composer: composer_from_row(row),
            sequence: row.get("sequence"),
        })
        .collect())
}

/// Replace every slot of a programme with `piece_ids`, numbered from 1 in
/// array order.
pub async fn replace_pieces(
    conn: &mut SqliteConnection,
    id: i64,
    piece_ids: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM programme_pieces WHERE programme_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    for (sequence, piece_id) in assign_sequence(piece_ids) {
        sqlx::query(
            "INSERT INTO programme_pieces (programme_id, piece_id, sequence) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(piece_id)
        .bind(sequence)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
