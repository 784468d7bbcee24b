//! Venue persistence

use super::check_affected;
use arman_common::content::{Venue, VenueWithDetails};
use arman_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

fn venue_from_row(row: &SqliteRow) -> Venue {
    Venue {
        id: row.get("venue_id"),
        name: row.get("name"),
        full_address: row.get("full_address"),
        short_address: row.get("short_address"),
    }
}

fn details_from_row(row: &SqliteRow) -> VenueWithDetails {
    VenueWithDetails {
        venue: venue_from_row(row),
        event_count: row.get("event_count"),
    }
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Venue> {
    let row = sqlx::query(
        "SELECT venue_id, name, full_address, short_address FROM venues WHERE venue_id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(venue_from_row(&row))
}

/// Venue with the number of published events held there
pub async fn get_with_details(conn: &mut SqliteConnection, id: i64) -> Result<VenueWithDetails> {
    let row = sqlx::query(
        r#"
        SELECT v.venue_id, v.name, v.full_address, v.short_address,
               (SELECT COUNT(*) FROM events e
                WHERE e.venue_id = v.venue_id AND e.status = 'published') AS event_count
        FROM venues v
        WHERE v.venue_id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(details_from_row(&row))
}

pub async fn list_with_details(conn: &mut SqliteConnection) -> Result<Vec<VenueWithDetails>> {
    let rows = sqlx::query(
        r#"
        SELECT v.venue_id, v.name, v.full_address, v.short_address,
               (SELECT COUNT(*) FROM events e
                WHERE e.venue_id = v.venue_id AND e.status = 'published') AS event_count
        FROM venues v
        ORDER BY v.venue_id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(details_from_row).collect())
}

pub async fn create(conn: &mut SqliteConnection, venue: &Venue) -> Result<Venue> {
    let row = sqlx::query(
        r#"
        INSERT INTO venues (name, full_address, short_address)
        VALUES (?, ?, ?)
        RETURNING venue_id, name, full_address, short_address
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.full_address)
    .bind(&venue.short_address)
    .fetch_one(&mut *conn)
    .await?;

    Ok(venue_from_row(&row))
}

pub async fn update(conn: &mut SqliteConnection, venue: &Venue) -> Result<Venue> {
    let row = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, full_address = ?, short_address = ?
        WHERE venue_id = ?
        RETURNING venue_id, name, full_address, short_address
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.full_address)
    .bind(&venue.short_address)
    .bind(venue.id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(Error::ResourceNotFound)?;

    Ok(venue_from_row(&row))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM venues WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    check_affected(result)
}
