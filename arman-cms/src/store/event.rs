//! Event persistence
//!
//! Dates and timestamps are stored as RFC 3339 text and compared through
//! `julianday`, so the listing filters are independent of the offset a date
//! was written with.

use super::check_affected;
use arman_common::content::{Event, EventStatus, EventWithTimestamps, Timeframe};
use arman_common::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const EVENT_COLUMNS: &str =
    "event_id, title, date, ticket_link, venue_id, programme_id, status, notes";

fn event_from_row(row: &SqliteRow) -> Result<Event> {
    let status: String = row.get("status");

    Ok(Event {
        id: row.get("event_id"),
        title: row.get("title"),
        date: row.try_get("date")?,
        ticket_link: row.get("ticket_link"),
        venue_id: row.get("venue_id"),
        programme_id: row.get("programme_id"),
        status: status.parse()?,
        notes: row.get("notes"),
    })
}

pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Event> {
    let sql = format!("SELECT {} FROM events WHERE event_id = ?", EVENT_COLUMNS);

    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    event_from_row(&row)
}

/// Optional status and timeframe filters shared by the listings. Binds, in
/// order: status twice, then timeframe, timeframe, now, timeframe, now.
const FILTER_CLAUSE: &str = r#"
        WHERE (? IS NULL OR status = ?)
          AND (? IS NULL
               OR (? = 'past' AND julianday(date) < julianday(?))
               OR (? = 'upcoming' AND julianday(date) >= julianday(?)))
"#;

fn timeframe_tag(timeframe: Option<Timeframe>) -> Option<&'static str> {
    timeframe.map(|t| match t {
        Timeframe::Past => "past",
        Timeframe::Upcoming => "upcoming",
    })
}

/// Events matching the optional filters, most recent date first.
///
/// `Past` means dated before `now`, `Upcoming` dated at or after it. Undated
/// events match no timeframe.
pub async fn list(
    conn: &mut SqliteConnection,
    status: Option<EventStatus>,
    timeframe: Option<Timeframe>,
    now: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let sql = format!(
        "SELECT {} FROM events {} ORDER BY julianday(date) DESC, event_id",
        EVENT_COLUMNS, FILTER_CLAUSE
    );

    let status = status.map(|s| s.as_str());
    let timeframe = timeframe_tag(timeframe);

    let rows = sqlx::query(&sql)
        .bind(status)
        .bind(status)
        .bind(timeframe)
        .bind(timeframe)
        .bind(now)
        .bind(timeframe)
        .bind(now)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter().map(event_from_row).collect()
}

/// Same filters as [`list`], with audit timestamps, in id order
pub async fn list_with_timestamps(
    conn: &mut SqliteConnection,
    status: Option<EventStatus>,
    timeframe: Option<Timeframe>,
    now: DateTime<Utc>,
) -> Result<Vec<EventWithTimestamps>> {
    let sql = format!(
        "SELECT {}, created_at, updated_at FROM events {} ORDER BY event_id",
        EVENT_COLUMNS, FILTER_CLAUSE
    );

    let status = status.map(|s| s.as_str());
    let timeframe = timeframe_tag(timeframe);

    let rows = sqlx::query(&sql)
        .bind(status)
        .bind(status)
        .bind(timeframe)
        .bind(timeframe)
        .bind(now)
        .bind(timeframe)
        .bind(now)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| {
            Ok(EventWithTimestamps {
                event: event_from_row(row)?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}

/// Insert an event with the status it carries, ignoring `event.id`
pub async fn create(conn: &mut SqliteConnection, event: &Event) -> Result<Event> {
    let now = Utc::now();
    let sql = format!(
        r#"
        INSERT INTO events
            (title, date, ticket_link, venue_id, programme_id, status, notes, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        EVENT_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(&event.title)
        .bind(event.date)
        .bind(&event.ticket_link)
        .bind(event.venue_id)
        .bind(event.programme_id)
        .bind(event.status.as_str())
        .bind(&event.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    event_from_row(&row)
}

/// Write the metadata fields of `event`. Status and notes are not touched.
pub async fn update(conn: &mut SqliteConnection, event: &Event) -> Result<Event> {
    let sql = format!(
        r#"
        UPDATE events
        SET title = ?, date = ?, ticket_link = ?, venue_id = ?, programme_id = ?,
            updated_at = ?
        WHERE event_id = ?
        RETURNING {}
        "#,
        EVENT_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(&event.title)
        .bind(event.date)
        .bind(&event.ticket_link)
        .bind(event.venue_id)
        .bind(event.programme_id)
        .bind(Utc::now())
        .bind(event.id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    event_from_row(&row)
}

pub async fn update_notes(
    conn: &mut SqliteConnection,
    id: i64,
    notes: Option<&str>,
) -> Result<Event> {
    let sql = format!(
        "UPDATE events SET notes = ?, updated_at = ? WHERE event_id = ? RETURNING {}",
        EVENT_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    event_from_row(&row)
}

pub async fn set_status(
    conn: &mut SqliteConnection,
    id: i64,
    status: EventStatus,
) -> Result<Event> {
    let sql = format!(
        "UPDATE events SET status = ?, updated_at = ? WHERE event_id = ? RETURNING {}",
        EVENT_COLUMNS
    );

    let row = sqlx::query(&sql)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(Error::ResourceNotFound)?;

    event_from_row(&row)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM events WHERE event_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    check_affected(result)
}
