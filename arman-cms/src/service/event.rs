//! Event lifecycle
//!
//! Status changes happen only through `draft`, `publish` and `archive`.
//! Metadata edits are limited to drafts; notes can be edited in any state.

use super::programme::load_with_pieces;
use super::report;
use super::resolver::resolve;
use crate::db::UnitOfWork;
use crate::store::dependents::Dependency;
use crate::store::{self, lock_for_update, Table};
use arman_common::content::{
    Event, EventInput, EventStatus, EventWithProgramme, EventWithTimestamps, Timeframe, Venue,
};
use arman_common::{Error, Intent, Result};
use chrono::Utc;
use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

/// Event metadata plus an optional venue to resolve in the same unit of work.
///
/// When `venue` is present its resolved id replaces `event.venue_id`.
/// `temp_id` is the client's handle for the event itself and is echoed back on
/// create; a nested venue's own `temp_id` is not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventCommand {
    pub event: EventInput,
    #[serde(default)]
    pub venue: Option<Intent<Venue>>,
    #[serde(default)]
    pub temp_id: Option<String>,
}

impl From<EventInput> for EventCommand {
    fn from(event: EventInput) -> Self {
        Self {
            event,
            ..Default::default()
        }
    }
}

pub struct EventService {
    db: SqlitePool,
}

/// Resolve the venue intent, if any, into the input's venue id
async fn resolve_venue(conn: &mut SqliteConnection, command: EventCommand) -> Result<EventInput> {
    let mut input = command.event;

    if let Some(intent) = command.venue {
        let venue = resolve(conn, intent).await?;
        input.venue_id = Some(venue.id);
    }

    Ok(input)
}

/// Referenced venue and programme must exist
async fn check_references(conn: &mut SqliteConnection, event: &Event) -> Result<()> {
    if let Some(venue_id) = event.venue_id {
        if !store::exists(conn, Table::Venues, venue_id).await? {
            return Err(Error::ResourceNotFound);
        }
    }

    if let Some(programme_id) = event.programme_id {
        if !store::exists(conn, Table::Programmes, programme_id).await? {
            return Err(Error::ResourceNotFound);
        }
    }

    Ok(())
}

async fn with_programme(conn: &mut SqliteConnection, event: Event) -> Result<EventWithProgramme> {
    let programme = match event.programme_id {
        Some(programme_id) => Some(load_with_pieces(conn, programme_id).await?),
        None => None,
    };

    Ok(EventWithProgramme { event, programme })
}

impl EventService {
    pub fn new(db: &SqlitePool) -> Self {
        Self { db: db.clone() }
    }

    /// Event with its programme and the programme's pieces in order
    pub async fn get(&self, id: i64) -> Result<EventWithProgramme> {
        let mut conn = self.db.acquire().await?;
        let event = store::event::get(&mut conn, id).await?;
        with_programme(&mut conn, event).await
    }

    pub async fn list(
        &self,
        status: Option<EventStatus>,
        timeframe: Option<Timeframe>,
    ) -> Result<Vec<Event>> {
        let mut conn = self.db.acquire().await?;
        store::event::list(&mut conn, status, timeframe, Utc::now()).await
    }

    pub async fn list_with_timestamps(
        &self,
        status: Option<EventStatus>,
        timeframe: Option<Timeframe>,
    ) -> Result<Vec<EventWithTimestamps>> {
        let mut conn = self.db.acquire().await?;
        store::event::list_with_timestamps(&mut conn, status, timeframe, Utc::now()).await
    }

    /// Create a draft event
    pub async fn create(&self, command: EventCommand) -> Result<Event> {
        const OP: &str = "event.create";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        let input = resolve_venue(uow.conn(), command)
            .await
            .inspect_err(|e| report(OP, "resolve_venue", e))?;

        let event = Event::draft(input);
        event
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        check_references(uow.conn(), &event)
            .await
            .inspect_err(|e| report(OP, "references", e))?;

        let created = store::event::create(uow.conn(), &event)
            .await
            .inspect_err(|e| report(OP, "insert", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, event_id = created.id, "Event created");
        Ok(created)
    }

    /// Rewrite the metadata of a draft event
    pub async fn update(&self, id: i64, command: EventCommand) -> Result<EventWithProgramme> {
        const OP: &str = "event.update";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Events, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        let mut event = store::event::get(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "fetch", e))?;

        event.mutable().inspect_err(|e| report(OP, "mutable", e))?;

        let input = resolve_venue(uow.conn(), command)
            .await
            .inspect_err(|e| report(OP, "resolve_venue", e))?;

        event.apply(input);
        event
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        check_references(uow.conn(), &event)
            .await
            .inspect_err(|e| report(OP, "references", e))?;

        let updated = store::event::update(uow.conn(), &event)
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        let result = with_programme(uow.conn(), updated)
            .await
            .inspect_err(|e| report(OP, "programme", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, event_id = id, "Event updated");
        Ok(result)
    }

    /// Replace the notes of an event in any state
    pub async fn update_notes(&self, id: i64, notes: Option<String>) -> Result<Event> {
        const OP: &str = "event.update_notes";

        let mut conn = self.db.acquire().await?;
        let event = store::event::update_notes(&mut conn, id, notes.as_deref())
            .await
            .inspect_err(|e| report(OP, "update", e))?;

        info!(operation = OP, event_id = id, "Event notes updated");
        Ok(event)
    }

    /// Return an event to draft, from any state
    pub async fn draft(&self, id: i64) -> Result<Event> {
        self.transition(id, EventStatus::Draft, "event.draft").await
    }

    /// Archive an event, from any state
    pub async fn archive(&self, id: i64) -> Result<Event> {
        self.transition(id, EventStatus::Archived, "event.archive").await
    }

    async fn transition(&self, id: i64, status: EventStatus, op: &'static str) -> Result<Event> {
        let mut conn = self.db.acquire().await?;
        let event = store::event::set_status(&mut conn, id, status)
            .await
            .inspect_err(|e| report(op, "set_status", e))?;

        info!(operation = op, event_id = id, %status, "Event status changed");
        Ok(event)
    }

    /// Publish an event.
    ///
    /// The event must validate; a referenced programme must hold at least one
    /// piece; then date, ticket link, venue and programme must all be set,
    /// checked in that order.
    pub async fn publish(&self, id: i64) -> Result<Event> {
        const OP: &str = "event.publish";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Events, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        let event = store::event::get(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "fetch", e))?;

        event
            .validate()
            .map_err(Error::InvalidResource)
            .inspect_err(|e| report(OP, "validate", e))?;

        if let Some(programme_id) = event.programme_id {
            store::programme::get(uow.conn(), programme_id)
                .await
                .inspect_err(|e| report(OP, "programme", e))?;

            let pieces = Dependency::ProgrammePieces
                .count(uow.conn(), programme_id)
                .await
                .inspect_err(|e| report(OP, "programme", e))?;

            if pieces == 0 {
                let err = Error::ProgrammeHasNoPieces;
                report(OP, "programme", &err);
                return Err(err);
            }
        }

        event
            .publishable()
            .map_err(Error::EventNotPublishable)
            .inspect_err(|e| report(OP, "completeness", e))?;

        let published = store::event::set_status(uow.conn(), id, EventStatus::Published)
            .await
            .inspect_err(|e| report(OP, "set_status", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, event_id = id, "Event published");
        Ok(published)
    }

    /// Delete an event unless it is published
    pub async fn delete(&self, id: i64) -> Result<()> {
        const OP: &str = "event.delete";

        let mut uow = UnitOfWork::begin(&self.db, OP).await?;

        lock_for_update(uow.conn(), Table::Events, id)
            .await
            .inspect_err(|e| report(OP, "lock", e))?;

        let event = store::event::get(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "fetch", e))?;

        event.deletable().inspect_err(|e| report(OP, "guard", e))?;

        store::event::delete(uow.conn(), id)
            .await
            .inspect_err(|e| report(OP, "delete", e))?;

        uow.commit().await.inspect_err(|e| report(OP, "commit", e))?;

        info!(operation = OP, event_id = id, "Event deleted");
        Ok(())
    }
}
