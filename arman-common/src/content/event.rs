//! Events and their lifecycle rules
//!
//! An event is `draft` when created and moves between states only through
//! explicit transitions (draft, publish, archive); field writes never change
//! the status. Three independent rules hang off the status:
//!
//! - **mutability**: only drafts accept metadata edits. `notes` is exempt and
//!   can be edited in any state.
//! - **publishability**: an event may be published once date, ticket link,
//!   venue and programme are all present.
//! - **protection**: published events cannot be deleted. Drafts and archived
//!   events can.
//!
//! Publishing also freezes the referenced programme; that rule spans two
//! entities and is enforced by the programme service.

use super::{is_blank, ProgrammeWithPieces, ValidationError};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "archived" => Ok(EventStatus::Archived),
            other => Err(Error::InvariantViolation(format!(
                "unknown event status {:?}",
                other
            ))),
        }
    }
}

/// When an event's date falls relative to now. Used as a listing filter;
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Past,
    Upcoming,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub ticket_link: Option<String>,
    pub venue_id: Option<i64>,
    pub programme_id: Option<i64>,
    pub status: EventStatus,
    pub notes: Option<String>,
}

/// Caller-editable event metadata. Status and notes have their own paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInput {
    pub title: String,
    pub date: Option<DateTime<Utc>>,
    pub ticket_link: Option<String>,
    pub venue_id: Option<i64>,
    pub programme_id: Option<i64>,
}

impl Event {
    /// New draft event from caller input
    pub fn draft(input: EventInput) -> Self {
        let mut event = Event::default();
        event.apply(input);
        event
    }

    /// Overwrite the metadata fields, leaving id, status and notes untouched
    pub fn apply(&mut self, input: EventInput) {
        self.title = input.title;
        self.date = input.date;
        self.ticket_link = input.ticket_link;
        self.venue_id = input.venue_id;
        self.programme_id = input.programme_id;
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if is_blank(&self.title) {
            return Err(ValidationError::EventTitleEmpty);
        }

        Ok(())
    }

    /// Drafts are the only mutable events.
    pub fn mutable(&self) -> Result<()> {
        match self.status {
            EventStatus::Draft => Ok(()),
            EventStatus::Published | EventStatus::Archived => Err(Error::EventImmutable),
        }
    }

    /// Completeness check, reporting the first missing field in the order
    /// date, ticket link, venue, programme.
    pub fn publishable(&self) -> std::result::Result<(), ValidationError> {
        if self.date.is_none() {
            return Err(ValidationError::EventDateEmpty);
        }

        if self.ticket_link.as_deref().map_or(true, is_blank) {
            return Err(ValidationError::EventTicketLinkEmpty);
        }

        if self.venue_id.is_none() {
            return Err(ValidationError::EventVenueEmpty);
        }

        if self.programme_id.is_none() {
            return Err(ValidationError::EventProgrammeEmpty);
        }

        Ok(())
    }

    /// Published events are protected against deletion.
    pub fn deletable(&self) -> Result<()> {
        match self.status {
            EventStatus::Published => Err(Error::EventProtected),
            EventStatus::Draft | EventStatus::Archived => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventWithProgramme {
    pub event: Event,
    pub programme: Option<ProgrammeWithPieces>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventWithTimestamps {
    pub event: Event,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
