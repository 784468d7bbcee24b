//! Content types
//!
//! Domain definitions of each resource together with their validation rules.
//! A content type knows nothing about other content types or about storage:
//! whether a referenced row exists is a persistence concern, and rules that
//! span entities live in the service layer.

pub mod biography;
pub mod composer;
pub mod event;
pub mod piece;
pub mod programme;
pub mod venue;

pub use biography::{Biography, BiographyVariant};
pub use composer::{Composer, ComposerWithDetails};
pub use event::{
    Event, EventInput, EventStatus, EventWithProgramme, EventWithTimestamps, Timeframe,
};
pub use piece::{Piece, PieceWithDetails};
pub use programme::{Programme, ProgrammePiece, ProgrammeWithDetails, ProgrammeWithPieces};
pub use venue::{Venue, VenueWithDetails};

use thiserror::Error;

/// A single violated validation rule
///
/// Validation stops at the first violated rule; there is no aggregate report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("composer full name is empty")]
    ComposerFullNameEmpty,
    #[error("composer short name is empty")]
    ComposerShortNameEmpty,

    #[error("piece title is empty")]
    PieceTitleEmpty,

    #[error("programme title is empty")]
    ProgrammeTitleEmpty,

    #[error("venue name is empty")]
    VenueNameEmpty,
    #[error("venue full address is empty")]
    VenueFullAddressEmpty,
    #[error("venue short address is empty")]
    VenueShortAddressEmpty,

    #[error("event title is empty")]
    EventTitleEmpty,
    #[error("event date is empty")]
    EventDateEmpty,
    #[error("event ticket link is empty")]
    EventTicketLinkEmpty,
    #[error("event venue is empty")]
    EventVenueEmpty,
    #[error("event programme is empty")]
    EventProgrammeEmpty,
}

/// Whitespace-only strings count as empty.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
