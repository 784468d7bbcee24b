//! Services
//!
//! One service per entity, each the single entry point for its use cases.
//! A service opens a [`UnitOfWork`](crate::db::UnitOfWork) whenever more than
//! one statement takes part in a decision and commits only when every step
//! succeeded.

pub mod biography;
pub mod composer;
pub mod event;
pub mod guard;
pub mod piece;
pub mod programme;
pub mod resolver;
pub mod venue;

pub use biography::BiographyService;
pub use composer::ComposerService;
pub use event::{EventCommand, EventService};
pub use piece::{PieceCommand, PieceService};
pub use programme::ProgrammeService;
pub use venue::{VenueCommand, VenueService};

use arman_common::Error;
use tracing::{error, warn};

/// Log a failed step of `operation`.
///
/// Business-rule rejections are expected and logged at warn level with their
/// reason; anything else is an infrastructure failure.
pub(crate) fn report(operation: &'static str, step: &'static str, err: &Error) {
    if err.is_business_rule() {
        warn!(operation, step, reason = %err, "Request rejected");
    } else {
        error!(operation, step, error = %err, "Request failed");
    }
}
