//! Common error types for Arman
//!
//! Business-rule failures (protected, immutable, invalid resource, ...) are
//! expected outcomes and are returned to the caller as-is. Infrastructure
//! failures (`Database`, `Io`) are opaque and never swallowed.

use crate::content::ValidationError;
use crate::intent::Operation;
use thiserror::Error;

/// Common result type for Arman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, service and HTTP layers
#[derive(Error, Debug)]
pub enum Error {
    /// A validation rule rejected the payload
    #[error("invalid resource: {0}")]
    InvalidResource(#[source] ValidationError),

    /// An intent carried an unrecognized operation tag
    #[error("invalid operation")]
    InvalidOperation,

    /// An intent's operation does not match the calling context
    #[error("operation mismatch: expected {expected}, found {found}")]
    OperationMismatch {
        expected: Operation,
        found: Operation,
    },

    /// Biography variant other than `full` or `short`
    #[error("invalid biography variant: {0}")]
    InvalidBiographyVariant(String),

    /// A lookup by id found no row
    #[error("resource not found")]
    ResourceNotFound,

    /// A store operation touched an unexpected number of rows, or storage
    /// holds a value the domain cannot represent
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("composer protected; deletion forbidden")]
    ComposerProtected,

    #[error("piece protected; deletion forbidden")]
    PieceProtected,

    #[error("venue protected; deletion forbidden")]
    VenueProtected,

    #[error("programme protected; deletion forbidden")]
    ProgrammeProtected,

    #[error("event protected; deletion forbidden")]
    EventProtected,

    /// Programme is referenced by at least one published event
    #[error("programme is immutable")]
    ProgrammeImmutable,

    /// Event is not a draft
    #[error("event is immutable")]
    EventImmutable,

    /// Event is missing a field required for publication
    #[error("event not publishable: {0}")]
    EventNotPublishable(#[source] ValidationError),

    #[error("programme has no pieces")]
    ProgrammeHasNoPieces,

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for expected business-rule outcomes, false for infrastructure
    /// failures and integrity bugs.
    pub fn is_business_rule(&self) -> bool {
        !matches!(
            self,
            Error::InvariantViolation(_) | Error::Database(_) | Error::Io(_) | Error::Config(_)
        )
    }
}
