//! Reference counting
//!
//! Each [`Dependency`] names one edge of the reference graph and knows how to
//! count the rows on its dependent side. Only published events count as
//! references to venues and programmes; drafts and archived events do not
//! protect anything.

use arman_common::Result;
use sqlx::SqliteConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Pieces written by a composer
    ComposerPieces,
    /// Programmes containing a piece
    PieceProgrammes,
    /// Published events held at a venue
    VenuePublishedEvents,
    /// Published events performing a programme
    ProgrammePublishedEvents,
    /// Slots of a programme
    ProgrammePieces,
}

impl Dependency {
    fn count_sql(&self) -> &'static str {
        match self {
            Dependency::ComposerPieces => "SELECT COUNT(*) FROM pieces WHERE composer_id = ?",
            Dependency::PieceProgrammes => {
                "SELECT COUNT(DISTINCT programme_id) FROM programme_pieces WHERE piece_id = ?"
            }
            Dependency::VenuePublishedEvents => {
                "SELECT COUNT(*) FROM events WHERE venue_id = ? AND status = 'published'"
            }
            Dependency::ProgrammePublishedEvents => {
                "SELECT COUNT(*) FROM events WHERE programme_id = ? AND status = 'published'"
            }
            Dependency::ProgrammePieces => {
                "SELECT COUNT(*) FROM programme_pieces WHERE programme_id = ?"
            }
        }
    }

    /// Number of dependent rows referencing `id`
    pub async fn count(&self, conn: &mut SqliteConnection, id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(self.count_sql())
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
