//! Shared fixtures for arman-cms integration tests
#![allow(dead_code)]

use arman_cms::service::{
    ComposerService, EventCommand, EventService, PieceCommand, PieceService, ProgrammeService,
    VenueCommand, VenueService,
};
use arman_common::config::DatabaseConfig;
use arman_common::content::{Composer, Event, EventInput, Piece, Programme, Venue};
use arman_common::db::init_database;
use arman_common::Intent;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fresh database in a temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("arman.db"), &DatabaseConfig::default())
        .await
        .unwrap();
    (dir, pool)
}

pub fn concert_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2031, 5, 17, 19, 30, 0).unwrap()
}

pub async fn create_composer(pool: &SqlitePool, full_name: &str, short_name: &str) -> Composer {
    ComposerService::new(pool)
        .create(Composer::new(full_name, short_name))
        .await
        .unwrap()
}

/// Piece attached to an existing composer
pub async fn create_piece(pool: &SqlitePool, composer_id: i64, title: &str) -> Piece {
    let command = PieceCommand {
        piece: Intent::create(Piece::new(title, 0)),
        composer: Intent::select(Composer {
            id: composer_id,
            ..Composer::default()
        }),
    };

    PieceService::new(pool).create(command).await.unwrap()
}

pub async fn create_venue(pool: &SqlitePool) -> Venue {
    let command = VenueCommand {
        venue: Intent::create(Venue::new(
            "Wigmore Hall",
            "36 Wigmore Street, London W1U 2BP",
            "Wigmore Street",
        )),
    };

    VenueService::new(pool).create(command).await.unwrap()
}

/// Programme holding `piece_ids` in order
pub async fn create_programme(pool: &SqlitePool, title: &str, piece_ids: &[i64]) -> Programme {
    let service = ProgrammeService::new(pool);
    let programme = service.create(Programme::new(title)).await.unwrap();

    if !piece_ids.is_empty() {
        service
            .update_pieces(programme.id, piece_ids.to_vec())
            .await
            .unwrap();
    }

    programme
}

pub async fn create_event(pool: &SqlitePool, input: EventInput) -> Event {
    EventService::new(pool)
        .create(EventCommand::from(input))
        .await
        .unwrap()
}

/// Draft event with every field publication needs, on a one-piece programme
pub async fn publishable_event(pool: &SqlitePool) -> Event {
    let composer = create_composer(pool, "Johann Sebastian Bach", "Bach").await;
    let piece = create_piece(pool, composer.id, "Goldberg Variations").await;
    let programme = create_programme(pool, "Bach Recital", &[piece.id]).await;
    let venue = create_venue(pool).await;

    create_event(
        pool,
        EventInput {
            title: "Goldberg Evening".to_string(),
            date: Some(concert_date()),
            ticket_link: Some("https://tickets.example.org/goldberg".to_string()),
            venue_id: Some(venue.id),
            programme_id: Some(programme.id),
        },
    )
    .await
}
