//! Protection guard tests
//!
//! - Composers with pieces, pieces in programmes, and venues or programmes
//!   used by published events cannot be deleted
//! - Drafts and archived events do not protect anything
//! - A rejected deletion leaves the target row intact

mod helpers;

use arman_cms::service::{
    ComposerService, EventService, PieceService, ProgrammeService, VenueService,
};
use arman_common::content::EventInput;
use arman_common::Error;
use helpers::*;

#[tokio::test]
async fn test_composer_with_pieces_is_protected() {
    let (_dir, pool) = test_pool().await;
    let composer = create_composer(&pool, "Claude Debussy", "Debussy").await;
    let piece = create_piece(&pool, composer.id, "Clair de lune").await;

    let service = ComposerService::new(&pool);
    assert!(matches!(
        service.delete(composer.id).await,
        Err(Error::ComposerProtected)
    ));

    let stored = service.get(composer.id).await.unwrap();
    assert_eq!(stored.composer, composer);
    assert_eq!(stored.piece_count, 1);

    PieceService::new(&pool).delete(piece.id).await.unwrap();
    service.delete(composer.id).await.unwrap();
    assert!(matches!(
        service.get(composer.id).await,
        Err(Error::ResourceNotFound)
    ));
}

#[tokio::test]
async fn test_piece_in_programme_is_protected() {
    let (_dir, pool) = test_pool().await;
    let composer = create_composer(&pool, "Claude Debussy", "Debussy").await;
    let piece = create_piece(&pool, composer.id, "Reverie").await;
    let programme = create_programme(&pool, "Impressions", &[piece.id]).await;

    let service = PieceService::new(&pool);
    assert!(matches!(service.delete(piece.id).await, Err(Error::PieceProtected)));
    assert_eq!(service.get(piece.id).await.unwrap().programme_count, 1);

    ProgrammeService::new(&pool)
        .update_pieces(programme.id, vec![])
        .await
        .unwrap();
    service.delete(piece.id).await.unwrap();
}

#[tokio::test]
async fn test_venue_protected_only_by_published_events() {
    let (_dir, pool) = test_pool().await;
    let event = publishable_event(&pool).await;
    let venue_id = event.venue_id.unwrap();
    let events = EventService::new(&pool);
    let venues = VenueService::new(&pool);

    // A draft does not protect its venue
    assert_eq!(venues.get(venue_id).await.unwrap().event_count, 0);

    events.publish(event.id).await.unwrap();
    assert_eq!(venues.get(venue_id).await.unwrap().event_count, 1);
    assert!(matches!(venues.delete(venue_id).await, Err(Error::VenueProtected)));

    events.archive(event.id).await.unwrap();
    venues.delete(venue_id).await.unwrap();

    // The archived event loses its venue reference
    let stored = events.get(event.id).await.unwrap();
    assert_eq!(stored.event.venue_id, None);
}

#[tokio::test]
async fn test_programme_protected_by_published_event() {
    let (_dir, pool) = test_pool().await;
    let event = publishable_event(&pool).await;
    let programme_id = event.programme_id.unwrap();
    let events = EventService::new(&pool);
    let programmes = ProgrammeService::new(&pool);

    events.publish(event.id).await.unwrap();
    assert!(matches!(
        programmes.delete(programme_id).await,
        Err(Error::ProgrammeProtected)
    ));
    assert_eq!(programmes.get(programme_id).await.unwrap().pieces.len(), 1);

    events.draft(event.id).await.unwrap();
    programmes.delete(programme_id).await.unwrap();

    let stored = events.get(event.id).await.unwrap();
    assert_eq!(stored.event.programme_id, None);
    assert!(stored.programme.is_none());
}

#[tokio::test]
async fn test_deleting_missing_rows_is_not_found() {
    let (_dir, pool) = test_pool().await;

    assert!(matches!(
        ComposerService::new(&pool).delete(1).await,
        Err(Error::ResourceNotFound)
    ));
    assert!(matches!(
        PieceService::new(&pool).delete(1).await,
        Err(Error::ResourceNotFound)
    ));
    assert!(matches!(
        VenueService::new(&pool).delete(1).await,
        Err(Error::ResourceNotFound)
    ));
    assert!(matches!(
        ProgrammeService::new(&pool).delete(1).await,
        Err(Error::ResourceNotFound)
    ));
    assert!(matches!(
        EventService::new(&pool).delete(1).await,
        Err(Error::ResourceNotFound)
    ));
}

#[tokio::test]
async fn test_concurrent_deletes_of_one_composer() {
    let (_dir, pool) = test_pool().await;
    let composer = create_composer(&pool, "Erik Satie", "Satie").await;

    let first = ComposerService::new(&pool);
    let second = ComposerService::new(&pool);
    let (a, b) = tokio::join!(first.delete(composer.id), second.delete(composer.id));

    // Exactly one deletion wins; the other finds nothing to delete
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(Error::ResourceNotFound))));
}

#[tokio::test]
async fn test_draft_event_at_venue_does_not_block_deletion() {
    let (_dir, pool) = test_pool().await;
    let venue = create_venue(&pool).await;
    let event = create_event(
        &pool,
        EventInput {
            title: "Open Rehearsal".to_string(),
            venue_id: Some(venue.id),
            ..Default::default()
        },
    )
    .await;

    VenueService::new(&pool).delete(venue.id).await.unwrap();

    let stored = EventService::new(&pool).get(event.id).await.unwrap();
    assert_eq!(stored.event.venue_id, None);
}
