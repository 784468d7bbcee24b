//! HTTP adapter tests
//!
//! Drive the router with `oneshot` and check status codes, error codes and
//! `temp_id` echoing.

mod helpers;

use arman_cms::{build_router, AppState};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use helpers::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(pool: &sqlx::SqlitePool) -> Router {
    build_router(AppState::new(pool.clone()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (_dir, pool) = test_pool().await;

    let (status, body) = send(app(&pool), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "arman-cms");
}

#[tokio::test]
async fn test_create_piece_echoes_temp_id() {
    let (_dir, pool) = test_pool().await;

    let (status, body) = send(
        app(&pool),
        Method::POST,
        "/pieces",
        Some(json!({
            "piece": {
                "operation": "CREATE",
                "data": {"title": "Pictures at an Exhibition"},
                "temp_id": "client-7"
            },
            "composer": {
                "operation": "CREATE",
                "data": {"full_name": "Modest Mussorgsky", "short_name": "Mussorgsky"}
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["temp_id"], "client-7");
    assert_eq!(body["data"]["title"], "Pictures at an Exhibition");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_unknown_operation_is_bad_request() {
    let (_dir, pool) = test_pool().await;

    let (status, body) = send(
        app(&pool),
        Method::POST,
        "/venues",
        Some(json!({
            "venue": {
                "operation": "DELETE",
                "data": {"name": "Musikverein", "full_address": "Musikvereinsplatz 1", "short_address": "Wien"}
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_OPERATION");
}

#[tokio::test]
async fn test_validation_failure_is_bad_request() {
    let (_dir, pool) = test_pool().await;

    let (status, body) = send(
        app(&pool),
        Method::POST,
        "/composers",
        Some(json!({"full_name": "", "short_name": "Anon"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_RESOURCE");
    assert_eq!(
        body["error"]["message"],
        "invalid resource: composer full name is empty"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (_dir, pool) = test_pool().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/programmes")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app(&pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_resource_is_not_found() {
    let (_dir, pool) = test_pool().await;

    let (status, body) = send(app(&pool), Method::GET, "/events/31", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let (_dir, pool) = test_pool().await;
    let router = app(&pool);

    let (status, body) = send(router.clone(), Method::GET, "/events/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"].is_string());

    let (status, body) = send(router, Method::DELETE, "/composers/1.5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_event_echoes_its_own_temp_id() {
    let (_dir, pool) = test_pool().await;
    let router = app(&pool);

    let (status, body) = send(
        router.clone(),
        Method::POST,
        "/events",
        Some(json!({
            "event": {"title": "Season Opening"},
            "venue": {
                "operation": "CREATE",
                "data": {"name": "Barbican Hall", "full_address": "Silk Street, London EC2Y 8DS", "short_address": "Silk Street"},
                "temp_id": "venue-3"
            },
            "temp_id": "event-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["temp_id"], "event-1");
    assert!(body["data"]["venue_id"].as_i64().is_some());

    // A nested venue's handle is never reported as the event's
    let (status, body) = send(
        router,
        Method::POST,
        "/events",
        Some(json!({
            "event": {"title": "Season Closing"},
            "venue": {
                "operation": "CREATE",
                "data": {"name": "LSO St Luke's", "full_address": "161 Old Street, London EC1V 9NG", "short_address": "Old Street"},
                "temp_id": "venue-4"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("temp_id").is_none());
}

#[tokio::test]
async fn test_protected_composer_is_conflict() {
    let (_dir, pool) = test_pool().await;
    let composer = create_composer(&pool, "Béla Bartók", "Bartók").await;
    create_piece(&pool, composer.id, "Allegro barbaro").await;

    let uri = format!("/composers/{}", composer.id);
    let (status, body) = send(app(&pool), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "COMPOSER_PROTECTED");
}

#[tokio::test]
async fn test_publish_incomplete_event_is_unprocessable() {
    let (_dir, pool) = test_pool().await;
    let router = app(&pool);

    let (status, created) = send(
        router.clone(),
        Method::POST,
        "/events",
        Some(json!({"event": {"title": "Untitled Evening"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "draft");

    let uri = format!("/events/{}/publish", created["data"]["id"]);
    let (status, body) = send(router, Method::PUT, &uri, None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "EVENT_NOT_PUBLISHABLE");
    assert_eq!(
        body["error"]["message"],
        "event not publishable: event date is empty"
    );
}

#[tokio::test]
async fn test_event_listing_filters() {
    let (_dir, pool) = test_pool().await;
    let router = app(&pool);
    let event = publishable_event(&pool).await;

    let (status, body) = send(router.clone(), Method::GET, "/events?status=draft", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], event.id);

    let (status, body) = send(
        router.clone(),
        Method::GET,
        "/events?status=published&timeframe=upcoming",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(
        router.clone(),
        Method::GET,
        "/events/timestamps?status=draft&timeframe=upcoming",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["event"]["id"], event.id);

    let (status, body) = send(
        router.clone(),
        Method::GET,
        "/events/timestamps?status=archived",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(router, Method::GET, "/events?timeframe=someday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_returns_no_content() {
    let (_dir, pool) = test_pool().await;
    let composer = create_composer(&pool, "Arvo Pärt", "Pärt").await;

    let uri = format!("/composers/{}", composer.id);
    let (status, body) = send(app(&pool), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_biography_round_trip() {
    let (_dir, pool) = test_pool().await;
    let router = app(&pool);

    let (status, _) = send(
        router.clone(),
        Method::PUT,
        "/biography/full",
        Some(json!({"content": "Born in Osaka."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(router.clone(), Method::GET, "/biography/full", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Born in Osaka.");
    assert_eq!(body["variant"], "full");

    let (status, body) = send(router, Method::GET, "/biography/long", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_BIOGRAPHY_VARIANT");
}
