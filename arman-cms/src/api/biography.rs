use crate::error::ApiResult;
use crate::service::BiographyService;
use crate::AppState;
use arman_common::content::Biography;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BiographyContent {
    pub content: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/biography/:variant", get(show).put(update))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Biography>> {
    let Path(variant) = path?;
    Ok(Json(BiographyService::new(&state.db).get(&variant).await?))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<BiographyContent>, JsonRejection>,
) -> ApiResult<Json<Biography>> {
    let Path(variant) = path?;
    let Json(body) = payload?;
    Ok(Json(
        BiographyService::new(&state.db)
            .update(&variant, body.content)
            .await?,
    ))
}
