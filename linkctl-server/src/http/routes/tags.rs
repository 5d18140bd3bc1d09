//! Tag endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::Tag;

/// Create tag request
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    #[serde(default)]
    pub name: String,
}

/// Rename tag request
#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// `?id=` for deletes
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// GET /tags - all tags sorted by name
async fn list_tags(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Tag>>, ApiError> {
    Ok(Json(state.tags.list().await?))
}

/// POST /tags - create a tag
async fn create_tag(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let tag = state.tags.create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /tags - rename a tag
async fn update_tag(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateTagRequest>,
) -> Result<&'static str, ApiError> {
    state.tags.rename(&req.id, &req.name).await?;
    Ok("Tag updated")
}

/// DELETE /tags?id= - delete a tag and its associations
async fn delete_tag(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<IdParams>,
) -> Result<&'static str, ApiError> {
    state.tags.delete(params.id.as_deref().unwrap_or_default()).await?;
    Ok("Tag deleted")
}

/// Tag routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/tags",
        get(list_tags)
            .post(create_tag)
            .put(update_tag)
            .delete(delete_tag),
    )
}
