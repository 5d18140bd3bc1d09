//! Link endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::Link;
use crate::query::TagQuery;

/// Tag reference inside a link body; only the id is read
#[derive(Debug, Deserialize)]
pub struct TagRef {
    #[serde(default)]
    pub id: String,
}

/// Create-or-update link request
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub tags: Option<Vec<TagRef>>,
}

impl CreateLinkRequest {
    /// Tag ids to associate; entries with an empty id are skipped.
    fn tag_ids(&self) -> Vec<String> {
        self.tags
            .iter()
            .flatten()
            .filter(|t| !t.id.trim().is_empty())
            .map(|t| t.id.clone())
            .collect()
    }
}

/// `GET /links` query string
#[derive(Debug, Deserialize)]
pub struct LinkFilterParams {
    /// Comma-separated tag names; absent or blank means no filter
    pub tags: Option<String>,
}

/// `?id=` for deletes
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

/// GET /links - every link, or those carrying all `?tags=`
async fn list_links(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<LinkFilterParams>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let links = match params.tags.as_deref().map(str::trim) {
        None | Some("") => state.links.list_all().await?,
        Some(raw) => state.links.list_by_tags(&TagQuery::parse(raw)).await?,
    };
    Ok(Json(links))
}

/// POST /links - create or update a link and replace its tags
async fn create_link(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let link = state.links.create_or_update(&req.url, &req.tag_ids()).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /links?id= - delete a link and its associations
async fn delete_link(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<IdParams>,
) -> Result<&'static str, ApiError> {
    state.links.delete(params.id.as_deref().unwrap_or_default()).await?;
    Ok("Link deleted")
}

/// Link routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/links",
        get(list_links).post(create_link).delete(delete_link),
    )
}
