//! Resource file manager routes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use modmaker_shared::{RenameResourceData, ResourceEntryData, ResourceListingData};
use serde::Deserialize;
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::resources::{ResourceEntry, ResourceListing};
use crate::use_cases::validation::require_non_empty;

use super::http::ApiError;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(
            "/api/resources",
            get(list_resources).delete(delete_resource),
        )
        .route("/api/resources/file", get(read_file).put(write_file))
        .route("/api/resources/dir", post(create_dir))
        .route("/api/resources/rename", post(rename_resource))
}

/// `?path=` relative to the resource root; absent means the root itself.
#[derive(Debug, Deserialize)]
struct PathQuery {
    #[serde(default)]
    path: String,
}

fn entry_data(entry: ResourceEntry) -> ResourceEntryData {
    ResourceEntryData {
        name: entry.name,
        path: entry.path,
        is_dir: entry.is_dir,
        size: entry.size,
        modified: entry.modified,
    }
}

fn listing_data(listing: ResourceListing) -> ResourceListingData {
    ResourceListingData {
        path: listing.path,
        parent: listing.parent,
        entries: listing.entries.into_iter().map(entry_data).collect(),
    }
}

async fn list_resources(
    State(app): State<Arc<App>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<ResourceListingData>, ApiError> {
    let listing = app.resources.list(&query.path).await?;
    Ok(Json(listing_data(listing)))
}

async fn read_file(
    State(app): State<Arc<App>>,
    Query(query): Query<PathQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let data = app.resources.read(&query.path).await?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], data))
}

async fn write_file(
    State(app): State<Arc<App>>,
    Query(query): Query<PathQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<ResourceEntryData>), ApiError> {
    require_non_empty(&query.path, "path")?;
    let entry = app.resources.write(&query.path, &body).await?;
    Ok((StatusCode::CREATED, Json(entry_data(entry))))
}

async fn create_dir(
    State(app): State<Arc<App>>,
    Query(query): Query<PathQuery>,
) -> Result<(StatusCode, Json<ResourceEntryData>), ApiError> {
    require_non_empty(&query.path, "path")?;
    let entry = app.resources.mkdir(&query.path).await?;
    Ok((StatusCode::CREATED, Json(entry_data(entry))))
}

async fn rename_resource(
    State(app): State<Arc<App>>,
    Json(data): Json<RenameResourceData>,
) -> Result<Json<ResourceEntryData>, ApiError> {
    require_non_empty(&data.from, "from")?;
    require_non_empty(&data.to, "to")?;
    let entry = app.resources.rename(&data.from, &data.to).await?;
    Ok(Json(entry_data(entry)))
}

async fn delete_resource(
    State(app): State<Arc<App>>,
    Query(query): Query<PathQuery>,
) -> Result<StatusCode, ApiError> {
    require_non_empty(&query.path, "path")?;
    app.resources.delete(&query.path).await?;
    Ok(StatusCode::NO_CONTENT)
}
