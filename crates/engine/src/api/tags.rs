//! Trait and flaw routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use modmaker_domain::{Flaw, FlawId, TagColumn, Trait, TraitId};
use modmaker_shared::{NamedRefData, PageData, TagData};
use std::sync::Arc;

use crate::app::App;

use super::http::ApiError;
use super::list_params::{list_query, page_data};

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/traits", get(list_traits).post(create_trait))
        .route(
            "/api/traits/{id}",
            get(get_trait).put(rename_trait).delete(delete_trait),
        )
        .route("/api/flaws", get(list_flaws).post(create_flaw))
        .route(
            "/api/flaws/{id}",
            get(get_flaw).put(rename_flaw).delete(delete_flaw),
        )
}

fn trait_data(item: Trait) -> NamedRefData {
    NamedRefData {
        id: item.id.as_i64(),
        name: item.name.to_string(),
    }
}

fn flaw_data(item: Flaw) -> NamedRefData {
    NamedRefData {
        id: item.id.as_i64(),
        name: item.name.to_string(),
    }
}

// =============================================================================
// Traits
// =============================================================================

async fn list_traits(
    State(app): State<Arc<App>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PageData<NamedRefData>>, ApiError> {
    let query = list_query::<TagColumn>(&app, "trait", &params)?;
    let page = app.use_cases.management.traits.list(&query).await?;
    Ok(Json(page_data(page, trait_data)))
}

async fn get_trait(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRefData>, ApiError> {
    let item = app
        .use_cases
        .management
        .traits
        .get(TraitId::new(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(trait_data(item)))
}

async fn create_trait(
    State(app): State<Arc<App>>,
    Json(data): Json<TagData>,
) -> Result<(StatusCode, Json<NamedRefData>), ApiError> {
    let item = app.use_cases.management.traits.create(data.name).await?;
    Ok((StatusCode::CREATED, Json(trait_data(item))))
}

async fn rename_trait(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    Json(data): Json<TagData>,
) -> Result<Json<NamedRefData>, ApiError> {
    let item = app
        .use_cases
        .management
        .traits
        .rename(TraitId::new(id), data.name)
        .await?;
    Ok(Json(trait_data(item)))
}

async fn delete_trait(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .traits
        .delete(TraitId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Flaws
// =============================================================================

async fn list_flaws(
    State(app): State<Arc<App>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PageData<NamedRefData>>, ApiError> {
    let query = list_query::<TagColumn>(&app, "flaw", &params)?;
    let page = app.use_cases.management.flaws.list(&query).await?;
    Ok(Json(page_data(page, flaw_data)))
}

async fn get_flaw(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<NamedRefData>, ApiError> {
    let item = app
        .use_cases
        .management
        .flaws
        .get(FlawId::new(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(flaw_data(item)))
}

async fn create_flaw(
    State(app): State<Arc<App>>,
    Json(data): Json<TagData>,
) -> Result<(StatusCode, Json<NamedRefData>), ApiError> {
    let item = app.use_cases.management.flaws.create(data.name).await?;
    Ok((StatusCode::CREATED, Json(flaw_data(item))))
}

async fn rename_flaw(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    Json(data): Json<TagData>,
) -> Result<Json<NamedRefData>, ApiError> {
    let item = app
        .use_cases
        .management
        .flaws
        .rename(FlawId::new(id), data.name)
        .await?;
    Ok(Json(flaw_data(item)))
}

async fn delete_flaw(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .flaws
        .delete(FlawId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
