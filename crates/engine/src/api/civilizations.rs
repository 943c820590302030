//! Civilization routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use modmaker_domain::{Civilization, CivilizationColumn, CivilizationId};
use modmaker_shared::{
    CivilizationData, CreateCivilizationData, NamedRefData, PageData, UpdateCivilizationData,
};
use std::sync::Arc;

use crate::app::App;

use super::http::ApiError;
use super::list_params::{list_query, page_data};

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(
            "/api/civilizations",
            get(list_civilizations).post(create_civilization),
        )
        .route(
            "/api/civilizations/{id}",
            get(get_civilization)
                .put(update_civilization)
                .delete(delete_civilization),
        )
        .route("/api/civilizations/{id}/leaders", get(list_members))
}

fn civilization_data(civilization: Civilization) -> CivilizationData {
    CivilizationData {
        id: civilization.id.as_i64(),
        name: civilization.name.to_string(),
        description: civilization.description.map(|d| d.as_str().to_string()),
    }
}

async fn list_civilizations(
    State(app): State<Arc<App>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PageData<CivilizationData>>, ApiError> {
    let query = list_query::<CivilizationColumn>(&app, "civilization", &params)?;
    let page = app
        .use_cases
        .management
        .civilization
        .list(&query)
        .await?;
    Ok(Json(page_data(page, civilization_data)))
}

async fn get_civilization(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<CivilizationData>, ApiError> {
    let civilization = app
        .use_cases
        .management
        .civilization
        .get(CivilizationId::new(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(civilization_data(civilization)))
}

async fn create_civilization(
    State(app): State<Arc<App>>,
    Json(data): Json<CreateCivilizationData>,
) -> Result<(StatusCode, Json<CivilizationData>), ApiError> {
    let civilization = app
        .use_cases
        .management
        .civilization
        .create(data.name, data.description)
        .await?;
    Ok((StatusCode::CREATED, Json(civilization_data(civilization))))
}

async fn update_civilization(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateCivilizationData>,
) -> Result<Json<CivilizationData>, ApiError> {
    let civilization = app
        .use_cases
        .management
        .civilization
        .update(
            CivilizationId::new(id),
            data.name,
            data.description.map(Option::unwrap_or_default),
        )
        .await?;
    Ok(Json(civilization_data(civilization)))
}

async fn delete_civilization(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .civilization
        .delete(CivilizationId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_members(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<NamedRefData>>, ApiError> {
    let leaders = app
        .use_cases
        .management
        .civilization
        .leaders(CivilizationId::new(id))
        .await?;
    Ok(Json(
        leaders
            .into_iter()
            .map(|leader| NamedRefData {
                id: leader.id.as_i64(),
                name: leader.name.to_string(),
            })
            .collect(),
    ))
}
