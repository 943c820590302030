//! Leader routes, including trait and flaw associations.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use modmaker_domain::{CivilizationId, FlawId, LeaderColumn, LeaderId, TraitId};
use modmaker_shared::{CreateLeaderData, LeaderData, NamedRefData, PageData, UpdateLeaderData};
use std::sync::Arc;

use crate::app::App;
use crate::use_cases::management::{LeaderChanges, LeaderView};

use super::http::ApiError;
use super::list_params::{list_query, page_data};

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/leaders", get(list_leaders).post(create_leader))
        .route(
            "/api/leaders/{id}",
            get(get_leader).put(update_leader).delete(delete_leader),
        )
        .route(
            "/api/leaders/{id}/traits/{trait_id}",
            put(add_trait).delete(remove_trait),
        )
        .route(
            "/api/leaders/{id}/flaws/{flaw_id}",
            put(add_flaw).delete(remove_flaw),
        )
}

fn leader_data(view: LeaderView) -> LeaderData {
    let LeaderView {
        leader,
        civilization,
        traits,
        flaws,
    } = view;
    LeaderData {
        id: leader.id.as_i64(),
        name: leader.name.to_string(),
        description: leader.description.map(|d| d.as_str().to_string()),
        civilization: civilization.map(|c| NamedRefData {
            id: c.id.as_i64(),
            name: c.name.to_string(),
        }),
        traits: traits
            .into_iter()
            .map(|t| NamedRefData {
                id: t.id.as_i64(),
                name: t.name.to_string(),
            })
            .collect(),
        flaws: flaws
            .into_iter()
            .map(|f| NamedRefData {
                id: f.id.as_i64(),
                name: f.name.to_string(),
            })
            .collect(),
    }
}

async fn list_leaders(
    State(app): State<Arc<App>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PageData<LeaderData>>, ApiError> {
    let query = list_query::<LeaderColumn>(&app, "leader", &params)?;
    let page = app.use_cases.management.leader.list(&query).await?;
    Ok(Json(page_data(page, leader_data)))
}

async fn get_leader(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<LeaderData>, ApiError> {
    let view = app
        .use_cases
        .management
        .leader
        .get(LeaderId::new(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(leader_data(view)))
}

async fn create_leader(
    State(app): State<Arc<App>>,
    Json(data): Json<CreateLeaderData>,
) -> Result<(StatusCode, Json<LeaderData>), ApiError> {
    let view = app
        .use_cases
        .management
        .leader
        .create(
            data.name,
            data.description,
            data.civilization_id.map(CivilizationId::new),
            data.traits.into_iter().map(TraitId::new).collect(),
            data.flaws.into_iter().map(FlawId::new).collect(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(leader_data(view))))
}

async fn update_leader(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    Json(data): Json<UpdateLeaderData>,
) -> Result<Json<LeaderData>, ApiError> {
    let changes = LeaderChanges {
        name: data.name,
        description: data.description.map(Option::unwrap_or_default),
        civilization_id: data
            .civilization_id
            .map(|civilization| civilization.map(CivilizationId::new)),
        traits: data
            .traits
            .map(|ids| ids.into_iter().map(TraitId::new).collect()),
        flaws: data
            .flaws
            .map(|ids| ids.into_iter().map(FlawId::new).collect()),
    };
    let view = app
        .use_cases
        .management
        .leader
        .update(LeaderId::new(id), changes)
        .await?;
    Ok(Json(leader_data(view)))
}

async fn delete_leader(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .leader
        .delete(LeaderId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Respond with the leader as it stands after an association change.
async fn current_leader(app: &App, id: LeaderId) -> Result<Json<LeaderData>, ApiError> {
    let view = app
        .use_cases
        .management
        .leader
        .get(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(leader_data(view)))
}

async fn add_trait(
    State(app): State<Arc<App>>,
    Path((id, trait_id)): Path<(i64, i64)>,
) -> Result<Json<LeaderData>, ApiError> {
    let id = LeaderId::new(id);
    app.use_cases
        .management
        .leader
        .add_trait(id, TraitId::new(trait_id))
        .await?;
    current_leader(&app, id).await
}

async fn remove_trait(
    State(app): State<Arc<App>>,
    Path((id, trait_id)): Path<(i64, i64)>,
) -> Result<Json<LeaderData>, ApiError> {
    let id = LeaderId::new(id);
    app.use_cases
        .management
        .leader
        .remove_trait(id, TraitId::new(trait_id))
        .await?;
    current_leader(&app, id).await
}

async fn add_flaw(
    State(app): State<Arc<App>>,
    Path((id, flaw_id)): Path<(i64, i64)>,
) -> Result<Json<LeaderData>, ApiError> {
    let id = LeaderId::new(id);
    app.use_cases
        .management
        .leader
        .add_flaw(id, FlawId::new(flaw_id))
        .await?;
    current_leader(&app, id).await
}

async fn remove_flaw(
    State(app): State<Arc<App>>,
    Path((id, flaw_id)): Path<(i64, i64)>,
) -> Result<Json<LeaderData>, ApiError> {
    let id = LeaderId::new(id);
    app.use_cases
        .management
        .leader
        .remove_flaw(id, FlawId::new(flaw_id))
        .await?;
    current_leader(&app, id).await
}
