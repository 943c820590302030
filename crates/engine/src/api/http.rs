//! HTTP routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use modmaker_domain::FilterOp;
use modmaker_shared::{AdminData, ErrorCode, ErrorData, FilterData, ViewData, ViewKindData};
use std::sync::Arc;

use crate::admin::{ViewDescriptor, ViewKind};
use crate::app::App;
use crate::infrastructure::resources::ResourceError;
use crate::use_cases::management::ManagementError;
use crate::use_cases::validation::ValidationError;

use super::{civilizations, leaders, resources, tags};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/admin", get(get_admin))
        .route("/api/export", get(export))
        .merge(civilizations::routes())
        .merge(leaders::routes())
        .merge(tags::routes())
        .merge(resources::routes())
}

async fn health() -> &'static str {
    "OK"
}

async fn get_admin(State(app): State<Arc<App>>) -> Json<AdminData> {
    Json(AdminData {
        title: app.admin.title().to_string(),
        views: app.admin.views().iter().map(view_data).collect(),
    })
}

fn view_data(view: &ViewDescriptor) -> ViewData {
    let kind = match &view.kind {
        ViewKind::Model(model) => ViewKindData::Model {
            entity: model.entity.to_string(),
            sortable: model.sortable.iter().map(|c| c.to_string()).collect(),
            searchable: model.searchable.iter().map(|c| c.to_string()).collect(),
            filters: model
                .filters
                .iter()
                .map(|column| FilterData {
                    column: column.to_string(),
                    operations: FilterOp::ALL.iter().map(|op| op.as_str().to_string()).collect(),
                })
                .collect(),
        },
        ViewKind::Export => ViewKindData::Export,
        ViewKind::Files { root } => ViewKindData::Files {
            root: root.display().to_string(),
        },
    };
    ViewData {
        name: view.name.to_string(),
        category: view.category.to_string(),
        endpoint: view.endpoint.to_string(),
        kind,
    }
}

async fn export() -> Result<Json<()>, ApiError> {
    Err(ApiError::NotImplemented(
        "Export format is not defined yet".to_string(),
    ))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Validation(String),
    Conflict(String),
    NotImplemented(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                "Not found".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError, msg)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Conflict, msg),
            ApiError::NotImplemented(msg) => {
                (StatusCode::NOT_IMPLEMENTED, ErrorCode::NotImplemented, msg)
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    "Internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorData { code, message })).into_response()
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::NotFound => ApiError::NotFound,
            ManagementError::InvalidInput(msg) => ApiError::Validation(msg),
            ManagementError::Conflict(msg) => ApiError::Conflict(msg),
            ManagementError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<ResourceError> for ApiError {
    fn from(e: ResourceError) -> Self {
        match e {
            ResourceError::NotFound(_) => ApiError::NotFound,
            ResourceError::InvalidPath(_)
            | ResourceError::NotADirectory(_)
            | ResourceError::NotAFile(_) => ApiError::BadRequest(e.to_string()),
            ResourceError::AlreadyExists(_) | ResourceError::NotEmpty(_) => {
                ApiError::Conflict(e.to_string())
            }
            ResourceError::Io { .. } => ApiError::Internal(e.to_string()),
        }
    }
}
