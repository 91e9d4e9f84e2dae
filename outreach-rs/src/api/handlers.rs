//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::audit::{AuditLog, SentRecord};
use crate::dispatch::{DispatchReport, Dispatcher, SendRequest};
use crate::drafts::{CreateDraftRequest, Draft, DraftStore, UpdateDraftRequest};
use crate::error::OutreachError;
use crate::registry::{Organization, OrganizationEntry, OrganizationRegistry};

/// Shared application state
pub struct AppState {
    pub registry: Arc<OrganizationRegistry>,
    pub drafts: Arc<DraftStore>,
    pub audit: Arc<AuditLog>,
    pub dispatcher: Arc<Dispatcher>,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// Error returned by handlers, rendered as `{"error": ...}`
pub struct HandlerError {
    status: StatusCode,
    message: String,
}

impl HandlerError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<OutreachError> for HandlerError {
    fn from(err: OutreachError) -> Self {
        let status = match &err {
            OutreachError::Validation(_) | OutreachError::InvalidTemplate(_) => {
                StatusCode::BAD_REQUEST
            }
            OutreachError::NotFound(_) => StatusCode::NOT_FOUND,
            OutreachError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            OutreachError::Config(_) | OutreachError::Io(_) | OutreachError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        } else {
            warn!("Request rejected ({}): {}", self.status, self.message);
        }
        (self.status, Json(ApiError::new(&self.message))).into_response()
    }
}

type HandlerResult<T> = Result<T, HandlerError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftCreatedResponse {
    pub draft_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "outreach-rs",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /nonprofits - Register a list of organizations
pub async fn create_nonprofits(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload?;

    let items = match payload {
        serde_json::Value::Array(items) if items.iter().all(serde_json::Value::is_object) => items,
        _ => return Err(HandlerError::bad_request("Expected a list of nonprofits")),
    };

    // Shape is checked for the whole list before anything is inserted
    let entries = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| OrganizationEntry::from_json(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let added = state.registry.upsert(entries).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("{} nonprofit(s) created", added),
        }),
    ))
}

/// GET /nonprofits - List registered organizations
pub async fn list_nonprofits(State(state): State<Arc<AppState>>) -> Json<Vec<Organization>> {
    Json(state.registry.list_all().await)
}

/// POST /send_emails - Send a template to a recipient list now
pub async fn send_emails(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> HandlerResult<Json<DispatchReport>> {
    let Json(request) = payload?;
    let report = state.dispatcher.send_now(request).await?;
    Ok(Json(report))
}

/// POST /drafts - Save a draft
pub async fn create_draft(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateDraftRequest>, JsonRejection>,
) -> HandlerResult<(StatusCode, Json<DraftCreatedResponse>)> {
    let Json(request) = payload?;
    let draft_id = state.drafts.create(request).await;
    Ok((StatusCode::CREATED, Json(DraftCreatedResponse { draft_id })))
}

/// GET /drafts/:id - Get a draft
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<Draft>> {
    state
        .drafts
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| OutreachError::NotFound(format!("Draft not found: {}", id)).into())
}

/// PUT /drafts/:id - Replace some fields of a draft
pub async fn update_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDraftRequest>, JsonRejection>,
) -> HandlerResult<Json<Draft>> {
    let Json(request) = payload?;
    let draft = state.drafts.update(&id, request).await?;
    Ok(Json(draft))
}

/// POST /drafts/:id/send - Send and consume a draft
pub async fn send_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<Json<DispatchReport>> {
    let report = state.dispatcher.send_draft(&id).await?;
    Ok(Json(report))
}

/// GET /emails - Every sent message, oldest first
pub async fn list_emails(State(state): State<Arc<AppState>>) -> Json<Vec<SentRecord>> {
    Json(state.audit.list_all().await)
}

/// GET /emails/:address - Sent messages for one recipient
pub async fn list_emails_for(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Json<Vec<SentRecord>> {
    Json(state.audit.list_for(&address).await)
}
