// crates/clipforge-server/src/handlers.rs
//
// Request handlers behind the dispatch table in routes.rs. Handlers stay
// thin: parse, call the core (validator / store / orchestrator), shape the
// response. The only synchronous media work visible to a client is the
// upload-time probe.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::connect_info::ConnectInfo;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::{info, warn};
use serde_json::json;
use uuid::Uuid;

use clipforge_core::{validate, EditLimits, EditRequest, Prober, Project, ProjectStore};

use crate::error::ApiError;
use crate::orchestrator::{EditOrchestrator, SubmitError};

pub struct AppState {
    pub store:        Arc<dyn ProjectStore>,
    pub prober:       Arc<dyn Prober>,
    pub orchestrator: Arc<EditOrchestrator>,
    pub limits:       EditLimits,
    pub storage_dir:  PathBuf,
}

pub type SharedState = Arc<AppState>;

/// Malformed ids resolve to NotFound, same as unknown ones.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/// POST /projects — multipart upload, one project per media part.
/// Blocks on a synchronous probe per file before responding.
pub async fn create_projects(
    State(state): State<SharedState>,
    addr: Option<ConnectInfo<SocketAddr>>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Project>>, ApiError> {
    let request_address = addr
        .map(|ConnectInfo(a)| a.ip().to_string())
        .unwrap_or_else(|| "unknown".into());

    let mut created: Vec<Project> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if !matches!(field.name(), Some("file") | Some("media")) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let storage_id = Uuid::new_v4();
        let path = state.storage_dir.join(storage_id.to_string());
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;

        // Subprocess probe off the async runtime.
        let prober = Arc::clone(&state.prober);
        let probe_path = path.clone();
        let probed = tokio::task::spawn_blocking(move || prober.probe(&probe_path))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;

        let metadata = match probed {
            Ok(m) => m,
            Err(e) => {
                let _ = tokio::fs::remove_file(&path).await;
                warn!("[upload] rejected {filename}: {e}");
                return Err(ApiError::BadRequest(format!("{filename}: {e}")));
            }
        };

        let project = Project::new(
            metadata,
            filename,
            storage_id,
            mime_type,
            request_address.clone(),
        );
        info!("[upload] created project {} ({})", project.id, project.original_filename);
        state.store.create(project.clone());
        created.push(project);
    }

    if created.is_empty() {
        return Err(ApiError::BadRequest("no media file provided".into()));
    }
    Ok(Json(created))
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_id(&id)?;
    state.store.get(id).map(Json).ok_or(ApiError::NotFound)
}

/// PUT /projects/{id} — validate the edit request against current metadata
/// and hand the plan to the orchestrator. Responds before the job runs.
pub async fn edit_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<EditRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let project = state.store.get(id).ok_or(ApiError::NotFound)?;

    let plan = validate(&project.metadata, &request, &state.limits)
        .map_err(ApiError::Validation)?;

    match state.orchestrator.submit(&project, plan) {
        Ok(()) => Ok(Json(json!({"processing": true}))),
        Err(SubmitError::Busy) => Err(ApiError::Busy),
        Err(SubmitError::NotFound) => Err(ApiError::NotFound),
    }
}

/// DELETE /projects/{id} — record first, stored file best-effort. An
/// in-flight job discovers the deletion when its completion patch gets
/// NotFound, and discards its result.
pub async fn delete_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let record = state.store.get(id).ok_or(ApiError::NotFound)?;

    state.store.delete(id).map_err(|_| ApiError::NotFound)?;
    let _ = tokio::fs::remove_file(state.storage_dir.join(record.storage_id.to_string())).await;
    info!("[delete] project {id} removed");
    Ok(StatusCode::NO_CONTENT)
}
