// ─── snipreel API server ────────────────────────────────────────────
//
// HTTP surface over the render orchestrator: job submission, status
// polling, downloads of finished videos, and the theme and animation
// catalogues the editor shows.

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::{Path, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use snipreel_core::{FieldIssue, ServerConfig, SnipError};
use snipreel_render::{JobId, JobStatus, Orchestrator, RenderJob, RenderRequest};

// ── Shared state ────────────────────────────────────────────────────

#[derive(Clone)]
struct AppState {
    orchestrator: Orchestrator,
}

// ── Entry point ─────────────────────────────────────────────────────

pub fn router(orchestrator: Orchestrator) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/render", post(submit_render))
        .route("/api/render/{job_id}", get(render_status))
        .route("/api/render/download/{filename}", get(download))
        .route("/api/themes", get(list_themes))
        .route("/api/animations/presets", get(list_presets))
        .with_state(AppState { orchestrator })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(config: &ServerConfig, orchestrator: Orchestrator) -> Result<()> {
    orchestrator.storage().ensure_dir().await?;
    let app = router(orchestrator.clone());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        %addr,
        output_dir = %orchestrator.storage().dir().display(),
        "API server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Errors ──────────────────────────────────────────────────────────

/// Maps engine errors onto status codes and JSON bodies.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldIssue>),
    NotFound(&'static str),
    Internal(SnipError),
}

impl From<SnipError> for ApiError {
    fn from(err: SnipError) -> Self {
        if !err.is_client_error() {
            return ApiError::Internal(err);
        }
        match err {
            SnipError::Validation(issues) => ApiError::Validation(issues),
            _ => ApiError::NotFound("Not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Validation error", "details": details })),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

fn or_not_found(message: &'static str) -> impl FnOnce(SnipError) -> ApiError {
    move |err| match err {
        SnipError::NotFound(_) => ApiError::NotFound(message),
        other => other.into(),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody {
    job_id: JobId,
    status: JobStatus,
    message: &'static str,
}

async fn submit_render(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitBody>, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::Validation(vec![FieldIssue::new(
            "body",
            format!("must be valid JSON ({e})"),
        )])
    })?;
    let request = RenderRequest::from_json(value).map_err(|e| {
        tracing::debug!(error = %e, "Render request rejected");
        ApiError::from(e)
    })?;
    let job_id = state.orchestrator.submit(request).await?;

    Ok(Json(SubmitBody {
        job_id,
        status: JobStatus::Queued,
        message: "Render job started",
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    job_id: JobId,
    status: JobStatus,
    progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<RenderJob> for StatusBody {
    fn from(job: RenderJob) -> Self {
        Self {
            job_id: job.id,
            status: job.status,
            progress: job.progress,
            download_url: job.download_url,
            error: job.error,
        }
    }
}

async fn render_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<StatusBody>, ApiError> {
    let job = state
        .orchestrator
        .status(&JobId::from(job_id))
        .await
        .map_err(or_not_found("Job not found"))?;
    Ok(Json(job.into()))
}

/// Streams a finished video. `ServeFile` picks the content type from the
/// extension and answers range requests.
async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let storage = state.orchestrator.storage();
    let path = storage
        .resolve_download(&filename)
        .await
        .map_err(or_not_found("Video not found"))?;

    let response = ServeFile::new(&path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    let mut response = response.map(Body::new);

    if response.status().is_success() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{name}\"")) {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
    }
    Ok(response)
}

async fn list_themes() -> impl IntoResponse {
    Json(json!({ "themes": snipreel_theme::all_themes() }))
}

async fn list_presets() -> impl IntoResponse {
    Json(json!({ "presets": snipreel_anim::presets() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_are_internal() {
        let err = ApiError::from(SnipError::Render("renderer crashed".into()));
        assert!(matches!(err, ApiError::Internal(_)));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_errors_keep_their_status() {
        let err = ApiError::from(SnipError::invalid_field("code", "must not be empty"));
        assert!(matches!(&err, ApiError::Validation(issues) if issues.len() == 1));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(SnipError::not_found("job_x"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
