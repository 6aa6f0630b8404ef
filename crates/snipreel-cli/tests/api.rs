use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use snipreel_cli::server::router;
use snipreel_core::{RenderConfig, VideoSettings};
use snipreel_render::{
    InMemoryJobStore, Orchestrator, OutputStorage, ProgressCallback, RenderBackend, RenderSpec,
    ServeHandle,
};

/// Writes a tiny file and succeeds immediately.
struct InstantBackend;

#[async_trait]
impl RenderBackend for InstantBackend {
    async fn bundle(&self) -> anyhow::Result<ServeHandle> {
        Ok(ServeHandle("http://stub".into()))
    }

    async fn render(
        &self,
        _serve: &ServeHandle,
        spec: &RenderSpec,
        on_progress: ProgressCallback,
    ) -> anyhow::Result<()> {
        on_progress(0.5);
        tokio::fs::write(&spec.output_path, b"video").await?;
        Ok(())
    }
}

fn app(tag: &str) -> (Router, PathBuf) {
    let dir = std::env::temp_dir().join(format!("snipreel-api-{}-{}", tag, std::process::id()));
    let orchestrator = Orchestrator::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(InstantBackend),
        OutputStorage::new(&dir, "/api/render/download"),
        RenderConfig::default(),
        VideoSettings::default(),
    );
    (router(orchestrator), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, bytes) = send(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = app("health");
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_submit_poll_and_download() {
    let (app, dir) = app("roundtrip");
    let (status, body) = post_json(
        &app,
        "/api/render",
        json!({"code": "const a = 1;", "language": "javascript"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "queued");
    assert_eq!(body["message"], "Render job started");
    let job_id = body["jobId"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("job_"));

    let mut job = Value::Null;
    for _ in 0..500 {
        let (status, body) = get_json(&app, &format!("/api/render/{job_id}")).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == "completed" {
            job = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(job["progress"], 100);
    assert_eq!(job["jobId"], job_id.as_str());
    let url = job["downloadUrl"].as_str().unwrap().to_string();
    assert_eq!(url, format!("/api/render/download/{job_id}.mp4"));

    let request = Request::builder().uri(&url).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"video");

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn test_download_streams_ranges() {
    let (app, dir) = app("range");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("job_ranged.webm"), b"streamed video bytes")
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/api/render/download/job_ranged.webm")
        .header(header::RANGE, "bytes=0-7")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/webm");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"job_ranged.webm\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"streamed");

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn test_validation_errors_list_fields() {
    let (app, _dir) = app("validation");
    let (status, body) = post_json(
        &app,
        "/api/render",
        json!({"code": "", "language": "cobol"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    let paths: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["language"]);

    let (status, body) = post_json(&app, "/api/render", "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["path"], "body");
}

#[tokio::test]
async fn test_unknown_job_is_404() {
    let (app, _dir) = app("unknown");
    let (status, body) = get_json(&app, "/api/render/job_missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Job not found");
}

#[tokio::test]
async fn test_download_traversal_is_404() {
    let (app, _dir) = app("traversal");
    let (status, body) = get_json(&app, "/api/render/download/..%2F..%2Fetc%2Fpasswd").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Video not found");
}

#[tokio::test]
async fn test_catalogues() {
    let (app, _dir) = app("catalogues");
    let (status, body) = get_json(&app, "/api/themes").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["themes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["revorgs-bronze", "midnight-blue"]);

    let (status, body) = get_json(&app, "/api/animations/presets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["presets"].as_array().unwrap().len(), 3);
    assert_eq!(body["presets"][2]["name"], "Glow Pulse");
}
