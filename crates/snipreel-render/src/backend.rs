use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use snipreel_compose::Composition;

use crate::job::JobId;

/// Opaque locator returned by a bundle build, e.g. a local serve URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeHandle(pub String);

impl ServeHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Invoked with the renderer's fractional progress in `[0, 1]`.
pub type ProgressCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Everything a backend needs to materialize one job.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    pub job_id: JobId,
    pub composition: Arc<Composition>,
    pub composition_id: String,
    /// Frames `0..frame_count` are rendered in order.
    pub frame_count: u64,
    pub codec: &'static str,
    pub output_path: PathBuf,
}

/// The headless rendering engine the orchestrator drives.
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// One-time build of the render artifact.
    async fn bundle(&self) -> Result<ServeHandle, anyhow::Error>;

    /// Render `spec` into `spec.output_path`, reporting progress as it goes.
    async fn render(
        &self,
        serve: &ServeHandle,
        spec: &RenderSpec,
        on_progress: ProgressCallback,
    ) -> Result<(), anyhow::Error>;
}
