use std::time::Instant;

use tokio::sync::OnceCell;

use snipreel_core::{SnipError, SnipResult};

use crate::backend::{RenderBackend, ServeHandle};

/// Single-flight, build-once cache for the renderer bundle.
///
/// The first caller builds; callers arriving while the build is in flight
/// wait on the same build. A failed build is not cached, so the next caller
/// retries.
#[derive(Debug, Default)]
pub struct BundleCache {
    cell: OnceCell<ServeHandle>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&ServeHandle> {
        self.cell.get()
    }

    pub async fn get_or_build(&self, backend: &dyn RenderBackend) -> SnipResult<ServeHandle> {
        let handle = self
            .cell
            .get_or_try_init(|| async {
                tracing::info!("Bundling renderer");
                let start = Instant::now();
                let handle = backend.bundle().await.map_err(|e| {
                    tracing::error!(error = %e, "Renderer bundle failed");
                    SnipError::Bundle(format!("{e:#}"))
                })?;
                tracing::info!(
                    serve = handle.as_str(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Renderer bundled"
                );
                Ok::<_, SnipError>(handle)
            })
            .await?;
        Ok(handle.clone())
    }
}
