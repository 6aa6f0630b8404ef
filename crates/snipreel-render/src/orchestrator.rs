use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, Semaphore};

use snipreel_anim::{typing, AnimationConfig};
use snipreel_compose::Composition;
use snipreel_core::{RenderConfig, SnipError, SnipResult, VideoSettings};

use crate::backend::{ProgressCallback, RenderBackend, RenderSpec};
use crate::bundle::BundleCache;
use crate::job::{JobId, JobTransition, RenderJob};
use crate::request::RenderRequest;
use crate::storage::OutputStorage;
use crate::store::JobStore;

/// Number of frames to render for `animation` over `code`.
///
/// Typing runs until the last character appears plus a blinking tail, capped
/// at `max_typing_frames`. Entrance is never cut shorter than its own
/// duration. Glow uses the default length.
pub fn compute_duration(animation: &AnimationConfig, code: &str, config: &RenderConfig) -> u64 {
    let frames = match animation {
        AnimationConfig::Typing(c) => typing::frames_to_complete(code, c)
            .saturating_add(c.delay as u64)
            .saturating_add(config.typing_tail_frames)
            .min(config.max_typing_frames),
        AnimationConfig::Entrance(c) => config
            .default_duration_frames
            .max(c.duration as u64 + c.delay as u64),
        AnimationConfig::Glow(_) => config.default_duration_frames,
    };
    frames.max(1)
}

/// Owns the lifecycle of render jobs: validation, scheduling, rendering and
/// status bookkeeping.
///
/// Cloning is cheap; clones share the same store, backend and bundle.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn JobStore>,
    backend: Arc<dyn RenderBackend>,
    bundle: BundleCache,
    storage: OutputStorage,
    config: RenderConfig,
    video: VideoSettings,
    permits: Semaphore,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn JobStore>,
        backend: Arc<dyn RenderBackend>,
        storage: OutputStorage,
        config: RenderConfig,
        video: VideoSettings,
    ) -> Self {
        let permits = Semaphore::new(config.max_concurrent_renders.max(1));
        Self {
            inner: Arc::new(Inner {
                store,
                backend,
                bundle: BundleCache::new(),
                storage,
                config,
                video,
                permits,
            }),
        }
    }

    pub fn storage(&self) -> &OutputStorage {
        &self.inner.storage
    }

    pub fn video(&self) -> VideoSettings {
        self.inner.video
    }

    pub fn compute_duration(&self, request: &RenderRequest) -> u64 {
        compute_duration(&request.animation(), &request.props.code, &self.inner.config)
    }

    /// Validate `request`, record a queued job and schedule its render.
    ///
    /// Returns as soon as the job is stored. Invalid requests never create a job.
    pub async fn submit(&self, request: RenderRequest) -> SnipResult<JobId> {
        if let Err(e) = request.validate() {
            tracing::debug!(error = %e, "Render request rejected");
            return Err(e);
        }

        let id = JobId::generate();
        self.inner.store.put(RenderJob::queued(id.clone())).await?;
        tracing::info!(
            job_id = %id,
            animation = %request.props.animation_type,
            format = %request.output_format,
            "Render job accepted"
        );

        let this = self.clone();
        let job_id = id.clone();
        tokio::spawn(async move { this.supervise(job_id, request).await });
        Ok(id)
    }

    pub async fn status(&self, id: &JobId) -> SnipResult<RenderJob> {
        self.inner
            .store
            .get(id)
            .await?
            .ok_or_else(|| SnipError::not_found(format!("job {id}")))
    }

    /// All known jobs, oldest first.
    pub async fn jobs(&self) -> SnipResult<Vec<RenderJob>> {
        self.inner.store.list().await
    }

    /// Run the job on its own task and route any escape, including a panic,
    /// into the job record. A job that fails before `Start` goes straight from
    /// queued to failed.
    async fn supervise(self, id: JobId, request: RenderRequest) {
        let worker = {
            let this = self.clone();
            let id = id.clone();
            tokio::spawn(async move { this.run(&id, request).await })
        };
        let failure = match worker.await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(join) => format!("render task aborted: {join}"),
        };
        tracing::error!(job_id = %id, error = %failure, "Render job failed");
        if let Err(e) = self
            .inner
            .store
            .apply(&id, JobTransition::Fail { error: failure })
            .await
        {
            tracing::warn!(job_id = %id, error = %e, "Could not record job failure");
        }
    }

    async fn run(&self, id: &JobId, request: RenderRequest) -> SnipResult<()> {
        let inner = &self.inner;
        let _permit = inner
            .permits
            .acquire()
            .await
            .map_err(|e| SnipError::Other(e.to_string()))?;

        inner.store.apply(id, JobTransition::Start).await?;
        let frame_count = self.compute_duration(&request);
        tracing::info!(job_id = %id, frame_count, "Rendering");
        let start = Instant::now();

        let serve = inner.bundle.get_or_build(inner.backend.as_ref()).await?;
        inner.storage.ensure_dir().await?;

        let format = request.output_format;
        let spec = RenderSpec {
            job_id: id.clone(),
            composition: Arc::new(Composition::new(request.props, inner.video)),
            composition_id: inner.config.composition_id.clone(),
            frame_count,
            codec: format.codec(),
            output_path: inner.storage.output_path(id, format),
        };

        let (tx, mut rx) = mpsc::unbounded_channel::<f64>();
        let on_progress: ProgressCallback = Arc::new(move |fraction: f64| {
            let _ = tx.send(fraction);
        });

        let render = inner.backend.render(&serve, &spec, on_progress);
        tokio::pin!(render);
        let outcome = loop {
            tokio::select! {
                biased;
                Some(fraction) = rx.recv() => self.record_progress(id, fraction).await,
                result = &mut render => break result,
            }
        };
        while let Ok(fraction) = rx.try_recv() {
            self.record_progress(id, fraction).await;
        }

        match outcome {
            Ok(()) => {
                let download_url = inner.storage.download_url(id, format);
                inner
                    .store
                    .apply(id, JobTransition::Complete { download_url })
                    .await?;
                tracing::info!(
                    job_id = %id,
                    frame_count,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Render completed"
                );
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(job_id = %id, error = %error, "Render job failed");
                inner.store.apply(id, JobTransition::Fail { error }).await?;
            }
        }
        Ok(())
    }

    async fn record_progress(&self, id: &JobId, fraction: f64) {
        match self
            .inner
            .store
            .apply(id, JobTransition::Progress(fraction))
            .await
        {
            Ok(job) => tracing::debug!(job_id = %id, progress = job.progress, "Render progress"),
            Err(e) => tracing::debug!(job_id = %id, error = %e, "Progress update dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipreel_anim::AnimationOverrides;
    use snipreel_core::AnimationKind;

    fn typing(chars_per_frame: f64, delay: u32) -> AnimationConfig {
        let overrides = AnimationOverrides {
            chars_per_frame: Some(chars_per_frame),
            delay: Some(delay),
            ..Default::default()
        };
        AnimationConfig::resolve(AnimationKind::Typing, Some(&overrides))
    }

    #[test]
    fn test_typing_duration() {
        let config = RenderConfig::default();
        assert_eq!(compute_duration(&typing(2.0, 0), &"x".repeat(500), &config), 280);
        assert_eq!(compute_duration(&typing(2.0, 0), &"x".repeat(600), &config), 300);
        assert_eq!(compute_duration(&typing(2.0, 0), &"x".repeat(5), &config), 33);
        assert_eq!(compute_duration(&typing(2.0, 10), &"x".repeat(10), &config), 45);
    }

    #[test]
    fn test_tiny_typing_speed_hits_the_cap() {
        let config = RenderConfig::default();
        let code = "x".repeat(5_000);
        assert_eq!(compute_duration(&typing(1e-18, 0), &code, &config), 300);
        assert_eq!(compute_duration(&typing(1e-18, 60), &code, &config), 300);

        let long_tail = RenderConfig {
            typing_tail_frames: u64::MAX,
            ..RenderConfig::default()
        };
        assert_eq!(compute_duration(&typing(2.0, 0), "x", &long_tail), 300);
    }

    #[test]
    fn test_fixed_durations() {
        let config = RenderConfig::default();
        let glow = AnimationConfig::default_for(AnimationKind::Glow);
        assert_eq!(compute_duration(&glow, "x", &config), 150);

        let entrance = AnimationConfig::default_for(AnimationKind::Entrance);
        assert_eq!(compute_duration(&entrance, "x", &config), 150);

        let long = AnimationOverrides {
            duration: Some(200),
            delay: Some(20),
            ..Default::default()
        };
        let entrance = AnimationConfig::resolve(AnimationKind::Entrance, Some(&long));
        assert_eq!(compute_duration(&entrance, "x", &config), 220);
    }
}
