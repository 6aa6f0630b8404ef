use async_trait::async_trait;
use dashmap::DashMap;

use snipreel_core::{SnipError, SnipResult};

use crate::job::{JobId, JobTransition, RenderJob};

/// Keyed storage for render jobs.
///
/// Implementations must apply each transition atomically with respect to
/// concurrent readers: a `get` sees a job either before or after a
/// transition, never half of one.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job. Fails if the id is already taken.
    async fn put(&self, job: RenderJob) -> SnipResult<()>;

    /// Snapshot of the job with `id`.
    async fn get(&self, id: &JobId) -> SnipResult<Option<RenderJob>>;

    /// Apply `transition` to the stored job and return the updated snapshot.
    async fn apply(&self, id: &JobId, transition: JobTransition) -> SnipResult<RenderJob>;

    /// All jobs, oldest first.
    async fn list(&self) -> SnipResult<Vec<RenderJob>>;
}

/// Process-local job store. Jobs are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: DashMap<JobId, RenderJob>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn put(&self, job: RenderJob) -> SnipResult<()> {
        use dashmap::mapref::entry::Entry;
        match self.jobs.entry(job.id.clone()) {
            Entry::Occupied(_) => Err(SnipError::Other(format!(
                "job {} already exists",
                job.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(job);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &JobId) -> SnipResult<Option<RenderJob>> {
        Ok(self.jobs.get(id).map(|entry| entry.value().clone()))
    }

    async fn apply(&self, id: &JobId, transition: JobTransition) -> SnipResult<RenderJob> {
        let mut entry = self
            .jobs
            .get_mut(id)
            .ok_or_else(|| SnipError::not_found(format!("job {id}")))?;
        entry.apply(transition)?;
        Ok(entry.clone())
    }

    async fn list(&self) -> SnipResult<Vec<RenderJob>> {
        let mut jobs: Vec<RenderJob> = self.jobs.iter().map(|e| e.value().clone()).collect();
        jobs.sort_by_key(|j| j.created_at);
        Ok(jobs)
    }
}
