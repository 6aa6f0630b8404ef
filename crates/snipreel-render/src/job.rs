use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use snipreel_core::{SnipError, SnipResult};

/// Lowest progress reported while a render is active.
pub const MIN_ACTIVE_PROGRESS: u8 = 5;
/// Highest progress reported while a render is active; the rest is held for completion.
pub const MAX_ACTIVE_PROGRESS: u8 = 95;

/// Opaque, unique job identifier of the form `job_<32 hex digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        Self(format!("job_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Rendering,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Rendering => write!(f, "rendering"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A state change requested of a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobTransition {
    /// `queued -> rendering`.
    Start,
    /// Renderer progress as a fraction in `[0, 1]`.
    Progress(f64),
    /// `rendering -> completed`.
    Complete { download_url: String },
    /// `rendering -> failed`, or `queued -> failed` when the job dies before
    /// a render slot is acquired. A job failed from `queued` keeps progress 0.
    Fail { error: String },
}

/// Snapshot of one render job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderJob {
    #[serde(rename = "jobId")]
    pub id: JobId,
    pub status: JobStatus,
    /// Percentage in `0..=100`.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RenderJob {
    pub fn queued(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            progress: 0,
            download_url: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    /// Apply `transition`, leaving the job untouched when it is not allowed.
    ///
    /// Progress never decreases and stays within the active band until the
    /// job completes. Terminal jobs reject every transition.
    pub fn apply(&mut self, transition: JobTransition) -> SnipResult<()> {
        if self.status.is_terminal() {
            return Err(self.rejected(&transition));
        }
        match transition {
            JobTransition::Start => {
                if self.status != JobStatus::Queued {
                    return Err(self.rejected(&JobTransition::Start));
                }
                self.status = JobStatus::Rendering;
                self.progress = self.progress.max(MIN_ACTIVE_PROGRESS);
            }
            JobTransition::Progress(fraction) => {
                if self.status != JobStatus::Rendering {
                    return Err(self.rejected(&JobTransition::Progress(fraction)));
                }
                if fraction.is_finite() {
                    let percent = (fraction * 100.0)
                        .round()
                        .clamp(MIN_ACTIVE_PROGRESS as f64, MAX_ACTIVE_PROGRESS as f64)
                        as u8;
                    self.progress = self.progress.max(percent);
                }
            }
            JobTransition::Complete { download_url } => {
                if self.status != JobStatus::Rendering {
                    return Err(self.rejected(&JobTransition::Complete { download_url }));
                }
                self.status = JobStatus::Completed;
                self.progress = 100;
                self.download_url = Some(download_url);
            }
            JobTransition::Fail { error } => {
                self.status = JobStatus::Failed;
                self.error = Some(error);
            }
        }
        Ok(())
    }

    fn rejected(&self, transition: &JobTransition) -> SnipError {
        let name = match transition {
            JobTransition::Start => "start",
            JobTransition::Progress(_) => "progress",
            JobTransition::Complete { .. } => "complete",
            JobTransition::Fail { .. } => "fail",
        };
        SnipError::InvalidTransition(format!(
            "cannot {} job {} while {}",
            name, self.id, self.status
        ))
    }
}
