//! # snipreel-render
//!
//! The render job pipeline: request validation, the job state machine and
//! store, the single-flight renderer bundle, output storage and the
//! orchestrator that drives an external headless renderer per job.

pub mod backend;
pub mod bundle;
pub mod job;
pub mod orchestrator;
pub mod process;
pub mod request;
pub mod storage;
pub mod store;

pub use backend::{ProgressCallback, RenderBackend, RenderSpec, ServeHandle};
pub use bundle::BundleCache;
pub use job::{JobId, JobStatus, JobTransition, RenderJob};
pub use orchestrator::{compute_duration, Orchestrator};
pub use process::ProcessBackend;
pub use request::{RenderRequest, MAX_CODE_CHARS, MAX_CODE_LINES};
pub use storage::OutputStorage;
pub use store::{InMemoryJobStore, JobStore};
