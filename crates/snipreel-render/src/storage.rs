use std::path::{Path, PathBuf};

use snipreel_core::{OutputFormat, SnipError, SnipResult, StorageConfig};

use crate::job::JobId;

/// Where finished videos live and how clients address them.
#[derive(Debug, Clone)]
pub struct OutputStorage {
    dir: PathBuf,
    download_prefix: String,
}

impl OutputStorage {
    pub fn new(dir: impl Into<PathBuf>, download_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            download_prefix: download_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.output_dir, config.download_prefix.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> SnipResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub fn file_name(job_id: &JobId, format: OutputFormat) -> String {
        format!("{}.{}", job_id, format.extension())
    }

    pub fn output_path(&self, job_id: &JobId, format: OutputFormat) -> PathBuf {
        self.dir.join(Self::file_name(job_id, format))
    }

    pub fn download_url(&self, job_id: &JobId, format: OutputFormat) -> String {
        format!("{}/{}", self.download_prefix, Self::file_name(job_id, format))
    }

    /// Resolve a client-supplied file name inside the output directory.
    ///
    /// Only the final path component is used, so `../../etc/passwd` resolves to
    /// `<dir>/passwd`. Missing files and anything that is not a regular file are
    /// reported as not found.
    pub async fn resolve_download(&self, requested: &str) -> SnipResult<PathBuf> {
        let name = basename(requested);
        if name.is_empty() || name == "." || name == ".." {
            return Err(SnipError::not_found(format!("file {requested}")));
        }
        let path = self.dir.join(name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(SnipError::not_found(format!("file {name}"))),
        }
    }
}

/// Last component of `path`, treating both `/` and `\` as separators.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
