use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::error::{Error, Result};

const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
const MIN_RESUME_BYTES: usize = 1024;

/// Résumé file collaborator. Deletion failures are the caller's problem to
/// log; record erasure never blocks on them.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn upload(&self, file_name: &str, data: Bytes) -> Result<String>;
    async fn delete(&self, file_id: &str) -> Result<()>;
}

/// Stores résumés as `<uuid>.pdf` under the configured uploads directory.
pub struct LocalResumeStore {
    dir: PathBuf,
}

impl LocalResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, file_id: &str) -> PathBuf {
        self.dir.join(file_id)
    }
}

#[async_trait]
impl ResumeStore for LocalResumeStore {
    async fn upload(&self, file_name: &str, data: Bytes) -> Result<String> {
        if !file_name.to_lowercase().ends_with(".pdf") {
            return Err(Error::BadRequest("CV must be a PDF file".into()));
        }
        if !data.starts_with(b"%PDF") {
            return Err(Error::BadRequest("Invalid PDF file content".into()));
        }
        if data.len() > MAX_RESUME_BYTES {
            return Err(Error::BadRequest("CV file size must not exceed 10MB".into()));
        }
        if data.len() < MIN_RESUME_BYTES {
            return Err(Error::BadRequest(
                "CV file appears to be empty or corrupted".into(),
            ));
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Internal(format!("Failed to create uploads dir: {}", e)))?;

        let file_id = format!("{}.pdf", uuid::Uuid::new_v4());
        let path = self.path_for(&file_id);
        fs::write(&path, &data).await.map_err(|e| {
            tracing::error!(error = %e, "failed to write resume file");
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

        Ok(file_id)
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let path = self.path_for(file_id);
        fs::remove_file(&path)
            .await
            .map_err(|e| Error::Internal(format!("Failed to delete file {}: {}", file_id, e)))
    }
}
