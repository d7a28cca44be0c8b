use futures::future::join_all;

use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::services::candidate_service::CandidateService;

/// In-flight requests per bulk batch.
const BULK_BATCH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}

/// Trash lifecycle: Active -> Trashed -> Erased, with the multi-select
/// bulk operations the trash page drives.
#[derive(Clone)]
pub struct TrashService {
    candidates: CandidateService,
}

impl TrashService {
    pub fn new(candidates: CandidateService) -> Self {
        Self { candidates }
    }

    pub async fn deleted_candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self
            .candidates
            .list()
            .await?
            .into_iter()
            .filter(|c| c.is_deleted == 1)
            .collect())
    }

    /// Runs `op` over the ids in batches of three, reporting progress as
    /// `(completed, total)` after each batch. Per-item failures count
    /// toward `failed` and do not abort the remainder.
    async fn batch_process<'a, F, Fut>(&self, ids: &'a [String], label: &str, op: F) -> BulkOutcome
    where
        F: Fn(&'a str) -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let total = ids.len();
        let mut succeeded = 0;
        let mut failed = 0;
        let mut completed = 0;

        for chunk in ids.chunks(BULK_BATCH) {
            let results = join_all(chunk.iter().map(|id| op(id.as_str()))).await;
            for (id, result) in chunk.iter().zip(results) {
                completed += 1;
                match result {
                    Ok(()) => succeeded += 1,
                    Err(e) => {
                        failed += 1;
                        tracing::warn!(candidate = %id, error = %e, "bulk {} failed", label);
                    }
                }
            }
            tracing::info!(completed, total, "bulk {} progress", label);
        }

        BulkOutcome {
            succeeded,
            failed,
            total,
        }
    }

    pub async fn restore_many(&self, ids: &[String]) -> BulkOutcome {
        self.batch_process(ids, "restore", |id| self.candidates.restore(id))
            .await
    }

    pub async fn delete_many(&self, ids: &[String]) -> BulkOutcome {
        self.batch_process(ids, "delete", |id| self.candidates.delete_permanent(id))
            .await
    }
}
