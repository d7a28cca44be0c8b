use std::sync::Arc;

use futures::future::join_all;

use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::services::candidate_service::CandidateService;
use crate::services::position_service::PositionService;
use crate::services::status_service::StatusService;
use crate::store::{RowStore, Sheet};

/// In-flight requests per cascade batch, to bound load on the backing API.
const CASCADE_BATCH: usize = 3;

/// Reference-integrity engine for the parent entities. Candidates point at
/// positions and statuses by name, so deletions gate on live references
/// and renames fan out to every referencing candidate.
#[derive(Clone)]
pub struct CascadeService {
    store: Arc<dyn RowStore>,
    candidates: CandidateService,
    positions: PositionService,
    statuses: StatusService,
}

impl CascadeService {
    pub fn new(
        store: Arc<dyn RowStore>,
        candidates: CandidateService,
        positions: PositionService,
        statuses: StatusService,
    ) -> Self {
        Self {
            store,
            candidates,
            positions,
            statuses,
        }
    }

    async fn all_candidates(&self) -> Result<Vec<Candidate>> {
        let rows = self.store.list(Sheet::Candidates).await?;
        Ok(rows.iter().map(Candidate::from_row).collect())
    }

    /// Live candidates referencing a position by exact name.
    pub async fn candidates_for_position(&self, position_name: &str) -> Result<Vec<Candidate>> {
        Ok(self
            .all_candidates()
            .await?
            .into_iter()
            .filter(|c| c.position == position_name && c.is_deleted == 0)
            .collect())
    }

    /// Live candidates referencing a status by exact name.
    pub async fn candidates_for_status(&self, status_name: &str) -> Result<Vec<Candidate>> {
        Ok(self
            .all_candidates()
            .await?
            .into_iter()
            .filter(|c| c.status == status_name && c.is_deleted == 0)
            .collect())
    }

    fn blocked(item: &str, relation: &str, count: usize) -> Error {
        let clause = if count == 1 {
            format!("1 candidate is still {} it", relation)
        } else {
            format!("{} candidates are still {} it", count, relation)
        };
        Error::references(
            format!("Cannot delete this {} because {}", item, clause),
            count,
        )
    }

    /// Soft delete is all-or-nothing: any live reference blocks it.
    pub async fn soft_delete_position(&self, id: &str) -> Result<()> {
        let position = self.positions.get(id).await?;
        let referencing = self.candidates_for_position(&position.name).await?;
        if !referencing.is_empty() {
            return Err(Self::blocked("position", "assigned to", referencing.len()));
        }
        self.positions.set_deleted(id, true).await
    }

    pub async fn soft_delete_status(&self, id: &str) -> Result<()> {
        let status = self.statuses.get(id).await?;
        let referencing = self.candidates_for_status(&status.name).await?;
        if !referencing.is_empty() {
            return Err(Self::blocked("status", "using", referencing.len()));
        }
        self.statuses.set_deleted(id, true).await
    }

    /// Erases every live candidate in `targets` through the full candidate
    /// delete path (résumé cleanup included), in bounded batches. Per-item
    /// failures are tallied and logged, never fatal to the batch.
    async fn erase_candidates(&self, targets: Vec<Candidate>) -> usize {
        let total = targets.len();
        let mut deleted = 0;
        let mut completed = 0;

        for chunk in targets.chunks(CASCADE_BATCH) {
            let results = join_all(
                chunk
                    .iter()
                    .map(|c| self.candidates.delete_permanent(&c.id)),
            )
            .await;
            for (candidate, result) in chunk.iter().zip(results) {
                completed += 1;
                match result {
                    Ok(()) => deleted += 1,
                    Err(e) => {
                        tracing::warn!(candidate = %candidate.id, error = %e, "cascade delete failed")
                    }
                }
            }
            tracing::info!(completed, total, "cascade delete progress");
        }

        deleted
    }

    /// Permanently deletes a position, force-deleting every live candidate
    /// that still references it. Returns how many candidates were erased.
    pub async fn permanent_delete_position(&self, id: &str) -> Result<usize> {
        let position = self.positions.get(id).await?;
        let targets = self.candidates_for_position(&position.name).await?;
        let deleted = self.erase_candidates(targets).await;

        self.positions.delete_row(id).await?;
        tracing::info!(position = %position.name, deleted, "position permanently deleted");
        Ok(deleted)
    }

    pub async fn permanent_delete_status(&self, id: &str) -> Result<usize> {
        let status = self.statuses.get(id).await?;
        let targets = self.candidates_for_status(&status.name).await?;
        let deleted = self.erase_candidates(targets).await;

        self.statuses.delete_row(id).await?;
        tracing::info!(status = %status.name, deleted, "status permanently deleted");
        Ok(deleted)
    }

    /// Fans a position rename out to referencing candidates; returns the
    /// updated count for UI feedback.
    pub async fn propagate_position_rename(&self, old_name: &str, new_name: &str) -> Result<usize> {
        let (updated, _failed) = self
            .candidates
            .bulk_update_position(old_name, new_name)
            .await?;
        Ok(updated)
    }

    /// Fans a status rename out to referencing candidates. Each touched
    /// candidate also gets a synthetic history entry attributed to the
    /// actor performing the rename.
    pub async fn propagate_status_rename(
        &self,
        old_name: &str,
        new_name: &str,
        actor: &str,
    ) -> Result<usize> {
        let (updated, _failed) = self
            .candidates
            .bulk_update_status(old_name, new_name, actor)
            .await?;
        Ok(updated)
    }
}
