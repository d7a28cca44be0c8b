use std::sync::Arc;

use futures::future::join_all;

use crate::dto::candidate_dto::{CandidateFilters, CandidateForm};
use crate::error::{Error, Result};
use crate::models::candidate::{self, Candidate, StatusFlag, StatusHistoryEntry};
use crate::models::position::Position;
use crate::models::status::Status;
use crate::services::history_service::HistoryService;
use crate::store::locks::KeyedLocks;
use crate::store::resume::ResumeStore;
use crate::store::{RowStore, Sheet};
use crate::utils::duplicates::{is_duplicate_email, is_duplicate_linkedin, is_duplicate_phone};
use crate::utils::hiring::{is_hired_status, is_hiring_limit_reached};
use crate::utils::progression::validate_status_progression;
use crate::utils::text::{normalize, to_standard_title_case};
use crate::utils::time;
use crate::utils::validation;

const SHORTLISTED_STATUS: &str = "shortlisted";

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn RowStore>,
    resumes: Arc<dyn ResumeStore>,
    history: Arc<HistoryService>,
    /// Serializes the validate-and-write section of candidate mutations;
    /// the store itself has no compare-and-swap.
    write_locks: Arc<KeyedLocks>,
}

impl CandidateService {
    pub fn new(
        store: Arc<dyn RowStore>,
        resumes: Arc<dyn ResumeStore>,
        history: Arc<HistoryService>,
        write_locks: Arc<KeyedLocks>,
    ) -> Self {
        Self {
            store,
            resumes,
            history,
            write_locks,
        }
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let rows = self.store.list(Sheet::Candidates).await?;
        let mut candidates: Vec<Candidate> = rows.iter().map(Candidate::from_row).collect();
        candidates.sort_by(|a, b| {
            let ta = time::from_rfc3339(&a.entry_date).ok();
            let tb = time::from_rfc3339(&b.entry_date).ok();
            tb.cmp(&ta)
        });
        Ok(candidates)
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.list()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    async fn positions(&self) -> Result<Vec<Position>> {
        let rows = self.store.list(Sheet::Positions).await?;
        Ok(rows.iter().map(Position::from_row).collect())
    }

    async fn statuses(&self) -> Result<Vec<Status>> {
        let rows = self.store.list(Sheet::Statuses).await?;
        Ok(rows.iter().map(Status::from_row).collect())
    }

    /// Active candidates matching the dashboard filters. Candidates whose
    /// position or status no longer resolves to a live record are hidden.
    pub async fn list_filtered(&self, filters: &CandidateFilters) -> Result<Vec<Candidate>> {
        let candidates = self.list().await?;
        let positions = self.positions().await?;
        let statuses = self.statuses().await?;

        let live_positions: Vec<String> = positions
            .iter()
            .filter(|p| p.is_deleted == 0)
            .map(|p| normalize(&p.name))
            .collect();
        let live_statuses: Vec<String> = statuses
            .iter()
            .filter(|s| s.is_deleted == 0)
            .map(|s| normalize(&s.name))
            .collect();

        let want_position = filters
            .position
            .as_deref()
            .map(normalize)
            .unwrap_or_default();
        let want_status = filters.status.as_deref().map(normalize).unwrap_or_default();
        let want_flag = filters
            .status_flag
            .as_deref()
            .map(normalize)
            .unwrap_or_default();
        let search = filters
            .search
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        Ok(candidates
            .into_iter()
            .filter(|c| {
                if c.is_deleted == 1 {
                    return false;
                }
                let c_position = normalize(&c.position);
                let c_status = normalize(&c.status);
                if !live_positions.contains(&c_position) || !live_statuses.contains(&c_status) {
                    return false;
                }

                let matches_position = want_position.is_empty() || c_position == want_position;
                let matches_status = want_status.is_empty() || c_status == want_status;
                let matches_flag =
                    want_flag.is_empty() || normalize(c.status_flag.as_str()) == want_flag;
                let matches_search = search.is_empty()
                    || c.name.to_lowercase().contains(&search)
                    || c.email.to_lowercase().contains(&search)
                    || c.position.to_lowercase().contains(&search);

                matches_position && matches_status && matches_flag && matches_search
            })
            .collect())
    }

    fn field(check: validation::FieldResult) -> Result<()> {
        check.map_err(Error::Validation)
    }

    fn validate_form_fields(form: &CandidateForm, phone_required: bool) -> Result<()> {
        if phone_required && form.phone.trim().is_empty() {
            return Err(Error::Validation("Phone number is required".to_string()));
        }
        Self::field(validation::validate_name(&form.name))?;
        Self::field(validation::validate_email(&form.email))?;
        Self::field(validation::validate_phone(&form.phone))?;
        Self::field(validation::validate_linkedin(&form.linkedin))?;
        Self::field(validation::validate_experience(
            &form.experience_years,
            &form.experience_months,
        ))?;
        Self::field(validation::validate_salary(
            &form.current_salary,
            "Current salary",
        ))?;
        Self::field(validation::validate_salary(
            &form.expected_salary,
            "Expected salary",
        ))?;
        Self::field(validation::validate_notice_period(&form.notice_period))?;
        Ok(())
    }

    fn check_duplicates(
        form: &CandidateForm,
        candidates: &[Candidate],
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if is_duplicate_email(form.email.trim(), candidates, exclude_id) {
            return Err(Error::Conflict("Email already exists".to_string()));
        }
        if !form.phone.trim().is_empty()
            && is_duplicate_phone(form.phone.trim(), candidates, exclude_id)
        {
            return Err(Error::Conflict("Phone number already exists".to_string()));
        }
        if !form.linkedin.trim().is_empty()
            && is_duplicate_linkedin(form.linkedin.trim(), candidates, exclude_id)
        {
            return Err(Error::Conflict(
                "LinkedIn profile already exists".to_string(),
            ));
        }
        Ok(())
    }

    fn find_live_position<'a>(positions: &'a [Position], name: &str) -> Result<&'a Position> {
        positions
            .iter()
            .find(|p| p.name == name && p.is_deleted == 0)
            .ok_or_else(|| Error::NotFound(format!("Position \"{}\" not found", name)))
    }

    fn require_live_status(statuses: &[Status], name: &str) -> Result<()> {
        let target = normalize(name);
        if statuses
            .iter()
            .any(|s| s.is_deleted == 0 && normalize(&s.name) == target)
        {
            Ok(())
        } else {
            Err(Error::NotFound(format!("Status \"{}\" not found", name)))
        }
    }

    pub async fn create(&self, form: CandidateForm, actor: &str) -> Result<Candidate> {
        let Some((file_name, data)) = form.cv_file.clone() else {
            return Err(Error::Validation("CV file is required".to_string()));
        };
        Self::validate_form_fields(&form, true)?;
        if form.position.trim().is_empty() {
            return Err(Error::Validation("Position is required".to_string()));
        }

        let lock = self.write_locks.handle(Sheet::Candidates.name());
        let _guard = lock.lock().await;

        let candidates = self.list().await?;
        Self::check_duplicates(&form, &candidates, None)?;

        let status = if form.status.trim().is_empty() {
            "New".to_string()
        } else {
            to_standard_title_case(&form.status)
        };
        let status_flag = StatusFlag::parse(&form.status_flag);

        if status_flag == StatusFlag::Rejected && normalize(&status) == SHORTLISTED_STATUS {
            return Err(Error::Validation(
                "Cannot reject a shortlisted candidate".to_string(),
            ));
        }

        let positions = self.positions().await?;
        let position = Self::find_live_position(&positions, form.position.trim())?;
        let statuses = self.statuses().await?;
        Self::require_live_status(&statuses, &status)?;

        if is_hired_status(&status) {
            if is_hiring_limit_reached(&position.name, position.criteria, &candidates) {
                return Err(Error::Conflict(
                    "Vacancies are full for this position".to_string(),
                ));
            }
            if status_flag != StatusFlag::Active {
                return Err(Error::Validation(
                    "Status flag must be 'Active' for hired candidates".to_string(),
                ));
            }
        }

        let file_id = self.resumes.upload(&file_name, data).await?;

        let initial_history = vec![StatusHistoryEntry {
            history_id: uuid::Uuid::new_v4().to_string(),
            old_status: "New".to_string(),
            new_status: status.clone(),
            changed_at: time::now(),
            changed_by: actor.to_string(),
        }];

        let new_candidate = Candidate {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            position: position.name.clone(),
            experience: (
                default_zero(&form.experience_years),
                default_zero(&form.experience_months),
            ),
            phone_number: form.phone.trim().trim_start_matches('+').to_string(),
            email: form.email.trim().to_string(),
            current_salary: form.current_salary.trim().to_string(),
            expected_salary: form.expected_salary.trim().to_string(),
            notice_period: form.notice_period.trim().to_string(),
            status,
            status_flag,
            linkedin: form.linkedin.trim().to_string(),
            reference: form.reference.trim().to_string(),
            comments: form.comments.trim().to_string(),
            file_id,
            is_deleted: 0,
            entry_date: time::to_rfc3339(time::now()),
            status_history: initial_history,
        };

        self.store
            .append(Sheet::Candidates, new_candidate.to_row())
            .await?;

        tracing::info!(candidate = %new_candidate.id, "candidate created");
        Ok(new_candidate)
    }

    pub async fn update(&self, id: &str, form: CandidateForm, actor: &str) -> Result<Candidate> {
        let lock = self.write_locks.handle(Sheet::Candidates.name());
        let _guard = lock.lock().await;

        let candidates = self.list().await?;
        let existing = candidates
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        Self::validate_form_fields(&form, false)?;
        Self::check_duplicates(&form, &candidates, Some(id))?;

        let new_status = to_standard_title_case(&form.status);
        let new_position = form.position.trim().to_string();
        let new_flag = StatusFlag::parse(&form.status_flag);

        let statuses = self.statuses().await?;
        validate_status_progression(&existing.status, &new_status, &statuses)
            .map_err(Error::Conflict)?;

        if new_flag == StatusFlag::Rejected && normalize(&new_status) == SHORTLISTED_STATUS {
            return Err(Error::Validation(
                "Cannot reject a shortlisted candidate".to_string(),
            ));
        }

        // Rejected before and after the edit means the record is frozen:
        // the flag has to move off Rejected before status or position may
        // change again.
        if existing.status_flag == StatusFlag::Rejected && new_flag == StatusFlag::Rejected {
            let status_changed =
                !new_status.is_empty() && normalize(&new_status) != normalize(&existing.status);
            let position_changed =
                !new_position.is_empty() && new_position != existing.position.trim();
            match (status_changed, position_changed) {
                (true, true) => {
                    return Err(Error::Conflict(
                        "Cannot update status and position for rejected candidates".to_string(),
                    ))
                }
                (true, false) => {
                    return Err(Error::Conflict(
                        "Cannot update status for rejected candidates".to_string(),
                    ))
                }
                (false, true) => {
                    return Err(Error::Conflict(
                        "Cannot update position for rejected candidates".to_string(),
                    ))
                }
                (false, false) => {}
            }
        }

        let positions = self.positions().await?;
        let position = Self::find_live_position(&positions, &new_position)?;
        Self::require_live_status(&statuses, &new_status)?;

        let old_is_hired = is_hired_status(&existing.status);
        let new_is_hired = is_hired_status(&new_status);
        let needs_hiring_check =
            new_is_hired && (!old_is_hired || existing.position != new_position);

        if needs_hiring_check {
            let others: Vec<Candidate> =
                candidates.iter().filter(|c| c.id != id).cloned().collect();
            if is_hiring_limit_reached(&position.name, position.criteria, &others) {
                return Err(Error::Conflict(
                    "Hiring limit reached for this position".to_string(),
                ));
            }
        }
        if new_is_hired && new_flag != StatusFlag::Active {
            return Err(Error::Validation(
                "Status flag must be 'Active' for hired candidates".to_string(),
            ));
        }

        let mut file_id = existing.file_id.clone();
        if let Some((file_name, data)) = form.cv_file.clone() {
            if !existing.file_id.is_empty() {
                if let Err(e) = self.resumes.delete(&existing.file_id).await {
                    tracing::warn!(file = %existing.file_id, error = %e, "failed to delete old resume");
                }
            }
            file_id = self.resumes.upload(&file_name, data).await?;
        }

        let updated = Candidate {
            id: id.to_string(),
            name: form.name.trim().to_string(),
            position: position.name.clone(),
            experience: (
                default_zero(&form.experience_years),
                default_zero(&form.experience_months),
            ),
            phone_number: form.phone.trim().trim_start_matches('+').to_string(),
            email: form.email.trim().to_string(),
            current_salary: form.current_salary.trim().to_string(),
            expected_salary: form.expected_salary.trim().to_string(),
            notice_period: form.notice_period.trim().to_string(),
            status: new_status.clone(),
            status_flag: new_flag,
            linkedin: form.linkedin.trim().to_string(),
            reference: form.reference.trim().to_string(),
            comments: form.comments.trim().to_string(),
            file_id,
            is_deleted: existing.is_deleted,
            entry_date: existing.entry_date.clone(),
            status_history: existing.status_history.clone(),
        };

        self.store
            .update_row(Sheet::Candidates, id, updated.to_row())
            .await?;

        if normalize(&existing.status) != normalize(&new_status) {
            if let Err(e) = self
                .history
                .append(id, &existing.status, &new_status, actor)
                .await
            {
                tracing::error!(candidate = %id, error = %e, "failed to log status history");
            }
        }

        Ok(updated)
    }

    /// Field-level status transition: progression, hiring limit, and the
    /// rejected freeze all apply, and the change lands in history.
    pub async fn update_status(&self, id: &str, raw_status: &str, actor: &str) -> Result<()> {
        let lock = self.write_locks.handle(Sheet::Candidates.name());
        let _guard = lock.lock().await;

        let candidates = self.list().await?;
        let existing = candidates
            .iter()
            .find(|c| c.id == id && c.is_deleted == 0)
            .cloned()
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let new_status = to_standard_title_case(raw_status);
        if normalize(&existing.status) == normalize(&new_status) {
            return Ok(());
        }

        if existing.status_flag == StatusFlag::Rejected {
            return Err(Error::Conflict(
                "Cannot update status for rejected candidates".to_string(),
            ));
        }

        let statuses = self.statuses().await?;
        validate_status_progression(&existing.status, &new_status, &statuses)
            .map_err(Error::Conflict)?;
        Self::require_live_status(&statuses, &new_status)?;

        if is_hired_status(&new_status) && !is_hired_status(&existing.status) {
            let positions = self.positions().await?;
            let position = Self::find_live_position(&positions, &existing.position)?;
            let others: Vec<Candidate> =
                candidates.iter().filter(|c| c.id != id).cloned().collect();
            if is_hiring_limit_reached(&position.name, position.criteria, &others) {
                return Err(Error::Conflict(
                    "Hiring limit reached for this position".to_string(),
                ));
            }
            if existing.status_flag != StatusFlag::Active {
                return Err(Error::Validation(
                    "Status flag must be 'Active' for hired candidates".to_string(),
                ));
            }
        }

        self.store
            .update_cell(
                Sheet::Candidates,
                id,
                candidate::col::STATUS,
                new_status.clone(),
            )
            .await?;
        self.history
            .append(id, &existing.status, &new_status, actor)
            .await?;
        Ok(())
    }

    /// Status overwrite used by rename propagation. A rename is not a
    /// workflow transition, so the progression policy does not apply; the
    /// change is still recorded in history for audit continuity.
    pub(crate) async fn set_status_for_rename(
        &self,
        id: &str,
        new_status: &str,
        actor: &str,
    ) -> Result<()> {
        let candidate = self.get(id).await?;
        if normalize(&candidate.status) == normalize(new_status) {
            return Ok(());
        }

        self.store
            .update_cell(
                Sheet::Candidates,
                id,
                candidate::col::STATUS,
                new_status.to_string(),
            )
            .await?;
        self.history
            .append(id, &candidate.status, new_status, actor)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, id: &str) -> Result<()> {
        self.store
            .update_cell(Sheet::Candidates, id, candidate::col::IS_DELETED, "1".into())
            .await
    }

    pub async fn restore(&self, id: &str) -> Result<()> {
        self.store
            .update_cell(Sheet::Candidates, id, candidate::col::IS_DELETED, "0".into())
            .await
    }

    /// Erases the row and, best-effort, the attached résumé file.
    pub async fn delete_permanent(&self, id: &str) -> Result<()> {
        let candidate = self.get(id).await?;

        if !candidate.file_id.trim().is_empty() {
            match self.resumes.delete(&candidate.file_id).await {
                Ok(()) => tracing::info!(file = %candidate.file_id, "deleted resume file"),
                Err(e) => {
                    tracing::warn!(file = %candidate.file_id, error = %e, "failed to delete resume file")
                }
            }
        }

        self.store.delete_row(Sheet::Candidates, id).await?;
        self.history.invalidate(id).await;
        Ok(())
    }

    /// Rewrites the position field of every live candidate holding the
    /// old name. Per-item failures are tallied, not fatal.
    pub async fn bulk_update_position(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<(usize, usize)> {
        let candidates = self.list().await?;
        let targets: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| c.position == old_name && c.is_deleted == 0)
            .collect();

        let results = join_all(targets.iter().map(|c| {
            self.store.update_cell(
                Sheet::Candidates,
                &c.id,
                candidate::col::POSITION,
                new_name.to_string(),
            )
        }))
        .await;

        let updated = results.iter().filter(|r| r.is_ok()).count();
        let failed = results.len() - updated;
        if failed > 0 {
            tracing::warn!(
                old = old_name,
                new = new_name,
                failed,
                "position rename partially failed"
            );
        }
        Ok((updated, failed))
    }

    /// Rewrites the status field of every live candidate holding the old
    /// name, appending a synthetic history entry per candidate.
    pub async fn bulk_update_status(
        &self,
        old_name: &str,
        new_name: &str,
        actor: &str,
    ) -> Result<(usize, usize)> {
        let candidates = self.list().await?;
        let targets: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| normalize(&c.status) == normalize(old_name) && c.is_deleted == 0)
            .collect();

        let results = join_all(
            targets
                .iter()
                .map(|c| self.set_status_for_rename(&c.id, new_name, actor)),
        )
        .await;

        let updated = results.iter().filter(|r| r.is_ok()).count();
        let failed = results.len() - updated;
        if failed > 0 {
            tracing::warn!(
                old = old_name,
                new = new_name,
                failed,
                "status rename partially failed"
            );
        }
        Ok((updated, failed))
    }
}

fn default_zero(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
