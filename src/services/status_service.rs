use std::sync::Arc;

use crate::dto::status_dto::StatusPayload;
use crate::error::{Error, Result};
use crate::models::status::{self, Status};
use crate::store::locks::KeyedLocks;
use crate::store::{RowStore, Sheet};
use crate::utils::duplicates::{is_duplicate_status_color, is_duplicate_status_name};
use crate::utils::validation;

#[derive(Clone)]
pub struct StatusService {
    store: Arc<dyn RowStore>,
    write_locks: Arc<KeyedLocks>,
}

/// Outcome of a status edit; the route cascades the rename (including the
/// synthetic history entries) when `renamed_from` is set.
pub struct StatusUpdate {
    pub status: Status,
    pub renamed_from: Option<String>,
}

impl StatusService {
    pub fn new(store: Arc<dyn RowStore>, write_locks: Arc<KeyedLocks>) -> Self {
        Self { store, write_locks }
    }

    pub async fn list(&self) -> Result<Vec<Status>> {
        let rows = self.store.list(Sheet::Statuses).await?;
        Ok(rows.iter().map(Status::from_row).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Status> {
        self.list()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::NotFound("Status not found".to_string()))
    }

    fn field(check: validation::FieldResult) -> Result<()> {
        check.map_err(Error::Validation)
    }

    fn check_collisions(
        statuses: &[Status],
        name: &str,
        color: &str,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if is_duplicate_status_name(name, statuses, exclude_id) {
            return Err(Error::Conflict("Status name already exists".to_string()));
        }
        if is_duplicate_status_color(color, statuses, exclude_id) {
            return Err(Error::Conflict(
                "Status color already exists. Please choose a different color".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create(&self, payload: StatusPayload) -> Result<Status> {
        Self::field(validation::validate_status_name(&payload.name))?;
        Self::field(validation::validate_hex_color(&payload.color))?;

        let lock = self.write_locks.handle(Sheet::Statuses.name());
        let _guard = lock.lock().await;

        let statuses = self.list().await?;
        Self::check_collisions(&statuses, payload.name.trim(), payload.color.trim(), None)?;

        let new_status = Status {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            color: payload.color.trim().to_string(),
            description: payload.description().trim().to_string(),
            is_deleted: 0,
        };

        self.store
            .append(Sheet::Statuses, new_status.to_row())
            .await?;
        tracing::info!(status = %new_status.name, "status created");
        Ok(new_status)
    }

    pub async fn update(&self, id: &str, payload: StatusPayload) -> Result<StatusUpdate> {
        Self::field(validation::validate_status_name(&payload.name))?;
        Self::field(validation::validate_hex_color(&payload.color))?;

        let lock = self.write_locks.handle(Sheet::Statuses.name());
        let _guard = lock.lock().await;

        let statuses = self.list().await?;
        let existing = statuses
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Status not found".to_string()))?;

        let new_name = payload.name.trim().to_string();
        Self::check_collisions(&statuses, &new_name, payload.color.trim(), Some(id))?;

        let updated = Status {
            id: id.to_string(),
            name: new_name.clone(),
            color: payload.color.trim().to_string(),
            description: payload.description().trim().to_string(),
            is_deleted: existing.is_deleted,
        };

        self.store
            .update_row(Sheet::Statuses, id, updated.to_row())
            .await?;

        let renamed_from = (new_name != existing.name).then(|| existing.name.clone());
        Ok(StatusUpdate {
            status: updated,
            renamed_from,
        })
    }

    pub async fn set_deleted(&self, id: &str, deleted: bool) -> Result<()> {
        self.store
            .update_cell(
                Sheet::Statuses,
                id,
                status::col::IS_DELETED,
                if deleted { "1" } else { "0" }.to_string(),
            )
            .await
    }

    pub async fn delete_row(&self, id: &str) -> Result<()> {
        self.store.delete_row(Sheet::Statuses, id).await
    }
}
