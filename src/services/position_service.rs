use std::sync::Arc;

use crate::dto::position_dto::PositionPayload;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::position::{self, Position};
use crate::store::locks::KeyedLocks;
use crate::store::{RowStore, Sheet};
use crate::utils::duplicates::is_duplicate_position_name;
use crate::utils::hiring::hired_count_for_position;
use crate::utils::validation;

#[derive(Clone)]
pub struct PositionService {
    store: Arc<dyn RowStore>,
    write_locks: Arc<KeyedLocks>,
}

/// Outcome of a position edit; the route cascades the rename when
/// `renamed_from` is set.
pub struct PositionUpdate {
    pub position: Position,
    pub renamed_from: Option<String>,
}

impl PositionService {
    pub fn new(store: Arc<dyn RowStore>, write_locks: Arc<KeyedLocks>) -> Self {
        Self { store, write_locks }
    }

    pub async fn list(&self) -> Result<Vec<Position>> {
        let rows = self.store.list(Sheet::Positions).await?;
        Ok(rows.iter().map(Position::from_row).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Position> {
        self.list()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound("Position not found".to_string()))
    }

    async fn candidates(&self) -> Result<Vec<Candidate>> {
        let rows = self.store.list(Sheet::Candidates).await?;
        Ok(rows.iter().map(Candidate::from_row).collect())
    }

    fn field(check: validation::FieldResult) -> Result<()> {
        check.map_err(Error::Validation)
    }

    pub async fn create(&self, payload: PositionPayload) -> Result<Position> {
        Self::field(validation::validate_position_name(&payload.name))?;
        if payload.department().trim().is_empty() {
            return Err(Error::Validation("Department is required".to_string()));
        }
        Self::field(validation::validate_department(&payload.department()))?;
        let criteria =
            validation::validate_criteria(&payload.criteria()).map_err(Error::Validation)?;

        let lock = self.write_locks.handle(Sheet::Positions.name());
        let _guard = lock.lock().await;

        let positions = self.list().await?;
        if is_duplicate_position_name(payload.name.trim(), &positions, None) {
            return Err(Error::Conflict("Position name already exists".to_string()));
        }

        let new_position = Position {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            description: payload.description().trim().to_string(),
            department: payload.department().trim().to_string(),
            criteria,
            is_deleted: 0,
        };

        self.store
            .append(Sheet::Positions, new_position.to_row())
            .await?;
        tracing::info!(position = %new_position.name, "position created");
        Ok(new_position)
    }

    pub async fn update(&self, id: &str, payload: PositionPayload) -> Result<PositionUpdate> {
        Self::field(validation::validate_position_name(&payload.name))?;
        Self::field(validation::validate_department(&payload.department()))?;
        let criteria =
            validation::validate_criteria(&payload.criteria()).map_err(Error::Validation)?;

        let lock = self.write_locks.handle(Sheet::Positions.name());
        let _guard = lock.lock().await;

        let positions = self.list().await?;
        let existing = positions
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Position not found".to_string()))?;

        let new_name = payload.name.trim().to_string();
        if is_duplicate_position_name(&new_name, &positions, Some(id)) {
            return Err(Error::Conflict("Position name already exists".to_string()));
        }

        // Lowering capacity below the current hired head-count would break
        // the limit invariant retroactively. Candidates still reference
        // the old name mid-rename, so count against it.
        if let Some(new_criteria) = criteria {
            let candidates = self.candidates().await?;
            let name_to_check = if new_name != existing.name {
                existing.name.as_str()
            } else {
                new_name.as_str()
            };
            let hired = hired_count_for_position(name_to_check, &candidates);
            if (new_criteria as usize) < hired {
                let verb = if hired == 1 { " is" } else { "s are" };
                return Err(Error::Conflict(format!(
                    "Cannot set vacancies to {}. Currently {} candidate{} already hired for this position. Please set vacancies to at least {} or higher.",
                    new_criteria, hired, verb, hired
                )));
            }
        }

        let updated = Position {
            id: id.to_string(),
            name: new_name.clone(),
            description: payload.description().trim().to_string(),
            department: payload.department().trim().to_string(),
            criteria,
            is_deleted: existing.is_deleted,
        };

        self.store
            .update_row(Sheet::Positions, id, updated.to_row())
            .await?;

        let renamed_from = (new_name != existing.name).then(|| existing.name.clone());
        Ok(PositionUpdate {
            position: updated,
            renamed_from,
        })
    }

    pub async fn set_deleted(&self, id: &str, deleted: bool) -> Result<()> {
        self.store
            .update_cell(
                Sheet::Positions,
                id,
                position::col::IS_DELETED,
                if deleted { "1" } else { "0" }.to_string(),
            )
            .await
    }

    pub async fn delete_row(&self, id: &str) -> Result<()> {
        self.store.delete_row(Sheet::Positions, id).await
    }
}
