use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Create/edit payload for a position. `criteria` stays a string so the
/// domain validator owns the parse and its error message.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PositionPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub department: Option<String>,
    pub criteria: Option<String>,
}

impl PositionPayload {
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    pub fn department(&self) -> String {
        self.department.clone().unwrap_or_default()
    }

    pub fn criteria(&self) -> String {
        self.criteria.clone().unwrap_or_default()
    }
}

/// Edit response; `updatedCandidates` reports the rename fan-out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "updatedCandidates")]
    pub updated_candidates: usize,
}

/// Permanent-delete response; `deletedCandidates` reports the cascade.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CascadeDeleteResponse {
    pub success: bool,
    #[serde(rename = "deletedCandidates")]
    pub deleted_candidates: usize,
}
