use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StatusPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub color: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl StatusPayload {
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "updatedCandidates")]
    pub updated_candidates: usize,
}
