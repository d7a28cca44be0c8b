pub mod candidate_dto;
pub mod dashboard_dto;
pub mod position_dto;
pub mod status_dto;
pub mod trash_dto;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard mutation acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
