use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkIdsPayload {
    #[validate(length(min = 1))]
    pub ids: Vec<String>,
}

/// Bulk trash outcome: per-item failures are tallied, not fatal, so both
/// counts go back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkActionResponse {
    pub success: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}
