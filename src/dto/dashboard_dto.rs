use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub name: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FlagTotals {
    pub active: usize,
    #[serde(rename = "onHold")]
    pub on_hold: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "byStatus")]
    pub by_status: Vec<StatusCount>,
    #[serde(rename = "byFlag")]
    pub by_flag: FlagTotals,
}
