use axum::{extract::State, Json};

use crate::dto::dashboard_dto::{DashboardStats, FlagTotals, StatusCount};
use crate::error::Result;
use crate::models::candidate::StatusFlag;
use crate::utils::text::normalize;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Per-status counts and flag totals over live candidates", body = DashboardStats)
    )
)]
#[axum::debug_handler]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let candidates = state.candidate_service.list().await?;
    let statuses = state.status_service.list().await?;

    let live: Vec<_> = candidates.iter().filter(|c| c.is_deleted == 0).collect();

    let by_status = statuses
        .iter()
        .filter(|s| s.is_deleted == 0)
        .map(|s| StatusCount {
            name: s.name.clone(),
            color: s.color.clone(),
            count: live
                .iter()
                .filter(|c| normalize(&c.status) == normalize(&s.name))
                .count(),
        })
        .collect();

    let mut by_flag = FlagTotals::default();
    for candidate in &live {
        match candidate.status_flag {
            StatusFlag::Active => by_flag.active += 1,
            StatusFlag::OnHold => by_flag.on_hold += 1,
            StatusFlag::Rejected => by_flag.rejected += 1,
        }
    }

    Ok(Json(DashboardStats {
        total_candidates: live.len(),
        by_status,
        by_flag,
    }))
}
