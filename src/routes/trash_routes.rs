use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::trash_dto::{BulkActionResponse, BulkIdsPayload};
use crate::error::Result;
use crate::services::trash_service::BulkOutcome;
use crate::AppState;

fn bulk_response(outcome: BulkOutcome) -> BulkActionResponse {
    BulkActionResponse {
        success: true,
        succeeded: outcome.succeeded,
        failed: outcome.failed,
        total: outcome.total,
    }
}

#[axum::debug_handler]
pub async fn list_trash(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let candidates = state.trash_service.deleted_candidates().await?;
    Ok(Json(serde_json::to_value(candidates)?))
}

#[utoipa::path(
    post,
    path = "/api/trash/restore",
    request_body = BulkIdsPayload,
    responses(
        (status = 200, description = "Bulk restore outcome with per-item tallies", body = BulkActionResponse)
    )
)]
#[axum::debug_handler]
pub async fn restore_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkIdsPayload>,
) -> Result<Json<BulkActionResponse>> {
    payload.validate()?;
    let outcome = state.trash_service.restore_many(&payload.ids).await;
    Ok(Json(bulk_response(outcome)))
}

#[utoipa::path(
    post,
    path = "/api/trash/delete",
    request_body = BulkIdsPayload,
    responses(
        (status = 200, description = "Bulk permanent-delete outcome with per-item tallies", body = BulkActionResponse)
    )
)]
#[axum::debug_handler]
pub async fn delete_bulk(
    State(state): State<AppState>,
    Json(payload): Json<BulkIdsPayload>,
) -> Result<Json<BulkActionResponse>> {
    payload.validate()?;
    let outcome = state.trash_service.delete_many(&payload.ids).await;
    Ok(Json(bulk_response(outcome)))
}
