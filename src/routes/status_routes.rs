use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::dto::position_dto::CascadeDeleteResponse;
use crate::dto::status_dto::{StatusPayload, StatusUpdateResponse};
use crate::dto::{ActionResponse, SuccessResponse};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_statuses(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let statuses = state.status_service.list().await?;
    Ok(Json(serde_json::to_value(statuses)?))
}

#[utoipa::path(
    post,
    path = "/api/statuses",
    request_body = StatusPayload,
    responses(
        (status = 201, description = "Status created", body = ActionResponse),
        (status = 400, description = "Validation failure or duplicate name/color")
    )
)]
#[axum::debug_handler]
pub async fn create_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusPayload>,
) -> Result<(StatusCode, Json<ActionResponse>)> {
    payload.validate()?;
    state.status_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Status added successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/statuses/{id}",
    params(("id" = String, Path, description = "Status ID")),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated; reports rename fan-out", body = StatusUpdateResponse),
        (status = 400, description = "Validation failure or duplicate name/color"),
        (status = 404, description = "Status not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<StatusUpdateResponse>> {
    payload.validate()?;
    let outcome = state.status_service.update(&id, payload).await?;

    let mut updated_candidates = 0;
    if let Some(old_name) = outcome.renamed_from {
        updated_candidates = state
            .cascade_service
            .propagate_status_rename(&old_name, &outcome.status.name, &claims.actor())
            .await?;
    }

    Ok(Json(StatusUpdateResponse {
        success: true,
        message: "Status updated successfully".to_string(),
        updated_candidates,
    }))
}

#[axum::debug_handler]
pub async fn soft_delete_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.cascade_service.soft_delete_status(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn restore_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.status_service.set_deleted(&id, false).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/api/statuses/{id}",
    params(("id" = String, Path, description = "Status ID")),
    responses(
        (status = 200, description = "Status erased; reports cascaded candidate deletions", body = CascadeDeleteResponse),
        (status = 404, description = "Status not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CascadeDeleteResponse>> {
    let deleted_candidates = state.cascade_service.permanent_delete_status(&id).await?;
    Ok(Json(CascadeDeleteResponse {
        success: true,
        deleted_candidates,
    }))
}
