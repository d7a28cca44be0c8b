use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::position_dto::{CascadeDeleteResponse, PositionPayload, PositionUpdateResponse};
use crate::dto::{ActionResponse, SuccessResponse};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_positions(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let positions = state.position_service.list().await?;
    Ok(Json(serde_json::to_value(positions)?))
}

#[utoipa::path(
    post,
    path = "/api/positions",
    request_body = PositionPayload,
    responses(
        (status = 201, description = "Position created", body = ActionResponse),
        (status = 400, description = "Validation failure or duplicate name")
    )
)]
#[axum::debug_handler]
pub async fn create_position(
    State(state): State<AppState>,
    Json(payload): Json<PositionPayload>,
) -> Result<(StatusCode, Json<ActionResponse>)> {
    payload.validate()?;
    state.position_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::ok("Position added successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/positions/{id}",
    params(("id" = String, Path, description = "Position ID")),
    request_body = PositionPayload,
    responses(
        (status = 200, description = "Position updated; reports rename fan-out", body = PositionUpdateResponse),
        (status = 400, description = "Validation failure, duplicate name, or capacity below hired count"),
        (status = 404, description = "Position not found")
    )
)]
#[axum::debug_handler]
pub async fn update_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PositionPayload>,
) -> Result<Json<PositionUpdateResponse>> {
    payload.validate()?;
    let outcome = state.position_service.update(&id, payload).await?;

    let mut updated_candidates = 0;
    if let Some(old_name) = outcome.renamed_from {
        updated_candidates = state
            .cascade_service
            .propagate_position_rename(&old_name, &outcome.position.name)
            .await?;
    }

    Ok(Json(PositionUpdateResponse {
        success: true,
        message: "Position updated successfully".to_string(),
        updated_candidates,
    }))
}

#[axum::debug_handler]
pub async fn soft_delete_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.cascade_service.soft_delete_position(&id).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[axum::debug_handler]
pub async fn restore_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.position_service.set_deleted(&id, false).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/api/positions/{id}",
    params(("id" = String, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position erased; reports cascaded candidate deletions", body = CascadeDeleteResponse),
        (status = 404, description = "Position not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_position(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CascadeDeleteResponse>> {
    let deleted_candidates = state.cascade_service.permanent_delete_position(&id).await?;
    Ok(Json(CascadeDeleteResponse {
        success: true,
        deleted_candidates,
    }))
}
