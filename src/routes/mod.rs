pub mod candidate_routes;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod position_routes;
pub mod status_routes;
pub mod trash_routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::middleware::{auth, rate_limit};
use crate::AppState;

/// Full application router: `/health` open, everything under `/api`
/// bearer-authenticated and rate-limited.
pub fn app_router(state: AppState, rps: u32) -> Router {
    let api = Router::new()
        .route(
            "/api/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            put(candidate_routes::update_candidate).delete(candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/status",
            post(candidate_routes::update_candidate_status),
        )
        .route(
            "/api/candidates/:id/history",
            get(candidate_routes::get_candidate_history),
        )
        .route(
            "/api/candidates/:id/soft",
            delete(candidate_routes::soft_delete_candidate),
        )
        .route(
            "/api/candidates/:id/restore",
            post(candidate_routes::restore_candidate),
        )
        .route(
            "/api/positions",
            get(position_routes::list_positions).post(position_routes::create_position),
        )
        .route(
            "/api/positions/:id",
            put(position_routes::update_position).delete(position_routes::delete_position),
        )
        .route(
            "/api/positions/:id/soft",
            delete(position_routes::soft_delete_position),
        )
        .route(
            "/api/positions/:id/restore",
            post(position_routes::restore_position),
        )
        .route(
            "/api/statuses",
            get(status_routes::list_statuses).post(status_routes::create_status),
        )
        .route(
            "/api/statuses/:id",
            put(status_routes::update_status).delete(status_routes::delete_status),
        )
        .route(
            "/api/statuses/:id/soft",
            delete(status_routes::soft_delete_status),
        )
        .route(
            "/api/statuses/:id/restore",
            post(status_routes::restore_status),
        )
        .route("/api/trash/candidates", get(trash_routes::list_trash))
        .route("/api/trash/restore", post(trash_routes::restore_bulk))
        .route("/api/trash/delete", post(trash_routes::delete_bulk))
        .route("/api/dashboard/stats", get(dashboard::get_dashboard_stats))
        .route("/api/extract-pdf", post(extract::extract_pdf))
        .layer(axum::middleware::from_fn(auth::require_bearer_auth))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(rps),
            rate_limit::rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
}
