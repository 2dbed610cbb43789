//! sparktrack-server
//!
//! The HTTP API behind the SparkTrack evaluation forms. Every `/api` route
//! except login and validation requires a signature-verified bearer token.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use sparktrack_core::api_paths;

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route(api_paths::HEALTH, get(routes::health::health_check))
        .route(api_paths::LOGIN, post(routes::auth::login))
        .route(api_paths::VALIDATE, post(routes::auth::validate));

    let protected = Router::new()
        // Deadlines
        .route(api_paths::DEADLINES, get(routes::deadlines::list_deadlines))
        .route("/api/deadlines/{key}", put(routes::deadlines::set_deadline))
        .route(api_paths::ACTIVE_REVIEW, get(routes::deadlines::active_review))
        // Groups
        .route(api_paths::GROUPS, get(routes::groups::list_groups))
        .route("/api/groups/{group_id}", get(routes::groups::get_group))
        .route(api_paths::ADMIN_GROUPS, post(routes::groups::create_group))
        // Evaluations
        .route("/api/evaluation/pbl1/{group_id}", get(routes::evaluations::get_pbl1))
        .route("/api/evaluation/pbl2/{group_id}", get(routes::evaluations::get_pbl2))
        .route(
            "/api/evaluation/review2/group/{group_id}",
            get(routes::evaluations::get_pbl2),
        )
        .route("/api/pbl3/evaluation/{group_id}", get(routes::evaluations::get_pbl3))
        .route(
            "/api/mentor/students/{group_id}",
            get(routes::evaluations::get_mentor_students),
        )
        .route("/api/evaluation/pbl1", post(routes::evaluations::submit_pbl1))
        .route(
            "/api/evaluation/pbl2/save-evaluation",
            post(routes::evaluations::submit_pbl2),
        )
        .route("/api/pbl3/evaluation/save", post(routes::evaluations::submit_pbl3))
        .route(api_paths::MENTOR_EVALUATION, post(routes::evaluations::submit_mentor))
        // Problem statements
        .route(
            "/api/mentor/problem-statement/{group_id}",
            get(routes::problem_statements::get_problem_statement)
                .put(routes::problem_statements::put_problem_statement),
        )
        // Export
        .route(
            "/api/admin/evaluations/{review}/export",
            get(routes::export::export_evaluations),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
