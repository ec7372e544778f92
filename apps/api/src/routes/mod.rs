pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::auth;
use crate::leads::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Listing and mutation routes sit behind the bearer-token gate; the
    // public intake and login routes do not.
    let protected = Router::new()
        .route("/api/v1/leads", get(handlers::list_leads))
        .route("/api/v1/leads/:id", get(handlers::get_lead))
        .route("/api/v1/leads/:id/resume", get(handlers::download_resume))
        .route(
            "/api/v1/leads/:id/reached-out",
            patch(handlers::mark_reached_out).put(handlers::mark_reached_out),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    // Allow some multipart framing overhead beyond the resume cap itself;
    // the precise limit is enforced during validation.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/leads", post(handlers::submit_lead))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
