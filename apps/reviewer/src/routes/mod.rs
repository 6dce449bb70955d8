pub mod health;
pub mod login;
pub mod review;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::require_session;
use crate::state::AppState;

/// Headroom above the file size cap for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let protected = Router::new()
        .route("/", get(review::handle_home))
        .route("/upload", post(review::handle_upload))
        .route("/analyze", post(review::handle_analyze))
        .route("/report/pdf", get(review::handle_report_pdf))
        .route("/report/wordcloud.png", get(review::handle_report_wordcloud))
        .route("/logout", post(login::handle_logout))
        // JSON API
        .route("/api/v1/analyze", post(review::handle_api_analyze))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/login",
            get(login::handle_login_page).post(login::handle_login),
        )
        .merge(protected)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
