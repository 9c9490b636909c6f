pub mod health;
pub mod page;
pub mod summarize;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Room for the pasted-text field and multipart framing on top of the file.
const FORM_OVERHEAD_BYTES: usize = 2 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let body_limit = state.config.upload.max_file_size_bytes() + FORM_OVERHEAD_BYTES;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/", get(page::index))
        .route("/api/health", get(health::health_check))
        .route("/api/summarize", post(summarize::summarize))
        .layer(DefaultBodyLimit::max(body_limit));

    #[cfg(feature = "openapi")]
    let router = {
        use utoipa::OpenApi;
        use utoipa_redoc::{Redoc, Servable};
        router.merge(Redoc::with_url("/api/docs", crate::openapi::ApiDoc::openapi()))
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
