pub mod analyze;
mod api_doc;
pub mod root;

use crate::analyze::router::analyze_public_router;
use crate::api_state::ApiContext;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

/// Room left in a request body for the multipart framing and text fields.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let body_limit = api_state.settings.analysis.max_image_bytes + FORM_OVERHEAD_BYTES;
    Router::new()
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(root_public_router())
        .merge(analyze_public_router().layer(DefaultBodyLimit::max(body_limit)))
        .with_state(api_state)
}
