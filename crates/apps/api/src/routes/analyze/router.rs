use crate::analyze::handlers::{analyze_expert_handler, analyze_niche_handler, list_niches_handler};
use crate::api_state::ApiContext;
use axum::Router;
use axum::routing::{get, post};

pub fn analyze_public_router() -> Router<ApiContext> {
    Router::new()
        .route("/analyze", post(analyze_expert_handler))
        .route("/analyze/niche", post(analyze_niche_handler))
        .route("/niches", get(list_niches_handler))
}
