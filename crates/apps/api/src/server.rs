use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::Router;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use http::{HeaderValue, Method, header};
use language_model::{ChatClient, VisionModel};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Build the full application around a vision model.
pub fn create_app(settings: AppSettings, model: Arc<dyn VisionModel>) -> Router {
    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);
    // No configured origin means any origin.
    let cors = if allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        cors.allow_origin(allowed_origins)
    };

    let api_state = ApiContext { settings, model };
    create_router(api_state)
        .layer(TraceLayer::new_for_http().on_request(()))
        .layer(cors)
}

pub async fn serve(settings: AppSettings) -> Result<()> {
    // --- Server Startup ---
    info!("🚀 Initializing server...");
    if settings.secrets.openai_api_key.is_none() {
        warn!("No OpenAI API key configured, analysis requests will fail until one is set");
    }

    let model: Arc<dyn VisionModel> = Arc::new(
        ChatClient::with_base_url(&settings.analysis.base_url)
            .model(settings.analysis.model.clone())
            .maybe_api_key(settings.secrets.openai_api_key.clone())
            .http(reqwest::Client::new())
            .build(),
    );

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;

    let app = create_app(settings, model);
    let listener = TcpListener::bind(addr).await?;
    info!("🐸 Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
