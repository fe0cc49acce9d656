use crate::api_state::ApiContext;
use app_state::AnalysisSettings;
use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use common_services::api::analyze::error::AnalyzeError;
use common_services::api::analyze::interfaces::{AnalysisUpload, AnalyzeForm, UploadedImage};
use common_services::api::analyze::service::{analyze_thumbnail, list_niches};
use common_types::{AnalysisMode, AnalysisResponse, NicheSummary};
use tracing::{debug, instrument};

/// Expert analysis of a thumbnail and its title.
///
/// # Errors
///
/// Returns an `AnalyzeError` for invalid input or when the vision provider fails.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Analysis",
    request_body(content = AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Expert analysis with visual factors.", body = AnalysisResponse),
        (status = 400, description = "Image or title missing, or too large."),
        (status = 402, description = "Provider quota exceeded."),
        (status = 429, description = "Provider rate limit reached."),
        (status = 500, description = "Provider not configured or analysis failed."),
        (status = 503, description = "Provider unreachable."),
    )
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn analyze_expert_handler(
    State(context): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AnalyzeError> {
    run_analysis(&context, multipart, AnalysisMode::Expert).await
}

/// Niche-aware analysis of a thumbnail and its title.
///
/// # Errors
///
/// Returns an `AnalyzeError` for invalid input or when the vision provider fails.
#[utoipa::path(
    post,
    path = "/analyze/niche",
    tag = "Analysis",
    request_body(content = AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Short analysis scored against the niche.", body = AnalysisResponse),
        (status = 400, description = "Image or title missing, or too large."),
        (status = 402, description = "Provider quota exceeded."),
        (status = 429, description = "Provider rate limit reached."),
        (status = 500, description = "Provider not configured or analysis failed."),
        (status = 503, description = "Provider unreachable."),
    )
)]
#[instrument(skip(context, multipart), err(Debug))]
pub async fn analyze_niche_handler(
    State(context): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AnalyzeError> {
    run_analysis(&context, multipart, AnalysisMode::Niche).await
}

/// List the niches a thumbnail can be judged against.
#[utoipa::path(
    get,
    path = "/niches",
    tag = "Analysis",
    responses(
        (status = 200, description = "Known niches, generic one first.", body = Vec<NicheSummary>),
    )
)]
pub async fn list_niches_handler() -> Json<Vec<NicheSummary>> {
    Json(list_niches())
}

async fn run_analysis(
    context: &ApiContext,
    multipart: Result<Multipart, MultipartRejection>,
    mode: AnalysisMode,
) -> Result<Json<AnalysisResponse>, AnalyzeError> {
    if !context.model.is_configured() {
        return Err(AnalyzeError::NotConfigured);
    }
    let settings = &context.settings.analysis;
    let multipart = multipart.map_err(|rejection| {
        debug!("Multipart rejected: {}", rejection);
        AnalyzeError::MissingInput
    })?;

    let request = read_upload(multipart, settings).await?.validate(settings)?;
    let response = analyze_thumbnail(context.model.as_ref(), settings, request, mode).await?;
    Ok(Json(response))
}

async fn read_upload(
    mut multipart: Multipart,
    settings: &AnalysisSettings,
) -> Result<AnalysisUpload, AnalyzeError> {
    let to_error = |e: MultipartError| multipart_error(&e, settings);
    let mut upload = AnalysisUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(to_error)? {
        let field_name = field.name().map(ToString::to_string);
        match field_name.as_deref() {
            Some("image") => {
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(to_error)?;
                upload.image = Some(UploadedImage {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            Some("title") => upload.title = Some(field.text().await.map_err(to_error)?),
            Some("niche") => {
                let niche = field.text().await.map_err(to_error)?;
                upload.niche = Some(niche.trim().to_string()).filter(|n| !n.is_empty());
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }
    Ok(upload)
}

fn multipart_error(error: &MultipartError, settings: &AnalysisSettings) -> AnalyzeError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalyzeError::ImageTooLarge {
            max_mib: settings.max_image_mib(),
        }
    } else {
        debug!("Unreadable multipart body: {}", error);
        AnalyzeError::MissingInput
    }
}
