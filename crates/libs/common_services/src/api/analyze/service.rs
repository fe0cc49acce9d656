use crate::api::analyze::error::{AnalyzeError, classify};
use crate::api::analyze::interfaces::AnalysisRequest;
use app_state::AnalysisSettings;
use common_types::{AnalysisMode, AnalysisResponse, NicheSummary};
use language_model::VisionModel;
use ml_analysis::{
    MetadataContext, ThumbnailImage, build_prompt, compute_metadata, judge_thumbnail,
    niche_summaries, normalize_reply, resolve_niche,
};
use tracing::{info, instrument};

/// Run one analysis: niche lookup, prompt, single model call, normalization, metadata.
///
/// Provider failures come back classified. A malformed reply is never an error,
/// it is absorbed by the normalizer.
#[instrument(skip(model, settings, request), fields(title = %request.title, niche = ?request.niche_id))]
pub async fn analyze_thumbnail(
    model: &dyn VisionModel,
    settings: &AnalysisSettings,
    request: AnalysisRequest,
    mode: AnalysisMode,
) -> Result<AnalysisResponse, AnalyzeError> {
    if !model.is_configured() {
        return Err(AnalyzeError::NotConfigured);
    }

    let niche = resolve_niche(request.niche_id.as_deref());
    let prompt = build_prompt(&request.title, niche, mode);
    let image = ThumbnailImage {
        bytes: &request.image_bytes,
        mime_type: &request.image_mime_type,
    };

    let reply = judge_thumbnail(model, settings, &prompt, image, mode)
        .await
        .map_err(|e| classify(e, mode))?;

    let result = normalize_reply(&reply.raw_text, mode);
    let metadata = compute_metadata(
        &reply,
        &MetadataContext {
            mode,
            image_bytes: request.image_bytes.len(),
            niche,
            cost_per_token: settings.cost_per_token,
        },
    );

    info!(
        "✅ {} analysis: score {}, {} tokens, ~${:.5}, {}ms",
        metadata.analysis_type,
        result.score(),
        metadata.tokens_used,
        metadata.estimated_cost,
        metadata.processing_time
    );
    Ok(AnalysisResponse { result, metadata })
}

#[must_use]
pub fn list_niches() -> Vec<NicheSummary> {
    niche_summaries()
}
