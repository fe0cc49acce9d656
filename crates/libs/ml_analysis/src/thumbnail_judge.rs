use app_state::AnalysisSettings;
use common_types::AnalysisMode;
use language_model::{GenerationParams, ModelResult, VisionModel, VisionRequest};
use std::time::Instant;
use tracing::info;

/// What the model said, how many tokens it cost and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    pub raw_text: String,
    pub tokens_used: u64,
    pub elapsed_millis: u64,
}

/// Image payload of an analysis request.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailImage<'a> {
    pub bytes: &'a [u8],
    pub mime_type: &'a str,
}

/// Ask the model about a thumbnail once, with the generation parameters of `mode`.
///
/// Provider errors are returned as they are, there is no retry.
pub async fn judge_thumbnail(
    model: &dyn VisionModel,
    settings: &AnalysisSettings,
    prompt: &str,
    image: ThumbnailImage<'_>,
    mode: AnalysisMode,
) -> ModelResult<ModelReply> {
    let generation = settings.generation(mode);
    let request = VisionRequest {
        prompt,
        image: image.bytes,
        mime_type: image.mime_type,
        detail: &settings.image_detail,
        params: GenerationParams {
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
            top_p: generation.top_p,
        },
    };

    info!(?mode, model = %settings.model, "🤖 Calling vision model");
    let start = Instant::now();
    let completion = model.complete(request).await?;
    let elapsed_millis = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    Ok(ModelReply {
        raw_text: completion.content,
        tokens_used: completion.total_tokens,
        elapsed_millis,
    })
}
