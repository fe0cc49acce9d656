use crate::ModelReply;
use common_types::{AnalysisMetadata, AnalysisMode, NicheDescriptor};

/// Request facts the metadata needs besides the model reply.
#[derive(Debug, Clone, Copy)]
pub struct MetadataContext<'a> {
    pub mode: AnalysisMode,
    pub image_bytes: usize,
    pub niche: &'a NicheDescriptor,
    /// USD per token.
    pub cost_per_token: f64,
}

#[must_use]
pub fn compute_metadata(reply: &ModelReply, context: &MetadataContext<'_>) -> AnalysisMetadata {
    let (image_size, niche) = match context.mode {
        AnalysisMode::Expert => (Some(image_size_kb(context.image_bytes)), None),
        AnalysisMode::Niche => (None, Some(context.niche.id.to_string())),
    };

    AnalysisMetadata {
        processing_time: reply.elapsed_millis,
        tokens_used: reply.tokens_used,
        estimated_cost: estimate_cost(reply.tokens_used, context.cost_per_token),
        analysis_type: context.mode.analysis_type().to_string(),
        image_size,
        niche,
    }
}

/// Token cost in USD, rounded to 5 decimals.
#[must_use]
pub fn estimate_cost(tokens_used: u64, cost_per_token: f64) -> f64 {
    (tokens_used as f64 * cost_per_token * 100_000.0).round() / 100_000.0
}

/// Size in KiB, rounded to the nearest integer.
#[must_use]
pub fn image_size_kb(bytes: usize) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}
