use crate::ModelResult;
use async_trait::async_trait;

/// Sampling parameters sent with a single completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// One prompt plus one image.
#[derive(Debug, Clone, Copy)]
pub struct VisionRequest<'a> {
    pub prompt: &'a str,
    pub image: &'a [u8],
    pub mime_type: &'a str,
    /// Fidelity hint for the image ("low", "high", "auto").
    pub detail: &'a str,
    pub params: GenerationParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub total_tokens: u64,
}

/// A multimodal model that answers a prompt about an image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Whether credentials are available. Requests are refused up front when this is false.
    fn is_configured(&self) -> bool {
        true
    }

    /// Single attempt, no retries.
    async fn complete(&self, request: VisionRequest<'_>) -> ModelResult<Completion>;
}
