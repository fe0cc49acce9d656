use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub analysis: RawAnalysisSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: RawSecretSettings,
}

/// Thumbnail analysis pipeline settings, as written in `config/settings.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct RawAnalysisSettings {
    /// Root of the OpenAI-compatible API, without the `/v1/...` path.
    pub base_url: String,
    pub model: String,
    /// Detail hint sent along with the image ("low", "high" or "auto").
    pub image_detail: String,
    /// Price of a single token in USD.
    pub cost_per_token: f64,
    /// Hard upload limit for the image, in bytes.
    pub max_image_bytes: usize,
    /// Maximum title length in characters, after trimming.
    pub max_title_chars: usize,
    pub expert: GenerationSettings,
    pub niche: GenerationSettings,
}

/// Sampling parameters for one analysis mode.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawSecretSettings {
    #[serde(default)]
    pub openai_api_key: Option<String>,
}
