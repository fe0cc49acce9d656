use crate::{ApiSettings, GenerationSettings, LoggingSettings, RawSettings};
use common_types::AnalysisMode;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub base_url: String,
    pub model: String,
    pub image_detail: String,
    pub cost_per_token: f64,
    pub max_image_bytes: usize,
    pub max_title_chars: usize,
    pub expert: GenerationSettings,
    pub niche: GenerationSettings,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SecretSettings {
    /// `None` when no usable key was configured.
    pub openai_api_key: Option<String>,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let openai_api_key = raw
            .secrets
            .openai_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let analysis = raw.analysis;

        Self {
            analysis: AnalysisSettings {
                base_url: analysis.base_url.trim_end_matches('/').to_string(),
                model: analysis.model,
                image_detail: analysis.image_detail,
                cost_per_token: analysis.cost_per_token,
                max_image_bytes: analysis.max_image_bytes,
                max_title_chars: analysis.max_title_chars,
                expert: analysis.expert,
                niche: analysis.niche,
            },
            logging: raw.logging,
            api: raw.api,
            secrets: SecretSettings { openai_api_key },
        }
    }
}

impl AnalysisSettings {
    #[must_use]
    pub const fn generation(&self, mode: AnalysisMode) -> GenerationSettings {
        match mode {
            AnalysisMode::Expert => self.expert,
            AnalysisMode::Niche => self.niche,
        }
    }

    /// The image limit in whole MiB, as shown to users.
    #[must_use]
    pub const fn max_image_mib(&self) -> usize {
        self.max_image_bytes / (1024 * 1024)
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            image_detail: "low".to_string(),
            cost_per_token: 0.000_002_5,
            max_image_bytes: 20 * 1024 * 1024,
            max_title_chars: 100,
            expert: GenerationSettings {
                max_tokens: 800,
                temperature: 0.3,
                top_p: 0.9,
            },
            niche: GenerationSettings {
                max_tokens: 500,
                temperature: 0.3,
                top_p: 0.9,
            },
        }
    }
}
