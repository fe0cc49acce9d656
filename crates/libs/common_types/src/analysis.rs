use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which analysis pipeline a request goes through. Chosen once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Detailed breakdown with visual factors, strengths and improvements.
    Expert,
    /// Lighter scoring tailored to a content niche.
    Niche,
}

impl AnalysisMode {
    /// Value of the `analysisType` metadata field.
    #[must_use]
    pub const fn analysis_type(self) -> &'static str {
        match self {
            Self::Expert => "qualitative-expert",
            Self::Niche => "niche",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualFactors {
    pub face_present: bool,
    /// neutre / souriant / choqué / surpris / absent
    pub emotion: String,
    /// rouge-jaune / bleu-vert / neutre / sombre
    pub color_scheme: String,
    /// Number of words written on the thumbnail.
    pub text_count: u32,
    pub mobile_friendly: bool,
    /// élevé / moyen / faible
    pub contrast: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpertAnalysis {
    /// Always within 1..=10.
    pub score: u8,
    pub ctr_estimate: String,
    pub analysis: String,
    pub visual_factors: VisualFactors,
    /// At most 3 entries.
    pub strengths: Vec<String>,
    /// At most 2 entries.
    pub improvements: Vec<String>,
    /// At most 3 entries.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NicheAnalysis {
    /// Always within 1..=10.
    pub score: u8,
    pub analysis_text: String,
    /// At most 3 entries.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisResult {
    Expert(ExpertAnalysis),
    Niche(NicheAnalysis),
}

impl AnalysisResult {
    #[must_use]
    pub const fn mode(&self) -> AnalysisMode {
        match self {
            Self::Expert(_) => AnalysisMode::Expert,
            Self::Niche(_) => AnalysisMode::Niche,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u8 {
        match self {
            Self::Expert(analysis) => analysis.score,
            Self::Niche(analysis) => analysis.score,
        }
    }

    #[must_use]
    pub fn analysis_text(&self) -> &str {
        match self {
            Self::Expert(analysis) => &analysis.analysis,
            Self::Niche(analysis) => &analysis.analysis_text,
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Expert(analysis) => &analysis.suggestions,
            Self::Niche(analysis) => &analysis.suggestions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Wall-clock duration of the model call, in milliseconds.
    pub processing_time: u64,
    pub tokens_used: u64,
    /// USD, rounded to 5 decimals.
    pub estimated_cost: f64,
    pub analysis_type: String,
    /// Uploaded image size in KiB (expert mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<u64>,
    /// Resolved niche id (niche mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
}

/// Body returned by the analyze endpoints: the analysis fields plus `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub metadata: AnalysisMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn niche_response_serializes_flat_with_metadata() -> serde_json::Result<()> {
        let response = AnalysisResponse {
            result: AnalysisResult::Niche(NicheAnalysis {
                score: 8,
                analysis_text: "Bonne miniature.".to_string(),
                suggestions: vec!["Ajouter un visage".to_string()],
            }),
            metadata: AnalysisMetadata {
                processing_time: 1200,
                tokens_used: 900,
                estimated_cost: 0.00225,
                analysis_type: AnalysisMode::Niche.analysis_type().to_string(),
                image_size: None,
                niche: Some("gaming".to_string()),
            },
        };

        let value = serde_json::to_value(&response)?;
        assert_eq!(
            value,
            json!({
                "score": 8,
                "analysisText": "Bonne miniature.",
                "suggestions": ["Ajouter un visage"],
                "metadata": {
                    "processingTime": 1200,
                    "tokensUsed": 900,
                    "estimatedCost": 0.00225,
                    "analysisType": "niche",
                    "niche": "gaming"
                }
            })
        );
        Ok(())
    }

    #[test]
    fn visual_factors_use_camel_case_keys() -> serde_json::Result<()> {
        let factors = VisualFactors {
            face_present: true,
            emotion: "surpris".to_string(),
            color_scheme: "rouge-jaune".to_string(),
            text_count: 2,
            mobile_friendly: false,
            contrast: "élevé".to_string(),
        };
        let value = serde_json::to_value(&factors)?;
        assert_eq!(value["facePresent"], json!(true));
        assert_eq!(value["colorScheme"], json!("rouge-jaune"));
        assert_eq!(value["textCount"], json!(2));
        assert_eq!(value["mobileFriendly"], json!(false));
        Ok(())
    }
}
