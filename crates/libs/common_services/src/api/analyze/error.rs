use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common_types::AnalysisMode;
use language_model::ModelError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("image or title missing")]
    MissingInput,

    #[error("image larger than {max_mib} MiB")]
    ImageTooLarge { max_mib: usize },

    #[error("title longer than {max_chars} characters")]
    TitleTooLong { max_chars: usize },

    #[error("provider quota exceeded: {0}")]
    UpstreamQuotaExceeded(#[source] ModelError),

    #[error("provider rate limit reached: {0}")]
    UpstreamRateLimited(#[source] ModelError),

    #[error("provider unreachable: {0}")]
    UpstreamUnavailable(#[source] ModelError),

    #[error("provider credentials not configured")]
    NotConfigured,

    #[error("{mode:?} analysis failed: {source}")]
    Internal {
        mode: AnalysisMode,
        source: ModelError,
    },
}

/// Caller-facing error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    PayloadTooLarge,
    UpstreamQuotaExceeded,
    UpstreamRateLimited,
    UpstreamUnavailable,
    InternalFailure,
}

/// What the caller receives for a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub status_code: StatusCode,
}

/// Map a provider failure to its caller-facing category by looking at its message.
#[must_use]
pub fn classify(error: ModelError, mode: AnalysisMode) -> AnalyzeError {
    let signature = error.to_string();
    if signature.contains("insufficient_quota") {
        AnalyzeError::UpstreamQuotaExceeded(error)
    } else if signature.contains("rate_limit") {
        AnalyzeError::UpstreamRateLimited(error)
    } else if matches!(error, ModelError::MissingApiKey) {
        AnalyzeError::NotConfigured
    } else if error.is_transport() {
        AnalyzeError::UpstreamUnavailable(error)
    } else {
        AnalyzeError::Internal {
            mode,
            source: error,
        }
    }
}

impl AnalyzeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput => ErrorKind::MissingInput,
            Self::ImageTooLarge { .. } | Self::TitleTooLong { .. } => ErrorKind::PayloadTooLarge,
            Self::UpstreamQuotaExceeded(_) => ErrorKind::UpstreamQuotaExceeded,
            Self::UpstreamRateLimited(_) => ErrorKind::UpstreamRateLimited,
            Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailable,
            Self::NotConfigured | Self::Internal { .. } => ErrorKind::InternalFailure,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MissingInput | ErrorKind::PayloadTooLarge => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamQuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            ErrorKind::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The French message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput => "Image et titre requis".to_string(),
            Self::ImageTooLarge { max_mib } => format!("Image trop volumineuse (max {max_mib}MB)"),
            Self::TitleTooLong { max_chars } => {
                format!("Titre trop long (max {max_chars} caractères)")
            }
            Self::UpstreamQuotaExceeded(_) => {
                "Quota OpenAI dépassé. Ajoutez des crédits pour continuer les analyses expertes."
                    .to_string()
            }
            Self::UpstreamRateLimited(_) => {
                "Limite de requêtes atteinte. Réessayez dans 1 minute.".to_string()
            }
            Self::UpstreamUnavailable(_) => {
                "Service d'analyse indisponible. Réessayez plus tard.".to_string()
            }
            Self::NotConfigured => "Configuration OpenAI manquante".to_string(),
            Self::Internal {
                mode: AnalysisMode::Expert,
                ..
            } => "Erreur lors de l'analyse experte".to_string(),
            Self::Internal {
                mode: AnalysisMode::Niche,
                ..
            } => "Erreur lors de l'analyse de niche".to_string(),
        }
    }

    #[must_use]
    pub fn classified(&self) -> ClassifiedError {
        ClassifiedError {
            kind: self.kind(),
            message: self.user_message(),
            status_code: self.status_code(),
        }
    }
}

fn log_error(error: &AnalyzeError) {
    match error {
        AnalyzeError::MissingInput
        | AnalyzeError::ImageTooLarge { .. }
        | AnalyzeError::TitleTooLong { .. } => warn!("Rejected analysis request: {}", error),
        AnalyzeError::UpstreamQuotaExceeded(e)
        | AnalyzeError::UpstreamRateLimited(e)
        | AnalyzeError::UpstreamUnavailable(e) => warn!("Vision provider refused: {}", e),
        AnalyzeError::NotConfigured => error!("OpenAI API key is not configured"),
        AnalyzeError::Internal { mode, source } => {
            error!("💥 {:?} analysis failed: {:?}", mode, source);
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        log_error(&self);

        let ClassifiedError {
            message,
            status_code,
            ..
        } = self.classified();
        let body = Json(json!({ "error": message }));
        (status_code, body).into_response()
    }
}
