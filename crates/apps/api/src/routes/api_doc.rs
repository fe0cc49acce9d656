use crate::routes::{analyze, root};
use common_services::api::analyze::interfaces::AnalyzeForm;
use common_types::{
    AnalysisMetadata, AnalysisMode, AnalysisResponse, AnalysisResult, ExpertAnalysis,
    NicheAnalysis, NicheSummary, VisualFactors,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Analysis handlers
        analyze::handlers::analyze_expert_handler,
        analyze::handlers::analyze_niche_handler,
        analyze::handlers::list_niches_handler,
    ),
    components(
        schemas(
            AnalyzeForm,
            AnalysisResponse,
            AnalysisResult,
            AnalysisMetadata,
            AnalysisMode,
            ExpertAnalysis,
            NicheAnalysis,
            VisualFactors,
            NicheSummary,
        ),
    ),
    tags(
        (name = "Thumbnail CTR", description = "Thumbnail click-through analysis API"),
        (name = "Analysis", description = "Thumbnail analysis endpoints"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;
