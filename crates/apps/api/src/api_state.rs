use app_state::AppSettings;
use language_model::VisionModel;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub settings: AppSettings,
    pub model: Arc<dyn VisionModel>,
}
