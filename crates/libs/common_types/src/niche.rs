use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Evaluation criteria for one content category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NicheDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub key_factors: &'static str,
    pub expectations: &'static str,
    pub common_issues: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NicheSummary {
    pub id: String,
    pub display_name: String,
}

impl From<&NicheDescriptor> for NicheSummary {
    fn from(descriptor: &NicheDescriptor) -> Self {
        Self {
            id: descriptor.id.to_string(),
            display_name: descriptor.display_name.to_string(),
        }
    }
}
