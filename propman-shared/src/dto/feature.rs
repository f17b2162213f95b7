/// Feature requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::feature::{FeaturePatch, NewFeature};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeatureRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub description: Option<String>,
}

impl IntoRecord<NewFeature> for CreateFeatureRequest {
    fn into_record(self) -> ServiceResult<NewFeature> {
        Ok(NewFeature {
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFeatureRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    pub description: Option<String>,
}

impl IntoRecord<FeaturePatch> for UpdateFeatureRequest {
    fn into_record(self) -> ServiceResult<FeaturePatch> {
        Ok(FeaturePatch {
            name: non_empty(self.name).map(|n| n.trim().to_string()),
            description: non_empty(self.description),
        })
    }
}
