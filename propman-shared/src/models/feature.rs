/// Feature model: an amenity (parking, pool, laundry) shared by many properties
///
/// Names are unique (`features_name_key`).

use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feature {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewFeature {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FeaturePatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl FeaturePatch {
    pub fn apply(&self, feature: &mut Feature) {
        patch_field(&mut feature.name, &self.name);
        patch_nullable(&mut feature.description, &self.description);
    }
}
