/// Property requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::property::{NewProperty, PropertyPatch};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,

    #[validate(length(max = 100))]
    pub state: Option<String>,

    #[validate(length(max = 20))]
    pub postal_code: Option<String>,

    #[validate(length(max = 50))]
    pub property_type: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0.0))]
    pub bathrooms: Option<f64>,

    #[validate(range(min = 0))]
    pub square_feet: Option<i32>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[serde(default)]
    pub feature_ids: Vec<i64>,

    #[serde(default)]
    pub contact_ids: Vec<i64>,
}

impl IntoRecord<NewProperty> for CreatePropertyRequest {
    fn into_record(self) -> ServiceResult<NewProperty> {
        Ok(NewProperty {
            name: self.name.trim().to_string(),
            description: non_empty(self.description),
            address: non_empty(self.address),
            city: non_empty(self.city),
            state: non_empty(self.state),
            postal_code: non_empty(self.postal_code),
            property_type: non_empty(self.property_type),
            status: non_empty(self.status),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            price: self.price,
            feature_ids: self.feature_ids,
            contact_ids: self.contact_ids,
        })
    }
}

/// Update request
///
/// `feature_ids` / `contact_ids`: `None` leaves links alone; a list replaces
/// existing links, or is appended when the property has none.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(max = 255))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,

    #[validate(length(max = 100))]
    pub state: Option<String>,

    #[validate(length(max = 20))]
    pub postal_code: Option<String>,

    #[validate(length(max = 50))]
    pub property_type: Option<String>,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0.0))]
    pub bathrooms: Option<f64>,

    #[validate(range(min = 0))]
    pub square_feet: Option<i32>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    pub feature_ids: Option<Vec<i64>>,
    pub contact_ids: Option<Vec<i64>>,
}

impl IntoRecord<PropertyPatch> for UpdatePropertyRequest {
    fn into_record(self) -> ServiceResult<PropertyPatch> {
        Ok(PropertyPatch {
            name: non_empty(self.name).map(|n| n.trim().to_string()),
            description: non_empty(self.description),
            address: non_empty(self.address),
            city: non_empty(self.city),
            state: non_empty(self.state),
            postal_code: non_empty(self.postal_code),
            property_type: non_empty(self.property_type),
            status: non_empty(self.status),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            price: self.price,
            feature_ids: self.feature_ids,
            contact_ids: self.contact_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let request = CreatePropertyRequest::default();
        assert!(request.validate().is_err());

        let request = CreatePropertyRequest {
            name: "Maple Court".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let request = CreatePropertyRequest {
            name: "Maple Court".to_string(),
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_ignores_empty_strings() {
        let patch = UpdatePropertyRequest {
            name: Some(String::new()),
            city: Some("Tacoma".to_string()),
            feature_ids: Some(vec![1, 2]),
            ..Default::default()
        }
        .into_record()
        .unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.city.as_deref(), Some("Tacoma"));
        assert_eq!(patch.feature_ids, Some(vec![1, 2]));
        assert_eq!(patch.contact_ids, None);
    }

    #[test]
    fn test_deserialize_defaults_association_lists() {
        let request: CreatePropertyRequest =
            serde_json::from_value(serde_json::json!({ "name": "Birch House" })).unwrap();
        assert!(request.feature_ids.is_empty());
        assert!(request.contact_ids.is_empty());
    }
}
