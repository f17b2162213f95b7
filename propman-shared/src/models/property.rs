/// Property model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE properties (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,          -- unique
///     description TEXT,
///     address VARCHAR(255), city VARCHAR(100), state VARCHAR(100),
///     postal_code VARCHAR(20),
///     property_type VARCHAR(50), status VARCHAR(50),
///     bedrooms INTEGER, bathrooms DOUBLE PRECISION,
///     square_feet INTEGER, price DOUBLE PRECISION,
///     created_at, updated_at, deleted_at
/// );
///
/// CREATE TABLE property_features (property_id, feature_id);
/// CREATE TABLE property_contacts (property_id, contact_id);
/// ```
///
/// `find_by_id` fills `features`, `logs` and `contacts`; list queries leave
/// them empty.

use super::contact::Contact;
use super::feature::Feature;
use super::property_log::PropertyLog;
use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,

    /// e.g. "apartment", "single_family", "commercial"
    pub property_type: Option<String>,

    /// e.g. "available", "leased", "under_maintenance"
    pub status: Option<String>,

    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    pub price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,

    #[sqlx(skip)]
    #[serde(default)]
    pub features: Vec<Feature>,

    #[sqlx(skip)]
    #[serde(default)]
    pub logs: Vec<PropertyLog>,

    #[sqlx(skip)]
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProperty {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    pub price: Option<f64>,

    /// Features to link on insert
    pub feature_ids: Vec<i64>,

    /// Contacts to link on insert
    pub contact_ids: Vec<i64>,
}

/// Patch for a property
///
/// `feature_ids` / `contact_ids`: `None` leaves links alone, `Some` replaces
/// existing links or appends when there were none.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub property_type: Option<String>,
    pub status: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<i32>,
    pub price: Option<f64>,
    pub feature_ids: Option<Vec<i64>>,
    pub contact_ids: Option<Vec<i64>>,
}

impl PropertyPatch {
    pub fn apply(&self, property: &mut Property) {
        patch_field(&mut property.name, &self.name);
        patch_nullable(&mut property.description, &self.description);
        patch_nullable(&mut property.address, &self.address);
        patch_nullable(&mut property.city, &self.city);
        patch_nullable(&mut property.state, &self.state);
        patch_nullable(&mut property.postal_code, &self.postal_code);
        patch_nullable(&mut property.property_type, &self.property_type);
        patch_nullable(&mut property.status, &self.status);
        patch_nullable(&mut property.bedrooms, &self.bedrooms);
        patch_nullable(&mut property.bathrooms, &self.bathrooms);
        patch_nullable(&mut property.square_feet, &self.square_feet);
        patch_nullable(&mut property.price, &self.price);
    }
}

#[cfg(test)]
pub(crate) fn sample_property(id: i64, name: &str) -> Property {
    let now = Utc::now();
    Property {
        id,
        name: name.to_string(),
        description: None,
        address: Some("12 Harbor Rd".to_string()),
        city: Some("Portland".to_string()),
        state: Some("ME".to_string()),
        postal_code: None,
        property_type: Some("apartment".to_string()),
        status: Some("available".to_string()),
        bedrooms: Some(2),
        bathrooms: Some(1.5),
        square_feet: Some(900),
        price: Some(1850.0),
        created_at: now,
        updated_at: now,
        deleted_at: None,
        features: Vec::new(),
        logs: Vec::new(),
        contacts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch() {
        let mut property = sample_property(1, "Harbor Lofts");

        PropertyPatch {
            status: Some("leased".to_string()),
            price: Some(1900.0),
            feature_ids: Some(vec![1, 2]),
            ..Default::default()
        }
        .apply(&mut property);

        assert_eq!(property.name, "Harbor Lofts");
        assert_eq!(property.status.as_deref(), Some("leased"));
        assert_eq!(property.price, Some(1900.0));
        assert_eq!(property.bedrooms, Some(2));
        // Associations are written by the repository, not by apply
        assert!(property.features.is_empty());
    }

    #[test]
    fn test_relations_serialize() {
        let property = sample_property(5, "Elm Court");
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["features"], serde_json::json!([]));
        assert_eq!(json["name"], "Elm Court");
    }
}
