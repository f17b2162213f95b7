/// Transaction model
///
/// A money movement (rent, deposit, repair invoice) optionally tied to a
/// property, with the contacts involved linked through
/// `transaction_contacts`.

use super::contact::Contact;
use super::{patch_field, patch_nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    pub id: i64,
    pub property_id: Option<i64>,

    /// e.g. "rent", "deposit", "expense"
    pub transaction_type: String,

    pub amount: f64,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,

    #[sqlx(skip)]
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub property_id: Option<i64>,
    pub transaction_type: String,
    pub amount: f64,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub contact_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub property_id: Option<i64>,
    pub transaction_type: Option<String>,
    pub amount: Option<f64>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub contact_ids: Option<Vec<i64>>,
}

impl TransactionPatch {
    pub fn apply(&self, transaction: &mut Transaction) {
        patch_nullable(&mut transaction.property_id, &self.property_id);
        patch_field(&mut transaction.transaction_type, &self.transaction_type);
        patch_field(&mut transaction.amount, &self.amount);
        patch_field(&mut transaction.occurred_at, &self.occurred_at);
        patch_nullable(&mut transaction.description, &self.description);
    }
}
