/// Transaction requests

use super::{non_empty, IntoRecord};
use crate::error::ServiceResult;
use crate::models::transaction::{NewTransaction, TransactionPatch};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub property_id: Option<i64>,

    /// e.g. "rent", "deposit", "repair"
    #[validate(length(min = 1, max = 50, message = "Transaction type must be 1-50 characters"))]
    pub transaction_type: String,

    pub amount: f64,

    /// Defaults to now
    pub occurred_at: Option<DateTime<Utc>>,

    pub description: Option<String>,

    #[serde(default)]
    pub contact_ids: Vec<i64>,
}

impl IntoRecord<NewTransaction> for CreateTransactionRequest {
    fn into_record(self) -> ServiceResult<NewTransaction> {
        Ok(NewTransaction {
            property_id: self.property_id,
            transaction_type: self.transaction_type.trim().to_string(),
            amount: self.amount,
            occurred_at: self.occurred_at.unwrap_or_else(Utc::now),
            description: non_empty(self.description),
            contact_ids: self.contact_ids,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    pub property_id: Option<i64>,

    #[validate(length(max = 50))]
    pub transaction_type: Option<String>,

    pub amount: Option<f64>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub contact_ids: Option<Vec<i64>>,
}

impl IntoRecord<TransactionPatch> for UpdateTransactionRequest {
    fn into_record(self) -> ServiceResult<TransactionPatch> {
        Ok(TransactionPatch {
            property_id: self.property_id,
            transaction_type: non_empty(self.transaction_type).map(|t| t.trim().to_string()),
            amount: self.amount,
            occurred_at: self.occurred_at,
            description: non_empty(self.description),
            contact_ids: self.contact_ids,
        })
    }
}
