/// Transaction repository
///
/// Transactions optionally reference a property and link to any number of
/// contacts through `transaction_contacts`.

use super::associations::TRANSACTION_CONTACTS;
use super::contact::CONTACTS;
use super::query::{self, ListParams, TableSpec};
use super::Repository;
use crate::error::{RepoResult, RepositoryError};
use crate::models::contact::Contact;
use crate::models::transaction::{NewTransaction, Transaction, TransactionPatch};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

pub(crate) const TRANSACTIONS: TableSpec = TableSpec {
    entity: "transaction",
    table: "transactions",
    columns: &[
        "id",
        "property_id",
        "transaction_type",
        "amount",
        "occurred_at",
        "description",
        "created_at",
        "updated_at",
        "deleted_at",
    ],
    sortable: &[
        "id",
        "property_id",
        "transaction_type",
        "amount",
        "occurred_at",
        "created_at",
        "updated_at",
    ],
};

#[derive(Debug, Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgTransactionRepository {
    type Entity = Transaction;
    type Create = NewTransaction;
    type Patch = TransactionPatch;

    async fn find_all(&self, params: &ListParams) -> RepoResult<Vec<Transaction>> {
        query::fetch_page(&self.pool, &TRANSACTIONS, params, None).await
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Transaction> {
        let mut transaction: Transaction = query::fetch_by_id(&self.pool, &TRANSACTIONS, id).await?;
        transaction.contacts = TRANSACTION_CONTACTS
            .load_linked::<Contact>(&self.pool, &CONTACTS, id)
            .await?;
        Ok(transaction)
    }

    async fn create(&self, data: NewTransaction) -> RepoResult<Transaction> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO transactions (property_id, transaction_type, amount, occurred_at, description) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(data.property_id)
        .bind(&data.transaction_type)
        .bind(data.amount)
        .bind(data.occurred_at)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::wrap(TRANSACTIONS.entity, "insert"))?;

        TRANSACTION_CONTACTS.append(&self.pool, id, &data.contact_ids).await?;

        info!(
            transaction_id = id,
            kind = %data.transaction_type,
            amount = data.amount,
            "Created transaction"
        );

        self.find_by_id(id).await
    }

    async fn update(&self, id: i64, patch: TransactionPatch) -> RepoResult<Transaction> {
        let mut transaction = self.find_by_id(id).await?;
        patch.apply(&mut transaction);

        let result = sqlx::query(
            "UPDATE transactions SET property_id = $2, transaction_type = $3, amount = $4, \
             occurred_at = $5, description = $6, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(transaction.property_id)
        .bind(&transaction.transaction_type)
        .bind(transaction.amount)
        .bind(transaction.occurred_at)
        .bind(&transaction.description)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::wrap(TRANSACTIONS.entity, "update"))?;

        if result.rows_affected() == 0 {
            return Err(TRANSACTIONS.not_found(id));
        }

        if let Some(contact_ids) = &patch.contact_ids {
            let mode = TRANSACTION_CONTACTS.sync(&self.pool, id, contact_ids).await?;
            debug!(transaction_id = id, ?mode, "Synced transaction contacts");
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        query::soft_delete(&self.pool, &TRANSACTIONS, id).await?;
        info!(transaction_id = id, "Deleted transaction");
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        query::count_live(&self.pool, &TRANSACTIONS).await
    }
}
