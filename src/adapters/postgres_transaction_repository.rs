//! Postgres implementation of TransactionRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::Transaction;
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

/// Postgres-backed transaction repository.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn save(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (account_id, amount, tx_type, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, account_id, amount, tx_type, status, created_at
            "#,
        )
        .bind(&tx.account_id)
        .bind(&tx.amount)
        .bind(tx.tx_type.as_str())
        .bind(&tx.status)
        .bind(tx.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.into_domain()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, account_id, amount, tx_type, status, created_at \
             FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn find_by_account_id(&self, account_id: &str) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, account_id, amount, tx_type, status, created_at \
             FROM transactions WHERE account_id = $1 ORDER BY id",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn find_by_status(&self, status: &str) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, account_id, amount, tx_type, status, created_at \
             FROM transactions WHERE status = $1 ORDER BY id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    account_id: String,
    amount: bigdecimal::BigDecimal,
    tx_type: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> RepositoryResult<Transaction> {
        let tx_type = self
            .tx_type
            .parse()
            .map_err(|e: crate::domain::UnknownTransactionType| {
                RepositoryError::Decode(e.to_string())
            })?;

        Ok(Transaction {
            id: Some(self.id),
            account_id: self.account_id,
            amount: self.amount,
            tx_type,
            status: self.status,
            created_at: self.created_at,
        })
    }
}
