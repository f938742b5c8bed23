//! Repository port for transactions.
//! The service layer depends on this trait, never on a concrete store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Transaction;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Asynchronous CRUD-by-key store for transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists the entity and returns it with `id` populated.
    async fn save(&self, tx: &Transaction) -> RepositoryResult<Transaction>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transaction>>;

    async fn find_by_account_id(&self, account_id: &str) -> RepositoryResult<Vec<Transaction>>;

    /// Declared for parity with the storage contract; the service layer
    /// does not call it yet.
    async fn find_by_status(&self, status: &str) -> RepositoryResult<Vec<Transaction>>;
}
