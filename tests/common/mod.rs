#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use transaction_service::domain::{NewTransaction, Transaction, TransactionType};
use transaction_service::metrics::Metrics;
use transaction_service::ports::{RepositoryError, RepositoryResult, TransactionRepository};
use transaction_service::services::TransactionService;
use transaction_service::{create_app, AppState};

/// In-memory stand-in for the Postgres repository. Assigns ids
/// sequentially, starting at 1, and counts save calls so tests can
/// assert that validation failures never reach the store.
pub struct InMemoryRepository {
    transactions: Mutex<Vec<Transaction>>,
    next_id: AtomicI64,
    save_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            save_calls: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionRepository for InMemoryRepository {
    async fn save(&self, tx: &Transaction) -> RepositoryResult<Transaction> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        let mut stored = tx.clone();
        if stored.id.is_none() {
            stored.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        }

        self.transactions
            .lock()
            .expect("repository lock")
            .push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transaction>> {
        let transactions = self.transactions.lock().expect("repository lock");
        Ok(transactions.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn find_by_account_id(&self, account_id: &str) -> RepositoryResult<Vec<Transaction>> {
        let transactions = self.transactions.lock().expect("repository lock");
        Ok(transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: &str) -> RepositoryResult<Vec<Transaction>> {
        let transactions = self.transactions.lock().expect("repository lock");
        Ok(transactions
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect())
    }
}

/// Repository whose save always fails, for error-path tests.
pub struct FailingRepository;

#[async_trait]
impl TransactionRepository for FailingRepository {
    async fn save(&self, _tx: &Transaction) -> RepositoryResult<Transaction> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_id(&self, _id: i64) -> RepositoryResult<Option<Transaction>> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_account_id(&self, _account_id: &str) -> RepositoryResult<Vec<Transaction>> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_status(&self, _status: &str) -> RepositoryResult<Vec<Transaction>> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }
}

/// Service wired to the given repository with a short limit-check
/// delay so tests stay fast.
pub fn test_service(
    repository: Arc<dyn TransactionRepository>,
) -> (TransactionService, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new());
    let service = TransactionService::with_limit_check_delay(
        repository,
        metrics.clone(),
        Duration::from_millis(1),
    );
    (service, metrics)
}

/// Full router over an in-memory repository.
pub fn test_app() -> (axum::Router, Arc<InMemoryRepository>, Arc<Metrics>) {
    let repository = Arc::new(InMemoryRepository::new());
    let (service, metrics) = test_service(repository.clone());
    let app = create_app(AppState {
        service,
        metrics: metrics.clone(),
    });
    (app, repository, metrics)
}

pub fn new_transaction(account_id: &str, amount: &str, tx_type: TransactionType) -> NewTransaction {
    NewTransaction {
        account_id: account_id.to_string(),
        amount: amount.parse().expect("valid decimal"),
        tx_type,
    }
}
