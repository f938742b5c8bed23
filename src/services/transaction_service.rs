//! Transaction creation pipeline and query operations.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::{NewTransaction, Transaction};
use crate::error::AppError;
use crate::metrics::{self, Metrics};
use crate::ports::TransactionRepository;

/// Artificial latency of the limit check, standing in for a future
/// call to an external limit service.
pub const DEFAULT_LIMIT_CHECK_DELAY_MS: u64 = 50;

#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionRepository>,
    metrics: Arc<Metrics>,
    limit_check_delay: Duration,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepository>, metrics: Arc<Metrics>) -> Self {
        Self::with_limit_check_delay(
            repository,
            metrics,
            Duration::from_millis(DEFAULT_LIMIT_CHECK_DELAY_MS),
        )
    }

    pub fn with_limit_check_delay(
        repository: Arc<dyn TransactionRepository>,
        metrics: Arc<Metrics>,
        limit_check_delay: Duration,
    ) -> Self {
        Self {
            repository,
            metrics,
            limit_check_delay,
        }
    }

    /// Creates a single transaction from validated input.
    ///
    /// Steps run in order and short-circuit on failure: build the
    /// entity, check account limits, persist. Counter and timer
    /// emission never alters the result; errors propagate unchanged.
    pub async fn create_transaction(&self, input: NewTransaction) -> Result<Transaction, AppError> {
        tracing::debug!(account_id = %input.account_id, "creating transaction");
        let started = Instant::now();
        let account_id = input.account_id.clone();

        let transaction = Transaction::new(input.account_id, input.amount, input.tx_type);
        let result = self.run_creation(transaction).await;
        let elapsed = started.elapsed();
        self.metrics.record(metrics::CREATION_TIME, elapsed);

        match &result {
            Ok(saved) => {
                self.metrics.increment(metrics::TRANSACTIONS_CREATED);
                self.metrics.increment_with(
                    metrics::TRANSACTIONS_CREATED_BY_TYPE,
                    "type",
                    saved.tx_type.as_str(),
                );
                tracing::info!(
                    id = saved.id,
                    account_id = %saved.account_id,
                    amount = %saved.amount,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "transaction created"
                );
            }
            Err(error) => {
                self.metrics.increment_with(
                    metrics::TRANSACTIONS_CREATION_ERRORS,
                    "error",
                    error.category(),
                );
                tracing::error!(
                    account_id = %account_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "error creating transaction"
                );
            }
        }

        result
    }

    async fn run_creation(&self, transaction: Transaction) -> Result<Transaction, AppError> {
        let transaction = self.check_account_limits(transaction).await;

        let save_started = Instant::now();
        let saved = self.repository.save(&transaction).await?;
        self.metrics
            .record(metrics::SAVE_TIME, save_started.elapsed());

        Ok(saved)
    }

    /// Simulated account-limit check. Always passes today; the fixed
    /// delay models the latency of the external limit service that
    /// will eventually replace it.
    async fn check_account_limits(&self, transaction: Transaction) -> Transaction {
        tokio::time::sleep(self.limit_check_delay).await;
        tracing::debug!(account_id = %transaction.account_id, "validated limits for account");
        self.metrics.increment(metrics::TRANSACTIONS_VALIDATIONS);
        transaction
    }

    /// Looks a transaction up by primary key; absent ids fail with a
    /// not-found error carrying the requested id.
    pub async fn get_transaction(&self, id: i64) -> Result<Transaction, AppError> {
        tracing::debug!(id, "fetching transaction");

        let started = Instant::now();
        let found = self.repository.find_by_id(id).await?;
        self.metrics.record(metrics::FETCH_TIME, started.elapsed());

        match found {
            Some(transaction) => {
                self.metrics.increment(metrics::TRANSACTIONS_FETCHED);
                Ok(transaction)
            }
            None => Err(AppError::NotFound(id)),
        }
    }

    /// Returns all transactions for an account, in the repository's
    /// natural order. Unknown accounts yield an empty list.
    pub async fn get_transactions_by_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        tracing::debug!(account_id, "fetching transactions for account");

        let started = Instant::now();
        let transactions = self.repository.find_by_account_id(account_id).await?;
        self.metrics
            .record(metrics::FETCH_BY_ACCOUNT_TIME, started.elapsed());
        self.metrics
            .increment(metrics::TRANSACTIONS_QUERIES_BY_ACCOUNT);

        Ok(transactions)
    }
}
