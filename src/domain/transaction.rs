//! Transaction domain entity.
//! Framework-agnostic representation of a recorded monetary movement.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Initial status of every transaction. This core never advances it.
pub const STATUS_PENDING: &str = "PENDING";

/// Kind of monetary movement. Stored and serialized in uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Transfer,
    Payment,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type: {0}")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    /// Case-insensitive: input is uppercased before matching.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "TRANSFER" => Ok(TransactionType::Transfer),
            "PAYMENT" => Ok(TransactionType::Payment),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// Validated, normalized input for creating a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: String,
    pub amount: BigDecimal,
    pub tx_type: TransactionType,
}

/// Domain entity representing a transaction.
///
/// `id` is `None` until the repository assigns one on first save;
/// after that it never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub account_id: String,
    pub amount: BigDecimal,
    pub tx_type: TransactionType,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(account_id: String, amount: BigDecimal, tx_type: TransactionType) -> Self {
        Self {
            id: None,
            account_id,
            amount,
            tx_type,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        }
    }
}
