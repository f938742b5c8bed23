pub mod transaction;

pub use transaction::{
    NewTransaction, Transaction, TransactionType, UnknownTransactionType, STATUS_PENDING,
};
