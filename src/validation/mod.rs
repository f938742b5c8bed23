//! Field-level validation and normalization for incoming transaction
//! requests. Runs entirely in memory, before any repository call.

use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::{NewTransaction, TransactionType};

pub const ACCOUNT_ID_PREFIX: &str = "ACC";
pub const ACCOUNT_ID_MIN_DIGITS: usize = 3;
pub const ACCOUNT_ID_MAX_DIGITS: usize = 10;

/// Raw creation payload as it arrives on the wire. Every field is
/// optional so that a missing field surfaces as a validation error
/// keyed by its name rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub amount: Option<BigDecimal>,
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// One entry per invalid field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

pub type ValidationResult = Result<(), ValidationError>;

pub fn validate_account_id(account_id: &str) -> ValidationResult {
    if account_id.trim().is_empty() {
        return Err(ValidationError::new("accountId", "accountId is required"));
    }

    let digits = match account_id.strip_prefix(ACCOUNT_ID_PREFIX) {
        Some(rest) => rest,
        None => {
            return Err(ValidationError::new(
                "accountId",
                "accountId must match pattern ACC + 3-10 digits",
            ))
        }
    };

    let digit_count = digits.chars().count();
    if digit_count < ACCOUNT_ID_MIN_DIGITS
        || digit_count > ACCOUNT_ID_MAX_DIGITS
        || !digits.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(ValidationError::new(
            "accountId",
            "accountId must match pattern ACC + 3-10 digits",
        ));
    }

    Ok(())
}

pub fn validate_amount(amount: &BigDecimal) -> ValidationResult {
    // amount >= 0.01, compared in hundredths to avoid a decimal literal
    if amount * BigDecimal::from(100) < BigDecimal::from(1) {
        return Err(ValidationError::new(
            "amount",
            "amount must be greater than 0",
        ));
    }

    Ok(())
}

/// Uppercases before matching, so `transfer` normalizes to `TRANSFER`.
pub fn parse_transaction_type(value: &str) -> Result<TransactionType, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("type", "type is required"));
    }

    TransactionType::from_str(value).map_err(|_| {
        ValidationError::new("type", "type must be TRANSFER, PAYMENT or WITHDRAWAL")
    })
}

/// Validates and normalizes a raw payload into a `NewTransaction`,
/// collecting one error per invalid field.
pub fn validate_transaction(payload: TransactionPayload) -> Result<NewTransaction, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let account_id = match payload.account_id {
        Some(account_id) => match validate_account_id(&account_id) {
            Ok(()) => Some(account_id),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => {
            errors.push(ValidationError::new("accountId", "accountId is required"));
            None
        }
    };

    let amount = match payload.amount {
        Some(amount) => match validate_amount(&amount) {
            Ok(()) => Some(amount),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => {
            errors.push(ValidationError::new("amount", "amount is required"));
            None
        }
    };

    let tx_type = match payload.tx_type.as_deref() {
        Some(raw) => match parse_transaction_type(raw) {
            Ok(tx_type) => Some(tx_type),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        None => {
            errors.push(ValidationError::new("type", "type is required"));
            None
        }
    };

    match (account_id, amount, tx_type) {
        (Some(account_id), Some(amount), Some(tx_type)) if errors.is_empty() => {
            Ok(NewTransaction {
                account_id,
                amount,
                tx_type,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionType;

    fn payload(account_id: &str, amount: &str, tx_type: &str) -> TransactionPayload {
        TransactionPayload {
            account_id: Some(account_id.to_string()),
            amount: Some(amount.parse().expect("valid decimal")),
            tx_type: Some(tx_type.to_string()),
        }
    }

    #[test]
    fn validates_account_id_pattern() {
        assert!(validate_account_id("ACC001").is_ok());
        assert!(validate_account_id("ACC1234567890").is_ok());
        assert!(validate_account_id("ACC12").is_err());
        assert!(validate_account_id("ACC12345678901").is_err());
        assert!(validate_account_id("ACC12a").is_err());
        assert!(validate_account_id("acc001").is_err());
        assert!(validate_account_id("INVALID").is_err());
        assert!(validate_account_id("").is_err());
        assert!(validate_account_id("   ").is_err());
    }

    #[test]
    fn validates_minimum_amount() {
        assert!(validate_amount(&"0.01".parse().unwrap()).is_ok());
        assert!(validate_amount(&"100.50".parse().unwrap()).is_ok());
        assert!(validate_amount(&"0.009".parse().unwrap()).is_err());
        assert!(validate_amount(&"0".parse().unwrap()).is_err());
        assert!(validate_amount(&"-50".parse().unwrap()).is_err());
    }

    #[test]
    fn normalizes_type_before_matching() {
        assert_eq!(
            parse_transaction_type("transfer"),
            Ok(TransactionType::Transfer)
        );
        assert_eq!(
            parse_transaction_type("Payment"),
            Ok(TransactionType::Payment)
        );
        assert!(parse_transaction_type("INVALID_TYPE").is_err());
        assert!(parse_transaction_type("  ").is_err());
    }

    #[test]
    fn accepts_valid_payload_and_normalizes() {
        let validated =
            validate_transaction(payload("ACC001", "100.50", "transfer")).expect("valid");

        assert_eq!(validated.account_id, "ACC001");
        assert_eq!(validated.amount, "100.50".parse().unwrap());
        assert_eq!(validated.tx_type, TransactionType::Transfer);
    }

    #[test]
    fn rejects_invalid_account_id_by_field() {
        let errors =
            validate_transaction(payload("INVALID", "100", "TRANSFER")).expect_err("invalid");

        assert!(errors.contains_field("accountId"));
        assert!(!errors.contains_field("amount"));
        assert!(!errors.contains_field("type"));
    }

    #[test]
    fn rejects_negative_amount_by_field() {
        let errors =
            validate_transaction(payload("ACC001", "-50", "TRANSFER")).expect_err("invalid");

        assert!(errors.contains_field("amount"));
    }

    #[test]
    fn reports_missing_fields_individually() {
        let errors = validate_transaction(TransactionPayload::default()).expect_err("invalid");

        assert!(errors.contains_field("accountId"));
        assert!(errors.contains_field("amount"));
        assert!(errors.contains_field("type"));
    }

    #[test]
    fn collects_multiple_errors_at_once() {
        let errors =
            validate_transaction(payload("INVALID", "-1", "REFUND")).expect_err("invalid");

        assert_eq!(errors.iter().count(), 3);
    }
}
