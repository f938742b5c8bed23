use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionType};
use crate::error::AppError;
use crate::validation::{self, TransactionPayload};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Option<i64>,
    pub account_id: String,
    pub amount: BigDecimal,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            account_id: tx.account_id,
            amount: tx.amount,
            tx_type: tx.tx_type,
            status: tx.status,
            created_at: tx.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = validation::validate_transaction(payload)?;
    let saved = state.service.create_transaction(input).await?;

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(saved))))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state.service.get_transaction(id).await?;

    Ok(Json(TransactionResponse::from(tx)))
}

pub async fn get_transactions_by_account(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = state
        .service
        .get_transactions_by_account(&query.account_id)
        .await?;

    let body: Vec<TransactionResponse> = transactions
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(body))
}
