pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::metrics::Metrics;
use crate::services::TransactionService;

#[derive(Clone)]
pub struct AppState {
    pub service: TransactionService,
    pub metrics: Arc<Metrics>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route(
            "/api/v1/transactions",
            post(handlers::transactions::create_transaction)
                .get(handlers::transactions::get_transactions_by_account),
        )
        .route(
            "/api/v1/transactions/:id",
            get(handlers::transactions::get_transaction),
        )
        .layer(axum::middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .with_state(state)
}
