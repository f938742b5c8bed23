use dotenvy::dotenv;
use std::env;

use crate::services::transaction_service::DEFAULT_LIMIT_CHECK_DELAY_MS;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub limit_check_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            limit_check_delay_ms: env::var("LIMIT_CHECK_DELAY_MS")
                .unwrap_or_else(|_| DEFAULT_LIMIT_CHECK_DELAY_MS.to_string())
                .parse()?,
        })
    }
}
