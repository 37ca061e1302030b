//! PostgreSQL connection pooling
//!
//! Pool sizing matters here: every economy write-set holds a connection
//! for the length of one short transaction, so the defaults favor a small
//! warm pool over a large cold one.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Connection pool tuning, built around a connection URL
#[derive(Debug, Clone)]
pub struct PoolConfig {
    url: String,
    max_connections: u32,
    min_connections: u32,
    acquire_timeout: Duration,
    idle_timeout: Duration,
    max_lifetime: Duration,
}

impl PoolConfig {
    /// Pool settings for the given connection URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }

    /// Pool settings from `DATABASE_URL`, with default sizing
    ///
    /// Sizing knobs come from the builder; `campus-common`'s `AppConfig`
    /// is the place that reads them from the environment.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self::new(std::env::var("DATABASE_URL")?))
    }

    #[must_use]
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    #[must_use]
    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    #[must_use]
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Open the pool
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}

/// Open a pool configured entirely from the environment
pub async fn connect_from_env() -> Result<PgPool, sqlx::Error> {
    let config = PoolConfig::from_env()
        .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
    config.connect().await
}
