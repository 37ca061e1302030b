//! Database connection pool management

mod postgres;

pub use postgres::{connect_from_env, PoolConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
