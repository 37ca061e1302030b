//! Ledger entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the ledger_entries table (append-only)
#[derive(Debug, Clone, FromRow)]
pub struct LedgerEntryModel {
    pub id: i64,
    pub user_id: i64,
    pub amount: i64,
    pub kind: String,
    pub description: String,
    pub balance_after: i64,
    pub reference_id: Option<i64>,
    pub reference_type: Option<String>,
    pub created_at: DateTime<Utc>,
}
