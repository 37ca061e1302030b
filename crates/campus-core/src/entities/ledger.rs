//! Ledger entry entity - append-only record of coin movements
//!
//! Entries are written as a side effect of every economy transaction and
//! are never updated or deleted. `balance_after` is a snapshot taken inside
//! the same transaction as the balance change, not recomputed later.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Category of a coin movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    /// Coins credited for an accepted answer
    Earn,
    /// Coins debited for posting a question
    Spend,
    /// Coins credited from a top-up purchase
    Purchase,
}

impl LedgerKind {
    /// Stable string form as stored in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earn => "EARN",
            Self::Spend => "SPEND",
            Self::Purchase => "PURCHASE",
        }
    }

    /// Parse the stored string form
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "EARN" => Some(Self::Earn),
            "SPEND" => Some(Self::Spend),
            "PURCHASE" => Some(Self::Purchase),
            _ => None,
        }
    }
}

/// What a ledger entry's reference id points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    Question,
    Answer,
}

impl ReferenceType {
    /// Stable string form as stored in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "QUESTION",
            Self::Answer => "ANSWER",
        }
    }

    /// Parse the stored string form
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "QUESTION" => Some(Self::Question),
            "ANSWER" => Some(Self::Answer),
            _ => None,
        }
    }
}

/// One immutable coin movement record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Snowflake,
    pub user_id: Snowflake,
    /// Signed amount; negative means a spend
    pub amount: i64,
    pub kind: LedgerKind,
    pub description: String,
    /// Balance snapshot taken in the same transaction as the movement
    pub balance_after: i64,
    pub reference_id: Option<Snowflake>,
    pub reference_type: Option<ReferenceType>,
    pub created_at: DateTime<Utc>,
}

/// A ledger entry awaiting its balance snapshot
///
/// The economy store fills in `balance_after` from the post-mutation balance
/// it observes inside the transaction, then persists the full entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerEntry {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub amount: i64,
    pub kind: LedgerKind,
    pub description: String,
    pub reference_id: Option<Snowflake>,
    pub reference_type: Option<ReferenceType>,
}

impl NewLedgerEntry {
    /// Debit entry for posting a question (`cost` > 0, stored negative)
    pub fn spend(
        id: Snowflake,
        user_id: Snowflake,
        cost: i64,
        description: String,
        question_id: Snowflake,
    ) -> Self {
        Self {
            id,
            user_id,
            amount: -cost,
            kind: LedgerKind::Spend,
            description,
            reference_id: Some(question_id),
            reference_type: Some(ReferenceType::Question),
        }
    }

    /// Credit entry for an accepted answer
    pub fn earn(
        id: Snowflake,
        user_id: Snowflake,
        amount: i64,
        description: String,
        answer_id: Snowflake,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            kind: LedgerKind::Earn,
            description,
            reference_id: Some(answer_id),
            reference_type: Some(ReferenceType::Answer),
        }
    }

    /// Credit entry for a coin top-up
    pub fn purchase(id: Snowflake, user_id: Snowflake, amount: i64, description: String) -> Self {
        Self {
            id,
            user_id,
            amount,
            kind: LedgerKind::Purchase,
            description,
            reference_id: None,
            reference_type: None,
        }
    }

    /// Finalize with the balance observed after applying the movement
    pub fn into_entry(self, balance_after: i64) -> LedgerEntry {
        LedgerEntry {
            id: self.id,
            user_id: self.user_id,
            amount: self.amount,
            kind: self.kind,
            description: self.description,
            balance_after,
            reference_id: self.reference_id,
            reference_type: self.reference_type,
            created_at: Utc::now(),
        }
    }
}
