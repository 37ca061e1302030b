//! Ledger entry entity <-> model mapper
//!
//! `kind` and `reference_type` are stored as their stable string forms;
//! unknown strings surface as internal errors rather than silently mapping
//! to a default variant.

use campus_core::entities::{LedgerEntry, LedgerKind, ReferenceType};
use campus_core::error::DomainError;
use campus_core::value_objects::Snowflake;

use crate::models::LedgerEntryModel;

impl TryFrom<LedgerEntryModel> for LedgerEntry {
    type Error = DomainError;

    fn try_from(model: LedgerEntryModel) -> Result<Self, Self::Error> {
        let kind = LedgerKind::from_str_opt(&model.kind).ok_or_else(|| {
            DomainError::Internal(format!("invalid ledger kind in store: {}", model.kind))
        })?;

        let reference_type = match model.reference_type.as_deref() {
            None => None,
            Some(s) => Some(ReferenceType::from_str_opt(s).ok_or_else(|| {
                DomainError::Internal(format!("invalid ledger reference type in store: {s}"))
            })?),
        };

        Ok(LedgerEntry {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            amount: model.amount,
            kind,
            description: model.description,
            balance_after: model.balance_after,
            reference_id: model.reference_id.map(Snowflake::new),
            reference_type,
            created_at: model.created_at,
        })
    }
}
