//! Ledger service
//!
//! Read access to the append-only coin ledger plus the purchase top-up,
//! the only way to add coins from outside the question/answer loop.

use campus_core::{DomainError, NewLedgerEntry, Snowflake};
use tracing::{info, instrument};

use crate::dto::responses::{CoinSummaryResponse, LedgerEntryResponse};
use crate::dto::PurchaseCoinsRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Aggregate coin position for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinSummary {
    pub user_id: Snowflake,
    pub balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
}

/// Ledger service
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    /// Create a new LedgerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A user's coin movement history, newest first
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<Vec<LedgerEntryResponse>> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let entries = self.ctx.ledger_repo().find_by_user(user_id, limit).await?;
        Ok(entries.iter().map(LedgerEntryResponse::from).collect())
    }

    /// Current balance plus lifetime earned/spent totals
    #[instrument(skip(self))]
    pub async fn summary(&self, user_id: Snowflake) -> ServiceResult<CoinSummaryResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let total_earned = self.ctx.ledger_repo().total_earned(user_id).await?;
        let total_spent = self.ctx.ledger_repo().total_spent(user_id).await?;

        Ok(CoinSummaryResponse::from(CoinSummary {
            user_id,
            balance: user.coins,
            total_earned,
            total_spent,
        }))
    }

    /// Credit purchased coins and append the PURCHASE entry
    #[instrument(skip(self, request))]
    pub async fn purchase_coins(
        &self,
        user_id: Snowflake,
        request: PurchaseCoinsRequest,
    ) -> ServiceResult<LedgerEntryResponse> {
        if request.amount <= 0 {
            return Err(ServiceError::validation(
                "Purchase amount must be positive",
            ));
        }

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let description = request
            .description
            .unwrap_or_else(|| "Coin purchase".to_string());

        let entry = NewLedgerEntry::purchase(
            self.ctx.generate_id(),
            user_id,
            request.amount,
            description,
        );

        let entry = self.ctx.store().commit_purchase(entry).await?;

        info!(
            user_id = %user_id,
            amount = entry.amount,
            balance_after = entry.balance_after,
            "Coins purchased"
        );

        Ok(LedgerEntryResponse::from(entry))
    }
}
