//! Service context - dependency container for services
//!
//! Holds the repositories, the transactional economy store, the
//! notification port, the ID generator, and the economy tunables.

use std::sync::Arc;

use campus_common::config::EconomyConfig;
use campus_core::traits::{
    AnswerRepository, EconomyStore, LedgerRepository, NotificationPort, QuestionRepository,
    UserRepository, VoteRepository,
};
use campus_core::SnowflakeGenerator;
use campus_db::{
    PgAnswerRepository, PgEconomyStore, PgLedgerRepository, PgPool, PgQuestionRepository,
    PgUserRepository, PgVoteRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Read repositories
/// - The transactional economy store
/// - The notification port
/// - Snowflake generator for ID generation
/// - The reward economy tunables
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    question_repo: Arc<dyn QuestionRepository>,
    answer_repo: Arc<dyn AnswerRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,

    // Transactional writes
    store: Arc<dyn EconomyStore>,

    // Outbound ports
    notifier: Arc<dyn NotificationPort>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,

    // Tunables
    economy: EconomyConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        store: Arc<dyn EconomyStore>,
        notifier: Arc<dyn NotificationPort>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        economy: EconomyConfig,
    ) -> Self {
        Self {
            user_repo,
            question_repo,
            answer_repo,
            vote_repo,
            ledger_repo,
            store,
            notifier,
            snowflake_generator,
            economy,
        }
    }

    /// Wire a context onto a PostgreSQL pool
    ///
    /// Builds the `Pg*` repositories and the `PgEconomyStore` over one
    /// shared pool. Delivery of notifications stays pluggable.
    pub fn postgres(
        pool: PgPool,
        economy: EconomyConfig,
        worker_id: u16,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgQuestionRepository::new(pool.clone())),
            Arc::new(PgAnswerRepository::new(pool.clone())),
            Arc::new(PgVoteRepository::new(pool.clone())),
            Arc::new(PgLedgerRepository::new(pool.clone())),
            Arc::new(PgEconomyStore::new(pool)),
            notifier,
            Arc::new(SnowflakeGenerator::new(worker_id)),
            economy,
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the question repository
    pub fn question_repo(&self) -> &dyn QuestionRepository {
        self.question_repo.as_ref()
    }

    /// Get the answer repository
    pub fn answer_repo(&self) -> &dyn AnswerRepository {
        self.answer_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the ledger repository
    pub fn ledger_repo(&self) -> &dyn LedgerRepository {
        self.ledger_repo.as_ref()
    }

    // === Transactional writes ===

    /// Get the economy store
    pub fn store(&self) -> &dyn EconomyStore {
        self.store.as_ref()
    }

    // === Outbound ports ===

    /// Get the notification port
    pub fn notifier(&self) -> &dyn NotificationPort {
        self.notifier.as_ref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> campus_core::Snowflake {
        self.snowflake_generator.generate()
    }

    // === Tunables ===

    /// Get the reward economy configuration
    pub fn economy(&self) -> &EconomyConfig {
        &self.economy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("store", &"EconomyStore")
            .field("economy", &self.economy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    question_repo: Option<Arc<dyn QuestionRepository>>,
    answer_repo: Option<Arc<dyn AnswerRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    ledger_repo: Option<Arc<dyn LedgerRepository>>,
    store: Option<Arc<dyn EconomyStore>>,
    notifier: Option<Arc<dyn NotificationPort>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    economy: Option<EconomyConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            question_repo: None,
            answer_repo: None,
            vote_repo: None,
            ledger_repo: None,
            store: None,
            notifier: None,
            snowflake_generator: None,
            economy: None,
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn question_repo(mut self, repo: Arc<dyn QuestionRepository>) -> Self {
        self.question_repo = Some(repo);
        self
    }

    pub fn answer_repo(mut self, repo: Arc<dyn AnswerRepository>) -> Self {
        self.answer_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn ledger_repo(mut self, repo: Arc<dyn LedgerRepository>) -> Self {
        self.ledger_repo = Some(repo);
        self
    }

    pub fn store(mut self, store: Arc<dyn EconomyStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn NotificationPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn economy(mut self, economy: EconomyConfig) -> Self {
        self.economy = Some(economy);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is
    /// missing; `economy` falls back to its defaults.
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.question_repo
                .ok_or_else(|| super::error::ServiceError::validation("question_repo is required"))?,
            self.answer_repo
                .ok_or_else(|| super::error::ServiceError::validation("answer_repo is required"))?,
            self.vote_repo
                .ok_or_else(|| super::error::ServiceError::validation("vote_repo is required"))?,
            self.ledger_repo
                .ok_or_else(|| super::error::ServiceError::validation("ledger_repo is required"))?,
            self.store
                .ok_or_else(|| super::error::ServiceError::validation("store is required"))?,
            self.notifier
                .ok_or_else(|| super::error::ServiceError::validation("notifier is required"))?,
            self.snowflake_generator.ok_or_else(|| {
                super::error::ServiceError::validation("snowflake_generator is required")
            })?,
            self.economy.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
