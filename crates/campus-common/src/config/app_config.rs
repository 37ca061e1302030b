//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).
//! The reward economy constants are part of the configuration surface and
//! are injected into services, never hardcoded in business logic.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub economy: EconomyConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Reward economy tunables
///
/// Defaults match the product rules: posting costs 20 coins (30 when
/// urgent), an accepted answer pays the question's reward plus 50
/// reputation, doubled when an urgent question is answered within the
/// 30-minute window, halved (coins) and zeroed (reputation) for ratings
/// below 2.
#[derive(Debug, Clone, Deserialize)]
pub struct EconomyConfig {
    #[serde(default = "default_base_question_cost")]
    pub base_question_cost: i64,
    #[serde(default = "default_urgent_question_cost")]
    pub urgent_question_cost: i64,
    #[serde(default = "default_reputation_per_accepted")]
    pub reputation_per_accepted: i64,
    #[serde(default = "default_reputation_per_upvote")]
    pub reputation_per_upvote: i64,
    #[serde(default = "default_max_unevaluated_questions")]
    pub max_unevaluated_questions: u32,
    #[serde(default = "default_urgent_bonus_window_minutes")]
    pub urgent_bonus_window_minutes: i64,
    #[serde(default = "default_rating_penalty_threshold")]
    pub rating_penalty_threshold: i16,
    #[serde(default = "default_urgent_bonus_multiplier")]
    pub urgent_bonus_multiplier: i64,
}

impl EconomyConfig {
    /// Coin cost of posting a question
    #[must_use]
    pub fn question_cost(&self, is_urgent: bool) -> i64 {
        if is_urgent {
            self.urgent_question_cost
        } else {
            self.base_question_cost
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_question_cost: default_base_question_cost(),
            urgent_question_cost: default_urgent_question_cost(),
            reputation_per_accepted: default_reputation_per_accepted(),
            reputation_per_upvote: default_reputation_per_upvote(),
            max_unevaluated_questions: default_max_unevaluated_questions(),
            urgent_bonus_window_minutes: default_urgent_bonus_window_minutes(),
            rating_penalty_threshold: default_rating_penalty_threshold(),
            urgent_bonus_multiplier: default_urgent_bonus_multiplier(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "campus-qa".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_base_question_cost() -> i64 {
    20
}

fn default_urgent_question_cost() -> i64 {
    30
}

fn default_reputation_per_accepted() -> i64 {
    50
}

fn default_reputation_per_upvote() -> i64 {
    10
}

fn default_max_unevaluated_questions() -> u32 {
    5
}

fn default_urgent_bonus_window_minutes() -> i64 {
    30
}

fn default_rating_penalty_threshold() -> i16 {
    2
}

fn default_urgent_bonus_multiplier() -> i64 {
    2
}

fn env_parse<T: std::str::FromStr>(key: &'static str, fallback: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Err(_) => Ok(fallback),
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required environment variable is missing or
    /// a set variable fails to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
            },
            economy: EconomyConfig {
                base_question_cost: env_parse("BASE_QUESTION_COST", default_base_question_cost())?,
                urgent_question_cost: env_parse(
                    "URGENT_QUESTION_COST",
                    default_urgent_question_cost(),
                )?,
                reputation_per_accepted: env_parse(
                    "REPUTATION_PER_ACCEPTED",
                    default_reputation_per_accepted(),
                )?,
                reputation_per_upvote: env_parse(
                    "REPUTATION_PER_UPVOTE",
                    default_reputation_per_upvote(),
                )?,
                max_unevaluated_questions: env_parse(
                    "MAX_UNEVALUATED_QUESTIONS",
                    default_max_unevaluated_questions(),
                )?,
                urgent_bonus_window_minutes: env_parse(
                    "URGENT_BONUS_WINDOW_MINUTES",
                    default_urgent_bonus_window_minutes(),
                )?,
                rating_penalty_threshold: env_parse(
                    "RATING_PENALTY_THRESHOLD",
                    default_rating_penalty_threshold(),
                )?,
                urgent_bonus_multiplier: env_parse(
                    "URGENT_BONUS_MULTIPLIER",
                    default_urgent_bonus_multiplier(),
                )?,
            },
            snowflake: SnowflakeConfig {
                worker_id: env_parse("WORKER_ID", 0)?,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
