//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default capacity of the in-memory response history.
fn default_history_capacity() -> usize {
    1000
}

/// Default clamp on how many history entries a single query may return.
fn default_max_history_results() -> usize {
    1000
}

/// Default largest die a roll request may ask for.
fn default_max_die_size() -> i64 {
    1000
}

/// Default bound on a roll modifier's magnitude.
fn default_max_abs_modifier() -> i64 {
    100
}

/// Default ceiling on the total number of dice in one request.
fn default_max_total_dice() -> u64 {
    100_000_000
}

/// Default maximum number of roll clauses in one message.
fn default_max_roll_clauses() -> usize {
    10
}

/// Default number of individual rolls shown before truncation.
fn default_max_shown_rolls() -> usize {
    10
}

/// Configuration for the dice-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The configuration values. Environment variables are prefixed with
/// `DICE_BOT`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack app token (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// D&D Beyond character IDs to serve via `!who` (`PLAYER_IDS`).
    /// The sheet responder is not registered when this is empty.
    #[serde(default)]
    pub player_ids: Vec<u64>,
    /// Capacity of the in-memory response history (`HISTORY_CAPACITY`).
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Clamp on history query result counts (`MAX_HISTORY_RESULTS`).
    #[serde(default = "default_max_history_results")]
    pub max_history_results: usize,
    /// Largest die size a roll may request (`MAX_DIE_SIZE`).
    #[serde(default = "default_max_die_size")]
    pub max_die_size: i64,
    /// Bound on a roll modifier's magnitude (`MAX_ABS_MODIFIER`).
    #[serde(default = "default_max_abs_modifier")]
    pub max_abs_modifier: i64,
    /// Ceiling on total dice requested in one message (`MAX_TOTAL_DICE`).
    #[serde(default = "default_max_total_dice")]
    pub max_total_dice: u64,
    /// Maximum number of roll clauses in one message (`MAX_ROLL_CLAUSES`).
    #[serde(default = "default_max_roll_clauses")]
    pub max_roll_clauses: usize,
    /// Individual rolls shown before truncation (`MAX_SHOWN_ROLLS`).
    #[serde(default = "default_max_shown_rolls")]
    pub max_shown_rolls: usize,
}

impl Config {
    /// Loads configuration from the environment, layered over an optional
    /// TOML file, and validates the limits.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("DICE_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.max_die_size < 2 {
            return Err(anyhow::anyhow!("Max die size must be at least 2."));
        }

        if result.max_abs_modifier < 0 {
            return Err(anyhow::anyhow!("Max modifier magnitude must be non-negative."));
        }

        if result.max_roll_clauses < 1 {
            return Err(anyhow::anyhow!("Max roll clauses must be at least 1."));
        }

        if result.history_capacity < 1 {
            return Err(anyhow::anyhow!("History capacity must be at least 1."));
        }

        Ok(result)
    }
}
