//! Dice-roll requests and responses: parsing free-form text into roll
//! specifications, rolling 'dem bones, and rendering the results.
//!
//! The flow is `RollParser::parse` -> [`RollRequest`] ->
//! [`eval::evaluate_batch`] -> [`RollBatchResult`] -> [`format::format_batch`].
//! A request that is syntactically valid but semantically absurd (a d2000, a
//! thousand clauses) is classified as a troll rather than rejected: the batch
//! carries a scripted refusal and no dice are rolled.

pub mod eval;
pub mod format;
pub mod parse;

pub use eval::{DieRoller, evaluate, evaluate_batch};
pub use parse::RollParser;

use serde::{Deserialize, Serialize};

use crate::base::config::Config;

/// The basic unit of a parsed roll, e.g. "3d6+2".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSpec {
    /// How many dice to roll. Zero is valid and contributes nothing.
    pub multiplier: u64,
    /// Number of faces on the die.
    pub die_size: i64,
    /// Flat value added to the summed rolls.
    pub modifier: i64,
}

/// A parsed pre-roll request. No rolls here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollRequest {
    /// Every clause that parsed, in message order, kept even when the
    /// request classifies as a troll.
    pub specs: Vec<RollSpec>,
    /// Scripted refusal for semantically rejected requests. When set,
    /// evaluation is skipped entirely.
    pub troll_message: Option<String>,
}

impl RollRequest {
    /// Whether this request should be answered with a refusal instead of
    /// rolled.
    pub fn is_troll(&self) -> bool {
        self.troll_message.is_some()
    }
}

/// The outcome of rolling a single spec. Lotsa rolls here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollOutcome {
    pub spec: RollSpec,
    /// Each die's result, in the order drawn.
    pub base_rolls: Vec<i64>,
    /// Sum of the base rolls plus the modifier.
    pub total: i64,
    /// Single die came up at its maximum. Only meaningful when exactly one
    /// die was rolled.
    pub is_crit: bool,
    /// Single die came up 1. Only meaningful when exactly one die was rolled.
    pub is_crit_fail: bool,
}

/// The evaluated form of a whole request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollBatchResult {
    /// One outcome per spec, in request order. Empty for trolls.
    pub outcomes: Vec<RollOutcome>,
    /// Sum of all outcome totals.
    pub grand_total: i64,
    /// Forwarded from the request; when set, outcomes are suppressed in
    /// favor of this message.
    pub troll_message: Option<String>,
}

/// Bounds applied when classifying parsed rolls.
///
/// These are owned by the parser instance rather than living in process-wide
/// state so tests can run with alternate limits.
#[derive(Debug, Clone, Copy)]
pub struct RollLimits {
    pub max_die_size: i64,
    pub max_abs_modifier: i64,
    pub max_total_dice: u64,
    pub max_roll_clauses: usize,
    pub max_shown_rolls: usize,
}

impl Default for RollLimits {
    fn default() -> Self {
        Self {
            max_die_size: 1000,
            max_abs_modifier: 100,
            max_total_dice: 100_000_000,
            max_roll_clauses: 10,
            max_shown_rolls: 10,
        }
    }
}

impl From<&Config> for RollLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_die_size: config.max_die_size,
            max_abs_modifier: config.max_abs_modifier,
            max_total_dice: config.max_total_dice,
            max_roll_clauses: config.max_roll_clauses,
            max_shown_rolls: config.max_shown_rolls,
        }
    }
}
