// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vouch activity engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Vouch configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VouchConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Aggregation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Achievement rule set. The rules are data, not code: the evaluator
    /// interprets this table, so adding a rule is a config change.
    #[serde(default)]
    pub achievements: AchievementsConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "vouch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "vouch.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Aggregation engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of entries returned by leaderboard queries.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,

    /// Keywords the community tracks. Leaderboards and proofs accept any
    /// keyword; this list drives suggestions and display.
    #[serde(default = "default_tracked_keywords")]
    pub tracked_keywords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leaderboard_limit: default_leaderboard_limit(),
            tracked_keywords: default_tracked_keywords(),
        }
    }
}

fn default_leaderboard_limit() -> u32 {
    10
}

fn default_tracked_keywords() -> Vec<String> {
    [
        "gm",
        "good morning",
        "proof",
        "zk proof",
        "help",
        "active",
        "contributor",
        "how are you",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Achievement rule set configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AchievementsConfig {
    /// Ordered rule table. Evaluation and display follow this order.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

impl Default for AchievementsConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// The metric an achievement rule thresholds against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Total stored messages in the guild.
    MessageCount,
    /// Whole days since the user's first stored message.
    TenureDays,
    /// Consecutive active calendar days ending at the most recent.
    ActivityStreak,
    /// Whole-word occurrences of `keyword` across the user's messages.
    KeywordCount,
    /// Proofs generated by the user.
    ProofCount,
}

/// One declarative achievement rule: a metric, a threshold, and display text.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub threshold: u64,
    pub metric: MetricKind,
    /// Required when `metric` is `keyword_count`, ignored otherwise.
    #[serde(default)]
    pub keyword: Option<String>,
}

fn rule(
    id: &str,
    name: &str,
    description: &str,
    emoji: &str,
    threshold: u64,
    metric: MetricKind,
    keyword: Option<&str>,
) -> RuleConfig {
    RuleConfig {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        emoji: emoji.to_string(),
        threshold,
        metric,
        keyword: keyword.map(str::to_string),
    }
}

/// The built-in eight-rule set.
fn default_rules() -> Vec<RuleConfig> {
    vec![
        rule(
            "chatterbox",
            "Chatterbox",
            "1000+ messages",
            "💬",
            1000,
            MetricKind::MessageCount,
            None,
        ),
        rule(
            "veteran",
            "Veteran",
            "Member for 30+ days",
            "🏛️",
            30,
            MetricKind::TenureDays,
            None,
        ),
        rule(
            "early_bird",
            "Early Bird",
            "Active 3+ days in a row",
            "🌅",
            3,
            MetricKind::ActivityStreak,
            None,
        ),
        rule(
            "gm_champion",
            "GM Champion",
            "Said \"gm\" 50+ times",
            "🏆",
            50,
            MetricKind::KeywordCount,
            Some("gm"),
        ),
        rule(
            "proof_expert",
            "Proof Expert",
            "Said \"proof\" 100+ times",
            "🎓",
            100,
            MetricKind::KeywordCount,
            Some("proof"),
        ),
        rule(
            "proof_master",
            "Proof Master",
            "Generated 10+ proofs",
            "📜",
            10,
            MetricKind::ProofCount,
            None,
        ),
        rule(
            "consistent",
            "Consistent",
            "Active 7+ days in a row",
            "📅",
            7,
            MetricKind::ActivityStreak,
            None,
        ),
        rule(
            "helper",
            "Helper",
            "Said \"help\" 25+ times",
            "🤝",
            25,
            MetricKind::KeywordCount,
            Some("help"),
        ),
    ]
}
