// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Achievement evaluation over the declarative rule table.
//!
//! Rules are data (see `vouch_config::model::RuleConfig`): a metric
//! selector plus a threshold. This module is the interpreter -- it resolves
//! each rule's metric against the aggregation engine and partitions the
//! table into unlocked and locked, in definition order. Adding a rule is a
//! config change, never an evaluator change.

use serde::Serialize;
use vouch_config::model::{MetricKind, RuleConfig};
use vouch_core::{UserStats, VouchError};
use vouch_storage::queries::proofs;
use vouch_storage::Database;

use crate::stats;

/// Progress toward a locked rule, in the same metric as its threshold.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Progress {
    pub current: u64,
    pub required: u64,
}

/// One evaluated rule.
///
/// An unlocked rule never reports progress; a locked rule always does.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub unlocked: bool,
    pub progress: Option<Progress>,
}

/// Unlocked/locked partitions for one user, in rule definition order.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementReport {
    pub unlocked: Vec<AchievementStatus>,
    pub locked: Vec<AchievementStatus>,
}

/// Evaluate the rule table against a user's statistics and store-backed
/// metrics.
///
/// `stats` is the precomputed summary for the (user, guild) pair; the
/// other metrics are queried on demand. The streak is fetched at most once
/// even when several rules threshold on it.
pub async fn evaluate(
    db: &Database,
    rules: &[RuleConfig],
    stats: &UserStats,
    user_id: &str,
    guild_id: &str,
) -> Result<AchievementReport, VouchError> {
    let mut unlocked = Vec::new();
    let mut locked = Vec::new();
    let mut streak: Option<u64> = None;

    for rule in rules {
        let current = match rule.metric {
            MetricKind::MessageCount => stats.message_count,
            MetricKind::TenureDays => {
                stats::days_since_first_message(db, user_id, guild_id).await?
            }
            MetricKind::ActivityStreak => match streak {
                Some(s) => s,
                None => {
                    let s = stats::activity_streak(db, user_id, guild_id).await? as u64;
                    streak = Some(s);
                    s
                }
            },
            MetricKind::KeywordCount => {
                let keyword = rule.keyword.as_deref().ok_or_else(|| {
                    VouchError::Validation(format!(
                        "achievement rule `{}` has no keyword",
                        rule.id
                    ))
                })?;
                stats::count_keyword_for_user(db, user_id, keyword, guild_id, None).await?
            }
            MetricKind::ProofCount => proofs::count_by_requester(db, user_id).await?,
        };

        let is_unlocked = current >= rule.threshold;
        let status = AchievementStatus {
            id: rule.id.clone(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            emoji: rule.emoji.clone(),
            unlocked: is_unlocked,
            progress: (!is_unlocked).then_some(Progress {
                current,
                required: rule.threshold,
            }),
        };

        if is_unlocked {
            unlocked.push(status);
        } else {
            locked.push(status);
        }
    }

    Ok(AchievementReport { unlocked, locked })
}
