// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths, sane limits, and well-formed
//! achievement rules.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{MetricKind, VouchConfig};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VouchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !VALID_LOG_LEVELS.contains(&config.bot.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level `{}` is not one of: {}",
                config.bot.log_level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.engine.leaderboard_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "engine.leaderboard_limit must be at least 1".to_string(),
        });
    }

    for keyword in &config.engine.tracked_keywords {
        if keyword.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "engine.tracked_keywords must not contain blank entries".to_string(),
            });
            break;
        }
    }

    validate_rules(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rules(config: &VouchConfig, errors: &mut Vec<ConfigError>) {
    let mut seen_ids = HashSet::new();

    for rule in &config.achievements.rules {
        if rule.id.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "achievements.rules entries must have a non-empty id".to_string(),
            });
            continue;
        }

        if !seen_ids.insert(rule.id.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("achievements.rules id `{}` appears more than once", rule.id),
            });
        }

        if rule.threshold == 0 {
            errors.push(ConfigError::Validation {
                message: format!(
                    "achievements.rules `{}`: threshold must be at least 1",
                    rule.id
                ),
            });
        }

        let keyword_blank = rule
            .keyword
            .as_deref()
            .map(|k| k.trim().is_empty())
            .unwrap_or(true);
        if rule.metric == MetricKind::KeywordCount && keyword_blank {
            errors.push(ConfigError::Validation {
                message: format!(
                    "achievements.rules `{}`: keyword_count metric requires a keyword",
                    rule.id
                ),
            });
        }
    }
}
