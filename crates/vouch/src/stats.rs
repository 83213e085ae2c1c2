// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch stats` command implementation.

use colored::Colorize;
use serde::Serialize;
use vouch_core::types::UserStats;
use vouch_core::VouchError;
use vouch_engine::VouchService;

use crate::render;

/// Structured stats output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatsResponse<'a> {
    pub user_id: &'a str,
    pub guild_id: &'a str,
    #[serde(flatten)]
    pub stats: UserStats,
}

/// Run the `vouch stats` command.
pub async fn run_stats(
    service: &VouchService,
    user_id: &str,
    guild_id: &str,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let stats = service.user_stats(user_id, guild_id).await?;

    if json {
        let resp = StatsResponse {
            user_id,
            guild_id,
            stats,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = render::use_color(plain);
    println!();
    if use_color {
        println!("  Activity stats for {}", user_id.cyan().bold());
    } else {
        println!("  Activity stats for {user_id}");
    }
    println!("  {}", "-".repeat(35));
    println!("    Messages:     {}", stats.message_count);
    if let Some(first) = stats.first_message {
        println!("    First seen:   {}", render::format_ts(first));
    }
    if let Some(last) = stats.last_message {
        println!("    Last seen:    {}", render::format_ts(last));
    }
    if let Some(channel) = &stats.most_active_channel {
        println!(
            "    Top channel:  #{channel} ({} messages)",
            stats.most_active_channel_count
        );
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_response_flattens_fields() {
        let resp = StatsResponse {
            user_id: "u1",
            guild_id: "g1",
            stats: UserStats {
                message_count: 3,
                first_message: Some(1_000),
                last_message: Some(3_000),
                most_active_channel: Some("general".to_string()),
                most_active_channel_count: 3,
            },
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"user_id\":\"u1\""));
        assert!(json.contains("\"message_count\":3"));
        assert!(!json.contains("\"stats\""));
    }
}
