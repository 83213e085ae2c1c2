// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch server-stats` command implementation.

use colored::Colorize;
use serde::Serialize;
use vouch_core::types::GuildStats;
use vouch_core::VouchError;
use vouch_engine::VouchService;

use crate::render;

/// Structured server-stats output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct ServerStatsResponse<'a> {
    pub guild_id: &'a str,
    #[serde(flatten)]
    pub stats: GuildStats,
}

/// Run the `vouch server-stats` command.
pub async fn run_server_stats(
    service: &VouchService,
    guild_id: &str,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let stats = service.guild_stats(guild_id).await?;

    if json {
        let resp = ServerStatsResponse { guild_id, stats };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = render::use_color(plain);
    println!();
    if use_color {
        println!("  Server stats for {}", guild_id.cyan().bold());
    } else {
        println!("  Server stats for {guild_id}");
    }
    println!("  {}", "-".repeat(35));
    println!("    Messages:      {}", stats.total_messages);
    println!("    Unique users:  {}", stats.unique_users);
    if let Some(oldest) = stats.oldest_message {
        println!("    Tracking since: {}", render::format_ts(oldest));
    }
    println!();
    Ok(())
}
