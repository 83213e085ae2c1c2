// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch leaderboard` command implementation.

use colored::Colorize;
use serde::Serialize;
use vouch_core::types::RankingEntry;
use vouch_core::VouchError;
use vouch_engine::{LeaderboardKind, LeaderboardRequest, Timeframe, VouchService};

use crate::render;

/// Structured leaderboard output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse<'a> {
    pub guild_id: &'a str,
    pub timeframe: &'static str,
    pub keyword: Option<&'a str>,
    pub entries: &'a [RankingEntry],
}

/// Run the `vouch leaderboard` command.
pub async fn run_leaderboard(
    service: &VouchService,
    guild_id: &str,
    timeframe: Timeframe,
    keyword: Option<String>,
    limit: Option<u32>,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let kind = if keyword.is_some() {
        LeaderboardKind::Keyword
    } else {
        LeaderboardKind::MostActive
    };
    let request = LeaderboardRequest {
        kind,
        timeframe,
        guild_id: guild_id.to_string(),
        keyword: keyword.clone(),
        limit,
    };
    let entries = service.leaderboard(&request).await?;

    if json {
        let resp = LeaderboardResponse {
            guild_id,
            timeframe: timeframe.label(),
            keyword: keyword.as_deref(),
            entries: &entries,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = render::use_color(plain);
    let title = match &keyword {
        Some(k) => format!(
            "{} leaderboard - {}",
            vouch_core::keyword::display_name(k),
            timeframe.label()
        ),
        None => format!("Most active - {}", timeframe.label()),
    };
    println!();
    if use_color {
        println!("  {}", title.bold());
    } else {
        println!("  {title}");
    }
    println!("  {}", "-".repeat(35));
    for (i, entry) in entries.iter().enumerate() {
        let rank = format!("{:>2}.", i + 1);
        if use_color && i == 0 {
            println!(
                "    {rank} {} ({})",
                entry.username.yellow().bold(),
                entry.count
            );
        } else {
            println!("    {rank} {} ({})", entry.username, entry.count);
        }
    }
    println!();
    Ok(())
}
