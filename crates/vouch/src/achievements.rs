// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch achievements` command implementation.

use colored::Colorize;
use serde::Serialize;
use vouch_core::VouchError;
use vouch_engine::{AchievementReport, VouchService};

use crate::render;

/// Structured achievements output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct AchievementsResponse<'a> {
    pub user_id: &'a str,
    pub guild_id: &'a str,
    pub message_count: u64,
    #[serde(flatten)]
    pub report: AchievementReport,
}

/// Run the `vouch achievements` command.
pub async fn run_achievements(
    service: &VouchService,
    user_id: &str,
    guild_id: &str,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let profile = service.achievements(user_id, guild_id).await?;

    if json {
        let resp = AchievementsResponse {
            user_id,
            guild_id,
            message_count: profile.stats.message_count,
            report: profile.report,
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
        println!("  Achievements for {}", user_id.cyan().bold());
    } else {
        println!("  Achievements for {user_id}");
    }
    println!("  {}", "-".repeat(35));

    if profile.report.unlocked.is_empty() {
        println!("    Nothing unlocked yet.");
    }
    for status in &profile.report.unlocked {
        let line = format!("{} {} - {}", status.emoji, status.name, status.description);
        if use_color {
            println!("    {}", line.green());
        } else {
            println!("    [x] {line}");
        }
    }

    if !profile.report.locked.is_empty() {
        println!();
        println!("  Locked");
        for status in &profile.report.locked {
            // Locked rules always carry progress.
            let progress = status
                .progress
                .map(|p| format!("{}/{}", p.current, p.required))
                .unwrap_or_default();
            println!(
                "    {} {} - {} ({progress})",
                status.emoji, status.name, status.description
            );
        }
    }
    println!();
    Ok(())
}
