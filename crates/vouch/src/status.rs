// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch status` command implementation.
//!
//! Summarizes the store totals and the loaded configuration: database
//! path, configured rule count, and tracked keywords.

use colored::Colorize;
use serde::Serialize;
use vouch_config::VouchConfig;
use vouch_core::VouchError;
use vouch_engine::VouchService;

use crate::render;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse<'a> {
    pub database_path: &'a str,
    pub wal_mode: bool,
    pub messages: u64,
    pub proofs: u64,
    pub rules: usize,
    pub tracked_keywords: &'a [String],
}

/// Run the `vouch status` command.
pub async fn run_status(
    service: &VouchService,
    config: &VouchConfig,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let totals = service.totals().await?;

    if json {
        let resp = StatusResponse {
            database_path: &config.storage.database_path,
            wal_mode: config.storage.wal_mode,
            messages: totals.messages,
            proofs: totals.proofs,
            rules: config.achievements.rules.len(),
            tracked_keywords: service.tracked_keywords(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let use_color = render::use_color(plain);
    println!();
    println!("  vouch status");
    println!("  {}", "-".repeat(35));
    if use_color {
        println!("    Store:     {} {}", "✓".green(), config.storage.database_path);
    } else {
        println!("    Store:     [OK] {}", config.storage.database_path);
    }
    println!("    Messages:  {}", totals.messages);
    println!("    Proofs:    {}", totals.proofs);
    println!("    Rules:     {}", config.achievements.rules.len());
    println!(
        "    Keywords:  {}",
        service.tracked_keywords().join(", ")
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_serializes() {
        let keywords = vec!["gm".to_string(), "help".to_string()];
        let resp = StatusResponse {
            database_path: "vouch.db",
            wal_mode: true,
            messages: 12,
            proofs: 2,
            rules: 8,
            tracked_keywords: &keywords,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"messages\":12"));
        assert!(json.contains("\"wal_mode\":true"));
        assert!(json.contains("\"gm\""));
    }
}
