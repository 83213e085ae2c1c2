// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared terminal rendering helpers for the command implementations.

use std::io::IsTerminal;

use chrono::DateTime;
use colored::Colorize;
use vouch_core::types::Proof;
use vouch_core::VouchError;
use vouch_engine::format_proof_id;

/// Whether colored output should be used for stdout.
pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

/// Render an epoch-milliseconds timestamp as a UTC date-time string.
pub fn format_ts(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => format!("@{ms}"),
    }
}

/// Print an error to stderr, colored when stderr is a terminal.
pub fn print_error(err: &VouchError) {
    if std::io::stderr().is_terminal() {
        eprintln!("{} {err}", "vouch:".red().bold());
    } else {
        eprintln!("vouch: {err}");
    }
}

/// Print a stored proof as a card.
pub fn print_proof(proof: &Proof, use_color: bool) {
    println!();
    println!("  Proof #{}", format_proof_id(proof.proof_id));
    println!("  {}", "-".repeat(35));
    println!("    Type:      {}", proof.proof_type.display_name());
    println!("    Claim:     {}", proof.claim);
    if use_color {
        println!("    Result:    {}", proof.result.green());
    } else {
        println!("    Result:    {}", proof.result);
    }
    println!("    Data hash: {}", proof.data_hash);
    println!(
        "    Requested: {} by {}",
        format_ts(proof.timestamp),
        proof.requester_username
    );
    println!();
}
