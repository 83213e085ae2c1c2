// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch ingest` command implementation.
//!
//! Reads JSON Lines from a file or stdin, one message object per line,
//! and records each into the message store. Re-ingesting a line with an
//! already-stored id replaces that row, so imports are idempotent.

use std::fs::File;
use std::io::{BufRead, BufReader};

use serde::Serialize;
use vouch_core::types::Message;
use vouch_core::VouchError;
use vouch_engine::VouchService;

/// Structured ingest output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub stored: u64,
    pub skipped_blank: u64,
}

/// Run the `vouch ingest` command.
pub async fn run_ingest(
    service: &VouchService,
    file: &str,
    json: bool,
) -> Result<(), VouchError> {
    let reader: Box<dyn BufRead> = if file == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let f = File::open(file)
            .map_err(|e| VouchError::Validation(format!("cannot open {file}: {e}")))?;
        Box::new(BufReader::new(f))
    };

    let mut stored = 0_u64;
    let mut skipped_blank = 0_u64;
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| VouchError::Internal(format!("read failed at line {}: {e}", lineno + 1)))?;
        if line.trim().is_empty() {
            skipped_blank += 1;
            continue;
        }
        let message: Message = serde_json::from_str(&line).map_err(|e| {
            VouchError::Validation(format!("invalid message on line {}: {e}", lineno + 1))
        })?;
        service.ingest(&message).await?;
        stored += 1;
    }

    if json {
        let resp = IngestResponse {
            stored,
            skipped_blank,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&resp).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        let s = if stored == 1 { "" } else { "s" };
        println!("stored {stored} message{s}");
    }
    Ok(())
}
