// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch verify` command implementation.
//!
//! Looks up a stored proof by id and prints the record as generated.
//! The data hash shown is the commitment computed at generation time;
//! it is not re-derived against the live store.

use vouch_core::VouchError;
use vouch_engine::VouchService;

use crate::render;

/// Run the `vouch verify` command.
pub async fn run_verify(
    service: &VouchService,
    proof_id: i64,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let proof = service.verify_proof(proof_id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&proof).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        render::print_proof(&proof, render::use_color(plain));
    }
    Ok(())
}
