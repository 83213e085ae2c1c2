// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vouch prove` command implementation.
//!
//! Generates and persists a proof over the target's current message
//! history, then prints the stored record with its assigned id.

use vouch_core::types::ProofType;
use vouch_core::VouchError;
use vouch_engine::{Identity, ProofRequest, VouchService};

use crate::render;

/// Run the `vouch prove` command.
#[allow(clippy::too_many_arguments)]
pub async fn run_prove(
    service: &VouchService,
    proof_type: ProofType,
    requester: Identity,
    target: Identity,
    guild_id: &str,
    keyword: Option<String>,
    json: bool,
    plain: bool,
) -> Result<(), VouchError> {
    let request = ProofRequest {
        proof_type,
        requester,
        target,
        guild_id: guild_id.to_string(),
        keyword,
    };
    let proof = service.generate_proof(&request).await?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_config::model::VouchConfig;
    use vouch_core::types::Message;
    use vouch_storage::Database;

    #[tokio::test]
    async fn prove_persists_and_returns_the_record() {
        let db = Database::open_in_memory().await.unwrap();
        let service = VouchService::new(db, &VouchConfig::default());
        service
            .ingest(&Message {
                id: "m1".to_string(),
                user_id: "alice".to_string(),
                username: "alice".to_string(),
                content: "gm".to_string(),
                timestamp: 1_000,
                channel_id: "c1".to_string(),
                channel_name: None,
                guild_id: "g1".to_string(),
                guild_name: None,
            })
            .await
            .unwrap();

        run_prove(
            &service,
            ProofType::MessageCount,
            Identity {
                user_id: "bob".to_string(),
                username: "bob".to_string(),
            },
            Identity {
                user_id: "alice".to_string(),
                username: "alice".to_string(),
            },
            "g1",
            None,
            true,
            true,
        )
        .await
        .unwrap();

        let stored = service.verify_proof(1).await.unwrap();
        assert_eq!(stored.claim, "alice sent 1 message");
    }
}
