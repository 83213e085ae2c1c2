// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proof generation: claim/result text and the data commitment hash.
//!
//! A proof commits to the snapshot of messages it was computed from. The
//! hash is SHA-256 over the canonical JSON serialization of the snapshot,
//! truncated to 16 lowercase hex characters. The snapshot order supplied by
//! the caller (the store's default retrieval order) is part of the
//! commitment and is never re-sorted here. Generation never persists;
//! the proof store assigns ids.

use serde::Serialize;
use sha2::{Digest, Sha256};
use vouch_core::types::{ProofDraft, ProofType};
use vouch_core::VouchError;

use crate::stats::now_ms;

/// Hash commitment length in hex characters.
const DATA_HASH_LEN: usize = 16;

/// Snapshot entry for a message-count proof: identity and time only.
#[derive(Debug, Clone, Serialize)]
pub struct CountSnapshotEntry {
    pub id: String,
    pub timestamp: i64,
}

/// Snapshot entry for a keyword proof: content is part of the commitment,
/// since the claimed fact is computed from it.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordSnapshotEntry {
    pub id: String,
    pub content: String,
    pub timestamp: i64,
}

/// A requester or target identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

/// Compute the data commitment hash over an ordered snapshot.
///
/// Deterministic: identical input order and values produce byte-identical
/// serialization and therefore the identical hash.
pub fn data_hash<T: Serialize>(snapshot: &[T]) -> Result<String, VouchError> {
    let canonical = serde_json::to_vec(snapshot)
        .map_err(|e| VouchError::Internal(format!("snapshot serialization failed: {e}")))?;
    let digest = Sha256::digest(&canonical);
    let mut hash = hex::encode(digest);
    hash.truncate(DATA_HASH_LEN);
    Ok(hash)
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Build a message-count proof draft.
pub fn message_count_proof(
    requester: &Identity,
    target: &Identity,
    message_count: u64,
    guild_id: &str,
    snapshot: &[CountSnapshotEntry],
) -> Result<ProofDraft, VouchError> {
    let s = plural(message_count);
    Ok(ProofDraft {
        requester_id: requester.user_id.clone(),
        requester_username: requester.username.clone(),
        target_user_id: target.user_id.clone(),
        target_username: target.username.clone(),
        proof_type: ProofType::MessageCount,
        claim: format!("{} sent {message_count} message{s}", target.username),
        result: format!("✓ VERIFIED - {message_count} message{s}"),
        data_hash: data_hash(snapshot)?,
        guild_id: guild_id.to_string(),
        timestamp: now_ms(),
    })
}

/// Build a keyword-count proof draft.
pub fn keyword_count_proof(
    requester: &Identity,
    target: &Identity,
    keyword: &str,
    occurrences: u64,
    guild_id: &str,
    snapshot: &[KeywordSnapshotEntry],
) -> Result<ProofDraft, VouchError> {
    let s = plural(occurrences);
    Ok(ProofDraft {
        requester_id: requester.user_id.clone(),
        requester_username: requester.username.clone(),
        target_user_id: target.user_id.clone(),
        target_username: target.username.clone(),
        proof_type: ProofType::KeywordCount,
        claim: format!(
            "{} said \"{keyword}\" {occurrences} time{s}",
            target.username
        ),
        result: format!("✓ VERIFIED - {occurrences} occurrence{s}"),
        data_hash: data_hash(snapshot)?,
        guild_id: guild_id.to_string(),
        timestamp: now_ms(),
    })
}

/// Format a proof id for display: zero-left-pad to 5 digits, never truncate.
pub fn format_proof_id(proof_id: i64) -> String {
    format!("{proof_id:05}")
}
