// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Vouch workspace.
//!
//! Timestamps throughout are Unix epoch milliseconds, matching the chat
//! platform's message clock. `created_at` columns are ISO 8601 strings
//! assigned by the storage layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A chat message as recorded by the message store.
///
/// Messages are keyed by the platform-unique `id`; re-delivery of the same
/// id replaces the stored row (upsert semantics). The core never deletes
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Platform-unique message identifier.
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    /// Message creation time in epoch milliseconds.
    pub timestamp: i64,
    pub channel_id: String,
    pub channel_name: Option<String>,
    pub guild_id: String,
    pub guild_name: Option<String>,
}

/// Derived per-user statistics for a (user, guild) pair.
///
/// Never persisted; recomputed from the message store on every request.
/// A user with zero messages has `message_count == 0` and absent
/// first/last timestamps -- callers must treat this as "no data".
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStats {
    pub message_count: u64,
    /// Timestamp of the user's earliest stored message, epoch ms.
    pub first_message: Option<i64>,
    /// Timestamp of the user's latest stored message, epoch ms.
    pub last_message: Option<i64>,
    pub most_active_channel: Option<String>,
    pub most_active_channel_count: u64,
}

/// One row of a leaderboard, ordered descending by `count`.
///
/// Ties are broken by ascending `user_id` so rankings are deterministic
/// across store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub user_id: String,
    pub username: String,
    pub count: u64,
}

/// Guild-wide collection statistics.
#[derive(Debug, Clone, Serialize)]
pub struct GuildStats {
    pub total_messages: u64,
    pub unique_users: u64,
    /// Timestamp of the oldest stored message, epoch ms. Absent when the
    /// guild has no messages.
    pub oldest_message: Option<i64>,
}

/// The kind of fact a proof attests to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProofType {
    MessageCount,
    KeywordCount,
}

impl ProofType {
    /// Human-friendly display name for rendering.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProofType::MessageCount => "Message Count",
            ProofType::KeywordCount => "Keyword Frequency",
        }
    }
}

/// A proof ready for insertion, before the store assigns its id.
///
/// Produced by the proof generator; the generator never persists.
#[derive(Debug, Clone, Serialize)]
pub struct ProofDraft {
    pub requester_id: String,
    pub requester_username: String,
    pub target_user_id: String,
    pub target_username: String,
    pub proof_type: ProofType,
    /// Human-readable assertion, e.g. `"alice sent 42 messages"`.
    pub claim: String,
    /// Verification result text stored alongside the claim.
    pub result: String,
    /// First 16 lowercase hex chars of the SHA-256 over the canonical
    /// snapshot serialization.
    pub data_hash: String,
    pub guild_id: String,
    /// Proof generation time, epoch ms (not message time).
    pub timestamp: i64,
}

/// A persisted, hash-committed proof record.
///
/// Immutable once created. `proof_id` is monotonically increasing,
/// 1-based, and is the sole lookup key for verification. Verification
/// retrieves the stored record without re-deriving the hash: a proof is
/// a commitment to a past snapshot, not a live re-check.
#[derive(Debug, Clone, Serialize)]
pub struct Proof {
    pub proof_id: i64,
    pub requester_id: String,
    pub requester_username: String,
    pub target_user_id: String,
    pub target_username: String,
    pub proof_type: ProofType,
    pub claim: String,
    pub result: String,
    pub data_hash: String,
    pub guild_id: String,
    pub timestamp: i64,
    /// ISO 8601 insertion time assigned by the store.
    pub created_at: String,
}
