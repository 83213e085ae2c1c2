// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-facing service operations.
//!
//! `VouchService` is what the command/presentation layer talks to: it
//! validates caller input before touching the store, maps empty histories
//! to `EmptyData`, and orchestrates the aggregation engine, achievement
//! evaluator, proof generator, and the two stores.

use tracing::{debug, info};
use vouch_config::model::{RuleConfig, VouchConfig};
use vouch_core::types::{GuildStats, Message, Proof, ProofType, RankingEntry, UserStats};
use vouch_core::VouchError;
use vouch_storage::queries::{messages, proofs as proof_queries};
use vouch_storage::Database;

use crate::achievements::{self, AchievementReport};
use crate::proofs::{
    format_proof_id, keyword_count_proof, message_count_proof, CountSnapshotEntry, Identity,
    KeywordSnapshotEntry,
};
use crate::stats::{self, DAY_MS};

/// Time window for leaderboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Week,
    Month,
    AllTime,
}

impl Timeframe {
    /// Inclusive lower timestamp bound relative to `now_ms`, if windowed.
    pub fn since(&self, now_ms: i64) -> Option<i64> {
        match self {
            Timeframe::Week => Some(now_ms - 7 * DAY_MS),
            Timeframe::Month => Some(now_ms - 30 * DAY_MS),
            Timeframe::AllTime => None,
        }
    }

    /// Display label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Week => "This Week",
            Timeframe::Month => "This Month",
            Timeframe::AllTime => "All Time",
        }
    }
}

/// Which metric a leaderboard ranks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardKind {
    MostActive,
    Keyword,
}

/// A leaderboard lookup.
#[derive(Debug, Clone)]
pub struct LeaderboardRequest {
    pub kind: LeaderboardKind,
    pub timeframe: Timeframe,
    pub guild_id: String,
    /// Required when `kind` is `Keyword`.
    pub keyword: Option<String>,
    /// Overrides the configured limit when set.
    pub limit: Option<u32>,
}

/// A proof generation request.
#[derive(Debug, Clone)]
pub struct ProofRequest {
    pub proof_type: ProofType,
    pub requester: Identity,
    pub target: Identity,
    pub guild_id: String,
    /// Required when `proof_type` is `KeywordCount`.
    pub keyword: Option<String>,
}

/// A user's achievement profile: the stats the evaluation saw plus the
/// unlocked/locked partitions.
#[derive(Debug, Clone)]
pub struct AchievementProfile {
    pub stats: UserStats,
    pub report: AchievementReport,
}

/// Store-wide totals.
#[derive(Debug, Clone, Copy)]
pub struct Totals {
    pub messages: u64,
    pub proofs: u64,
}

/// The service facade over the message store, proof store, and engine.
#[derive(Clone)]
pub struct VouchService {
    db: Database,
    leaderboard_limit: u32,
    tracked_keywords: Vec<String>,
    rules: Vec<RuleConfig>,
}

impl VouchService {
    /// Build the service from an opened database and validated config.
    pub fn new(db: Database, config: &VouchConfig) -> Self {
        Self {
            db,
            leaderboard_limit: config.engine.leaderboard_limit,
            tracked_keywords: config.engine.tracked_keywords.clone(),
            rules: config.achievements.rules.clone(),
        }
    }

    /// Record an inbound chat message (insert-or-replace by id).
    pub async fn ingest(&self, message: &Message) -> Result<(), VouchError> {
        messages::insert_message(&self.db, message).await?;
        debug!(
            message_id = %message.id,
            user = %message.username,
            channel = message.channel_name.as_deref().unwrap_or(&message.channel_id),
            "message stored"
        );
        Ok(())
    }

    /// Per-user statistics for a guild.
    ///
    /// # Errors
    ///
    /// `EmptyData` when the user has no stored messages in the guild.
    pub async fn user_stats(&self, user_id: &str, guild_id: &str) -> Result<UserStats, VouchError> {
        let stats = stats::user_stats(&self.db, user_id, guild_id).await?;
        if stats.message_count == 0 {
            return Err(VouchError::EmptyData(format!(
                "no messages recorded for user {user_id}"
            )));
        }
        Ok(stats)
    }

    /// Ranked leaderboard per the request.
    ///
    /// # Errors
    ///
    /// `Validation` for a keyword leaderboard without a keyword;
    /// `EmptyData` when nothing matches the window.
    pub async fn leaderboard(
        &self,
        request: &LeaderboardRequest,
    ) -> Result<Vec<RankingEntry>, VouchError> {
        let limit = request.limit.unwrap_or(self.leaderboard_limit);
        let since = request.timeframe.since(stats::now_ms());

        let ranking = match request.kind {
            LeaderboardKind::MostActive => {
                stats::leaderboard(&self.db, &request.guild_id, limit, since).await?
            }
            LeaderboardKind::Keyword => {
                let keyword = required_keyword(request.keyword.as_deref(), "keyword leaderboard")?;
                stats::keyword_leaderboard(&self.db, keyword, &request.guild_id, limit, since)
                    .await?
            }
        };

        if ranking.is_empty() {
            return Err(VouchError::EmptyData(
                "no activity in this timeframe".to_string(),
            ));
        }
        Ok(ranking)
    }

    /// Evaluate achievements for a user.
    ///
    /// # Errors
    ///
    /// `EmptyData` when the user has no stored messages in the guild.
    pub async fn achievements(
        &self,
        user_id: &str,
        guild_id: &str,
    ) -> Result<AchievementProfile, VouchError> {
        let stats = self.user_stats(user_id, guild_id).await?;
        let report =
            achievements::evaluate(&self.db, &self.rules, &stats, user_id, guild_id).await?;
        Ok(AchievementProfile { stats, report })
    }

    /// Generate, persist, and return a proof.
    ///
    /// The snapshot is the target's full message history in the store's
    /// default retrieval order (newest first); that order is part of the
    /// hash commitment.
    ///
    /// # Errors
    ///
    /// `Validation` for a keyword proof without a keyword; `EmptyData`
    /// when the target has no stored messages.
    pub async fn generate_proof(&self, request: &ProofRequest) -> Result<Proof, VouchError> {
        // Caller input is rejected before the store is touched.
        let matcher = match request.proof_type {
            ProofType::KeywordCount => {
                let keyword = required_keyword(request.keyword.as_deref(), "keyword proof")?;
                Some(vouch_core::KeywordMatcher::new(keyword)?)
            }
            ProofType::MessageCount => None,
        };

        let history = messages::messages_by_user(&self.db, &request.target.user_id).await?;
        if history.is_empty() {
            return Err(VouchError::EmptyData(format!(
                "no messages found for {}; cannot generate proof",
                request.target.username
            )));
        }

        let draft = match matcher {
            None => {
                let snapshot: Vec<CountSnapshotEntry> = history
                    .iter()
                    .map(|m| CountSnapshotEntry {
                        id: m.id.clone(),
                        timestamp: m.timestamp,
                    })
                    .collect();
                message_count_proof(
                    &request.requester,
                    &request.target,
                    history.len() as u64,
                    &request.guild_id,
                    &snapshot,
                )?
            }
            Some(matcher) => {
                let occurrences: u64 =
                    history.iter().map(|m| matcher.count(&m.content) as u64).sum();
                let snapshot: Vec<KeywordSnapshotEntry> = history
                    .iter()
                    .map(|m| KeywordSnapshotEntry {
                        id: m.id.clone(),
                        content: m.content.clone(),
                        timestamp: m.timestamp,
                    })
                    .collect();
                keyword_count_proof(
                    &request.requester,
                    &request.target,
                    matcher.keyword(),
                    occurrences,
                    &request.guild_id,
                    &snapshot,
                )?
            }
        };

        let proof_id = proof_queries::insert_proof(&self.db, &draft).await?;
        info!(
            proof_id = %format_proof_id(proof_id),
            proof_type = %draft.proof_type,
            target = %request.target.username,
            requester = %request.requester.username,
            "proof generated"
        );

        proof_queries::proof_by_id(&self.db, proof_id)
            .await?
            .ok_or_else(|| {
                VouchError::Internal(format!("proof #{proof_id} missing after insert"))
            })
    }

    /// Retrieve a stored proof by id.
    ///
    /// The stored record is returned as-is; the hash is a commitment to
    /// the generation-time snapshot and is not re-derived against live
    /// data.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive id; `NotFound` for an unknown id.
    pub async fn verify_proof(&self, proof_id: i64) -> Result<Proof, VouchError> {
        if proof_id < 1 {
            return Err(VouchError::Validation(
                "proof id must be a positive integer".to_string(),
            ));
        }
        let proof = proof_queries::proof_by_id(&self.db, proof_id)
            .await?
            .ok_or(VouchError::NotFound {
                entity: "proof",
                id: format_proof_id(proof_id),
            })?;
        info!(proof_id = %format_proof_id(proof_id), "proof retrieved for verification");
        Ok(proof)
    }

    /// Proofs previously generated by a requester, newest first.
    pub async fn proofs_by_requester(&self, requester_id: &str) -> Result<Vec<Proof>, VouchError> {
        proof_queries::proofs_by_requester(&self.db, requester_id).await
    }

    /// Guild-wide collection statistics.
    pub async fn guild_stats(&self, guild_id: &str) -> Result<GuildStats, VouchError> {
        messages::guild_stats(&self.db, guild_id).await
    }

    /// Store-wide message and proof totals.
    pub async fn totals(&self) -> Result<Totals, VouchError> {
        Ok(Totals {
            messages: messages::count_all(&self.db).await?,
            proofs: proof_queries::count_all(&self.db).await?,
        })
    }

    /// The configured tracked keywords.
    pub fn tracked_keywords(&self) -> &[String] {
        &self.tracked_keywords
    }

    /// Whether a keyword is on the tracked list (case-insensitive).
    pub fn is_tracked(&self, keyword: &str) -> bool {
        self.tracked_keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

fn required_keyword<'a>(keyword: Option<&'a str>, context: &str) -> Result<&'a str, VouchError> {
    match keyword {
        Some(k) if !k.trim().is_empty() => Ok(k.trim()),
        _ => Err(VouchError::Validation(format!(
            "a keyword is required for a {context}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_service() -> VouchService {
        let db = Database::open_in_memory().await.unwrap();
        VouchService::new(db, &VouchConfig::default())
    }

    fn msg(id: u64, user: &str, content: &str, timestamp: i64) -> Message {
        Message {
            id: format!("m{id}"),
            user_id: user.to_string(),
            username: format!("{user}#0001"),
            content: content.to_string(),
            timestamp,
            channel_id: "chan-1".to_string(),
            channel_name: Some("general".to_string()),
            guild_id: "guild-1".to_string(),
            guild_name: Some("Test Guild".to_string()),
        }
    }

    fn ident(user: &str) -> Identity {
        Identity {
            user_id: user.to_string(),
            username: format!("{user}#0001"),
        }
    }

    #[test]
    fn timeframe_windows() {
        let now = 100 * DAY_MS;
        assert_eq!(Timeframe::Week.since(now), Some(93 * DAY_MS));
        assert_eq!(Timeframe::Month.since(now), Some(70 * DAY_MS));
        assert_eq!(Timeframe::AllTime.since(now), None);
        assert_eq!(Timeframe::Week.label(), "This Week");
    }

    #[tokio::test]
    async fn stats_for_silent_user_is_empty_data() {
        let service = test_service().await;
        let err = service.user_stats("ghost", "guild-1").await.unwrap_err();
        assert!(matches!(err, VouchError::EmptyData(_)));
    }

    #[tokio::test]
    async fn keyword_leaderboard_requires_keyword() {
        let service = test_service().await;
        let request = LeaderboardRequest {
            kind: LeaderboardKind::Keyword,
            timeframe: Timeframe::AllTime,
            guild_id: "guild-1".to_string(),
            keyword: None,
            limit: None,
        };
        let err = service.leaderboard(&request).await.unwrap_err();
        assert!(matches!(err, VouchError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_leaderboard_is_empty_data() {
        let service = test_service().await;
        let request = LeaderboardRequest {
            kind: LeaderboardKind::MostActive,
            timeframe: Timeframe::AllTime,
            guild_id: "guild-1".to_string(),
            keyword: None,
            limit: None,
        };
        let err = service.leaderboard(&request).await.unwrap_err();
        assert!(matches!(err, VouchError::EmptyData(_)));
    }

    #[tokio::test]
    async fn proof_for_silent_user_is_refused() {
        let service = test_service().await;
        let request = ProofRequest {
            proof_type: ProofType::MessageCount,
            requester: ident("req"),
            target: ident("ghost"),
            guild_id: "guild-1".to_string(),
            keyword: None,
        };
        let err = service.generate_proof(&request).await.unwrap_err();
        assert!(matches!(err, VouchError::EmptyData(_)));
    }

    #[tokio::test]
    async fn keyword_proof_requires_keyword() {
        let service = test_service().await;
        service.ingest(&msg(1, "alice", "gm", 1_000)).await.unwrap();
        let request = ProofRequest {
            proof_type: ProofType::KeywordCount,
            requester: ident("req"),
            target: ident("alice"),
            guild_id: "guild-1".to_string(),
            keyword: Some("  ".to_string()),
        };
        let err = service.generate_proof(&request).await.unwrap_err();
        assert!(matches!(err, VouchError::Validation(_)));
    }

    #[tokio::test]
    async fn prove_then_verify_round_trip() {
        let service = test_service().await;
        for i in 0..3 {
            service
                .ingest(&msg(i, "alice", "hello", 1_000 + i as i64))
                .await
                .unwrap();
        }

        let request = ProofRequest {
            proof_type: ProofType::MessageCount,
            requester: ident("bob"),
            target: ident("alice"),
            guild_id: "guild-1".to_string(),
            keyword: None,
        };
        let proof = service.generate_proof(&request).await.unwrap();
        assert_eq!(proof.proof_id, 1);
        assert_eq!(proof.claim, "alice#0001 sent 3 messages");
        assert_eq!(proof.result, "✓ VERIFIED - 3 messages");
        assert_eq!(proof.data_hash.len(), 16);

        let verified = service.verify_proof(proof.proof_id).await.unwrap();
        assert_eq!(verified.claim, proof.claim);
        assert_eq!(verified.data_hash, proof.data_hash);

        let listed = service.proofs_by_requester("bob").await.unwrap();
        assert_eq!(listed.len(), 1);

        let totals = service.totals().await.unwrap();
        assert_eq!(totals.messages, 3);
        assert_eq!(totals.proofs, 1);
    }

    #[tokio::test]
    async fn keyword_proof_counts_whole_words() {
        let service = test_service().await;
        service.ingest(&msg(1, "alice", "gm gm", 1_000)).await.unwrap();
        service.ingest(&msg(2, "alice", "gmail is not gm", 2_000)).await.unwrap();

        let request = ProofRequest {
            proof_type: ProofType::KeywordCount,
            requester: ident("bob"),
            target: ident("alice"),
            guild_id: "guild-1".to_string(),
            keyword: Some("gm".to_string()),
        };
        let proof = service.generate_proof(&request).await.unwrap();
        assert_eq!(proof.claim, "alice#0001 said \"gm\" 3 times");
        assert_eq!(proof.proof_type, ProofType::KeywordCount);
    }

    #[tokio::test]
    async fn verify_rejects_non_positive_ids() {
        let service = test_service().await;
        assert!(matches!(
            service.verify_proof(0).await.unwrap_err(),
            VouchError::Validation(_)
        ));
        assert!(matches!(
            service.verify_proof(-3).await.unwrap_err(),
            VouchError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn verify_unknown_id_is_not_found() {
        let service = test_service().await;
        let err = service.verify_proof(424242).await.unwrap_err();
        match err {
            VouchError::NotFound { entity, id } => {
                assert_eq!(entity, "proof");
                assert_eq!(id, "424242");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tracked_keywords_match_case_insensitively() {
        let service = test_service().await;
        assert!(service.is_tracked("GM"));
        assert!(service.is_tracked("Good Morning"));
        assert!(!service.is_tracked("unlisted"));
    }
}
