// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation engine: per-user statistics, rankings, and streaks.
//!
//! Everything here is derived and uncached: each call recomputes from the
//! message store. Reads may interleave with concurrent ingest; stats are
//! advisory, so read skew between separate calls is acceptable.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use vouch_core::{KeywordMatcher, RankingEntry, UserStats, VouchError};
use vouch_storage::queries::messages;
use vouch_storage::Database;

pub(crate) const DAY_MS: i64 = 86_400_000;

/// Current time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Derived statistics for a (user, guild) pair.
///
/// Zero messages yields a zeroed summary with absent first/last timestamps;
/// callers decide whether "no data" is worth reporting.
pub async fn user_stats(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<UserStats, VouchError> {
    messages::user_activity_summary(db, user_id, guild_id).await
}

/// Top users by message count, optionally windowed to `since_ts`.
pub async fn leaderboard(
    db: &Database,
    guild_id: &str,
    limit: u32,
    since_ts: Option<i64>,
) -> Result<Vec<RankingEntry>, VouchError> {
    messages::guild_message_counts(db, guild_id, since_ts, limit).await
}

/// Top users by whole-word keyword occurrences.
///
/// Scans every matching message's content with the keyword matcher --
/// O(messages) per call, the dominant cost path. A materialized per-keyword
/// counter updated on ingest would replace this scan if per-guild volume
/// outgrows it; the query contract would not change.
pub async fn keyword_leaderboard(
    db: &Database,
    keyword: &str,
    guild_id: &str,
    limit: u32,
    since_ts: Option<i64>,
) -> Result<Vec<RankingEntry>, VouchError> {
    let matcher = KeywordMatcher::new(keyword)?;
    let rows = messages::guild_messages_for_scan(db, guild_id, since_ts).await?;

    // BTreeMap keyed by user id keeps accumulation order-independent.
    let mut totals: BTreeMap<String, (String, u64)> = BTreeMap::new();
    for row in rows {
        let hits = matcher.count(&row.content) as u64;
        if hits == 0 {
            continue;
        }
        let entry = totals.entry(row.user_id).or_insert((row.username, 0));
        entry.1 += hits;
    }

    let mut ranking: Vec<RankingEntry> = totals
        .into_iter()
        .map(|(user_id, (username, count))| RankingEntry {
            user_id,
            username,
            count,
        })
        .collect();
    // Descending by count; BTreeMap iteration already ordered ties by user id.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(limit as usize);
    Ok(ranking)
}

/// Whole-word occurrences of `keyword` across one user's messages.
pub async fn count_keyword_for_user(
    db: &Database,
    user_id: &str,
    keyword: &str,
    guild_id: &str,
    since_ts: Option<i64>,
) -> Result<u64, VouchError> {
    let matcher = KeywordMatcher::new(keyword)?;
    let contents = messages::contents_by_user_in_guild(db, user_id, guild_id, since_ts).await?;
    Ok(contents.iter().map(|c| matcher.count(c) as u64).sum())
}

/// Length of the user's current activity streak in consecutive UTC calendar
/// days, counted backwards from the most recent active date.
///
/// A user with no messages has streak 0; activity on a single day is
/// streak 1. The run stops at the first gap greater than one day.
pub async fn activity_streak(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<u32, VouchError> {
    let dates = messages::distinct_activity_dates(db, user_id, guild_id).await?;
    let mut parsed = Vec::with_capacity(dates.len());
    for date in &dates {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| VouchError::Internal(format!("bad activity date `{date}`: {e}")))?;
        parsed.push(day);
    }
    Ok(streak_from_dates(&parsed))
}

/// Count the maximal run of consecutive dates in a newest-first list.
fn streak_from_dates(dates_desc: &[NaiveDate]) -> u32 {
    let mut streak = 0;
    let mut prev: Option<NaiveDate> = None;
    for &day in dates_desc {
        match prev {
            None => streak = 1,
            Some(p) if (p - day).num_days() == 1 => streak += 1,
            Some(_) => break,
        }
        prev = Some(day);
    }
    streak
}

/// Whole days elapsed since the user's first message in the guild, floored.
/// 0 when the user has no messages.
pub async fn days_since_first_message(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<u64, VouchError> {
    days_since_first_message_at(db, user_id, guild_id, now_ms()).await
}

/// As [`days_since_first_message`], with an explicit "now" for testing.
pub async fn days_since_first_message_at(
    db: &Database,
    user_id: &str,
    guild_id: &str,
    now_ms: i64,
) -> Result<u64, VouchError> {
    let first = messages::first_message_ts(db, user_id, guild_id).await?;
    Ok(match first {
        Some(ts) if now_ms > ts => ((now_ms - ts) / DAY_MS) as u64,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::Message;
    use vouch_storage::queries::messages::insert_message;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn msg_on(id: &str, user: &str, content: &str, timestamp: i64) -> Message {
        Message {
            id: id.to_string(),
            user_id: user.to_string(),
            username: format!("{user}#0001"),
            content: content.to_string(),
            timestamp,
            channel_id: "chan-1".to_string(),
            channel_name: Some("general".to_string()),
            guild_id: "guild-1".to_string(),
            guild_name: None,
        }
    }

    fn ms_at(date: &str) -> i64 {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        day.and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp_millis()
    }

    #[tokio::test]
    async fn zero_history_yields_zeroes() {
        let db = test_db().await;
        let stats = user_stats(&db, "ghost", "guild-1").await.unwrap();
        assert_eq!(stats.message_count, 0);
        assert!(stats.first_message.is_none());
        assert_eq!(activity_streak(&db, "ghost", "guild-1").await.unwrap(), 0);
        assert_eq!(
            days_since_first_message(&db, "ghost", "guild-1").await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn streak_counts_run_ending_at_latest_date() {
        let db = test_db().await;
        for (i, date) in ["2024-01-10", "2024-01-11", "2024-01-12", "2024-01-05"]
            .iter()
            .enumerate()
        {
            insert_message(&db, &msg_on(&format!("m{i}"), "alice", "hi", ms_at(date)))
                .await
                .unwrap();
        }
        // Three consecutive days ending 2024-01-12; the gap back to 01-05 breaks the run.
        assert_eq!(activity_streak(&db, "alice", "guild-1").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn streak_single_day_is_one() {
        let db = test_db().await;
        insert_message(&db, &msg_on("m1", "alice", "hi", ms_at("2024-03-01")))
            .await
            .unwrap();
        insert_message(&db, &msg_on("m2", "alice", "again", ms_at("2024-03-01")))
            .await
            .unwrap();
        assert_eq!(activity_streak(&db, "alice", "guild-1").await.unwrap(), 1);
    }

    #[test]
    fn streak_from_dates_handles_gaps() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert_eq!(streak_from_dates(&[]), 0);
        assert_eq!(streak_from_dates(&[d("2024-01-10")]), 1);
        assert_eq!(
            streak_from_dates(&[d("2024-01-10"), d("2024-01-09"), d("2024-01-07")]),
            2
        );
    }

    #[tokio::test]
    async fn days_since_first_message_floors() {
        let db = test_db().await;
        let first = ms_at("2024-01-01");
        insert_message(&db, &msg_on("m1", "alice", "hi", first)).await.unwrap();

        // 10.5 days later floors to 10.
        let now = first + 10 * DAY_MS + DAY_MS / 2;
        assert_eq!(
            days_since_first_message_at(&db, "alice", "guild-1", now).await.unwrap(),
            10
        );
    }

    #[tokio::test]
    async fn keyword_leaderboard_accumulates_and_ranks() {
        let db = test_db().await;
        insert_message(&db, &msg_on("m1", "alice", "help help help", 1_000)).await.unwrap();
        insert_message(&db, &msg_on("m2", "bob", "help me", 2_000)).await.unwrap();
        insert_message(&db, &msg_on("m3", "bob", "helper is no match", 3_000)).await.unwrap();
        insert_message(&db, &msg_on("m4", "carol", "nothing here", 4_000)).await.unwrap();

        let ranking = keyword_leaderboard(&db, "help", "guild-1", 10, None).await.unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!((ranking[0].user_id.as_str(), ranking[0].count), ("alice", 3));
        assert_eq!((ranking[1].user_id.as_str(), ranking[1].count), ("bob", 1));
    }

    #[tokio::test]
    async fn keyword_leaderboard_ties_break_on_user_id() {
        let db = test_db().await;
        insert_message(&db, &msg_on("m1", "zed", "gm", 1_000)).await.unwrap();
        insert_message(&db, &msg_on("m2", "amy", "gm", 2_000)).await.unwrap();

        let ranking = keyword_leaderboard(&db, "gm", "guild-1", 10, None).await.unwrap();
        assert_eq!(ranking[0].user_id, "amy");
        assert_eq!(ranking[1].user_id, "zed");
    }

    #[tokio::test]
    async fn keyword_count_respects_window() {
        let db = test_db().await;
        insert_message(&db, &msg_on("m1", "alice", "gm", 1_000)).await.unwrap();
        insert_message(&db, &msg_on("m2", "alice", "gm gm", 5_000)).await.unwrap();

        let all = count_keyword_for_user(&db, "alice", "gm", "guild-1", None).await.unwrap();
        assert_eq!(all, 3);
        let recent = count_keyword_for_user(&db, "alice", "gm", "guild-1", Some(5_000))
            .await
            .unwrap();
        assert_eq!(recent, 2);
    }
}
