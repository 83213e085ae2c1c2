// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message store queries.
//!
//! Optional `since_ts` windows are inclusive (`timestamp >= since_ts`) and
//! default to the whole history. Aggregations that compose several reads
//! (user summary, guild stats) run inside a single `call` closure so they
//! observe one message set with no tearing between the reads.

use rusqlite::params;
use vouch_core::VouchError;

use crate::database::{map_tr_err, Database};
use crate::models::{GuildStats, Message, RankingEntry, UserStats};

/// One row of a guild-wide content scan.
#[derive(Debug, Clone)]
pub struct ScanRow {
    pub user_id: String,
    pub username: String,
    pub content: String,
}

/// Insert a message, replacing any previously stored row with the same id.
pub async fn insert_message(db: &Database, msg: &Message) -> Result<(), VouchError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO messages
                 (id, user_id, username, content, timestamp, channel_id, channel_name, guild_id, guild_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    msg.id,
                    msg.user_id,
                    msg.username,
                    msg.content,
                    msg.timestamp,
                    msg.channel_id,
                    msg.channel_name,
                    msg.guild_id,
                    msg.guild_name,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored messages.
pub async fn count_all(db: &Database) -> Result<u64, VouchError> {
    db.connection()
        .call(|conn| {
            conn.query_row("SELECT COUNT(*) FROM messages", [], |row| {
                row.get::<_, u64>(0)
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Number of stored messages for a user across all guilds.
pub async fn count_by_user(db: &Database, user_id: &str) -> Result<u64, VouchError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM messages WHERE user_id = ?1",
                params![user_id],
                |row| row.get::<_, u64>(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// All of a user's messages, newest first.
///
/// This is the snapshot order committed by proof hashes; do not re-sort.
pub async fn messages_by_user(db: &Database, user_id: &str) -> Result<Vec<Message>, VouchError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, username, content, timestamp,
                        channel_id, channel_name, guild_id, guild_name
                 FROM messages WHERE user_id = ?1
                 ORDER BY timestamp DESC",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(Message {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    username: row.get(2)?,
                    content: row.get(3)?,
                    timestamp: row.get(4)?,
                    channel_id: row.get(5)?,
                    channel_name: row.get(6)?,
                    guild_id: row.get(7)?,
                    guild_name: row.get(8)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Per-user activity summary for a (user, guild) pair.
///
/// Zero messages is not an error: the summary comes back with count 0 and
/// absent first/last timestamps.
pub async fn user_activity_summary(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<UserStats, VouchError> {
    let user_id = user_id.to_string();
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            let (count, first, last): (u64, Option<i64>, Option<i64>) = conn.query_row(
                "SELECT COUNT(*), MIN(timestamp), MAX(timestamp)
                 FROM messages WHERE user_id = ?1 AND guild_id = ?2",
                params![user_id, guild_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            let mut stmt = conn.prepare(
                "SELECT COALESCE(channel_name, channel_id), COUNT(*) AS c
                 FROM messages WHERE user_id = ?1 AND guild_id = ?2
                 GROUP BY channel_id ORDER BY c DESC, channel_id ASC LIMIT 1",
            )?;
            let top_channel = stmt
                .query_row(params![user_id, guild_id], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
                })
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;

            let (most_active_channel, most_active_channel_count) = match top_channel {
                Some((name, c)) => (Some(name), c),
                None => (None, 0),
            };

            Ok(UserStats {
                message_count: count,
                first_message: first,
                last_message: last,
                most_active_channel,
                most_active_channel_count,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Timestamp of a user's earliest message in a guild, if any.
pub async fn first_message_ts(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<Option<i64>, VouchError> {
    let user_id = user_id.to_string();
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT MIN(timestamp) FROM messages WHERE user_id = ?1 AND guild_id = ?2",
                params![user_id, guild_id],
                |row| row.get::<_, Option<i64>>(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Per-user message counts for a guild, ordered by count descending.
///
/// Ties break on ascending user id so rankings are deterministic. The
/// reported username is taken from the user's most recent message.
pub async fn guild_message_counts(
    db: &Database,
    guild_id: &str,
    since_ts: Option<i64>,
    limit: u32,
) -> Result<Vec<RankingEntry>, VouchError> {
    let guild_id = guild_id.to_string();
    let since = since_ts.unwrap_or(i64::MIN);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id,
                        (SELECT username FROM messages m2
                         WHERE m2.user_id = m.user_id AND m2.guild_id = m.guild_id
                         ORDER BY m2.timestamp DESC LIMIT 1) AS username,
                        COUNT(*) AS count
                 FROM messages m
                 WHERE guild_id = ?1 AND timestamp >= ?2
                 GROUP BY user_id
                 ORDER BY count DESC, user_id ASC
                 LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![guild_id, since, limit], |row| {
                Ok(RankingEntry {
                    user_id: row.get(0)?,
                    username: row.get(1)?,
                    count: row.get(2)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// All message contents for a guild, for keyword scanning.
///
/// O(messages) by design; the keyword leaderboard has no incremental index.
pub async fn guild_messages_for_scan(
    db: &Database,
    guild_id: &str,
    since_ts: Option<i64>,
) -> Result<Vec<ScanRow>, VouchError> {
    let guild_id = guild_id.to_string();
    let since = since_ts.unwrap_or(i64::MIN);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, username, content FROM messages
                 WHERE guild_id = ?1 AND timestamp >= ?2",
            )?;
            let rows = stmt.query_map(params![guild_id, since], |row| {
                Ok(ScanRow {
                    user_id: row.get(0)?,
                    username: row.get(1)?,
                    content: row.get(2)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Message contents for one user in a guild, for keyword counting.
pub async fn contents_by_user_in_guild(
    db: &Database,
    user_id: &str,
    guild_id: &str,
    since_ts: Option<i64>,
) -> Result<Vec<String>, VouchError> {
    let user_id = user_id.to_string();
    let guild_id = guild_id.to_string();
    let since = since_ts.unwrap_or(i64::MIN);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT content FROM messages
                 WHERE user_id = ?1 AND guild_id = ?2 AND timestamp >= ?3",
            )?;
            let rows = stmt.query_map(params![user_id, guild_id, since], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Distinct UTC calendar dates (`YYYY-MM-DD`) on which the user posted,
/// newest first. Message timestamps are epoch milliseconds.
pub async fn distinct_activity_dates(
    db: &Database,
    user_id: &str,
    guild_id: &str,
) -> Result<Vec<String>, VouchError> {
    let user_id = user_id.to_string();
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT date(timestamp / 1000, 'unixepoch') AS day
                 FROM messages WHERE user_id = ?1 AND guild_id = ?2
                 ORDER BY day DESC",
            )?;
            let rows = stmt.query_map(params![user_id, guild_id], |row| row.get(0))?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Guild-wide totals: message count, distinct users, oldest timestamp.
pub async fn guild_stats(db: &Database, guild_id: &str) -> Result<GuildStats, VouchError> {
    let guild_id = guild_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*), COUNT(DISTINCT user_id), MIN(timestamp)
                 FROM messages WHERE guild_id = ?1",
                params![guild_id],
                |row| {
                    Ok(GuildStats {
                        total_messages: row.get(0)?,
                        unique_users: row.get(1)?,
                        oldest_message: row.get(2)?,
                    })
                },
            )
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn make_msg(id: &str, user_id: &str, content: &str, timestamp: i64) -> Message {
        Message {
            id: id.to_string(),
            user_id: user_id.to_string(),
            username: format!("{user_id}#0001"),
            content: content.to_string(),
            timestamp,
            channel_id: "chan-1".to_string(),
            channel_name: Some("general".to_string()),
            guild_id: "guild-1".to_string(),
            guild_name: Some("Test Guild".to_string()),
        }
    }

    #[tokio::test]
    async fn insert_and_count() {
        let db = test_db().await;
        insert_message(&db, &make_msg("m1", "alice", "hello", 1_000)).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "again", 2_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "bob", "hi", 3_000)).await.unwrap();

        assert_eq!(count_all(&db).await.unwrap(), 3);
        assert_eq!(count_by_user(&db, "alice").await.unwrap(), 2);
        assert_eq!(count_by_user(&db, "nobody").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn redelivery_replaces_by_id() {
        let db = test_db().await;
        insert_message(&db, &make_msg("m1", "alice", "first", 1_000)).await.unwrap();
        insert_message(&db, &make_msg("m1", "alice", "edited", 1_000)).await.unwrap();

        let messages = messages_by_user(&db, "alice").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "edited");
    }

    #[tokio::test]
    async fn messages_by_user_is_newest_first() {
        let db = test_db().await;
        insert_message(&db, &make_msg("m1", "alice", "old", 1_000)).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "new", 3_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "alice", "mid", 2_000)).await.unwrap();

        let messages = messages_by_user(&db, "alice").await.unwrap();
        let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m2", "m3", "m1"]);
    }

    #[tokio::test]
    async fn summary_reports_no_data_for_unknown_user() {
        let db = test_db().await;
        let stats = user_activity_summary(&db, "ghost", "guild-1").await.unwrap();
        assert_eq!(stats.message_count, 0);
        assert!(stats.first_message.is_none());
        assert!(stats.last_message.is_none());
        assert!(stats.most_active_channel.is_none());
    }

    #[tokio::test]
    async fn summary_tracks_bounds_and_top_channel() {
        let db = test_db().await;
        let mut other_chan = make_msg("m1", "alice", "a", 1_000);
        other_chan.channel_id = "chan-2".to_string();
        other_chan.channel_name = Some("random".to_string());
        insert_message(&db, &other_chan).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "b", 2_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "alice", "c", 5_000)).await.unwrap();

        let stats = user_activity_summary(&db, "alice", "guild-1").await.unwrap();
        assert_eq!(stats.message_count, 3);
        assert_eq!(stats.first_message, Some(1_000));
        assert_eq!(stats.last_message, Some(5_000));
        assert_eq!(stats.most_active_channel.as_deref(), Some("general"));
        assert_eq!(stats.most_active_channel_count, 2);
    }

    #[tokio::test]
    async fn guild_counts_order_and_tie_break() {
        let db = test_db().await;
        // a: 5, b: 9, c: 9, d: 1
        let mut id = 0_i64;
        for (user, n) in [("a", 5), ("b", 9), ("c", 9), ("d", 1)] {
            for _ in 0..n {
                id += 1;
                insert_message(&db, &make_msg(&format!("m{id}"), user, "x", id * 100))
                    .await
                    .unwrap();
            }
        }

        let top = guild_message_counts(&db, "guild-1", None, 3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!((top[0].user_id.as_str(), top[0].count), ("b", 9));
        assert_eq!((top[1].user_id.as_str(), top[1].count), ("c", 9));
        assert_eq!((top[2].user_id.as_str(), top[2].count), ("a", 5));
    }

    #[tokio::test]
    async fn guild_counts_respect_since_window() {
        let db = test_db().await;
        insert_message(&db, &make_msg("m1", "alice", "old", 1_000)).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "new", 10_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "bob", "new", 10_000)).await.unwrap();

        let top = guild_message_counts(&db, "guild-1", Some(10_000), 10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|e| e.count == 1));
    }

    #[tokio::test]
    async fn distinct_dates_are_deduplicated_and_descending() {
        let db = test_db().await;
        let day_ms = 86_400_000_i64;
        // Two messages on day 3, one each on days 2 and 0.
        insert_message(&db, &make_msg("m1", "alice", "a", 3 * day_ms)).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "b", 3 * day_ms + 60_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "alice", "c", 2 * day_ms)).await.unwrap();
        insert_message(&db, &make_msg("m4", "alice", "d", 0)).await.unwrap();

        let dates = distinct_activity_dates(&db, "alice", "guild-1").await.unwrap();
        assert_eq!(dates, ["1970-01-04", "1970-01-03", "1970-01-01"]);
    }

    #[tokio::test]
    async fn guild_stats_counts_distinct_users() {
        let db = test_db().await;
        insert_message(&db, &make_msg("m1", "alice", "a", 2_000)).await.unwrap();
        insert_message(&db, &make_msg("m2", "alice", "b", 3_000)).await.unwrap();
        insert_message(&db, &make_msg("m3", "bob", "c", 5_000)).await.unwrap();

        let stats = guild_stats(&db, "guild-1").await.unwrap();
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.unique_users, 2);
        assert_eq!(stats.oldest_message, Some(2_000));

        let empty = guild_stats(&db, "guild-none").await.unwrap();
        assert_eq!(empty.total_messages, 0);
        assert!(empty.oldest_message.is_none());
    }
}
