// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proof store queries.
//!
//! Proof ids come from SQLite's AUTOINCREMENT and are read back with
//! `last_insert_rowid()` inside the same `call` closure. Since every write
//! goes through the single tokio-rusqlite background thread, id assignment
//! is serialized: ids are unique and monotonically increasing even under
//! concurrent insertions.

use std::str::FromStr;

use rusqlite::params;
use vouch_core::types::ProofType;
use vouch_core::VouchError;

use crate::database::{map_tr_err, Database};
use crate::models::{Proof, ProofDraft};

fn row_to_proof(row: &rusqlite::Row<'_>) -> Result<Proof, rusqlite::Error> {
    let proof_type_raw: String = row.get(5)?;
    let proof_type = ProofType::from_str(&proof_type_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Proof {
        proof_id: row.get(0)?,
        requester_id: row.get(1)?,
        requester_username: row.get(2)?,
        target_user_id: row.get(3)?,
        target_username: row.get(4)?,
        proof_type,
        claim: row.get(6)?,
        result: row.get(7)?,
        data_hash: row.get(8)?,
        guild_id: row.get(9)?,
        timestamp: row.get(10)?,
        created_at: row.get(11)?,
    })
}

const PROOF_COLUMNS: &str = "proof_id, requester_id, requester_username, target_user_id, \
                             target_username, proof_type, claim, result, data_hash, guild_id, \
                             timestamp, created_at";

/// Insert a proof draft and return the assigned id (1-based, monotonic).
pub async fn insert_proof(db: &Database, draft: &ProofDraft) -> Result<i64, VouchError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO proofs
                 (requester_id, requester_username, target_user_id, target_username,
                  proof_type, claim, result, data_hash, guild_id, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    draft.requester_id,
                    draft.requester_username,
                    draft.target_user_id,
                    draft.target_username,
                    draft.proof_type.to_string(),
                    draft.claim,
                    draft.result,
                    draft.data_hash,
                    draft.guild_id,
                    draft.timestamp,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Look up a proof by its assigned id.
pub async fn proof_by_id(db: &Database, proof_id: i64) -> Result<Option<Proof>, VouchError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {PROOF_COLUMNS} FROM proofs WHERE proof_id = ?1"),
                params![proof_id],
                row_to_proof,
            );
            match result {
                Ok(proof) => Ok(Some(proof)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// All proofs generated by a requester, newest first.
pub async fn proofs_by_requester(
    db: &Database,
    requester_id: &str,
) -> Result<Vec<Proof>, VouchError> {
    let requester_id = requester_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROOF_COLUMNS} FROM proofs
                 WHERE requester_id = ?1 ORDER BY timestamp DESC"
            ))?;
            let rows = stmt.query_map(params![requester_id], row_to_proof)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Number of proofs generated by a requester.
pub async fn count_by_requester(db: &Database, requester_id: &str) -> Result<u64, VouchError> {
    let requester_id = requester_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM proofs WHERE requester_id = ?1",
                params![requester_id],
                |row| row.get::<_, u64>(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored proofs.
pub async fn count_all(db: &Database) -> Result<u64, VouchError> {
    db.connection()
        .call(|conn| {
            conn.query_row("SELECT COUNT(*) FROM proofs", [], |row| row.get::<_, u64>(0))
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

    fn make_draft(requester_id: &str, claim: &str, timestamp: i64) -> ProofDraft {
        ProofDraft {
            requester_id: requester_id.to_string(),
            requester_username: format!("{requester_id}#0001"),
            target_user_id: "target".to_string(),
            target_username: "target#0001".to_string(),
            proof_type: ProofType::MessageCount,
            claim: claim.to_string(),
            result: format!("✓ VERIFIED - {claim}"),
            data_hash: "0123456789abcdef".to_string(),
            guild_id: "guild-1".to_string(),
            timestamp,
        }
    }

    #[tokio::test]
    async fn ids_are_one_based_and_monotonic() {
        let db = test_db().await;
        let id1 = insert_proof(&db, &make_draft("alice", "claim 1", 1_000)).await.unwrap();
        let id2 = insert_proof(&db, &make_draft("bob", "claim 2", 2_000)).await.unwrap();
        let id3 = insert_proof(&db, &make_draft("alice", "claim 3", 3_000)).await.unwrap();
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);
        assert_eq!(id3, 3);
    }

    #[tokio::test]
    async fn round_trip_preserves_fields() {
        let db = test_db().await;
        let draft = make_draft("alice", "alice sent 42 messages", 1_234);
        let id = insert_proof(&db, &draft).await.unwrap();

        let proof = proof_by_id(&db, id).await.unwrap().expect("proof exists");
        assert_eq!(proof.proof_id, id);
        assert_eq!(proof.requester_id, draft.requester_id);
        assert_eq!(proof.proof_type, ProofType::MessageCount);
        assert_eq!(proof.claim, draft.claim);
        assert_eq!(proof.result, draft.result);
        assert_eq!(proof.data_hash, draft.data_hash);
        assert_eq!(proof.timestamp, 1_234);
        assert!(!proof.created_at.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_absent() {
        let db = test_db().await;
        assert!(proof_by_id(&db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn requester_listing_is_newest_first() {
        let db = test_db().await;
        insert_proof(&db, &make_draft("alice", "first", 1_000)).await.unwrap();
        insert_proof(&db, &make_draft("alice", "second", 3_000)).await.unwrap();
        insert_proof(&db, &make_draft("bob", "other", 2_000)).await.unwrap();

        let proofs = proofs_by_requester(&db, "alice").await.unwrap();
        assert_eq!(proofs.len(), 2);
        assert_eq!(proofs[0].claim, "second");
        assert_eq!(proofs[1].claim, "first");

        assert_eq!(count_by_requester(&db, "alice").await.unwrap(), 2);
        assert_eq!(count_by_requester(&db, "carol").await.unwrap(), 0);
        assert_eq!(count_all(&db).await.unwrap(), 3);
    }
}
