// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread; proof id assignment is therefore monotonic even under concurrent
//! callers. Do NOT create additional Connection instances for writes.

use tracing::debug;
use vouch_core::VouchError;

use crate::migrations::run_migrations;

/// Convert a tokio-rusqlite error into `VouchError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> VouchError {
    VouchError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Wraps a single `tokio_rusqlite::Connection`; all query modules accept
/// `&Database` and go through [`Database::connection`]. Cloning shares the
/// same underlying connection and writer thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled and
    /// all pending migrations applied.
    pub async fn open(path: &str) -> Result<Self, VouchError> {
        Self::open_with(path, true).await
    }

    /// Open with an explicit WAL-mode choice.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, VouchError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        Self::setup(conn, wal_mode, path).await
    }

    /// Open an in-memory database with migrations applied. Test use.
    pub async fn open_in_memory() -> Result<Self, VouchError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        Self::setup(conn, false, ":memory:").await
    }

    async fn setup(
        conn: tokio_rusqlite::Connection,
        wal_mode: bool,
        path: &str,
    ) -> Result<Self, VouchError> {
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            }
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA synchronous = NORMAL;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(run_migrations)
            .await
            .map_err(|e| VouchError::Storage {
                source: Box::new(e),
            })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), VouchError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
