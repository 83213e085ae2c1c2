// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vouch activity engine.

use thiserror::Error;

/// The primary error type used across all Vouch crates.
///
/// Variants map onto the engine's failure taxonomy: caller mistakes
/// (`Validation`), empty-history outcomes (`EmptyData`), persistence
/// failures (`Storage`), and lookups of records that do not exist
/// (`NotFound`). `EmptyData` is a normal, reportable outcome -- callers
/// render it as "no data", not as a crash.
#[derive(Debug, Error)]
pub enum VouchError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing or invalid caller input. Never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation target has zero qualifying messages.
    ///
    /// Distinct from "below threshold": the engine refuses to fabricate a
    /// proof or a progress fraction over an empty history.
    #[error("no data: {0}")]
    EmptyData(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A requested record does not exist.
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
