// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vouch activity engine.
//!
//! Provides the shared error taxonomy, domain types (messages, stats,
//! rankings, proofs), and the pure keyword matcher used by the aggregation
//! engine and proof generator.

pub mod error;
pub mod keyword;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VouchError;
pub use keyword::KeywordMatcher;
pub use types::{
    GuildStats, Message, Proof, ProofDraft, ProofType, RankingEntry, UserStats,
};
