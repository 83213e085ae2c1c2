// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregation, achievements, and proofs for the Vouch activity engine.
//!
//! The submodules are layered: [`stats`] derives metrics from the message
//! store, [`achievements`] interprets the configured rule table against
//! those metrics, [`proofs`] builds claim text and the data commitment
//! hash, and [`service`] ties them together behind the caller-facing
//! [`VouchService`] facade.

pub mod achievements;
pub mod proofs;
pub mod service;
pub mod stats;

pub use achievements::{AchievementReport, AchievementStatus, Progress};
pub use proofs::{format_proof_id, Identity};
pub use service::{
    AchievementProfile, LeaderboardKind, LeaderboardRequest, ProofRequest, Timeframe, Totals,
    VouchService,
};
