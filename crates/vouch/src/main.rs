// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vouch - community activity statistics, achievements, and verifiable
//! proofs over a local message store.
//!
//! This is the binary entry point for the Vouch CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod achievements;
mod ingest;
mod leaderboard;
mod prove;
mod render;
mod server_stats;
mod stats;
mod status;
mod verify;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vouch_core::types::ProofType;
use vouch_core::VouchError;
use vouch_engine::{Timeframe, VouchService};
use vouch_storage::Database;

/// Vouch - community activity statistics, achievements, and proofs.
#[derive(Parser, Debug)]
#[command(name = "vouch", version, about, long_about = None)]
struct Cli {
    /// Output machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Record messages from a JSON Lines file ("-" reads stdin).
    Ingest {
        /// Path to a JSONL file with one message object per line.
        #[arg(long, default_value = "-")]
        file: String,
    },
    /// Show a user's activity statistics in a guild.
    Stats {
        #[arg(long)]
        user: String,
        #[arg(long)]
        guild: String,
    },
    /// Show a ranked leaderboard.
    Leaderboard {
        #[arg(long)]
        guild: String,
        #[arg(long, value_enum, default_value_t = TimeframeArg::All)]
        timeframe: TimeframeArg,
        /// Rank by whole-word keyword occurrences instead of message count.
        #[arg(long)]
        keyword: Option<String>,
        /// Override the configured entry limit.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Evaluate achievements for a user in a guild.
    Achievements {
        #[arg(long)]
        user: String,
        #[arg(long)]
        guild: String,
    },
    /// Generate a verifiable activity proof.
    Prove {
        #[arg(long, value_enum)]
        proof_type: ProofTypeArg,
        #[arg(long)]
        requester_id: String,
        #[arg(long)]
        requester_name: String,
        #[arg(long)]
        target_id: String,
        #[arg(long)]
        target_name: String,
        #[arg(long)]
        guild: String,
        /// Required for keyword-count proofs.
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Look up a stored proof by id.
    Verify {
        /// Numeric proof id as assigned at generation time.
        proof_id: i64,
    },
    /// Show guild-wide collection statistics.
    ServerStats {
        #[arg(long)]
        guild: String,
    },
    /// Show store totals and configuration summary.
    Status,
}

/// Leaderboard time window.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeframeArg {
    Week,
    Month,
    All,
}

impl From<TimeframeArg> for Timeframe {
    fn from(arg: TimeframeArg) -> Self {
        match arg {
            TimeframeArg::Week => Timeframe::Week,
            TimeframeArg::Month => Timeframe::Month,
            TimeframeArg::All => Timeframe::AllTime,
        }
    }
}

/// Proof kind selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProofTypeArg {
    MessageCount,
    KeywordCount,
}

impl From<ProofTypeArg> for ProofType {
    fn from(arg: ProofTypeArg) -> Self {
        match arg {
            ProofTypeArg::MessageCount => ProofType::MessageCount,
            ProofTypeArg::KeywordCount => ProofType::KeywordCount,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match vouch_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            vouch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.bot.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli, &config).await {
        render::print_error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &vouch_config::VouchConfig) -> Result<(), VouchError> {
    let db = Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?;
    let service = VouchService::new(db.clone(), config);

    let result = match cli.command {
        Commands::Ingest { file } => ingest::run_ingest(&service, &file, cli.json).await,
        Commands::Stats { user, guild } => {
            stats::run_stats(&service, &user, &guild, cli.json, cli.plain).await
        }
        Commands::Leaderboard {
            guild,
            timeframe,
            keyword,
            limit,
        } => {
            leaderboard::run_leaderboard(
                &service,
                &guild,
                timeframe.into(),
                keyword,
                limit,
                cli.json,
                cli.plain,
            )
            .await
        }
        Commands::Achievements { user, guild } => {
            achievements::run_achievements(&service, &user, &guild, cli.json, cli.plain).await
        }
        Commands::Prove {
            proof_type,
            requester_id,
            requester_name,
            target_id,
            target_name,
            guild,
            keyword,
        } => {
            prove::run_prove(
                &service,
                proof_type.into(),
                vouch_engine::Identity {
                    user_id: requester_id,
                    username: requester_name,
                },
                vouch_engine::Identity {
                    user_id: target_id,
                    username: target_name,
                },
                &guild,
                keyword,
                cli.json,
                cli.plain,
            )
            .await
        }
        Commands::Verify { proof_id } => {
            verify::run_verify(&service, proof_id, cli.json, cli.plain).await
        }
        Commands::ServerStats { guild } => {
            server_stats::run_server_stats(&service, &guild, cli.json, cli.plain).await
        }
        Commands::Status => status::run_status(&service, config, cli.json, cli.plain).await,
    };

    db.close().await?;
    result
}
