//! CLI entrypoint for concord
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config → provider roster → audit service.
//! Authentication happens here, at the caller boundary, through the
//! `Authenticator` port; the audit core never sees credentials.
//!
//! The binary wires the in-memory history store, so persisted records live
//! only as long as the process: `history` shows the audits run in this
//! invocation. A durable store adapter attaches at the same `HistoryStore`
//! port without touching the audit core.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use concord_application::{AuditService, Authenticator, HistoryStore};
use concord_domain::{AuditRecord, HistoryFilter};
use concord_infrastructure::{ConfigLoader, MemoryHistoryStore, StaticTokenAuthenticator};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "concord", about = "Audit AI providers by consensus", version)]
struct Cli {
    /// Path to a config file (overrides discovered configs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Skip config discovery and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    /// Bearer token identifying the caller
    #[arg(long, global = true)]
    token: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one audit: dispatch the query to every provider and score agreement
    Ask {
        /// The query to send to all providers
        query: String,
    },
    /// Show audit records persisted by this process, newest first.
    /// History is per-process until a durable store adapter is configured.
    History {
        /// Show only records flagged for review
        #[arg(long)]
        flagged: bool,
    },
}

/// Public response shape for one audit
#[derive(Serialize)]
struct AuditResponse<'a> {
    query: &'a str,
    responses: BTreeMap<&'a str, Option<&'a str>>,
    consensus_score: f64,
    flagged: bool,
}

impl<'a> AuditResponse<'a> {
    fn from_record(record: &'a AuditRecord) -> Self {
        Self {
            query: &record.query,
            responses: record.responses(),
            consensus_score: record.consensus_score,
            flagged: record.flagged,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    for warning in config.validate() {
        warn!("config: {}", warning);
    }

    // Caller identity is established before any use case runs. When no
    // tokens are configured the process is in open (local) mode.
    if !config.auth.tokens.is_empty() {
        let authenticator = StaticTokenAuthenticator::new(config.auth.tokens.clone());
        let Some(token) = cli.token.as_deref() else {
            bail!("authentication required: pass --token");
        };
        let identity = match authenticator.authenticate(token).await {
            Ok(identity) => identity,
            Err(e) => bail!("authentication failed: {e}"),
        };
        info!("Authenticated as {}", identity.username);
    }

    // === Dependency Injection ===
    let roster = config.build_roster();
    let store: Arc<dyn HistoryStore> = Arc::new(MemoryHistoryStore::new());
    let service = AuditService::new(roster, store, config.audit_params());

    match cli.command {
        Command::Ask { query } => {
            let record = service.run_audit(&query).await?;
            let response = AuditResponse::from_record(&record);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::History { flagged } => {
            let filter = if flagged {
                HistoryFilter::flagged()
            } else {
                HistoryFilter::all()
            };
            let records = service.history(&filter).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
