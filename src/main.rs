// src/main.rs
//! Transfer tracker entry point.
use anyhow::{Context, Result};
use ccip_transfer_tracker::blockchain::bridge::relay::{parse_manager_address, require_ccip_message_id};
use ccip_transfer_tracker::blockchain::bridge::transfer::validate_transfer_request;
use ccip_transfer_tracker::blockchain::bridge::TransferState;
use ccip_transfer_tracker::blockchain::registry::ChainRegistry;
use ccip_transfer_tracker::cli::{Cli, Commands};
use ccip_transfer_tracker::core::amount::format_usdc;
use ccip_transfer_tracker::core::config::TrackerConfig;
use ccip_transfer_tracker::core::errors::TrackerError;
use ccip_transfer_tracker::monitoring::TrackerMetrics;
use ccip_transfer_tracker::tracker::menu::destination_menu;
use ccip_transfer_tracker::tracker::render::render_text;
use ccip_transfer_tracker::tracker::session::WriterSink;
use ccip_transfer_tracker::tracker::{Clock, SystemClock, TokioClock, TrackerSession, TransferTracker};
use chrono::{DateTime, Utc};
use clap::Parser;
use ethers::types::Log;
use serde::Deserialize;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// One line of a `watch` event file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchEvent {
    #[serde(default)]
    delay_ms: u64,
    /// Raw preflight simulation error; fails the transfer with its user-facing text
    #[serde(default)]
    simulation_error: Option<String>,
    #[serde(flatten)]
    state: TransferState,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReceiptInput {
    Receipt { logs: Vec<Log> },
    Logs(Vec<Log>),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code(&e)
        }
    }
}

/// Caller mistakes exit with 2, everything else with 1.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TrackerError>() {
        Some(e) if e.is_user_error() => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = TrackerConfig::load_or_default(cli.config.as_deref());
    let registry = ChainRegistry::from_config(&config);

    match cli.command {
        Commands::Chains => {
            for chain in registry.chains() {
                println!(
                    "{:>10}  {:<20} selector={} explorer={}",
                    chain.chain_id,
                    chain.name,
                    chain.selector.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                    chain.block_explorer
                );
            }
        }
        Commands::Routes => {
            for pair in registry.supported_chain_pairs() {
                let route = registry.transfer_route(pair.source, pair.destination);
                println!(
                    "{} -> {}  active={} time={} fee={}",
                    pair.source, pair.destination, route.is_active, route.estimated_time,
                    route.estimated_fee
                );
            }
        }
        Commands::Route { from, to } => {
            let route = registry.transfer_route(from, to);
            println!("{}", serde_json::to_string_pretty(&route)?);
            println!("supported: {}", registry.is_route_supported(from, to));
            for id in [from, to] {
                let report = registry.validate_chain_configuration(id);
                for issue in &report.issues {
                    println!("issue: {}", issue);
                }
            }
        }
        Commands::Destinations { from } => {
            registry.require(from)?;
            for line in destination_menu(&registry, from).render_lines() {
                println!("{}", line);
            }
        }
        Commands::Validate { from, to, amount, receiver } => {
            let request =
                validate_transfer_request(&registry, from, to, &amount, receiver.as_deref())?;
            let route = registry.transfer_route(from, to);
            println!(
                "ok: {} USDC ({} base units), est. {} / ~{} native fee",
                format_usdc(request.amount)?,
                request.amount,
                route.estimated_time,
                route.estimated_fee
            );
        }
        Commands::Render { state, from, to, amount, elapsed, json } => {
            let snapshot: TransferState = read_json(&state)?;
            let mut tracker = TransferTracker::new(&registry, &config, from, to, &amount)?;
            let start = SystemClock.now();
            tracker.observe(snapshot, start);
            if let Some(secs) = elapsed {
                tracker.tick(elapsed_since(start, secs)?);
            }
            let view = tracker.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view));
            }
        }
        Commands::Watch { events, from, to, amount, json, metrics } => {
            watch_events(&registry, &config, &events, from, to, &amount, json, metrics).await?;
        }
        Commands::DecodeReceipt { receipt, chain } => {
            let chain = registry.require(chain)?;
            let manager = chain
                .cross_chain_manager
                .as_deref()
                .with_context(|| format!("no CrossChainManager configured for {}", chain.name))?;
            let manager = parse_manager_address(manager)?;
            let logs = match read_json::<ReceiptInput>(&receipt)? {
                ReceiptInput::Receipt { logs } | ReceiptInput::Logs(logs) => logs,
            };
            println!("{}", require_ccip_message_id(&logs, manager)?);
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// `start` moved forward by `secs`; values chrono cannot represent are rejected.
fn elapsed_since(start: DateTime<Utc>, secs: u64) -> Result<DateTime<Utc>, TrackerError> {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| TrackerError::ValidationError(format!("--elapsed {} is out of range", secs)))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
async fn watch_events(
    registry: &ChainRegistry,
    config: &TrackerConfig,
    events: &Path,
    from: u64,
    to: u64,
    amount: &str,
    json: bool,
    with_metrics: bool,
) -> Result<()> {
    let content = tokio::fs::read_to_string(events)
        .await
        .with_context(|| format!("reading {}", events.display()))?;
    let mut parsed = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: WatchEvent = serde_json::from_str(line)
            .with_context(|| format!("{}:{}", events.display(), line_no + 1))?;
        parsed.push(event);
    }
    info!(events = parsed.len(), "Replaying transfer events");

    let tracker = TransferTracker::new(registry, config, from, to, amount)?;
    let metrics = Arc::new(TrackerMetrics::new()?);
    let (tx, rx) = watch::channel(TransferState::default());
    let session = TrackerSession::spawn(
        tracker,
        rx,
        TokioClock::new(),
        WriterSink::new(std::io::stdout(), json),
        Some(metrics.clone()),
    );

    for event in parsed {
        if event.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(event.delay_ms)).await;
        }
        let mut state = event.state;
        if let Some(raw) = event.simulation_error.as_deref() {
            state.fail_simulation(raw);
        }
        if tx.send(state).is_err() {
            warn!("Session ended before all events were replayed");
            break;
        }
    }
    drop(tx);

    let tracker = session.join().await?;
    info!(status = %tracker.state().status, elapsed_secs = tracker.timer().elapsed_secs(), "Session finished");

    if with_metrics {
        print!("{}", metrics.gather_text()?);
    }
    Ok(())
}
