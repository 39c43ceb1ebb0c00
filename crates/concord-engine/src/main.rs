//! Session driver binary for the Concord governance simulator.
//!
//! This is the presentation side of the pipeline: it owns the timer,
//! calls `tick()` on the session once per interval, and renders each
//! immutable snapshot to the structured log. The core never blocks on
//! this layer and shares nothing mutable with it.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `concord-config.yaml`
//! 3. Build the session (fail fast on invalid configuration)
//! 4. Run the tick loop until `max_ticks` (or forever when unbounded)
//! 5. Log the result

mod error;

use std::path::Path;
use std::time::Duration;

use concord_core::config::SessionConfig;
use concord_core::session::Session;
use concord_types::TickSnapshot;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the session driver.
///
/// # Errors
///
/// Returns an error if configuration loading, session construction, or
/// a tick fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("concord-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        session_name = config.session.name,
        seed = config.session.seed,
        tick_interval_ms = config.session.tick_interval_ms,
        agent_count = config.governance.agent_count,
        proposal_count = config.governance.proposals.len(),
        history_window = config.governance.history_window,
        "Configuration loaded"
    );

    // 3. Build the session.
    let mut session = Session::new(&config).map_err(EngineError::from)?;
    info!(session_id = %session.session_id(), "Session initialized");

    // 4. Run the tick loop.
    let mut interval =
        tokio::time::interval(Duration::from_millis(config.session.tick_interval_ms.max(1)));
    let mut ticks_run: u64 = 0;

    loop {
        if let Some(max_ticks) = config.session.max_ticks
            && ticks_run >= max_ticks
        {
            break;
        }

        interval.tick().await;

        let snapshot = session.tick().map_err(EngineError::from)?;
        render_snapshot(&snapshot);
        ticks_run = ticks_run.saturating_add(1);
    }

    // 5. Log the result.
    info!(
        total_ticks = ticks_run,
        rounds_completed = session.rounds_completed(),
        "concord-engine shutdown complete"
    );

    Ok(())
}

/// Render one snapshot to the structured log.
///
/// The round summary goes out at `info`; the full snapshot is attached
/// as JSON at `debug` for dashboard capture.
fn render_snapshot(snapshot: &TickSnapshot) {
    let tally_line = snapshot
        .tally
        .iter()
        .map(|(proposal, count)| format!("{proposal}={count}"))
        .collect::<Vec<_>>()
        .join(", ");

    info!(
        round = snapshot.round_index,
        winner = %snapshot.decision.winning_proposal,
        quality = %snapshot.decision.quality_label,
        collective_index = snapshot.collective_index,
        tally = %tally_line,
        history_len = snapshot.history.len(),
        "Round decided"
    );

    match serde_json::to_string(snapshot) {
        Ok(json) => debug!(snapshot = %json, "snapshot rendered"),
        Err(e) => warn!(error = %e, "failed to serialize snapshot"),
    }
}

/// Load the session configuration from `concord-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// falls back to defaults when it is absent.
fn load_config() -> Result<SessionConfig, EngineError> {
    let config_path = Path::new("concord-config.yaml");
    if config_path.exists() {
        let config = SessionConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SessionConfig::default())
    }
}
