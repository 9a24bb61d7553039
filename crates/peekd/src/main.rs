//! peekd — in-memory chunk storage node.

use anyhow::{Context, Result};

use peek_core::config::PeekConfig;
use peek_services::{MemoryStore, TypeRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = PeekConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = PeekConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        PeekConfig::default()
    });

    let port = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u16>()
            .with_context(|| format!("invalid port {:?}", arg))?,
        None => config.node.api_port,
    };

    let types = TypeRegistry::from_layouts(config.types.clone());
    tracing::info!(
        node_id = %config.node.node_id,
        port,
        types = ?types.names(),
        "peekd starting"
    );

    let store = MemoryStore::with_types(config.node.node_id, types);
    let state = peek_api::ApiState::new(store);

    // ── Wait for exit ────────────────────────────────────────────────────────

    tokio::select! {
        r = peek_api::serve(state, port) => r.context("API server failed")?,
        r = tokio::signal::ctrl_c() => {
            r.context("failed to listen for ctrl-c")?;
            tracing::info!("shutting down");
        }
    }

    Ok(())
}
