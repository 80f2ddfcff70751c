//! AirBridge daemon
//!
//! Process bootstrap for the bridge: loads the configuration, builds the
//! shared context, wires the property dispatch for the bus session layer,
//! and drives the periodic telemetry poll loop until shutdown.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use tracing::{error, info};

use airbridge_property::{BusAddresses, BusDispatch};
use airbridge_telemetry::TelemetryPipeline;

use config::BridgeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_config_path(&args)?;
    let config = BridgeConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    let context = config.build_context()?.into_shared();
    info!(
        "airbridge started for appliance {} at {} ({} sensors, poll every {}s)",
        config.id,
        config.address,
        config.sensors.len(),
        config.poll_interval_secs
    );

    let addresses = BusAddresses {
        controller: non_empty(&config.controller_id, format!("{}-vdc", config.id)),
        container: non_empty(&config.container_id, format!("{}-container", config.id)),
        device: non_empty(&config.device_id, config.id.clone()),
    };

    let persist_config = config.clone();
    let persist_path = config_path.clone();
    // Handed to the bus session layer at pairing time; property requests
    // arrive on its dispatcher and run against the shared context.
    let _dispatch = BusDispatch::new(
        context.clone(),
        addresses,
        Box::new(move |ctx| {
            let mut snapshot = persist_config.clone();
            snapshot.zone_id = ctx.default_zone_id;
            if let Err(e) = snapshot.save(&persist_path) {
                error!("persisting configuration failed: {}", e);
            }
        }),
    );

    let pipeline = TelemetryPipeline::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    loop {
        ticker.tick().await;
        match pipeline.poll_once(&context).await {
            Ok(true) => info!("poll cycle complete, values changed"),
            Ok(false) => info!("poll cycle complete, no changes"),
            // Prior readings stay in place; their age keeps growing until
            // a later cycle succeeds.
            Err(e) => error!("poll cycle abandoned: {}", e),
        }
    }
}

fn parse_config_path(args: &[String]) -> anyhow::Result<PathBuf> {
    let mut args_iter = args.iter();
    while let Some(arg) = args_iter.next() {
        if arg == "--config" {
            if let Some(path) = args_iter.next() {
                return Ok(PathBuf::from(path));
            }
            anyhow::bail!("--config was provided without a path");
        }
    }
    anyhow::bail!("missing required --config <path> argument");
}

fn non_empty(value: &str, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value.to_string()
    }
}
