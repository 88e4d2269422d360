//! # Serve Subcommand
//!
//! Loads configuration, installs the Prometheus recorder, and runs the
//! Axum application on a tokio runtime.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use metrics_exporter_prometheus::PrometheusBuilder;

use grc_api::{app, ApiConfig, AppState};

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to a YAML configuration file; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the API server until interrupted.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ApiConfig::load(path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("loading {}", path.display()))?,
        None => ApiConfig::default(),
    };

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("installing metrics recorder")?;
    let state = AppState::build(config.clone())
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .with_metrics(handle);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&config.bind)
            .await
            .with_context(|| format!("binding {}", config.bind))?;
        tracing::info!(bind = %config.bind, "GRC API listening");
        axum::serve(listener, app(state)).await?;
        Ok(())
    })
}
