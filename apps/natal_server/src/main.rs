mod config;
mod error;
mod http;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use natal_chart::ephemeris::{native_gate, PlaceholderFallback};
use natal_chart::ChartEngine;

use crate::config::ServerConfig;
use crate::http::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "natal_server", about = "Natal chart HTTP service")]
struct Args {
    /// TOML config with [server] and [chart] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides [server] bind
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let primary = match native_gate(config.chart.ephemeris_path.as_deref()) {
        Ok(gate) => gate,
        Err(e) => {
            log::error!("ephemeris initialisation failed: {}", e);
            None
        }
    };
    let engine = ChartEngine::new(primary, Arc::new(PlaceholderFallback), config.chart.clone())
        .context("invalid chart settings")?;
    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!("natal_server listening on {}", config.bind);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
