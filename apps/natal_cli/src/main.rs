mod table;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use natal_chart::ephemeris::{native_gate, PlaceholderFallback};
use natal_chart::{ChartEngine, ChartQuery, ChartSettings};

const DEFAULT_CONFIG: &str = "configs/natal.toml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a natal chart")]
struct Args {
    /// Birth date: YYYY-MM-DD with --time, or a full RFC 3339 timestamp
    #[arg(long)]
    date: String,

    /// Birth time in UTC, HH:MM
    #[arg(long)]
    time: Option<String>,

    /// City from the built-in list (needs --time)
    #[arg(long, conflicts_with_all = ["lon", "lat"])]
    city: Option<String>,

    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Orb in degrees, overrides the config
    #[arg(long)]
    orb: Option<f64>,

    /// House system, e.g. placidus or whole-sign
    #[arg(long)]
    house_system: Option<String>,

    /// Include Lilith (mean apogee)
    #[arg(long)]
    lilith: bool,

    /// Print the chart as JSON
    #[arg(long)]
    json: bool,

    /// TOML config with a [chart] table (default: configs/natal.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_settings(explicit: Option<&PathBuf>) -> anyhow::Result<ChartSettings> {
    match explicit {
        Some(path) => ChartSettings::load(path).with_context(|| format!("invalid config {}", path.display())),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if default.exists() {
                ChartSettings::load(&default).with_context(|| format!("invalid config {}", DEFAULT_CONFIG))
            } else {
                Ok(ChartSettings::default())
            }
        }
    }
}

/// Engine over the native ephemeris, or over the placeholder alone when it
/// cannot be opened.
fn build_engine(settings: ChartSettings) -> anyhow::Result<ChartEngine> {
    let primary = match native_gate(settings.ephemeris_path.as_deref()) {
        Ok(gate) => gate,
        Err(e) => {
            log::error!("ephemeris initialisation failed: {}", e);
            None
        }
    };
    ChartEngine::new(primary, Arc::new(PlaceholderFallback), settings).context("invalid chart settings")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_ref())?;
    if args.lilith {
        settings.include_lilith = true;
    }

    let query = ChartQuery {
        date: Some(args.date),
        time: args.time,
        city: args.city,
        longitude: args.lon,
        latitude: args.lat,
        orb: args.orb,
        house_system: args.house_system,
    };
    let request = query.into_request()?;

    let engine = build_engine(settings)?;
    let chart = engine.calculate(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        print!("{}", table::render(&chart)?);
    }
    Ok(())
}
