use anyhow::Context;
use natal_chart::ChartSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Relative locations tried when no `--config` is given.
const DEFAULT_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub chart: ChartSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            chart: ChartSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerToml {
    #[serde(default)]
    bind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    server: ServerToml,
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let root: RootConfigToml = toml::from_str(text).context("failed to parse [server] table")?;
        let chart = ChartSettings::from_toml_str(text)?;
        Ok(Self {
            bind: root.server.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
            chart,
        })
    }

    /// Load an explicit file, or the first of the default locations that exists.
    /// With neither, the built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read config {}", path.display()))?;
            return Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()));
        }
        for p in DEFAULT_PATHS.iter().map(PathBuf::from) {
            if let Ok(text) = fs::read_to_string(&p) {
                log::info!("loading config from {}", p.display());
                return Self::from_toml_str(&text).with_context(|| format!("invalid config {}", p.display()));
            }
        }
        log::warn!("no config found in {:?}; using defaults", DEFAULT_PATHS);
        Ok(Self::default())
    }
}
