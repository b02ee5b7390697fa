//! # Tide Scout Entry Point
//!
//! Loads the configuration, applies command line overrides, scrapes every
//! configured location and writes the daylight low tides to CSV.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tide_scout_lib::config::{Config, DEFAULT_CONFIG_PATH};
use tide_scout_lib::pipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Export low tides that fall between sunrise and sunset
#[derive(Parser, Debug)]
#[command(name = "tide-scout", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CSV file to write, overrides the configured path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Location identifier to scrape, repeatable; replaces the configured list
    #[arg(short, long = "location")]
    locations: Vec<String>,

    /// Forecast site root, overrides the configured URL
    #[arg(long)]
    base_url: Option<String>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if !self.locations.is_empty() {
            config.source.locations = self.locations;
        }
        if let Some(base_url) = self.base_url {
            config.source.base_url = base_url;
        }
        config
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity, default info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);
    let config = args.apply(config);

    info!(
        base_url = %config.source.base_url,
        locations = ?config.source.locations,
        output = %config.output.path.display(),
        "tide-scout starting"
    );

    // Single-threaded batch; the runtime only drives the HTTP client
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let rows = rt
        .block_on(pipeline::run(&config))
        .context("forecast run failed")?;

    info!(rows = rows.len(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from([
            "tide-scout",
            "--output",
            "out.csv",
            "-l",
            "Pacifica",
            "-l",
            "Ocean-Beach",
            "--base-url",
            "http://localhost:9000",
        ]);
        let config = args.apply(Config::default());
        assert_eq!(config.output.path, PathBuf::from("out.csv"));
        assert_eq!(config.source.locations, ["Pacifica", "Ocean-Beach"]);
        assert_eq!(config.source.base_url, "http://localhost:9000");
    }

    #[test]
    fn no_overrides_keeps_config() {
        let args = Args::parse_from(["tide-scout"]);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        let config = args.apply(Config::default());
        assert_eq!(config.source.locations.len(), 4);
    }
}
