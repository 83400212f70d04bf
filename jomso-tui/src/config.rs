use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use jomso_core::model::GeoPoint;
use reqwest::Url;
use tracing_subscriber::{EnvFilter, fmt};

/// `jomso-tui` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jomso-tui",
    about = "Browse public waste bins and find the nearest one",
    version
)]
pub(crate) struct CliArgs {
    /// Latitude of the user in decimal degrees.
    #[arg(long, value_name = "deg", requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude of the user in decimal degrees.
    #[arg(long, value_name = "deg", requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// URL of a JSON bin feed; enables the remote source.
    #[arg(long = "bins-url", value_name = "url", env = "JOMSO_BINS_URL")]
    pub bins_url: Option<Url>,
    /// File receiving log output, filtered by `RUST_LOG`.
    #[arg(long = "log-file", value_name = "path", env = "JOMSO_LOG_FILE")]
    pub log_file: Option<PathBuf>,
    /// User agent sent with feed requests.
    #[arg(long = "user-agent", value_name = "ua", default_value = "jomso/0.1")]
    pub user_agent: String,
}

impl CliArgs {
    /// User position given on the command line, `None` when absent or out of range.
    pub(crate) fn user_location(&self) -> Option<GeoPoint> {
        let (lat, lng) = (self.lat?, self.lng?);
        let point = GeoPoint::new(lat, lng);
        if point.is_none() {
            tracing::warn!(lat, lng, "ignoring out-of-range user location");
        }
        point
    }
}

/// Install the tracing subscriber. Logs go to a file because the terminal is
/// taken over by the UI; without a file nothing is logged.
pub(crate) fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("tracing init failed: {error}"))
}
