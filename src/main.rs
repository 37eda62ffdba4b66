//! egress-probe
//!
//! Periodically checks whether outbound internet access works and reports the
//! result over HTTP.
//!
//! ```text
//!   ┌──────────┐  GET every interval   ┌────────────┐
//!   │  Prober  │──────────────────────▶│   target   │
//!   └────┬─────┘                       └────────────┘
//!        │ publish
//!        ▼
//!   ┌──────────┐  snapshot   ┌──────────────────────┐
//!   │  Status  │◀────────────│ GET /api/status      │◀── clients
//!   │  store   │             │ GET /* (static files)│
//!   └──────────┘             └──────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use egress_probe::config::{loader, LogFormat, ProbeConfig};
use egress_probe::lifecycle::{self, signals};
use egress_probe::observability::logging;

#[derive(Parser)]
#[command(name = "egress-probe", version)]
#[command(about = "Periodically checks outbound internet access and serves the result", long_about = None)]
struct Cli {
    /// The address to listen on [default: :80]
    #[arg(long)]
    addr: Option<String>,

    /// The duration between two checks, e.g. 30s, 1m, 24h [default: 1m]
    #[arg(long, value_parser = humantime::parse_duration)]
    duration: Option<Duration>,

    /// Directory served under / [default: ./static]
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Optional TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn into_config(self) -> Result<ProbeConfig, loader::ConfigError> {
        let mut config = match &self.config {
            Some(path) => loader::load_file(path)?,
            None => ProbeConfig::default(),
        };

        if let Some(addr) = self.addr {
            config.listener.bind_address = addr;
        }
        if let Some(duration) = self.duration {
            config.probe.interval = duration;
        }
        if let Some(dir) = self.static_dir {
            config.static_files.root = dir;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(config.observability.log_format)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "egress-probe starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        interval = %humantime::format_duration(config.probe.interval),
        target_url = %config.probe.target_url,
        static_root = %config.static_files.root.display(),
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::run(config, signals::wait_for_shutdown()).await {
        tracing::error!(error = %e, "Fatal error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
