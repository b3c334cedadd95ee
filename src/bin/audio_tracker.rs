use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use audio_tracker::config::{AppConfig, DEFAULT_CONFIG_PATH};
use audio_tracker::error::{log_server_error, ServerError};
use audio_tracker::{http, init_logging};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "audio_tracker",
    about = "Collects audio feature measurements and serves them for charting"
)]
struct Cli {
    /// JSON configuration file (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Listen address, overrides config and AUDIO_TRACKER_ADDR
    #[arg(long)]
    addr: Option<String>,
    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(server_err) = err.downcast_ref::<ServerError>() {
                log_server_error(server_err, "audio_tracker");
            }
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Install logging before loading config so its warnings are visible,
    // then settle on the configured level.
    let logging = init_logging(tracing::Level::INFO);

    let mut config = AppConfig::load(&cli.config);
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(addr) = cli.addr {
        config.server.bind_addr = addr;
    }

    if let Some(logging) = &logging {
        logging.set_level(config.logging.tracing_level());
    }

    let addr = config.server.socket_addr()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    runtime.block_on(http::serve(addr))
}
