// Audio Tracker - feature ingestion and chart service
// Stores per-buffer pitch/loudness/centroid measurements and serves them back for plotting

// Module declarations
pub mod chart;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

// Re-exports for convenience
pub use chart::{build_chart, ChartDescription, Dataset};
pub use config::AppConfig;
pub use store::{FeatureRecord, RecordStore};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, Registry};

/// Adjusts the global log level after startup.
pub struct LogHandle(reload::Handle<LevelFilter, Registry>);

impl LogHandle {
    pub fn set_level(&self, level: tracing::Level) {
        if let Err(err) = self.0.modify(|filter| *filter = LevelFilter::from_level(level)) {
            log::warn!("Failed to change log level: {}", err);
        }
    }
}

/// Install the global fmt subscriber. `log` records are forwarded to it.
///
/// Returns `None` if a subscriber was already installed.
pub fn init_logging(level: tracing::Level) -> Option<LogHandle> {
    let (filter, handle) = reload::Layer::new(LevelFilter::from_level(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok()
        .map(|()| LogHandle(handle))
}
