//! Observability for the Banco de Tierras API
//!
//! Structured logging through `tracing`. Lifecycle and database events are
//! typed ([`Event`]) and recorded as the `event` field of each log line.
//!
//! # Usage
//!
//! ```ignore
//! use banco_tierras::observability::{init_tracing, Event, LogFormat};
//!
//! init_tracing(LogFormat::Json);
//! tracing::info!(event = %Event::Serving, addr = "0.0.0.0:5000");
//! ```

mod events;

pub use events::Event;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "banco_tierras=info,tower_http=info";

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Install the global subscriber
///
/// Later calls are no-ops; the first subscriber wins.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
