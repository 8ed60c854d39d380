//! Logging initialization using `tracing` and `tracing-subscriber`.
//!
//! Diagnostics always go to stderr; stdout is reserved for the rendered
//! command outcome so `--json` output stays parseable.

use clap::ValueEnum;
use tracing_subscriber::{fmt, util::SubscriberInitExt, EnvFilter};

use crate::Result;

pub const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Initialize global tracing subscriber. Safe to call multiple times; subsequent
/// calls will no-op.
pub fn init_logging(format: LogFormat) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Human => {
            let _ = builder.finish().try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().finish().try_init();
        }
    };

    Ok(())
}
