use crate::config::LogConfig;
use crate::error::{IdeaError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(config: &LogConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.with_target(false).try_init()
    };
    installed.map_err(|err| IdeaError::Config(format!("failed to install logger: {}", err)))
}
