use anyhow::{Result, anyhow};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// `-v` turns on debug output for this crate only; dependencies stay quiet
/// unless `RUST_LOG` asks for them.
fn crate_filter(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target(env!("CARGO_CRATE_NAME"), level)
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "off" }))
}

/// Installs the global subscriber, writing to stderr so stdout carries only
/// the rates. Fails if a subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(crate_filter(verbose))
        .with(env_filter(verbose))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
