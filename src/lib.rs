pub mod cli;
pub mod core;
pub mod providers;
pub mod report;

use crate::core::config::AppConfig;
use crate::core::{CurrencyFilter, ExchangeRateSource, RateHistory, RequestWindow, rates, source};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use indicatif::ProgressBar;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy)]
pub enum AppCommand {
    Fetch(OutputFormat),
}

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<String>,
    pub days: Option<i64>,
    pub currencies: Vec<String>,
}

pub fn load_config(overrides: &Overrides) -> Result<AppConfig> {
    let mut config = match overrides.config_path.as_deref() {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(days) = overrides.days {
        config.days = days;
    }
    if !overrides.currencies.is_empty() {
        config.currencies = overrides.currencies.clone();
    }
    config.validate()?;
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, overrides: &Overrides) -> Result<()> {
    let config = load_config(overrides)?;
    match command {
        AppCommand::Fetch(format) => {
            let history = run(&config).await?;
            cli::rates::display(&history, format)
        }
    }
}

/// Fetches the configured window from PrivatBank, writes the exchange log and
/// returns the filtered rates.
pub async fn run(config: &AppConfig) -> Result<RateHistory> {
    let provider = providers::PrivatBankProvider::new(&config.providers.privatbank)?;
    let window = RequestWindow::new(config.days);
    let pb = cli::ui::new_fetch_progress(window.day_count() as u64);

    let history = run_with_source(
        &provider,
        config,
        Local::now().date_naive(),
        || Local::now().naive_local(),
        &pb,
    )
    .await;
    pb.finish_and_clear();
    history
}

/// Same pipeline as [`run`] with the source and clock supplied by the caller.
///
/// `clock` stamps the log header and is read once every day has been fetched.
pub async fn run_with_source<C>(
    source: &dyn ExchangeRateSource,
    config: &AppConfig,
    today: NaiveDate,
    clock: C,
    pb: &ProgressBar,
) -> Result<RateHistory>
where
    C: FnOnce() -> NaiveDateTime,
{
    info!("Exchange rate fetch starting...");

    let window = RequestWindow::new(config.days);
    let filter = CurrencyFilter::new(&config.currencies)?;
    let dates = window.dates(today);

    let bodies = source::fetch_window(source, &dates, pb).await?;
    let history = rates::transform(&bodies, &filter)?;
    info!(
        requested = dates.len(),
        kept = history.len(),
        "Fetched exchange rates"
    );

    report::write_log(&config.log_path, &history, clock()).await?;
    Ok(history)
}
