use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use xrates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Days to fetch counting today, clamped to 1..=10
    #[arg(short, long, allow_negative_numbers = true)]
    days: Option<i64>,

    /// Currency code to keep, may be repeated
    #[arg(long = "currency", value_name = "CODE")]
    currencies: Vec<String>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

impl From<Format> for xrates::OutputFormat {
    fn from(format: Format) -> xrates::OutputFormat {
        match format {
            Format::Json => xrates::OutputFormat::Json,
            Format::Table => xrates::OutputFormat::Table,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => xrates::cli::setup::setup().map(|path| {
            println!("Created default configuration at {}", path.display());
        }),
        None => {
            let overrides = xrates::Overrides {
                config_path: cli.config_path,
                days: cli.days,
                currencies: cli.currencies,
            };
            xrates::run_command(xrates::AppCommand::Fetch(cli.format.into()), &overrides).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
