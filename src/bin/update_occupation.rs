use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kyc_batch_updater::reporter;
use kyc_batch_updater::{BatchRunner, Config, CsvRowReader, UpdateAction};

#[derive(Parser, Debug)]
#[command(name = "update-occupation")]
#[command(about = "Update occupation/employment fields for every applicant in a CSV file", long_about = None)]
struct Args {
    /// Path to the INI properties file with the bearer token and base URL
    #[arg(short, long, default_value = "properties/config.properties")]
    config: PathBuf,

    /// Path to the input CSV file
    #[arg(short, long, default_value = "source/occupation_fix.csv")]
    input: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;
    info!("Configuration loaded, CMS base URL: {}", config.api.base_url);

    let reader = CsvRowReader::new(&args.input);
    let runner = BatchRunner::new(config, UpdateAction::Occupation);

    info!("Updating occupations from {:?}", args.input);
    let summary = runner
        .run(&reader)
        .await
        .with_context(|| format!("Failed to process {:?}", args.input))?;

    reporter::report_summary(&summary);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
