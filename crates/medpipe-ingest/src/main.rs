//! medpipe-ingest - fetch FHIR patients and write them to one destination

use clap::Parser;
use medpipe_common::logging::{init_logging, LogConfig, LogLevel};
use medpipe_ingest::{
    config::IngestConfig,
    pipeline::{IngestRequest, Ingestor},
    sink::{DestinationKind, DestinationParams},
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "medpipe-ingest")]
#[command(author, version, about = "Ingest FHIR Patient data")]
struct Cli {
    /// Where to write: file, object-store or kv-table (csv, s3, dynamodb also accepted)
    #[arg(long, value_name = "DESTINATION")]
    destination: String,

    /// Output path for the file destination
    #[arg(long)]
    path: Option<PathBuf>,

    /// S3 bucket name (object-store destination)
    #[arg(long)]
    bucket: Option<String>,

    /// S3 object key (object-store destination)
    #[arg(long)]
    key: Option<String>,

    /// DynamoDB table name (kv-table destination)
    #[arg(long)]
    table: Option<String>,

    /// FHIR Patient endpoint, overrides FHIR_PATIENT_URL
    #[arg(long)]
    source_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = startup_log_config(cli.verbose, None);
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        },
    };

    match run(cli).await {
        Ok(message) => println!("{}", message),
        Err(e) => {
            error!(error = %e, "Ingest failed");
            eprintln!("Error: {:#}", e);
            process::exit(1);
        },
    }
}

/// Load `.env` (or `env_file`), then build the logging config
///
/// Environment variables take precedence over the `--verbose` default.
fn startup_log_config(verbose: bool, env_file: Option<&Path>) -> LogConfig {
    if let Some(path) = env_file {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    let defaults = LogConfig::builder()
        .level(if verbose { LogLevel::Debug } else { LogLevel::Info })
        .log_file_prefix("medpipe-ingest")
        .filter_directives("aws_config=warn,aws_smithy_runtime=warn,hyper=warn")
        .build();

    LogConfig::from_env_or(defaults.clone()).unwrap_or(defaults)
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let destination: DestinationKind = cli.destination.parse()?;

    let mut config = IngestConfig::load()?;
    if let Some(url) = cli.source_url {
        config.source.patient_url = url;
        config.validate()?;
    }

    let request = IngestRequest {
        destination,
        params: DestinationParams {
            path: cli.path,
            bucket: cli.bucket,
            key: cli.key,
            table: cli.table,
        },
    };

    let ingestor = Ingestor::new(&config)?;
    let report = ingestor.ingest(&request).await?;

    Ok(format!(
        "Wrote {} patient records to {}",
        report.records_written, report.destination
    ))
}
