//! Thin command-line wrapper around the `telraam-rs` library.
//!
//! Exit codes: 0 on success, 1 on server/API errors (including "no data"),
//! 2 on invalid input (clap parse errors and inverted date ranges).

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use telraam_rs::{
    DownloadBuilder, DownloadStatus, SegmentSelection, TelraamClient, TelraamError,
};

#[derive(Parser)]
#[command(name = "telraam")]
#[command(about = "Download traffic counts from the Telraam sensor network")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download per-hour traffic counts for a segment (or "all" segments)
    Download(DownloadArgs),
}

#[derive(Args)]
struct DownloadArgs {
    /// Segment ID (e.g. "1003073114"), or "all" for every active segment
    segment_id: String,

    /// First day to download (YYYY-MM-DD); defaults to one week before the end date
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last day to download (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end_date: Option<NaiveDate>,

    /// Telraam API token
    #[arg(long, env = "TELRAAM_API_TOKEN", hide_env_values = true)]
    api_key: String,

    /// Write the downloaded dataset to this CSV file
    #[arg(long)]
    output_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "telraam_rs=debug,telraam=debug"
    } else {
        "telraam_rs=info,telraam=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Download(args) => run_download(args).await,
    }
}

async fn run_download(args: DownloadArgs) -> ExitCode {
    let client = match TelraamClient::new(&args.api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Aborting.");
            return ExitCode::from(2);
        }
    };

    let mut builder =
        DownloadBuilder::new(&client).selection(SegmentSelection::from(args.segment_id.as_str()));
    if let Some(start) = args.start_date {
        builder = builder.start_date(start);
    }
    if let Some(end) = args.end_date {
        builder = builder.end_date(end);
    }
    if let Some(path) = &args.output_path {
        builder = builder.output_path(path);
    }

    println!("Downloading data for segment {}...", args.segment_id);
    let outcome = match builder.run().await {
        Ok(outcome) => outcome,
        Err(TelraamError::InvalidRange { start, end }) => {
            eprintln!("Invalid date range: {start} is after {end}.");
            eprintln!("Aborting.");
            return ExitCode::from(2);
        }
        Err(TelraamError::Status { status: 403, .. }) => {
            eprintln!("The API key was rejected by the server.");
            eprintln!("Aborting.");
            return ExitCode::from(1);
        }
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Aborting.");
            return ExitCode::from(1);
        }
    };

    match outcome.status() {
        DownloadStatus::Failed => {
            if outcome.auth_rejected() {
                eprintln!("The API key was rejected by the server.");
            } else {
                eprintln!("No data available for segment {}.", args.segment_id);
            }
            eprintln!("Aborting.");
            ExitCode::from(1)
        }
        DownloadStatus::Complete | DownloadStatus::Partial => {
            let n_rows = outcome.dataset.as_ref().map_or(0, telraam_rs::SegmentDataset::len);
            println!(
                "Downloaded {n_rows} rows from {} segment(s).",
                outcome.succeeded_segments
            );
            if outcome.status() == DownloadStatus::Partial {
                println!(
                    "Warning: {} segment(s) and {} sub-interval query(ies) failed and were skipped.",
                    outcome.failed_segments.len(),
                    outcome.sub_intervals_failed
                );
            }
            if let Some(path) = &args.output_path {
                println!("Wrote {}.", path.display());
            }
            ExitCode::SUCCESS
        }
    }
}
