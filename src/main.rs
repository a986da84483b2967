use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use sieve_export::config::Config;
use sieve_export::export::DigestOptions;
use sieve_export::storage::DateFilter;
use sieve_export::{run, RunError, RunOptions};

#[derive(Parser, Debug)]
#[command(
    name = "sieve-export",
    about = "Export Sieve database content to static-site formats"
)]
struct Args {
    /// Path to the Sieve SQLite database [default: ~/data/sieve.db]
    #[arg(long, value_name = "PATH")]
    sieve_db: Option<PathBuf>,

    /// Output directory [default: current directory]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Export a single date (YYYY-MM-DD); overrides --from/--to
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Export from this date, inclusive (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    date_from: Option<NaiveDate>,

    /// Export up to this date, inclusive (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    date_to: Option<NaiveDate>,

    /// Show what would be written without writing files
    #[arg(long)]
    dry_run: bool,

    /// Only export articles.json and threads.json
    #[arg(long)]
    articles_only: bool,

    /// Only export digest markdown files
    #[arg(long)]
    digests_only: bool,

    /// Config file [default: ~/.config/sieve-export/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Merge flags over the config file: flag > config > default
    fn into_run_options(self, config: Config) -> Result<RunOptions> {
        let output = self.output.unwrap_or(config.output);
        let output = std::path::absolute(&output)
            .with_context(|| format!("Failed to resolve output directory '{}'", output.display()))?;

        Ok(RunOptions {
            sieve_db: self.sieve_db.unwrap_or(config.sieve_db),
            output,
            filter: DateFilter::new(self.date, self.date_from, self.date_to),
            dry_run: self.dry_run,
            articles_only: self.articles_only,
            digests_only: self.digests_only,
            digest: DigestOptions {
                summary_max_length: config.summary_max_length,
                preview_chars: config.preview_chars,
            },
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {} ({})", e, path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let options = match args.into_run_options(config) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Database(e)) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Err(RunError::Export(e)) => {
            tracing::error!(error = ?e, "Export failed");
            eprintln!("Error: Export failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
