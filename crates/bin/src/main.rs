//! Cascade CLI binary.
//!
//! Prints income statements and their percentage-of-revenue waterfalls.

mod integration;

use cascade::output::ExportFormat;
use cascade::{FetchConfig, PeriodType};
use clap::{ArgAction, Args, Parser, Subcommand};
use integration::commands::{export_symbol, run_session, show_symbol};
use integration::data_pipeline::{CliError, StatementSource};
use integration::presenter::{ExportTarget, OutputFormat, ShowOptions};
use std::path::PathBuf;
use std::process;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CASCADE_LOG";

#[derive(Parser)]
#[command(name = "cascade")]
#[command(about = "Income statement waterfalls as a percentage of revenue", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that fetches statements.
#[derive(Args)]
struct FetchArgs {
    /// Reporting frequency (annual or quarterly)
    #[arg(long, default_value = "annual")]
    period: PeriodType,

    /// Number of most recent periods to keep
    #[arg(long, default_value_t = cascade::data::config::DEFAULT_LIMIT)]
    limit: usize,

    /// Read statements from a JSON file instead of Yahoo Finance
    #[arg(long)]
    from_file: Option<PathBuf>,
}

impl FetchArgs {
    const fn config(&self) -> FetchConfig {
        FetchConfig::new(self.period, self.limit)
    }
}

/// Options shared by `show` and `interactive`.
#[derive(Args)]
struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write one SVG chart per period into this directory
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Print the table only
    #[arg(long)]
    no_chart: bool,
}

impl ShowArgs {
    fn options(self) -> ShowOptions {
        ShowOptions {
            format: self.format,
            charts: !self.no_chart,
            svg_dir: self.svg_dir,
            ..ShowOptions::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the income statement and waterfalls of a stock
    Show {
        /// Stock symbol
        symbol: String,

        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        show: ShowArgs,
    },

    /// Export statements or waterfall steps to a file
    Export {
        /// Stock symbol
        symbol: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// What to export
        #[arg(long, value_enum, default_value_t = ExportTarget::Statements)]
        what: ExportTarget,

        /// File format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Prompt for symbols until 'exit'
    Interactive {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        show: ShowArgs,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Show {
            symbol,
            fetch,
            show,
        } => {
            let source = StatementSource::from_args(fetch.from_file.clone())?;
            show_symbol(
                &source,
                &symbol,
                &fetch.config(),
                &show.options(),
                &mut stdout,
            )
            .await?;
        }
        Commands::Export {
            symbol,
            output,
            what,
            format,
            fetch,
        } => {
            let source = StatementSource::from_args(fetch.from_file.clone())?;
            export_symbol(
                &source,
                &symbol,
                &fetch.config(),
                what,
                &output,
                format,
                &mut stdout,
            )
            .await?;
        }
        Commands::Interactive { fetch, show } => {
            let source = StatementSource::from_args(fetch.from_file.clone())?;
            let input = BufReader::new(tokio::io::stdin());
            run_session(
                input,
                &source,
                &fetch.config(),
                &show.options(),
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}
