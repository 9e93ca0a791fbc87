//! Call Trace Studio CLI
//!
//! Turns compressed hierarchical trace logs into call-frequency reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use call_trace_studio::commands::{
    display_version, execute_batch, execute_parse, validate_parse_args, BatchArgs, ParseArgs,
    ParseOutcome,
};
use call_trace_studio::output::ReportFormat;

/// Call Trace Studio - reports from hierarchical call traces
#[derive(Parser, Debug)]
#[command(name = "call-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse one trace log into a report
    Parse {
        /// Compressed trace log (.gz)
        #[arg(long)]
        input_file: PathBuf,

        /// Report file to write
        #[arg(long)]
        output_file: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
    },

    /// Parse several trace logs, one report each
    Batch {
        /// Directory receiving the reports
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,

        /// Compressed trace logs
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse {
            input_file,
            output_file,
            format,
        } => {
            let args = ParseArgs {
                input_file,
                output_file,
                format,
            };

            // Validate args first
            validate_parse_args(&args)?;

            match execute_parse(&args)? {
                ParseOutcome::Written { path, rows } => {
                    println!("Analysis complete: {} rows saved to {}", rows, path.display());
                }
                ParseOutcome::NoData { reason } => {
                    println!("Trace processing produced no data: {}", reason);
                }
            }
        }

        Commands::Batch {
            output_dir,
            format,
            inputs,
        } => {
            let args = BatchArgs {
                inputs,
                output_dir,
                format,
            };

            let summary = execute_batch(&args)?;
            if summary.has_failures() {
                anyhow::bail!(
                    "{} of {} trace logs failed to parse",
                    summary.failed.len(),
                    summary.total()
                );
            }
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
