//! verificar CLI - Data quality checks for transaction tables
//!
//! Command-line interface for running the checks against data files.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod check;

use check::OutputFormat;

/// verificar - Data quality assertions over Arrow tables
#[derive(Parser)]
#[command(name = "verificar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check against a dataset
    Check {
        /// Path to dataset file (CSV/JSON Lines/Parquet)
        path: PathBuf,
        /// Expected number of rows; the row count check is skipped if absent
        #[arg(long)]
        expected_rows: Option<usize>,
        /// Expected number of fully duplicate rows
        #[arg(long, default_value = "0")]
        expected_duplicates: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Display row count, completeness and duplicate statistics
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
}

/// Run the verificar CLI.
pub fn run() -> ExitCode {
    crate::logging::init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            path,
            expected_rows,
            expected_duplicates,
            format,
        } => check::cmd_check(&path, expected_rows, expected_duplicates, format),
        Commands::Info { path } => check::cmd_info(&path).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
