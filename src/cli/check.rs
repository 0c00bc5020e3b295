//! Check CLI commands.

use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    validation::{self, Check},
    ArrowDataset, Dataset,
};

/// Report format for `verificar check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned PASS/FAIL/SKIP lines
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Outcome of one check in a CLI run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
struct Outcome {
    check: Check,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn run_check(
    check: Check,
    dataset: &ArrowDataset,
    expected_rows: Option<usize>,
    expected_duplicates: usize,
) -> Outcome {
    let result = match check {
        Check::NoNulls => validation::check_no_nulls(dataset),
        Check::DataTypes => validation::check_data_types(dataset),
        Check::AmountRange => validation::check_amount_range(dataset),
        Check::UniqueIds => validation::check_unique_ids(dataset),
        Check::DateFormat => validation::check_date_format(dataset),
        Check::RowCount => match expected_rows {
            Some(expected) => validation::check_row_count(dataset, expected),
            None => {
                return Outcome {
                    check,
                    status: Status::Skip,
                    message: Some("no --expected-rows given".to_string()),
                }
            }
        },
        Check::Completeness => validation::check_completeness(dataset),
        Check::DuplicateRows => validation::check_duplicate_count(dataset, expected_duplicates),
    };

    match result {
        Ok(()) => Outcome {
            check,
            status: Status::Pass,
            message: None,
        },
        Err(crate::Error::ValidationFailure { message, .. }) => Outcome {
            check,
            status: Status::Fail,
            message: Some(message),
        },
        Err(e) => Outcome {
            check,
            status: Status::Fail,
            message: Some(e.to_string()),
        },
    }
}

/// Run every check against a dataset file.
///
/// Returns `Ok(false)` when at least one check failed.
pub(crate) fn cmd_check(
    path: &Path,
    expected_rows: Option<usize>,
    expected_duplicates: usize,
    format: OutputFormat,
) -> crate::Result<bool> {
    let dataset = ArrowDataset::from_path(path)?;

    let outcomes: Vec<Outcome> = Check::ALL
        .iter()
        .map(|&check| run_check(check, &dataset, expected_rows, expected_duplicates))
        .collect();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o.status, Status::Fail))
        .count();

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "path": path.display().to_string(),
            "rows": dataset.len(),
            "columns": dataset.num_columns(),
            "passed": failed == 0,
            "failed": failed,
            "checks": outcomes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).map_err(|e| crate::Error::Format(e.to_string()))?
        );
    } else {
        println!("Data Validation Report");
        println!("======================");
        println!("File: {}", path.display());
        println!("Rows: {}", dataset.len());
        println!("Columns: {}", dataset.num_columns());
        println!();

        for outcome in &outcomes {
            let status = match outcome.status {
                Status::Pass => "PASS",
                Status::Fail => "FAIL",
                Status::Skip => "SKIP",
            };
            match &outcome.message {
                Some(message) => println!("{:<6} {:<16} {}", status, outcome.check, message),
                None => println!("{:<6} {}", status, outcome.check),
            }
        }
        println!();

        if failed == 0 {
            println!("\u{2713} All checks passed");
        } else {
            println!("\u{2717} {} of {} checks failed", failed, outcomes.len());
        }
    }

    Ok(failed == 0)
}

/// Display table statistics without asserting anything.
pub(crate) fn cmd_info(path: &Path) -> crate::Result<()> {
    let dataset = ArrowDataset::from_path(path)?;

    println!("File: {}", path.display());
    println!("Rows: {}", dataset.len());
    println!("Batches: {}", dataset.num_batches());
    println!("Columns: {}", dataset.num_columns());
    println!("Null cells: {}", validation::total_null_count(&dataset));
    println!(
        "Completeness: {:.1}%",
        validation::completeness_score(&dataset)
    );
    println!(
        "Duplicate rows: {}",
        validation::duplicate_row_count(&dataset)?
    );

    Ok(())
}
