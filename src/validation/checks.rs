//! Checks
//!
//! The fixed set of data quality checks. Each check is a single pass over
//! the table that returns `Ok(())` or a [`Error::ValidationFailure`].

use std::fmt;

use arrow::{
    array::{Array, ArrayRef, AsArray, Float64Array},
    compute::{
        cast, cast_with_options,
        kernels::cmp::{gt, lt},
        CastOptions,
    },
    datatypes::{DataType, Float64Type},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::metrics::{completeness_score, duplicate_row_count, duplicate_value_count, null_count};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

/// Transaction identifier column.
pub const TRANSACTION_ID: &str = "transaction_id";
/// Transaction amount column.
pub const AMOUNT: &str = "amount";
/// Transaction date column.
pub const DATE: &str = "date";
/// Customer identifier column.
pub const CUSTOMER_ID: &str = "customer_id";

/// Columns that must never contain nulls.
pub const CRITICAL_COLUMNS: [&str; 3] = [TRANSACTION_ID, AMOUNT, CUSTOMER_ID];

/// Exclusive lower bound for `amount`.
pub const MIN_AMOUNT: f64 = 0.0;
/// Exclusive upper bound for `amount`.
pub const MAX_AMOUNT: f64 = 1_000_000.0;
/// Minimum completeness percentage.
pub const MIN_COMPLETENESS: f64 = 75.0;

/// Date layouts accepted when a value is not ISO `YYYY-MM-DD`.
const DATE_FORMATS: [&str; 8] = [
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// The checks verificar knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Check {
    /// Critical columns contain no nulls
    NoNulls,
    /// Identifier columns are strings and `amount` is float64
    DataTypes,
    /// Every amount lies strictly between the bounds
    AmountRange,
    /// Transaction identifiers are pairwise distinct
    UniqueIds,
    /// Every date parses as a calendar date
    DateFormat,
    /// Row count matches the expected count
    RowCount,
    /// Completeness meets the minimum percentage
    Completeness,
    /// Duplicate row count matches the expected count
    DuplicateRows,
}

impl Check {
    /// Every check, in the order the CLI runs them.
    pub const ALL: [Self; 8] = [
        Self::NoNulls,
        Self::DataTypes,
        Self::AmountRange,
        Self::UniqueIds,
        Self::DateFormat,
        Self::RowCount,
        Self::Completeness,
        Self::DuplicateRows,
    ];

    /// Stable kebab-case label
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoNulls => "no-nulls",
            Self::DataTypes => "data-types",
            Self::AmountRange => "amount-range",
            Self::UniqueIds => "unique-ids",
            Self::DateFormat => "date-format",
            Self::RowCount => "row-count",
            Self::Completeness => "completeness",
            Self::DuplicateRows => "duplicate-rows",
        }
    }

    /// One-line description of the condition required to pass
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoNulls => "transaction_id, amount and customer_id contain no nulls",
            Self::DataTypes => "identifiers are strings and amount is float64",
            Self::AmountRange => "0 < amount < 1,000,000 for every row",
            Self::UniqueIds => "transaction_id values are unique",
            Self::DateFormat => "every date parses as a calendar date",
            Self::RowCount => "row count matches the expected count",
            Self::Completeness => "at least 75% of cells are present (not null or NaN)",
            Self::DuplicateRows => "duplicate row count matches the expected count",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

fn failure(check: Check, message: String) -> Error {
    warn!(check = %check, %message, "check failed");
    Error::validation(check, message)
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

/// Critical columns (`transaction_id`, `amount`, `customer_id`) contain no
/// null values.
///
/// # Errors
///
/// Fails with [`Check::NoNulls`] naming the first column holding a null, or
/// [`Error::ColumnNotFound`] if a critical column is missing.
pub fn check_no_nulls(dataset: &ArrowDataset) -> Result<()> {
    for column in CRITICAL_COLUMNS {
        let nulls = null_count(dataset, column)?;
        if nulls > 0 {
            return Err(failure(
                Check::NoNulls,
                format!(
                    "Column {} contains null values ({} of {} rows)",
                    column,
                    nulls,
                    dataset.len()
                ),
            ));
        }
    }

    debug!(check = %Check::NoNulls, columns = ?CRITICAL_COLUMNS, "check passed");
    Ok(())
}

/// Identifier columns are string typed and `amount` is float64.
///
/// # Errors
///
/// Fails with [`Check::DataTypes`] on the first mistyped column.
pub fn check_data_types(dataset: &ArrowDataset) -> Result<()> {
    let schema = dataset.schema();

    for (column, expected) in [
        (TRANSACTION_ID, "Utf8"),
        (AMOUNT, "Float64"),
        (CUSTOMER_ID, "Utf8"),
    ] {
        let field = schema
            .field_with_name(column)
            .map_err(|_| Error::column_not_found(column))?;
        let data_type = field.data_type();

        let ok = if column == AMOUNT {
            *data_type == DataType::Float64
        } else {
            is_string_type(data_type)
        };

        if !ok {
            return Err(failure(
                Check::DataTypes,
                format!(
                    "Column '{}' has type {}, expected {}",
                    column, data_type, expected
                ),
            ));
        }
    }

    debug!(check = %Check::DataTypes, "check passed");
    Ok(())
}

/// Every `amount` satisfies `MIN_AMOUNT < amount < MAX_AMOUNT`.
///
/// Any numeric type is accepted and widened to float64 first. Null and `NaN`
/// amounts fail, since neither comparison holds for them.
///
/// # Errors
///
/// Fails with [`Check::AmountRange`] when `amount` is not numeric or any
/// amount is missing or out of range.
pub fn check_amount_range(dataset: &ArrowDataset) -> Result<()> {
    let amount = dataset.column(AMOUNT)?;
    if !amount.data_type().is_numeric() {
        return Err(failure(
            Check::AmountRange,
            format!(
                "Column '{}' has non-numeric type {}",
                AMOUNT,
                amount.data_type()
            ),
        ));
    }

    let amount = cast(&amount, &DataType::Float64).map_err(Error::Arrow)?;
    let rows = amount.len();

    let missing = amount
        .as_primitive::<Float64Type>()
        .iter()
        .filter(|v| v.map_or(true, f64::is_nan))
        .count();
    if missing > 0 {
        return Err(failure(
            Check::AmountRange,
            format!("Amounts missing in {} of {} rows", missing, rows),
        ));
    }

    let above_min = gt(&amount, &Float64Array::new_scalar(MIN_AMOUNT)).map_err(Error::Arrow)?;
    let not_above = rows - above_min.true_count();
    if not_above > 0 {
        return Err(failure(
            Check::AmountRange,
            format!(
                "Amounts not above {} in {} of {} rows",
                MIN_AMOUNT, not_above, rows
            ),
        ));
    }

    let below_max = lt(&amount, &Float64Array::new_scalar(MAX_AMOUNT)).map_err(Error::Arrow)?;
    let not_below = rows - below_max.true_count();
    if not_below > 0 {
        return Err(failure(
            Check::AmountRange,
            format!(
                "Amounts not below {} in {} of {} rows",
                MAX_AMOUNT, not_below, rows
            ),
        ));
    }

    debug!(check = %Check::AmountRange, rows, "check passed");
    Ok(())
}

/// `transaction_id` values are pairwise distinct.
///
/// # Errors
///
/// Fails with [`Check::UniqueIds`] when any identifier repeats.
pub fn check_unique_ids(dataset: &ArrowDataset) -> Result<()> {
    let repeats = duplicate_value_count(dataset, TRANSACTION_ID)?;
    if repeats > 0 {
        return Err(failure(
            Check::UniqueIds,
            format!("Duplicate transaction IDs found ({} repeated)", repeats),
        ));
    }

    debug!(check = %Check::UniqueIds, "check passed");
    Ok(())
}

/// Every `date` value parses as a calendar date.
///
/// String columns are first cast to `Date32` with safe casting disabled,
/// which accepts ISO dates and timestamps. If that cast fails, each value it
/// rejected is retried against the layouts in `DATE_FORMATS`
/// (`2024/01/15`, `01/15/2024`, `January 5, 2024`, ...). Nulls pass, as do
/// columns already typed as dates or timestamps.
///
/// # Errors
///
/// Fails with [`Check::DateFormat`] naming the first value no layout accepts
/// and its parse error.
pub fn check_date_format(dataset: &ArrowDataset) -> Result<()> {
    let dates = dataset.column(DATE)?;

    match dates.data_type() {
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) | DataType::Null => {}
        data_type if is_string_type(data_type) => {
            let options = CastOptions {
                safe: false,
                ..Default::default()
            };
            if cast_with_options(&dates, &DataType::Date32, &options).is_err() {
                check_dates_leniently(&dates)?;
            }
        }
        other => {
            return Err(failure(
                Check::DateFormat,
                format!("Invalid date format: column '{}' has type {}", DATE, other),
            ));
        }
    }

    debug!(check = %Check::DateFormat, rows = dates.len(), "check passed");
    Ok(())
}

fn check_dates_leniently(dates: &ArrayRef) -> Result<()> {
    let text = cast(dates, &DataType::Utf8).map_err(Error::Arrow)?;
    let parsed = cast(&text, &DataType::Date32).map_err(Error::Arrow)?;
    let text = text.as_string::<i32>();

    for i in 0..text.len() {
        if text.is_null(i) || parsed.is_valid(i) {
            continue;
        }
        let value = text.value(i);
        if let Err(e) = parse_date(value) {
            return Err(failure(
                Check::DateFormat,
                format!("Invalid date format: '{}' ({})", value, e),
            ));
        }
    }
    Ok(())
}

/// Parse `value` as ISO first, then against each of `DATE_FORMATS`. The ISO
/// error is the one reported.
fn parse_date(value: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").or_else(|iso| {
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .ok_or(iso)
    })
}

/// The table holds exactly `expected` rows.
///
/// # Errors
///
/// Fails with [`Check::RowCount`] stating both counts.
pub fn check_row_count(dataset: &ArrowDataset, expected: usize) -> Result<()> {
    let actual = dataset.len();
    if actual != expected {
        return Err(failure(
            Check::RowCount,
            format!("Expected {} rows, got {}", expected, actual),
        ));
    }

    debug!(check = %Check::RowCount, actual, "check passed");
    Ok(())
}

/// At least [`MIN_COMPLETENESS`] percent of all cells are non-null.
///
/// # Errors
///
/// Fails with [`Check::Completeness`] stating the computed percentage.
pub fn check_completeness(dataset: &ArrowDataset) -> Result<()> {
    let completeness = completeness_score(dataset);
    if completeness < MIN_COMPLETENESS {
        return Err(failure(
            Check::Completeness,
            format!("Data completeness {}% is below threshold", completeness),
        ));
    }

    debug!(check = %Check::Completeness, completeness, "check passed");
    Ok(())
}

/// The table holds exactly `expected` fully duplicate rows.
///
/// # Errors
///
/// Fails with [`Check::DuplicateRows`] stating both counts.
pub fn check_duplicate_count(dataset: &ArrowDataset, expected: usize) -> Result<()> {
    let duplicates = duplicate_row_count(dataset)?;
    if duplicates != expected {
        return Err(failure(
            Check::DuplicateRows,
            format!(
                "Expected {} duplicate, found {}",
                expected, duplicates
            ),
        ));
    }

    debug!(check = %Check::DuplicateRows, duplicates, "check passed");
    Ok(())
}
