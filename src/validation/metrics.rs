//! Table Metrics
//!
//! Computed values the checks compare against their limits: missing-cell
//! counts, completeness and duplicate counts. A cell is missing when it is
//! null or a floating-point `NaN`.

use std::collections::HashSet;

use arrow::{
    array::{Array, AsArray},
    datatypes::{DataType, Float32Type, Float64Type},
    row::{RowConverter, SortField},
};

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

/// Nulls (including a `Null`-typed column, which is entirely null) plus
/// `NaN` values in float columns.
fn missing_count(array: &dyn Array) -> usize {
    let nulls = array.logical_nulls().map_or(0, |nulls| nulls.null_count());
    let nans = match array.data_type() {
        DataType::Float64 => array
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .filter(|v| v.is_nan())
            .count(),
        DataType::Float32 => array
            .as_primitive::<Float32Type>()
            .iter()
            .flatten()
            .filter(|v| v.is_nan())
            .count(),
        _ => 0,
    };
    nulls + nans
}

/// Count missing values (null or `NaN`) in one column across all batches.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] if the column does not exist.
pub fn null_count(dataset: &ArrowDataset, column: &str) -> Result<usize> {
    let index = dataset
        .schema()
        .index_of(column)
        .map_err(|_| Error::column_not_found(column))?;

    Ok(dataset
        .batches()
        .iter()
        .map(|batch| missing_count(batch.column(index).as_ref()))
        .sum())
}

/// Count missing cells across every column of the table.
pub fn total_null_count(dataset: &ArrowDataset) -> usize {
    dataset
        .batches()
        .iter()
        .flat_map(|batch| batch.columns())
        .map(|column| missing_count(column.as_ref()))
        .sum()
}

/// Percentage of present (non-null, non-`NaN`) cells across the whole table
/// (0-100).
///
/// A table with no rows or no columns scores 0.
pub fn completeness_score(dataset: &ArrowDataset) -> f64 {
    let cells = dataset.len() * dataset.num_columns();
    if cells == 0 {
        return 0.0;
    }

    let present = cells.saturating_sub(total_null_count(dataset));
    present as f64 / cells as f64 * 100.0
}

/// Count rows equal in every column to an earlier row.
///
/// Only occurrences beyond the first are counted; nulls compare equal to
/// nulls.
///
/// # Errors
///
/// Returns an error if a column type cannot be row-encoded.
pub fn duplicate_row_count(dataset: &ArrowDataset) -> Result<usize> {
    let indices: Vec<usize> = (0..dataset.num_columns()).collect();
    count_repeated_rows(dataset, &indices)
}

/// Count values in one column equal to an earlier value in that column.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] if the column does not exist.
pub fn duplicate_value_count(dataset: &ArrowDataset, column: &str) -> Result<usize> {
    let index = dataset
        .schema()
        .index_of(column)
        .map_err(|_| Error::column_not_found(column))?;
    count_repeated_rows(dataset, &[index])
}

/// Row-encode the projected columns of every batch and count repeats.
fn count_repeated_rows(dataset: &ArrowDataset, indices: &[usize]) -> Result<usize> {
    if indices.is_empty() || dataset.is_empty() {
        return Ok(0);
    }

    let schema = dataset.schema();
    let fields = indices
        .iter()
        .map(|&i| SortField::new(schema.field(i).data_type().clone()))
        .collect();
    let converter = RowConverter::new(fields).map_err(Error::Arrow)?;

    let mut seen = HashSet::new();
    let mut duplicates = 0;

    for batch in dataset.batches() {
        let columns: Vec<_> = indices.iter().map(|&i| batch.column(i).clone()).collect();
        let rows = converter.convert_columns(&columns).map_err(Error::Arrow)?;

        for row in rows.iter() {
            if !seen.insert(row.owned()) {
                duplicates += 1;
            }
        }
    }

    Ok(duplicates)
}
