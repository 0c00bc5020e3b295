//! Generic numeric tables of optional f64 columns

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, Float64Array, RecordBatch},
    datatypes::{DataType, Field, Schema},
};

use crate::{ArrowDataset, Error, Result};

/// Build a table of nullable float64 columns, one per `(name, values)` pair.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] when no columns are given and
/// [`Error::SchemaMismatch`] when the columns differ in length.
///
/// # Example
///
/// ```
/// use verificar::{datasets::numeric_table, Dataset};
///
/// let dataset = numeric_table(&[
///     ("col1", vec![Some(1.0), Some(2.0), None, Some(4.0)]),
///     ("col2", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
/// ])
/// .unwrap();
/// assert_eq!(dataset.len(), 4);
/// ```
pub fn numeric_table(columns: &[(&str, Vec<Option<f64>>)]) -> Result<ArrowDataset> {
    let Some((first_name, first_values)) = columns.first() else {
        return Err(Error::EmptyDataset);
    };

    let rows = first_values.len();
    if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != rows) {
        return Err(Error::schema_mismatch(format!(
            "Column '{}' has {} values but '{}' has {}",
            name,
            values.len(),
            first_name,
            rows
        )));
    }

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, true))
            .collect::<Vec<_>>(),
    ));

    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, values)| Arc::new(Float64Array::from(values.clone())) as ArrayRef)
        .collect();

    let batch = RecordBatch::try_new(schema, arrays).map_err(Error::Arrow)?;
    ArrowDataset::from_batch(batch)
}
