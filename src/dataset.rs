//! Dataset types for verificar.
//!
//! Provides the [`Dataset`] trait and [`ArrowDataset`], the in-memory table
//! every check runs against, plus loaders for CSV, JSON Lines and Parquet.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Read},
    path::Path,
    sync::Arc,
};

use arrow::{
    array::{Array, ArrayRef, RecordBatch},
    datatypes::{DataType, Field, Schema, SchemaRef},
    error::ArrowError,
};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    file::properties::WriterProperties,
};

use crate::error::{Error, Result};

/// Records sampled when inferring a CSV or JSON schema.
const INFER_RECORDS: usize = 1000;
/// Rows per batch produced by the text readers.
const BATCH_SIZE: usize = 8192;

/// A read-only table of Arrow RecordBatches.
pub trait Dataset: Send + Sync {
    /// Returns the total number of rows in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// Returns the number of columns in the schema.
    fn num_columns(&self) -> usize {
        self.schema().fields().len()
    }

    /// Returns the number of batches in the dataset.
    fn num_batches(&self) -> usize;
}

/// An in-memory dataset backed by Arrow RecordBatches.
///
/// Every batch shares the schema of the first one. The dataset is never
/// mutated after construction.
///
/// # Example
///
/// ```no_run
/// use verificar::{ArrowDataset, Dataset};
///
/// let dataset = ArrowDataset::from_path("transactions.csv").unwrap();
/// println!("Dataset has {} rows", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct ArrowDataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl ArrowDataset {
    /// Creates a dataset from batches sharing one schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDataset`] for no batches and
    /// [`Error::SchemaMismatch`] when a batch disagrees with the first.
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(Error::EmptyDataset);
        };
        let schema = first.schema();

        if let Some(i) = batches.iter().position(|b| b.schema() != schema) {
            return Err(Error::schema_mismatch(format!(
                "Batch {} has different schema than batch 0",
                i
            )));
        }

        let row_count = batches.iter().map(RecordBatch::num_rows).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates a dataset from a single batch.
    ///
    /// # Errors
    ///
    /// Never fails for a single batch; kept fallible to match [`Self::new`].
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Loads a dataset from a file, choosing the reader by extension
    /// (`csv`, `json`/`jsonl`, `parquet`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension, or the
    /// reader's error if the file cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "parquet" => Self::from_parquet(path),
            "csv" => Self::from_csv(path),
            "json" | "jsonl" => Self::from_json(path),
            ext => Err(Error::unsupported_format(ext)),
        }
    }

    /// Loads a dataset from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid Parquet,
    /// or holds no batches.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let file = open(path.as_ref())?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .and_then(|builder| builder.build())
            .map_err(Error::Parquet)?;

        Self::collect(reader)
    }

    /// Saves the dataset to a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(e, path))?;

        let props = WriterProperties::builder().build();
        let mut writer =
            ArrowWriter::try_new(file, Arc::clone(&self.schema), Some(props)).map_err(Error::Parquet)?;

        for batch in &self.batches {
            writer.write(batch).map_err(Error::Parquet)?;
        }

        writer.close().map_err(Error::Parquet)?;
        Ok(())
    }

    /// Loads a dataset from a comma-separated file with a header row.
    ///
    /// Column types are inferred, except that date and timestamp columns are
    /// kept as text for [`check_date_format`](crate::validation::check_date_format).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid CSV, or
    /// has no rows.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::read_csv(open(path)?, open(path)?)
    }

    /// Loads a dataset from CSV text with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid CSV or has no rows.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::read_csv(data.as_bytes(), data.as_bytes())
    }

    /// Loads a dataset from a JSON Lines file, one object per row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed, or has no
    /// rows.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::read_json(BufReader::new(open(path)?), BufReader::new(open(path)?))
    }

    /// Loads a dataset from JSON Lines text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or has no rows.
    pub fn from_json_str(data: &str) -> Result<Self> {
        Self::read_json(Cursor::new(data), Cursor::new(data))
    }

    /// Infers a schema from `sample`, then reads every row from `data`.
    fn read_csv(mut sample: impl Read, data: impl Read) -> Result<Self> {
        use arrow_csv::{reader::Format, ReaderBuilder};

        let format = Format::default().with_header(true);
        let (inferred, _) = format
            .infer_schema(&mut sample, Some(INFER_RECORDS))
            .map_err(Error::Arrow)?;

        let reader = ReaderBuilder::new(Arc::new(temporal_as_text(&inferred)))
            .with_format(format)
            .with_batch_size(BATCH_SIZE)
            .build(data)
            .map_err(Error::Arrow)?;

        Self::collect(reader)
    }

    fn read_json(sample: impl BufRead, data: impl BufRead) -> Result<Self> {
        use arrow_json::{reader::infer_json_schema, ReaderBuilder};

        let (inferred, _) = infer_json_schema(sample, Some(INFER_RECORDS)).map_err(Error::Arrow)?;

        let reader = ReaderBuilder::new(Arc::new(inferred))
            .with_batch_size(BATCH_SIZE)
            .build(data)
            .map_err(Error::Arrow)?;

        Self::collect(reader)
    }

    fn collect(
        reader: impl Iterator<Item = std::result::Result<RecordBatch, ArrowError>>,
    ) -> Result<Self> {
        let batches = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;
        Self::new(batches)
    }

    /// Returns the underlying batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Returns one column as a single array, concatenated across batches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if the schema has no such column.
    pub fn column(&self, name: &str) -> Result<ArrayRef> {
        let index = self
            .schema
            .index_of(name)
            .map_err(|_| Error::column_not_found(name))?;

        let arrays: Vec<&dyn Array> = self
            .batches
            .iter()
            .map(|batch| batch.column(index).as_ref())
            .collect();

        arrow::compute::concat(&arrays).map_err(Error::Arrow)
    }
}

impl Dataset for ArrowDataset {
    fn len(&self) -> usize {
        self.row_count
    }

    fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io(e, path))
}

/// CSV inference types ISO dates as `Date32` and rejects the whole file on
/// an impossible date such as `2024-02-30`, so temporal columns stay text.
fn temporal_as_text(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                field.as_ref().clone().with_data_type(DataType::Utf8)
            }
            _ => field.as_ref().clone(),
        })
        .collect();
    Schema::new(fields)
}

#[cfg(test)]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
mod tests {
    use arrow::array::{Float64Array, StringArray};

    use super::*;

    fn create_test_batch(start: usize, count: usize) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("transaction_id", DataType::Utf8, false),
            Field::new("amount", DataType::Float64, false),
        ]));

        let ids: Vec<String> = (start..start + count)
            .map(|i| format!("TXN{:03}", i))
            .collect();
        let amounts: Vec<f64> = (start..start + count).map(|i| i as f64 * 10.5).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(ids)),
                Arc::new(Float64Array::from(amounts)),
            ],
        )
        .ok()
        .unwrap_or_else(|| panic!("Failed to create test batch"))
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents)
            .ok()
            .unwrap_or_else(|| panic!("Should write {}", name));
        path
    }

    #[test]
    fn test_new_dataset() {
        let dataset = ArrowDataset::new(vec![create_test_batch(0, 10)])
            .ok()
            .unwrap_or_else(|| panic!("Dataset should build"));
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.num_columns(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_empty_dataset_error() {
        let result = ArrowDataset::new(vec![]);
        assert!(matches!(result, Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_schema_mismatch_error() {
        let other = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("x", DataType::Utf8, false)])),
            vec![Arc::new(StringArray::from(vec!["a"]))],
        )
        .ok()
        .unwrap_or_else(|| panic!("Failed to create batch"));

        let result = ArrowDataset::new(vec![create_test_batch(0, 2), other]);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_multiple_batches() {
        let dataset = ArrowDataset::new(vec![create_test_batch(0, 3), create_test_batch(3, 4)])
            .ok()
            .unwrap_or_else(|| panic!("Dataset should build"));
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.num_batches(), 2);
    }

    #[test]
    fn test_column_concatenates_batches() {
        let dataset = ArrowDataset::new(vec![create_test_batch(0, 3), create_test_batch(3, 4)])
            .ok()
            .unwrap_or_else(|| panic!("Dataset should build"));

        let column = dataset
            .column("transaction_id")
            .ok()
            .unwrap_or_else(|| panic!("Column should exist"));
        assert_eq!(column.len(), 7);

        let ids = column
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap_or_else(|| panic!("Should be strings"));
        assert_eq!(ids.value(6), "TXN006");
    }

    #[test]
    fn test_column_not_found() {
        let dataset = ArrowDataset::from_batch(create_test_batch(0, 1))
            .ok()
            .unwrap_or_else(|| panic!("Dataset should build"));
        let result = dataset.column("customer_id");
        assert!(matches!(result, Err(Error::ColumnNotFound { name }) if name == "customer_id"));
    }

    #[test]
    fn test_csv_str_infers_types() {
        let data = "transaction_id,amount\nTXN001,100.5\nTXN002,200.75\n";
        let dataset = ArrowDataset::from_csv_str(data)
            .ok()
            .unwrap_or_else(|| panic!("CSV should parse"));

        assert_eq!(dataset.len(), 2);
        let schema = dataset.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(1).data_type(), &DataType::Float64);
    }

    #[test]
    fn test_csv_impossible_date_still_loads() {
        let data = "id,date\n1,2024-01-15\n2,2024-02-30\n";
        let dataset = ArrowDataset::from_csv_str(data)
            .ok()
            .unwrap_or_else(|| panic!("CSV with a bad date should still load"));

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.schema().field(1).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_csv_timestamps_stay_text() {
        let data = "id,date\n1,2024-01-15T10:30:00\n2,2024-01-16T11:00:00\n";
        let dataset = ArrowDataset::from_csv_str(data)
            .ok()
            .unwrap_or_else(|| panic!("CSV should parse"));
        assert_eq!(dataset.schema().field(1).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_json_str() {
        let data = "{\"id\": 1, \"value\": 10.0}\n{\"id\": 2, \"value\": null}\n";
        let dataset = ArrowDataset::from_json_str(data)
            .ok()
            .unwrap_or_else(|| panic!("JSON should parse"));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.num_columns(), 2);
    }

    #[test]
    fn test_csv_file_from_path() {
        let dir = tempfile::tempdir()
            .ok()
            .unwrap_or_else(|| panic!("Should create temp dir"));
        let path = write_file(&dir, "data.csv", "id,value\n1,10.0\n2,20.0\n3,30.0\n");

        let loaded = ArrowDataset::from_path(&path)
            .ok()
            .unwrap_or_else(|| panic!("Should read CSV"));
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.num_columns(), 2);
    }

    #[test]
    fn test_jsonl_file_from_path() {
        let dir = tempfile::tempdir()
            .ok()
            .unwrap_or_else(|| panic!("Should create temp dir"));
        let path = write_file(
            &dir,
            "data.jsonl",
            "{\"id\": \"a\", \"value\": 1.5}\n{\"id\": \"b\", \"value\": 2.5}\n",
        );

        let loaded = ArrowDataset::from_path(&path)
            .ok()
            .unwrap_or_else(|| panic!("Should read JSON Lines"));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_parquet_roundtrip() {
        let dir = tempfile::tempdir()
            .ok()
            .unwrap_or_else(|| panic!("Should create temp dir"));
        let path = dir.path().join("data.parquet");

        let dataset = ArrowDataset::from_batch(create_test_batch(0, 5))
            .ok()
            .unwrap_or_else(|| panic!("Dataset should build"));
        dataset
            .to_parquet(&path)
            .ok()
            .unwrap_or_else(|| panic!("Should write Parquet"));

        let loaded = ArrowDataset::from_path(&path)
            .ok()
            .unwrap_or_else(|| panic!("Should read Parquet"));
        assert_eq!(loaded.len(), 5);
        assert_eq!(loaded.schema().field(1).data_type(), &DataType::Float64);
    }

    #[test]
    fn test_from_path_unsupported() {
        let result = ArrowDataset::from_path("data.xlsx");
        assert!(matches!(result, Err(Error::UnsupportedFormat { format }) if format == "xlsx"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ArrowDataset::from_path("/nonexistent/verificar/data.csv");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
