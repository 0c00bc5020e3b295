//! Transaction record tables
//!
//! Four columns, all nullable so that null-bearing fixtures can be built:
//! - transaction_id (string)
//! - amount (f64)
//! - date (string)
//! - customer_id (string)

use std::sync::Arc;

use arrow::{
    array::{Float64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema, SchemaRef},
};

use crate::{
    validation::{AMOUNT, CUSTOMER_ID, DATE, TRANSACTION_ID},
    ArrowDataset, Error, Result,
};

/// One transaction row
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Transaction identifier
    pub transaction_id: Option<String>,
    /// Amount
    pub amount: Option<f64>,
    /// Date as written, e.g. `2024-01-01`
    pub date: Option<String>,
    /// Customer identifier
    pub customer_id: Option<String>,
}

impl TransactionRecord {
    /// Create a record with every field present
    pub fn new(transaction_id: &str, amount: f64, date: &str, customer_id: &str) -> Self {
        Self {
            transaction_id: Some(transaction_id.to_string()),
            amount: Some(amount),
            date: Some(date.to_string()),
            customer_id: Some(customer_id.to_string()),
        }
    }

    /// Replace the amount
    #[must_use]
    pub fn with_amount(mut self, amount: Option<f64>) -> Self {
        self.amount = amount;
        self
    }

    /// Replace the date
    #[must_use]
    pub fn with_date(mut self, date: Option<&str>) -> Self {
        self.date = date.map(str::to_string);
        self
    }

    /// Replace the transaction identifier
    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: Option<&str>) -> Self {
        self.transaction_id = transaction_id.map(str::to_string);
        self
    }

    /// Replace the customer identifier
    #[must_use]
    pub fn with_customer_id(mut self, customer_id: Option<&str>) -> Self {
        self.customer_id = customer_id.map(str::to_string);
        self
    }
}

/// Schema shared by every transaction table
pub fn transaction_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(TRANSACTION_ID, DataType::Utf8, true),
        Field::new(AMOUNT, DataType::Float64, true),
        Field::new(DATE, DataType::Utf8, true),
        Field::new(CUSTOMER_ID, DataType::Utf8, true),
    ]))
}

/// Build a transaction table from records, in order.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] for an empty slice.
pub fn transactions(records: &[TransactionRecord]) -> Result<ArrowDataset> {
    if records.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let ids: StringArray = records
        .iter()
        .map(|r| r.transaction_id.as_deref())
        .collect();
    let amounts: Float64Array = records.iter().map(|r| r.amount).collect();
    let dates: StringArray = records.iter().map(|r| r.date.as_deref()).collect();
    let customers: StringArray = records.iter().map(|r| r.customer_id.as_deref()).collect();

    let batch = RecordBatch::try_new(
        transaction_schema(),
        vec![
            Arc::new(ids),
            Arc::new(amounts),
            Arc::new(dates),
            Arc::new(customers),
        ],
    )
    .map_err(Error::Arrow)?;

    ArrowDataset::from_batch(batch)
}

/// The three canonical sample transactions
pub fn sample_records() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::new("TXN001", 100.50, "2024-01-01", "CUST001"),
        TransactionRecord::new("TXN002", 200.75, "2024-01-02", "CUST002"),
        TransactionRecord::new("TXN003", 150.00, "2024-01-03", "CUST003"),
    ]
}

/// Load the three-row sample transaction table.
///
/// Every check passes against it (with an expected row count of 3 and no
/// duplicate rows).
///
/// # Errors
///
/// Returns an error if the table cannot be constructed (should never happen
/// for embedded data).
///
/// # Example
///
/// ```
/// use verificar::{datasets::sample_transactions, Dataset};
///
/// let dataset = sample_transactions().unwrap();
/// assert_eq!(dataset.len(), 3);
/// ```
pub fn sample_transactions() -> Result<ArrowDataset> {
    transactions(&sample_records())
}
