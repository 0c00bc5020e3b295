//! In-memory table fixtures
//!
//! Constructors for the two table shapes the checks are exercised with:
//! transaction records and generic numeric records.
//!
//! # Example
//!
//! ```
//! use verificar::datasets::{sample_transactions, transactions, TransactionRecord};
//!
//! let sample = sample_transactions().unwrap();
//!
//! let mut records = verificar::datasets::sample_records();
//! records.push(TransactionRecord::new("TXN001", 5.0, "2024-01-04", "CUST004"));
//! let with_duplicate_id = transactions(&records).unwrap();
//! ```

mod numeric;
mod transactions;

pub use numeric::numeric_table;
pub use transactions::{
    sample_records, sample_transactions, transaction_schema, transactions, TransactionRecord,
};
