//! Data quality checks for transaction tables
//!
//! A fixed set of independent assertions evaluated against an
//! [`ArrowDataset`](crate::ArrowDataset):
//!
//! | Check | Passes when |
//! |---|---|
//! | [`check_no_nulls`] | `transaction_id`, `amount`, `customer_id` have no nulls or `NaN`s |
//! | [`check_data_types`] | identifiers are strings, `amount` is float64 |
//! | [`check_amount_range`] | `0 < amount < 1,000,000` on every row |
//! | [`check_unique_ids`] | `transaction_id` has no repeats |
//! | [`check_date_format`] | every `date` parses as a calendar date |
//! | [`check_row_count`] | row count equals the expected count |
//! | [`check_completeness`] | at least 75% of all cells are present (not null or `NaN`) |
//! | [`check_duplicate_count`] | full-row duplicates equal the expected count |
//!
//! Checks never depend on each other and stop at the first violation they
//! find. A failed check returns [`Error::ValidationFailure`](crate::Error)
//! tagged with its [`Check`].
//!
//! The tabular work (null bitmaps, type introspection, string-to-date casts,
//! row encoding for equality) is delegated to Arrow. Dates Arrow cannot
//! parse are retried with `chrono` against a few common layouts.
//!
//! # Example
//!
//! ```
//! use verificar::{datasets::sample_transactions, validation};
//!
//! let dataset = sample_transactions().unwrap();
//! validation::check_amount_range(&dataset).unwrap();
//! validation::check_row_count(&dataset, 3).unwrap();
//! assert!(validation::check_row_count(&dataset, 4).is_err());
//! ```

#![allow(clippy::cast_precision_loss)]

mod checks;
mod metrics;


pub use checks::{
    check_amount_range, check_completeness, check_data_types, check_date_format,
    check_duplicate_count, check_no_nulls, check_row_count, check_unique_ids, Check, AMOUNT,
    CRITICAL_COLUMNS, CUSTOMER_ID, DATE, MAX_AMOUNT, MIN_AMOUNT, MIN_COMPLETENESS,
    TRANSACTION_ID,
};
pub use metrics::{
    completeness_score, duplicate_row_count, duplicate_value_count, null_count, total_null_count,
};
