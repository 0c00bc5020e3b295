//! verificar - Data Quality Assertions over Arrow Tables
//!
//! A fixed set of data quality checks for transaction tables (null checks,
//! type checks, range checks, uniqueness, date parsing, row counts,
//! completeness and duplicate rows), evaluated over Arrow `RecordBatch`
//! data loaded from CSV, JSON Lines or Parquet.
//!
//! # Design Principles
//!
//! 1. **Independent checks** - Every check is a single read-only pass that
//!    either holds or fails with its own labelled error
//! 2. **Pure Rust** - No Python, no FFI
//! 3. **Arrow primitives** - Null bitmaps, casts and row encoding come from
//!    Arrow rather than being reimplemented
//!
//! # Quick Start
//!
//! ```
//! use verificar::{datasets::sample_transactions, validation};
//!
//! let dataset = sample_transactions().unwrap();
//!
//! validation::check_no_nulls(&dataset).unwrap();
//! validation::check_unique_ids(&dataset).unwrap();
//! validation::check_date_format(&dataset).unwrap();
//! assert!(validation::completeness_score(&dataset) >= validation::MIN_COMPLETENESS);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::unreadable_literal
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod dataset;
pub mod datasets;
pub mod error;
pub mod logging;
pub mod validation;

// Re-exports for convenience
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use dataset::{ArrowDataset, Dataset};
pub use error::{Error, Result};
pub use validation::Check;
