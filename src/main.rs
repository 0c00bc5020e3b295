//! verificar CLI - Data quality checks for transaction tables

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    verificar::cli::run()
}
